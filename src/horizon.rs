/*!
Horizon tracing for incremental convex hulls.

Given a point outside the hull and the faces it can see (its conflict set),
the horizon is the closed loop of halfedges that separate the visible faces
from the rest of the hull. Each horizon halfedge belongs to a visible face,
and its twin belongs to a face that stays. The loop is produced in the
orientation of the visible faces, so pairing every horizon halfedge with the
new point yields correctly oriented faces that close the hole left by the
visible faces.

```text
         invisible
    .-------<-------.
    |\      h1     /|
    | \   seen    / |
 h0 ^  \         /  v h2
    |   \       /   |
    |    '--<--'    |
    '------->-------'
           h3
```

The tracer never modifies the mesh. It finds one horizon halfedge, then
repeatedly pivots around the head of the current halfedge, crossing into
neighbouring visible faces, until the next halfedge with an invisible twin
is found. The walk ends when it arrives back at the first halfedge.
*/

use crate::{
    conflict::{ConflictIndex, ConflictSet},
    element::{HH, HasTopology, PH, VH},
    error::{Error, MeshDefect, RegionDefect},
    iterator,
    topol::Topology,
};

/// The ordered loop of horizon halfedges of a point.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Horizon {
    point: PH,
    halfedges: Vec<HH>,
}

impl Horizon {
    /// The point whose horizon this is.
    pub fn point(&self) -> PH {
        self.point
    }

    /// The horizon halfedges in loop order. The head of each halfedge is the
    /// tail of the one after it, and the last one leads back to the first.
    pub fn halfedges(&self) -> &[HH] {
        &self.halfedges
    }

    /// Number of edges on the horizon, at least 3 for a traced horizon.
    pub fn len(&self) -> usize {
        self.halfedges.len()
    }

    pub fn is_empty(&self) -> bool {
        self.halfedges.is_empty()
    }

    /// Same as [`Self::halfedges`], by value.
    pub fn iter(&self) -> impl Iterator<Item = HH> + '_ {
        self.halfedges.iter().copied()
    }

    /// The vertices on the horizon, in loop order.
    pub fn vertices<'a>(&'a self, mesh: &'a impl HasTopology) -> impl Iterator<Item = VH> + 'a {
        let topol = mesh.topology();
        self.iter().map(move |h| topol.tail_vertex(h))
    }

    /// Triangles connecting every horizon edge to `apex`, the vertex of the
    /// newly inserted point.
    ///
    /// They have the same orientation as the faces they replace, so adding
    /// them to the faces that stay closes the mesh again.
    pub fn cone_triangles<'a>(
        &'a self,
        mesh: &'a impl HasTopology,
        apex: VH,
    ) -> impl Iterator<Item = [VH; 3]> + 'a {
        let topol = mesh.topology();
        self.iter()
            .map(move |h| [topol.tail_vertex(h), topol.head_vertex(h), apex])
    }

    /// Check if both horizons are the same loop, possibly starting at
    /// different halfedges.
    pub fn is_rotation_of(&self, other: &Horizon) -> bool {
        if self.len() != other.len() {
            return false;
        }
        if self.is_empty() {
            return true;
        }
        match other.halfedges.iter().position(|h| *h == self.halfedges[0]) {
            Some(offset) => self
                .halfedges
                .iter()
                .zip(other.halfedges[offset..].iter().chain(other.halfedges[..offset].iter()))
                .all(|(a, b)| a == b),
            None => false,
        }
    }
}

impl<'a> IntoIterator for &'a Horizon {
    type Item = &'a HH;
    type IntoIter = std::slice::Iter<'a, HH>;

    fn into_iter(self) -> Self::IntoIter {
        self.halfedges.iter()
    }
}

/// Whether the face across `h` is visible, i.e. `h` does not lie on the
/// horizon.
fn twin_in_conflict<C>(topol: &Topology, conflicts: &C, h: HH) -> Result<bool, MeshDefect>
where
    C: ConflictSet + ?Sized,
{
    match topol.halfedge_face(h.opposite()) {
        Some(f) => Ok(conflicts.contains(f)),
        None => Err(MeshDefect::OpenHalfedge(h.opposite())),
    }
}

enum Search {
    Found(HH),
    /// Every conflict face is surrounded by conflict faces.
    Exhausted,
    Empty,
}

fn find_start_halfedge<C>(topol: &Topology, conflicts: &C) -> Result<Search, MeshDefect>
where
    C: ConflictSet + ?Sized,
{
    let mut empty = true;
    for f in conflicts.faces() {
        empty = false;
        if !topol.is_valid_face(f) {
            return Err(MeshDefect::UnknownFace(f));
        }
        for h in iterator::fh_checked_iter(topol, f) {
            let h = h?;
            if !twin_in_conflict(topol, conflicts, h)? {
                return Ok(Search::Found(h));
            }
        }
    }
    Ok(if empty {
        Search::Empty
    } else {
        Search::Exhausted
    })
}

enum Pivot {
    Next(HH),
    Exhausted(VH),
}

/// Find the horizon halfedge following `h` by rotating around its head.
///
/// Starting with the halfedge after `h`, every candidate leaves the head of
/// `h`. While the face across the candidate is visible, step across into that
/// face and take the halfedge following the twin. The rotation visits each
/// outgoing halfedge at most once, so it ends at the latest when it comes
/// back to the first candidate.
fn next_horizon_halfedge<C>(topol: &Topology, conflicts: &C, h: HH) -> Result<Pivot, MeshDefect>
where
    C: ConflictSet + ?Sized,
{
    let pivot = topol.head_vertex(h);
    let first = topol.next_halfedge(h);
    let mut candidate = first;
    for _ in 0..topol.num_halfedges() {
        if topol.tail_vertex(candidate) != pivot {
            return Err(MeshDefect::DetachedPivot(candidate));
        }
        if !twin_in_conflict(topol, conflicts, candidate)? {
            return Ok(Pivot::Next(candidate));
        }
        tracing::trace!(from = %candidate, around = %pivot, "crossing into visible face");
        candidate = topol.cw_rotated_halfedge(candidate);
        if candidate == first {
            return Ok(Pivot::Exhausted(pivot));
        }
    }
    Err(MeshDefect::RunawayWalk(h))
}

/// The number of halfedges of the conflict faces that lie on the horizon.
fn count_horizon_halfedges<C>(topol: &Topology, conflicts: &C) -> Result<usize, MeshDefect>
where
    C: ConflictSet + ?Sized,
{
    let mut count = 0usize;
    for f in conflicts.faces() {
        if !topol.is_valid_face(f) {
            return Err(MeshDefect::UnknownFace(f));
        }
        for h in iterator::fh_checked_iter(topol, f) {
            if !twin_in_conflict(topol, conflicts, h?)? {
                count += 1;
            }
        }
    }
    Ok(count)
}

fn walk_horizon<C>(topol: &Topology, point: PH, conflicts: &C) -> Result<Vec<HH>, Error>
where
    C: ConflictSet + ?Sized,
{
    let inconsistent = |defect| Error::InconsistentMeshState { point, defect };
    let degenerate = |cause| Error::DegenerateConflictRegion { point, cause };
    let start = match find_start_halfedge(topol, conflicts).map_err(inconsistent)? {
        Search::Found(h) => h,
        Search::Exhausted => return Err(degenerate(RegionDefect::NoStartEdge)),
        Search::Empty => return Err(Error::EmptyConflictSet(point)),
    };
    let mut halfedges = vec![start];
    let mut current = start;
    loop {
        current = match next_horizon_halfedge(topol, conflicts, current).map_err(inconsistent)? {
            Pivot::Next(h) => h,
            Pivot::Exhausted(v) => return Err(degenerate(RegionDefect::PivotExhausted(v))),
        };
        if current == start {
            break;
        }
        if halfedges.len() >= topol.num_halfedges() {
            return Err(inconsistent(MeshDefect::RunawayWalk(current)));
        }
        halfedges.push(current);
    }
    // The walk only follows the loop through the start halfedge. Holes in the
    // region, or other islands, have horizon halfedges that were not reached.
    let expected = count_horizon_halfedges(topol, conflicts).map_err(inconsistent)?;
    if expected != halfedges.len() {
        return Err(degenerate(RegionDefect::MultipleLoops {
            traced: halfedges.len(),
            expected,
        }));
    }
    // A single loop that touches itself at a vertex surrounds a hole too.
    let mut tails: Vec<VH> = halfedges.iter().map(|h| topol.tail_vertex(*h)).collect();
    tails.sort_unstable();
    if let Some(pair) = tails.windows(2).find(|pair| pair[0] == pair[1]) {
        return Err(degenerate(RegionDefect::PinchedVertex(pair[0])));
    }
    Ok(halfedges)
}

/// Trace the horizon of `point`, whose conflict set on `mesh` is `conflicts`.
///
/// The conflict faces must form a single patch without holes, which does not
/// cover the whole mesh. This holds for the visible faces of a point outside
/// a convex hull, in general position. Violations are reported as
/// [`Error::DegenerateConflictRegion`], and a mesh whose links turn out to be
/// broken as [`Error::InconsistentMeshState`]. An empty conflict set is
/// [`Error::EmptyConflictSet`]. Partial horizons are never returned.
///
/// The result depends only on the mesh and the set of conflict faces. The
/// order in which `conflicts` yields its faces only changes which halfedge
/// the loop starts at.
pub fn trace_horizon<C>(mesh: &impl HasTopology, point: PH, conflicts: &C) -> Result<Horizon, Error>
where
    C: ConflictSet + ?Sized,
{
    match walk_horizon(mesh.topology(), point, conflicts) {
        Ok(halfedges) => {
            tracing::debug!(point = %point, edges = halfedges.len(), "traced horizon");
            Ok(Horizon { point, halfedges })
        }
        Err(e) => {
            tracing::debug!(point = %point, error = %e, "failed to trace horizon");
            Err(e)
        }
    }
}

/// Trace the horizon of `point` using its conflicts recorded in `index`.
pub fn trace_point_horizon<I>(mesh: &impl HasTopology, index: &I, point: PH) -> Result<Horizon, Error>
where
    I: ConflictIndex,
{
    trace_horizon(mesh, point, &index.conflicts_of(point))
}
