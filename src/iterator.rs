use crate::{
    element::{FH, HH, VH},
    error::MeshDefect,
    topol::Topology,
};

struct OutgoingHalfedgeIter<'a, const CCW: bool> {
    topol: &'a Topology,
    hstart: Option<HH>,
    hcurrent: Option<HH>,
}

impl Iterator for OutgoingHalfedgeIter<'_, true> {
    type Item = HH;

    fn next(&mut self) -> Option<Self::Item> {
        match self.hcurrent {
            Some(current) => {
                let next = self.topol.ccw_rotated_halfedge(current);
                self.hcurrent = match self.hstart {
                    Some(start) if start != next => Some(next),
                    _ => None,
                };
                Some(current)
            }
            None => None,
        }
    }
}

impl Iterator for OutgoingHalfedgeIter<'_, false> {
    type Item = HH;

    fn next(&mut self) -> Option<Self::Item> {
        match self.hcurrent {
            Some(current) => {
                let next = self.topol.cw_rotated_halfedge(current);
                self.hcurrent = match self.hstart {
                    Some(start) if start != next => Some(next),
                    _ => None,
                };
                Some(current)
            }
            None => None,
        }
    }
}

struct FaceHalfedgeIter<'a> {
    topol: &'a Topology,
    hstart: HH,
    hcurrent: Option<HH>,
}

impl Iterator for FaceHalfedgeIter<'_> {
    type Item = HH;

    fn next(&mut self) -> Option<Self::Item> {
        match self.hcurrent {
            Some(current) => {
                let next = self.topol.next_halfedge(current);
                self.hcurrent = if next == self.hstart {
                    None
                } else {
                    Some(next)
                };
                Some(current)
            }
            None => None,
        }
    }
}

/// Walks the loop of a face like [`FaceHalfedgeIter`], but refuses to trust
/// the `next` links. It stops with an error if the loop runs into a halfedge
/// of another face, or fails to close within the number of halfedges in the
/// mesh.
struct CheckedFaceHalfedgeIter<'a> {
    topol: &'a Topology,
    face: FH,
    hstart: HH,
    hcurrent: Option<HH>,
    remaining: usize,
}

impl Iterator for CheckedFaceHalfedgeIter<'_> {
    type Item = Result<HH, MeshDefect>;

    fn next(&mut self) -> Option<Self::Item> {
        let current = self.hcurrent?;
        if self.remaining == 0 || self.topol.halfedge_face(current) != Some(self.face) {
            self.hcurrent = None;
            return Some(Err(MeshDefect::BrokenLoop(current)));
        }
        self.remaining -= 1;
        let next = self.topol.next_halfedge(current);
        self.hcurrent = if next == self.hstart {
            None
        } else {
            Some(next)
        };
        Some(Ok(current))
    }
}

pub(crate) fn vv_cw_iter(topol: &Topology, v: VH) -> impl Iterator<Item = VH> + use<'_> {
    voh_cw_iter(topol, v).map(|h| topol.head_vertex(h))
}

pub(crate) fn voh_ccw_iter(topol: &Topology, v: VH) -> impl Iterator<Item = HH> + use<'_> {
    let h = topol.vertex_halfedge(v);
    OutgoingHalfedgeIter::<true> {
        topol,
        hstart: h,
        hcurrent: h,
    }
}

pub(crate) fn voh_cw_iter(topol: &Topology, v: VH) -> impl Iterator<Item = HH> + use<'_> {
    let h = topol.vertex_halfedge(v);
    OutgoingHalfedgeIter::<false> {
        topol,
        hstart: h,
        hcurrent: h,
    }
}

/// The halfedges bounding `f`, starting at its anchor halfedge and following
/// `next` until the loop closes. Each call produces a fresh iterator.
pub(crate) fn fh_ccw_iter(topol: &Topology, f: FH) -> impl Iterator<Item = HH> + use<'_> {
    let h = topol.face_halfedge(f);
    FaceHalfedgeIter {
        topol,
        hstart: h,
        hcurrent: Some(h),
    }
}

pub(crate) fn fv_ccw_iter(topol: &Topology, f: FH) -> impl Iterator<Item = VH> + use<'_> {
    fh_ccw_iter(topol, f).map(|h| topol.head_vertex(h))
}

pub(crate) fn fh_checked_iter(
    topol: &Topology,
    f: FH,
) -> impl Iterator<Item = Result<HH, MeshDefect>> + use<'_> {
    let h = topol.face_halfedge(f);
    CheckedFaceHalfedgeIter {
        topol,
        face: f,
        hstart: h,
        hcurrent: Some(h),
        remaining: topol.num_halfedges(),
    }
}
