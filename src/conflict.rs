/*!
Conflict sets: the faces of the hull that a point not yet inserted can see.

How the conflicts are computed and kept up to date is up to the caller. The
horizon tracer only relies on the [`ConflictSet`] capability: an O(1)
membership test, and iteration over the members.
*/

use std::{
    collections::{BTreeSet, HashSet},
    hash::BuildHasher,
};

use crate::element::{FH, Handle, PH};

/// The set of faces a point is in conflict with.
pub trait ConflictSet {
    /// Check if `f` is in the set. Expected to run in constant time.
    fn contains(&self, f: FH) -> bool;

    /// The faces in the set, each exactly once, in no particular order.
    fn faces(&self) -> impl Iterator<Item = FH> + '_;

    fn is_empty(&self) -> bool {
        self.faces().next().is_none()
    }
}

/// Conflicts of many points, queried per point.
pub trait ConflictIndex {
    fn is_in_conflict(&self, f: FH, p: PH) -> bool;

    fn conflict_faces(&self, p: PH) -> impl Iterator<Item = FH> + '_;

    /// View the conflicts of `point` as a [`ConflictSet`].
    fn conflicts_of(&self, point: PH) -> PointConflicts<'_, Self>
    where
        Self: Sized,
    {
        PointConflicts { index: self, point }
    }
}

/// The conflicts of one point, borrowed from a [`ConflictIndex`].
pub struct PointConflicts<'a, I> {
    index: &'a I,
    point: PH,
}

impl<I> PointConflicts<'_, I> {
    pub fn point(&self) -> PH {
        self.point
    }
}

impl<I: ConflictIndex> ConflictSet for PointConflicts<'_, I> {
    fn contains(&self, f: FH) -> bool {
        self.index.is_in_conflict(f, self.point)
    }

    fn faces(&self) -> impl Iterator<Item = FH> + '_ {
        self.index.conflict_faces(self.point)
    }
}

/// Set of faces backed by a dense array of slots indexed by face, plus a
/// packed list of the members. Insertion, removal and membership tests are
/// all O(1).
#[derive(Clone, Default)]
pub struct FaceSet {
    slots: Vec<Option<u32>>,
    members: Vec<FH>,
}

impl FaceSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an empty set with room for faces with indices up to `nfaces`
    /// without reallocating.
    pub fn with_capacity(nfaces: usize) -> Self {
        FaceSet {
            slots: vec![None; nfaces],
            members: Vec::new(),
        }
    }

    pub fn len(&self) -> usize {
        self.members.len()
    }

    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }

    pub fn contains(&self, f: FH) -> bool {
        matches!(self.slots.get(f.index() as usize), Some(Some(_)))
    }

    /// Insert `f`. Returns `false` if it was already present.
    pub fn insert(&mut self, f: FH) -> bool {
        let i = f.index() as usize;
        if i >= self.slots.len() {
            self.slots.resize(i + 1, None);
        }
        if self.slots[i].is_some() {
            return false;
        }
        self.slots[i] = Some(self.members.len() as u32);
        self.members.push(f);
        true
    }

    /// Remove `f`. Returns `false` if it was not present.
    pub fn remove(&mut self, f: FH) -> bool {
        let Some(pos) = self.slots.get_mut(f.index() as usize).and_then(Option::take) else {
            return false;
        };
        self.members.swap_remove(pos as usize);
        if let Some(moved) = self.members.get(pos as usize) {
            self.slots[moved.index() as usize] = Some(pos);
        }
        true
    }

    pub fn clear(&mut self) {
        for f in self.members.drain(..) {
            self.slots[f.index() as usize] = None;
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = FH> + '_ {
        self.members.iter().copied()
    }
}

impl FromIterator<FH> for FaceSet {
    fn from_iter<T: IntoIterator<Item = FH>>(iter: T) -> Self {
        let mut set = FaceSet::new();
        for f in iter {
            set.insert(f);
        }
        set
    }
}

impl ConflictSet for FaceSet {
    fn contains(&self, f: FH) -> bool {
        FaceSet::contains(self, f)
    }

    fn faces(&self) -> impl Iterator<Item = FH> + '_ {
        self.iter()
    }

    fn is_empty(&self) -> bool {
        FaceSet::is_empty(self)
    }
}

impl<S: BuildHasher> ConflictSet for HashSet<FH, S> {
    fn contains(&self, f: FH) -> bool {
        HashSet::contains(self, &f)
    }

    fn faces(&self) -> impl Iterator<Item = FH> + '_ {
        self.iter().copied()
    }

    fn is_empty(&self) -> bool {
        HashSet::is_empty(self)
    }
}

impl ConflictSet for BTreeSet<FH> {
    fn contains(&self, f: FH) -> bool {
        BTreeSet::contains(self, &f)
    }

    fn faces(&self) -> impl Iterator<Item = FH> + '_ {
        self.iter().copied()
    }

    fn is_empty(&self) -> bool {
        BTreeSet::is_empty(self)
    }
}

/// Bipartite graph between points and the faces they are in conflict with.
///
/// Both directions are stored, so the faces visible from a point and the
/// points that can see a face are both available without searching.
pub struct ConflictGraph {
    faces_by_point: Vec<FaceSet>,
    points_by_face: Vec<Vec<PH>>,
}

impl ConflictGraph {
    pub fn new(npoints: usize, nfaces: usize) -> Self {
        ConflictGraph {
            faces_by_point: vec![FaceSet::with_capacity(nfaces); npoints],
            points_by_face: vec![Vec::new(); nfaces],
        }
    }

    pub fn num_points(&self) -> usize {
        self.faces_by_point.len()
    }

    /// Record that `p` can see `f`. Returns `false` if this was already known.
    pub fn add_conflict(&mut self, p: PH, f: FH) -> bool {
        let pi = p.index() as usize;
        if pi >= self.faces_by_point.len() {
            self.faces_by_point.resize_with(pi + 1, FaceSet::new);
        }
        if !self.faces_by_point[pi].insert(f) {
            return false;
        }
        let fi = f.index() as usize;
        if fi >= self.points_by_face.len() {
            self.points_by_face.resize_with(fi + 1, Vec::new);
        }
        self.points_by_face[fi].push(p);
        true
    }

    /// Forget that `p` can see `f`. Returns `false` if it was not recorded.
    pub fn remove_conflict(&mut self, p: PH, f: FH) -> bool {
        let removed = self
            .faces_by_point
            .get_mut(p.index() as usize)
            .is_some_and(|faces| faces.remove(f));
        if removed {
            let points = &mut self.points_by_face[f.index() as usize];
            if let Some(i) = points.iter().position(|q| *q == p) {
                points.swap_remove(i);
            }
        }
        removed
    }

    pub fn faces_in_conflict(&self, p: PH) -> Option<&FaceSet> {
        self.faces_by_point.get(p.index() as usize)
    }

    pub fn points_in_conflict(&self, f: FH) -> &[PH] {
        match self.points_by_face.get(f.index() as usize) {
            Some(points) => points,
            None => &[],
        }
    }
}

impl ConflictIndex for ConflictGraph {
    fn is_in_conflict(&self, f: FH, p: PH) -> bool {
        self.faces_by_point
            .get(p.index() as usize)
            .is_some_and(|faces| faces.contains(f))
    }

    fn conflict_faces(&self, p: PH) -> impl Iterator<Item = FH> + '_ {
        self.faces_by_point
            .get(p.index() as usize)
            .into_iter()
            .flat_map(|faces| faces.iter())
    }
}

#[cfg(test)]
mod test {
    use std::collections::{BTreeSet, HashSet};

    use crate::element::{FH, Handle, PH};

    use super::{ConflictGraph, ConflictIndex, ConflictSet, FaceSet};

    fn sorted(set: &impl ConflictSet) -> Vec<u32> {
        let mut out: Vec<_> = set.faces().map(|f| f.index()).collect();
        out.sort();
        out
    }

    #[test]
    fn t_face_set() {
        let mut set = FaceSet::with_capacity(4);
        assert!(set.is_empty());
        assert!(set.insert(2.into()));
        assert!(set.insert(0.into()));
        assert!(set.insert(9.into()));
        assert!(!set.insert(2.into()));
        assert_eq!(set.len(), 3);
        assert!(set.contains(9.into()));
        assert!(!set.contains(1.into()));
        assert!(!set.contains(100.into()));
        assert!(set.remove(2.into()));
        assert!(!set.remove(2.into()));
        assert!(!set.remove(100.into()));
        assert_eq!(sorted(&set), [0, 9]);
        // The member moved into the vacated position must still be found.
        assert!(set.remove(9.into()));
        assert_eq!(sorted(&set), [0]);
        set.clear();
        assert!(ConflictSet::is_empty(&set));
        assert!(!set.contains(0.into()));
    }

    #[test]
    fn t_std_sets() {
        let faces = [3u32, 1, 4].map(FH::from);
        let hashed: HashSet<FH> = faces.iter().copied().collect();
        let ordered: BTreeSet<FH> = faces.iter().copied().collect();
        let dense: FaceSet = faces.iter().copied().collect();
        assert_eq!(sorted(&hashed), [1, 3, 4]);
        assert_eq!(sorted(&ordered), [1, 3, 4]);
        assert_eq!(sorted(&dense), [1, 3, 4]);
        for f in 0..6u32 {
            let f: FH = f.into();
            assert_eq!(ConflictSet::contains(&hashed, f), dense.contains(f));
            assert_eq!(ConflictSet::contains(&ordered, f), dense.contains(f));
        }
        assert!(ConflictSet::is_empty(&HashSet::<FH>::new()));
    }

    #[test]
    fn t_conflict_graph() {
        let mut graph = ConflictGraph::new(3, 4);
        let (p0, p1, p2): (PH, PH, PH) = (0.into(), 1.into(), 2.into());
        assert!(graph.add_conflict(p0, 1.into()));
        assert!(graph.add_conflict(p0, 2.into()));
        assert!(graph.add_conflict(p1, 2.into()));
        assert!(!graph.add_conflict(p1, 2.into()));
        assert!(graph.is_in_conflict(2.into(), p0));
        assert!(!graph.is_in_conflict(3.into(), p0));
        assert!(!graph.is_in_conflict(0.into(), PH::from(7)));
        assert_eq!(graph.points_in_conflict(2.into()), &[p0, p1]);
        assert!(graph.points_in_conflict(17.into()).is_empty());
        assert_eq!(sorted(&graph.conflicts_of(p0)), [1, 2]);
        assert!(graph.conflicts_of(p2).is_empty());
        assert_eq!(graph.conflicts_of(p1).point(), p1);
        assert!(graph.remove_conflict(p0, 2.into()));
        assert!(!graph.remove_conflict(p0, 2.into()));
        assert_eq!(graph.points_in_conflict(2.into()), &[p1]);
        assert_eq!(graph.faces_in_conflict(p0).map(|s| s.len()), Some(1));
        // Growing beyond the initial sizes.
        assert!(graph.add_conflict(5.into(), 11.into()));
        assert_eq!(graph.num_points(), 6);
        assert_eq!(graph.points_in_conflict(11.into()), &[PH::from(5)]);
    }
}
