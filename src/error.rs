use thiserror::Error;

use crate::element::{FH, HH, PH, VH};

/// Why a conflict region cannot be bounded by a single horizon loop.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum RegionDefect {
    /// Every face adjacent to the conflict faces is itself in conflict, i.e.
    /// the region covers the whole hull.
    #[error("no conflict face borders a face outside the conflict set")]
    NoStartEdge,
    /// Rotating around the vertex visited every incident halfedge without
    /// leaving the conflict region.
    #[error("pivot around {0} found no exit from the conflict region")]
    PivotExhausted(VH),
    /// The traced loop does not account for all boundary edges of the region.
    #[error("traced {traced} horizon edges, but the region has {expected}")]
    MultipleLoops { traced: usize, expected: usize },
    /// The loop passes through the same vertex twice.
    #[error("horizon passes through {0} more than once")]
    PinchedVertex(VH),
}

/// Adjacency invariant found broken while walking the mesh.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum MeshDefect {
    #[error("{0} is not a face of the mesh")]
    UnknownFace(FH),
    #[error("{0} has no incident face")]
    OpenHalfedge(HH),
    #[error("the loop through {0} does not close on its face")]
    BrokenLoop(HH),
    #[error("{0} does not leave the pivot vertex")]
    DetachedPivot(HH),
    #[error("the horizon walk through {0} never returned to its start")]
    RunawayWalk(HH),
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Error {
    // Construction.
    #[error("{0} does not exist")]
    InvalidVertex(VH),
    #[error("a polygon with {0} vertices cannot form a face")]
    DegeneratePolygon(usize),
    #[error("{0} appears more than once in a polygon")]
    RepeatedVertex(VH),
    #[error("the halfedge from {0} to {1} is used by more than one face")]
    ComplexHalfedge(VH, VH),
    #[error("{0} has no incident face, the mesh is not closed")]
    OpenHalfedge(HH),
    // Topology.
    #[error("{0} starts and ends at the same vertex")]
    DegenerateHalfedge(HH),
    #[error("{0} is not linked consistently with its neighbours")]
    InvalidHalfedgeLink(HH),
    #[error("the outgoing halfedges of {0} are invalid")]
    InvalidOutgoingHalfedges(VH),
    #[error("the loop through {0} is invalid")]
    InvalidLoopTopology(HH),
    #[error("the loop through {0} belongs to more than one face")]
    InconsistentFaceInLoop(HH),
    #[error("{0} points to {1}, which does not point back")]
    InvalidFaceHalfedgeLink(FH, HH),
    // Horizon.
    #[error("{0} has no faces in conflict")]
    EmptyConflictSet(PH),
    #[error("the conflict region of {point} is degenerate: {cause}")]
    DegenerateConflictRegion { point: PH, cause: RegionDefect },
    #[error("inconsistent mesh while tracing the horizon of {point}: {defect}")]
    InconsistentMeshState { point: PH, defect: MeshDefect },
    // Obj.
    #[error("failed to load obj: {0}")]
    ObjLoadFailed(String),
    #[error("{0} coordinates cannot be grouped into 3D positions")]
    IncorrectNumberOfCoordinates(usize),
}
