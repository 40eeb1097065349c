use glam::DVec3;

use crate::{
    conflict::ConflictSet,
    element::{EH, FH, HH, HasTopology, Handle, PH, VH},
    error::Error,
    horizon::{self, Horizon},
    iterator,
    topol::Topology,
};

/// A closed polygon mesh with vertex positions, e.g. the current state of an
/// incrementally built convex hull.
#[derive(Clone, Debug)]
pub struct Mesh {
    topol: Topology,
    points: Vec<DVec3>,
}

impl HasTopology for Mesh {
    fn topology(&self) -> &Topology {
        &self.topol
    }
}

impl Mesh {
    /// Create a mesh from vertex positions and consistently oriented
    /// polygons. The polygons must close up into a watertight surface, see
    /// [`Topology::from_polygons`].
    pub fn from_polygons<P: AsRef<[VH]>>(points: Vec<DVec3>, polygons: &[P]) -> Result<Self, Error> {
        let topol = Topology::from_polygons(points.len(), polygons)?;
        Ok(Mesh { topol, points })
    }

    pub fn num_vertices(&self) -> usize {
        self.topol.num_vertices()
    }

    pub fn num_edges(&self) -> usize {
        self.topol.num_edges()
    }

    pub fn num_halfedges(&self) -> usize {
        self.topol.num_halfedges()
    }

    pub fn num_faces(&self) -> usize {
        self.topol.num_faces()
    }

    pub fn vertices(&self) -> impl Iterator<Item = VH> + use<> {
        self.topol.vertices()
    }

    pub fn halfedges(&self) -> impl Iterator<Item = HH> + use<> {
        self.topol.halfedges()
    }

    pub fn edges(&self) -> impl Iterator<Item = EH> + use<> {
        self.topol.edges()
    }

    pub fn faces(&self) -> impl Iterator<Item = FH> + use<> {
        self.topol.faces()
    }

    pub fn points(&self) -> &[DVec3] {
        &self.points
    }

    pub fn point(&self, v: VH) -> Result<DVec3, Error> {
        self.points
            .get(v.index() as usize)
            .copied()
            .ok_or(Error::InvalidVertex(v))
    }

    pub fn vertex_valence(&self, v: VH) -> usize {
        self.topol.vertex_valence(v)
    }

    pub fn face_valence(&self, f: FH) -> usize {
        self.topol.face_valence(f)
    }

    pub fn head_vertex(&self, h: HH) -> VH {
        self.topol.head_vertex(h)
    }

    pub fn tail_vertex(&self, h: HH) -> VH {
        self.topol.tail_vertex(h)
    }

    pub fn next_halfedge(&self, h: HH) -> HH {
        self.topol.next_halfedge(h)
    }

    pub fn prev_halfedge(&self, h: HH) -> HH {
        self.topol.prev_halfedge(h)
    }

    pub fn opposite_halfedge(&self, h: HH) -> HH {
        self.topol.opposite_halfedge(h)
    }

    /// See [`Topology::cw_rotated_halfedge`].
    pub fn cw_rotated_halfedge(&self, h: HH) -> HH {
        self.topol.cw_rotated_halfedge(h)
    }

    pub fn vertex_halfedge(&self, v: VH) -> Option<HH> {
        self.topol.vertex_halfedge(v)
    }

    pub fn halfedge_face(&self, h: HH) -> Option<FH> {
        self.topol.halfedge_face(h)
    }

    pub fn face_halfedge(&self, f: FH) -> HH {
        self.topol.face_halfedge(f)
    }

    pub fn find_halfedge(&self, from: VH, to: VH) -> Option<HH> {
        self.topol.find_halfedge(from, to)
    }

    /// The halfedges bounding `f`, in loop order starting at
    /// [`Self::face_halfedge`].
    pub fn fh_ccw_iter(&self, f: FH) -> impl Iterator<Item = HH> + use<'_> {
        iterator::fh_ccw_iter(&self.topol, f)
    }

    pub fn fv_ccw_iter(&self, f: FH) -> impl Iterator<Item = VH> + use<'_> {
        iterator::fv_ccw_iter(&self.topol, f)
    }

    /// The neighbours of `v`, clockwise around it.
    pub fn vv_cw_iter(&self, v: VH) -> impl Iterator<Item = VH> + use<'_> {
        iterator::vv_cw_iter(&self.topol, v)
    }

    pub fn check_topology(&self) -> Result<(), Error> {
        self.topol.check()
    }

    /// Trace the horizon of `point` on this mesh. See [`horizon::trace_horizon`].
    pub fn trace_horizon<C>(&self, point: PH, conflicts: &C) -> Result<Horizon, Error>
    where
        C: ConflictSet + ?Sized,
    {
        horizon::trace_horizon(self, point, conflicts)
    }
}
