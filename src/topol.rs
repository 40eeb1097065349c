use std::collections::HashMap;

use crate::{
    element::{Edge, Face, Halfedge, Handle, Vertex, EH, FH, HH, VH},
    error::Error,
    iterator,
};

/// Connectivity of a closed polygon mesh.
///
/// Vertices, edges and faces live in flat arenas and refer to each other only
/// through handles. Every edge stores its two halfedges side by side, so the
/// twin of halfedge `h` is always `h ^ 1`.
#[derive(Clone, Debug)]
pub struct Topology {
    vertices: Vec<Vertex>,
    edges: Vec<Edge>,
    faces: Vec<Face>,
}

impl Topology {
    pub fn new() -> Self {
        Topology {
            vertices: Vec::new(),
            edges: Vec::new(),
            faces: Vec::new(),
        }
    }

    pub fn with_capacity(nverts: usize, nedges: usize, nfaces: usize) -> Self {
        Topology {
            vertices: Vec::with_capacity(nverts),
            edges: Vec::with_capacity(nedges),
            faces: Vec::with_capacity(nfaces),
        }
    }

    /// Build the topology of a closed mesh with `nverts` vertices from
    /// polygons given as vertex loops.
    ///
    /// All polygons must be oriented consistently, so that every edge is
    /// traversed once in each direction. Vertices that don't appear in any
    /// polygon are kept as isolated vertices.
    pub fn from_polygons<P: AsRef<[VH]>>(nverts: usize, polygons: &[P]) -> Result<Self, Error> {
        let nloop: usize = polygons.iter().map(|p| p.as_ref().len()).sum();
        let mut topol = Self::with_capacity(nverts, nloop / 2, polygons.len());
        topol.vertices.resize(nverts, Vertex { halfedge: None });
        let mut directed: HashMap<(VH, VH), HH> = HashMap::with_capacity(nloop);
        let mut loop_halfedges: Vec<HH> = Vec::new();
        for poly in polygons {
            let verts = poly.as_ref();
            if verts.len() < 3 {
                return Err(Error::DegeneratePolygon(verts.len()));
            }
            for (i, &v) in verts.iter().enumerate() {
                if !topol.is_valid_vertex(v) {
                    return Err(Error::InvalidVertex(v));
                }
                if verts[..i].contains(&v) {
                    return Err(Error::RepeatedVertex(v));
                }
            }
            let fnew: FH = (topol.faces.len() as u32).into();
            loop_halfedges.clear();
            for (from, to) in (0..verts.len()).map(|i| (verts[i], verts[(i + 1) % verts.len()])) {
                if directed.contains_key(&(from, to)) {
                    return Err(Error::ComplexHalfedge(from, to));
                }
                let h = match directed.get(&(to, from)) {
                    Some(oh) => oh.opposite(),
                    None => topol.new_edge(from, to),
                };
                directed.insert((from, to), h);
                topol.halfedge_mut(h).face = Some(fnew);
                if topol.vertex_halfedge(from).is_none() {
                    topol.set_vertex_halfedge(from, h);
                }
                loop_halfedges.push(h);
            }
            for i in 0..loop_halfedges.len() {
                topol.set_next_halfedge(
                    loop_halfedges[i],
                    loop_halfedges[(i + 1) % loop_halfedges.len()],
                );
            }
            topol.faces.push(Face {
                halfedge: loop_halfedges[0],
            });
        }
        // Every halfedge must have been claimed by a face.
        if let Some(h) = topol.halfedges().find(|h| topol.is_boundary_halfedge(*h)) {
            return Err(Error::OpenHalfedge(h));
        }
        tracing::debug!(
            vertices = topol.num_vertices(),
            edges = topol.num_edges(),
            faces = topol.num_faces(),
            "built closed mesh topology"
        );
        Ok(topol)
    }

    fn vertex(&self, v: VH) -> &Vertex {
        &self.vertices[v.index() as usize]
    }

    pub(crate) fn halfedge(&self, h: HH) -> &Halfedge {
        &self.edges[(h.index() >> 1) as usize].halfedges[(h.index() & 1) as usize]
    }

    fn halfedge_mut(&mut self, h: HH) -> &mut Halfedge {
        &mut self.edges[(h.index() >> 1) as usize].halfedges[(h.index() & 1) as usize]
    }

    pub fn vertex_halfedge(&self, v: VH) -> Option<HH> {
        self.vertex(v).halfedge
    }

    pub fn head_vertex(&self, h: HH) -> VH {
        self.halfedge(h).vertex
    }

    pub fn tail_vertex(&self, h: HH) -> VH {
        self.halfedge(h.opposite()).vertex
    }

    pub fn prev_halfedge(&self, h: HH) -> HH {
        self.halfedge(h).prev
    }

    pub fn next_halfedge(&self, h: HH) -> HH {
        self.halfedge(h).next
    }

    pub fn opposite_halfedge(&self, h: HH) -> HH {
        h.opposite()
    }

    pub fn halfedge_face(&self, h: HH) -> Option<FH> {
        self.halfedge(h).face
    }

    pub fn face_halfedge(&self, f: FH) -> HH {
        self.faces[f.index() as usize].halfedge
    }

    pub fn is_boundary_halfedge(&self, h: HH) -> bool {
        self.halfedge(h).face.is_none()
    }

    /// The next outgoing halfedge clockwise around the tail of `h`.
    ///
    /// This steps across the edge `h` into the neighbouring face, and returns
    /// the halfedge following the twin in that face.
    pub fn cw_rotated_halfedge(&self, h: HH) -> HH {
        self.halfedge(h.opposite()).next
    }

    /// The next outgoing halfedge counter-clockwise around the tail of `h`.
    pub fn ccw_rotated_halfedge(&self, h: HH) -> HH {
        self.halfedge(h).prev.opposite()
    }

    pub fn is_valid_vertex(&self, v: VH) -> bool {
        (v.index() as usize) < self.num_vertices()
    }

    pub fn is_valid_halfedge(&self, h: HH) -> bool {
        (h.index() as usize) < self.num_halfedges()
    }

    pub fn is_valid_face(&self, f: FH) -> bool {
        (f.index() as usize) < self.num_faces()
    }

    pub fn num_vertices(&self) -> usize {
        self.vertices.len()
    }

    pub fn num_edges(&self) -> usize {
        self.edges.len()
    }

    pub fn num_halfedges(&self) -> usize {
        self.num_edges() * 2
    }

    pub fn num_faces(&self) -> usize {
        self.faces.len()
    }

    pub fn vertices(&self) -> impl Iterator<Item = VH> + use<> {
        (0..(self.num_vertices() as u32)).map(|i| i.into())
    }

    pub fn halfedges(&self) -> impl Iterator<Item = HH> + use<> {
        (0..(self.num_halfedges() as u32)).map(|i| i.into())
    }

    pub fn edges(&self) -> impl Iterator<Item = EH> + use<> {
        (0..(self.num_edges() as u32)).map(|i| i.into())
    }

    pub fn faces(&self) -> impl Iterator<Item = FH> + use<> {
        (0..(self.num_faces() as u32)).map(|i| i.into())
    }

    pub fn find_halfedge(&self, from: VH, to: VH) -> Option<HH> {
        iterator::voh_cw_iter(self, from).find(|h| self.head_vertex(*h) == to)
    }

    pub fn vertex_valence(&self, v: VH) -> usize {
        iterator::voh_cw_iter(self, v).count()
    }

    pub fn face_valence(&self, f: FH) -> usize {
        iterator::fh_ccw_iter(self, f).count()
    }

    fn new_edge(&mut self, from: VH, to: VH) -> HH {
        let h: HH = ((self.edges.len() as u32) << 1).into();
        let oh = h.opposite();
        self.edges.push(Edge {
            halfedges: [
                Halfedge {
                    face: None,
                    vertex: to,
                    next: h,
                    prev: h,
                },
                Halfedge {
                    face: None,
                    vertex: from,
                    next: oh,
                    prev: oh,
                },
            ],
        });
        h
    }

    fn set_vertex_halfedge(&mut self, v: VH, h: HH) {
        self.vertices[v.index() as usize].halfedge = Some(h);
    }

    pub(crate) fn set_next_halfedge(&mut self, hprev: HH, hnext: HH) {
        self.halfedge_mut(hprev).next = hnext;
        self.halfedge_mut(hnext).prev = hprev;
    }
}

impl Default for Topology {
    fn default() -> Self {
        Self::new()
    }
}
