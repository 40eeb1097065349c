use crate::{
    element::Handle,
    error::Error,
    iterator,
    topol::Topology,
};

fn check_vertices(mesh: &Topology, hvisited: &mut [bool]) -> Result<(), Error> {
    hvisited.fill(false);
    let limit = mesh.num_halfedges();
    for v in mesh.vertices() {
        if let Some(h) = v.halfedge(mesh) {
            if !h.is_valid(mesh) {
                return Err(Error::InvalidOutgoingHalfedges(v));
            }
            // Outgoing halfedge must point back to this vertex.
            if h.tail(mesh) != v {
                return Err(Error::InvalidOutgoingHalfedges(v));
            }
        }
        // Check cw iterator.
        for h in iterator::voh_cw_iter(mesh, v).take(limit) {
            if std::mem::replace(&mut hvisited[h.index() as usize], true) {
                return Err(Error::InvalidOutgoingHalfedges(v));
            }
        }
        // Check ccw iterator.
        for h in iterator::voh_ccw_iter(mesh, v).take(limit) {
            if !std::mem::replace(&mut hvisited[h.index() as usize], false) {
                return Err(Error::InvalidOutgoingHalfedges(v));
            }
        }
    }
    Ok(())
}

fn check_edges(mesh: &Topology, hflags: &mut [bool]) -> Result<(), Error> {
    for h in mesh.halfedges() {
        // Check if degenerate.
        if h.tail(mesh) == h.head(mesh) {
            return Err(Error::DegenerateHalfedge(h));
        }
        let hedge = mesh.halfedge(h);
        if !hedge.next.is_valid(mesh) || !hedge.prev.is_valid(mesh) {
            return Err(Error::InvalidHalfedgeLink(h));
        }
        // Check connectivity.
        if hedge.prev.next(mesh) != h
            || hedge.next.prev(mesh) != h
            || h.head(mesh) != hedge.next.tail(mesh)
            || h.tail(mesh) != hedge.prev.head(mesh)
        {
            return Err(Error::InvalidHalfedgeLink(h));
        }
    }
    // Check all loops.
    hflags.fill(false);
    for h in mesh.halfedges() {
        if hflags[h.index() as usize] {
            continue;
        }
        let f = h.face(mesh);
        let mut current = h;
        loop {
            if std::mem::replace(&mut hflags[current.index() as usize], true) {
                return Err(Error::InvalidLoopTopology(current));
            }
            if current.face(mesh) != f {
                return Err(Error::InconsistentFaceInLoop(current));
            }
            current = current.next(mesh);
            if current == h {
                break;
            }
        }
    }
    Ok(())
}

fn check_faces(mesh: &Topology) -> Result<(), Error> {
    for f in mesh.faces() {
        let h = f.halfedge(mesh);
        if !h.is_valid(mesh) || h.face(mesh) != Some(f) {
            return Err(Error::InvalidFaceHalfedgeLink(f, h));
        }
    }
    Ok(())
}

impl Topology {
    /// Check the topology of the mesh.
    ///
    /// This function will return an error if any errors are found in the
    /// topology.
    pub fn check(&self) -> Result<(), Error> {
        // To keep track of visited halfedges.
        let mut hvisited = vec![false; self.num_halfedges()].into_boxed_slice();
        check_vertices(self, &mut hvisited)?;
        check_edges(self, &mut hvisited)?;
        check_faces(self)?;
        Ok(())
    }
}
