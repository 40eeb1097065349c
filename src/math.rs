use glam::DVec3;

use crate::{
    element::{FH, HasTopology, Handle, VH},
    iterator,
    mesh::Mesh,
};

impl Mesh {
    /// Compute the unit face normal using Newell's method.
    ///
    /// The normal points towards the side from which the boundary loop of the
    /// face appears counter-clockwise. Faces with fewer than three vertices
    /// get a zero normal.
    pub fn calc_face_normal(&self, f: FH) -> DVec3 {
        let points = self.points();
        let (nverts, normal) = iterator::fh_ccw_iter(self.topology(), f).fold(
            (0usize, DVec3::ZERO),
            |(nverts, total), h| {
                let (a, b) = {
                    let pc = points[self.tail_vertex(h).index() as usize];
                    let pn = points[self.head_vertex(h).index() as usize];
                    (pc - pn, pc + pn)
                };
                (
                    nverts + 1,
                    total + DVec3::new(a.y * b.z, a.z * b.x, a.x * b.y),
                )
            },
        );
        if nverts < 3 {
            // Guard against degenerate cases.
            return DVec3::ZERO;
        }
        normal.normalize_or_zero()
    }

    pub fn calc_face_centroid(&self, f: FH) -> DVec3 {
        let points = self.points();
        let (denom, total) = iterator::fv_ccw_iter(self.topology(), f).fold(
            (0.0f64, DVec3::ZERO),
            |(denom, total), v: VH| (denom + 1.0, total + points[v.index() as usize]),
        );
        total / denom
    }

    /// Signed volume enclosed by the mesh. Positive when the faces are
    /// oriented outwards.
    pub fn calc_volume(&self) -> f64 {
        let points = self.points();
        self.faces()
            .map(|f| {
                let mut verts =
                    iterator::fv_ccw_iter(self.topology(), f).map(|v| points[v.index() as usize]);
                let Some(first) = verts.next() else {
                    return 0.0;
                };
                let Some(mut prev) = verts.next() else {
                    return 0.0;
                };
                verts.fold(0.0, |total, p| {
                    let vol = first.dot(prev.cross(p)) / 6.0;
                    prev = p;
                    total + vol
                })
            })
            .sum()
    }
}

#[cfg(test)]
mod test {
    use glam::DVec3;

    use crate::{element::FH, mesh::Mesh};

    #[test]
    fn t_box_normals() {
        let qbox = Mesh::hexahedron(3.0f64.sqrt()).expect("Cannot create a box");
        for f in qbox.faces() {
            let n = qbox.calc_face_normal(f);
            let c = qbox.calc_face_centroid(f);
            assert!((n.length() - 1.0).abs() < 1e-12);
            // Unit box centered at the origin, so the centroid is the normal.
            assert!((n - c).length() < 1e-12, "{n} vs {c}");
        }
    }

    #[test]
    fn t_tetrahedron_centroid() {
        let tet = Mesh::tetrahedron(1.0).expect("Cannot create a tetrahedron");
        let f: FH = 3.into();
        let c = tet.calc_face_centroid(f);
        assert!((c - DVec3::new(0.0, 0.0, -1.0 / 3.0)).length() < 1e-12);
        assert!(tet.calc_face_normal(f).dot(DVec3::Z) < -0.999);
    }

    #[test]
    fn t_volumes() {
        let hex = Mesh::hexahedron(3.0f64.sqrt()).expect("Cannot create a box");
        assert!((hex.calc_volume() - 8.0).abs() < 1e-9);
        let oct = Mesh::octahedron(1.0).expect("Cannot create an octahedron");
        assert!((oct.calc_volume() - 4.0 / 3.0).abs() < 1e-9);
        let tet = Mesh::tetrahedron(1.0).expect("Cannot create a tetrahedron");
        assert!((tet.calc_volume() - 8.0 / (9.0 * 3.0f64.sqrt())).abs() < 1e-9);
    }
}
