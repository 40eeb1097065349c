use glam::{DVec3, dvec3};

use crate::{element::VH, error::Error, mesh::Mesh};

fn tri_faces(indices: &[[u32; 3]]) -> Vec<[VH; 3]> {
    indices.iter().map(|t| t.map(VH::from)).collect()
}

/// Platonic solids. All of them are centered at the origin, their vertices
/// lie on the sphere of the given radius, and their faces are oriented
/// counter-clockwise when seen from outside.
impl Mesh {
    /// Create a tetrahedron with vertex 0 at the north pole and face 3
    /// opposite to it, parallel to the xy-plane.
    pub fn tetrahedron(radius: f64) -> Result<Self, Error> {
        let a = radius / 3.0;
        let b = radius * (8.0 / 9.0f64).sqrt();
        let c = radius * (2.0 / 9.0f64).sqrt();
        let d = radius * (2.0 / 3.0f64).sqrt();
        Self::from_polygons(
            vec![
                dvec3(0.0, 0.0, radius),
                dvec3(-c, d, -a),
                dvec3(-c, -d, -a),
                dvec3(b, 0.0, -a),
            ],
            &tri_faces(&[[0, 1, 2], [0, 2, 3], [0, 3, 1], [3, 2, 1]]),
        )
    }

    /// Create a hexahedron, i.e. a cube with quadrilateral faces.
    pub fn hexahedron(radius: f64) -> Result<Self, Error> {
        let a = radius / 3.0f64.sqrt();
        let quads: Vec<[VH; 4]> = [
            [3u32, 2, 1, 0],
            [2, 6, 5, 1],
            [5, 6, 7, 4],
            [0, 4, 7, 3],
            [3, 7, 6, 2],
            [1, 5, 4, 0],
        ]
        .iter()
        .map(|q| q.map(VH::from))
        .collect();
        Self::from_polygons(
            vec![
                dvec3(-a, -a, -a),
                dvec3(a, -a, -a),
                dvec3(a, a, -a),
                dvec3(-a, a, -a),
                dvec3(-a, -a, a),
                dvec3(a, -a, a),
                dvec3(a, a, a),
                dvec3(-a, a, a),
            ],
            &quads,
        )
    }

    /// Create an octahedron with vertices 4 and 5 at the poles.
    pub fn octahedron(radius: f64) -> Result<Self, Error> {
        Self::from_polygons(
            vec![
                dvec3(radius, 0.0, 0.0),
                dvec3(0.0, radius, 0.0),
                dvec3(-radius, 0.0, 0.0),
                dvec3(0.0, -radius, 0.0),
                dvec3(0.0, 0.0, radius),
                dvec3(0.0, 0.0, -radius),
            ],
            &tri_faces(&[
                [0, 4, 3],
                [1, 4, 0],
                [2, 4, 1],
                [3, 4, 2],
                [3, 5, 0],
                [0, 5, 1],
                [1, 5, 2],
                [2, 5, 3],
            ]),
        )
    }

    pub fn icosahedron(radius: f64) -> Result<Self, Error> {
        const S: f64 = 0.5257311121191336;
        const L: f64 = 0.8506508083520399;
        let points: Vec<DVec3> = [
            [0.0, S, -L],
            [S, L, 0.0],
            [-S, L, 0.0],
            [0.0, S, L],
            [0.0, -S, L],
            [-L, 0.0, S],
            [0.0, -S, -L],
            [L, 0.0, -S],
            [L, 0.0, S],
            [-L, 0.0, -S],
            [S, -L, 0.0],
            [-S, -L, 0.0],
        ]
        .iter()
        .map(|p| DVec3::from_array(*p) * radius)
        .collect();
        Self::from_polygons(
            points,
            &tri_faces(&[
                [2, 1, 0],
                [1, 2, 3],
                [5, 4, 3],
                [4, 8, 3],
                [7, 6, 0],
                [6, 9, 0],
                [11, 10, 4],
                [10, 11, 6],
                [9, 5, 2],
                [5, 9, 11],
                [8, 7, 1],
                [7, 8, 10],
                [2, 5, 3],
                [8, 1, 3],
                [9, 2, 0],
                [1, 7, 0],
                [11, 9, 6],
                [7, 10, 6],
                [5, 11, 4],
                [10, 8, 4],
            ]),
        )
    }
}

#[cfg(test)]
mod test {
    use crate::mesh::Mesh;

    fn assert_outward(mesh: &Mesh) {
        for f in mesh.faces() {
            let n = mesh.calc_face_normal(f);
            let c = mesh.calc_face_centroid(f);
            assert!(n.dot(c) > 0.0, "Face {f} is not oriented outwards");
        }
    }

    #[test]
    fn t_tetrahedron() {
        let tet = Mesh::tetrahedron(1.0).expect("Cannot create a tetrahedron");
        assert_eq!(4, tet.num_vertices());
        assert_eq!(12, tet.num_halfedges());
        assert_eq!(6, tet.num_edges());
        assert_eq!(4, tet.num_faces());
        for p in tet.points() {
            assert!((p.length() - 1.0).abs() < 1e-12);
        }
        tet.check_topology().expect("Invalid topology");
        assert_outward(&tet);
    }

    #[test]
    fn t_hexahedron() {
        let hex = Mesh::hexahedron(1.0).expect("Cannot create hexahedron");
        assert_eq!(hex.num_vertices(), 8);
        assert_eq!(hex.num_halfedges(), 24);
        assert_eq!(hex.num_edges(), 12);
        assert_eq!(hex.num_faces(), 6);
        hex.check_topology().expect("Invalid topology");
        assert_outward(&hex);
    }

    #[test]
    fn t_octahedron() {
        let oct = Mesh::octahedron(1.0).expect("Cannot create octahedron");
        assert_eq!(oct.num_vertices(), 6);
        assert_eq!(oct.num_halfedges(), 24);
        assert_eq!(oct.num_edges(), 12);
        assert_eq!(oct.num_faces(), 8);
        oct.check_topology().expect("Invalid topology");
        assert_outward(&oct);
    }

    #[test]
    fn t_icosahedron() {
        let ico = Mesh::icosahedron(2.0).expect("Cannot create icosahedron");
        assert_eq!(12, ico.num_vertices());
        assert_eq!(60, ico.num_halfedges());
        assert_eq!(30, ico.num_edges());
        assert_eq!(20, ico.num_faces());
        for v in ico.vertices() {
            assert_eq!(ico.vertex_valence(v), 5);
        }
        ico.check_topology().expect("Invalid topology");
        assert_outward(&ico);
    }
}
