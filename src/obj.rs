use std::{io::BufRead, path::Path};

use glam::DVec3;

use crate::{element::VH, error::Error, mesh::Mesh};

fn load_options() -> tobj::LoadOptions {
    tobj::LoadOptions {
        ignore_points: true,
        ignore_lines: true,
        ..Default::default()
    }
}

impl Mesh {
    /// Load a closed polygon mesh from an OBJ file. All models in the file are
    /// merged into one mesh, which must be watertight.
    pub fn load_obj(path: &Path) -> Result<Self, Error> {
        let (models, _) = tobj::load_obj(path, &load_options())
            .map_err(|e| Error::ObjLoadFailed(format!("{}", e)))?;
        Self::from_obj_models(models)
    }

    /// Same as [`Self::load_obj`], reading OBJ data from `reader`. Material
    /// libraries are ignored.
    pub fn load_obj_buf<R: BufRead>(reader: &mut R) -> Result<Self, Error> {
        let (models, _) =
            tobj::load_obj_buf(reader, &load_options(), |_| Ok(Default::default()))
                .map_err(|e| Error::ObjLoadFailed(format!("{}", e)))?;
        Self::from_obj_models(models)
    }

    fn from_obj_models(models: Vec<tobj::Model>) -> Result<Self, Error> {
        let mut points: Vec<DVec3> = Vec::new();
        let mut polygons: Vec<Vec<VH>> = Vec::new();
        for model in models {
            let mesh = model.mesh;
            if mesh.positions.len() % 3 != 0 {
                return Err(Error::IncorrectNumberOfCoordinates(mesh.positions.len()));
            }
            let voffset = points.len() as u32;
            points.extend(
                mesh.positions
                    .chunks(3)
                    .map(|triplet| DVec3::new(triplet[0], triplet[1], triplet[2])),
            );
            let to_verts = |indices: &[u32]| -> Vec<VH> {
                indices.iter().map(|i| VH::from(i + voffset)).collect()
            };
            if mesh.face_arities.is_empty() {
                // Every face is a triangle.
                polygons.extend(mesh.indices.chunks(3).map(to_verts));
            } else {
                let mut start = 0usize;
                for size in mesh.face_arities {
                    let size = size as usize;
                    polygons.push(to_verts(&mesh.indices[start..(start + size)]));
                    start += size;
                }
            }
        }
        tracing::debug!(
            vertices = points.len(),
            faces = polygons.len(),
            "loaded obj"
        );
        Self::from_polygons(points, &polygons)
    }
}

#[cfg(test)]
mod test {
    use std::io::BufReader;

    use crate::{error::Error, mesh::Mesh};

    const TETRAHEDRON: &str = "\
v 0 0 1
v -0.4714045 0.8164966 -0.3333333
v -0.4714045 -0.8164966 -0.3333333
v 0.9428090 0 -0.3333333
f 1 2 3
f 1 3 4
f 1 4 2
f 4 3 2
";

    const OPEN_BOX: &str = "\
v 0 0 0
v 1 0 0
v 1 1 0
v 0 1 0
v 0 0 1
v 1 0 1
v 1 1 1
v 0 1 1
f 1 4 3 2
f 1 2 6 5
f 2 3 7 6
f 3 4 8 7
f 4 1 5 8
";

    const BOX: &str = "\
v 0 0 0
v 1 0 0
v 1 1 0
v 0 1 0
v 0 0 1
v 1 0 1
v 1 1 1
v 0 1 1
f 1 4 3 2
f 1 2 6 5
f 2 3 7 6
f 3 4 8 7
f 4 1 5 8
f 5 6 7 8
";

    #[test]
    fn t_load_triangles() {
        let mesh = Mesh::load_obj_buf(&mut BufReader::new(TETRAHEDRON.as_bytes()))
            .expect("Cannot load obj");
        assert_eq!(mesh.num_vertices(), 4);
        assert_eq!(mesh.num_faces(), 4);
        assert_eq!(mesh.num_edges(), 6);
        mesh.check_topology().expect("Invalid topology");
        assert!(mesh.calc_volume() > 0.0);
    }

    #[test]
    fn t_load_quads() {
        let mesh =
            Mesh::load_obj_buf(&mut BufReader::new(BOX.as_bytes())).expect("Cannot load obj");
        assert_eq!(mesh.num_vertices(), 8);
        assert_eq!(mesh.num_faces(), 6);
        for f in mesh.faces() {
            assert_eq!(mesh.face_valence(f), 4);
        }
        assert!((mesh.calc_volume() - 1.0).abs() < 1e-12);
    }

    #[test]
    fn t_load_open_mesh() {
        assert!(matches!(
            Mesh::load_obj_buf(&mut BufReader::new(OPEN_BOX.as_bytes())),
            Err(Error::OpenHalfedge(_))
        ));
    }
}
