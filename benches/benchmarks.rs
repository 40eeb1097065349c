use criterion::{BenchmarkId, Criterion, criterion_group, criterion_main};
use glam::DVec3;
use hullkit::{ConflictGraph, FaceSet, Mesh, PH};
use std::{collections::HashSet, hint::black_box};

// Faces of the mesh visible from the eye point.
fn visible_faces(mesh: &Mesh, eye: DVec3) -> Vec<hullkit::FH> {
    mesh.faces()
        .filter(|f| {
            mesh.calc_face_normal(*f)
                .dot(eye - mesh.calc_face_centroid(*f))
                > 0.0
        })
        .collect()
}

// Deterministic set of eye points spread around the unit sphere.
fn eye_points(count: usize, distance: f64) -> Vec<DVec3> {
    let golden = std::f64::consts::PI * (3.0 - 5.0f64.sqrt());
    (0..count)
        .map(|i| {
            let y = 1.0 - 2.0 * (i as f64 + 0.5) / count as f64;
            let r = (1.0 - y * y).sqrt();
            let theta = golden * i as f64;
            DVec3::new(r * theta.cos(), y, r * theta.sin()) * distance
        })
        .collect()
}

// Primitive Creation Benchmarks
fn bench_primitive_creation(c: &mut Criterion) {
    let mut group = c.benchmark_group("primitive_creation");

    group.bench_function("icosahedron", |b| {
        b.iter(|| {
            let mesh = Mesh::icosahedron(black_box(1.0)).unwrap();
            black_box(mesh);
        });
    });

    group.bench_function("check_topology", |b| {
        let mesh = Mesh::icosahedron(1.0).unwrap();
        b.iter(|| black_box(&mesh).check_topology().unwrap());
    });

    group.finish();
}

// Horizon Tracing Benchmarks
fn bench_horizon(c: &mut Criterion) {
    let mut group = c.benchmark_group("horizon");
    let mesh = Mesh::icosahedron(1.0).unwrap();

    // Close points see few faces, far points see almost half the hull.
    for distance in [1.2, 3.0, 50.0] {
        let conflicts: Vec<FaceSet> = eye_points(64, distance)
            .into_iter()
            .map(|eye| visible_faces(&mesh, eye).into_iter().collect())
            .collect();
        group.bench_with_input(
            BenchmarkId::new("face_set", distance),
            &conflicts,
            |b, conflicts| {
                b.iter(|| {
                    for set in conflicts {
                        black_box(mesh.trace_horizon(PH::from(0), set).unwrap());
                    }
                });
            },
        );
        let hashed: Vec<HashSet<hullkit::FH>> = conflicts
            .iter()
            .map(|set| set.iter().collect())
            .collect();
        group.bench_with_input(
            BenchmarkId::new("hash_set", distance),
            &hashed,
            |b, conflicts| {
                b.iter(|| {
                    for set in conflicts {
                        black_box(mesh.trace_horizon(PH::from(0), set).unwrap());
                    }
                });
            },
        );
    }

    group.bench_function("conflict_graph", |b| {
        let eyes = eye_points(256, 3.0);
        let mut graph = ConflictGraph::new(eyes.len(), mesh.num_faces());
        for (i, eye) in eyes.iter().enumerate() {
            for f in visible_faces(&mesh, *eye) {
                graph.add_conflict(PH::from(i as u32), f);
            }
        }
        b.iter(|| {
            for i in 0..eyes.len() {
                black_box(hullkit::trace_point_horizon(&mesh, &graph, PH::from(i as u32)).unwrap());
            }
        });
    });

    group.finish();
}

criterion_group!(benches, bench_primitive_creation, bench_horizon);
criterion_main!(benches);
