/*!
A halfedge based polygon mesh, and the horizon tracing step of an incremental
3D convex hull built on top of it.

# Overview

+ A halfedge datastructure is used to represent the topology of a closed mesh,
  i.e. the connectivity of vertices, edges and faces. The two halfedges of an
  edge are stored next to each other, so the twin of a halfedge is found
  without looking anything up.

+ [`Mesh`] pairs the topology with `f64` vertex positions, using
  [`glam`](https://crates.io/crates/glam) for the geometry. Meshes can be
  created from polygons, as one of the platonic solids, or loaded from OBJ
  files when the `obj` feature is enabled (it is by default).

+ When a point outside the hull is inserted, the faces it can see have to be
  replaced with a cone of new faces connecting the point to the horizon, the
  loop of edges separating visible faces from the rest.
  [`trace_horizon`] finds that loop, given the set of visible faces as any
  [`ConflictSet`]. [`ConflictGraph`] tracks the visible faces of many points
  at once.

```
use hullkit::{FH, FaceSet, Mesh, PH};

let tet = Mesh::tetrahedron(1.0).unwrap();
let conflicts: FaceSet = [0u32, 1].iter().map(FH::from).collect();
let horizon = tet.trace_horizon(PH::from(0), &conflicts).unwrap();
assert_eq!(horizon.len(), 4);
```

Failures are reported through [`Error`]. The horizon tracer distinguishes
conflict regions that have no single boundary loop
([`Error::DegenerateConflictRegion`]) from meshes whose links are broken
([`Error::InconsistentMeshState`]). Progress is logged with
[`tracing`](https://crates.io/crates/tracing) at debug and trace levels.
*/

mod check;
mod conflict;
mod element;
mod error;
mod horizon;
mod iterator;
mod math;
mod mesh;
#[cfg(feature = "obj")]
mod obj;
mod primitive;
mod topol;

pub use conflict::{ConflictGraph, ConflictIndex, ConflictSet, FaceSet, PointConflicts};
pub use element::{EH, FH, HH, Handle, HasTopology, PH, VH};
pub use error::{Error, MeshDefect, RegionDefect};
pub use horizon::{Horizon, trace_horizon, trace_point_horizon};
pub use mesh::Mesh;
pub use topol::Topology;
