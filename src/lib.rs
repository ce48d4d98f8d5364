//! Slab Loads - tributary-area load distribution for floor slabs
//!
//! Given a planar slab face bounded by straight edges and a pressure applied
//! to it, this library computes how much of that pressure each bounding edge
//! must carry as a function of position along the edge, and produces
//! distributed or nodal load descriptors ready for a finite-element model:
//! - one-way and two-way span behavior, closed-form on aligned rectangles
//! - a general sweep algorithm for arbitrary one-way quadrilaterals
//! - per-edge repartition as element, nodal-edge or vertex loads
//! - skip-and-continue batch processing over many faces
//!
//! ## Example
//! ```rust
//! use slab_loads::prelude::*;
//! use nalgebra::Point3;
//!
//! let mut mesh = Mesh::new();
//!
//! // A 4 x 2 slab in the XY plane
//! let corners = [
//!     Point3::new(0.0, 0.0, 0.0),
//!     Point3::new(4.0, 0.0, 0.0),
//!     Point3::new(4.0, 2.0, 0.0),
//!     Point3::new(0.0, 2.0, 0.0),
//! ];
//! for (k, p) in corners.iter().enumerate() {
//!     mesh.add_vertex(VertexId(k as u32), *p).unwrap();
//!     mesh.add_node(NodeId(k as u32), *p).unwrap();
//!     mesh.map_vertex_node(VertexId(k as u32), NodeId(k as u32)).unwrap();
//! }
//! for k in 0u32..4 {
//!     mesh.add_edge(EdgeId(k), VertexId(k), VertexId((k + 1) % 4)).unwrap();
//! }
//! mesh.add_face(
//!     FaceId(0),
//!     &[VertexId(0), VertexId(1), VertexId(2), VertexId(3)],
//!     &[EdgeId(0), EdgeId(1), EdgeId(2), EdgeId(3)],
//! ).unwrap();
//!
//! // 5 kPa gravity load, spanning one-way along the long axis
//! let generator = SurfaceLoadGenerator::new(&mesh);
//! let slabs = [SlabFace::new(FaceId(0), SpanType::OneWay)];
//! let report = generator
//!     .generate(
//!         &slabs,
//!         &PressureField::downward(5.0),
//!         LoadOrientation::Global { projected: false },
//!     )
//!     .unwrap();
//!
//! assert_eq!(report.loaded_count(), 1);
//! ```

pub mod builder;
pub mod edge;
pub mod error;
pub mod evaluate;
pub mod generator;
pub mod geometry;
pub mod loads;
pub mod mesh;
pub mod tributary;
pub mod validate;

// Re-export common types
pub mod prelude {
    pub use crate::builder::build_support_edges;
    pub use crate::edge::{RepartitionMode, SupportEdge};
    pub use crate::error::{GeometryError, LoadGenError, LoadGenResult, MeshError, SkipReason};
    pub use crate::generator::{GenerationReport, SurfaceLoadGenerator};
    pub use crate::loads::{
        EdgeLoad, EdgeLoadKind, FaceLoads, LoadOrientation, LoadSegment, NodalForce,
        PressureField, SlabFace, SpanType,
    };
    pub use crate::mesh::{
        EdgeId, ElementId, FaceId, LocalAxes, Mesh, MeshQuery, NodeId, VertexId,
    };
}
