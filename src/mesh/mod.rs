//! Mesh collaborator interface
//!
//! The load generator never reaches into ambient state: every entry point
//! takes the mesh as an explicit [`MeshQuery`] parameter. [`Mesh`] is the
//! in-memory reference implementation; any host application can implement
//! the trait over its own mesh database instead.

mod model;

pub use model::Mesh;

use std::fmt;

use nalgebra::{Point3, Vector3};
use serde::{Deserialize, Serialize};

use crate::error::LoadGenResult;

/// Identifier of a geometric vertex.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct VertexId(pub u32);

/// Identifier of a finite-element node.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct NodeId(pub u32);

/// Identifier of a boundary edge.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct EdgeId(pub u32);

/// Identifier of a face (floor slab).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct FaceId(pub u32);

/// Identifier of a line element meshed along an edge.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ElementId(pub u32);

impl fmt::Display for VertexId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl fmt::Display for EdgeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl fmt::Display for FaceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl fmt::Display for ElementId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Right-handed local coordinate frame of a face or edge.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LocalAxes {
    /// Local x direction (unit).
    pub x: Vector3<f64>,
    /// Local y direction (unit).
    pub y: Vector3<f64>,
    /// Local z direction (unit); the outward normal for faces.
    pub z: Vector3<f64>,
}

/// One integration point of a line element, in the natural coordinate
/// `xi` of `[-1, 1]`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GaussPoint {
    /// Natural coordinate of the point.
    pub xi: f64,
    /// Quadrature weight.
    pub weight: f64,
}

/// Shape functions and Jacobian of a line element evaluated at a natural
/// coordinate.
#[derive(Debug, Clone, PartialEq)]
pub struct ShapeSample {
    /// One shape-function value per element node, in node order.
    pub values: Vec<f64>,
    /// Determinant of the element Jacobian at the evaluation point.
    pub jacobian: f64,
}

/// Read-only queries the load generator makes against the host mesh.
///
/// Entity handles passed in are expected to originate from the same mesh;
/// lookups that fail surface as [`crate::error::MeshError`] and abort the
/// batch, since they indicate corruption outside this crate.
pub trait MeshQuery {
    // Vertices and nodes

    /// World position of a geometric vertex.
    fn vertex_position(&self, vertex: VertexId) -> LoadGenResult<Point3<f64>>;

    /// The finite-element node coincident with a vertex.
    fn vertex_node(&self, vertex: VertexId) -> LoadGenResult<NodeId>;

    /// World position of a finite-element node.
    fn node_position(&self, node: NodeId) -> LoadGenResult<Point3<f64>>;

    /// Geometric parameter of a node along one of its parent edges,
    /// normalized to `[0, 1]` in the edge's own vertex order.
    fn node_edge_parameter(&self, node: NodeId, edge: EdgeId) -> LoadGenResult<f64>;

    // Faces

    /// Ordered vertices of the face boundary.
    fn face_vertices(&self, face: FaceId) -> LoadGenResult<Vec<VertexId>>;

    /// Ordered boundary edges of the face.
    fn face_edges(&self, face: FaceId) -> LoadGenResult<Vec<EdgeId>>;

    /// Whether all face vertices lie in one plane.
    fn face_is_planar(&self, face: FaceId) -> LoadGenResult<bool>;

    /// Whether the face carries its own physical property (it is
    /// independently modelled rather than a bare load surface).
    fn face_has_property(&self, face: FaceId) -> LoadGenResult<bool>;

    /// Local frame of the face; local z is the outward normal.
    fn face_local_axes(&self, face: FaceId) -> LoadGenResult<LocalAxes>;

    // Edges

    /// The two endpoint vertices of an edge, in the edge's own order.
    fn edge_vertices(&self, edge: EdgeId) -> LoadGenResult<(VertexId, VertexId)>;

    /// Whether the edge is a straight segment.
    fn edge_is_straight(&self, edge: EdgeId) -> LoadGenResult<bool>;

    /// Number of geometric nodes defining the edge curve (2 for a plain
    /// segment).
    fn edge_node_count(&self, edge: EdgeId) -> LoadGenResult<usize>;

    /// Faces bordered by this edge.
    fn edge_parent_faces(&self, edge: EdgeId) -> LoadGenResult<Vec<FaceId>>;

    /// Whether the edge carries its own physical property (e.g. a beam
    /// modelled along it).
    fn edge_has_property(&self, edge: EdgeId) -> LoadGenResult<bool>;

    /// Local frame of the edge; local x runs along the edge.
    fn edge_local_axes(&self, edge: EdgeId) -> LoadGenResult<LocalAxes>;

    /// Line elements meshed along the edge, in edge order.
    fn edge_elements(&self, edge: EdgeId) -> LoadGenResult<Vec<ElementId>>;

    // Elements

    /// Ordered nodes of a line element.
    fn element_nodes(&self, element: ElementId) -> LoadGenResult<Vec<NodeId>>;

    /// Integration rule of a line element.
    fn element_integration(&self, element: ElementId) -> LoadGenResult<Vec<GaussPoint>>;

    /// Shape functions and Jacobian at natural coordinate `xi`.
    fn element_shape(&self, element: ElementId, xi: f64) -> LoadGenResult<ShapeSample>;
}
