//! Error types for the surface-load generator

use thiserror::Error;

use crate::mesh::{EdgeId, ElementId, FaceId, NodeId, VertexId};

/// Why a face was rejected by validation and skipped.
///
/// A skip is recoverable at face granularity: the batch driver logs it and
/// moves on to the next face.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum SkipReason {
    #[error("face is not planar")]
    NotPlanar,

    #[error("face is already independently modelled; apply a face load instead")]
    AlreadyModelled,

    #[error("face has more than 4 vertices")]
    TooManyVertices,

    #[error("face has a curved or multi-node boundary edge")]
    CurvedOrMultiNodeEdge,
}

/// Geometric queries that could not be answered - a corrupted-input condition
/// rather than a modeling mistake.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum GeometryError {
    #[error("cannot determine local axes of edge {0}: endpoints coincide")]
    DegenerateEdge(EdgeId),

    #[error("cannot determine local axes of face {0}: boundary is degenerate")]
    DegenerateFace(FaceId),

    #[error("zero-length direction vector")]
    ZeroVector,
}

/// Failures raised by the mesh collaborator itself.
///
/// These indicate a structural problem outside this crate and are re-raised
/// unchanged, aborting the whole batch.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum MeshError {
    #[error("vertex {0} not found in mesh")]
    VertexNotFound(VertexId),

    #[error("node {0} not found in mesh")]
    NodeNotFound(NodeId),

    #[error("edge {0} not found in mesh")]
    EdgeNotFound(EdgeId),

    #[error("face {0} not found in mesh")]
    FaceNotFound(FaceId),

    #[error("element {0} not found in mesh")]
    ElementNotFound(ElementId),

    #[error("vertex {0} has no associated mesh node")]
    UnmappedVertex(VertexId),

    #[error("node {0} does not lie on edge {1}")]
    NodeNotOnEdge(NodeId, EdgeId),

    #[error("face {0} boundary has {1} edges for {2} vertices")]
    BoundaryMismatch(FaceId, usize, usize),

    #[error("duplicate id '{0}' already exists")]
    DuplicateId(String),
}

/// Main error type for load-generation operations
#[derive(Error, Debug)]
pub enum LoadGenError {
    /// Face rejected by validation; recoverable, the face is skipped.
    #[error("face skipped: {0}")]
    Skip(#[from] SkipReason),

    /// Corrupted geometry; fatal for the current face only.
    #[error(transparent)]
    Geometry(#[from] GeometryError),

    /// Geometry that contradicts its own classification.
    #[error("invalid geometry: {0}")]
    InvalidGeometry(String),

    /// Valid geometry in a combination the user must remodel.
    #[error("unsupported configuration: {0}")]
    UnsupportedConfiguration(String),

    /// Valid geometry in a combination this engine deliberately does not
    /// handle.
    #[error("unimplemented configuration: {0}")]
    UnimplementedConfiguration(String),

    /// Mesh collaborator failure; aborts the batch.
    #[error(transparent)]
    Mesh(#[from] MeshError),
}

impl LoadGenError {
    /// Whether the error is confined to the face being processed.
    ///
    /// Face-local errors are reported and the batch continues; anything else
    /// (a mesh failure) is re-raised to the caller.
    pub fn is_face_local(&self) -> bool {
        !matches!(self, Self::Mesh(_))
    }
}

/// Result type for load-generation operations
pub type LoadGenResult<T> = Result<T, LoadGenError>;
