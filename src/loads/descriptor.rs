//! Generated load descriptors
//!
//! These are the write-only products handed to the emission layer: plain
//! data, serializable, with no references back into the mesh.

use nalgebra::Vector3;
use serde::{Deserialize, Serialize};

use crate::edge::RepartitionMode;
use crate::mesh::{EdgeId, ElementId, FaceId, NodeId};

/// A constant-intensity distributed load over part of a line element.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoadSegment {
    /// Element the segment acts on.
    pub element: ElementId,
    /// Segment start in the edge's [0, 1] parameter domain.
    pub start: f64,
    /// Segment end in the edge's [0, 1] parameter domain.
    pub end: f64,
    /// Force per unit length over the segment.
    pub intensity: Vector3<f64>,
}

/// A lumped force on a single analysis node.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NodalForce {
    /// Node the force acts on.
    pub node: NodeId,
    /// Force vector.
    pub force: Vector3<f64>,
}

/// Payload of one edge's load descriptor.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum EdgeLoadKind {
    /// Distributed segments on the edge's line elements.
    Distributed(Vec<LoadSegment>),
    /// Lumped nodal forces.
    Nodal(Vec<NodalForce>),
}

/// The load carried by one supporting edge of a face.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EdgeLoad {
    /// Edge carrying the load.
    pub edge: EdgeId,
    /// How the load is realized downstream.
    pub mode: RepartitionMode,
    /// The load values.
    pub kind: EdgeLoadKind,
}

impl EdgeLoad {
    /// Resultant force of this descriptor. Distributed segments need the
    /// physical edge length to convert parameter spans to lengths.
    pub fn total_force(&self, edge_length: f64) -> Vector3<f64> {
        match &self.kind {
            EdgeLoadKind::Distributed(segments) => segments
                .iter()
                .map(|s| s.intensity * ((s.end - s.start) * edge_length))
                .sum(),
            EdgeLoadKind::Nodal(forces) => forces.iter().map(|f| f.force).sum(),
        }
    }
}

/// All edge loads generated for one face.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FaceLoads {
    /// The loaded face.
    pub face: FaceId,
    /// One descriptor per loaded supporting edge.
    pub edge_loads: Vec<EdgeLoad>,
}
