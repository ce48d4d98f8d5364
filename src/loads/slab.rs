//! Slab span descriptors

use serde::{Deserialize, Serialize};

use crate::mesh::FaceId;

/// Load-bearing behavior of a slab face.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SpanType {
    /// Load travels along the span direction to the edges it points at.
    OneWay,
    /// Load spreads to all supporting edges.
    TwoWay,
}

/// A floor-slab face queued for load generation.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SlabFace {
    /// Mesh face the slab occupies.
    pub face: FaceId,
    /// One-way or two-way load distribution.
    pub span: SpanType,
    /// Span direction angle in degrees, measured in the face plane. Stored
    /// as twice the rotation that is applied to the face's local x-axis.
    pub direction: f64,
}

impl SlabFace {
    /// Create a slab face spanning along the face's local x-axis.
    pub fn new(face: FaceId, span: SpanType) -> Self {
        Self {
            face,
            span,
            direction: 0.0,
        }
    }

    /// Set the span direction angle in degrees.
    pub fn with_direction(mut self, degrees: f64) -> Self {
        self.direction = degrees;
        self
    }
}
