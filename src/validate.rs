//! Face classification and validation

use crate::error::{LoadGenResult, SkipReason};
use crate::mesh::{FaceId, MeshQuery};

/// Check that a face is eligible for tributary load generation.
///
/// Checks run in order and short-circuit on the first failure. A failure is
/// recoverable: it surfaces as [`crate::error::LoadGenError::Skip`] so the
/// per-face loop can log the reason and continue with the next face.
pub fn validate_face(mesh: &impl MeshQuery, face: FaceId) -> LoadGenResult<()> {
    if !mesh.face_is_planar(face)? {
        return Err(SkipReason::NotPlanar.into());
    }
    // an independently modelled face gets its own face-level load instead
    if mesh.face_has_property(face)? {
        return Err(SkipReason::AlreadyModelled.into());
    }
    if mesh.face_vertices(face)?.len() > 4 {
        return Err(SkipReason::TooManyVertices.into());
    }
    for edge in mesh.face_edges(face)? {
        if !mesh.edge_is_straight(edge)? || mesh.edge_node_count(edge)? != 2 {
            return Err(SkipReason::CurvedOrMultiNodeEdge.into());
        }
    }
    Ok(())
}
