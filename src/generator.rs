//! Batch surface-load generation
//!
//! [`SurfaceLoadGenerator`] drives the per-face pipeline: validate, build
//! the support edges, solve the tributary widths, evaluate the loads. Faces
//! are processed strictly sequentially and each face's failure is isolated:
//! a skipped or failed face is logged and recorded, the batch continues.
//! Only a mesh collaborator failure aborts the whole run.

use std::collections::HashSet;

use crate::builder::build_support_edges;
use crate::error::{LoadGenError, LoadGenResult, SkipReason};
use crate::evaluate::evaluate_partition;
use crate::loads::{FaceLoads, LoadOrientation, PressureField, SlabFace};
use crate::mesh::{EdgeId, ElementId, FaceId, MeshQuery};
use crate::tributary::solve;
use crate::validate::validate_face;

/// The result of one generation run.
#[derive(Debug, Default)]
pub struct GenerationReport {
    /// Loads for every face that went through the full pipeline.
    pub face_loads: Vec<FaceLoads>,
    /// Faces rejected by validation.
    pub skipped: Vec<(FaceId, SkipReason)>,
    /// Faces that failed with a face-local error.
    pub failed: Vec<(FaceId, LoadGenError)>,
}

impl GenerationReport {
    /// Number of faces that produced loads.
    pub fn loaded_count(&self) -> usize {
        self.face_loads.len()
    }

    /// Number of faces that produced nothing.
    pub fn rejected_count(&self) -> usize {
        self.skipped.len() + self.failed.len()
    }
}

/// Tributary-load generator over a mesh.
///
/// Holds the mesh reference and the set of edges the user excluded from
/// carrying load; each [`generate`](Self::generate) call runs one batch of
/// slab faces against it.
pub struct SurfaceLoadGenerator<'a, M: MeshQuery> {
    mesh: &'a M,
    unsupporting: HashSet<EdgeId>,
}

impl<'a, M: MeshQuery> SurfaceLoadGenerator<'a, M> {
    /// Create a generator over a mesh with every edge support-capable.
    pub fn new(mesh: &'a M) -> Self {
        Self {
            mesh,
            unsupporting: HashSet::new(),
        }
    }

    /// Exclude edges from carrying load.
    pub fn without_support(mut self, edges: impl IntoIterator<Item = EdgeId>) -> Self {
        self.unsupporting.extend(edges);
        self
    }

    /// Generate loads for a batch of slab faces.
    pub fn generate(
        &self,
        slabs: &[SlabFace],
        pressure: &PressureField,
        orientation: LoadOrientation,
    ) -> LoadGenResult<GenerationReport> {
        self.generate_partition(slabs, pressure, orientation, |_| true)
    }

    /// Generate loads restricted to elements for which `filter` returns
    /// true.
    ///
    /// This is the seam for partitioned meshes: the tributary solve is
    /// identical per partition, only the element-carried output is filtered.
    pub fn generate_partition(
        &self,
        slabs: &[SlabFace],
        pressure: &PressureField,
        orientation: LoadOrientation,
        filter: impl Fn(ElementId) -> bool,
    ) -> LoadGenResult<GenerationReport> {
        let mut report = GenerationReport::default();
        for slab in slabs {
            match self.process_face(slab, pressure, orientation, &filter) {
                Ok(loads) => report.face_loads.push(loads),
                Err(LoadGenError::Skip(reason)) => {
                    log::warn!("face {} skipped: {reason}", slab.face);
                    report.skipped.push((slab.face, reason));
                }
                Err(err) if err.is_face_local() => {
                    log::error!("face {} failed: {err}", slab.face);
                    report.failed.push((slab.face, err));
                }
                Err(err) => return Err(err),
            }
        }
        Ok(report)
    }

    /// Run the full pipeline for one slab face.
    pub fn process_face(
        &self,
        slab: &SlabFace,
        pressure: &PressureField,
        orientation: LoadOrientation,
        filter: impl Fn(ElementId) -> bool,
    ) -> LoadGenResult<FaceLoads> {
        validate_face(self.mesh, slab.face)?;
        let (mut edges, _index) = build_support_edges(self.mesh, slab.face, &self.unsupporting)?;
        solve(self.mesh, slab, &mut edges)?;
        let edge_loads =
            evaluate_partition(self.mesh, slab.face, &edges, pressure, orientation, filter)?;
        Ok(FaceLoads {
            face: slab.face,
            edge_loads,
        })
    }
}
