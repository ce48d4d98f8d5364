//! Load evaluation
//!
//! Samples the populated width profiles together with the pressure field
//! and produces one load descriptor per loaded edge. Width and pressure are
//! multiplied pointwise, never pre-integrated, so spatial variation and
//! tributary variation both stay piecewise-exact up to the discretize
//! tolerance. The mesh is never mutated.

use nalgebra::Vector3;

use crate::edge::{RepartitionMode, SupportEdge};
use crate::error::LoadGenResult;
use crate::loads::{
    EdgeLoad, EdgeLoadKind, LoadOrientation, LoadSegment, NodalForce, PressureField,
};
use crate::mesh::{ElementId, FaceId, MeshQuery};

/// Upper bound on equal subdivisions when discretizing one element's span.
const ELEMENT_MAX_DIVISIONS: usize = 10;

/// Produce the load descriptors for every loaded edge of a face.
pub fn evaluate(
    mesh: &impl MeshQuery,
    face: FaceId,
    edges: &[SupportEdge],
    pressure: &PressureField,
    orientation: LoadOrientation,
) -> LoadGenResult<Vec<EdgeLoad>> {
    evaluate_partition(mesh, face, edges, pressure, orientation, |_| true)
}

/// Partition-aware variant of [`evaluate`].
///
/// Element-carried loads are restricted to elements for which `filter`
/// returns true. `VertexLoad` descriptors carry no element and are emitted
/// unfiltered; multi-partition callers route them by vertex ownership.
pub fn evaluate_partition(
    mesh: &impl MeshQuery,
    face: FaceId,
    edges: &[SupportEdge],
    pressure: &PressureField,
    orientation: LoadOrientation,
    filter: impl Fn(ElementId) -> bool,
) -> LoadGenResult<Vec<EdgeLoad>> {
    let axes = mesh.face_local_axes(face)?;
    let resolve = |raw: Vector3<f64>| match orientation {
        LoadOrientation::Local => axes.x * raw.x + axes.y * raw.y + axes.z * raw.z,
        LoadOrientation::Global { projected: true } => raw * axes.z.z,
        LoadOrientation::Global { projected: false } => raw,
    };

    let mut descriptors = Vec::new();
    for edge in edges {
        if !edge.is_loaded() {
            continue;
        }
        match edge.mode {
            RepartitionMode::ElementLoad => {
                let mut segments = Vec::new();
                for element in mesh.edge_elements(edge.id)? {
                    if !filter(element) {
                        continue;
                    }
                    let nodes = mesh.element_nodes(element)?;
                    let (first, last) = match nodes.as_slice() {
                        [first, .., last] => (*first, *last),
                        _ => continue,
                    };
                    let x1 = edge.to_model_param(mesh.node_edge_parameter(first, edge.id)?);
                    let x2 = edge.to_model_param(mesh.node_edge_parameter(last, edge.id)?);
                    let (points, widths) = edge.discretize(x1, x2, ELEMENT_MAX_DIVISIONS);
                    for k in 0..points.len().saturating_sub(1) {
                        let v1 =
                            resolve(pressure.at(&edge.position_at(points[k]))) * widths[k];
                        let v2 = resolve(pressure.at(&edge.position_at(points[k + 1])))
                            * widths[k + 1];
                        segments.push(LoadSegment {
                            element,
                            start: points[k],
                            end: points[k + 1],
                            intensity: (v1 + v2) / 2.0,
                        });
                    }
                }
                if !segments.is_empty() {
                    descriptors.push(EdgeLoad {
                        edge: edge.id,
                        mode: edge.mode,
                        kind: EdgeLoadKind::Distributed(segments),
                    });
                }
            }
            RepartitionMode::NodalEdgeLoad => {
                let mut forces: Vec<NodalForce> = Vec::new();
                for element in mesh.edge_elements(edge.id)? {
                    if !filter(element) {
                        continue;
                    }
                    let nodes = mesh.element_nodes(element)?;
                    // pointwise width times pressure at each element node
                    let mut values = Vec::with_capacity(nodes.len());
                    for node in &nodes {
                        let x = edge.to_model_param(mesh.node_edge_parameter(*node, edge.id)?);
                        let position = mesh.node_position(*node)?;
                        values.push(resolve(pressure.at(&position)) * edge.width_at(x));
                    }
                    for gp in mesh.element_integration(element)? {
                        let shape = mesh.element_shape(element, gp.xi)?;
                        let interpolated: Vector3<f64> = shape
                            .values
                            .iter()
                            .zip(&values)
                            .map(|(n, v)| v * *n)
                            .sum();
                        for (i, node) in nodes.iter().enumerate() {
                            let contribution = interpolated
                                * (shape.values[i] * shape.jacobian.abs() * gp.weight);
                            match forces.iter_mut().find(|f| f.node == *node) {
                                Some(existing) => existing.force += contribution,
                                None => forces.push(NodalForce {
                                    node: *node,
                                    force: contribution,
                                }),
                            }
                        }
                    }
                }
                if !forces.is_empty() {
                    descriptors.push(EdgeLoad {
                        edge: edge.id,
                        mode: edge.mode,
                        kind: EdgeLoadKind::Nodal(forces),
                    });
                }
            }
            RepartitionMode::VertexLoad => {
                let start = mesh.vertex_node(edge.start)?;
                let end = mesh.vertex_node(edge.end)?;
                let forces = vec![
                    NodalForce {
                        node: start,
                        force: resolve(pressure.at(&edge.start_position)) * edge.width_at(0.0),
                    },
                    NodalForce {
                        node: end,
                        force: resolve(pressure.at(&edge.end_position)) * edge.width_at(1.0),
                    },
                ];
                descriptors.push(EdgeLoad {
                    edge: edge.id,
                    mode: edge.mode,
                    kind: EdgeLoadKind::Nodal(forces),
                });
            }
        }
    }
    Ok(descriptors)
}
