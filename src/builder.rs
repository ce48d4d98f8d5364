//! Support-edge construction
//!
//! Walks a face's boundary edges and instantiates the per-face
//! [`SupportEdge`] models, resolving support eligibility, the repartition
//! mode and the endpoint orientation.

use std::collections::{HashMap, HashSet};

use crate::edge::{RepartitionMode, SupportEdge};
use crate::error::LoadGenResult;
use crate::mesh::{EdgeId, FaceId, MeshQuery};

/// Build the support-edge models for one face, in boundary order.
///
/// Returns the edge models plus a map from mesh edge id to index in the
/// returned vector. A degenerate edge axis propagates as
/// [`crate::error::GeometryError`]: a malformed boundary edge means the mesh
/// is corrupt and the face must not be processed.
pub fn build_support_edges(
    mesh: &impl MeshQuery,
    face: FaceId,
    unsupporting: &HashSet<EdgeId>,
) -> LoadGenResult<(Vec<SupportEdge>, HashMap<EdgeId, usize>)> {
    let boundary = mesh.face_edges(face)?;
    let mut edges = Vec::with_capacity(boundary.len());
    let mut index = HashMap::with_capacity(boundary.len());

    for id in boundary {
        let support_capable = !unsupporting.contains(&id);
        let mode = repartition_mode(mesh, face, id)?;

        let (v0, v1) = mesh.edge_vertices(id)?;
        let p0 = mesh.vertex_position(v0)?;
        let p1 = mesh.vertex_position(v1)?;
        let axes = mesh.edge_local_axes(id)?;

        // keep increasing parameters running along the edge's intrinsic axis
        let edge = if axes.x.dot(&(p1 - p0)) < 0.0 {
            SupportEdge::new(id, v1, v0, p1, p0, support_capable, mode, true)
        } else {
            SupportEdge::new(id, v0, v1, p0, p1, support_capable, mode, false)
        };
        index.insert(id, edges.len());
        edges.push(edge);
    }
    Ok((edges, index))
}

/// Decide how the load carried by an edge is realized downstream.
///
/// An unmodelled edge bordering an independently modelled neighbour face is
/// already meshed, so its load goes onto the shared nodes. An edge with a
/// single parent face has no element to carry a distributed load and gets
/// point forces at its extreme vertices. Everything else carries a
/// distributed load on its own line elements.
fn repartition_mode(
    mesh: &impl MeshQuery,
    face: FaceId,
    edge: EdgeId,
) -> LoadGenResult<RepartitionMode> {
    let parents = mesh.edge_parent_faces(edge)?;
    if !mesh.edge_has_property(edge)? && parents.len() > 1 {
        for parent in &parents {
            if *parent != face && mesh.face_has_property(*parent)? {
                return Ok(RepartitionMode::NodalEdgeLoad);
            }
        }
    }
    if parents.len() == 1 {
        return Ok(RepartitionMode::VertexLoad);
    }
    Ok(RepartitionMode::ElementLoad)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::{GeometryError, LoadGenError};
    use crate::mesh::{Mesh, VertexId};
    use nalgebra::{Point3, Vector3};

    /// Two unit squares side by side sharing one interior edge.
    ///
    /// Face 0 is `v0 v1 v4 v5` (left), face 1 is `v1 v2 v3 v4` (right);
    /// edge 9 is the shared interior edge `v1 -> v4`.
    fn two_bay_mesh() -> Mesh {
        let mut mesh = Mesh::new();
        let points = [
            Point3::new(0.0, 0.0, 0.0),
            Point3::new(1.0, 0.0, 0.0),
            Point3::new(2.0, 0.0, 0.0),
            Point3::new(2.0, 1.0, 0.0),
            Point3::new(1.0, 1.0, 0.0),
            Point3::new(0.0, 1.0, 0.0),
        ];
        for (k, p) in points.iter().enumerate() {
            mesh.add_vertex(VertexId(k as u32), *p).unwrap();
        }
        mesh.add_edge(EdgeId(0), VertexId(0), VertexId(1)).unwrap();
        mesh.add_edge(EdgeId(1), VertexId(1), VertexId(2)).unwrap();
        mesh.add_edge(EdgeId(2), VertexId(2), VertexId(3)).unwrap();
        mesh.add_edge(EdgeId(3), VertexId(3), VertexId(4)).unwrap();
        mesh.add_edge(EdgeId(4), VertexId(4), VertexId(5)).unwrap();
        mesh.add_edge(EdgeId(5), VertexId(5), VertexId(0)).unwrap();
        mesh.add_edge(EdgeId(9), VertexId(1), VertexId(4)).unwrap();
        mesh.add_face(
            FaceId(0),
            &[VertexId(0), VertexId(1), VertexId(4), VertexId(5)],
            &[EdgeId(0), EdgeId(9), EdgeId(4), EdgeId(5)],
        )
        .unwrap();
        mesh.add_face(
            FaceId(1),
            &[VertexId(1), VertexId(2), VertexId(3), VertexId(4)],
            &[EdgeId(1), EdgeId(2), EdgeId(3), EdgeId(9)],
        )
        .unwrap();
        mesh
    }

    #[test]
    fn test_boundary_order_and_index_map() {
        let mesh = two_bay_mesh();
        let (edges, index) =
            build_support_edges(&mesh, FaceId(0), &HashSet::new()).unwrap();
        assert_eq!(edges.len(), 4);
        for (i, edge) in edges.iter().enumerate() {
            assert_eq!(index[&edge.id], i);
        }
        assert_eq!(edges[1].id, EdgeId(9));
        assert!(edges.iter().all(|e| e.support_capable));
    }

    #[test]
    fn test_unsupporting_set_clears_support() {
        let mesh = two_bay_mesh();
        let excluded: HashSet<_> = [EdgeId(0)].into_iter().collect();
        let (edges, index) = build_support_edges(&mesh, FaceId(0), &excluded).unwrap();
        assert!(!edges[index[&EdgeId(0)]].support_capable);
        assert!(edges[index[&EdgeId(9)]].support_capable);
    }

    #[test]
    fn test_shared_edge_defaults_to_element_load() {
        let mesh = two_bay_mesh();
        let (edges, index) =
            build_support_edges(&mesh, FaceId(0), &HashSet::new()).unwrap();
        assert_eq!(edges[index[&EdgeId(9)]].mode, RepartitionMode::ElementLoad);
    }

    #[test]
    fn test_modelled_neighbour_switches_to_nodal() {
        let mut mesh = two_bay_mesh();
        mesh.set_face_property(FaceId(1), true).unwrap();
        let (edges, index) =
            build_support_edges(&mesh, FaceId(0), &HashSet::new()).unwrap();
        assert_eq!(
            edges[index[&EdgeId(9)]].mode,
            RepartitionMode::NodalEdgeLoad
        );
        // the outer edges are unaffected
        assert_eq!(edges[index[&EdgeId(0)]].mode, RepartitionMode::VertexLoad);
    }

    #[test]
    fn test_edge_property_blocks_nodal_mode() {
        let mut mesh = two_bay_mesh();
        mesh.set_face_property(FaceId(1), true).unwrap();
        mesh.set_edge_property(EdgeId(9), true).unwrap();
        let (edges, index) =
            build_support_edges(&mesh, FaceId(0), &HashSet::new()).unwrap();
        assert_eq!(edges[index[&EdgeId(9)]].mode, RepartitionMode::ElementLoad);
    }

    #[test]
    fn test_single_parent_edge_gets_vertex_load() {
        let mesh = two_bay_mesh();
        let (edges, index) =
            build_support_edges(&mesh, FaceId(0), &HashSet::new()).unwrap();
        for id in [EdgeId(0), EdgeId(4), EdgeId(5)] {
            assert_eq!(edges[index[&id]].mode, RepartitionMode::VertexLoad);
        }
    }

    #[test]
    fn test_endpoint_orientation_follows_edge_axis() {
        let mut mesh = two_bay_mesh();
        mesh.set_edge_axis(EdgeId(0), Vector3::new(-1.0, 0.0, 0.0)).unwrap();
        let (edges, index) =
            build_support_edges(&mesh, FaceId(0), &HashSet::new()).unwrap();

        let swapped = &edges[index[&EdgeId(0)]];
        assert_eq!(swapped.start, VertexId(1));
        assert_eq!(swapped.end, VertexId(0));
        assert_eq!(swapped.start_position, Point3::new(1.0, 0.0, 0.0));

        let kept = &edges[index[&EdgeId(9)]];
        assert_eq!(kept.start, VertexId(1));
        assert_eq!(kept.end, VertexId(4));
    }

    #[test]
    fn test_degenerate_edge_propagates_geometry_error() {
        let mut mesh = Mesh::new();
        mesh.add_vertex(VertexId(0), Point3::new(0.0, 0.0, 0.0)).unwrap();
        mesh.add_vertex(VertexId(1), Point3::new(0.0, 0.0, 0.0)).unwrap();
        mesh.add_vertex(VertexId(2), Point3::new(1.0, 1.0, 0.0)).unwrap();
        mesh.add_edge(EdgeId(0), VertexId(0), VertexId(1)).unwrap();
        mesh.add_edge(EdgeId(1), VertexId(1), VertexId(2)).unwrap();
        mesh.add_edge(EdgeId(2), VertexId(2), VertexId(0)).unwrap();
        mesh.add_face(
            FaceId(0),
            &[VertexId(0), VertexId(1), VertexId(2)],
            &[EdgeId(0), EdgeId(1), EdgeId(2)],
        )
        .unwrap();

        let err = build_support_edges(&mesh, FaceId(0), &HashSet::new()).unwrap_err();
        assert!(matches!(
            err,
            LoadGenError::Geometry(GeometryError::DegenerateEdge(EdgeId(0)))
        ));
    }
}
