//! In-memory mesh database
//!
//! A reference [`MeshQuery`] implementation backed by hash maps. Host
//! applications with their own mesh database implement the trait directly;
//! this container exists for tests, examples and small standalone models.

use std::collections::HashMap;

use nalgebra::{Point3, Vector3};

use crate::error::{GeometryError, LoadGenResult, MeshError};
use crate::geometry::{is_parallel, COINCIDENT_TOL, SHAPE_TOL};
use crate::mesh::{
    EdgeId, ElementId, FaceId, GaussPoint, LocalAxes, MeshQuery, NodeId, ShapeSample, VertexId,
};

#[derive(Debug, Clone)]
struct VertexRecord {
    position: Point3<f64>,
    node: Option<NodeId>,
}

#[derive(Debug, Clone)]
struct NodeRecord {
    position: Point3<f64>,
}

#[derive(Debug, Clone)]
struct EdgeRecord {
    vertices: (VertexId, VertexId),
    straight: bool,
    node_count: usize,
    has_property: bool,
    axis_override: Option<Vector3<f64>>,
    parent_faces: Vec<FaceId>,
    elements: Vec<ElementId>,
}

#[derive(Debug, Clone)]
struct FaceRecord {
    vertices: Vec<VertexId>,
    edges: Vec<EdgeId>,
    has_property: bool,
}

#[derive(Debug, Clone)]
struct ElementRecord {
    nodes: [NodeId; 2],
}

/// In-memory mesh of vertices, meshed nodes, edges, faces and 2-node line
/// elements.
#[derive(Debug, Clone)]
pub struct Mesh {
    vertices: HashMap<VertexId, VertexRecord>,
    nodes: HashMap<NodeId, NodeRecord>,
    edges: HashMap<EdgeId, EdgeRecord>,
    faces: HashMap<FaceId, FaceRecord>,
    elements: HashMap<ElementId, ElementRecord>,
}

impl Default for Mesh {
    fn default() -> Self {
        Self::new()
    }
}

impl Mesh {
    /// Create a new empty mesh.
    pub fn new() -> Self {
        Self {
            vertices: HashMap::new(),
            nodes: HashMap::new(),
            edges: HashMap::new(),
            faces: HashMap::new(),
            elements: HashMap::new(),
        }
    }

    // ========================
    // Mesh Building Methods
    // ========================

    /// Add a geometry vertex.
    pub fn add_vertex(&mut self, id: VertexId, position: Point3<f64>) -> LoadGenResult<()> {
        if self.vertices.contains_key(&id) {
            return Err(MeshError::DuplicateId(format!("vertex {id}")).into());
        }
        self.vertices.insert(id, VertexRecord { position, node: None });
        Ok(())
    }

    /// Add an analysis node.
    pub fn add_node(&mut self, id: NodeId, position: Point3<f64>) -> LoadGenResult<()> {
        if self.nodes.contains_key(&id) {
            return Err(MeshError::DuplicateId(format!("node {id}")).into());
        }
        self.nodes.insert(id, NodeRecord { position });
        Ok(())
    }

    /// Record which analysis node a vertex was meshed into.
    pub fn map_vertex_node(&mut self, vertex: VertexId, node: NodeId) -> LoadGenResult<()> {
        if !self.nodes.contains_key(&node) {
            return Err(MeshError::NodeNotFound(node).into());
        }
        let record = self
            .vertices
            .get_mut(&vertex)
            .ok_or(MeshError::VertexNotFound(vertex))?;
        record.node = Some(node);
        Ok(())
    }

    /// Add a straight 2-node edge between two vertices.
    pub fn add_edge(&mut self, id: EdgeId, a: VertexId, b: VertexId) -> LoadGenResult<()> {
        self.insert_edge(id, a, b, true, 2)
    }

    /// Add a curved edge. The validator skips faces bounded by these.
    pub fn add_curved_edge(&mut self, id: EdgeId, a: VertexId, b: VertexId) -> LoadGenResult<()> {
        self.insert_edge(id, a, b, false, 3)
    }

    /// Add a straight edge whose geometry carries more than two defining
    /// nodes. The validator skips faces bounded by these.
    pub fn add_polyline_edge(
        &mut self,
        id: EdgeId,
        a: VertexId,
        b: VertexId,
        node_count: usize,
    ) -> LoadGenResult<()> {
        self.insert_edge(id, a, b, true, node_count)
    }

    fn insert_edge(
        &mut self,
        id: EdgeId,
        a: VertexId,
        b: VertexId,
        straight: bool,
        node_count: usize,
    ) -> LoadGenResult<()> {
        if self.edges.contains_key(&id) {
            return Err(MeshError::DuplicateId(format!("edge {id}")).into());
        }
        for vertex in [a, b] {
            if !self.vertices.contains_key(&vertex) {
                return Err(MeshError::VertexNotFound(vertex).into());
            }
        }
        self.edges.insert(
            id,
            EdgeRecord {
                vertices: (a, b),
                straight,
                node_count,
                has_property: false,
                axis_override: None,
                parent_faces: Vec::new(),
                elements: Vec::new(),
            },
        );
        Ok(())
    }

    /// Add a face from its ordered boundary vertices and boundary edges.
    ///
    /// The face is appended to each boundary edge's parent list.
    pub fn add_face(
        &mut self,
        id: FaceId,
        vertices: &[VertexId],
        edges: &[EdgeId],
    ) -> LoadGenResult<()> {
        if self.faces.contains_key(&id) {
            return Err(MeshError::DuplicateId(format!("face {id}")).into());
        }
        if vertices.len() < 3 {
            return Err(GeometryError::DegenerateFace(id).into());
        }
        // a closed boundary has one edge per vertex
        if edges.len() != vertices.len() {
            return Err(MeshError::BoundaryMismatch(id, edges.len(), vertices.len()).into());
        }
        for vertex in vertices {
            if !self.vertices.contains_key(vertex) {
                return Err(MeshError::VertexNotFound(*vertex).into());
            }
        }
        for edge in edges {
            if !self.edges.contains_key(edge) {
                return Err(MeshError::EdgeNotFound(*edge).into());
            }
        }
        for edge in edges {
            if let Some(record) = self.edges.get_mut(edge) {
                record.parent_faces.push(id);
            }
        }
        self.faces.insert(
            id,
            FaceRecord {
                vertices: vertices.to_vec(),
                edges: edges.to_vec(),
                has_property: false,
            },
        );
        Ok(())
    }

    /// Add a 2-node line element meshed on an edge.
    pub fn add_line_element(
        &mut self,
        id: ElementId,
        edge: EdgeId,
        i: NodeId,
        j: NodeId,
    ) -> LoadGenResult<()> {
        if self.elements.contains_key(&id) {
            return Err(MeshError::DuplicateId(format!("element {id}")).into());
        }
        for node in [i, j] {
            if !self.nodes.contains_key(&node) {
                return Err(MeshError::NodeNotFound(node).into());
            }
        }
        let record = self.edges.get_mut(&edge).ok_or(MeshError::EdgeNotFound(edge))?;
        record.elements.push(id);
        self.elements.insert(id, ElementRecord { nodes: [i, j] });
        Ok(())
    }

    /// Mark whether a face already carries a modelled property (slab element,
    /// load panel) that makes load generation redundant.
    pub fn set_face_property(&mut self, face: FaceId, has_property: bool) -> LoadGenResult<()> {
        let record = self.faces.get_mut(&face).ok_or(MeshError::FaceNotFound(face))?;
        record.has_property = has_property;
        Ok(())
    }

    /// Mark whether an edge carries a modelled supporting member.
    pub fn set_edge_property(&mut self, edge: EdgeId, has_property: bool) -> LoadGenResult<()> {
        let record = self.edges.get_mut(&edge).ok_or(MeshError::EdgeNotFound(edge))?;
        record.has_property = has_property;
        Ok(())
    }

    /// Override an edge's intrinsic local x-axis.
    ///
    /// Mesh databases are free to orient an edge's axis against its vertex
    /// order; the override models that case.
    pub fn set_edge_axis(&mut self, edge: EdgeId, x: Vector3<f64>) -> LoadGenResult<()> {
        let norm = x.norm();
        if norm < SHAPE_TOL {
            return Err(GeometryError::ZeroVector.into());
        }
        let record = self.edges.get_mut(&edge).ok_or(MeshError::EdgeNotFound(edge))?;
        record.axis_override = Some(x / norm);
        Ok(())
    }

    // ========================
    // Record Lookup
    // ========================

    fn vertex(&self, id: VertexId) -> Result<&VertexRecord, MeshError> {
        self.vertices.get(&id).ok_or(MeshError::VertexNotFound(id))
    }

    fn node(&self, id: NodeId) -> Result<&NodeRecord, MeshError> {
        self.nodes.get(&id).ok_or(MeshError::NodeNotFound(id))
    }

    fn edge(&self, id: EdgeId) -> Result<&EdgeRecord, MeshError> {
        self.edges.get(&id).ok_or(MeshError::EdgeNotFound(id))
    }

    fn face(&self, id: FaceId) -> Result<&FaceRecord, MeshError> {
        self.faces.get(&id).ok_or(MeshError::FaceNotFound(id))
    }

    fn element(&self, id: ElementId) -> Result<&ElementRecord, MeshError> {
        self.elements.get(&id).ok_or(MeshError::ElementNotFound(id))
    }

    fn edge_endpoints(&self, id: EdgeId) -> LoadGenResult<(Point3<f64>, Point3<f64>)> {
        let record = self.edge(id)?;
        let a = self.vertex(record.vertices.0)?.position;
        let b = self.vertex(record.vertices.1)?.position;
        Ok((a, b))
    }

    /// Area-weighted winding normal of a polygon (Newell's method).
    fn winding_normal(positions: &[Point3<f64>]) -> Vector3<f64> {
        let mut n = Vector3::zeros();
        for i in 0..positions.len() {
            let p = positions[i];
            let q = positions[(i + 1) % positions.len()];
            n.x += (p.y - q.y) * (p.z + q.z);
            n.y += (p.z - q.z) * (p.x + q.x);
            n.z += (p.x - q.x) * (p.y + q.y);
        }
        n
    }

    fn face_positions(&self, id: FaceId) -> LoadGenResult<Vec<Point3<f64>>> {
        self.face(id)?
            .vertices
            .iter()
            .map(|v| Ok(self.vertex(*v)?.position))
            .collect()
    }
}

impl MeshQuery for Mesh {
    fn vertex_position(&self, vertex: VertexId) -> LoadGenResult<Point3<f64>> {
        Ok(self.vertex(vertex)?.position)
    }

    fn vertex_node(&self, vertex: VertexId) -> LoadGenResult<NodeId> {
        self.vertex(vertex)?
            .node
            .ok_or_else(|| MeshError::UnmappedVertex(vertex).into())
    }

    fn node_position(&self, node: NodeId) -> LoadGenResult<Point3<f64>> {
        Ok(self.node(node)?.position)
    }

    fn node_edge_parameter(&self, node: NodeId, edge: EdgeId) -> LoadGenResult<f64> {
        let p = self.node(node)?.position;
        let (a, b) = self.edge_endpoints(edge)?;
        let ab = b - a;
        let length_sq = ab.norm_squared();
        if length_sq < COINCIDENT_TOL * COINCIDENT_TOL {
            return Err(GeometryError::DegenerateEdge(edge).into());
        }
        let t = (p - a).dot(&ab) / length_sq;
        let closest = a + ab * t;
        if (p - closest).norm() > COINCIDENT_TOL {
            return Err(MeshError::NodeNotOnEdge(node, edge).into());
        }
        let slack = COINCIDENT_TOL / length_sq.sqrt();
        if t < -slack || t > 1.0 + slack {
            return Err(MeshError::NodeNotOnEdge(node, edge).into());
        }
        Ok(t.clamp(0.0, 1.0))
    }

    fn face_vertices(&self, face: FaceId) -> LoadGenResult<Vec<VertexId>> {
        Ok(self.face(face)?.vertices.clone())
    }

    fn face_edges(&self, face: FaceId) -> LoadGenResult<Vec<EdgeId>> {
        Ok(self.face(face)?.edges.clone())
    }

    fn face_is_planar(&self, face: FaceId) -> LoadGenResult<bool> {
        let positions = self.face_positions(face)?;
        if positions.len() == 3 {
            return Ok(true);
        }
        let normal = (positions[1] - positions[0]).cross(&(positions[2] - positions[0]));
        let norm = normal.norm();
        if norm < SHAPE_TOL {
            return Err(GeometryError::DegenerateFace(face).into());
        }
        let unit = normal / norm;
        Ok(positions[3..]
            .iter()
            .all(|p| (p - positions[0]).dot(&unit).abs() <= COINCIDENT_TOL))
    }

    fn face_has_property(&self, face: FaceId) -> LoadGenResult<bool> {
        Ok(self.face(face)?.has_property)
    }

    fn face_local_axes(&self, face: FaceId) -> LoadGenResult<LocalAxes> {
        let positions = self.face_positions(face)?;
        let chord = positions[1] - positions[0];
        if chord.norm() < COINCIDENT_TOL {
            return Err(GeometryError::DegenerateFace(face).into());
        }
        let normal = Self::winding_normal(&positions);
        if normal.norm() < SHAPE_TOL {
            return Err(GeometryError::DegenerateFace(face).into());
        }
        let z = normal.normalize();
        // project the first boundary chord into the face plane
        let x = (chord - z * chord.dot(&z)).normalize();
        let y = z.cross(&x);
        Ok(LocalAxes { x, y, z })
    }

    fn edge_vertices(&self, edge: EdgeId) -> LoadGenResult<(VertexId, VertexId)> {
        Ok(self.edge(edge)?.vertices)
    }

    fn edge_is_straight(&self, edge: EdgeId) -> LoadGenResult<bool> {
        Ok(self.edge(edge)?.straight)
    }

    fn edge_node_count(&self, edge: EdgeId) -> LoadGenResult<usize> {
        Ok(self.edge(edge)?.node_count)
    }

    fn edge_parent_faces(&self, edge: EdgeId) -> LoadGenResult<Vec<FaceId>> {
        Ok(self.edge(edge)?.parent_faces.clone())
    }

    fn edge_has_property(&self, edge: EdgeId) -> LoadGenResult<bool> {
        Ok(self.edge(edge)?.has_property)
    }

    fn edge_local_axes(&self, edge: EdgeId) -> LoadGenResult<LocalAxes> {
        let record = self.edge(edge)?;
        let x = match record.axis_override {
            Some(axis) => axis,
            None => {
                let (a, b) = self.edge_endpoints(edge)?;
                let chord = b - a;
                if chord.norm() < COINCIDENT_TOL {
                    return Err(GeometryError::DegenerateEdge(edge).into());
                }
                chord.normalize()
            }
        };
        // keep local z near global Z, falling back for vertical edges
        let reference = if is_parallel(&x, &Vector3::z()) {
            Vector3::x()
        } else {
            Vector3::z()
        };
        let y = reference.cross(&x).normalize();
        let z = x.cross(&y);
        Ok(LocalAxes { x, y, z })
    }

    fn edge_elements(&self, edge: EdgeId) -> LoadGenResult<Vec<ElementId>> {
        Ok(self.edge(edge)?.elements.clone())
    }

    fn element_nodes(&self, element: ElementId) -> LoadGenResult<Vec<NodeId>> {
        Ok(self.element(element)?.nodes.to_vec())
    }

    fn element_integration(&self, element: ElementId) -> LoadGenResult<Vec<GaussPoint>> {
        self.element(element)?;
        let gp = 1.0 / 3.0_f64.sqrt(); // Gauss point location
        Ok(vec![
            GaussPoint { xi: -gp, weight: 1.0 },
            GaussPoint { xi: gp, weight: 1.0 },
        ])
    }

    fn element_shape(&self, element: ElementId, xi: f64) -> LoadGenResult<ShapeSample> {
        let record = self.element(element)?;
        let i = self.node(record.nodes[0])?.position;
        let j = self.node(record.nodes[1])?.position;
        let length = (j - i).norm();
        Ok(ShapeSample {
            values: vec![(1.0 - xi) / 2.0, (1.0 + xi) / 2.0],
            jacobian: length / 2.0,
        })
    }
}
