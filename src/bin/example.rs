//! Slab Loads Example - Two-Bay Floor

use anyhow::Result;
use nalgebra::Point3;
use slab_loads::prelude::*;

fn main() -> Result<()> {
    env_logger::init();

    println!("=== Slab Loads Example: Two-Bay Floor ===\n");

    // Two slab bays side by side sharing a spine beam:
    //
    //     V5 ---E4--- V4 ---E3--- V3
    //     |           |           |
    //     E5   F0     E6   F1     E2
    //     |           |           |
    //     V0 ---E0--- V1 ---E1--- V2
    //
    // Bay F0 is 6 x 4 m, bay F1 is 4 x 4 m.

    let mut mesh = Mesh::new();
    let corners = [
        Point3::new(0.0, 0.0, 0.0),
        Point3::new(6.0, 0.0, 0.0),
        Point3::new(10.0, 0.0, 0.0),
        Point3::new(10.0, 4.0, 0.0),
        Point3::new(6.0, 4.0, 0.0),
        Point3::new(0.0, 4.0, 0.0),
    ];
    for (k, p) in corners.iter().enumerate() {
        mesh.add_vertex(VertexId(k as u32), *p)?;
        mesh.add_node(NodeId(k as u32), *p)?;
        mesh.map_vertex_node(VertexId(k as u32), NodeId(k as u32))?;
    }

    mesh.add_edge(EdgeId(0), VertexId(0), VertexId(1))?;
    mesh.add_edge(EdgeId(1), VertexId(1), VertexId(2))?;
    mesh.add_edge(EdgeId(2), VertexId(2), VertexId(3))?;
    mesh.add_edge(EdgeId(3), VertexId(3), VertexId(4))?;
    mesh.add_edge(EdgeId(4), VertexId(4), VertexId(5))?;
    mesh.add_edge(EdgeId(5), VertexId(5), VertexId(0))?;
    mesh.add_edge(EdgeId(6), VertexId(1), VertexId(4))?;

    mesh.add_face(
        FaceId(0),
        &[VertexId(0), VertexId(1), VertexId(4), VertexId(5)],
        &[EdgeId(0), EdgeId(6), EdgeId(4), EdgeId(5)],
    )?;
    mesh.add_face(
        FaceId(1),
        &[VertexId(1), VertexId(2), VertexId(3), VertexId(4)],
        &[EdgeId(1), EdgeId(2), EdgeId(3), EdgeId(6)],
    )?;

    // Mesh the spine beam with two line elements
    mesh.add_node(NodeId(6), Point3::new(6.0, 2.0, 0.0))?;
    mesh.add_line_element(ElementId(0), EdgeId(6), NodeId(1), NodeId(6))?;
    mesh.add_line_element(ElementId(1), EdgeId(6), NodeId(6), NodeId(4))?;

    // 5 kPa gravity pressure; the left bay spans one-way onto the beam
    // lines, the right bay is a two-way slab
    let slabs = [
        SlabFace::new(FaceId(0), SpanType::OneWay),
        SlabFace::new(FaceId(1), SpanType::TwoWay),
    ];

    let generator = SurfaceLoadGenerator::new(&mesh);
    let report = generator.generate(
        &slabs,
        &PressureField::downward(5.0),
        LoadOrientation::Global { projected: false },
    )?;

    println!(
        "Generated loads for {} of {} faces ({} rejected)\n",
        report.loaded_count(),
        slabs.len(),
        report.rejected_count()
    );

    for face_loads in &report.face_loads {
        println!("--- Face {} ---", face_loads.face);
        for load in &face_loads.edge_loads {
            match &load.kind {
                EdgeLoadKind::Distributed(segments) => {
                    println!("  Edge {} ({:?}):", load.edge, load.mode);
                    for s in segments {
                        println!(
                            "    element {} [{:.3}, {:.3}]  w = {:.2} kN/m",
                            s.element, s.start, s.end, s.intensity.z
                        );
                    }
                }
                EdgeLoadKind::Nodal(forces) => {
                    println!("  Edge {} ({:?}):", load.edge, load.mode);
                    for f in forces {
                        println!("    node {}  Fz = {:.2} kN", f.node, f.force.z);
                    }
                }
            }
        }
    }

    println!("\n--- JSON descriptors ---");
    println!("{}", serde_json::to_string_pretty(&report.face_loads)?);

    Ok(())
}
