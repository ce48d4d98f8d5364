//! Benchmarks for the tributary solver

use std::collections::HashSet;

use criterion::{black_box, criterion_group, criterion_main, Criterion};
use nalgebra::Point3;
use slab_loads::prelude::*;
use slab_loads::tributary;

fn rect_mesh(b: f64, h: f64) -> Mesh {
    let mut mesh = Mesh::new();
    let corners = [
        Point3::new(0.0, 0.0, 0.0),
        Point3::new(b, 0.0, 0.0),
        Point3::new(b, h, 0.0),
        Point3::new(0.0, h, 0.0),
    ];
    for (k, p) in corners.iter().enumerate() {
        mesh.add_vertex(VertexId(k as u32), *p).unwrap();
    }
    for k in 0u32..4 {
        mesh.add_edge(EdgeId(k), VertexId(k), VertexId((k + 1) % 4))
            .unwrap();
    }
    mesh.add_face(
        FaceId(0),
        &[VertexId(0), VertexId(1), VertexId(2), VertexId(3)],
        &[EdgeId(0), EdgeId(1), EdgeId(2), EdgeId(3)],
    )
    .unwrap();
    mesh
}

fn solve_face(mesh: &Mesh, slab: &SlabFace) -> Vec<SupportEdge> {
    let (mut edges, _) = build_support_edges(mesh, slab.face, &HashSet::new()).unwrap();
    tributary::solve(mesh, slab, &mut edges).unwrap();
    edges
}

fn bench_closed_form(c: &mut Criterion) {
    let mesh = rect_mesh(6.0, 4.0);

    c.bench_function("solve one-way aligned rectangle", |b| {
        let slab = SlabFace::new(FaceId(0), SpanType::OneWay);
        b.iter(|| black_box(solve_face(&mesh, &slab)));
    });

    c.bench_function("solve two-way rectangle", |b| {
        let slab = SlabFace::new(FaceId(0), SpanType::TwoWay);
        b.iter(|| black_box(solve_face(&mesh, &slab)));
    });
}

fn bench_sweep(c: &mut Criterion) {
    let mesh = rect_mesh(6.0, 4.0);

    c.bench_function("solve one-way rotated span (sweep)", |b| {
        // 30 degree span: no edge pair is aligned, the general sweep runs
        let slab = SlabFace::new(FaceId(0), SpanType::OneWay).with_direction(60.0);
        b.iter(|| black_box(solve_face(&mesh, &slab)));
    });
}

fn bench_discretize(c: &mut Criterion) {
    let mesh = rect_mesh(6.0, 4.0);
    let slab = SlabFace::new(FaceId(0), SpanType::OneWay).with_direction(60.0);
    let edges = solve_face(&mesh, &slab);
    let edge = edges.iter().find(|e| e.is_subdivided()).unwrap();

    c.bench_function("discretize kinked profile", |b| {
        b.iter(|| black_box(edge.discretize(0.0, 1.0, 10)));
    });
}

criterion_group!(benches, bench_closed_form, bench_sweep, bench_discretize);
criterion_main!(benches);
