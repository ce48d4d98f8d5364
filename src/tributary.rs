//! Tributary-width solver
//!
//! Populates the width profiles of a face's support edges from the slab's
//! span type and span direction:
//! - aligned one-way rectangles and two-way rectangles use closed-form
//!   profiles (uniform, triangular, trapezoidal)
//! - everything else one-way runs the general quadrilateral sweep
//!
//! Widths are written into the [`SupportEdge`] models in place; the solver
//! produces no loads itself.

use nalgebra::{Point3, Vector3};

use crate::edge::SupportEdge;
use crate::error::{LoadGenError, LoadGenResult};
use crate::geometry::{
    is_parallel, is_rectangular, sin_between, span_direction, SweepFrame, BREAKPOINT_OFFSET,
    COINCIDENT_TOL, SHAPE_TOL,
};
use crate::loads::{SlabFace, SpanType};
use crate::mesh::{LocalAxes, MeshQuery, VertexId};

/// Fill the tributary-width profiles of `edges` for one slab face.
///
/// `edges` must be the face's support edges in boundary order, as produced
/// by [`crate::builder::build_support_edges`].
pub fn solve(
    mesh: &impl MeshQuery,
    slab: &SlabFace,
    edges: &mut [SupportEdge],
) -> LoadGenResult<()> {
    let axes = mesh.face_local_axes(slab.face)?;
    let dir = span_direction(&axes, slab.direction)?;

    let vertex_ids = mesh.face_vertices(slab.face)?;
    let mut vertices = Vec::with_capacity(vertex_ids.len());
    for id in vertex_ids {
        vertices.push((id, mesh.vertex_position(id)?));
    }
    let positions: Vec<Point3<f64>> = vertices.iter().map(|(_, p)| *p).collect();
    let rectangular = is_rectangular(&positions);

    match slab.span {
        SpanType::TwoWay => {
            if !rectangular {
                return Err(LoadGenError::UnimplementedConfiguration(format!(
                    "two-way span on non-rectangular face {}",
                    slab.face
                )));
            }
            solve_two_way(slab, edges)
        }
        SpanType::OneWay => {
            if rectangular && edges.len() == 4 && solve_one_way_aligned(&dir, edges) {
                return Ok(());
            }
            sweep(&vertices, &axes, &dir, edges);
            Ok(())
        }
    }
}

/// Closed-form profile for a one-way rectangle whose span direction is
/// parallel to one pair of opposite edges.
///
/// Each support-capable edge perpendicular to the span carries a uniform
/// width: half the span length when its opposite edge also supports, the
/// full span length when it does not. Returns false when the span direction
/// is not aligned with an edge pair.
fn solve_one_way_aligned(dir: &Vector3<f64>, edges: &mut [SupportEdge]) -> bool {
    let h = match edges.iter().find(|e| is_parallel(&e.direction(), dir)) {
        Some(edge) => edge.length,
        None => return false,
    };
    for i in 0..edges.len() {
        if !edges[i].support_capable || is_parallel(&edges[i].direction(), dir) {
            continue;
        }
        let opposite_supports = edges[(i + 2) % edges.len()].support_capable;
        let width = if opposite_supports { h / 2.0 } else { h };
        edges[i].set_width(0, width);
        edges[i].set_width(1, width);
    }
    true
}

/// Closed-form two-way profiles on a rectangle: triangular on the short
/// edges (and on every edge of a square), trapezoidal on the long edges.
fn solve_two_way(slab: &SlabFace, edges: &mut [SupportEdge]) -> LoadGenResult<()> {
    if let Some(edge) = edges.iter().find(|e| !e.support_capable) {
        return Err(LoadGenError::UnsupportedConfiguration(format!(
            "two-way face {} has non-supporting edge {}",
            slab.face, edge.id
        )));
    }

    let mut lengths: Vec<f64> = edges.iter().map(|e| e.length).collect();
    lengths.sort_by(f64::total_cmp);
    let mut distinct: Vec<f64> = Vec::new();
    for length in lengths {
        match distinct.last() {
            Some(&prev) if (length - prev).abs() <= COINCIDENT_TOL => {}
            _ => distinct.push(length),
        }
    }
    if distinct.is_empty() || distinct.len() > 2 {
        return Err(LoadGenError::InvalidGeometry(format!(
            "rectangular face {} has {} distinct side lengths",
            slab.face,
            distinct.len()
        )));
    }
    let h = distinct[0];
    let b = distinct[distinct.len() - 1];

    if (b - h).abs() <= SHAPE_TOL {
        for edge in edges.iter_mut() {
            triangular_profile(edge, h);
        }
        return Ok(());
    }
    for edge in edges.iter_mut() {
        if (edge.length - b).abs() <= COINCIDENT_TOL {
            trapezoidal_profile(edge, b, h);
        } else {
            triangular_profile(edge, h);
        }
    }
    Ok(())
}

/// `{0, 1/2, 1}` samples with widths `{0, H/2, 0}`.
fn triangular_profile(edge: &mut SupportEdge, h: f64) {
    let mid = edge.add_point(0.5);
    edge.set_width(mid, h / 2.0);
}

/// `{0, H/2B, 1 - H/2B, 1}` samples with widths `{0, H/2, H/2, 0}`.
fn trapezoidal_profile(edge: &mut SupportEdge, b: f64, h: f64) {
    let cut = h / (2.0 * b);
    let near = edge.add_point(cut);
    edge.set_width(near, h / 2.0);
    let far = edge.add_point(1.0 - cut);
    edge.set_width(far, h / 2.0);
}

/// A support edge's endpoints projected into the sweep frame.
struct ProjectedEdge {
    start: (f64, f64),
    end: (f64, f64),
}

/// General quadrilateral sweep for one-way faces.
///
/// Works in a local frame whose y-axis is the span direction. First every
/// edge is subdivided where a non-adjacent vertex crosses its local-x span,
/// so the width profile can change exactly there. Then every sample of every
/// support-capable non-parallel edge casts a line along the span onto the
/// opposite boundary; the width contribution is the perpendicular local-y
/// distance scaled by the sine of the edge/span angle, halved when the
/// opposite edge also supports.
fn sweep(
    vertices: &[(VertexId, Point3<f64>)],
    axes: &LocalAxes,
    dir: &Vector3<f64>,
    edges: &mut [SupportEdge],
) {
    let frame = SweepFrame::new(vertices[0].1, *dir, axes.z);
    let projected: Vec<ProjectedEdge> = edges
        .iter()
        .map(|e| ProjectedEdge {
            start: frame.project(&e.start_position),
            end: frame.project(&e.end_position),
        })
        .collect();

    for (vertex, position) in vertices {
        let (vx, _) = frame.project(position);
        for (k, edge) in edges.iter_mut().enumerate() {
            if edge.start == *vertex || edge.end == *vertex {
                continue;
            }
            let (sx, _) = projected[k].start;
            let (ex, _) = projected[k].end;
            let (min_x, max_x) = if sx <= ex { (sx, ex) } else { (ex, sx) };
            if vx <= min_x + COINCIDENT_TOL || vx >= max_x - COINCIDENT_TOL {
                continue;
            }
            let t = (vx - sx) / (ex - sx);
            // paired samples straddling the crossing keep the step sharp
            edge.add_point(t - BREAKPOINT_OFFSET);
            edge.add_point(t + BREAKPOINT_OFFSET);
        }
    }

    for a in 0..edges.len() {
        if !edges[a].support_capable {
            continue;
        }
        let sin_theta = sin_between(&edges[a].direction(), dir);
        if sin_theta < SHAPE_TOL {
            continue;
        }
        let samples = edges[a].samples().to_vec();
        for (index, &sample) in samples.iter().enumerate() {
            let (px, py) = frame.project(&edges[a].position_at(sample));
            // the opposite boundary is the containing crossing farthest away
            let mut hit: Option<(usize, f64)> = None;
            for (b, other) in projected.iter().enumerate() {
                if b == a {
                    continue;
                }
                let (sx, sy) = other.start;
                let (ex, ey) = other.end;
                let run = ex - sx;
                if run.abs() <= COINCIDENT_TOL {
                    continue;
                }
                // slack well below the breakpoint-pair offset, so a paired
                // sample never sees the edge on the far side of its junction
                let (min_x, max_x) = if sx <= ex { (sx, ex) } else { (ex, sx) };
                if px < min_x - SHAPE_TOL || px > max_x + SHAPE_TOL {
                    continue;
                }
                let t = (px - sx) / run;
                let dy = (sy + t * (ey - sy) - py).abs();
                if hit.map_or(true, |(_, best)| dy > best) {
                    hit = Some((b, dy));
                }
            }
            if let Some((b, dy)) = hit {
                let mut width = dy * sin_theta;
                if edges[b].support_capable {
                    width /= 2.0;
                }
                edges[a].add_width(index, width);
            }
        }
    }
}
