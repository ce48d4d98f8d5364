//! Support-edge model
//!
//! A [`SupportEdge`] carries the piecewise-linear tributary-width profile of
//! one straight boundary edge over a normalized parameter domain `[0, 1]`.
//! Edges are created per face-processing call, filled by the tributary
//! solver, consumed by the load evaluator and then dropped.

use nalgebra::{Point3, Vector3};
use serde::{Deserialize, Serialize};

use crate::geometry::{COINCIDENT_TOL, SHAPE_TOL};
use crate::mesh::{EdgeId, VertexId};

/// How the load carried by an edge is realized downstream.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RepartitionMode {
    /// Distributed load on the edge's own line elements.
    ElementLoad,
    /// Lumped forces on the nodes of an already-meshed edge.
    NodalEdgeLoad,
    /// Point forces at the edge's two extreme vertices.
    VertexLoad,
}

/// One straight boundary edge of a face with its tributary-width profile.
///
/// `parameterSamples` start as `{0, 1}` and grow by insertion; widths are
/// index-aligned with the samples and default to zero until the solver sets
/// them.
#[derive(Debug, Clone)]
pub struct SupportEdge {
    /// Mesh edge this profile belongs to.
    pub id: EdgeId,
    /// First endpoint, oriented along the edge's intrinsic local x-axis.
    pub start: VertexId,
    /// Second endpoint.
    pub end: VertexId,
    /// World position of `start`.
    pub start_position: Point3<f64>,
    /// World position of `end`.
    pub end_position: Point3<f64>,
    /// False when the user excluded the edge from carrying load.
    pub support_capable: bool,
    /// Downstream realization of the edge's load.
    pub mode: RepartitionMode,
    /// Physical edge length.
    pub length: f64,
    /// True when the builder swapped the mesh's endpoint order to follow the
    /// edge's local axis.
    pub(crate) reversed: bool,

    samples: Vec<f64>,
    widths: Vec<f64>,
    loaded: bool,
}

impl SupportEdge {
    /// Create an edge model with the two endpoint samples and zero widths.
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        id: EdgeId,
        start: VertexId,
        end: VertexId,
        start_position: Point3<f64>,
        end_position: Point3<f64>,
        support_capable: bool,
        mode: RepartitionMode,
        reversed: bool,
    ) -> Self {
        let length = (end_position - start_position).norm();
        Self {
            id,
            start,
            end,
            start_position,
            end_position,
            support_capable,
            mode,
            length,
            reversed,
            samples: vec![0.0, 1.0],
            widths: vec![0.0, 0.0],
            loaded: false,
        }
    }

    /// Insert a parameter sample, keeping the array sorted.
    ///
    /// Values outside `[0, 1]` are clamped; a value within [`SHAPE_TOL`] of
    /// an existing sample is deduplicated. The tolerance is tighter than the
    /// sweep's breakpoint-pair offset so paired step samples survive.
    /// Returns the index of the inserted (or already present) sample.
    pub fn add_point(&mut self, alpha: f64) -> usize {
        let alpha = alpha.clamp(0.0, 1.0);
        if let Some(i) = self
            .samples
            .iter()
            .position(|s| (s - alpha).abs() <= SHAPE_TOL)
        {
            return i;
        }
        let i = self.samples.partition_point(|s| *s < alpha);
        self.samples.insert(i, alpha);
        self.widths.insert(i, 0.0);
        i
    }

    /// Overwrite the tributary width at a sample index.
    pub fn set_width(&mut self, index: usize, width: f64) {
        self.widths[index] = width;
        self.loaded = true;
    }

    /// Accumulate onto the tributary width at a sample index.
    pub fn add_width(&mut self, index: usize, width: f64) {
        self.widths[index] += width;
        self.loaded = true;
    }

    /// Whether any width has been set on this edge. Once set it stays set.
    pub fn is_loaded(&self) -> bool {
        self.loaded
    }

    /// Whether breakpoints beyond the two endpoint samples exist.
    pub fn is_subdivided(&self) -> bool {
        self.samples.len() > 2
    }

    /// Parameter samples, sorted ascending from 0 to 1.
    pub fn samples(&self) -> &[f64] {
        &self.samples
    }

    /// Tributary widths, index-aligned with [`samples`](Self::samples).
    pub fn widths(&self) -> &[f64] {
        &self.widths
    }

    /// Piecewise-linear interpolation of the width profile at `x`.
    ///
    /// At the exact domain endpoints the boundary sample is returned
    /// directly; there is no extrapolation.
    pub fn width_at(&self, x: f64) -> f64 {
        let last = self.samples.len() - 1;
        if x <= self.samples[0] {
            return self.widths[0];
        }
        if x >= self.samples[last] {
            return self.widths[last];
        }
        let hi = self.samples.partition_point(|s| *s <= x);
        let lo = hi - 1;
        let span = self.samples[hi] - self.samples[lo];
        if span <= f64::EPSILON {
            return self.widths[hi];
        }
        let t = (x - self.samples[lo]) / span;
        self.widths[lo] + t * (self.widths[hi] - self.widths[lo])
    }

    /// Local derivative of the width profile at `x`.
    ///
    /// At the domain endpoints this is the one-sided derivative of the
    /// nearest segment; at an interior breakpoint, the right-hand segment's.
    pub fn slope_at(&self, x: f64) -> f64 {
        let n = self.samples.len();
        let (lo, hi) = if x <= self.samples[0] {
            (0, 1)
        } else if x >= self.samples[n - 1] {
            (n - 2, n - 1)
        } else {
            let hi = self.samples.partition_point(|s| *s <= x);
            (hi - 1, hi)
        };
        let span = self.samples[hi] - self.samples[lo];
        if span <= f64::EPSILON {
            0.0
        } else {
            (self.widths[hi] - self.widths[lo]) / span
        }
    }

    /// Sample points over `[x1, x2]` suitable for emitting piecewise loads,
    /// with the widths at those points.
    ///
    /// If the profile restricted to the span is constant or a single
    /// straight chord, only the two span ends are returned. Otherwise the
    /// result is a `max_divisions`-way equal grid merged with the interior
    /// breakpoints; the breakpoints keep every emitted sub-interval exactly
    /// linear in width, the grid fixes the sampling resolution for varying
    /// pressure fields. Points closer than [`COINCIDENT_TOL`] collapse to a
    /// single sample.
    pub fn discretize(&self, x1: f64, x2: f64, max_divisions: usize) -> (Vec<f64>, Vec<f64>) {
        let (lo, hi) = if x1 <= x2 { (x1, x2) } else { (x2, x1) };

        let mut points: Vec<f64> = Vec::new();
        if hi - lo <= COINCIDENT_TOL {
            points.push(lo);
        } else if self.is_linear_over(lo, hi) {
            points.push(lo);
            points.push(hi);
        } else {
            let divisions = max_divisions.max(1);
            for k in 0..=divisions {
                points.push(lo + (hi - lo) * k as f64 / divisions as f64);
            }
            for &s in &self.samples {
                if s > lo + COINCIDENT_TOL && s < hi - COINCIDENT_TOL {
                    points.push(s);
                }
            }
            points.sort_by(|a, b| a.total_cmp(b));
            points.dedup_by(|b, a| (*b - *a).abs() <= COINCIDENT_TOL);
        }

        let widths = points.iter().map(|&p| self.width_at(p)).collect();
        (points, widths)
    }

    /// Whether the profile is a single straight chord over `[lo, hi]`.
    fn is_linear_over(&self, lo: f64, hi: f64) -> bool {
        let w_lo = self.width_at(lo);
        let w_hi = self.width_at(hi);
        let span = hi - lo;
        self.samples
            .iter()
            .filter(|&&s| s > lo && s < hi)
            .all(|&s| {
                let chord = w_lo + (s - lo) / span * (w_hi - w_lo);
                (self.width_at(s) - chord).abs() <= SHAPE_TOL
            })
    }

    /// Unit direction from `start` to `end`.
    pub fn direction(&self) -> Vector3<f64> {
        (self.end_position - self.start_position) / self.length
    }

    /// World position at parameter `x`.
    pub fn position_at(&self, x: f64) -> Point3<f64> {
        self.start_position + (self.end_position - self.start_position) * x
    }

    /// Map a parameter given in the mesh edge's own vertex order into this
    /// model's oriented domain.
    pub(crate) fn to_model_param(&self, mesh_param: f64) -> f64 {
        if self.reversed {
            1.0 - mesh_param
        } else {
            mesh_param
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn unit_edge() -> SupportEdge {
        SupportEdge::new(
            EdgeId(0),
            VertexId(0),
            VertexId(1),
            Point3::new(0.0, 0.0, 0.0),
            Point3::new(2.0, 0.0, 0.0),
            true,
            RepartitionMode::ElementLoad,
            false,
        )
    }

    #[test]
    fn test_samples_stay_sorted_and_bounded() {
        let mut edge = unit_edge();
        for alpha in [0.7, 0.3, 0.3000000001, -0.5, 1.5, 0.5, 0.0] {
            edge.add_point(alpha);
        }
        let samples = edge.samples();
        assert_eq!(samples[0], 0.0);
        assert_eq!(*samples.last().unwrap(), 1.0);
        for pair in samples.windows(2) {
            assert!(pair[0] < pair[1]);
        }
        // 0.3000000001 deduplicated against 0.3, -0.5 and 1.5 clamped onto
        // the existing endpoint samples
        assert_eq!(samples.len(), 5);
    }

    #[test]
    fn test_add_point_returns_existing_index() {
        let mut edge = unit_edge();
        let i = edge.add_point(0.5);
        let j = edge.add_point(0.5 + 1e-9);
        assert_eq!(i, j);
    }

    #[test]
    fn test_breakpoint_pairs_survive_dedup() {
        let mut edge = unit_edge();
        let lo = edge.add_point(0.5 - 1e-7);
        let hi = edge.add_point(0.5 + 1e-7);
        assert_ne!(lo, hi);
        assert_eq!(edge.samples().len(), 4);
    }

    #[test]
    fn test_width_interpolation() {
        let mut edge = unit_edge();
        let mid = edge.add_point(0.5);
        edge.set_width(mid, 2.0);
        assert_relative_eq!(edge.width_at(0.25), 1.0);
        assert_relative_eq!(edge.width_at(0.5), 2.0);
        assert_relative_eq!(edge.width_at(0.75), 1.0);
        // endpoints return the boundary sample, no extrapolation
        assert_relative_eq!(edge.width_at(0.0), 0.0);
        assert_relative_eq!(edge.width_at(1.0), 0.0);
    }

    #[test]
    fn test_slope_one_sided_at_ends() {
        let mut edge = unit_edge();
        let mid = edge.add_point(0.5);
        edge.set_width(mid, 2.0);
        assert_relative_eq!(edge.slope_at(0.0), 4.0);
        assert_relative_eq!(edge.slope_at(1.0), -4.0);
        assert_relative_eq!(edge.slope_at(0.25), 4.0);
        assert_relative_eq!(edge.slope_at(0.75), -4.0);
    }

    #[test]
    fn test_loaded_is_sticky() {
        let mut edge = unit_edge();
        assert!(!edge.is_loaded());
        edge.set_width(0, 0.0);
        assert!(edge.is_loaded());
        edge.add_width(1, 0.0);
        assert!(edge.is_loaded());
    }

    #[test]
    fn test_subdivision_flag() {
        let mut edge = unit_edge();
        assert!(!edge.is_subdivided());
        edge.add_point(0.5);
        assert!(edge.is_subdivided());
    }

    #[test]
    fn test_discretize_linear_span_is_two_points() {
        let mut edge = unit_edge();
        edge.set_width(0, 1.0);
        edge.set_width(1, 3.0);
        let (points, widths) = edge.discretize(0.0, 1.0, 10);
        assert_eq!(points, vec![0.0, 1.0]);
        assert_eq!(widths, vec![1.0, 3.0]);
    }

    #[test]
    fn test_discretize_constant_span_with_interior_breakpoint() {
        let mut edge = unit_edge();
        edge.set_width(0, 2.0);
        edge.set_width(1, 2.0);
        let mid = edge.add_point(0.5);
        edge.set_width(mid, 2.0);
        // constant across the breakpoint, so no subdivision
        let (points, _) = edge.discretize(0.0, 1.0, 10);
        assert_eq!(points, vec![0.0, 1.0]);
    }

    #[test]
    fn test_discretize_kinked_span_keeps_breakpoints() {
        let mut edge = unit_edge();
        let mid = edge.add_point(0.25);
        edge.set_width(mid, 1.0);
        let (points, widths) = edge.discretize(0.0, 1.0, 4);
        // equal grid {0, .25, .5, .75, 1} with the breakpoint collapsing
        // onto the grid point
        assert_eq!(points.len(), 5);
        assert_relative_eq!(points[1], 0.25);
        assert_relative_eq!(widths[1], 1.0);
    }

    #[test]
    fn test_discretize_merges_off_grid_breakpoints() {
        let mut edge = unit_edge();
        let a = edge.add_point(0.15);
        edge.set_width(a, 1.0);
        let (points, _) = edge.discretize(0.0, 1.0, 4);
        // grid {0, .25, .5, .75, 1} plus the 0.15 breakpoint
        assert_eq!(points.len(), 6);
        assert!(points.iter().any(|&p| (p - 0.15).abs() < 1e-12));
    }

    #[test]
    fn test_discretize_idempotent() {
        let mut edge = unit_edge();
        let a = edge.add_point(0.3);
        edge.set_width(a, 1.5);
        let first = edge.discretize(0.1, 0.9, 10);
        let second = edge.discretize(0.1, 0.9, 10);
        assert_eq!(first, second);
    }

    #[test]
    fn test_discretize_collapses_zero_span() {
        let edge = unit_edge();
        let (points, widths) = edge.discretize(0.5, 0.5 + 1e-9, 10);
        assert_eq!(points.len(), 1);
        assert_eq!(widths.len(), 1);
    }

    #[test]
    fn test_reversed_parameter_mapping() {
        let mut edge = unit_edge();
        edge.reversed = true;
        assert_relative_eq!(edge.to_model_param(0.2), 0.8);
        edge.reversed = false;
        assert_relative_eq!(edge.to_model_param(0.2), 0.2);
    }
}
