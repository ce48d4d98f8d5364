//! Geometry utilities for the tributary solver
//!
//! Shape classification, the span-direction rotation and the in-plane sweep
//! frame. Numeric comparisons go through the named tolerances below instead
//! of ad-hoc literals.

use nalgebra::{Point3, Unit, UnitQuaternion, Vector3};

use crate::error::{GeometryError, LoadGenResult};
use crate::mesh::LocalAxes;

/// Coincidence tolerance: two parameters or lengths closer than this are the
/// same sample. Also the clustering width for side-length classification.
pub const COINCIDENT_TOL: f64 = 1e-6;

/// Offset of the paired breakpoints inserted either side of a sweep
/// crossing.
pub const BREAKPOINT_OFFSET: f64 = 1e-7;

/// Shape-equality tolerance: parallelism tests, constant/linear profile
/// detection and the square side test.
pub const SHAPE_TOL: f64 = 1e-8;

/// Euclidean distance between two points in world coordinates.
pub fn distance(p: &Point3<f64>, q: &Point3<f64>) -> f64 {
    (p - q).norm()
}

/// Rectangle test on a face boundary.
///
/// A four-vertex face is rectangular when its six pairwise vertex distances
/// cluster (within [`COINCIDENT_TOL`]) into two side pairs plus a diagonal
/// pair, or one side quadruple plus a diagonal pair for a square. Any other
/// vertex count or distance pattern is not a rectangle; in particular a
/// rhombus (equal sides, unequal diagonals) fails.
pub fn is_rectangular(vertices: &[Point3<f64>]) -> bool {
    if vertices.len() != 4 {
        return false;
    }

    let mut dists = Vec::with_capacity(6);
    for i in 0..4 {
        for j in (i + 1)..4 {
            dists.push(distance(&vertices[i], &vertices[j]));
        }
    }
    dists.sort_by(|a, b| a.total_cmp(b));

    // Cluster the sorted distances into groups of coincident values.
    let mut counts: Vec<usize> = Vec::new();
    let mut anchor = dists[0];
    let mut count = 0usize;
    for &d in &dists {
        if d - anchor <= COINCIDENT_TOL {
            count += 1;
        } else {
            counts.push(count);
            anchor = d;
            count = 1;
        }
    }
    counts.push(count);

    // Ascending order, so the final cluster holds the diagonals.
    matches!(counts.as_slice(), [4, 2] | [2, 2, 2])
}

/// Unit span direction of a floor in world coordinates.
///
/// The face's local x-axis rotated in-plane about its normal. The stored
/// direction angle is twice the rotation applied to the axis.
pub fn span_direction(axes: &LocalAxes, direction_deg: f64) -> LoadGenResult<Vector3<f64>> {
    let axis = Unit::try_new(axes.z, SHAPE_TOL).ok_or(GeometryError::ZeroVector)?;
    let rotation = UnitQuaternion::from_axis_angle(&axis, (direction_deg / 2.0).to_radians());
    Ok(rotation * axes.x)
}

/// In-plane frame for the general sweep: local y is the span direction,
/// local x the in-plane perpendicular.
#[derive(Debug, Clone, Copy)]
pub struct SweepFrame {
    origin: Point3<f64>,
    x_axis: Vector3<f64>,
    y_axis: Vector3<f64>,
}

impl SweepFrame {
    /// Build the frame from the span direction and the face normal.
    pub fn new(origin: Point3<f64>, span: Vector3<f64>, normal: Vector3<f64>) -> Self {
        Self {
            origin,
            x_axis: span.cross(&normal),
            y_axis: span,
        }
    }

    /// Project a world point into `(x, y)` frame coordinates.
    pub fn project(&self, p: &Point3<f64>) -> (f64, f64) {
        let diff = p - self.origin;
        (diff.dot(&self.x_axis), diff.dot(&self.y_axis))
    }
}

/// Sine of the angle between two unit directions.
pub fn sin_between(a: &Vector3<f64>, b: &Vector3<f64>) -> f64 {
    a.cross(b).norm()
}

/// Whether two unit directions are parallel or anti-parallel.
pub fn is_parallel(a: &Vector3<f64>, b: &Vector3<f64>) -> bool {
    sin_between(a, b) < SHAPE_TOL
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn quad(coords: [[f64; 3]; 4]) -> Vec<Point3<f64>> {
        coords
            .iter()
            .map(|c| Point3::new(c[0], c[1], c[2]))
            .collect()
    }

    #[test]
    fn test_distance() {
        let p = Point3::new(0.0, 0.0, 0.0);
        let q = Point3::new(3.0, 4.0, 0.0);
        assert_relative_eq!(distance(&p, &q), 5.0);
    }

    #[test]
    fn test_unit_square_is_rectangular() {
        let v = quad([[0.0, 0.0, 0.0], [1.0, 0.0, 0.0], [1.0, 1.0, 0.0], [0.0, 1.0, 0.0]]);
        assert!(is_rectangular(&v));
    }

    #[test]
    fn test_3x4_rectangle_is_rectangular() {
        let v = quad([[0.0, 0.0, 0.0], [3.0, 0.0, 0.0], [3.0, 4.0, 0.0], [0.0, 4.0, 0.0]]);
        assert!(is_rectangular(&v));
    }

    #[test]
    fn test_parallelogram_is_not_rectangular() {
        // Unequal diagonals.
        let v = quad([[0.0, 0.0, 0.0], [3.0, 0.0, 0.0], [4.0, 2.0, 0.0], [1.0, 2.0, 0.0]]);
        assert!(!is_rectangular(&v));
    }

    #[test]
    fn test_rhombus_is_not_rectangular() {
        // All sides 5, diagonals 8 and 6.
        let v = quad([[0.0, 0.0, 0.0], [4.0, 3.0, 0.0], [8.0, 0.0, 0.0], [4.0, -3.0, 0.0]]);
        assert!(!is_rectangular(&v));
    }

    #[test]
    fn test_triangle_is_not_rectangular() {
        let v = vec![
            Point3::new(0.0, 0.0, 0.0),
            Point3::new(1.0, 0.0, 0.0),
            Point3::new(0.0, 1.0, 0.0),
        ];
        assert!(!is_rectangular(&v));
    }

    fn xy_axes() -> LocalAxes {
        LocalAxes {
            x: Vector3::x(),
            y: Vector3::y(),
            z: Vector3::z(),
        }
    }

    #[test]
    fn test_span_direction_zero_angle() {
        let dir = span_direction(&xy_axes(), 0.0).unwrap();
        assert_relative_eq!(dir.x, 1.0, epsilon = 1e-12);
        assert_relative_eq!(dir.y, 0.0, epsilon = 1e-12);
    }

    #[test]
    fn test_span_direction_halves_the_angle() {
        // A stored 180 degrees rotates the axis by 90.
        let dir = span_direction(&xy_axes(), 180.0).unwrap();
        assert_relative_eq!(dir.x, 0.0, epsilon = 1e-12);
        assert_relative_eq!(dir.y, 1.0, epsilon = 1e-12);

        let dir = span_direction(&xy_axes(), 90.0).unwrap();
        let s = std::f64::consts::FRAC_1_SQRT_2;
        assert_relative_eq!(dir.x, s, epsilon = 1e-12);
        assert_relative_eq!(dir.y, s, epsilon = 1e-12);
    }

    #[test]
    fn test_sweep_frame_projection() {
        let frame = SweepFrame::new(Point3::new(1.0, 1.0, 0.0), Vector3::y(), Vector3::z());
        let (x, y) = frame.project(&Point3::new(3.0, 4.0, 0.0));
        assert_relative_eq!(x, 2.0, epsilon = 1e-12);
        assert_relative_eq!(y, 3.0, epsilon = 1e-12);
    }

    #[test]
    fn test_parallel_detection() {
        assert!(is_parallel(&Vector3::x(), &-Vector3::x()));
        assert!(!is_parallel(&Vector3::x(), &Vector3::y()));
    }
}
