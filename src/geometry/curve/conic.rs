use std::f64::consts::FRAC_1_SQRT_2;

use crate::error::{GeometryError, Result};
use crate::math::{Point3, TOLERANCE};

use super::{BezierSegment, CompositeBezier};

/// Exact circle in the XY plane through `center + (radius, 0, 0)`,
/// running counter-clockwise over `[0, 1]`.
///
/// # Errors
///
/// Returns an error if `radius` is not positive.
pub fn circle(center: Point3, radius: f64) -> Result<CompositeBezier> {
    ellipse(center, radius, radius)
}

/// Exact axis-aligned ellipse in the XY plane built from four rational
/// quarter arcs with middle weight `sqrt(2) / 2`.
///
/// # Errors
///
/// Returns an error if either semi-axis is not positive and finite.
pub fn ellipse(center: Point3, rx: f64, ry: f64) -> Result<CompositeBezier> {
    let valid = |r: f64| r.is_finite() && r >= TOLERANCE;
    if !(valid(rx) && valid(ry)) {
        return Err(GeometryError::Degenerate(format!(
            "ellipse semi-axes must be positive and finite, got {rx} x {ry}"
        ))
        .into());
    }
    let at = |x: f64, y: f64| Point3::new(center.x + x * rx, center.y + y * ry, center.z);
    let quadrants = [
        (at(1.0, 0.0), at(1.0, 1.0), at(0.0, 1.0)),
        (at(0.0, 1.0), at(-1.0, 1.0), at(-1.0, 0.0)),
        (at(-1.0, 0.0), at(-1.0, -1.0), at(0.0, -1.0)),
        (at(0.0, -1.0), at(1.0, -1.0), at(1.0, 0.0)),
    ];
    CompositeBezier::new(
        quadrants
            .into_iter()
            .map(|(a, b, c)| BezierSegment::rational_quadratic(a, b, FRAC_1_SQRT_2, c))
            .collect(),
    )
}
