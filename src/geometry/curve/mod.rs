mod bezier;
mod bspline;
mod conic;
mod knot_vector;

pub use bezier::{BezierSegment, CompositeBezier};
pub use bspline::{euclidean_control_points, BsplineCurve};
pub use conic::{circle, ellipse};
pub use knot_vector::KnotVector;

use crate::error::{GeometryError, OperationError, Result};
use crate::geometry::Transformable;
use crate::math::{project, Matrix4, Point3, Vector3, Vector4, TOLERANCE};

/// Parameter domain for a curve.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CurveDomain {
    /// Start of the parameter range.
    pub t_min: f64,
    /// End of the parameter range.
    pub t_max: f64,
}

impl CurveDomain {
    /// Creates a new curve domain.
    #[must_use]
    pub fn new(t_min: f64, t_max: f64) -> Self {
        Self { t_min, t_max }
    }

    /// Length of the parameter range.
    #[must_use]
    pub fn span(&self) -> f64 {
        self.t_max - self.t_min
    }

    /// Maps a fraction in `[0, 1]` onto the domain.
    #[must_use]
    pub fn lerp(&self, s: f64) -> f64 {
        self.t_min + s * self.span()
    }

    /// Checks that `t` lies inside the domain.
    ///
    /// # Errors
    ///
    /// Returns [`GeometryError::ParameterOutOfRange`] otherwise.
    pub fn check(&self, parameter: &'static str, t: f64) -> Result<()> {
        if !(self.t_min..=self.t_max).contains(&t) {
            return Err(GeometryError::ParameterOutOfRange {
                parameter,
                value: t,
                min: self.t_min,
                max: self.t_max,
            }
            .into());
        }
        Ok(())
    }
}

/// Rejects target ranges that are reversed, empty or not finite.
pub(crate) fn check_target_range(t_min: f64, t_max: f64) -> Result<()> {
    if !(t_min.is_finite() && t_max.is_finite() && t_min < t_max) {
        return Err(OperationError::InvalidInput(format!(
            "target range [{t_min}, {t_max}] must be finite and non-empty"
        ))
        .into());
    }
    Ok(())
}

/// Trait for rational parametric curves in 3D space.
///
/// Implementors blend homogeneous control points; the provided methods
/// project to Euclidean space at the very end.
pub trait Curve {
    /// Evaluates the curve at `t` without dividing by the weight.
    ///
    /// # Errors
    ///
    /// Returns an error if `t` is outside the curve domain.
    fn evaluate_homogeneous(&self, t: f64) -> Result<Vector4>;

    /// First derivative of the homogeneous curve at `t`.
    ///
    /// # Errors
    ///
    /// Returns an error if `t` is outside the curve domain.
    fn derivative_homogeneous(&self, t: f64) -> Result<Vector4>;

    /// Returns the parameter domain of the curve.
    fn domain(&self) -> CurveDomain;

    /// Evaluates the curve at parameter `t`, returning the 3D point.
    ///
    /// # Errors
    ///
    /// Returns an error if `t` is out of range or the interpolated weight is zero.
    fn evaluate(&self, t: f64) -> Result<Point3> {
        project(&self.evaluate_homogeneous(t)?)
    }

    /// Computes the (unnormalized) tangent vector at parameter `t`.
    ///
    /// # Errors
    ///
    /// Returns an error if `t` is out of range or the weight vanishes.
    fn tangent(&self, t: f64) -> Result<Vector3> {
        let a = self.evaluate_homogeneous(t)?;
        let da = self.derivative_homogeneous(t)?;
        rational_derivative(&a, &da)
    }

    /// Returns whether the curve starts and ends at the same point.
    fn is_closed(&self) -> bool {
        let d = self.domain();
        match (self.evaluate(d.t_min), self.evaluate(d.t_max)) {
            (Ok(a), Ok(b)) => (a - b).norm() < TOLERANCE,
            _ => false,
        }
    }
}

/// Quotient rule: derivative of `a.xyz / a.w` given `a` and its derivative.
pub(crate) fn rational_derivative(a: &Vector4, da: &Vector4) -> Result<Vector3> {
    if a.w.abs() < TOLERANCE {
        return Err(GeometryError::DivisionByZero.into());
    }
    let point = a.xyz() / a.w;
    Ok((da.xyz() - point * da.w) / a.w)
}

/// A curve of any supported representation.
#[derive(Debug, Clone, PartialEq)]
pub enum AnyCurve {
    Bspline(BsplineCurve),
    Bezier(CompositeBezier),
}

impl AnyCurve {
    /// Flattened homogeneous control points.
    ///
    /// Bezier segments contribute all of their points in order, shared
    /// segment endpoints included.
    #[must_use]
    pub fn control_points(&self) -> Vec<Vector4> {
        match self {
            AnyCurve::Bspline(c) => c.control_points().to_vec(),
            AnyCurve::Bezier(c) => c.control_points(),
        }
    }

    /// Rebuilds the curve with the same structure and new control points.
    ///
    /// # Errors
    ///
    /// Returns an error if the point count does not match the structure.
    pub fn with_control_points(&self, points: Vec<Vector4>) -> Result<Self> {
        Ok(match self {
            AnyCurve::Bspline(c) => AnyCurve::Bspline(c.with_control_points(points)?),
            AnyCurve::Bezier(c) => AnyCurve::Bezier(c.with_control_points(&points)?),
        })
    }

    /// Whether both curves share representation and parametric structure.
    #[must_use]
    pub fn is_compatible(&self, other: &Self) -> bool {
        match (self, other) {
            (AnyCurve::Bspline(a), AnyCurve::Bspline(b)) => a.is_compatible(b),
            (AnyCurve::Bezier(a), AnyCurve::Bezier(b)) => a.is_compatible(b),
            _ => false,
        }
    }

    /// Restricts the curve to `[t0, t1]`, keeping parameter values.
    ///
    /// # Errors
    ///
    /// Returns an error if the interval is empty or leaves the domain.
    pub fn cut(&self, t0: f64, t1: f64) -> Result<Self> {
        Ok(match self {
            AnyCurve::Bspline(c) => AnyCurve::Bspline(c.cut(t0, t1)?),
            AnyCurve::Bezier(c) => AnyCurve::Bezier(c.cut(t0, t1)?),
        })
    }

    /// Re-parametrizes the curve onto `[t_min, t_max]`.
    ///
    /// # Errors
    ///
    /// Returns an error unless both bounds are finite and `t_min < t_max`.
    pub fn reparametrized(&self, t_min: f64, t_max: f64) -> Result<Self> {
        Ok(match self {
            AnyCurve::Bspline(c) => AnyCurve::Bspline(c.reparametrized(t_min, t_max)?),
            AnyCurve::Bezier(c) => AnyCurve::Bezier(c.reparametrized(t_min, t_max)?),
        })
    }
}

impl Curve for AnyCurve {
    fn evaluate_homogeneous(&self, t: f64) -> Result<Vector4> {
        match self {
            AnyCurve::Bspline(c) => c.evaluate_homogeneous(t),
            AnyCurve::Bezier(c) => c.evaluate_homogeneous(t),
        }
    }

    fn derivative_homogeneous(&self, t: f64) -> Result<Vector4> {
        match self {
            AnyCurve::Bspline(c) => c.derivative_homogeneous(t),
            AnyCurve::Bezier(c) => c.derivative_homogeneous(t),
        }
    }

    fn domain(&self) -> CurveDomain {
        match self {
            AnyCurve::Bspline(c) => c.domain(),
            AnyCurve::Bezier(c) => c.domain(),
        }
    }
}

impl Transformable for AnyCurve {
    fn linear_transform(&self, matrix: &Matrix4) -> Self {
        match self {
            AnyCurve::Bspline(c) => AnyCurve::Bspline(c.linear_transform(matrix)),
            AnyCurve::Bezier(c) => AnyCurve::Bezier(c.linear_transform(matrix)),
        }
    }
}

impl From<BsplineCurve> for AnyCurve {
    fn from(curve: BsplineCurve) -> Self {
        AnyCurve::Bspline(curve)
    }
}

impl From<CompositeBezier> for AnyCurve {
    fn from(curve: CompositeBezier) -> Self {
        AnyCurve::Bezier(curve)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn p(x: f64, y: f64, z: f64) -> Point3 {
        Point3::new(x, y, z)
    }

    fn line_bspline() -> AnyCurve {
        BsplineCurve::clamped_uniform(
            euclidean_control_points(&[p(0.0, 0.0, 0.0), p(2.0, 0.0, 0.0)]),
            1,
        )
        .unwrap()
            .into()
    }

    fn line_bezier() -> AnyCurve {
        CompositeBezier::new(vec![BezierSegment::linear(p(0.0, 0.0, 0.0), p(2.0, 0.0, 0.0))])
            .unwrap()
            .into()
    }

    #[test]
    fn variants_agree_on_a_line() {
        let a = line_bspline();
        let b = line_bezier();
        for t in [0.0, 0.25, 0.5, 1.0] {
            let pa = a.evaluate(t).unwrap();
            let pb = b.evaluate(t).unwrap();
            assert!((pa - pb).norm() < TOLERANCE);
        }
    }

    #[test]
    fn variants_are_not_compatible() {
        assert!(!line_bspline().is_compatible(&line_bezier()));
        assert!(line_bspline().is_compatible(&line_bspline()));
    }

    #[test]
    fn tangent_of_line() {
        let t = line_bspline().tangent(0.3).unwrap();
        assert!((t - Vector3::new(2.0, 0.0, 0.0)).norm() < 1e-12);
    }

    #[test]
    fn closed_detection() {
        assert!(!line_bspline().is_closed());
        let c: AnyCurve = circle(Point3::origin(), 1.0).unwrap().into();
        assert!(c.is_closed());
    }

    #[test]
    fn rebuild_with_new_points() {
        let c = line_bspline();
        let moved = c
            .with_control_points(vec![
                Vector4::new(0.0, 1.0, 0.0, 1.0),
                Vector4::new(2.0, 1.0, 0.0, 1.0),
            ])
            .unwrap();
        assert!((moved.evaluate(0.5).unwrap() - p(1.0, 1.0, 0.0)).norm() < TOLERANCE);
        assert!(c.with_control_points(vec![Vector4::zeros()]).is_err());
    }

    #[test]
    fn domain_check() {
        let d = CurveDomain::new(0.0, 2.0);
        assert!(d.check("t", 1.0).is_ok());
        assert!(d.check("t", 2.5).is_err());
        assert!((d.lerp(0.25) - 0.5).abs() < TOLERANCE);
    }
}
