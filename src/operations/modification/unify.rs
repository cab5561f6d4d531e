use crate::error::{GeometryError, OperationError, Result};
use crate::geometry::curve::{AnyCurve, Curve};

/// Re-parametrizes a curve onto `[0, target_length]` without changing its shape.
///
/// Curves lofted into one patch must share a parameter domain; unifying them
/// first makes curves authored over different native ranges combinable.
pub struct UnifyCurve<'a> {
    curve: &'a AnyCurve,
    target_length: f64,
}

impl<'a> UnifyCurve<'a> {
    /// Creates a new `UnifyCurve` operation.
    #[must_use]
    pub fn new(curve: &'a AnyCurve, target_length: f64) -> Self {
        Self {
            curve,
            target_length,
        }
    }

    /// Executes the re-parametrization.
    ///
    /// # Errors
    ///
    /// Returns an error if `target_length` is not positive and finite.
    pub fn execute(&self) -> Result<AnyCurve> {
        check_length(self.target_length)?;
        self.curve.reparametrized(0.0, self.target_length)
    }
}

/// Unifies a family of curves onto `[0, target_length]` and checks that the
/// results can feed one patch.
pub struct UnifyCurves<'a> {
    curves: &'a [AnyCurve],
    target_length: f64,
}

impl<'a> UnifyCurves<'a> {
    /// Creates a new `UnifyCurves` operation.
    #[must_use]
    pub fn new(curves: &'a [AnyCurve], target_length: f64) -> Self {
        Self {
            curves,
            target_length,
        }
    }

    /// Executes the re-parametrization of every curve.
    ///
    /// # Errors
    ///
    /// Returns an error if `target_length` is invalid, or
    /// [`GeometryError::PatchIncompatible`] if the unified curves still differ
    /// in structure.
    pub fn execute(&self) -> Result<Vec<AnyCurve>> {
        check_length(self.target_length)?;
        let unified: Vec<AnyCurve> = self
            .curves
            .iter()
            .map(|c| c.reparametrized(0.0, self.target_length))
            .collect::<Result<_>>()?;
        if let Some(first) = unified.first() {
            if let Some(index) = unified.iter().position(|c| !first.is_compatible(c)) {
                return Err(GeometryError::PatchIncompatible(format!(
                    "curve {index} differs from curve 0 after unification (domain {:?})",
                    unified[index].domain()
                ))
                .into());
            }
        }
        Ok(unified)
    }
}

fn check_length(target_length: f64) -> Result<()> {
    if !(target_length.is_finite() && target_length > 0.0) {
        return Err(OperationError::InvalidInput(format!(
            "target length must be positive, got {target_length}"
        ))
        .into());
    }
    Ok(())
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::geometry::curve::{euclidean_control_points, BsplineCurve};
    use crate::math::Point3;

    fn curve_on(lo: f64, hi: f64, y: f64) -> AnyCurve {
        BsplineCurve::clamped(
            euclidean_control_points(&[
                Point3::new(0.0, y, 0.0),
                Point3::new(1.0, y, 1.0),
                Point3::new(2.0, y, 0.0),
            ]),
            vec![lo, lo, lo, hi, hi, hi],
            2,
        )
        .unwrap()
        .into()
    }

    #[test]
    fn unify_preserves_shape() {
        let c = curve_on(2.0, 6.0, 0.0);
        let u = UnifyCurve::new(&c, 1.0).execute().unwrap();
        let d = u.domain();
        assert!(d.t_min.abs() < 1e-12 && (d.t_max - 1.0).abs() < 1e-12);
        for i in 0..=8 {
            let s = f64::from(i) / 8.0;
            let a = c.evaluate(2.0 + 4.0 * s).unwrap();
            let b = u.evaluate(s).unwrap();
            assert!((a - b).norm() < 1e-12);
        }
    }

    #[test]
    fn unify_family_makes_curves_compatible() {
        let curves = vec![curve_on(0.0, 1.0, 0.0), curve_on(3.0, 5.0, 1.0)];
        assert!(!curves[0].is_compatible(&curves[1]));
        let unified = UnifyCurves::new(&curves, 2.0).execute().unwrap();
        assert!(unified[0].is_compatible(&unified[1]));
    }

    #[test]
    fn unify_family_reports_structural_mismatch() {
        let other: AnyCurve = BsplineCurve::clamped_uniform(
            euclidean_control_points(&[Point3::origin(), Point3::new(1.0, 0.0, 0.0)]),
            1,
        )
        .unwrap()
        .into();
        let curves = vec![curve_on(0.0, 1.0, 0.0), other];
        assert!(UnifyCurves::new(&curves, 1.0).execute().is_err());
    }

    #[test]
    fn rejects_non_positive_length() {
        let c = curve_on(0.0, 1.0, 0.0);
        assert!(UnifyCurve::new(&c, 0.0).execute().is_err());
        assert!(UnifyCurve::new(&c, -2.0).execute().is_err());
    }
}
