use crate::error::{GeometryError, Result};
use crate::geometry::curve::{
    AnyCurve, BezierSegment, BsplineCurve, CompositeBezier, Curve, CurveDomain, KnotVector,
};
use crate::math::Vector4;

/// Recipe turning one homogeneous point per generator curve into a cross curve.
#[derive(Debug, Clone, PartialEq)]
pub enum CurveConstructor {
    /// B-spline with a fixed knot vector; accepts exactly
    /// `knots.len() - order - 1` points.
    Bspline { order: usize, knots: KnotVector },
    /// Single Bezier segment of any degree over `domain`.
    Bezier { domain: CurveDomain },
}

impl CurveConstructor {
    /// Clamped uniform B-spline of `order` over `count` points on `[0, 1]`.
    ///
    /// # Errors
    ///
    /// Returns an error if `count <= order`.
    pub fn clamped_uniform(count: usize, order: usize) -> Result<Self> {
        Ok(Self::Bspline {
            order,
            knots: KnotVector::clamped_uniform(count, order)?,
        })
    }

    /// Single Bezier segment over `[0, 1]`.
    #[must_use]
    pub fn bezier() -> Self {
        Self::Bezier {
            domain: CurveDomain::new(0.0, 1.0),
        }
    }

    /// Recovers the constructor that rebuilds `curve` from its control points.
    ///
    /// # Errors
    ///
    /// Returns [`GeometryError::PatchIncompatible`] for multi-segment Bezier chains.
    pub fn from_curve(curve: &AnyCurve) -> Result<Self> {
        match curve {
            AnyCurve::Bspline(c) => Ok(Self::Bspline {
                order: c.order(),
                knots: c.knots().clone(),
            }),
            AnyCurve::Bezier(c) if c.segments().len() == 1 => Ok(Self::Bezier {
                domain: c.domain(),
            }),
            AnyCurve::Bezier(c) => Err(GeometryError::PatchIncompatible(format!(
                "cross curve has {} Bezier segments, expected 1",
                c.segments().len()
            ))
            .into()),
        }
    }

    /// Number of points the constructor requires, if fixed.
    #[must_use]
    pub fn point_count(&self) -> Option<usize> {
        match self {
            Self::Bspline { order, knots } => {
                Some(knots.len().saturating_sub(order.saturating_add(1)))
            }
            Self::Bezier { .. } => None,
        }
    }

    /// Parameter range of the curves this constructor builds.
    ///
    /// An unvalidated B-spline constructor whose knots are too short for its
    /// order reports the empty range `[0, 0]`.
    #[must_use]
    pub fn domain(&self) -> CurveDomain {
        match self {
            Self::Bspline { order, knots } => {
                let k = knots.as_slice();
                let count = self.point_count().unwrap_or(0);
                match (k.get(*order), k.get(count)) {
                    (Some(&lo), Some(&hi)) if count > *order => CurveDomain::new(lo, hi),
                    _ => CurveDomain::new(0.0, 0.0),
                }
            }
            Self::Bezier { domain } => *domain,
        }
    }

    /// Checks that the constructor can build a curve at all.
    ///
    /// # Errors
    ///
    /// Returns [`GeometryError::Degenerate`] for an order of zero or an empty
    /// or non-finite domain, and [`GeometryError::MalformedKnotVector`] if the
    /// knots leave no room for more than `order` control points.
    pub fn validate(&self) -> Result<()> {
        match self {
            Self::Bspline { order, knots } => {
                let count = self.point_count().unwrap_or(0);
                if count == 0 {
                    return Err(GeometryError::MalformedKnotVector {
                        expected: order.saturating_mul(2).saturating_add(2),
                        actual: knots.len(),
                    }
                    .into());
                }
                BsplineCurve::from_parts(vec![Vector4::zeros(); count], knots.clone(), *order)
                    .map(|_| ())
            }
            Self::Bezier { domain } => {
                let finite = domain.t_min.is_finite() && domain.t_max.is_finite();
                if finite && domain.t_min < domain.t_max {
                    Ok(())
                } else {
                    Err(GeometryError::Degenerate(format!(
                        "Bezier cross domain [{}, {}] is empty",
                        domain.t_min, domain.t_max
                    ))
                    .into())
                }
            }
        }
    }

    /// Builds the cross curve through `points`.
    ///
    /// # Errors
    ///
    /// Returns an error if the point count does not suit the constructor.
    pub fn build(&self, points: Vec<Vector4>) -> Result<AnyCurve> {
        match self {
            Self::Bspline { order, knots } => {
                Ok(BsplineCurve::from_parts(points, knots.clone(), *order)?.into())
            }
            Self::Bezier { domain } => Ok(CompositeBezier::with_breaks(
                vec![BezierSegment::new(points)?],
                vec![domain.t_min, domain.t_max],
            )?
            .into()),
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::math::{Point3, TOLERANCE};

    fn column() -> Vec<Vector4> {
        vec![
            Vector4::new(0.0, 0.0, 0.0, 1.0),
            Vector4::new(0.0, 1.0, 1.0, 1.0),
            Vector4::new(0.0, 2.0, 0.0, 1.0),
        ]
    }

    #[test]
    fn bspline_constructor_counts() {
        let c = CurveConstructor::clamped_uniform(3, 2).unwrap();
        assert_eq!(c.point_count(), Some(3));
        assert!(c.build(column()).is_ok());
        assert!(c.build(column()[..2].to_vec()).is_err());
    }

    #[test]
    fn bezier_constructor_accepts_any_count() {
        let c = CurveConstructor::bezier();
        assert_eq!(c.point_count(), None);
        let curve = c.build(column()).unwrap();
        assert!((curve.evaluate(0.5).unwrap() - Point3::new(0.0, 1.0, 0.5)).norm() < TOLERANCE);
        assert!(c.build(column()[..1].to_vec()).is_err());
    }

    #[test]
    fn validate_rejects_unbuildable_constructors() {
        assert!(CurveConstructor::clamped_uniform(3, 2).unwrap().validate().is_ok());
        assert!(CurveConstructor::bezier().validate().is_ok());

        let order_zero = CurveConstructor::clamped_uniform(2, 0).unwrap();
        assert!(matches!(
            order_zero.validate(),
            Err(crate::NurbformError::Geometry(GeometryError::Degenerate(_)))
        ));
        let short = CurveConstructor::Bspline {
            order: 3,
            knots: KnotVector::new(vec![0.0, 0.0, 1.0, 1.0]).unwrap(),
        };
        assert!(short.validate().is_err());
        assert_eq!(short.domain(), CurveDomain::new(0.0, 0.0));
        let flat = CurveConstructor::Bspline {
            order: 1,
            knots: KnotVector::new(vec![0.0, 0.0, 0.0, 0.0]).unwrap(),
        };
        assert!(flat.validate().is_err());
        let reversed = CurveConstructor::Bezier {
            domain: CurveDomain::new(1.0, 0.0),
        };
        assert!(reversed.validate().is_err());
    }

    #[test]
    fn recovers_constructor_from_curve() {
        let c = CurveConstructor::clamped_uniform(3, 2).unwrap();
        let curve = c.build(column()).unwrap();
        assert_eq!(CurveConstructor::from_curve(&curve).unwrap(), c);
        let d = c.domain();
        assert!((d.t_min).abs() < TOLERANCE && (d.t_max - 1.0).abs() < TOLERANCE);
    }
}
