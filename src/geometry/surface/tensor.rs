use crate::error::{GeometryError, Result};
use crate::geometry::curve::{rational_derivative, AnyCurve, Curve};
use crate::geometry::Transformable;
use crate::math::{Matrix4, Point3, Vector3, Vector4, TOLERANCE};

use super::{CurveConstructor, Surface, SurfaceDomain};

/// A tensor-product patch built as a curve of curves.
///
/// Each generator curve runs along `u`. At a given `u`, the homogeneous
/// points of all generators become the control points of a cross curve
/// (built by the [`CurveConstructor`]) which is then evaluated at `v`.
/// For compatible rational generators this is exactly the NURBS surface
/// over their shared control net.
#[derive(Debug, Clone, PartialEq)]
pub struct TensorPatch {
    constructor: CurveConstructor,
    curves: Vec<AnyCurve>,
}

impl TensorPatch {
    /// Creates a patch from a cross-curve constructor and generator curves.
    ///
    /// # Errors
    ///
    /// Returns [`GeometryError::PatchIncompatible`] if the curves disagree in
    /// representation, control-point count or knot structure, or if the
    /// constructor cannot take `curves.len()` points. Constructors that cannot
    /// build any curve fail as in [`CurveConstructor::validate`].
    pub fn new(constructor: CurveConstructor, curves: Vec<AnyCurve>) -> Result<Self> {
        constructor.validate()?;
        let Some(first) = curves.first() else {
            return Err(GeometryError::PatchIncompatible("no generator curves".into()).into());
        };
        if let Some(expected) = constructor.point_count() {
            if expected != curves.len() {
                return Err(GeometryError::PatchIncompatible(format!(
                    "constructor expects {expected} curves, got {}",
                    curves.len()
                ))
                .into());
            }
        } else if curves.len() < 2 {
            return Err(GeometryError::PatchIncompatible(format!(
                "a Bezier blend needs at least 2 curves, got {}",
                curves.len()
            ))
            .into());
        }
        if let Some(index) = curves.iter().position(|c| !first.is_compatible(c)) {
            return Err(GeometryError::PatchIncompatible(format!(
                "curve {index} does not match the structure of curve 0"
            ))
            .into());
        }
        log::debug!(
            "tensor patch: {} generators x {} control points",
            curves.len(),
            first.control_points().len()
        );
        Ok(Self { constructor, curves })
    }

    /// Patch whose cross direction is a clamped uniform B-spline of `order`
    /// through the given curves, e.g. five hull sections from deck to deck.
    ///
    /// # Errors
    ///
    /// Returns an error if there are not more curves than `order` or the
    /// curves are incompatible.
    pub fn clamped_uniform_bspline(curves: Vec<AnyCurve>, order: usize) -> Result<Self> {
        let constructor = CurveConstructor::clamped_uniform(curves.len(), order)
            .map_err(|e| GeometryError::PatchIncompatible(e.to_string()))?;
        Self::new(constructor, curves)
    }

    /// Linear blend between exactly two curves.
    ///
    /// # Errors
    ///
    /// Returns an error unless exactly two compatible curves are given.
    pub fn bezier(curves: Vec<AnyCurve>) -> Result<Self> {
        if curves.len() != 2 {
            return Err(GeometryError::PatchIncompatible(format!(
                "a Bezier patch needs exactly 2 curves, got {}",
                curves.len()
            ))
            .into());
        }
        Self::new(CurveConstructor::bezier(), curves)
    }

    /// Returns the generator curves.
    #[must_use]
    pub fn curves(&self) -> &[AnyCurve] {
        &self.curves
    }

    /// Returns the cross-curve constructor.
    #[must_use]
    pub fn constructor(&self) -> &CurveConstructor {
        &self.constructor
    }

    /// The cross curve at `u`, running along `v`.
    ///
    /// # Errors
    ///
    /// Returns an error if `u` is outside the generator domain.
    pub fn cross_curve(&self, u: f64) -> Result<AnyCurve> {
        let points = self
            .curves
            .iter()
            .map(|c| c.evaluate_homogeneous(u))
            .collect::<Result<Vec<_>>>()?;
        self.constructor.build(points)
    }

    /// Evaluates the patch at `(u, v)` without dividing by the weight.
    ///
    /// # Errors
    ///
    /// Returns an error if `u` or `v` is out of range.
    pub fn evaluate_homogeneous(&self, u: f64, v: f64) -> Result<Vector4> {
        self.cross_curve(u)?.evaluate_homogeneous(v)
    }
}

impl Surface for TensorPatch {
    fn evaluate(&self, u: f64, v: f64) -> Result<Point3> {
        self.cross_curve(u)?.evaluate(v)
    }

    fn normal(&self, u: f64, v: f64) -> Result<Vector3> {
        let cross = self.cross_curve(u)?;
        let a = cross.evaluate_homogeneous(v)?;
        let a_v = cross.derivative_homogeneous(v)?;
        let du_points = self
            .curves
            .iter()
            .map(|c| c.derivative_homogeneous(u))
            .collect::<Result<Vec<_>>>()?;
        let a_u = self.constructor.build(du_points)?.evaluate_homogeneous(v)?;

        let s_u = rational_derivative(&a, &a_u)?;
        let s_v = rational_derivative(&a, &a_v)?;
        let n = s_u.cross(&s_v);
        let len = n.norm();
        if len < TOLERANCE {
            return Err(GeometryError::ZeroVector.into());
        }
        Ok(n / len)
    }

    fn domain(&self) -> SurfaceDomain {
        SurfaceDomain::from_curves(self.curves[0].domain(), self.constructor.domain())
    }
}

impl Transformable for TensorPatch {
    fn linear_transform(&self, matrix: &Matrix4) -> Self {
        Self {
            constructor: self.constructor.clone(),
            curves: self
                .curves
                .iter()
                .map(|c| c.linear_transform(matrix))
                .collect(),
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::geometry::curve::{
        circle, euclidean_control_points, BezierSegment, BsplineCurve, CompositeBezier,
    };
    use crate::math::translation;

    fn p(x: f64, y: f64, z: f64) -> Point3 {
        Point3::new(x, y, z)
    }

    fn line(z: f64) -> AnyCurve {
        BsplineCurve::clamped_uniform(
            euclidean_control_points(&[p(0.0, 0.0, z), p(4.0, 0.0, z)]),
            1,
        )
        .unwrap()
        .into()
    }

    fn section(y: f64, depth: f64) -> AnyCurve {
        BsplineCurve::clamped_uniform(
            euclidean_control_points(&[
                p(-1.0, y, 0.0),
                p(-0.5, y, -depth),
                p(0.0, y, -depth * 1.2),
                p(0.5, y, -depth),
                p(1.0, y, 0.0),
            ]),
            2,
        )
        .unwrap()
        .into()
    }

    #[test]
    fn bezier_patch_blends_linearly() {
        let patch = TensorPatch::bezier(vec![line(0.0), line(10.0)]).unwrap();
        let pt = patch.evaluate(0.5, 0.25).unwrap();
        assert!((pt - p(2.0, 0.0, 2.5)).norm() < TOLERANCE);
    }

    #[test]
    fn bezier_patch_needs_two_curves() {
        let r = TensorPatch::bezier(vec![line(0.0), line(1.0), line(2.0)]);
        assert!(matches!(
            r,
            Err(crate::NurbformError::Geometry(GeometryError::PatchIncompatible(_)))
        ));
    }

    #[test]
    fn rejects_mismatched_control_counts() {
        let short = line(0.0);
        let long: AnyCurve = BsplineCurve::clamped_uniform(
            euclidean_control_points(&[p(0.0, 0.0, 1.0), p(2.0, 0.0, 1.0), p(4.0, 0.0, 1.0)]),
            1,
        )
        .unwrap()
        .into();
        assert!(TensorPatch::bezier(vec![short, long]).is_err());
    }

    #[test]
    fn rejects_mixed_representations() {
        let bez: AnyCurve = CompositeBezier::new(vec![BezierSegment::linear(
            p(0.0, 0.0, 1.0),
            p(4.0, 0.0, 1.0),
        )])
        .unwrap()
        .into();
        assert!(TensorPatch::bezier(vec![line(0.0), bez]).is_err());
    }

    #[test]
    fn hull_from_five_sections() {
        let sections = vec![
            section(0.0, 0.2),
            section(1.0, 0.5),
            section(2.0, 0.6),
            section(3.0, 0.5),
            section(4.0, 0.2),
        ];
        let patch = TensorPatch::clamped_uniform_bspline(sections.clone(), 3).unwrap();
        let d = patch.domain();
        assert!((d.v_max - 1.0).abs() < TOLERANCE);
        // clamped in v: the v = 0 edge is the first section, v = 1 the last
        for u in [0.0, 0.3, 0.7, 1.0] {
            let a = patch.evaluate(u, 0.0).unwrap();
            assert!((a - sections[0].evaluate(u).unwrap()).norm() < 1e-12);
            let b = patch.evaluate(u, 1.0).unwrap();
            assert!((b - sections[4].evaluate(u).unwrap()).norm() < 1e-12);
        }
    }

    #[test]
    fn order_zero_cross_direction_fails_at_construction() {
        let r = TensorPatch::clamped_uniform_bspline(vec![line(0.0), line(1.0)], 0);
        assert!(matches!(
            r,
            Err(crate::NurbformError::Geometry(GeometryError::Degenerate(_)))
        ));
    }

    #[test]
    fn evaluation_outside_domain_is_reported() {
        let patch = TensorPatch::bezier(vec![line(0.0), line(10.0)]).unwrap();
        for (u, v) in [(1.5, 0.0), (-0.1, 0.5), (0.5, 1.2)] {
            assert!(matches!(
                patch.evaluate(u, v),
                Err(crate::NurbformError::Geometry(GeometryError::ParameterOutOfRange { .. }))
            ));
        }
        assert!(matches!(
            patch.normal(1.5, 0.0),
            Err(crate::NurbformError::Geometry(GeometryError::ParameterOutOfRange { .. }))
        ));
    }

    #[test]
    fn zero_weight_section_is_division_by_zero() {
        let zero_weight: AnyCurve = BsplineCurve::clamped_uniform(
            vec![Vector4::new(0.0, 0.0, 1.0, 1.0), Vector4::new(-4.0, 0.0, -1.0, -1.0)],
            1,
        )
        .unwrap()
        .into();
        let patch = TensorPatch::bezier(vec![zero_weight.clone(), zero_weight]).unwrap();
        assert!(patch.evaluate(0.25, 0.5).is_ok());
        assert!(matches!(
            patch.evaluate(0.5, 0.5),
            Err(crate::NurbformError::Geometry(GeometryError::DivisionByZero))
        ));
    }

    #[test]
    fn too_few_sections_for_order() {
        let sections = vec![section(0.0, 0.2), section(1.0, 0.2)];
        assert!(TensorPatch::clamped_uniform_bspline(sections, 2).is_err());
    }

    #[test]
    fn normal_of_flat_patch() {
        let patch = TensorPatch::bezier(vec![line(0.0), line(10.0)]).unwrap();
        // u along +x, v along +z: normal = x × z = -y
        let n = patch.normal(0.5, 0.5).unwrap();
        assert!((n - Vector3::new(0.0, -1.0, 0.0)).norm() < 1e-12);
    }

    #[test]
    fn cylinder_from_rational_circles() {
        let bottom: AnyCurve = circle(Point3::origin(), 2.0).unwrap().into();
        let top = bottom.linear_transform(&translation(0.0, 0.0, 5.0));
        let patch = TensorPatch::bezier(vec![bottom, top]).unwrap();
        for i in 0..=8 {
            let u = f64::from(i) / 8.0;
            let pt = patch.evaluate(u, 0.4).unwrap();
            assert!((pt.x.hypot(pt.y) - 2.0).abs() < 1e-12);
            assert!((pt.z - 2.0).abs() < 1e-12);
            let n = patch.normal(u, 0.4).unwrap();
            let radial = Vector3::new(pt.x, pt.y, 0.0) / 2.0;
            assert!((n.dot(&radial).abs() - 1.0).abs() < 1e-9);
        }
    }

    #[test]
    fn transform_moves_every_generator() {
        let patch = TensorPatch::bezier(vec![line(0.0), line(10.0)]).unwrap();
        let moved = patch.linear_transform(&translation(1.0, 2.0, 3.0));
        let a = patch.evaluate(0.2, 0.7).unwrap();
        let b = moved.evaluate(0.2, 0.7).unwrap();
        assert!((b - a - Vector3::new(1.0, 2.0, 3.0)).norm() < 1e-12);
        assert_eq!(patch.curves()[0].control_points()[0], Vector4::new(0.0, 0.0, 0.0, 1.0));
    }
}
