use crate::error::{GeometryError, OperationError, Result};
use crate::geometry::Transformable;
use crate::math::{from_euclidean, to_homogeneous, Matrix4, Point3, Vector4, TOLERANCE};

use super::{check_target_range, Curve, CurveDomain};

/// A single Bezier segment over the local parameter range `[0, 1]`.
#[derive(Debug, Clone, PartialEq)]
pub struct BezierSegment {
    points: Vec<Vector4>,
}

impl BezierSegment {
    /// Creates a segment from homogeneous control points.
    ///
    /// # Errors
    ///
    /// Returns [`GeometryError::IncompatibleSegments`] if fewer than two
    /// control points are given.
    pub fn new(points: Vec<Vector4>) -> Result<Self> {
        if points.len() < 2 {
            return Err(GeometryError::IncompatibleSegments(format!(
                "a Bezier segment needs at least 2 control points, got {}",
                points.len()
            ))
            .into());
        }
        Ok(Self { points })
    }

    /// Straight segment between two Euclidean points.
    #[must_use]
    pub fn linear(a: Point3, b: Point3) -> Self {
        Self {
            points: vec![from_euclidean(&a), from_euclidean(&b)],
        }
    }

    /// Polynomial quadratic segment.
    #[must_use]
    pub fn quadratic(a: Point3, b: Point3, c: Point3) -> Self {
        Self::rational_quadratic(a, b, 1.0, c)
    }

    /// Quadratic segment whose middle control point carries `weight`.
    ///
    /// With `weight = cos(θ/2)` and a middle point at the tangent
    /// intersection this is an exact circular arc of angle `θ`.
    #[must_use]
    pub fn rational_quadratic(a: Point3, b: Point3, weight: f64, c: Point3) -> Self {
        Self {
            points: vec![
                from_euclidean(&a),
                to_homogeneous(&b, weight),
                from_euclidean(&c),
            ],
        }
    }

    /// Returns the homogeneous control points.
    #[must_use]
    pub fn points(&self) -> &[Vector4] {
        &self.points
    }

    /// Polynomial degree of the segment.
    #[must_use]
    pub fn degree(&self) -> usize {
        self.points.len() - 1
    }

    /// De Casteljau evaluation at local parameter `s`.
    #[must_use]
    pub fn evaluate_local(&self, s: f64) -> Vector4 {
        de_casteljau(&self.points, s)
    }

    /// Derivative with respect to the local parameter.
    #[must_use]
    pub fn derivative_local(&self, s: f64) -> Vector4 {
        #[allow(clippy::cast_precision_loss)]
        let n = self.degree() as f64;
        let diffs: Vec<Vector4> = self.points.windows(2).map(|w| (w[1] - w[0]) * n).collect();
        de_casteljau(&diffs, s)
    }

    /// Splits the segment at local parameter `s` into two segments that each
    /// span the full local range again.
    #[must_use]
    pub fn split(&self, s: f64) -> (Self, Self) {
        let n = self.points.len();
        let mut work = self.points.clone();
        let mut left = Vec::with_capacity(n);
        let mut right = Vec::with_capacity(n);
        left.push(work[0]);
        right.push(work[n - 1]);
        for level in 1..n {
            for i in 0..n - level {
                work[i] = work[i] * (1.0 - s) + work[i + 1] * s;
            }
            left.push(work[0]);
            right.push(work[n - 1 - level]);
        }
        right.reverse();
        (Self { points: left }, Self { points: right })
    }
}

fn de_casteljau(points: &[Vector4], s: f64) -> Vector4 {
    let mut work = points.to_vec();
    for level in 1..work.len() {
        for i in 0..work.len() - level {
            work[i] = work[i] * (1.0 - s) + work[i + 1] * s;
        }
    }
    work[0]
}

/// A chain of Bezier segments over a partitioned parameter domain.
///
/// Segment `i` owns `[breaks[i], breaks[i + 1])`; the last segment also owns
/// the domain maximum.
#[derive(Debug, Clone, PartialEq)]
pub struct CompositeBezier {
    segments: Vec<BezierSegment>,
    breaks: Vec<f64>,
}

impl CompositeBezier {
    /// Chains segments over `[0, 1]`, giving each an equal share.
    ///
    /// # Errors
    ///
    /// Returns an error if `segments` is empty.
    pub fn new(segments: Vec<BezierSegment>) -> Result<Self> {
        if segments.is_empty() {
            return Err(GeometryError::IncompatibleSegments("no segments given".into()).into());
        }
        #[allow(clippy::cast_precision_loss)]
        let count = segments.len() as f64;
        #[allow(clippy::cast_precision_loss)]
        let breaks = (0..=segments.len()).map(|i| i as f64 / count).collect();
        Ok(Self { segments, breaks })
    }

    /// Chains segments over explicit breakpoints.
    ///
    /// # Errors
    ///
    /// Returns an error if `breaks.len() != segments.len() + 1` or the
    /// breakpoints are not strictly increasing.
    pub fn with_breaks(segments: Vec<BezierSegment>, breaks: Vec<f64>) -> Result<Self> {
        if segments.is_empty() || breaks.len() != segments.len() + 1 {
            return Err(GeometryError::IncompatibleSegments(format!(
                "{} segments need {} breakpoints, got {}",
                segments.len(),
                segments.len() + 1,
                breaks.len()
            ))
            .into());
        }
        if breaks.iter().any(|b| !b.is_finite()) || breaks.windows(2).any(|w| w[1] <= w[0]) {
            return Err(GeometryError::IncompatibleSegments(
                "breakpoints must be finite and strictly increasing".into(),
            )
            .into());
        }
        Ok(Self { segments, breaks })
    }

    /// Returns the segments.
    #[must_use]
    pub fn segments(&self) -> &[BezierSegment] {
        &self.segments
    }

    /// Returns the domain breakpoints.
    #[must_use]
    pub fn breaks(&self) -> &[f64] {
        &self.breaks
    }

    /// Concatenated control points of all segments.
    #[must_use]
    pub fn control_points(&self) -> Vec<Vector4> {
        self.segments
            .iter()
            .flat_map(|s| s.points.iter().copied())
            .collect()
    }

    /// Rebuilds the chain with the same layout from a flat point list.
    ///
    /// # Errors
    ///
    /// Returns an error if the point count does not match the layout.
    pub fn with_control_points(&self, points: &[Vector4]) -> Result<Self> {
        let expected: usize = self.segments.iter().map(|s| s.points.len()).sum();
        if points.len() != expected {
            return Err(GeometryError::IncompatibleSegments(format!(
                "expected {expected} control points, got {}",
                points.len()
            ))
            .into());
        }
        let mut rest = points;
        let segments = self
            .segments
            .iter()
            .map(|s| {
                let (head, tail) = rest.split_at(s.points.len());
                rest = tail;
                BezierSegment {
                    points: head.to_vec(),
                }
            })
            .collect();
        Ok(Self {
            segments,
            breaks: self.breaks.clone(),
        })
    }

    /// Whether both chains share segment layout and breakpoints.
    #[must_use]
    pub fn is_compatible(&self, other: &Self) -> bool {
        self.segments.len() == other.segments.len()
            && self
                .segments
                .iter()
                .zip(&other.segments)
                .all(|(a, b)| a.points.len() == b.points.len())
            && self
                .breaks
                .iter()
                .zip(&other.breaks)
                .all(|(a, b)| (a - b).abs() < TOLERANCE)
    }

    /// Returns the piece between `t0` and `t1`, keeping parameter values.
    ///
    /// # Errors
    ///
    /// Returns an error if `t0 >= t1` or either end lies outside the domain.
    pub fn cut(&self, t0: f64, t1: f64) -> Result<Self> {
        let domain = self.domain();
        domain.check("t0", t0)?;
        domain.check("t1", t1)?;
        if t1 - t0 <= TOLERANCE {
            return Err(OperationError::InvalidInput(format!(
                "cut interval [{t0}, {t1}] is empty"
            ))
            .into());
        }

        let first = self.segment_at(t0);
        let last = self.segment_ending_at(t1);
        let mut segments = Vec::with_capacity(last - first + 1);
        for i in first..=last {
            let (a, b) = (self.breaks[i], self.breaks[i + 1]);
            let mut seg = self.segments[i].clone();
            let lo = t0.max(a);
            let hi = t1.min(b);
            if hi < b {
                seg = seg.split((hi - a) / (b - a)).0;
            }
            if lo > a {
                seg = seg.split((lo - a) / (hi - a)).1;
            }
            segments.push(seg);
        }

        let mut breaks = Vec::with_capacity(segments.len() + 1);
        breaks.push(t0);
        breaks.extend_from_slice(&self.breaks[first + 1..=last]);
        breaks.push(t1);

        log::debug!(
            "cut Bezier chain [{t0}, {t1}]: {} -> {} segments",
            self.segments.len(),
            segments.len()
        );
        Self::with_breaks(segments, breaks)
    }

    /// Re-parametrizes the chain onto `[t_min, t_max]` without changing its shape.
    ///
    /// # Errors
    ///
    /// Returns an error unless both bounds are finite and `t_min < t_max`.
    pub fn reparametrized(&self, t_min: f64, t_max: f64) -> Result<Self> {
        check_target_range(t_min, t_max)?;
        let d = self.domain();
        let ratio = (t_max - t_min) / d.span();
        Ok(Self {
            segments: self.segments.clone(),
            breaks: self
                .breaks
                .iter()
                .map(|b| t_min + (b - d.t_min) * ratio)
                .collect(),
        })
    }

    /// Segment owning `t`; interior breakpoints belong to the later segment.
    fn segment_at(&self, t: f64) -> usize {
        let interior = &self.breaks[1..self.segments.len()];
        interior.partition_point(|&b| b <= t)
    }

    /// Segment whose closed range ends at or after `t`, preferring the earlier one.
    fn segment_ending_at(&self, t: f64) -> usize {
        let interior = &self.breaks[1..self.segments.len()];
        interior.partition_point(|&b| b < t)
    }

    fn local(&self, t: f64) -> Result<(usize, f64, f64)> {
        self.domain().check("t", t)?;
        let i = self.segment_at(t);
        let width = self.breaks[i + 1] - self.breaks[i];
        Ok((i, (t - self.breaks[i]) / width, width))
    }
}

impl Curve for CompositeBezier {
    fn evaluate_homogeneous(&self, t: f64) -> Result<Vector4> {
        let (i, s, _) = self.local(t)?;
        Ok(self.segments[i].evaluate_local(s))
    }

    fn derivative_homogeneous(&self, t: f64) -> Result<Vector4> {
        let (i, s, width) = self.local(t)?;
        Ok(self.segments[i].derivative_local(s) / width)
    }

    fn domain(&self) -> CurveDomain {
        CurveDomain::new(self.breaks[0], self.breaks[self.breaks.len() - 1])
    }
}

impl Transformable for CompositeBezier {
    fn linear_transform(&self, matrix: &Matrix4) -> Self {
        Self {
            segments: self
                .segments
                .iter()
                .map(|s| BezierSegment {
                    points: s.points.iter().map(|p| matrix * p).collect(),
                })
                .collect(),
            breaks: self.breaks.clone(),
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::math::Vector3;

    fn p(x: f64, y: f64, z: f64) -> Point3 {
        Point3::new(x, y, z)
    }

    fn hook() -> CompositeBezier {
        CompositeBezier::new(vec![
            BezierSegment::linear(p(0.0, 0.0, 0.0), p(1.0, 0.0, 0.0)),
            BezierSegment::quadratic(p(1.0, 0.0, 0.0), p(2.0, 0.0, 0.0), p(2.0, 1.0, 0.0)),
        ])
        .unwrap()
    }

    #[test]
    fn equal_partition() {
        assert_eq!(hook().breaks(), &[0.0, 0.5, 1.0]);
    }

    #[test]
    fn dispatches_to_owning_segment() {
        let c = hook();
        assert!((c.evaluate(0.25).unwrap() - p(0.5, 0.0, 0.0)).norm() < TOLERANCE);
        assert!((c.evaluate(0.5).unwrap() - p(1.0, 0.0, 0.0)).norm() < TOLERANCE);
        // local s = 0.5 on the quadratic: (1,0)/4 + (2,0)/2 + (2,1)/4
        assert!((c.evaluate(0.75).unwrap() - p(1.75, 0.25, 0.0)).norm() < TOLERANCE);
        assert!((c.evaluate(1.0).unwrap() - p(2.0, 1.0, 0.0)).norm() < TOLERANCE);
    }

    #[test]
    fn rejects_bad_input() {
        assert!(CompositeBezier::new(vec![]).is_err());
        assert!(BezierSegment::new(vec![Vector4::zeros()]).is_err());
        let seg = BezierSegment::linear(p(0.0, 0.0, 0.0), p(1.0, 0.0, 0.0));
        assert!(CompositeBezier::with_breaks(vec![seg.clone()], vec![0.0]).is_err());
        assert!(CompositeBezier::with_breaks(vec![seg], vec![1.0, 1.0]).is_err());
        assert!(hook().evaluate(1.01).is_err());
    }

    #[test]
    fn rational_midpoint_is_on_circle() {
        let w = std::f64::consts::FRAC_1_SQRT_2;
        let seg = BezierSegment::rational_quadratic(
            p(1.0, 0.0, 0.0),
            p(1.0, 1.0, 0.0),
            w,
            p(0.0, 1.0, 0.0),
        );
        let c = CompositeBezier::new(vec![seg]).unwrap();
        let mid = c.evaluate(0.5).unwrap();
        assert!((mid - p(w, w, 0.0)).norm() < 1e-12);
    }

    #[test]
    fn split_reproduces_halves() {
        let seg = BezierSegment::quadratic(p(0.0, 0.0, 0.0), p(1.0, 2.0, 0.0), p(2.0, 0.0, 0.0));
        let (l, r) = seg.split(0.3);
        for i in 0..=10 {
            let s = f64::from(i) / 10.0;
            let a = seg.evaluate_local(0.3 * s);
            let b = l.evaluate_local(s);
            assert!((a - b).norm() < 1e-12);
            let a = seg.evaluate_local(0.3 + 0.7 * s);
            let b = r.evaluate_local(s);
            assert!((a - b).norm() < 1e-12);
        }
    }

    #[test]
    fn cut_keeps_parameters() {
        let c = hook();
        let piece = c.cut(0.25, 0.75).unwrap();
        assert_eq!(piece.segments().len(), 2);
        assert_eq!(piece.breaks(), &[0.25, 0.5, 0.75]);
        for i in 0..=10 {
            let t = 0.25 + 0.05 * f64::from(i);
            assert!((c.evaluate(t).unwrap() - piece.evaluate(t).unwrap()).norm() < 1e-12);
        }
    }

    #[test]
    fn cut_inside_one_segment() {
        let c = hook();
        let piece = c.cut(0.6, 0.9).unwrap();
        assert_eq!(piece.segments().len(), 1);
        for t in [0.6, 0.7, 0.8, 0.9] {
            assert!((c.evaluate(t).unwrap() - piece.evaluate(t).unwrap()).norm() < 1e-12);
        }
    }

    #[test]
    fn cut_on_breakpoint() {
        let c = hook();
        let left = c.cut(0.0, 0.5).unwrap();
        assert_eq!(left.segments().len(), 1);
        let right = c.cut(0.5, 1.0).unwrap();
        assert_eq!(right.segments().len(), 1);
        assert!((right.evaluate(0.5).unwrap() - p(1.0, 0.0, 0.0)).norm() < TOLERANCE);
    }

    #[test]
    fn derivative_uses_segment_width() {
        let c = hook();
        // first segment runs 1 unit over 0.5 of parameter
        let d = c.tangent(0.2).unwrap();
        assert!((d - Vector3::new(2.0, 0.0, 0.0)).norm() < 1e-12);
    }

    #[test]
    fn flat_points_round_trip_layout() {
        let c = hook();
        let pts = c.control_points();
        assert_eq!(pts.len(), 5);
        let rebuilt = c.with_control_points(&pts).unwrap();
        assert_eq!(rebuilt, c);
        assert!(c.with_control_points(&pts[..4]).is_err());
    }

    #[test]
    fn vanishing_weight_is_division_by_zero() {
        let seg = BezierSegment::new(vec![
            Vector4::new(0.0, 0.0, 0.0, 1.0),
            Vector4::new(-1.0, 0.0, 0.0, -1.0),
        ])
        .unwrap();
        let c = CompositeBezier::new(vec![seg]).unwrap();
        assert!(c.evaluate(0.25).is_ok());
        assert!(matches!(
            c.evaluate(0.5),
            Err(crate::NurbformError::Geometry(GeometryError::DivisionByZero))
        ));
    }

    #[test]
    fn reparametrize_rejects_empty_range() {
        let c = hook();
        let r = c.reparametrized(2.0, 4.0).unwrap();
        assert_eq!(r.breaks(), &[2.0, 3.0, 4.0]);
        assert!(matches!(
            c.reparametrized(4.0, 2.0),
            Err(crate::NurbformError::Operation(OperationError::InvalidInput(_)))
        ));
        assert!(c.reparametrized(1.0, 1.0).is_err());
        assert!(c.reparametrized(0.0, f64::INFINITY).is_err());
    }
}
