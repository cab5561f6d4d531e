use crate::error::{GeometryError, OperationError, Result};
use crate::math::{Matrix4, Point3, Vector4};

use super::{check_target_range, Curve, CurveDomain, KnotVector};
use crate::geometry::Transformable;

/// A rational B-spline (NURBS) curve.
///
/// Control points are homogeneous `(w*x, w*y, w*z, w)`. `order` is the
/// polynomial degree used in the length invariant
/// `knots.len() == control_points.len() + order + 1`.
#[derive(Debug, Clone, PartialEq)]
pub struct BsplineCurve {
    control_points: Vec<Vector4>,
    knots: KnotVector,
    order: usize,
}

impl BsplineCurve {
    /// Creates a B-spline from homogeneous control points and an explicit knot vector.
    ///
    /// # Errors
    ///
    /// Returns [`GeometryError::MalformedKnotVector`] if the knot count does not
    /// equal `control_points.len() + order + 1` or there are not more control
    /// points than `order`, and [`GeometryError::Degenerate`] for order zero or
    /// an empty domain.
    pub fn clamped(control_points: Vec<Vector4>, knots: Vec<f64>, order: usize) -> Result<Self> {
        Self::from_parts(control_points, KnotVector::new(knots)?, order)
    }

    /// Creates a B-spline whose knot vector is synthesized as a clamped
    /// uniform sequence on `[0, 1]`.
    ///
    /// # Errors
    ///
    /// Returns an error if there are not more control points than `order`.
    pub fn clamped_uniform(control_points: Vec<Vector4>, order: usize) -> Result<Self> {
        let knots = KnotVector::clamped_uniform(control_points.len(), order)?;
        Self::from_parts(control_points, knots, order)
    }

    /// Creates a B-spline from an already validated knot vector.
    ///
    /// # Errors
    ///
    /// See [`Self::clamped`].
    pub fn from_parts(
        control_points: Vec<Vector4>,
        knots: KnotVector,
        order: usize,
    ) -> Result<Self> {
        if order == 0 {
            return Err(
                GeometryError::Degenerate("B-spline order must be at least 1".into()).into(),
            );
        }
        knots.check_length(control_points.len(), order)?;
        if control_points.len() <= order {
            return Err(GeometryError::MalformedKnotVector {
                expected: 2 * order + 2,
                actual: knots.len(),
            }
            .into());
        }
        let (lo, hi) = knots.domain(control_points.len(), order);
        if hi - lo <= 0.0 {
            return Err(GeometryError::Degenerate("B-spline domain is empty".into()).into());
        }
        Ok(Self {
            control_points,
            knots,
            order,
        })
    }

    /// Returns the homogeneous control points.
    #[must_use]
    pub fn control_points(&self) -> &[Vector4] {
        &self.control_points
    }

    /// Returns the knot vector.
    #[must_use]
    pub fn knots(&self) -> &KnotVector {
        &self.knots
    }

    /// Returns the order (degree) of the curve.
    #[must_use]
    pub fn order(&self) -> usize {
        self.order
    }

    /// Whether two curves share order, control-point count and knot vector,
    /// so their control points can be blended into a tensor-product patch.
    #[must_use]
    pub fn is_compatible(&self, other: &Self) -> bool {
        self.order == other.order
            && self.control_points.len() == other.control_points.len()
            && self.knots.is_congruent(&other.knots)
    }

    /// Returns a curve with the same knot structure and new control points.
    ///
    /// # Errors
    ///
    /// Returns an error if the point count differs from the current one.
    pub fn with_control_points(&self, control_points: Vec<Vector4>) -> Result<Self> {
        Self::from_parts(control_points, self.knots.clone(), self.order)
    }

    /// Inserts the knot `t` once, leaving the curve's shape unchanged (Boehm).
    ///
    /// # Errors
    ///
    /// Returns an error if `t` lies outside the curve domain.
    pub fn insert_knot(&self, t: f64) -> Result<Self> {
        self.check_parameter(t)?;
        let t = self.knots.snap(t);
        let p = self.order;
        let n = self.control_points.len();
        let k = self.insertion_span(t);
        let u = self.knots.as_slice();

        let mut points = Vec::with_capacity(n + 1);
        points.extend_from_slice(&self.control_points[..=k - p]);
        for i in (k - p + 1)..=k {
            let alpha = (t - u[i]) / (u[i + p] - u[i]);
            points.push(
                self.control_points[i - 1] * (1.0 - alpha) + self.control_points[i] * alpha,
            );
        }
        points.extend_from_slice(&self.control_points[k..]);

        Ok(Self {
            control_points: points,
            knots: self.knots.inserted(k + 1, t),
            order: p,
        })
    }

    /// Returns the part of the curve between `t0` and `t1`, keeping the
    /// original parameter values as its domain.
    ///
    /// Both ends are raised to multiplicity `order + 1` by knot insertion;
    /// the control points supporting `[t0, t1]` then describe the piece exactly.
    ///
    /// # Errors
    ///
    /// Returns an error if `t0 >= t1` or either end lies outside the domain.
    pub fn cut(&self, t0: f64, t1: f64) -> Result<Self> {
        self.check_parameter(t0)?;
        self.check_parameter(t1)?;
        let t0 = self.knots.snap(t0);
        let t1 = self.knots.snap(t1);
        if t1 - t0 <= 0.0 {
            return Err(OperationError::InvalidInput(format!(
                "cut interval [{t0}, {t1}] is empty"
            ))
            .into());
        }

        let p = self.order;
        let mut curve = self.clone();
        for t in [t0, t1] {
            while curve.knots.multiplicity(t) < p + 1 {
                curve = curve.insert_knot(t)?;
            }
        }

        let u = curve.knots.as_slice();
        let last_t0 = u.iter().rposition(|&k| k == t0).unwrap_or(p);
        let first_t1 = u.iter().position(|&k| k == t1).unwrap_or(u.len() - 1 - p);
        let start = last_t0 - p;
        let end = first_t1 + p;
        let count = end - p - start;

        let piece = Self::from_parts(
            curve.control_points[start..start + count].to_vec(),
            curve.knots.slice(start, end + 1),
            p,
        )?;
        log::debug!(
            "cut B-spline [{t0}, {t1}]: {} -> {} control points",
            self.control_points.len(),
            piece.control_points.len()
        );
        Ok(piece)
    }

    /// Re-parametrizes the curve onto `[t_min, t_max]` without changing its shape.
    ///
    /// # Errors
    ///
    /// Returns [`OperationError::InvalidInput`](crate::error::OperationError)
    /// unless both bounds are finite and `t_min < t_max`.
    pub fn reparametrized(&self, t_min: f64, t_max: f64) -> Result<Self> {
        check_target_range(t_min, t_max)?;
        let domain = self.domain();
        Ok(Self {
            control_points: self.control_points.clone(),
            knots: self
                .knots
                .remapped((domain.t_min, domain.t_max), (t_min, t_max)),
            order: self.order,
        })
    }

    /// The hodograph: a B-spline of one lower order over the same domain whose
    /// values are the derivative of the homogeneous curve.
    fn hodograph(&self) -> (Vec<Vector4>, KnotVector) {
        let p = self.order;
        let u = self.knots.as_slice();
        #[allow(clippy::cast_precision_loss)]
        let degree = p as f64;
        let points = self
            .control_points
            .windows(2)
            .enumerate()
            .map(|(i, w)| {
                let span = u[i + p + 1] - u[i + 1];
                if span > 0.0 {
                    (w[1] - w[0]) * (degree / span)
                } else {
                    Vector4::zeros()
                }
            })
            .collect();
        (points, self.knots.slice(1, u.len() - 1))
    }

    /// Span used for insertion: the domain maximum inserts into the last span.
    fn insertion_span(&self, t: f64) -> usize {
        self.knots.find_span(self.control_points.len(), self.order, t)
    }

    fn check_parameter(&self, t: f64) -> Result<()> {
        self.domain().check("t", t)
    }
}

/// De Boor's recursion on homogeneous points.
fn de_boor(points: &[Vector4], knots: &KnotVector, order: usize, t: f64) -> Vector4 {
    let p = order;
    let k = knots.find_span(points.len(), p, t);
    let u = knots.as_slice();
    let mut d: Vec<Vector4> = points[k - p..=k].to_vec();
    for r in 1..=p {
        for j in (r..=p).rev() {
            let i = j + k - p;
            let alpha = (t - u[i]) / (u[i + p + 1 - r] - u[i]);
            d[j] = d[j - 1] * (1.0 - alpha) + d[j] * alpha;
        }
    }
    d[p]
}

impl Curve for BsplineCurve {
    fn evaluate_homogeneous(&self, t: f64) -> Result<Vector4> {
        self.check_parameter(t)?;
        Ok(de_boor(&self.control_points, &self.knots, self.order, t))
    }

    fn derivative_homogeneous(&self, t: f64) -> Result<Vector4> {
        self.check_parameter(t)?;
        let (points, knots) = self.hodograph();
        Ok(de_boor(&points, &knots, self.order - 1, t))
    }

    fn domain(&self) -> CurveDomain {
        let (lo, hi) = self.knots.domain(self.control_points.len(), self.order);
        CurveDomain::new(lo, hi)
    }
}

impl Transformable for BsplineCurve {
    fn linear_transform(&self, matrix: &Matrix4) -> Self {
        Self {
            control_points: self.control_points.iter().map(|p| matrix * p).collect(),
            knots: self.knots.clone(),
            order: self.order,
        }
    }
}

/// Convenience for building unit-weight control points from Euclidean points.
#[must_use]
pub fn euclidean_control_points(points: &[Point3]) -> Vec<Vector4> {
    points.iter().map(crate::math::from_euclidean).collect()
}
