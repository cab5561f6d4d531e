use crate::error::{GeometryError, Result};
use crate::math::TOLERANCE;

/// A non-decreasing sequence of parameter values partitioning a B-spline
/// domain into spans.
#[derive(Debug, Clone, PartialEq)]
pub struct KnotVector {
    knots: Vec<f64>,
}

impl KnotVector {
    /// Wraps a knot sequence after checking it never decreases.
    ///
    /// # Errors
    ///
    /// Returns [`GeometryError::KnotsNotMonotonic`] if a knot is smaller than
    /// its predecessor, or [`GeometryError::Degenerate`] if a knot is not finite.
    pub fn new(knots: Vec<f64>) -> Result<Self> {
        if let Some(index) = knots.iter().position(|k| !k.is_finite()) {
            return Err(GeometryError::Degenerate(format!("knot {index} is not finite")).into());
        }
        if let Some(index) = knots.windows(2).position(|w| w[1] < w[0]) {
            return Err(GeometryError::KnotsNotMonotonic { index: index + 1 }.into());
        }
        Ok(Self { knots })
    }

    /// Builds a clamped knot vector with evenly spaced interior knots on `[0, 1]`.
    ///
    /// The first and last value are repeated `order + 1` times and
    /// `count - order - 1` interior knots split the domain evenly.
    ///
    /// # Errors
    ///
    /// Returns [`GeometryError::MalformedKnotVector`] if `count <= order`.
    pub fn clamped_uniform(count: usize, order: usize) -> Result<Self> {
        if count <= order {
            return Err(GeometryError::MalformedKnotVector {
                expected: order + 1,
                actual: count,
            }
            .into());
        }
        let spans = count - order;
        let mut knots = Vec::with_capacity(count + order + 1);
        knots.extend(std::iter::repeat(0.0).take(order + 1));
        #[allow(clippy::cast_precision_loss)]
        knots.extend((1..spans).map(|i| i as f64 / spans as f64));
        knots.extend(std::iter::repeat(1.0).take(order + 1));
        Ok(Self { knots })
    }

    /// Returns the knots as a slice.
    #[must_use]
    pub fn as_slice(&self) -> &[f64] {
        &self.knots
    }

    /// Returns the number of knots.
    #[must_use]
    pub fn len(&self) -> usize {
        self.knots.len()
    }

    /// Returns whether the knot vector is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.knots.is_empty()
    }

    /// Checks the length invariant `len == count + order + 1`.
    ///
    /// # Errors
    ///
    /// Returns [`GeometryError::MalformedKnotVector`] on mismatch.
    pub fn check_length(&self, count: usize, order: usize) -> Result<()> {
        let expected = count + order + 1;
        if self.knots.len() != expected {
            return Err(GeometryError::MalformedKnotVector {
                expected,
                actual: self.knots.len(),
            }
            .into());
        }
        Ok(())
    }

    /// Valid parameter range `[knots[order], knots[count]]` for `count` control points.
    #[must_use]
    pub fn domain(&self, count: usize, order: usize) -> (f64, f64) {
        (self.knots[order], self.knots[count])
    }

    /// Finds the span index `k` with `knots[k] <= t < knots[k + 1]`.
    ///
    /// A parameter sitting on an interior knot belongs to the span that
    /// starts at that knot. The domain maximum belongs to the last non-empty
    /// span, so clamped curves interpolate their last control point.
    /// The caller guarantees `t` lies inside [`Self::domain`].
    #[must_use]
    pub fn find_span(&self, count: usize, order: usize, t: f64) -> usize {
        let hi = self.knots[count];
        if t >= hi {
            return (order..count)
                .rev()
                .find(|&k| self.knots[k] < hi)
                .unwrap_or(order);
        }
        order + self.knots[order + 1..count].partition_point(|&u| u <= t)
    }

    /// Number of knots equal to `t` within [`TOLERANCE`].
    #[must_use]
    pub fn multiplicity(&self, t: f64) -> usize {
        self.knots.iter().filter(|&&k| (k - t).abs() < TOLERANCE).count()
    }

    /// Returns an existing knot within [`TOLERANCE`] of `t`, or `t` itself.
    #[must_use]
    pub fn snap(&self, t: f64) -> f64 {
        self.knots
            .iter()
            .copied()
            .find(|k| (k - t).abs() < TOLERANCE)
            .unwrap_or(t)
    }

    /// Maps every knot affinely so that `[from.0, from.1]` lands on `[to.0, to.1]`.
    #[must_use]
    pub fn remapped(&self, from: (f64, f64), to: (f64, f64)) -> Self {
        let ratio = (to.1 - to.0) / (from.1 - from.0);
        Self {
            knots: self
                .knots
                .iter()
                .map(|k| to.0 + (k - from.0) * ratio)
                .collect(),
        }
    }

    /// Compares two knot vectors value by value within [`TOLERANCE`].
    #[must_use]
    pub fn is_congruent(&self, other: &Self) -> bool {
        self.knots.len() == other.knots.len()
            && self
                .knots
                .iter()
                .zip(&other.knots)
                .all(|(a, b)| (a - b).abs() < TOLERANCE)
    }

    pub(crate) fn inserted(&self, index: usize, t: f64) -> Self {
        let mut knots = Vec::with_capacity(self.knots.len() + 1);
        knots.extend_from_slice(&self.knots[..index]);
        knots.push(t);
        knots.extend_from_slice(&self.knots[index..]);
        Self { knots }
    }

    pub(crate) fn slice(&self, start: usize, end: usize) -> Self {
        Self {
            knots: self.knots[start..end].to_vec(),
        }
    }
}
