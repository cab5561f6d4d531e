use crate::error::Result;
use crate::geometry::curve::AnyCurve;

/// Restricts a curve to the parameter interval `[t_start, t_end]`.
///
/// The result keeps the original parameter values, so evaluating it at any
/// `t` inside the interval gives the same point as the source curve.
/// B-splines are cut by knot insertion, Bezier chains by segment splitting.
pub struct CutCurve<'a> {
    curve: &'a AnyCurve,
    t_start: f64,
    t_end: f64,
}

impl<'a> CutCurve<'a> {
    /// Creates a new `CutCurve` operation.
    #[must_use]
    pub fn new(curve: &'a AnyCurve, t_start: f64, t_end: f64) -> Self {
        Self {
            curve,
            t_start,
            t_end,
        }
    }

    /// Executes the cut, returning the restricted curve.
    ///
    /// # Errors
    ///
    /// Returns an error if the interval is empty or not inside the curve domain.
    pub fn execute(&self) -> Result<AnyCurve> {
        self.curve.cut(self.t_start, self.t_end)
    }
}
