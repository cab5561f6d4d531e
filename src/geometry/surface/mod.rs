mod constructor;
mod tensor;

pub use constructor::CurveConstructor;
pub use tensor::TensorPatch;

use crate::error::Result;
use crate::math::{Point3, Vector3};

use super::curve::CurveDomain;

/// Parameter domain for a surface.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SurfaceDomain {
    /// Start of the U parameter range.
    pub u_min: f64,
    /// End of the U parameter range.
    pub u_max: f64,
    /// Start of the V parameter range.
    pub v_min: f64,
    /// End of the V parameter range.
    pub v_max: f64,
}

impl SurfaceDomain {
    /// Creates a new surface domain.
    #[must_use]
    pub fn new(u_min: f64, u_max: f64, v_min: f64, v_max: f64) -> Self {
        Self {
            u_min,
            u_max,
            v_min,
            v_max,
        }
    }

    /// Builds a surface domain from the two curve domains.
    #[must_use]
    pub fn from_curves(u: CurveDomain, v: CurveDomain) -> Self {
        Self::new(u.t_min, u.t_max, v.t_min, v.t_max)
    }

    /// The range along one axis.
    #[must_use]
    pub fn along(&self, axis: PatchAxis) -> CurveDomain {
        match axis {
            PatchAxis::U => CurveDomain::new(self.u_min, self.u_max),
            PatchAxis::V => CurveDomain::new(self.v_min, self.v_max),
        }
    }
}

/// Parametric direction of a patch.
///
/// `U` runs along the generator curves, `V` across them.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PatchAxis {
    U,
    V,
}

/// Trait for parametric surfaces in 3D space.
pub trait Surface {
    /// Evaluates the surface at parameters `(u, v)`, returning the 3D point.
    ///
    /// # Errors
    ///
    /// Returns an error if the parameters are out of range or evaluation fails.
    fn evaluate(&self, u: f64, v: f64) -> Result<Point3>;

    /// Computes the unit normal `∂S/∂u × ∂S/∂v` at parameters `(u, v)`.
    ///
    /// # Errors
    ///
    /// Returns an error if the parameters are out of range or the normal is degenerate.
    fn normal(&self, u: f64, v: f64) -> Result<Vector3>;

    /// Returns the parameter domain of the surface.
    fn domain(&self) -> SurfaceDomain;
}
