pub mod curve;
pub mod surface;

pub use curve::{
    AnyCurve, BezierSegment, BsplineCurve, CompositeBezier, Curve, CurveDomain, KnotVector,
};
pub use surface::{CurveConstructor, PatchAxis, Surface, SurfaceDomain, TensorPatch};

use crate::math::{Matrix4, Vector4};

/// Entities that can be mapped through a 4x4 affine matrix.
///
/// Implementations return a new entity of the same shape and never mutate
/// the receiver. Curves and patches transform their homogeneous control
/// points, which keeps rational weights intact under affine maps.
pub trait Transformable {
    /// Applies `matrix` and returns the transformed entity.
    #[must_use]
    fn linear_transform(&self, matrix: &Matrix4) -> Self;
}

impl Transformable for Vector4 {
    fn linear_transform(&self, matrix: &Matrix4) -> Self {
        matrix * self
    }
}
