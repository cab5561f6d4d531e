use crate::geometry::Transformable;
use crate::math::Matrix4;

/// Applies an arbitrary 4x4 affine matrix to any transformable entity.
///
/// The entity is left untouched; a transformed copy is returned.
pub struct GeneralTransform<'a, T: Transformable> {
    entity: &'a T,
    matrix: Matrix4,
}

impl<'a, T: Transformable> GeneralTransform<'a, T> {
    /// Creates a new `GeneralTransform` operation.
    #[must_use]
    pub fn new(entity: &'a T, matrix: Matrix4) -> Self {
        Self { entity, matrix }
    }

    /// Executes the transformation.
    #[must_use]
    pub fn execute(&self) -> T {
        self.entity.linear_transform(&self.matrix)
    }
}
