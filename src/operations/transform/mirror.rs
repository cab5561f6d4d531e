use crate::geometry::Transformable;
use crate::math::{flip, Axis};

/// Mirrors an entity by negating one coordinate axis.
///
/// Mirroring reverses orientation, so a mirrored patch tessellates with
/// inward-facing normals unless the winding is reversed.
pub struct Mirror<'a, T: Transformable> {
    entity: &'a T,
    axis: Axis,
}

impl<'a, T: Transformable> Mirror<'a, T> {
    /// Creates a new `Mirror` operation.
    #[must_use]
    pub fn new(entity: &'a T, axis: Axis) -> Self {
        Self { entity, axis }
    }

    /// Executes the mirror, returning the mirrored copy.
    #[must_use]
    pub fn execute(&self) -> T {
        self.entity.linear_transform(&flip(self.axis))
    }
}
