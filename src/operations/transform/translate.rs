use crate::geometry::Transformable;
use crate::math::{translation, Vector3};

/// Translates an entity by a displacement vector.
pub struct Translate<'a, T: Transformable> {
    entity: &'a T,
    displacement: Vector3,
}

impl<'a, T: Transformable> Translate<'a, T> {
    /// Creates a new `Translate` operation.
    #[must_use]
    pub fn new(entity: &'a T, displacement: Vector3) -> Self {
        Self {
            entity,
            displacement,
        }
    }

    /// Executes the translation, returning the moved copy.
    #[must_use]
    pub fn execute(&self) -> T {
        let d = self.displacement;
        self.entity.linear_transform(&translation(d.x, d.y, d.z))
    }
}
