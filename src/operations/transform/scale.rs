use crate::geometry::Transformable;
use crate::math::scaling_xyz;

/// Scales an entity about the origin, independently per axis.
pub struct Scale<'a, T: Transformable> {
    entity: &'a T,
    factors: (f64, f64, f64),
}

impl<'a, T: Transformable> Scale<'a, T> {
    /// Creates a uniform `Scale` operation.
    #[must_use]
    pub fn uniform(entity: &'a T, factor: f64) -> Self {
        Self::new(entity, factor, factor, factor)
    }

    /// Creates a per-axis `Scale` operation.
    #[must_use]
    pub fn new(entity: &'a T, sx: f64, sy: f64, sz: f64) -> Self {
        Self {
            entity,
            factors: (sx, sy, sz),
        }
    }

    /// Executes the scaling, returning the scaled copy.
    #[must_use]
    pub fn execute(&self) -> T {
        let (sx, sy, sz) = self.factors;
        self.entity.linear_transform(&scaling_xyz(sx, sy, sz))
    }
}
