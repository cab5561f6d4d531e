use crate::geometry::Transformable;
use crate::math::{rotation, Axis};

/// Rotates an entity about a coordinate axis through the origin.
pub struct Rotate<'a, T: Transformable> {
    entity: &'a T,
    axis: Axis,
    angle: f64,
}

impl<'a, T: Transformable> Rotate<'a, T> {
    /// Creates a new `Rotate` operation (`angle` in radians).
    #[must_use]
    pub fn new(entity: &'a T, axis: Axis, angle: f64) -> Self {
        Self {
            entity,
            axis,
            angle,
        }
    }

    /// Executes the rotation, returning the rotated copy.
    #[must_use]
    pub fn execute(&self) -> T {
        self.entity.linear_transform(&rotation(self.axis, self.angle))
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::geometry::curve::{circle, AnyCurve, Curve};
    use crate::math::Point3;
    use std::f64::consts::FRAC_PI_2;

    #[test]
    fn stands_circle_upright() {
        let c: AnyCurve = circle(Point3::origin(), 1.0).unwrap().into();
        let upright = Rotate::new(&c, Axis::X, FRAC_PI_2).execute();
        let top = upright.evaluate(0.25).unwrap();
        assert!((top - Point3::new(0.0, 0.0, 1.0)).norm() < 1e-12);
    }
}
