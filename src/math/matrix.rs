use super::{Matrix4, Vector3};

/// Coordinate axis selector for flips and rotations.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Axis {
    X,
    Y,
    Z,
}

impl Axis {
    fn unit(self) -> Vector3 {
        match self {
            Axis::X => Vector3::x(),
            Axis::Y => Vector3::y(),
            Axis::Z => Vector3::z(),
        }
    }

    fn index(self) -> usize {
        match self {
            Axis::X => 0,
            Axis::Y => 1,
            Axis::Z => 2,
        }
    }
}

/// Affine translation by `(dx, dy, dz)`.
#[must_use]
pub fn translation(dx: f64, dy: f64, dz: f64) -> Matrix4 {
    Matrix4::new_translation(&Vector3::new(dx, dy, dz))
}

/// Uniform scaling about the origin. The weight row is left untouched.
#[must_use]
pub fn scaling(s: f64) -> Matrix4 {
    Matrix4::new_scaling(s)
}

/// Per-axis scaling about the origin.
#[must_use]
pub fn scaling_xyz(sx: f64, sy: f64, sz: f64) -> Matrix4 {
    Matrix4::new_nonuniform_scaling(&Vector3::new(sx, sy, sz))
}

/// Mirror that negates the coordinate along `axis`.
#[must_use]
pub fn flip(axis: Axis) -> Matrix4 {
    let mut m = Matrix4::identity();
    let i = axis.index();
    m[(i, i)] = -1.0;
    m
}

/// Right-handed rotation by `angle` radians about `axis` through the origin.
#[must_use]
pub fn rotation(axis: Axis, angle: f64) -> Matrix4 {
    Matrix4::new_rotation(axis.unit() * angle)
}

/// Composes matrices in application order.
///
/// `compose(&[a, b])` applies `a` first, then `b`, i.e. it returns `b * a`.
/// An empty slice yields the identity.
#[must_use]
pub fn compose(matrices: &[Matrix4]) -> Matrix4 {
    matrices.iter().fold(Matrix4::identity(), |acc, m| m * acc)
}
