pub mod homogeneous;
pub mod matrix;

pub use homogeneous::{add, difference, from_euclidean, project, scale, to_homogeneous};
pub use matrix::{compose, flip, rotation, scaling, scaling_xyz, translation, Axis};

/// 3D point type.
pub type Point3 = nalgebra::Point3<f64>;

/// 3D vector type.
pub type Vector3 = nalgebra::Vector3<f64>;

/// Homogeneous control point `(w*x, w*y, w*z, w)`.
pub type Vector4 = nalgebra::Vector4<f64>;

/// 4x4 transformation matrix.
pub type Matrix4 = nalgebra::Matrix4<f64>;

/// Global geometric tolerance for floating-point comparisons.
pub const TOLERANCE: f64 = 1e-10;
