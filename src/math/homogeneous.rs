//! Arithmetic on homogeneous (weighted) control points.
//!
//! Points are stored pre-multiplied: the Euclidean point `(x, y, z)` with
//! weight `w` is the 4-vector `(w*x, w*y, w*z, w)`. All blending happens in
//! this space; [`project`] is the only way back to Euclidean coordinates.

use crate::error::{GeometryError, OperationError, Result};

use super::{Point3, Vector4, TOLERANCE};

/// Component-wise sum of two or more homogeneous vectors.
///
/// # Errors
///
/// Returns an error if fewer than two operands are given.
pub fn add(operands: &[Vector4]) -> Result<Vector4> {
    check_arity("add", operands)?;
    Ok(operands.iter().sum())
}

/// Component-wise difference `v1 - v2 - v3 - ...` of two or more vectors.
///
/// # Errors
///
/// Returns an error if fewer than two operands are given.
pub fn difference(operands: &[Vector4]) -> Result<Vector4> {
    check_arity("difference", operands)?;
    let (first, rest) = operands.split_at(1);
    Ok(rest.iter().fold(first[0], |acc, v| acc - v))
}

/// Multiplies every component (weight included) by `c`.
#[must_use]
pub fn scale(c: f64, v: &Vector4) -> Vector4 {
    v * c
}

/// Lifts a Euclidean point to a weighted control point.
#[must_use]
pub fn to_homogeneous(point: &Point3, weight: f64) -> Vector4 {
    Vector4::new(point.x * weight, point.y * weight, point.z * weight, weight)
}

/// Lifts a Euclidean point with unit weight.
#[must_use]
pub fn from_euclidean(point: &Point3) -> Vector4 {
    to_homogeneous(point, 1.0)
}

/// Projects a homogeneous point to Euclidean space by dividing by its weight.
///
/// # Errors
///
/// Returns [`GeometryError::DivisionByZero`] if the weight is zero.
pub fn project(v: &Vector4) -> Result<Point3> {
    if v.w.abs() < TOLERANCE {
        return Err(GeometryError::DivisionByZero.into());
    }
    Ok(Point3::new(v.x / v.w, v.y / v.w, v.z / v.w))
}

fn check_arity(name: &str, operands: &[Vector4]) -> Result<()> {
    if operands.len() < 2 {
        return Err(OperationError::InvalidInput(format!(
            "{name} needs at least two operands, got {}",
            operands.len()
        ))
        .into());
    }
    Ok(())
}
