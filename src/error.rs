use thiserror::Error;

/// Top-level error type for the nurbform kernel.
#[derive(Debug, Error)]
pub enum NurbformError {
    #[error(transparent)]
    Geometry(#[from] GeometryError),

    #[error(transparent)]
    Operation(#[from] OperationError),

    #[error(transparent)]
    Tessellation(#[from] TessellationError),
}

/// Errors related to curve and patch construction or evaluation.
#[derive(Debug, Error)]
pub enum GeometryError {
    #[error("malformed knot vector: expected {expected} knots, got {actual}")]
    MalformedKnotVector { expected: usize, actual: usize },

    #[error("knot vector is not non-decreasing at index {index}")]
    KnotsNotMonotonic { index: usize },

    #[error("parameter {parameter} = {value} is out of range [{min}, {max}]")]
    ParameterOutOfRange {
        parameter: &'static str,
        value: f64,
        min: f64,
        max: f64,
    },

    #[error("incompatible patch curves: {0}")]
    PatchIncompatible(String),

    #[error("incompatible segments: {0}")]
    IncompatibleSegments(String),

    #[error("division by zero: homogeneous weight is zero")]
    DivisionByZero,

    #[error("degenerate geometry: {0}")]
    Degenerate(String),

    #[error("zero-length vector")]
    ZeroVector,
}

/// Errors related to operations on curves and patches.
#[derive(Debug, Error)]
pub enum OperationError {
    #[error("invalid input: {0}")]
    InvalidInput(String),
}

/// Errors related to tessellation.
#[derive(Debug, Error)]
pub enum TessellationError {
    #[error("invalid tessellation parameters: {0}")]
    InvalidParameters(String),
}

/// Convenience type alias for results using [`NurbformError`].
pub type Result<T> = std::result::Result<T, NurbformError>;
