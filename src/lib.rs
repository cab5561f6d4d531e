pub mod error;
pub mod geometry;
pub mod math;
pub mod operations;
pub mod tessellation;

pub use error::{NurbformError, Result};
pub use geometry::{AnyCurve, Curve, Surface, TensorPatch, Transformable};
pub use tessellation::{triangle_mesh, QuadMesh, TessellatePatch, TessellationParams, TriangleMesh};
