mod tessellate_patch;

pub use tessellate_patch::{triangle_mesh, TessellatePatch};

use crate::math::{Point3, Vector3};

/// Parameters controlling patch sampling.
#[derive(Debug, Clone, Copy)]
pub struct TessellationParams {
    /// Number of grid cells along `u`.
    pub nu: usize,
    /// Number of grid cells along `v`.
    pub nv: usize,
    /// Emit faces with reversed winding (for mirrored or inward-facing patches).
    pub reversed: bool,
}

impl TessellationParams {
    /// Grid of `nu` by `nv` cells with default winding.
    #[must_use]
    pub fn grid(nu: usize, nv: usize) -> Self {
        Self {
            nu,
            nv,
            reversed: false,
        }
    }
}

impl Default for TessellationParams {
    fn default() -> Self {
        Self::grid(16, 16)
    }
}

/// A quad mesh sampled from a patch on a regular parameter grid.
///
/// Vertex `iv * (nu + 1) + iu` sits at the `iu`-th `u` sample and `iv`-th
/// `v` sample. Face indices are 0-based.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct QuadMesh {
    /// Vertex positions.
    pub vertices: Vec<Point3>,
    /// Unit vertex normals; zero where the surface is degenerate.
    pub normals: Vec<Vector3>,
    /// Parameter values each vertex was sampled at.
    pub uvs: Vec<(f64, f64)>,
    /// Quads with consistent winding.
    pub faces: Vec<[u32; 4]>,
}

impl QuadMesh {
    /// Splits every quad along its first diagonal.
    #[must_use]
    pub fn to_triangles(&self) -> TriangleMesh {
        TriangleMesh {
            vertices: self.vertices.clone(),
            normals: self.normals.clone(),
            uvs: self.uvs.clone(),
            indices: self
                .faces
                .iter()
                .flat_map(|&[a, b, c, d]| [[a, b, c], [a, c, d]])
                .collect(),
        }
    }
}

/// A triangle mesh approximation of a surface.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TriangleMesh {
    /// Vertex positions.
    pub vertices: Vec<Point3>,
    /// Vertex normals.
    pub normals: Vec<Vector3>,
    /// UV coordinates.
    pub uvs: Vec<(f64, f64)>,
    /// Triangle indices (each triple defines a triangle).
    pub indices: Vec<[u32; 3]>,
}
