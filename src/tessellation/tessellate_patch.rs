#[cfg(feature = "parallel")]
use rayon::prelude::*;

use crate::error::{NurbformError, Result, TessellationError};
use crate::geometry::surface::{Surface, SurfaceDomain};
use crate::math::{Point3, Vector3};

use super::{QuadMesh, TessellationParams};

/// Tessellates a surface on a uniform `(nu + 1) x (nv + 1)` parameter grid.
pub struct TessellatePatch<'a, S: Surface + Sync> {
    surface: &'a S,
    params: TessellationParams,
}

impl<'a, S: Surface + Sync> TessellatePatch<'a, S> {
    /// Creates a new `TessellatePatch` operation.
    #[must_use]
    pub fn new(surface: &'a S, params: TessellationParams) -> Self {
        Self { surface, params }
    }

    /// Executes the tessellation, returning a quad mesh.
    ///
    /// Faces wind counter-clockwise when seen from the side `∂S/∂u × ∂S/∂v`
    /// points to, or clockwise if `params.reversed` is set.
    ///
    /// # Errors
    ///
    /// Returns an error if either resolution is zero or a sample fails to evaluate.
    pub fn execute(&self) -> Result<QuadMesh> {
        let TessellationParams { nu, nv, reversed } = self.params;
        if nu == 0 || nv == 0 {
            return Err(TessellationError::InvalidParameters(format!(
                "grid resolution must be positive, got {nu} x {nv}"
            ))
            .into());
        }
        let vertex_count = nu
            .checked_add(1)
            .zip(nv.checked_add(1))
            .and_then(|(cols, rows)| cols.checked_mul(rows))
            .filter(|&count| u32::try_from(count).is_ok())
            .ok_or_else(|| {
                TessellationError::InvalidParameters(format!(
                    "a {nu} x {nv} grid exceeds the u32 index range"
                ))
            })?;

        let domain = self.surface.domain();
        let uvs: Vec<(f64, f64)> = (0..vertex_count)
            .map(|i| grid_parameter(&domain, nu, nv, i % (nu + 1), i / (nu + 1)))
            .collect();
        let samples = self.sample(&uvs)?;

        let mut mesh = QuadMesh {
            vertices: Vec::with_capacity(vertex_count),
            normals: Vec::with_capacity(vertex_count),
            uvs,
            faces: Vec::with_capacity(nu * nv),
        };
        for (point, normal) in samples {
            mesh.vertices.push(point);
            mesh.normals.push(normal);
        }

        #[allow(clippy::cast_possible_truncation)]
        let row = (nu + 1) as u32;
        for iv in 0..nv {
            for iu in 0..nu {
                #[allow(clippy::cast_possible_truncation)]
                let a = (iv * (nu + 1) + iu) as u32;
                let quad = [a, a + 1, a + 1 + row, a + row];
                mesh.faces.push(if reversed {
                    [quad[0], quad[3], quad[2], quad[1]]
                } else {
                    quad
                });
            }
        }

        log::debug!(
            "tessellated patch at {nu} x {nv}: {} vertices, {} quads",
            mesh.vertices.len(),
            mesh.faces.len()
        );
        Ok(mesh)
    }

    #[cfg(not(feature = "parallel"))]
    fn sample(&self, uvs: &[(f64, f64)]) -> Result<Vec<(Point3, Vector3)>> {
        uvs.iter()
            .map(|&(u, v)| sample_point(self.surface, u, v))
            .collect()
    }

    #[cfg(feature = "parallel")]
    fn sample(&self, uvs: &[(f64, f64)]) -> Result<Vec<(Point3, Vector3)>> {
        uvs.par_iter()
            .map(|&(u, v)| sample_point(self.surface, u, v))
            .collect()
    }
}

/// Tessellates `surface` into an `nu` by `nv` quad mesh with default winding.
///
/// The mesh keeps quad faces; call [`QuadMesh::to_triangles`] for a
/// [`TriangleMesh`](super::TriangleMesh) with `2 * nu * nv` triangles.
///
/// # Errors
///
/// Returns an error if either resolution is zero or evaluation fails.
pub fn triangle_mesh<S: Surface + Sync>(surface: &S, nu: usize, nv: usize) -> Result<QuadMesh> {
    TessellatePatch::new(surface, TessellationParams::grid(nu, nv)).execute()
}

/// Parameter pair of grid node `(iu, iv)`; the last node is pinned to the
/// domain maximum so rounding never pushes it outside.
fn grid_parameter(
    domain: &SurfaceDomain,
    nu: usize,
    nv: usize,
    iu: usize,
    iv: usize,
) -> (f64, f64) {
    #[allow(clippy::cast_precision_loss)]
    let along = |min: f64, max: f64, i: usize, n: usize| {
        if i == n {
            max
        } else {
            min + (max - min) * i as f64 / n as f64
        }
    };
    (
        along(domain.u_min, domain.u_max, iu, nu),
        along(domain.v_min, domain.v_max, iv, nv),
    )
}

fn sample_point<S: Surface>(surface: &S, u: f64, v: f64) -> Result<(Point3, Vector3)> {
    let point = surface.evaluate(u, v)?;
    let normal = match surface.normal(u, v) {
        Ok(n) => n,
        Err(NurbformError::Geometry(e)) => {
            log::trace!("no normal at ({u}, {v}): {e}");
            Vector3::zeros()
        }
        Err(e) => return Err(e),
    };
    Ok((point, normal))
}
