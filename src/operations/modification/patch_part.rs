use crate::error::{OperationError, Result};
use crate::geometry::surface::{PatchAxis, Surface, TensorPatch};

use super::CutPatch;

/// Extracts slice `index` of `subdivisions` equal slices of a patch along one axis.
///
/// Layering collaborators use this to walk a patch band by band; the last
/// slice ends exactly at the domain maximum.
pub struct PatchPart<'a> {
    patch: &'a TensorPatch,
    axis: PatchAxis,
    subdivisions: usize,
    index: usize,
}

impl<'a> PatchPart<'a> {
    /// Creates a new `PatchPart` operation.
    #[must_use]
    pub fn new(patch: &'a TensorPatch, axis: PatchAxis, subdivisions: usize, index: usize) -> Self {
        Self {
            patch,
            axis,
            subdivisions,
            index,
        }
    }

    /// Executes the extraction.
    ///
    /// # Errors
    ///
    /// Returns an error if `subdivisions` is zero or `index` is not below it.
    pub fn execute(&self) -> Result<TensorPatch> {
        if self.subdivisions == 0 {
            return Err(OperationError::InvalidInput("subdivisions must be positive".into()).into());
        }
        if self.index >= self.subdivisions {
            return Err(OperationError::InvalidInput(format!(
                "part index {} out of {} subdivisions",
                self.index, self.subdivisions
            ))
            .into());
        }
        let range = self.patch.domain().along(self.axis);
        #[allow(clippy::cast_precision_loss)]
        let n = self.subdivisions as f64;
        #[allow(clippy::cast_precision_loss)]
        let t_start = range.lerp(self.index as f64 / n);
        let t_end = if self.index + 1 == self.subdivisions {
            range.t_max
        } else {
            #[allow(clippy::cast_precision_loss)]
            let next = (self.index + 1) as f64;
            range.lerp(next / n)
        };
        CutPatch::new(self.patch, self.axis, t_start, t_end).execute()
    }
}
