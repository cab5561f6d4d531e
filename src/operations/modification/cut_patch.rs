use crate::error::{GeometryError, Result};
use crate::geometry::curve::AnyCurve;
use crate::geometry::surface::{CurveConstructor, PatchAxis, TensorPatch};

/// Restricts a patch to `[t_start, t_end]` along one axis.
///
/// Cutting along `U` cuts every generator curve at the same parameters.
/// Cutting along `V` builds one cross curve per control-point index, cuts
/// each of them and regroups the resulting points into new generators.
/// Parameter values are preserved in both cases.
pub struct CutPatch<'a> {
    patch: &'a TensorPatch,
    axis: PatchAxis,
    t_start: f64,
    t_end: f64,
}

impl<'a> CutPatch<'a> {
    /// Creates a new `CutPatch` operation.
    #[must_use]
    pub fn new(patch: &'a TensorPatch, axis: PatchAxis, t_start: f64, t_end: f64) -> Self {
        Self {
            patch,
            axis,
            t_start,
            t_end,
        }
    }

    /// Executes the cut, returning the sub-patch.
    ///
    /// # Errors
    ///
    /// Returns an error if the interval is empty or leaves the patch domain.
    pub fn execute(&self) -> Result<TensorPatch> {
        log::debug!(
            "cut patch along {:?} to [{}, {}]",
            self.axis,
            self.t_start,
            self.t_end
        );
        match self.axis {
            PatchAxis::U => self.cut_generators(),
            PatchAxis::V => self.cut_cross_direction(),
        }
    }

    fn cut_generators(&self) -> Result<TensorPatch> {
        let curves = self
            .patch
            .curves()
            .iter()
            .map(|c| c.cut(self.t_start, self.t_end))
            .collect::<Result<Vec<_>>>()?;
        TensorPatch::new(self.patch.constructor().clone(), curves)
    }

    fn cut_cross_direction(&self) -> Result<TensorPatch> {
        let generators = self.patch.curves();
        let net: Vec<_> = generators.iter().map(AnyCurve::control_points).collect();

        let pieces = (0..net[0].len())
            .map(|j| {
                let column = net.iter().map(|row| row[j]).collect();
                self.patch
                    .constructor()
                    .build(column)?
                    .cut(self.t_start, self.t_end)
            })
            .collect::<Result<Vec<_>>>()?;
        let constructor = CurveConstructor::from_curve(&pieces[0])?;

        let columns: Vec<_> = pieces.iter().map(AnyCurve::control_points).collect();
        let rows = columns[0].len();
        if columns.iter().any(|c| c.len() != rows) {
            return Err(GeometryError::PatchIncompatible(
                "cross curves split into different control counts".into(),
            )
            .into());
        }
        let curves = (0..rows)
            .map(|i| {
                let points = columns.iter().map(|column| column[i]).collect();
                generators[0].with_control_points(points)
            })
            .collect::<Result<Vec<_>>>()?;
        TensorPatch::new(constructor, curves)
    }
}
