mod cut_curve;
mod cut_patch;
mod patch_part;
mod unify;

pub use cut_curve::CutCurve;
pub use cut_patch::CutPatch;
pub use patch_part::PatchPart;
pub use unify::{UnifyCurve, UnifyCurves};
