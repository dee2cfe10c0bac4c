//! Conform co-registered rasters onto a common grid.
//!
//! Two leaf operations, composed only by the caller:
//! - [`clean`] zeroes an array wherever a reference array is zero.
//! - [`resample`] reads a raster at the pixel grid of a reference
//!   raster, returning the bilinearly resampled first band together
//!   with a freshly rescaled affine transform.
//!
//! Both are stateless; datasets are opened read-only and closed when
//! their handles drop.

mod errors;
mod file;
mod mask;
mod resample;

pub use errors::{RastermatchError, Result};
pub use file::{RasterFile, RasterValue};
pub use mask::clean;
pub use resample::resample;
