use std::path::Path;

use geo::AffineTransform;
use log::debug;
use ndarray::{Array2, ArrayView2};

use crate::{
    errors::Result,
    file::{RasterFile, RasterValue},
};

/// Resamples band 1 of `target` onto the pixel grid of `reference`.
///
/// The scale ratio between the two rasters is computed per axis, so
/// grids of differing aspect conform non-uniformly. Pixels are
/// interpolated bilinearly and a fresh transform is returned with the
/// target's origin kept and its scale terms multiplied by the inverse
/// of the shape change.
pub fn resample<T: RasterValue, P: AsRef<Path>>(
    reference: P,
    target: P,
) -> Result<(Array2<T>, AffineTransform)> {
    let reference = RasterFile::open(reference)?;
    let target = RasterFile::open(target)?;

    let reference_size = reference.size();
    let target_size = target.size();
    debug!("conforming {target_size:?} -> {reference_size:?}");

    let (out_height, out_width) = output_shape(target_size, reference_size);

    let band = target.read_band::<T>(1)?;
    let resampled = bilinear(band.view(), (out_height, out_width));

    let (target_width, target_height) = target_size;
    let transform = rescaled(
        &target.transform()?,
        target_width as f64 / out_width as f64,
        target_height as f64 / out_height as f64,
    );
    Ok((resampled, transform))
}

/// Output `(height, width)` for a target read conformed to the
/// reference grid. The upscale factors cancel against the target
/// sizes, so each product sits within float noise of the reference's
/// own dimension; rounding to nearest absorbs that noise from either
/// side. Halfway cases cannot occur.
fn output_shape(target: (usize, usize), reference: (usize, usize)) -> (usize, usize) {
    let width_upscale = reference.0 as f64 / target.0 as f64;
    let height_upscale = reference.1 as f64 / target.1 as f64;
    (
        (target.1 as f64 * height_upscale).round() as usize,
        (target.0 as f64 * width_upscale).round() as usize,
    )
}

/// Bilinear interpolation of `source` at `out_shape` resolution.
///
/// Output pixel centers map back to source coordinates; each value is
/// the fractional-distance weighted average of the four surrounding
/// source pixels, with edge coordinates clamped onto the grid.
fn bilinear<T: RasterValue>(source: ArrayView2<'_, T>, out_shape: (usize, usize)) -> Array2<T> {
    let (src_height, src_width) = source.dim();
    let (out_height, out_width) = out_shape;
    let y_ratio = src_height as f64 / out_height as f64;
    let x_ratio = src_width as f64 / out_width as f64;
    Array2::from_shape_fn(out_shape, |(row, col)| {
        let src_y = ((row as f64 + 0.5) * y_ratio - 0.5).clamp(0., (src_height - 1) as f64);
        let src_x = ((col as f64 + 0.5) * x_ratio - 0.5).clamp(0., (src_width - 1) as f64);
        let top = src_y.floor() as usize;
        let left = src_x.floor() as usize;
        let bottom = (top + 1).min(src_height - 1);
        let right = (left + 1).min(src_width - 1);
        let dy = src_y - top as f64;
        let dx = src_x - left as f64;
        let sample = source[[top, left]].to_sample() * (1. - dx) * (1. - dy)
            + source[[top, right]].to_sample() * dx * (1. - dy)
            + source[[bottom, left]].to_sample() * (1. - dx) * dy
            + source[[bottom, right]].to_sample() * dx * dy;
        T::from_interpolated(sample)
    })
}

/// A fresh transform with the scale columns multiplied by the given
/// factors and the origin untouched.
fn rescaled(transform: &AffineTransform, x_factor: f64, y_factor: f64) -> AffineTransform {
    AffineTransform::new(
        transform.a() * x_factor,
        transform.b() * y_factor,
        transform.xoff(),
        transform.d() * x_factor,
        transform.e() * y_factor,
        transform.yoff(),
    )
}
