use std::{
    fmt::Debug,
    path::{Path, PathBuf},
};

use gdal::{raster::GdalType, Dataset};
use geo::AffineTransform;
use log::info;
use ndarray::Array2;
use num_traits::Zero;

use crate::errors::{RastermatchError, Result};

/// Pixel types a GDAL band can be read as.
pub trait RasterValue: GdalType + Zero + PartialEq + Copy + Send + Sync + Debug {
    fn to_sample(self) -> f64;
    /// Cast an interpolated sample back to the band data type.
    fn from_interpolated(value: f64) -> Self;
}

macro_rules! raster_value_int {
    ($($t:ty),*) => {$(
        impl RasterValue for $t {
            fn to_sample(self) -> f64 {
                self as f64
            }
            // round half away from zero, like GDAL filling integer buffers
            fn from_interpolated(value: f64) -> Self {
                value.round() as $t
            }
        }
    )*};
}

macro_rules! raster_value_float {
    ($($t:ty),*) => {$(
        impl RasterValue for $t {
            fn to_sample(self) -> f64 {
                self as f64
            }
            fn from_interpolated(value: f64) -> Self {
                value as $t
            }
        }
    )*};
}

raster_value_int!(u8, u16, i16, u32, i32);
raster_value_float!(f32, f64);

fn affine_from_gdal(gdal_transform: [f64; 6]) -> AffineTransform {
    AffineTransform::new(
        gdal_transform[1],
        gdal_transform[2],
        gdal_transform[0],
        gdal_transform[4],
        gdal_transform[5],
        gdal_transform[3],
    )
}

/// Rejects rasters whose scale ratio would be degenerate. GDAL sizes
/// are unsigned, so zero is the only degenerate case left to catch.
fn ensure_nondegenerate(path: &Path, (width, height): (usize, usize)) -> Result<()> {
    if width == 0 || height == 0 {
        return Err(RastermatchError::InvalidGeometry {
            path: path.to_path_buf(),
            width,
            height,
        });
    }
    Ok(())
}

/// Read-only handle to a raster dataset.
///
/// The underlying GDAL dataset is closed when the handle drops,
/// on error paths included.
#[derive(Debug)]
pub struct RasterFile {
    path: PathBuf,
    dataset: Dataset,
}

impl RasterFile {
    /// Opens a raster read-only.
    ///
    /// Degenerate dimensions are rejected here, before any pixel
    /// data is touched.
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref().to_path_buf();
        let dataset = Dataset::open(&path).map_err(|source| RastermatchError::Io {
            path: path.clone(),
            source,
        })?;
        let (width, height) = dataset.raster_size();
        ensure_nondegenerate(&path, (width, height))?;
        info!("opened raster {} ({width}x{height})", path.display());
        Ok(Self { path, dataset })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// (width, height) in pixels.
    pub fn size(&self) -> (usize, usize) {
        self.dataset.raster_size()
    }

    pub fn transform(&self) -> Result<AffineTransform> {
        Ok(affine_from_gdal(self.dataset.geo_transform()?))
    }

    /// Reads the full window of a band (1-based index) into a row-major
    /// `(height, width)` array.
    pub fn read_band<T: RasterValue>(&self, index: usize) -> Result<Array2<T>> {
        let rasterband = self.dataset.rasterband(index)?;
        if T::gdal_ordinal() != rasterband.band_type() as u32 {
            return Err(RastermatchError::BandTypeMismatch {
                expected: T::gdal_ordinal(),
                found: rasterband.band_type() as u32,
            });
        }
        let size = (rasterband.x_size(), rasterband.y_size());
        let buffer = rasterband.read_as::<T>((0, 0), size, size, None)?;
        Ok(Array2::from_shape_vec(
            (size.1, size.0),
            buffer.data().to_vec(),
        )?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case([0.5, 0., 0., 0., 0., -0.5])]
    #[case([432000., 10., 0., 5322000., 0., -10.])]
    fn affine_keeps_gdal_coefficients(#[case] gdal_transform: [f64; 6]) {
        let transform = affine_from_gdal(gdal_transform);
        assert_eq!(transform.a(), gdal_transform[1]);
        assert_eq!(transform.b(), gdal_transform[2]);
        assert_eq!(transform.xoff(), gdal_transform[0]);
        assert_eq!(transform.d(), gdal_transform[4]);
        assert_eq!(transform.e(), gdal_transform[5]);
        assert_eq!(transform.yoff(), gdal_transform[3]);
    }

    #[rstest]
    #[case(1.5f64, 2)]
    #[case(-1.5f64, -2)]
    #[case(2.4f64, 2)]
    fn integer_samples_round_half_away_from_zero(#[case] sample: f64, #[case] expected: i32) {
        assert_eq!(i32::from_interpolated(sample), expected);
    }

    #[rstest]
    fn float_samples_keep_their_fraction() {
        assert_eq!(f32::from_interpolated(1.5), 1.5f32);
        assert_eq!(f64::from_interpolated(-0.25), -0.25);
    }

    #[rstest]
    #[case((0, 4))]
    #[case((4, 0))]
    #[case((0, 0))]
    fn degenerate_dimensions_are_rejected(#[case] size: (usize, usize)) {
        let error = ensure_nondegenerate(Path::new("broken.tif"), size).unwrap_err();
        assert!(matches!(
            error,
            RastermatchError::InvalidGeometry { width, height, .. }
                if (width, height) == size
        ));
    }

    #[rstest]
    fn regular_dimensions_pass() {
        assert!(ensure_nondegenerate(Path::new("fine.tif"), (4, 4)).is_ok());
    }
}
