use std::path::PathBuf;

pub type Result<T> = std::result::Result<T, RastermatchError>;

#[derive(thiserror::Error, Debug)]
pub enum RastermatchError {
    #[error("could not open raster {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        source: gdal::errors::GdalError,
    },
    #[error(transparent)]
    GdalError(#[from] gdal::errors::GdalError),
    #[error(transparent)]
    NdarrayError(#[from] ndarray::ShapeError),
    #[error("array shapes {0:?} and {1:?} cannot be aligned to a common 2d grid")]
    ShapeMismatch(Box<[usize]>, Box<[usize]>),
    #[error("raster {} has degenerate dimensions {width}x{height}", .path.display())]
    InvalidGeometry {
        path: PathBuf,
        width: usize,
        height: usize,
    },
    #[error("band data type ordinal {found} does not match requested type ordinal {expected}")]
    BandTypeMismatch { expected: u32, found: u32 },
}
