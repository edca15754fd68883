//! I/O error types.

use thiserror::Error;

/// Result type for I/O operations.
pub type Result<T> = std::result::Result<T, Error>;

/// I/O error types.
#[derive(Error, Debug)]
pub enum Error {
    /// File I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// TIFF decoding error.
    #[error("TIFF error: {0}")]
    Tiff(#[from] tiff::TiffError),

    /// Generic image decoding error.
    #[error("image error: {0}")]
    Image(#[from] image::ImageError),

    /// HDF5 library error.
    #[cfg(feature = "hdf5")]
    #[error("HDF5 error: {0}")]
    Hdf5(#[from] hdf5::Error),

    /// Invalid file format.
    #[error("invalid file format: {0}")]
    InvalidFormat(String),

    /// Pixel type that cannot be read as grayscale.
    #[error("unsupported data type: {0}")]
    UnsupportedDataType(String),

    /// Frame index past the end of a dataset.
    #[error("frame {index} out of range for dataset with {count} frames")]
    FrameOutOfRange { index: usize, count: usize },

    /// Core library error.
    #[error("core error: {0}")]
    Core(#[from] ufot_core::Error),
}
