//! ufot-io: readers for tomography review data.
//!
//! Single images (TIFF via the `tiff` crate, other formats via `image`) are
//! returned as `(x, y)` ordered frames. Projection datasets are accessed
//! frame by frame through [`ProjectionSource`]; the HDF5 Data Exchange
//! reader is behind the `hdf5` feature.
//!

mod error;
#[cfg(feature = "hdf5")]
pub mod hdf5;
mod listing;
pub mod projection;
mod raster;

pub use error::{Error, Result};
#[cfg(feature = "hdf5")]
pub use hdf5::Aps32idDataset;
pub use listing::list_image_files;
pub use projection::{InMemoryProjections, ProjectionSource};
pub use raster::{is_image_file, read_image, read_image_stack, read_tiff, IMAGE_EXTENSIONS};
