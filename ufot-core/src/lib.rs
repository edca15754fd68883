//! ufot-core: array operations behind the tomography review widgets.
//!
//! Frames are `f32` 2D arrays whose axis 0 is the display x axis. This crate
//! provides the percentile clipping, circular shifting, flat-field
//! correction and volume assembly that the viewers in `ufot-gui` compose.
//!

pub mod array;
pub mod error;
pub mod overlap;
pub mod stats;
pub mod volume;

pub use array::{flat_field, flip_rows, roll_rows, subsample2, subsample_items};
pub use error::{Error, Result};
pub use overlap::OverlapPair;
pub use stats::{percentile, percentiles, remove_extrema};
pub use volume::{create_volume, stack_volume, VolumeOptions};

/// A single grayscale display frame, indexed `[x, y]`.
pub type Frame = ndarray::Array2<f32>;
