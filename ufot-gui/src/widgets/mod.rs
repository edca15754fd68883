//! Viewer widgets for tomography review.

pub mod overlap;
pub mod projection;
pub mod slice;
pub mod volume;

pub use overlap::OverlapViewer;
pub use projection::ProjectionViewer;
pub use slice::SliceViewer;
pub use volume::{build_volume, VolumeViewer};
