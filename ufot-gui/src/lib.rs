//! ufot-gui: egui widgets for reviewing tomography data.
//!
//! - [`widgets::ProjectionViewer`]: projections with optional flat-field correction
//! - [`widgets::SliceViewer`]: reconstructed slices from image files
//! - [`widgets::OverlapViewer`]: half-scan overlap alignment
//! - [`widgets::VolumeViewer`]: gradient-opacity volume rendering
//!
//! The widgets are plain structs drawn with `show(ui)`; the `ufot-gui`
//! binary hosts all four in one window.

pub mod scene;
pub mod util;
pub mod viewer;
pub mod widgets;

pub use widgets::{build_volume, OverlapViewer, ProjectionViewer, SliceViewer, VolumeViewer};
