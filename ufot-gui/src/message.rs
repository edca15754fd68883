//! Application message types for async communication.
//!
//! Messages are sent from background worker threads to the main UI thread
//! via channels to report completion and errors.

use std::time::Duration;

use ndarray::Array4;

/// Messages sent from background workers to the UI thread.
pub enum AppMessage {
    /// Volume construction finished.
    ///
    /// Contains the RGBA volume, the number of input files and the time
    /// taken to build it.
    VolumeReady(Box<Array4<u8>>, usize, Duration),

    /// Volume construction failed.
    VolumeError(String),
}
