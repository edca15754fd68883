//! Projection dataset access.
//!
//! A projection dataset is a stack of radiographs plus flat-field (open
//! beam) frames. Viewers read it one frame at a time through
//! [`ProjectionSource`].

use ndarray::{Array3, Axis};
use ufot_core::Frame;

use crate::{Error, Result};

/// Random access to the frames of a projection dataset.
pub trait ProjectionSource {
    /// Number of projection frames.
    fn frame_count(&self) -> usize;

    /// Read projection `index` as a float frame.
    ///
    /// # Errors
    /// Returns [`Error::FrameOutOfRange`] for an index past the end, or the
    /// underlying reader's error.
    fn read_projection(&self, index: usize) -> Result<Frame>;

    /// Read the first flat-field frame.
    ///
    /// # Errors
    /// Returns the underlying reader's error, or [`Error::InvalidFormat`] if
    /// the dataset has no flat fields.
    fn read_flat(&self) -> Result<Frame>;

    /// Rotation angle of projection `index`, if the dataset records one.
    fn theta(&self, _index: usize) -> Option<f32> {
        None
    }

    /// Number of dark-field frames recorded alongside the projections.
    fn dark_count(&self) -> usize {
        0
    }
}

/// A projection dataset held entirely in memory.
#[derive(Debug, Clone)]
pub struct InMemoryProjections {
    projections: Array3<f32>,
    flat: Option<Frame>,
    theta: Option<Vec<f32>>,
}

impl InMemoryProjections {
    /// Wrap a `(frames, rows, columns)` projection stack.
    #[must_use]
    pub fn new(projections: Array3<f32>) -> Self {
        Self {
            projections,
            flat: None,
            theta: None,
        }
    }

    /// Attach a flat-field frame.
    #[must_use]
    pub fn with_flat(mut self, flat: Frame) -> Self {
        self.flat = Some(flat);
        self
    }

    /// Attach per-projection rotation angles.
    #[must_use]
    pub fn with_theta(mut self, theta: Vec<f32>) -> Self {
        self.theta = Some(theta);
        self
    }
}

impl ProjectionSource for InMemoryProjections {
    fn frame_count(&self) -> usize {
        self.projections.len_of(Axis(0))
    }

    fn read_projection(&self, index: usize) -> Result<Frame> {
        let count = self.frame_count();
        if index >= count {
            return Err(Error::FrameOutOfRange { index, count });
        }
        Ok(self.projections.index_axis(Axis(0), index).to_owned())
    }

    fn read_flat(&self) -> Result<Frame> {
        self.flat
            .clone()
            .ok_or_else(|| Error::InvalidFormat("dataset has no flat-field frames".to_string()))
    }

    fn theta(&self, index: usize) -> Option<f32> {
        self.theta.as_ref().and_then(|t| t.get(index).copied())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::Array2;

    #[test]
    fn test_in_memory_projection_access() {
        let stack = Array3::from_shape_fn((3, 2, 2), |(i, _, _)| i as f32);
        let source = InMemoryProjections::new(stack)
            .with_flat(Array2::ones((2, 2)))
            .with_theta(vec![0.0, 90.0, 180.0]);

        assert_eq!(source.frame_count(), 3);
        let frame = source.read_projection(2).unwrap();
        assert!(frame.iter().all(|&v| (v - 2.0).abs() < f32::EPSILON));
        assert_eq!(source.theta(1), Some(90.0));
        assert_eq!(source.theta(5), None);
        assert!(source.read_flat().is_ok());
    }

    #[test]
    fn test_in_memory_out_of_range() {
        let source = InMemoryProjections::new(Array3::zeros((2, 1, 1)));
        assert!(matches!(
            source.read_projection(2),
            Err(Error::FrameOutOfRange { index: 2, count: 2 })
        ));
        assert!(matches!(source.read_flat(), Err(Error::InvalidFormat(_))));
    }
}
