//! Volume assembly and the gradient-opacity RGBA transfer function.

use ndarray::{s, Array3, Array4, ArrayBase, Data, Ix3};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::Frame;

/// Settings for building and placing a rendered volume.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct VolumeOptions {
    /// Subsampling step applied to the file list and to both image axes.
    pub step: usize,
    /// Number of samples taken per voxel when rendering.
    pub density: usize,
    /// Uniform world-space scale applied after centering.
    pub scale: f32,
}

impl Default for VolumeOptions {
    fn default() -> Self {
        Self {
            step: 1,
            density: 1,
            scale: 0.05,
        }
    }
}

impl VolumeOptions {
    /// Creates volume options with default values.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the subsampling step.
    #[must_use]
    pub fn with_step(mut self, step: usize) -> Self {
        self.step = step;
        self
    }

    /// Sets the per-voxel sampling density.
    #[must_use]
    pub fn with_density(mut self, density: usize) -> Self {
        self.density = density;
        self
    }

    /// Sets the world-space scale.
    #[must_use]
    pub fn with_scale(mut self, scale: f32) -> Self {
        self.scale = scale;
        self
    }
}

/// Stack equally shaped frames along a new trailing axis.
///
/// Frame `i` becomes `volume[.., .., i]`, giving a `(width, height, n)`
/// volume.
///
/// # Errors
/// Returns [`Error::EmptyInput`] with no frames and
/// [`Error::ShapeMismatch`] when a frame differs in shape from the first.
pub fn stack_volume(frames: &[Frame]) -> Result<Array3<f32>> {
    let first = frames.first().ok_or(Error::EmptyInput)?;
    let (width, height) = first.dim();

    let mut volume = Array3::<f32>::zeros((width, height, frames.len()));
    for (i, frame) in frames.iter().enumerate() {
        if frame.dim() != (width, height) {
            return Err(Error::shape_mismatch(first.shape(), frame.shape()));
        }
        volume.slice_mut(s![.., .., i]).assign(frame);
    }
    Ok(volume)
}

/// Build an RGBA volume whose opacity follows the local intensity change.
///
/// The squared difference between each voxel and its predecessor in flat
/// (row-major) order, wrapping the last voxel onto the first, is scaled to
/// `[0, 255]` and used as alpha. Red, green and blue carry the raw intensity
/// cast to `u8` (saturating, NaN becomes 0). A volume without any intensity
/// change gets zero alpha everywhere.
///
/// # Errors
/// Returns [`Error::EmptyInput`] for an empty volume.
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
pub fn create_volume<S>(data: &ArrayBase<S, Ix3>) -> Result<Array4<u8>>
where
    S: Data<Elem = f32>,
{
    if data.is_empty() {
        return Err(Error::EmptyInput);
    }

    let values: Vec<f32> = data.iter().copied().collect();
    let n = values.len();
    let gradient: Vec<f32> = (0..n)
        .map(|i| {
            let diff = values[i] - values[(i + n - 1) % n];
            diff * diff
        })
        .collect();

    let cmin = gradient.iter().copied().fold(f32::INFINITY, f32::min);
    let cmax = gradient.iter().copied().fold(f32::NEG_INFINITY, f32::max);
    let div = cmax - cmin;

    let (width, height, depth) = data.dim();
    let volume = Array4::from_shape_fn((width, height, depth, 4), |(x, y, z, c)| {
        let flat = (x * height + y) * depth + z;
        if c < 3 {
            values[flat] as u8
        } else if div > 0.0 {
            ((gradient[flat] - cmin) / div * 255.0) as u8
        } else {
            0
        }
    });
    Ok(volume)
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::{arr2, Array2};

    #[test]
    fn test_volume_options_builder() {
        let options = VolumeOptions::new().with_step(2).with_density(4).with_scale(0.1);
        assert_eq!(options.step, 2);
        assert_eq!(options.density, 4);
        assert!((options.scale - 0.1).abs() < f32::EPSILON);
        assert_eq!(VolumeOptions::default().step, 1);
    }

    #[test]
    fn test_stack_volume_places_frames_on_last_axis() {
        let frames = vec![
            arr2(&[[1.0_f32, 2.0], [3.0, 4.0], [5.0, 6.0]]),
            arr2(&[[10.0_f32, 20.0], [30.0, 40.0], [50.0, 60.0]]),
        ];
        let volume = stack_volume(&frames).unwrap();
        assert_eq!(volume.shape(), &[3, 2, 2]);
        assert!((volume[[2, 1, 0]] - 6.0).abs() < f32::EPSILON);
        assert!((volume[[2, 1, 1]] - 60.0).abs() < f32::EPSILON);
    }

    #[test]
    fn test_stack_volume_errors() {
        assert_eq!(stack_volume(&[]), Err(Error::EmptyInput));
        let frames = vec![Array2::<f32>::zeros((2, 2)), Array2::<f32>::zeros((2, 3))];
        assert!(matches!(
            stack_volume(&frames),
            Err(Error::ShapeMismatch { .. })
        ));
    }

    #[test]
    fn test_create_volume_shape_and_channels() {
        let data = Array3::from_shape_fn((3, 4, 5), |(x, y, z)| (x + y + z) as f32);
        let volume = create_volume(&data).unwrap();
        assert_eq!(volume.shape(), &[3, 4, 5, 4]);
        assert_eq!(volume[[2, 3, 4, 0]], 9);
        assert_eq!(volume[[2, 3, 4, 1]], 9);
        assert_eq!(volume[[2, 3, 4, 2]], 9);
    }

    #[test]
    fn test_create_volume_alpha_follows_flat_roll() {
        // Flat order: 0, 0, 0, 2 -> squared diffs vs predecessor: 4, 0, 0, 4
        let mut data = Array3::<f32>::zeros((1, 2, 2));
        data[[0, 1, 1]] = 2.0;
        let volume = create_volume(&data).unwrap();
        assert_eq!(volume[[0, 0, 0, 3]], 255);
        assert_eq!(volume[[0, 0, 1, 3]], 0);
        assert_eq!(volume[[0, 1, 0, 3]], 0);
        assert_eq!(volume[[0, 1, 1, 3]], 255);
    }

    #[test]
    fn test_create_volume_constant_has_zero_alpha() {
        let data = Array3::from_elem((2, 2, 2), 7.0_f32);
        let volume = create_volume(&data).unwrap();
        assert!(volume.slice(s![.., .., .., 3]).iter().all(|&a| a == 0));
    }

    #[test]
    fn test_create_volume_saturates_intensity() {
        let mut data = Array3::<f32>::zeros((1, 1, 2));
        data[[0, 0, 0]] = 300.0;
        data[[0, 0, 1]] = -5.0;
        let volume = create_volume(&data).unwrap();
        assert_eq!(volume[[0, 0, 0, 0]], 255);
        assert_eq!(volume[[0, 0, 1, 0]], 0);
    }

    #[test]
    fn test_create_volume_empty() {
        let data = Array3::<f32>::zeros((0, 2, 2));
        assert_eq!(create_volume(&data), Err(Error::EmptyInput));
    }
}
