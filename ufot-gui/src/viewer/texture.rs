//! Texture generation for frame display.

use egui::ColorImage;
use ufot_core::Frame;

use crate::util::f32_to_u8;

/// Display range mapped onto black..white.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Levels {
    /// Value shown as black.
    pub min: f32,
    /// Value shown as white.
    pub max: f32,
}

impl Default for Levels {
    fn default() -> Self {
        Self { min: 0.0, max: 1.0 }
    }
}

impl Levels {
    /// Auto levels: the finite min/max of `frame`.
    ///
    /// Frames without any finite value fall back to `[0, 1]`.
    #[must_use]
    pub fn from_frame(frame: &Frame) -> Self {
        let (min, max) = frame
            .iter()
            .filter(|v| v.is_finite())
            .fold((f32::INFINITY, f32::NEG_INFINITY), |(lo, hi), &v| {
                (lo.min(v), hi.max(v))
            });
        if min > max {
            Self::default()
        } else {
            Self { min, max }
        }
    }

    /// Map a raw value to `[0, 1]`. A degenerate range maps everything to 0.5.
    #[must_use]
    pub fn normalize(self, value: f32) -> f32 {
        if (self.max - self.min).abs() < f32::EPSILON {
            return 0.5;
        }
        ((value - self.min) / (self.max - self.min)).clamp(0.0, 1.0)
    }
}

/// Render a frame as a grayscale image.
///
/// Axis 0 of the frame runs left to right and axis 1 top to bottom, so the
/// image is `frame.nrows()` pixels wide. Non-finite samples are drawn black.
#[must_use]
pub fn frame_to_color_image(frame: &Frame, levels: Levels) -> ColorImage {
    let (width, height) = frame.dim();
    let mut pixels = vec![0u8; width * height * 4];

    for ((x, y), &value) in frame.indexed_iter() {
        let gray = if value.is_finite() {
            f32_to_u8(levels.normalize(value) * 255.0)
        } else {
            0
        };
        let offset = (y * width + x) * 4;
        pixels[offset..offset + 4].copy_from_slice(&[gray, gray, gray, 255]);
    }

    ColorImage::from_rgba_unmultiplied([width, height], &pixels)
}
