//! Overlap alignment of two half scans.

use eframe::egui;
use ufot_core::{Frame, OverlapPair};

use crate::viewer::{FrameSlider, ImageDisplay};

/// Shows the difference between a first image and the shifted, mirrored
/// second image. The slider picks the shift; a uniform display means the
/// scans line up.
pub struct OverlapViewer {
    display: ImageDisplay,
    slider: FrameSlider,
    pair: Option<OverlapPair>,
}

impl Default for OverlapViewer {
    fn default() -> Self {
        Self::new()
    }
}

impl OverlapViewer {
    #[must_use]
    pub fn new() -> Self {
        Self {
            display: ImageDisplay::new("overlap_view"),
            slider: FrameSlider::new(),
            pair: None,
        }
    }

    /// Set the image pair and show the difference at the centre position.
    ///
    /// Differently shaped images are accepted with a warning; the difference
    /// then cannot be formed and the error is returned.
    ///
    /// # Errors
    /// Returns [`ufot_core::Error::EmptyInput`] for an empty image, or the
    /// shape mismatch from the first redraw.
    pub fn set_images(&mut self, first: &Frame, second: &Frame) -> ufot_core::Result<()> {
        let pair = OverlapPair::new(first, second)?;
        if !pair.shape_matches() {
            log::warn!(
                "Shape of first {:?} is different from second {:?}",
                first.shape(),
                second.shape()
            );
        }
        self.slider.set_range(0, pair.rows());
        self.slider.set_value(pair.centre());
        self.pair = Some(pair);
        self.update_image()
    }

    /// Display the difference for the current position.
    ///
    /// # Errors
    /// Returns [`ufot_core::Error::ShapeMismatch`] for a mismatched pair; the
    /// display keeps its previous frame.
    pub fn update_image(&mut self) -> ufot_core::Result<()> {
        let Some(pair) = &self.pair else {
            log::warn!("No images set yet");
            return Ok(());
        };
        let difference = pair.difference(self.slider.value())?;
        self.display.set_image(difference);
        Ok(())
    }

    #[must_use]
    pub fn position(&self) -> usize {
        self.slider.value()
    }

    /// Move the slider and redraw if the position changed.
    ///
    /// # Errors
    /// See [`OverlapViewer::update_image`].
    pub fn set_position(&mut self, position: usize) -> ufot_core::Result<()> {
        if self.slider.set_value(position) {
            self.update_image()?;
        }
        Ok(())
    }

    #[must_use]
    pub fn range(&self) -> (usize, usize) {
        self.slider.range()
    }

    /// Row shift currently applied to the second image.
    #[must_use]
    pub fn shift(&self) -> Option<isize> {
        self.pair.as_ref().map(|p| p.shift_for(self.slider.value()))
    }

    #[must_use]
    pub fn display(&self) -> &ImageDisplay {
        &self.display
    }

    /// Draw slider, shift label and difference image.
    ///
    /// # Errors
    /// Returns the error of a redraw triggered by the slider.
    pub fn show(&mut self, ui: &mut egui::Ui) -> ufot_core::Result<bool> {
        if let Some(shift) = self.shift() {
            ui.label(format!("Shift: {shift} px"));
        }
        let changed = self.slider.show(ui);
        let result = if changed { self.update_image() } else { Ok(()) };
        self.display.show(ui);
        result.map(|()| changed)
    }
}
