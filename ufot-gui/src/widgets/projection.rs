//! Projection browser with optional flat-field correction.

use std::path::Path;

use eframe::egui;
use ufot_core::flat_field;
use ufot_io::{Aps32idDataset, ProjectionSource};

use crate::viewer::{FrameSlider, ImageDisplay};

/// Shows one projection of a dataset at a time, selected by a slider.
///
/// With flat-field correction enabled the projection is divided by the
/// first flat-field frame before display.
pub struct ProjectionViewer {
    display: ImageDisplay,
    slider: FrameSlider,
    source: Option<Box<dyn ProjectionSource>>,
    ffc_correction: bool,
}

impl Default for ProjectionViewer {
    fn default() -> Self {
        Self::new()
    }
}

impl ProjectionViewer {
    #[must_use]
    pub fn new() -> Self {
        Self {
            display: ImageDisplay::new("projection_view"),
            slider: FrameSlider::new(),
            source: None,
            ffc_correction: false,
        }
    }

    /// Open an HDF5 projection dataset and show its first frame.
    ///
    /// # Errors
    /// Returns an error if the file cannot be opened or frame 0 cannot be
    /// read; the viewer keeps the new dataset in the latter case.
    pub fn load_files<P: AsRef<Path>>(&mut self, path: P, ffc_correction: bool) -> ufot_io::Result<()> {
        let path = path.as_ref();
        log::debug!("Loading projections from {}", path.display());
        let dataset = Aps32idDataset::open(path)?;
        self.load_source(Box::new(dataset), ffc_correction)
    }

    /// Show frames from an already opened source, starting at frame 0.
    ///
    /// # Errors
    /// Returns the error from reading frame 0.
    pub fn load_source(
        &mut self,
        source: Box<dyn ProjectionSource>,
        ffc_correction: bool,
    ) -> ufot_io::Result<()> {
        let frames = source.frame_count();
        self.slider.set_range(0, frames.saturating_sub(1));
        self.slider.set_value(0);
        self.ffc_correction = ffc_correction;
        self.source = Some(source);
        self.display.clear();
        self.update_image()
    }

    /// Read the frame at the current position and display it.
    ///
    /// Does nothing before a dataset is loaded.
    ///
    /// # Errors
    /// Propagates reader errors and a flat-field shape mismatch.
    pub fn update_image(&mut self) -> ufot_io::Result<()> {
        let Some(source) = &self.source else {
            return Ok(());
        };
        if source.frame_count() == 0 {
            return Ok(());
        }
        let mut frame = source.read_projection(self.slider.value())?;
        if self.ffc_correction {
            let flat = source.read_flat()?;
            frame = flat_field(frame.view(), flat.view())?;
        }
        self.display.set_image(frame);
        Ok(())
    }

    #[must_use]
    pub fn position(&self) -> usize {
        self.slider.value()
    }

    /// Move the slider and redraw if the position changed.
    ///
    /// # Errors
    /// See [`ProjectionViewer::update_image`].
    pub fn set_position(&mut self, position: usize) -> ufot_io::Result<()> {
        if self.slider.set_value(position) {
            self.update_image()?;
        }
        Ok(())
    }

    /// Inclusive slider range.
    #[must_use]
    pub fn range(&self) -> (usize, usize) {
        self.slider.range()
    }

    #[must_use]
    pub fn ffc_correction(&self) -> bool {
        self.ffc_correction
    }

    /// Toggle flat-field correction and redraw.
    ///
    /// # Errors
    /// See [`ProjectionViewer::update_image`].
    pub fn set_ffc_correction(&mut self, enabled: bool) -> ufot_io::Result<()> {
        if self.ffc_correction != enabled {
            self.ffc_correction = enabled;
            self.update_image()?;
        }
        Ok(())
    }

    /// Dark-field frames in the loaded dataset, zero before loading.
    #[must_use]
    pub fn dark_count(&self) -> usize {
        self.source.as_ref().map_or(0, |s| s.dark_count())
    }

    #[must_use]
    pub fn is_loaded(&self) -> bool {
        self.source.is_some()
    }

    #[must_use]
    pub fn display(&self) -> &ImageDisplay {
        &self.display
    }

    /// Draw slider, correction toggle and image.
    ///
    /// # Errors
    /// Returns the error of a redraw triggered by the controls.
    pub fn show(&mut self, ui: &mut egui::Ui) -> ufot_io::Result<bool> {
        let mut changed = false;
        let mut ffc = self.ffc_correction;
        ui.horizontal(|ui| {
            ui.checkbox(&mut ffc, "Flat-field correction");
            if self.is_loaded() {
                ui.label(format!("{} darks", self.dark_count()));
            }
            if let Some(theta) = self
                .source
                .as_ref()
                .and_then(|s| s.theta(self.slider.value()))
            {
                ui.label(format!("θ = {theta:.2}°"));
            }
        });
        if self.slider.show(ui) {
            changed = true;
        }
        let mut result = Ok(());
        if ffc != self.ffc_correction {
            self.ffc_correction = ffc;
            changed = true;
        }
        if changed {
            result = self.update_image();
        }
        self.display.show(ui);
        result.map(|()| changed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::{Array2, Array3};
    use ufot_io::InMemoryProjections;

    fn ramp_source(frames: usize) -> InMemoryProjections {
        let stack = Array3::from_shape_fn((frames, 3, 4), |(i, r, c)| (i * 100 + r * 4 + c) as f32);
        InMemoryProjections::new(stack).with_flat(Array2::ones((3, 4)))
    }

    #[test]
    fn test_update_before_load_is_noop() {
        let mut viewer = ProjectionViewer::new();
        assert!(viewer.update_image().is_ok());
        assert!(viewer.display().image().is_none());
        assert!(!viewer.is_loaded());
    }

    #[test]
    fn test_ten_frames_with_unit_flat() {
        let source = ramp_source(10);
        let expected = source.read_projection(5).unwrap();

        let mut viewer = ProjectionViewer::new();
        viewer.load_source(Box::new(source), true).unwrap();
        assert_eq!(viewer.range(), (0, 9));
        assert_eq!(viewer.position(), 0);

        viewer.set_position(5).unwrap();
        assert_eq!(viewer.display().image(), Some(&expected));
    }

    #[test]
    fn test_reload_with_fewer_frames_resets_slider() {
        let mut viewer = ProjectionViewer::new();
        viewer.load_source(Box::new(ramp_source(10)), false).unwrap();
        viewer.set_position(9).unwrap();
        assert_eq!(viewer.position(), 9);

        let smaller = ramp_source(3);
        let expected = smaller.read_projection(0).unwrap();
        viewer.load_source(Box::new(smaller), false).unwrap();
        assert_eq!(viewer.range(), (0, 2));
        assert_eq!(viewer.position(), 0);
        assert_eq!(viewer.display().image(), Some(&expected));
    }

    #[test]
    fn test_flat_field_divides() {
        let stack = Array3::from_elem((2, 2, 2), 6.0_f32);
        let source = InMemoryProjections::new(stack).with_flat(Array2::from_elem((2, 2), 3.0));

        let mut viewer = ProjectionViewer::new();
        viewer.load_source(Box::new(source), false).unwrap();
        assert!(viewer
            .display()
            .image()
            .unwrap()
            .iter()
            .all(|&v| (v - 6.0).abs() < f32::EPSILON));

        viewer.set_ffc_correction(true).unwrap();
        assert!(viewer
            .display()
            .image()
            .unwrap()
            .iter()
            .all(|&v| (v - 2.0).abs() < f32::EPSILON));
    }

    #[test]
    fn test_missing_flat_is_an_error() {
        let source = InMemoryProjections::new(Array3::zeros((3, 2, 2)));
        let mut viewer = ProjectionViewer::new();
        assert!(matches!(
            viewer.load_source(Box::new(source), true),
            Err(ufot_io::Error::InvalidFormat(_))
        ));
    }

    #[test]
    fn test_load_hdf5_dataset() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("scan.h5");
        {
            let file = hdf5::File::create(&path).unwrap();
            let group = file.create_group("exchange").unwrap();
            let data = Array3::from_shape_fn((4, 2, 3), |(i, _, _)| (i * 10) as u16);
            group
                .new_dataset_builder()
                .with_data(&data)
                .create("data")
                .unwrap();
            group
                .new_dataset_builder()
                .with_data(&Array3::from_elem((1, 2, 3), 2.0_f32))
                .create("data_white")
                .unwrap();
            group
                .new_dataset_builder()
                .with_data(&Array3::<u16>::zeros((2, 2, 3)))
                .create("data_dark")
                .unwrap();
        }

        let mut viewer = ProjectionViewer::new();
        assert_eq!(viewer.dark_count(), 0);
        viewer.load_files(&path, true).unwrap();
        assert_eq!(viewer.range(), (0, 3));
        assert_eq!(viewer.dark_count(), 2);

        viewer.set_position(3).unwrap();
        let frame = viewer.display().image().unwrap();
        assert_eq!(frame.dim(), (2, 3));
        assert!(frame.iter().all(|&v| (v - 15.0).abs() < f32::EPSILON));
    }
}
