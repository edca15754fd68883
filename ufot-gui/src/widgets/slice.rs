//! Browser over a list of reconstructed slice images.

use std::path::PathBuf;

use eframe::egui;

use crate::viewer::{FrameSlider, ImageDisplay};

/// Shows one slice file at a time. Every position change re-reads the file.
pub struct SliceViewer {
    display: ImageDisplay,
    slider: FrameSlider,
    filenames: Vec<PathBuf>,
}

impl Default for SliceViewer {
    fn default() -> Self {
        Self {
            display: ImageDisplay::new("slice_view"),
            slider: FrameSlider::new(),
            filenames: Vec::new(),
        }
    }
}

impl SliceViewer {
    /// Create a viewer and load `filenames` right away.
    ///
    /// # Errors
    /// Returns the error from reading the first file.
    pub fn new(filenames: Vec<PathBuf>) -> ufot_io::Result<Self> {
        let mut viewer = Self::default();
        viewer.load_files(filenames)?;
        Ok(viewer)
    }

    /// Replace the file list and show the first file.
    ///
    /// An empty list leaves the display empty.
    ///
    /// # Errors
    /// Returns the error from reading the first file.
    pub fn load_files(&mut self, filenames: Vec<PathBuf>) -> ufot_io::Result<()> {
        log::debug!("Loading {} slice files", filenames.len());
        self.slider.set_range(0, filenames.len().saturating_sub(1));
        self.slider.set_value(0);
        self.filenames = filenames;
        self.display.clear();
        self.update_image()
    }

    /// Read and display the file at the current position.
    ///
    /// # Errors
    /// Returns the reader's error; the previous image stays on screen.
    pub fn update_image(&mut self) -> ufot_io::Result<()> {
        let Some(path) = self.filenames.get(self.slider.value()) else {
            return Ok(());
        };
        let frame = ufot_io::read_image(path)?;
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
    /// See [`SliceViewer::update_image`].
    pub fn set_position(&mut self, position: usize) -> ufot_io::Result<()> {
        if self.slider.set_value(position) {
            self.update_image()?;
        }
        Ok(())
    }

    #[must_use]
    pub fn range(&self) -> (usize, usize) {
        self.slider.range()
    }

    #[must_use]
    pub fn filenames(&self) -> &[PathBuf] {
        &self.filenames
    }

    #[must_use]
    pub fn display(&self) -> &ImageDisplay {
        &self.display
    }

    /// Draw file name, slider and image.
    ///
    /// # Errors
    /// Returns the error of a redraw triggered by the slider.
    pub fn show(&mut self, ui: &mut egui::Ui) -> ufot_io::Result<bool> {
        if let Some(name) = self
            .filenames
            .get(self.slider.value())
            .and_then(|p| p.file_name())
        {
            ui.label(name.to_string_lossy());
        }
        let changed = self.slider.show(ui);
        let result = if changed { self.update_image() } else { Ok(()) };
        self.display.show(ui);
        result.map(|()| changed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs::File;
    use std::io::BufWriter;
    use std::path::Path;
    use tiff::encoder::{colortype, TiffEncoder};

    fn write_slice(path: &Path, seed: u16) {
        let (width, height) = (5_u32, 3_u32);
        let data: Vec<u16> = (0..width * height)
            .map(|i| seed * 100 + u16::try_from(i).unwrap())
            .collect();
        let mut encoder = TiffEncoder::new(BufWriter::new(File::create(path).unwrap())).unwrap();
        encoder
            .write_image::<colortype::Gray16>(width, height, &data)
            .unwrap();
    }

    #[test]
    fn test_display_matches_file_at_every_position() {
        let dir = tempfile::tempdir().unwrap();
        let filenames: Vec<PathBuf> = (0..4)
            .map(|i| {
                let path = dir.path().join(format!("slice_{i:03}.tif"));
                write_slice(&path, i);
                path
            })
            .collect();

        let mut viewer = SliceViewer::new(filenames.clone()).unwrap();
        assert_eq!(viewer.range(), (0, 3));
        for (p, path) in filenames.iter().enumerate() {
            viewer.set_position(p).unwrap();
            let expected = ufot_io::read_image(path).unwrap();
            assert_eq!(viewer.display().image(), Some(&expected));
        }
    }

    #[test]
    fn test_reload_with_fewer_files_resets_slider() {
        let dir = tempfile::tempdir().unwrap();
        let paths: Vec<PathBuf> = (0..10)
            .map(|i| {
                let path = dir.path().join(format!("slice_{i:03}.tif"));
                write_slice(&path, i);
                path
            })
            .collect();

        let mut viewer = SliceViewer::new(paths.clone()).unwrap();
        viewer.set_position(9).unwrap();
        assert_eq!(viewer.position(), 9);

        viewer.load_files(paths[..3].to_vec()).unwrap();
        assert_eq!(viewer.range(), (0, 2));
        assert_eq!(viewer.position(), 0);
        let expected = ufot_io::read_image(&paths[0]).unwrap();
        assert_eq!(viewer.display().image(), Some(&expected));
    }

    #[test]
    fn test_empty_list() {
        let viewer = SliceViewer::new(Vec::new()).unwrap();
        assert_eq!(viewer.range(), (0, 0));
        assert!(viewer.display().image().is_none());
    }

    #[test]
    fn test_missing_file_is_an_error() {
        let result = SliceViewer::new(vec![PathBuf::from("/nonexistent/slice.tif")]);
        assert!(result.is_err());
    }
}
