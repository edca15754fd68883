//! Gradient-opacity volume rendering of an image stack.

use std::path::PathBuf;

use eframe::egui;
use ndarray::Array4;
use ufot_core::{create_volume, stack_volume, VolumeOptions};

use crate::scene::{VolumeItem, VolumeView};
use crate::util::usize_to_f32;

/// Read a subsampled image stack and turn it into an RGBA volume.
///
/// Every `step`-th file is read, each subsampled by `step` on both axes.
///
/// # Errors
/// Returns read errors, a zero step, an empty selection, or a shape
/// mismatch between images.
pub fn build_volume(filenames: &[PathBuf], step: usize) -> ufot_io::Result<Array4<u8>> {
    let frames = ufot_io::read_image_stack(filenames, step)?;
    let stacked = stack_volume(&frames)?;
    log::debug!("Stacked volume of shape {:?}", stacked.shape());
    Ok(create_volume(&stacked)?)
}

/// Renders image stacks as volumes in a 3D view.
///
/// Each load adds an item; earlier volumes stay in the scene until
/// [`VolumeViewer::clear`].
pub struct VolumeViewer {
    options: VolumeOptions,
    view: VolumeView,
}

impl Default for VolumeViewer {
    fn default() -> Self {
        Self::with_options(VolumeOptions::default())
    }
}

impl VolumeViewer {
    #[must_use]
    pub fn new(step: usize, density: usize) -> Self {
        Self::with_options(VolumeOptions::new().with_step(step).with_density(density))
    }

    #[must_use]
    pub fn with_options(options: VolumeOptions) -> Self {
        Self {
            options,
            view: VolumeView::new(),
        }
    }

    #[must_use]
    pub fn options(&self) -> VolumeOptions {
        self.options
    }

    /// Options for volumes added from now on; the scene is left untouched.
    pub fn set_options(&mut self, options: VolumeOptions) {
        self.options = options;
    }

    /// Build a volume from `filenames` and add it to the view.
    ///
    /// # Errors
    /// See [`build_volume`].
    pub fn load_data(&mut self, filenames: &[PathBuf]) -> ufot_io::Result<()> {
        let volume = build_volume(filenames, self.options.step)?;
        self.set_volume(volume);
        Ok(())
    }

    /// Add an already built RGBA volume, centred on the origin and scaled.
    pub fn set_volume(&mut self, volume: Array4<u8>) {
        let mut item = VolumeItem::new(volume, self.options.density);
        let (dx, dy, dz) = item.dims();
        item.translate(
            -usize_to_f32(dx) / 2.0,
            -usize_to_f32(dy) / 2.0,
            -usize_to_f32(dz) / 2.0,
        );
        let scale = self.options.scale;
        item.scale(scale, scale, scale, false);
        self.view.add_item(item);
    }

    /// Remove every volume from the view.
    pub fn clear(&mut self) {
        self.view.clear();
    }

    /// Fit the camera to every volume in the scene.
    pub fn frame_all(&mut self) {
        self.view.frame_all();
    }

    #[must_use]
    pub fn view(&self) -> &VolumeView {
        &self.view
    }

    pub fn show(&mut self, ui: &mut egui::Ui) {
        self.view.show(ui);
    }
}
