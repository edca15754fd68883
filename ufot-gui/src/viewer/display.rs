//! Aspect-locked 2D image display.

use eframe::egui;
use egui_plot::{Plot, PlotImage, PlotPoint};
use ufot_core::Frame;

use crate::util::{f64_to_usize_bounded, usize_to_f32, usize_to_f64};
use crate::viewer::texture::{frame_to_color_image, Levels};

/// Shows the most recently pushed frame inside a zoomable plot.
///
/// Only the current frame is kept. The texture is rebuilt lazily on the
/// next [`ImageDisplay::show`] after a new frame arrives.
pub struct ImageDisplay {
    id: String,
    frame: Option<Frame>,
    levels: Levels,
    texture: Option<egui::TextureHandle>,
    dirty: bool,
    cursor_info: Option<(usize, usize, f32)>,
}

impl ImageDisplay {
    /// Create an empty display; `id` must be unique among live displays.
    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            frame: None,
            levels: Levels::default(),
            texture: None,
            dirty: false,
            cursor_info: None,
        }
    }

    /// Replace the displayed frame; levels follow the frame's value range.
    pub fn set_image(&mut self, frame: Frame) {
        self.levels = Levels::from_frame(&frame);
        self.frame = Some(frame);
        self.dirty = true;
    }

    /// Drop the displayed frame.
    pub fn clear(&mut self) {
        self.frame = None;
        self.texture = None;
        self.dirty = false;
        self.cursor_info = None;
    }

    /// The frame currently on screen.
    #[must_use]
    pub fn image(&self) -> Option<&Frame> {
        self.frame.as_ref()
    }

    /// Display levels of the current frame.
    #[must_use]
    pub fn levels(&self) -> Levels {
        self.levels
    }

    /// Pixel under the pointer as `(x, y, value)`, from the last frame drawn.
    #[must_use]
    pub fn cursor_info(&self) -> Option<(usize, usize, f32)> {
        self.cursor_info
    }

    /// Draw the frame, uploading a new texture first if needed.
    pub fn show(&mut self, ui: &mut egui::Ui) {
        let Some(frame) = &self.frame else {
            self.cursor_info = None;
            ui.centered_and_justified(|ui| ui.label("No Data"));
            return;
        };

        if self.dirty || self.texture.is_none() {
            let image = frame_to_color_image(frame, self.levels);
            match &mut self.texture {
                Some(texture) => texture.set(image, egui::TextureOptions::NEAREST),
                None => {
                    self.texture =
                        Some(ui.ctx().load_texture(&self.id, image, egui::TextureOptions::NEAREST));
                }
            }
            self.dirty = false;
        }
        let Some(texture) = &self.texture else {
            return;
        };

        match self.cursor_info {
            Some((x, y, value)) => ui.label(format!("x: {x}  y: {y}  value: {value:.4}")),
            None => ui.label(format!("{} x {}", frame.nrows(), frame.ncols())),
        };

        let (width, height) = frame.dim();
        let (w, h) = (usize_to_f64(width), usize_to_f64(height));
        let mut cursor_info = None;
        Plot::new(&self.id).data_aspect(1.0).show(ui, |plot_ui| {
            plot_ui.image(PlotImage::new(
                texture,
                PlotPoint::new(w / 2.0, h / 2.0),
                [usize_to_f32(width), usize_to_f32(height)],
            ));

            // Image row 0 is drawn at the top of the plot.
            if let Some(pointer) = plot_ui.pointer_coordinate() {
                let x = f64_to_usize_bounded(pointer.x, width);
                let y = f64_to_usize_bounded(h - pointer.y, height);
                if let (Some(x), Some(y)) = (x, y) {
                    cursor_info = Some((x, y, frame[[x, y]]));
                }
            }
        });
        self.cursor_info = cursor_info;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::arr2;

    #[test]
    fn test_set_image_updates_levels() {
        let mut display = ImageDisplay::new("test");
        assert!(display.image().is_none());

        display.set_image(arr2(&[[-1.0_f32, 3.0]]));
        assert_eq!(display.image().map(Frame::dim), Some((1, 2)));
        assert!((display.levels().min + 1.0).abs() < f32::EPSILON);
        assert!((display.levels().max - 3.0).abs() < f32::EPSILON);

        display.clear();
        assert!(display.image().is_none());
    }
}
