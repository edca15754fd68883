//! Interactive 3D view of volume items.

use eframe::egui;

use super::camera::OrbitCamera;
use super::item::VolumeItem;
use super::render::render;
use crate::util::f32_to_pixels;

/// Longest edge of the rendered image, in pixels. The result is stretched
/// over the available area.
const MAX_RENDER_EDGE: f32 = 320.0;

/// Degrees of orbit per dragged point.
const ORBIT_SPEED: f32 = 0.5;

/// A set of volume items seen through an orbit camera.
///
/// Rendering happens on the CPU (see [`render`]) in place of a GPU volume
/// widget, at a reduced resolution stretched over the panel. Dragging
/// orbits and scrolling zooms. The image is only re-rendered when
/// the camera, the items or the output size change.
pub struct VolumeView {
    items: Vec<VolumeItem>,
    camera: OrbitCamera,
    texture: Option<egui::TextureHandle>,
    rendered: Option<(OrbitCamera, [usize; 2], u64)>,
    generation: u64,
}

impl Default for VolumeView {
    fn default() -> Self {
        Self::new()
    }
}

impl VolumeView {
    /// An empty view with the default camera.
    #[must_use]
    pub fn new() -> Self {
        Self {
            items: Vec::new(),
            camera: OrbitCamera::default(),
            texture: None,
            rendered: None,
            generation: 0,
        }
    }

    /// Add an item; earlier items stay in the scene.
    pub fn add_item(&mut self, item: VolumeItem) {
        self.items.push(item);
        self.generation += 1;
    }

    /// Remove every item.
    pub fn clear(&mut self) {
        self.items.clear();
        self.generation += 1;
    }

    /// Items in insertion order.
    #[must_use]
    pub fn items(&self) -> &[VolumeItem] {
        &self.items
    }

    #[must_use]
    pub fn camera(&self) -> &OrbitCamera {
        &self.camera
    }

    pub fn camera_mut(&mut self) -> &mut OrbitCamera {
        &mut self.camera
    }

    /// Point the camera at the centre of all items and back off far enough
    /// to see them whole.
    pub fn frame_all(&mut self) {
        let Some((lo, hi)) = self
            .items
            .iter()
            .map(VolumeItem::world_bounds)
            .reduce(|(alo, ahi), (blo, bhi)| (alo.min(blo), ahi.max(bhi)))
        else {
            return;
        };
        let radius = (hi - lo).length() * 0.5;
        let half_fov = (self.camera.fov.to_radians() * 0.5).tan().max(1e-3);
        self.camera.center = (lo + hi) * 0.5;
        self.camera.distance = (radius / half_fov * 1.2).max(1e-3);
    }

    /// Draw the scene into the remaining space of `ui`.
    pub fn show(&mut self, ui: &mut egui::Ui) {
        let size = ui.available_size();
        let (rect, response) = ui.allocate_exact_size(size, egui::Sense::drag());

        if response.dragged() {
            let delta = response.drag_delta();
            self.camera.orbit(-delta.x * ORBIT_SPEED, delta.y * ORBIT_SPEED);
        }
        if response.hovered() {
            let scroll = ui.input(|i| i.smooth_scroll_delta.y);
            if scroll != 0.0 {
                self.camera.zoom(scroll);
            }
        }

        let scale = (MAX_RENDER_EDGE / rect.width().max(rect.height()).max(1.0)).min(1.0);
        let render_size = [
            f32_to_pixels(rect.width() * scale),
            f32_to_pixels(rect.height() * scale),
        ];
        let key = (self.camera, render_size, self.generation);
        if self.rendered != Some(key) || self.texture.is_none() {
            let pixels = render(&self.items, &self.camera, render_size[0], render_size[1]);
            let image = egui::ColorImage::from_rgba_unmultiplied(render_size, &pixels);
            match &mut self.texture {
                Some(texture) => texture.set(image, egui::TextureOptions::LINEAR),
                None => {
                    self.texture = Some(ui.ctx().load_texture(
                        "volume_view",
                        image,
                        egui::TextureOptions::LINEAR,
                    ));
                }
            }
            self.rendered = Some(key);
        }

        if let Some(texture) = &self.texture {
            let uv = egui::Rect::from_min_max(egui::pos2(0.0, 0.0), egui::pos2(1.0, 1.0));
            ui.painter()
                .image(texture.id(), rect, uv, egui::Color32::WHITE);
        }
        if self.items.is_empty() {
            ui.painter().text(
                rect.center(),
                egui::Align2::CENTER_CENTER,
                "No Data",
                egui::FontId::proportional(16.0),
                ui.visuals().weak_text_color(),
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::Array4;

    #[test]
    fn test_items_accumulate_until_cleared() {
        let mut view = VolumeView::new();
        view.add_item(VolumeItem::new(Array4::zeros((2, 2, 2, 4)), 1));
        view.add_item(VolumeItem::new(Array4::zeros((3, 3, 3, 4)), 1));
        assert_eq!(view.items().len(), 2);
        assert_eq!(view.items()[1].dims(), (3, 3, 3));

        view.clear();
        assert!(view.items().is_empty());
    }

    #[test]
    fn test_frame_all_centres_camera() {
        let mut view = VolumeView::new();
        let mut item = VolumeItem::new(Array4::zeros((4, 4, 4, 4)), 1);
        item.translate(10.0, 0.0, 0.0);
        view.add_item(item);
        view.frame_all();

        let center = view.camera().center;
        assert!((center - glam::Vec3::new(12.0, 2.0, 2.0)).length() < 1e-5);
        assert!(view.camera().distance > 3.0);
    }
}
