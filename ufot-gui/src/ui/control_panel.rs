//! Control panel (left sidebar) and status bar rendering.

use eframe::egui;
use rfd::FileDialog;

use super::theme::{form_label, primary_button, section_header, ThemeColors};
use crate::app::UfotApp;
use crate::state::ViewTab;

const IMAGE_FILTER: &[&str] = &["tif", "tiff", "png", "jpg", "jpeg"];

impl UfotApp {
    /// Render the left panel: view selector plus the controls of the
    /// selected view.
    pub(crate) fn render_side_panel(&mut self, ctx: &egui::Context) {
        egui::SidePanel::left("side_panel")
            .resizable(false)
            .exact_width(240.0)
            .show(ctx, |ui| {
                ui.add_space(8.0);
                ui.label(section_header("View"));
                for tab in ViewTab::ALL {
                    ui.selectable_value(&mut self.ui_state.tab, tab, tab.label());
                }
                ui.separator();

                match self.ui_state.tab {
                    ViewTab::Projections => self.render_projection_controls(ui),
                    ViewTab::Slices => self.render_slice_controls(ui),
                    ViewTab::Overlap => self.render_overlap_controls(ui),
                    ViewTab::Volume => self.render_volume_controls(ui),
                }
            });
    }

    fn render_projection_controls(&mut self, ui: &mut egui::Ui) {
        ui.label(section_header("Projections"));
        if ui.add(primary_button("Open dataset...")).clicked() {
            if let Some(path) = FileDialog::new()
                .add_filter("HDF5", &["h5", "hdf5", "hdf"])
                .pick_file()
            {
                self.open_projections(path);
            }
        }
        if let Some(path) = &self.projection_file {
            ui.label(form_label("File"));
            ui.label(path.file_name().map_or_else(
                || path.display().to_string(),
                |n| n.to_string_lossy().into_owned(),
            ));
        }
    }

    fn render_slice_controls(&mut self, ui: &mut egui::Ui) {
        ui.label(section_header("Slices"));
        if ui.add(primary_button("Open folder...")).clicked() {
            if let Some(dir) = FileDialog::new().pick_folder() {
                self.open_slices(&dir);
            }
        }
        ui.label(format!("{} files", self.slices.filenames().len()));
    }

    fn render_overlap_controls(&mut self, ui: &mut egui::Ui) {
        ui.label(section_header("Overlap"));
        for (i, label) in ["First image", "Second image"].into_iter().enumerate() {
            ui.label(form_label(label));
            ui.horizontal(|ui| {
                if ui.button("Pick...").clicked() {
                    if let Some(path) = FileDialog::new()
                        .add_filter("Images", IMAGE_FILTER)
                        .pick_file()
                    {
                        self.overlap_files[i] = Some(path);
                    }
                }
                let name = self.overlap_files[i]
                    .as_ref()
                    .and_then(|p| p.file_name())
                    .map_or_else(|| "-".to_string(), |n| n.to_string_lossy().into_owned());
                ui.label(name);
            });
        }
        let ready = self.overlap_files.iter().all(Option::is_some);
        if ui
            .add_enabled(ready, primary_button("Compare"))
            .clicked()
        {
            self.open_overlap();
        }
    }

    fn render_volume_controls(&mut self, ui: &mut egui::Ui) {
        ui.label(section_header("Volume"));
        let options = &mut self.ui_state.volume;
        egui::Grid::new("volume_options")
            .num_columns(2)
            .show(ui, |ui| {
                ui.label(form_label("Step"));
                ui.add(egui::DragValue::new(&mut options.step).range(1..=64));
                ui.end_row();
                ui.label(form_label("Density"));
                ui.add(egui::DragValue::new(&mut options.density).range(1..=16));
                ui.end_row();
                ui.label(form_label("Scale"));
                ui.add(
                    egui::DragValue::new(&mut options.scale)
                        .range(0.001..=10.0)
                        .speed(0.005),
                );
                ui.end_row();
            });

        let can_build = !self.processing.is_building;
        ui.horizontal(|ui| {
            if ui
                .add_enabled(can_build, primary_button("Build from folder..."))
                .clicked()
            {
                if let Some(dir) = FileDialog::new().pick_folder() {
                    self.build_volume(&dir);
                }
            }
            if self.processing.is_building {
                ui.spinner();
            }
        });
        ui.horizontal(|ui| {
            if ui.button("Frame all").clicked() {
                self.volume.frame_all();
            }
            if ui.button("Clear").clicked() {
                self.volume.clear();
            }
        });
        ui.label(format!("{} volumes", self.volume.view().items().len()));
    }

    /// Render the bottom status line.
    pub(crate) fn render_status_bar(&mut self, ctx: &egui::Context) {
        let colors = ThemeColors::from_ctx(ctx);
        egui::TopBottomPanel::bottom("status_bar")
            .frame(
                egui::Frame::none()
                    .fill(colors.bg_header)
                    .inner_margin(egui::Margin::symmetric(12.0, 4.0)),
            )
            .show(ctx, |ui| {
                ui.label(egui::RichText::new(&self.processing.status_text).color(colors.text_muted));
            });
    }
}
