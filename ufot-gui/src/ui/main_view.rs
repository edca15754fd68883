//! Central panel hosting the selected viewer.

use eframe::egui;

use crate::app::UfotApp;
use crate::state::ViewTab;

impl UfotApp {
    /// Render the central panel with the active viewer.
    ///
    /// Redraw errors from the viewers land in the status bar.
    pub(crate) fn render_central_panel(&mut self, ctx: &egui::Context) {
        egui::CentralPanel::default().show(ctx, |ui| {
            let result = match self.ui_state.tab {
                ViewTab::Projections => self.projections.show(ui).map(drop).map_err(anyhow::Error::from),
                ViewTab::Slices => self.slices.show(ui).map(drop).map_err(anyhow::Error::from),
                ViewTab::Overlap => self.overlap.show(ui).map(drop).map_err(anyhow::Error::from),
                ViewTab::Volume => {
                    self.volume.show(ui);
                    Ok(())
                }
            };
            if let Err(e) = result {
                self.processing.set_error(&e);
            }
        });
    }
}
