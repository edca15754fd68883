//! Main application state and logic.
//!
//! Contains the `UfotApp` struct which owns the four viewers, the load
//! options and the worker channel.

use std::path::{Path, PathBuf};
use std::sync::mpsc::{channel, Receiver, Sender};
use std::thread;
use std::time::Instant;

use anyhow::{bail, Context};
use eframe::egui;
use ufot_gui::widgets::{build_volume, OverlapViewer, ProjectionViewer, SliceViewer, VolumeViewer};

use crate::message::AppMessage;
use crate::state::{ProcessingState, UiState};

/// Main application state.
pub struct UfotApp {
    pub(crate) projections: ProjectionViewer,
    pub(crate) slices: SliceViewer,
    pub(crate) overlap: OverlapViewer,
    pub(crate) volume: VolumeViewer,

    /// Selected view and load options.
    pub(crate) ui_state: UiState,
    /// Images picked for the overlap view, first then second.
    pub(crate) overlap_files: [Option<PathBuf>; 2],
    /// Dataset currently open in the projection view.
    pub(crate) projection_file: Option<PathBuf>,

    /// Message receiver for async operations.
    pub(crate) rx: Receiver<AppMessage>,
    /// Message sender for async operations.
    pub(crate) tx: Sender<AppMessage>,

    /// Background work and status line.
    pub(crate) processing: ProcessingState,
}

impl Default for UfotApp {
    fn default() -> Self {
        let (tx, rx) = channel();
        let ui_state = UiState::default();
        Self {
            projections: ProjectionViewer::new(),
            slices: SliceViewer::default(),
            overlap: OverlapViewer::new(),
            volume: VolumeViewer::with_options(ui_state.volume),
            ui_state,
            overlap_files: [None, None],
            projection_file: None,
            rx,
            tx,
            processing: ProcessingState::default(),
        }
    }
}

impl UfotApp {
    /// Open a projection dataset in the projection view.
    pub fn open_projections(&mut self, path: PathBuf) {
        let result = self
            .projections
            .load_files(&path, self.projections.ffc_correction())
            .with_context(|| format!("Opening {}", path.display()));
        match result {
            Ok(()) => {
                let (_, last) = self.projections.range();
                self.processing
                    .set_status(format!("Opened {} ({} projections)", file_label(&path), last + 1));
                self.projection_file = Some(path);
            }
            Err(e) => self.processing.set_error(&e),
        }
    }

    /// Show every image file of `dir` in the slice view.
    pub fn open_slices(&mut self, dir: &Path) {
        let result = ufot_io::list_image_files(dir)
            .and_then(|files| {
                let count = files.len();
                self.slices.load_files(files).map(|()| count)
            })
            .with_context(|| format!("Opening slices in {}", dir.display()));
        match result {
            Ok(count) => self
                .processing
                .set_status(format!("Opened {count} slices from {}", file_label(dir))),
            Err(e) => self.processing.set_error(&e),
        }
    }

    /// Load the overlap pair once both images are picked.
    pub fn open_overlap(&mut self) {
        if let Err(e) = self.try_open_overlap() {
            self.processing.set_error(&e);
        }
    }

    fn try_open_overlap(&mut self) -> anyhow::Result<()> {
        let [Some(first), Some(second)] = &self.overlap_files else {
            bail!("Pick both images first");
        };
        let first_image =
            ufot_io::read_image(first).with_context(|| format!("Reading {}", first.display()))?;
        let second_image =
            ufot_io::read_image(second).with_context(|| format!("Reading {}", second.display()))?;
        self.overlap
            .set_images(&first_image, &second_image)
            .context("Computing overlap")?;
        self.processing.set_status("Overlap images loaded");
        Ok(())
    }

    /// Build a volume from the image files of `dir` on a worker thread.
    pub fn build_volume(&mut self, dir: &Path) {
        let files = match ufot_io::list_image_files(dir) {
            Ok(files) if !files.is_empty() => files,
            Ok(_) => {
                let e = anyhow::anyhow!("No image files in {}", dir.display());
                self.processing.set_error(&e);
                return;
            }
            Err(e) => {
                self.processing.set_error(&anyhow::Error::from(e));
                return;
            }
        };

        self.volume.set_options(self.ui_state.volume);
        self.processing.is_building = true;
        self.processing.set_status(format!("Building volume from {} files...", files.len()));

        let tx = self.tx.clone();
        let step = self.ui_state.volume.step;
        thread::spawn(move || volume_worker(&files, step, &tx));
    }

    /// Handle pending messages from async workers.
    pub fn handle_messages(&mut self) {
        while let Ok(msg) = self.rx.try_recv() {
            match msg {
                AppMessage::VolumeReady(volume, files, dur) => {
                    self.processing.is_building = false;
                    let shape = volume.shape().to_vec();
                    self.volume.set_volume(*volume);
                    self.processing.set_status(format!(
                        "Built {:?} volume from {files} files in {:.2}s",
                        &shape[..3],
                        dur.as_secs_f64()
                    ));
                }
                AppMessage::VolumeError(e) => {
                    self.processing.is_building = false;
                    self.processing.set_error(&anyhow::anyhow!(e));
                }
            }
        }
    }
}

fn volume_worker(files: &[PathBuf], step: usize, tx: &Sender<AppMessage>) {
    let start = Instant::now();
    let msg = match build_volume(files, step) {
        Ok(volume) => AppMessage::VolumeReady(Box::new(volume), files.len(), start.elapsed()),
        Err(e) => AppMessage::VolumeError(format!("Building volume: {e}")),
    };
    let _ = tx.send(msg);
}

fn file_label(path: &Path) -> String {
    path.file_name()
        .map_or_else(|| path.display().to_string(), |n| n.to_string_lossy().into_owned())
}

impl eframe::App for UfotApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        crate::ui::theme::apply_system_theme(ctx);
        self.handle_messages();
        self.render_side_panel(ctx);
        self.render_status_bar(ctx);
        self.render_central_panel(ctx);

        if self.processing.is_building {
            ctx.request_repaint();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[test]
    fn test_volume_message_adds_item() {
        let mut app = UfotApp::default();
        app.processing.is_building = true;
        app.tx
            .send(AppMessage::VolumeReady(
                Box::new(ndarray::Array4::zeros((2, 3, 4, 4))),
                4,
                Duration::from_millis(10),
            ))
            .unwrap();
        app.handle_messages();

        assert!(!app.processing.is_building);
        assert_eq!(app.volume.view().items().len(), 1);
        assert!(app.processing.status_text.starts_with("Built [2, 3, 4] volume"));
    }

    #[test]
    fn test_overlap_needs_both_files() {
        let mut app = UfotApp::default();
        app.open_overlap();
        assert!(app.processing.status_text.contains("Pick both images"));
    }

    #[test]
    fn test_missing_projection_file_reports_error() {
        let mut app = UfotApp::default();
        app.open_projections(PathBuf::from("/nonexistent/scan.h5"));
        assert!(app.processing.status_text.starts_with("Error: Opening"));
        assert!(app.projection_file.is_none());
    }

    #[test]
    fn test_open_projections_keeps_viewer_ffc_setting() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("scan.h5");
        {
            let file = hdf5::File::create(&path).unwrap();
            let group = file.create_group("exchange").unwrap();
            group
                .new_dataset_builder()
                .with_data(&ndarray::Array3::from_elem((2, 2, 2), 6.0_f32))
                .create("data")
                .unwrap();
            group
                .new_dataset_builder()
                .with_data(&ndarray::Array3::from_elem((1, 2, 2), 3.0_f32))
                .create("data_white")
                .unwrap();
        }

        let mut app = UfotApp::default();
        app.projections.set_ffc_correction(true).unwrap();
        app.open_projections(path.clone());

        assert_eq!(app.projection_file, Some(path));
        assert!(app.projections.ffc_correction());
        let frame = app.projections.display().image().unwrap();
        assert!(frame.iter().all(|&v| (v - 2.0).abs() < f32::EPSILON));
    }
}
