//! Position slider shared by the paging viewers.

use eframe::egui;

/// An integer position with an inclusive range.
///
/// The position is always kept inside the range: changing the range or
/// setting a value outside it clamps.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct FrameSlider {
    value: usize,
    min: usize,
    max: usize,
}

impl FrameSlider {
    /// A slider over `[0, 0]` at position 0.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Current position.
    #[must_use]
    pub fn value(&self) -> usize {
        self.value
    }

    /// Inclusive `(min, max)` range.
    #[must_use]
    pub fn range(&self) -> (usize, usize) {
        (self.min, self.max)
    }

    /// Set the inclusive range, clamping the position into it.
    ///
    /// A reversed range collapses to `min`.
    pub fn set_range(&mut self, min: usize, max: usize) {
        self.min = min;
        self.max = max.max(min);
        self.value = self.value.clamp(self.min, self.max);
    }

    /// Move to `value` (clamped). Returns true if the position changed.
    pub fn set_value(&mut self, value: usize) -> bool {
        let clamped = value.clamp(self.min, self.max);
        let changed = clamped != self.value;
        self.value = clamped;
        changed
    }

    /// Draw step buttons, the slider and a position label.
    ///
    /// Returns true if the user moved the position.
    pub fn show(&mut self, ui: &mut egui::Ui) -> bool {
        let mut changed = false;
        ui.horizontal(|ui| {
            if ui.button("◄").clicked() && self.value > self.min {
                self.value -= 1;
                changed = true;
            }

            let spacing = ui.spacing().interact_size.x * 2.0 + 120.0;
            ui.spacing_mut().slider_width = (ui.available_width() - spacing).max(60.0);
            let response = ui.add(
                egui::Slider::new(&mut self.value, self.min..=self.max)
                    .show_value(false),
            );
            changed |= response.changed();

            if ui.button("►").clicked() && self.value < self.max {
                self.value += 1;
                changed = true;
            }

            ui.label(format!("{} / {}", self.value, self.max));
        });
        changed
    }
}
