//! UI state for the selected view and load options.

use ufot_core::VolumeOptions;

/// Which viewer fills the central panel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ViewTab {
    #[default]
    Projections,
    Slices,
    Overlap,
    Volume,
}

impl ViewTab {
    pub const ALL: [Self; 4] = [Self::Projections, Self::Slices, Self::Overlap, Self::Volume];

    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Self::Projections => "Projections",
            Self::Slices => "Slices",
            Self::Overlap => "Overlap",
            Self::Volume => "Volume",
        }
    }
}

/// Options chosen in the side panel before loading.
#[derive(Debug, Clone, Copy, Default)]
pub struct UiState {
    pub tab: ViewTab,
    pub volume: VolumeOptions,
}
