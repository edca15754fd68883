//! UI rendering modules.
//!
//! - `control_panel`: left sidebar with load controls and the status bar
//! - `main_view`: central panel with the active viewer
//! - `theme`: colours, fonts and button styles

mod control_panel;
mod main_view;
pub mod theme;
