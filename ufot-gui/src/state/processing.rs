//! Processing state for background operations.

/// Tracks background volume construction and the status line.
pub struct ProcessingState {
    /// Whether a volume is currently being built.
    pub is_building: bool,
    /// User-facing status message.
    pub status_text: String,
}

impl Default for ProcessingState {
    fn default() -> Self {
        Self {
            is_building: false,
            status_text: "Ready".to_string(),
        }
    }
}

impl ProcessingState {
    /// Record a completed action.
    pub fn set_status(&mut self, text: impl Into<String>) {
        self.status_text = text.into();
    }

    /// Record a failed action and log it.
    pub fn set_error(&mut self, error: &anyhow::Error) {
        log::error!("{error:#}");
        self.status_text = format!("Error: {error:#}");
    }
}
