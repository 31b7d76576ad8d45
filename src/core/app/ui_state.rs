use crate::core::constants::TITLE_TEXT;
use crate::core::transcript::Transcript;
use crate::utils::line_editor::LineEditorState;

/// Presentation state: what the display draws each frame.
#[derive(Debug, Default)]
pub struct UiState {
    pub input: LineEditorState,
    pub transcript: Transcript,
    /// Transient message shown in place of the title.
    pub status: Option<String>,
    /// Set when something visible changed since the last frame.
    pub needs_redraw: bool,
}

impl UiState {
    pub fn set_status(&mut self, status: impl Into<String>) {
        self.status = Some(status.into());
        self.needs_redraw = true;
    }

    pub fn clear_status(&mut self) {
        if self.status.take().is_some() {
            self.needs_redraw = true;
        }
    }

    pub fn title_text(&self) -> &str {
        self.status.as_deref().unwrap_or(TITLE_TEXT)
    }
}
