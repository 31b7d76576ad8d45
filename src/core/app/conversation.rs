use super::{session::SessionContext, ui_state::UiState};
use crate::api::ChatMessage;
use crate::core::constants::USER_PREFIX;
use crate::core::message::TranscriptRole;
use tracing::warn;

/// Transcript bookkeeping for one chat turn.
pub struct ConversationController<'a> {
    session: &'a mut SessionContext,
    ui: &'a mut UiState,
}

impl<'a> ConversationController<'a> {
    pub fn new(session: &'a mut SessionContext, ui: &'a mut UiState) -> Self {
        Self { session, ui }
    }

    /// Record the user's line and build the request messages.
    ///
    /// Only the system prompt and this single turn are sent; earlier turns
    /// stay on screen but are not resent.
    pub fn add_user_message(&mut self, content: &str) -> Vec<ChatMessage> {
        self.append(TranscriptRole::User, &format!("{USER_PREFIX}{content}"));

        let mut messages = Vec::with_capacity(2);
        if !self.session.system_prompt.is_empty() {
            messages.push(ChatMessage::system(self.session.system_prompt.as_str()));
        }
        messages.push(ChatMessage::user(content));
        messages
    }

    pub fn add_assistant_message(&mut self, content: &str) {
        self.append(TranscriptRole::Assistant, content);
    }

    fn append(&mut self, role: TranscriptRole, text: &str) {
        self.ui.transcript.append(role, text);
        self.ui.needs_redraw = true;
        if let Err(err) = self.session.logging.log_message(text) {
            warn!(error = %err, role = role.as_str(), "Failed to write chat log");
        }
    }
}
