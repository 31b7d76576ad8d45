//! Pending-input buffer fed by the keypad.
//!
//! The handheld keypad has no cursor keys, so editing is append-only:
//! characters go on the end, backspace takes one off the end, and submit
//! hands the whole buffer back and starts a fresh one.

use crate::core::constants::PROMPT_PREFIX;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LineEditorState {
    pub text: String,
}

impl LineEditorState {
    pub fn with_text(text: String) -> Self {
        Self { text }
    }

    /// What the input label shows: the prompt prefix followed by the buffer.
    pub fn prompt_label(&self) -> String {
        format!("{PROMPT_PREFIX}{}", self.text)
    }

    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LineEditAction {
    Insert(char),
    Backspace,
    Submit,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LineEditOutcome {
    Continue { redraw: bool },
    Submit(String),
}

pub fn apply_line_edit_action(
    state: &mut LineEditorState,
    action: LineEditAction,
) -> LineEditOutcome {
    match action {
        LineEditAction::Insert(c) => {
            if c.is_control() {
                LineEditOutcome::Continue { redraw: false }
            } else {
                state.text.push(c);
                LineEditOutcome::Continue { redraw: true }
            }
        }
        LineEditAction::Backspace => {
            let removed = state.text.pop().is_some();
            LineEditOutcome::Continue { redraw: removed }
        }
        LineEditAction::Submit => LineEditOutcome::Submit(std::mem::take(&mut state.text)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn type_text(state: &mut LineEditorState, text: &str) {
        for c in text.chars() {
            apply_line_edit_action(state, LineEditAction::Insert(c));
        }
    }

    #[test]
    fn insert_appends_and_updates_label() {
        let mut state = LineEditorState::default();
        assert_eq!(
            apply_line_edit_action(&mut state, LineEditAction::Insert('h')),
            LineEditOutcome::Continue { redraw: true }
        );
        type_text(&mut state, "i é");
        assert_eq!(state.text, "hi é");
        assert_eq!(state.prompt_label(), "> hi é");
    }

    #[test]
    fn submit_returns_buffer_and_clears() {
        let mut state = LineEditorState::default();
        type_text(&mut state, "hello there");
        assert_eq!(
            apply_line_edit_action(&mut state, LineEditAction::Submit),
            LineEditOutcome::Submit("hello there".to_string())
        );
        assert!(state.is_empty());
        assert_eq!(state.prompt_label(), "> ");
    }

    #[test]
    fn submit_on_empty_buffer_yields_empty_line() {
        let mut state = LineEditorState::default();
        assert_eq!(
            apply_line_edit_action(&mut state, LineEditAction::Submit),
            LineEditOutcome::Submit(String::new())
        );
    }

    #[test]
    fn backspace_on_empty_buffer_is_noop() {
        let mut state = LineEditorState::default();
        assert_eq!(
            apply_line_edit_action(&mut state, LineEditAction::Backspace),
            LineEditOutcome::Continue { redraw: false }
        );
        assert!(state.is_empty());
    }

    #[test]
    fn n_backspaces_keep_prefix() {
        let text = "mistral-7b ✓ ok";
        let total = text.chars().count();
        for deletes in 0..=total {
            let mut state = LineEditorState::default();
            type_text(&mut state, text);
            for _ in 0..deletes {
                apply_line_edit_action(&mut state, LineEditAction::Backspace);
            }
            let expected: String = text.chars().take(total - deletes).collect();
            assert_eq!(state.text, expected);
        }
    }

    #[test]
    fn control_characters_are_ignored() {
        let mut state = LineEditorState::with_text("ab".to_string());
        assert_eq!(
            apply_line_edit_action(&mut state, LineEditAction::Insert('\u{1b}')),
            LineEditOutcome::Continue { redraw: false }
        );
        assert_eq!(state.text, "ab");
    }
}
