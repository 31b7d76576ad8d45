//! Keypress acquisition.
//!
//! The handheld keypad delivers single characters, with `\n`/`\r` for enter
//! and `\x08`/`\x7f` for backspace. [`Keypress::from_char`] maps those codes,
//! and [`TerminalKeypad`] produces the same keypresses from a desktop
//! terminal through crossterm.

use std::time::Duration;

use ratatui::crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use tracing::debug;

use crate::utils::line_editor::LineEditAction;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Keypress {
    Char(char),
    Submit,
    Delete,
}

impl Keypress {
    /// Map a raw keypad code. Other control codes produce nothing.
    pub fn from_char(c: char) -> Option<Self> {
        match c {
            '\n' | '\r' => Some(Keypress::Submit),
            '\u{8}' | '\u{7f}' => Some(Keypress::Delete),
            c if c.is_control() => None,
            c => Some(Keypress::Char(c)),
        }
    }
}

impl From<Keypress> for LineEditAction {
    fn from(key: Keypress) -> Self {
        match key {
            Keypress::Char(c) => LineEditAction::Insert(c),
            Keypress::Submit => LineEditAction::Submit,
            Keypress::Delete => LineEditAction::Backspace,
        }
    }
}

/// Polled, non-blocking source of keypresses.
pub trait KeypressSource {
    fn next_keypress(&mut self) -> Option<Keypress>;

    /// True once the source will never produce another keypress.
    fn is_closed(&self) -> bool {
        false
    }
}

/// Keypad emulation on a raw-mode terminal. Ctrl+C closes it.
#[derive(Debug, Default)]
pub struct TerminalKeypad {
    closed: bool,
}

impl TerminalKeypad {
    pub fn new() -> Self {
        Self::default()
    }

    fn map_key_event(&mut self, key: KeyEvent) -> Option<Keypress> {
        if key.kind != KeyEventKind::Press {
            return None;
        }
        if key.modifiers.contains(KeyModifiers::CONTROL) {
            if matches!(key.code, KeyCode::Char('c') | KeyCode::Char('d')) {
                self.closed = true;
            }
            return None;
        }
        match key.code {
            KeyCode::Enter => Some(Keypress::Submit),
            KeyCode::Backspace => Some(Keypress::Delete),
            KeyCode::Char(c) => Keypress::from_char(c),
            _ => None,
        }
    }
}

impl KeypressSource for TerminalKeypad {
    fn next_keypress(&mut self) -> Option<Keypress> {
        if self.closed {
            return None;
        }
        match event::poll(Duration::ZERO) {
            Ok(true) => match event::read() {
                Ok(Event::Key(key)) => self.map_key_event(key),
                Ok(_) => None,
                Err(err) => {
                    debug!(error = %err, "Keypad read failed");
                    None
                }
            },
            Ok(false) => None,
            Err(err) => {
                debug!(error = %err, "Keypad poll failed");
                None
            }
        }
    }

    fn is_closed(&self) -> bool {
        self.closed
    }
}
