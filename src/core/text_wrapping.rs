//! Word wrapping for transcript messages.
//!
//! Lines are filled greedily with whole words separated by single spaces.
//! Runs of whitespace (including newlines) collapse, matching how the
//! handheld's fixed-width label font lays out text. Widths are measured in
//! terminal columns with `unicode-width` so wide glyphs count double.

use unicode_width::UnicodeWidthStr;

/// Configuration for text wrapping behavior
#[derive(Debug, Clone)]
pub struct WrapConfig {
    /// Maximum width for text lines
    pub width: usize,
}

impl WrapConfig {
    pub fn new(width: usize) -> Self {
        Self { width }
    }
}

pub struct TextWrapper;

impl TextWrapper {
    /// Wrap `text` into lines no wider than `config.width`.
    ///
    /// A word wider than the budget is never split; it occupies a line on its
    /// own. Text with no words produces no lines.
    pub fn wrap_words(text: &str, config: &WrapConfig) -> Vec<String> {
        let mut lines = Vec::new();
        let mut current = String::new();
        let mut current_width = 0usize;

        for word in text.split_whitespace() {
            let word_width = UnicodeWidthStr::width(word);
            if current.is_empty() {
                current.push_str(word);
                current_width = word_width;
            } else if current_width + 1 + word_width <= config.width {
                current.push(' ');
                current.push_str(word);
                current_width += 1 + word_width;
            } else {
                lines.push(std::mem::take(&mut current));
                current.push_str(word);
                current_width = word_width;
            }
        }

        if !current.is_empty() {
            lines.push(current);
        }
        lines
    }
}
