//! Append-only, word-wrapped chat history with a bottom-following scroll.

use crate::core::constants::{
    LINE_HEIGHT, TEXT_X, TRANSCRIPT_ORIGIN_Y, TRANSCRIPT_VIEWPORT_HEIGHT, WRAP_COLUMNS,
};
use crate::core::message::{Message, TranscriptRole};
use crate::core::text_wrapping::{TextWrapper, WrapConfig};

/// A transcript line positioned relative to the transcript container.
#[derive(Debug, Clone, PartialEq)]
pub struct PlacedLine<'a> {
    pub text: &'a str,
    pub x: i32,
    /// Offset from the container's anchor.
    pub y: i32,
    pub color: u32,
}

#[derive(Debug, Clone)]
pub struct Transcript {
    messages: Vec<Message>,
    wrap: WrapConfig,
    viewport_height: u32,
    content_height: u32,
    scroll_offset: u32,
}

impl Default for Transcript {
    fn default() -> Self {
        Self::new(WRAP_COLUMNS, TRANSCRIPT_VIEWPORT_HEIGHT)
    }
}

impl Transcript {
    pub fn new(wrap_columns: usize, viewport_height: u32) -> Self {
        Self {
            messages: Vec::new(),
            wrap: WrapConfig::new(wrap_columns),
            viewport_height,
            content_height: 0,
            scroll_offset: 0,
        }
    }

    /// Wrap and lay out `text` below existing content. Returns the new
    /// message's height.
    pub fn append(&mut self, role: TranscriptRole, text: &str) -> u32 {
        let lines = TextWrapper::wrap_words(text, &self.wrap);
        let message = Message {
            role,
            content: text.to_string(),
            lines,
            top: self.content_height,
        };
        let height = message.height();
        self.content_height = message.bottom();
        self.messages.push(message);

        let overflow = self.content_height.saturating_sub(self.viewport_height);
        self.scroll_offset = self.scroll_offset.max(overflow);
        height
    }

    pub fn messages(&self) -> &[Message] {
        &self.messages
    }

    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }

    pub fn content_height(&self) -> u32 {
        self.content_height
    }

    /// How far the container has been shifted up. Never decreases.
    pub fn scroll_offset(&self) -> u32 {
        self.scroll_offset
    }

    /// Screen y of the container after scrolling.
    pub fn anchor_y(&self) -> i32 {
        TRANSCRIPT_ORIGIN_Y - self.scroll_offset as i32
    }

    pub fn placed_lines(&self) -> impl Iterator<Item = PlacedLine<'_>> {
        self.messages.iter().flat_map(|message| {
            let color = message.role.color();
            message
                .lines
                .iter()
                .enumerate()
                .map(move |(index, line)| PlacedLine {
                    text: line,
                    x: TEXT_X,
                    y: (message.top + index as u32 * LINE_HEIGHT) as i32,
                    color,
                })
        })
    }
}
