use crate::core::constants::{COLOR_GREEN, COLOR_WHITE, LINE_HEIGHT};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TranscriptRole {
    User,
    Assistant,
}

impl TranscriptRole {
    pub fn as_str(self) -> &'static str {
        match self {
            TranscriptRole::User => "user",
            TranscriptRole::Assistant => "assistant",
        }
    }

    /// 24-bit RGB used when the message is drawn.
    pub fn color(self) -> u32 {
        match self {
            TranscriptRole::User => COLOR_WHITE,
            TranscriptRole::Assistant => COLOR_GREEN,
        }
    }
}

/// One laid-out transcript entry.
#[derive(Debug, Clone, PartialEq)]
pub struct Message {
    pub role: TranscriptRole,
    pub content: String,
    pub lines: Vec<String>,
    /// Offset of the first line from the transcript origin.
    pub top: u32,
}

impl Message {
    pub fn height(&self) -> u32 {
        self.lines.len() as u32 * LINE_HEIGHT
    }

    pub fn bottom(&self) -> u32 {
        self.top + self.height()
    }
}
