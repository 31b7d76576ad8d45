//! Shared constants used across the application
//!
//! Positions and sizes are in display pixels of the 320x240 handheld screen.

use std::time::Duration;

pub const DISPLAY_WIDTH: u32 = 320;
pub const DISPLAY_HEIGHT: u32 = 240;

/// Horizontal origin shared by every label and transcript line.
pub const TEXT_X: i32 = 10;

pub const TITLE_Y: i32 = 10;
pub const TITLE_TEXT: &str = "T-Deck LLM Chat";
pub const MODEL_LABEL_Y: i32 = 30;
pub const INPUT_LABEL_Y: i32 = 220;

/// Where the transcript container sits before any scrolling.
pub const TRANSCRIPT_ORIGIN_Y: i32 = 50;
/// Height of the transcript area between the model label and the input label.
pub const TRANSCRIPT_VIEWPORT_HEIGHT: u32 = 170;
pub const LINE_HEIGHT: u32 = 15;
/// Columns per transcript line (terminal font is 6 px wide).
pub const WRAP_COLUMNS: usize = 50;
/// Pixel width of one glyph of the built-in terminal font.
pub const GLYPH_WIDTH: u32 = 6;

pub const COLOR_WHITE: u32 = 0xFFFFFF;
pub const COLOR_GREEN: u32 = 0x00FF00;

pub const PROMPT_PREFIX: &str = "> ";
pub const COMMAND_MARKER: char = '/';
pub const USER_PREFIX: &str = "User: ";

/// Loaded at startup when the settings do not name a model yet.
pub const FALLBACK_MODEL: &str = "phi-4-mini-instruct";

pub const LOOP_INTERVAL: Duration = Duration::from_millis(100);
pub const PLAYBACK_POLL_INTERVAL: Duration = Duration::from_millis(10);

pub const TEMP_AUDIO_FILE: &str = "temp_audio.wav";
pub const CHAT_LOG_FILE: &str = "chat_log.txt";
