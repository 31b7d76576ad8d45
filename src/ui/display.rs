//! What gets drawn, independent of how.
//!
//! A [`Scene`] is a snapshot of the handheld's screen in display pixels:
//! three fixed labels plus the transcript container, whose vertical anchor
//! moves up as the transcript scrolls. A [`DisplaySurface`] turns a scene
//! into actual output.

use std::fmt;
use std::io;

use crate::core::app::ChatSession;
use crate::core::constants::{
    COLOR_WHITE, INPUT_LABEL_Y, LINE_HEIGHT, MODEL_LABEL_Y, TEXT_X, TITLE_Y, TRANSCRIPT_ORIGIN_Y,
};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TextLine {
    pub text: String,
    pub x: i32,
    pub y: i32,
    pub color: u32,
}

impl TextLine {
    pub fn new(text: impl Into<String>, x: i32, y: i32, color: u32) -> Self {
        Self {
            text: text.into(),
            x,
            y,
            color,
        }
    }
}

/// Lines positioned relative to a shared anchor, clipped to a window.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TextGroup {
    pub anchor_y: i32,
    pub lines: Vec<TextLine>,
    pub clip_top: i32,
    pub clip_bottom: i32,
}

impl TextGroup {
    /// Lines in screen coordinates that lie wholly inside the clip window.
    pub fn visible_lines(&self) -> impl Iterator<Item = TextLine> + '_ {
        self.lines.iter().filter_map(move |line| {
            let y = self.anchor_y + line.y;
            let inside = y >= self.clip_top && y + LINE_HEIGHT as i32 <= self.clip_bottom;
            inside.then(|| TextLine::new(line.text.clone(), line.x, y, line.color))
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Scene {
    pub title: TextLine,
    pub model_label: TextLine,
    pub input_label: TextLine,
    pub transcript: TextGroup,
}

impl Scene {
    pub fn compose(session: &ChatSession) -> Self {
        let ui = &session.ui;
        let transcript = &ui.transcript;
        Self {
            title: TextLine::new(ui.title_text(), TEXT_X, TITLE_Y, COLOR_WHITE),
            model_label: TextLine::new(
                session.settings().model_label(),
                TEXT_X,
                MODEL_LABEL_Y,
                COLOR_WHITE,
            ),
            input_label: TextLine::new(
                ui.input.prompt_label(),
                TEXT_X,
                INPUT_LABEL_Y,
                COLOR_WHITE,
            ),
            transcript: TextGroup {
                anchor_y: transcript.anchor_y(),
                lines: transcript
                    .placed_lines()
                    .map(|line| TextLine::new(line.text, line.x, line.y, line.color))
                    .collect(),
                clip_top: TRANSCRIPT_ORIGIN_Y,
                clip_bottom: INPUT_LABEL_Y,
            },
        }
    }

    pub fn labels(&self) -> [&TextLine; 3] {
        [&self.title, &self.model_label, &self.input_label]
    }
}

#[derive(Debug)]
pub struct DisplayError(io::Error);

impl fmt::Display for DisplayError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "display error: {}", self.0)
    }
}

impl std::error::Error for DisplayError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        Some(&self.0)
    }
}

impl From<io::Error> for DisplayError {
    fn from(err: io::Error) -> Self {
        DisplayError(err)
    }
}

pub trait DisplaySurface {
    fn render(&mut self, scene: &Scene) -> Result<(), DisplayError>;
}
