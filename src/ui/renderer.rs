//! Terminal stand-in for the handheld's 320x240 LCD.
//!
//! Pixel positions map onto character cells: one column per glyph width and
//! one row per line height, measured from the title baseline.

use ratatui::backend::Backend;
use ratatui::layout::Rect;
use ratatui::style::{Color, Style};
use ratatui::text::Line;
use ratatui::widgets::Paragraph;
use ratatui::{Frame, Terminal};

use crate::core::constants::{GLYPH_WIDTH, LINE_HEIGHT, TITLE_Y};
use crate::ui::display::{DisplayError, DisplaySurface, Scene, TextLine};

/// Cell for a pixel position, or `None` above/left of the drawable area.
pub fn cell_for(x: i32, y: i32) -> Option<(u16, u16)> {
    if x < 0 || y < TITLE_Y {
        return None;
    }
    let col = x as u32 / GLYPH_WIDTH;
    let row = (y - TITLE_Y) as u32 / LINE_HEIGHT;
    Some((u16::try_from(col).ok()?, u16::try_from(row).ok()?))
}

fn rgb(color: u32) -> Color {
    Color::Rgb((color >> 16) as u8, (color >> 8) as u8, color as u8)
}

fn draw_line(frame: &mut Frame, line: &TextLine) {
    let Some((col, row)) = cell_for(line.x, line.y) else {
        return;
    };
    let area = frame.area();
    if row >= area.height || col >= area.width {
        return;
    }
    let rect = Rect::new(col, row, area.width - col, 1);
    let text = Line::styled(line.text.as_str(), Style::default().fg(rgb(line.color)));
    frame.render_widget(Paragraph::new(text), rect);
}

pub struct TerminalDisplay<B: Backend> {
    terminal: Terminal<B>,
}

impl<B: Backend> TerminalDisplay<B> {
    pub fn new(terminal: Terminal<B>) -> Self {
        Self { terminal }
    }

    pub fn terminal(&self) -> &Terminal<B> {
        &self.terminal
    }

    pub fn terminal_mut(&mut self) -> &mut Terminal<B> {
        &mut self.terminal
    }
}

impl<B: Backend> DisplaySurface for TerminalDisplay<B> {
    fn render(&mut self, scene: &Scene) -> Result<(), DisplayError> {
        self.terminal.draw(|frame| {
            for label in scene.labels() {
                draw_line(frame, label);
            }
            for line in scene.transcript.visible_lines() {
                draw_line(frame, &line);
            }
        })?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::constants::{DISPLAY_HEIGHT, DISPLAY_WIDTH};
    use crate::ui::display::TextGroup;
    use ratatui::backend::TestBackend;

    fn row_text(display: &TerminalDisplay<TestBackend>, row: u16) -> String {
        let buffer = display.terminal().backend().buffer();
        (0..buffer.area.width)
            .filter_map(|col| buffer.cell((col, row)).map(|cell| cell.symbol().to_string()))
            .collect::<String>()
            .trim_end()
            .to_string()
    }

    fn scene_with(lines: Vec<TextLine>, anchor_y: i32) -> Scene {
        Scene {
            title: TextLine::new("T-Deck LLM Chat", 10, 10, 0xFFFFFF),
            model_label: TextLine::new("Model: phi", 10, 30, 0xFFFFFF),
            input_label: TextLine::new("> typing", 10, 220, 0xFFFFFF),
            transcript: TextGroup {
                anchor_y,
                lines,
                clip_top: 50,
                clip_bottom: 220,
            },
        }
    }

    #[test]
    fn pixel_positions_map_to_cells() {
        assert_eq!(cell_for(10, 10), Some((1, 0)));
        assert_eq!(cell_for(10, 30), Some((1, 1)));
        assert_eq!(cell_for(10, 50), Some((1, 2)));
        assert_eq!(cell_for(10, 205), Some((1, 13)));
        assert_eq!(cell_for(10, 220), Some((1, 14)));
        assert_eq!(cell_for(10, 0), None);
        assert_eq!(cell_for(-1, 50), None);
    }

    #[test]
    fn renders_labels_and_transcript() {
        let cols = (DISPLAY_WIDTH / GLYPH_WIDTH) as u16;
        let rows = (DISPLAY_HEIGHT / LINE_HEIGHT) as u16;
        let terminal = Terminal::new(TestBackend::new(cols, rows)).unwrap();
        let mut display = TerminalDisplay::new(terminal);
        let scene = scene_with(
            vec![
                TextLine::new("User: hello", 10, 0, 0xFFFFFF),
                TextLine::new("hi!", 10, 15, 0x00FF00),
            ],
            50,
        );

        display.render(&scene).unwrap();

        assert_eq!(row_text(&display, 0), " T-Deck LLM Chat");
        assert_eq!(row_text(&display, 1), " Model: phi");
        assert_eq!(row_text(&display, 2), " User: hello");
        assert_eq!(row_text(&display, 3), " hi!");
        assert_eq!(row_text(&display, 14), " > typing");

        let buffer = display.terminal().backend().buffer();
        let green = buffer.cell((1, 3)).unwrap();
        assert_eq!(green.fg, Color::Rgb(0, 255, 0));
    }

    #[test]
    fn scrolled_out_lines_are_not_drawn() {
        let mut display = TerminalDisplay::new(Terminal::new(TestBackend::new(53, 16)).unwrap());
        let scene = scene_with(
            vec![
                TextLine::new("gone", 10, 0, 0xFFFFFF),
                TextLine::new("kept", 10, 15, 0xFFFFFF),
            ],
            35,
        );

        display.render(&scene).unwrap();

        assert_eq!(row_text(&display, 1), " Model: phi");
        assert_eq!(row_text(&display, 2), " kept");
    }

    #[test]
    fn small_terminal_does_not_panic() {
        let mut display = TerminalDisplay::new(Terminal::new(TestBackend::new(5, 2)).unwrap());
        display.render(&scene_with(Vec::new(), 50)).unwrap();
        assert_eq!(row_text(&display, 0), " T-De");
    }
}
