use std::{error::Error, io};

use ratatui::backend::CrosstermBackend;
use ratatui::crossterm::{
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::Terminal;

use crate::ui::renderer::TerminalDisplay;

pub type TerminalSurface = TerminalDisplay<CrosstermBackend<io::Stdout>>;

pub fn setup_terminal() -> Result<TerminalSurface, Box<dyn Error>> {
    enable_raw_mode()?;

    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;

    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend).inspect_err(|_| {
        let _ = disable_raw_mode();
    })?;
    terminal.hide_cursor()?;
    terminal.clear()?;

    Ok(TerminalDisplay::new(terminal))
}

pub fn restore_terminal(display: &mut TerminalSurface) -> Result<(), Box<dyn Error>> {
    disable_raw_mode()?;
    let terminal = display.terminal_mut();
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;
    Ok(())
}
