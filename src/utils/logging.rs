use std::fs::OpenOptions;
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};

use chrono::Local;

/// Plain-text transcript log on the SD card.
pub struct LoggingState {
    file_path: Option<PathBuf>,
}

impl LoggingState {
    /// Logging is active whenever a file is given.
    pub fn new(log_file: Option<PathBuf>) -> Self {
        LoggingState {
            file_path: log_file,
        }
    }

    pub fn disabled() -> Self {
        Self::new(None)
    }

    /// Write a dated header so separate runs are distinguishable in one file.
    pub fn start_session(&self) -> io::Result<()> {
        let stamp = Local::now().format("%Y-%m-%d %H:%M:%S");
        self.log_message(&format!("## Session started {stamp}"))
    }

    pub fn log_message(&self, content: &str) -> io::Result<()> {
        match &self.file_path {
            Some(path) => Self::write_to_log(path, content),
            None => Ok(()),
        }
    }

    fn write_to_log(path: &Path, content: &str) -> io::Result<()> {
        let file = OpenOptions::new().create(true).append(true).open(path)?;
        let mut writer = BufWriter::new(file);

        for line in content.lines() {
            writeln!(writer, "{line}")?;
        }

        // Blank line between messages.
        writeln!(writer)?;
        writer.flush()
    }
}
