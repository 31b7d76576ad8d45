//! Speaker output.
//!
//! Staged WAV files are decoded into a [`WaveClip`] with `hound` before they
//! reach an [`AudioDriver`]. Drivers only expose `play` and an `is_playing`
//! readiness flag; [`play_to_completion`] turns that into a single awaitable
//! call.

pub mod process;

use std::fmt;
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::core::constants::PLAYBACK_POLL_INTERVAL;

#[derive(Debug, Clone)]
pub enum AudioError {
    /// The staged bytes are not a WAV file hound can read.
    Decode(String),
    /// The speaker refused the clip or failed mid-playback.
    Device(String),
}

impl fmt::Display for AudioError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AudioError::Decode(detail) => write!(f, "could not decode audio: {detail}"),
            AudioError::Device(detail) => write!(f, "audio device error: {detail}"),
        }
    }
}

impl std::error::Error for AudioError {}

/// A decoded WAV file on disk.
#[derive(Debug, Clone)]
pub struct WaveClip {
    path: PathBuf,
    spec: hound::WavSpec,
    frames: u32,
}

impl WaveClip {
    pub fn open(path: &Path) -> Result<Self, AudioError> {
        let reader =
            hound::WavReader::open(path).map_err(|err| AudioError::Decode(err.to_string()))?;
        Ok(Self {
            path: path.to_path_buf(),
            spec: reader.spec(),
            frames: reader.duration(),
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn spec(&self) -> hound::WavSpec {
        self.spec
    }

    pub fn duration(&self) -> Duration {
        if self.spec.sample_rate == 0 {
            return Duration::ZERO;
        }
        Duration::from_secs_f64(f64::from(self.frames) / f64::from(self.spec.sample_rate))
    }
}

pub trait AudioDriver: Send {
    /// Start playing `clip`. Returns once playback has begun.
    fn play(&mut self, clip: &WaveClip) -> Result<(), AudioError>;

    fn is_playing(&mut self) -> bool;

    /// Called after `is_playing` turns false; reports how playback ended.
    fn finish(&mut self) -> Result<(), AudioError> {
        Ok(())
    }
}

/// Play `clip` and wait until the driver reports it is done.
pub async fn play_to_completion(
    driver: &mut dyn AudioDriver,
    clip: &WaveClip,
) -> Result<(), AudioError> {
    driver.play(clip)?;
    while driver.is_playing() {
        tokio::time::sleep(PLAYBACK_POLL_INTERVAL).await;
    }
    driver.finish()
}
