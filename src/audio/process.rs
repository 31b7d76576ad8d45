//! Speaker backed by an external WAV player (`aplay`, `afplay`, `paplay`).

use std::process::{Child, Command, ExitStatus, Stdio};

use tracing::debug;

use super::{AudioDriver, AudioError, WaveClip};

pub struct ProcessSpeaker {
    program: String,
    child: Option<Child>,
    exit: Option<ExitStatus>,
}

impl ProcessSpeaker {
    pub fn new(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
            child: None,
            exit: None,
        }
    }
}

impl AudioDriver for ProcessSpeaker {
    fn play(&mut self, clip: &WaveClip) -> Result<(), AudioError> {
        debug!(
            program = %self.program,
            path = %clip.path().display(),
            duration_ms = clip.duration().as_millis() as u64,
            "Starting audio playback"
        );
        let child = Command::new(&self.program)
            .arg(clip.path())
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .spawn()
            .map_err(|err| {
                AudioError::Device(format!("failed to start {}: {err}", self.program))
            })?;
        self.child = Some(child);
        self.exit = None;
        Ok(())
    }

    fn is_playing(&mut self) -> bool {
        let Some(child) = self.child.as_mut() else {
            return false;
        };
        match child.try_wait() {
            Ok(None) => true,
            Ok(Some(status)) => {
                self.exit = Some(status);
                self.child = None;
                false
            }
            Err(err) => {
                debug!(error = %err, "Lost track of player process");
                self.child = None;
                false
            }
        }
    }

    fn finish(&mut self) -> Result<(), AudioError> {
        match self.exit.take() {
            Some(status) if !status.success() => Err(AudioError::Device(format!(
                "{} exited with {status}",
                self.program
            ))),
            _ => Ok(()),
        }
    }
}

#[cfg(all(test, unix))]
mod tests {
    use super::*;
    use crate::audio::play_to_completion;
    use crate::utils::test_utils::sample_wav_bytes;
    use tempfile::tempdir;

    fn clip_in(dir: &std::path::Path) -> WaveClip {
        let path = dir.join("clip.wav");
        std::fs::write(&path, sample_wav_bytes()).unwrap();
        WaveClip::open(&path).unwrap()
    }

    #[tokio::test]
    async fn successful_player_exit_completes_playback() {
        let dir = tempdir().unwrap();
        let clip = clip_in(dir.path());
        let mut speaker = ProcessSpeaker::new("true");

        play_to_completion(&mut speaker, &clip).await.unwrap();
    }

    #[tokio::test]
    async fn failing_player_exit_is_reported() {
        let dir = tempdir().unwrap();
        let clip = clip_in(dir.path());
        let mut speaker = ProcessSpeaker::new("false");

        let err = play_to_completion(&mut speaker, &clip).await.unwrap_err();
        assert!(matches!(err, AudioError::Device(_)));
    }

    #[test]
    fn missing_player_fails_to_start() {
        let dir = tempdir().unwrap();
        let clip = clip_in(dir.path());
        let mut speaker = ProcessSpeaker::new("definitely-not-a-wav-player-binary");

        assert!(speaker.play(&clip).is_err());
        assert!(!speaker.is_playing());
    }
}
