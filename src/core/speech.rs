//! Text-to-speech for assistant replies.
//!
//! One `speak` call runs synthesis, stages the returned WAV on the SD card,
//! plays it and removes the staged file again. The file is owned by a
//! [`StagedAudio`] guard so removal happens on every exit path.

use std::fmt;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use tracing::{debug, info, warn};

use crate::api::transport::{HttpRequest, HttpTransport};
use crate::api::{ApiError, ServerClient, SpeechRequest, SpeechRequestParams};
use crate::audio::{play_to_completion, AudioDriver, AudioError, WaveClip};
use crate::core::config::defaults::{
    DEFAULT_TTS_CFG_WEIGHT, DEFAULT_TTS_CHUNKED, DEFAULT_TTS_DEVICE, DEFAULT_TTS_DTYPE,
    DEFAULT_TTS_EXAGGERATION, DEFAULT_TTS_MODEL, DEFAULT_TTS_SEED, DEFAULT_TTS_TEMPERATURE,
    DEFAULT_TTS_VOICE,
};
use crate::core::config::Settings;

const SPEECH_ENDPOINT: &str = "v1/audio/speech";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SpeechState {
    Idle,
    Synthesizing,
    Playing,
    Aborted,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SpeechOutcome {
    /// TTS is not configured or there was nothing to say.
    Skipped,
    Played { bytes: usize },
}

#[derive(Debug)]
pub enum SpeechError {
    Synthesis(ApiError),
    Stage { path: PathBuf, source: io::Error },
    Decode(AudioError),
    Playback(AudioError),
    SpeakerUnavailable,
}

impl fmt::Display for SpeechError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SpeechError::Synthesis(err) => write!(f, "TTS request failed: {err}"),
            SpeechError::Stage { path, source } => {
                write!(f, "could not stage audio at {}: {source}", path.display())
            }
            SpeechError::Decode(err) | SpeechError::Playback(err) => write!(f, "{err}"),
            SpeechError::SpeakerUnavailable => write!(f, "no speaker attached"),
        }
    }
}

impl std::error::Error for SpeechError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            SpeechError::Synthesis(err) => Some(err),
            SpeechError::Stage { source, .. } => Some(source),
            SpeechError::Decode(err) | SpeechError::Playback(err) => Some(err),
            SpeechError::SpeakerUnavailable => None,
        }
    }
}

/// Synthesis settings with every unset field replaced by its default.
#[derive(Debug, Clone, PartialEq)]
pub struct SpeechParameters {
    pub model: String,
    pub voice: String,
    pub exaggeration: f64,
    pub cfg_weight: f64,
    pub temperature: f64,
    pub device: String,
    pub dtype: String,
    pub seed: i64,
    pub chunked: bool,
}

impl SpeechParameters {
    pub fn resolve(settings: &Settings) -> Self {
        Self {
            model: settings
                .tts_model_name
                .clone()
                .unwrap_or_else(|| DEFAULT_TTS_MODEL.to_string()),
            voice: settings
                .tts_voice
                .clone()
                .unwrap_or_else(|| DEFAULT_TTS_VOICE.to_string()),
            exaggeration: settings.tts_exaggeration.unwrap_or(DEFAULT_TTS_EXAGGERATION),
            cfg_weight: settings.tts_cfg_weight.unwrap_or(DEFAULT_TTS_CFG_WEIGHT),
            temperature: settings.tts_temperature.unwrap_or(DEFAULT_TTS_TEMPERATURE),
            device: settings
                .tts_device
                .clone()
                .unwrap_or_else(|| DEFAULT_TTS_DEVICE.to_string()),
            dtype: settings
                .tts_dtype
                .clone()
                .unwrap_or_else(|| DEFAULT_TTS_DTYPE.to_string()),
            seed: settings.tts_seed.unwrap_or(DEFAULT_TTS_SEED),
            chunked: settings.tts_chunked.unwrap_or(DEFAULT_TTS_CHUNKED),
        }
    }

    pub fn request(&self, text: &str) -> SpeechRequest {
        SpeechRequest {
            model: self.model.clone(),
            voice: self.voice.clone(),
            input: text.to_string(),
            response_format: "wav".to_string(),
            speed: 1,
            stream: true,
            params: SpeechRequestParams {
                desired_length: 100,
                max_length: 300,
                halve_first_chunk: true,
                exaggeration: self.exaggeration,
                cfg_weight: self.cfg_weight,
                temperature: self.temperature,
                device: self.device.clone(),
                dtype: self.dtype.clone(),
                cpu_offload: false,
                chunked: self.chunked,
                cache_voice: false,
                tokens_per_slice: None,
                remove_milliseconds: None,
                remove_milliseconds_start: None,
                chunk_overlap_method: "undefined".to_string(),
                seed: self.seed,
                use_compilation: true,
                max_new_tokens: 1000,
                max_cache_len: 1500,
            },
        }
    }
}

/// Audio bytes written to disk for the duration of one playback.
struct StagedAudio {
    path: PathBuf,
}

impl StagedAudio {
    fn write(path: &Path, bytes: &[u8]) -> Result<Self, SpeechError> {
        // Guard first so a partial write is cleaned up too.
        let staged = Self {
            path: path.to_path_buf(),
        };
        fs::write(&staged.path, bytes).map_err(|source| SpeechError::Stage {
            path: staged.path.clone(),
            source,
        })?;
        Ok(staged)
    }

    fn path(&self) -> &Path {
        &self.path
    }
}

impl Drop for StagedAudio {
    fn drop(&mut self) {
        match fs::remove_file(&self.path) {
            Ok(()) => debug!(path = %self.path.display(), "Removed staged audio"),
            Err(err) if err.kind() == io::ErrorKind::NotFound => {
                debug!(path = %self.path.display(), "Staged audio already gone");
            }
            Err(err) => {
                warn!(path = %self.path.display(), error = %err, "Failed to remove staged audio");
            }
        }
    }
}

pub struct SpeechPipeline {
    client: Option<ServerClient>,
    params: SpeechParameters,
    temp_path: PathBuf,
    driver: Option<Box<dyn AudioDriver>>,
    state: SpeechState,
}

impl SpeechPipeline {
    pub fn from_settings(
        transport: Arc<dyn HttpTransport>,
        settings: &Settings,
        driver: Option<Box<dyn AudioDriver>>,
    ) -> Self {
        let client = settings.tts_base_url().map(|url| {
            ServerClient::new(
                transport,
                url,
                settings.bearer_token().map(str::to_string),
            )
        });
        Self {
            client,
            params: SpeechParameters::resolve(settings),
            temp_path: settings.temp_audio_path(),
            driver,
            state: SpeechState::Idle,
        }
    }

    pub fn is_enabled(&self) -> bool {
        self.client.is_some()
    }

    pub fn state(&self) -> SpeechState {
        self.state
    }

    /// Synthesize `text` and play it to completion.
    pub async fn speak(&mut self, text: &str) -> Result<SpeechOutcome, SpeechError> {
        let Some(client) = self.client.clone() else {
            return Ok(SpeechOutcome::Skipped);
        };
        if text.trim().is_empty() {
            return Ok(SpeechOutcome::Skipped);
        }

        self.transition(SpeechState::Synthesizing);
        let result = self.synthesize_and_play(&client, text).await;
        if result.is_err() {
            self.transition(SpeechState::Aborted);
        }
        self.transition(SpeechState::Idle);
        result
    }

    async fn synthesize_and_play(
        &mut self,
        client: &ServerClient,
        text: &str,
    ) -> Result<SpeechOutcome, SpeechError> {
        let body = serde_json::to_value(self.params.request(text))
            .map_err(|err| SpeechError::Synthesis(ApiError::Malformed(err.to_string())))?;
        let request = client.authorized(
            HttpRequest::post(client.endpoint(SPEECH_ENDPOINT), body).header("Accept", "*/*"),
        );

        info!(chars = text.chars().count(), voice = %self.params.voice, "Requesting speech");
        let response = client.send(request).await.map_err(SpeechError::Synthesis)?;
        if !response.is_ok() {
            return Err(SpeechError::Synthesis(ApiError::from_status(&response)));
        }

        self.transition(SpeechState::Playing);
        let bytes = response.content().len();
        let staged = StagedAudio::write(&self.temp_path, response.content())?;
        let driver = self
            .driver
            .as_deref_mut()
            .ok_or(SpeechError::SpeakerUnavailable)?;
        let clip = WaveClip::open(staged.path()).map_err(SpeechError::Decode)?;
        play_to_completion(driver, &clip)
            .await
            .map_err(SpeechError::Playback)?;
        Ok(SpeechOutcome::Played { bytes })
    }

    fn transition(&mut self, next: SpeechState) {
        debug!(from = ?self.state, to = ?next, "Speech state");
        self.state = next;
    }
}
