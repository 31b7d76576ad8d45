use std::collections::VecDeque;
use std::io::Cursor;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;

use crate::api::transport::{HttpRequest, HttpResponse, HttpTransport, TransportError};
use crate::api::CompletionClient;
use crate::audio::{AudioDriver, AudioError, WaveClip};
use crate::core::config::{Settings, SettingsStore};
use crate::ui::display::{DisplayError, DisplaySurface, Scene};
use crate::ui::keypad::{Keypress, KeypressSource};

#[derive(Default)]
struct ScriptState {
    responses: VecDeque<Result<HttpResponse, TransportError>>,
    requests: Vec<HttpRequest>,
}

/// Transport that replays queued responses in order and records every request.
#[derive(Clone, Default)]
pub struct ScriptedTransport {
    state: Arc<Mutex<ScriptState>>,
}

impl ScriptedTransport {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push_json(&self, status: u16, body: &str) {
        self.push_bytes(status, body.as_bytes().to_vec());
    }

    pub fn push_bytes(&self, status: u16, body: Vec<u8>) {
        self.state
            .lock()
            .unwrap()
            .responses
            .push_back(Ok(HttpResponse { status, body }));
    }

    pub fn push_transport_error(&self, message: &str) {
        self.state
            .lock()
            .unwrap()
            .responses
            .push_back(Err(TransportError::new(message)));
    }

    pub fn requests(&self) -> Vec<HttpRequest> {
        self.state.lock().unwrap().requests.clone()
    }

    pub fn requests_to(&self, suffix: &str) -> Vec<HttpRequest> {
        self.requests()
            .into_iter()
            .filter(|request| request.url.ends_with(suffix))
            .collect()
    }
}

#[async_trait]
impl HttpTransport for ScriptedTransport {
    async fn send(&self, request: HttpRequest) -> Result<HttpResponse, TransportError> {
        let mut state = self.state.lock().unwrap();
        state.requests.push(request);
        state
            .responses
            .pop_front()
            .unwrap_or_else(|| Err(TransportError::new("no scripted response")))
    }
}

pub fn client_for(
    transport: &ScriptedTransport,
    base_url: &str,
    api_key: Option<&str>,
) -> CompletionClient {
    CompletionClient::new(
        Arc::new(transport.clone()),
        base_url,
        api_key.map(str::to_string),
    )
}

#[derive(Debug, Clone)]
pub struct PlayRecord {
    pub path: PathBuf,
    pub sample_rate: u32,
    pub existed_during_playback: bool,
}

#[derive(Default)]
struct SpeakerState {
    played: Vec<PlayRecord>,
    polls_remaining: usize,
}

/// Audio driver that records what it was asked to play.
#[derive(Clone, Default)]
pub struct RecordingSpeaker {
    state: Arc<Mutex<SpeakerState>>,
    fail_with: Option<String>,
    busy_polls: usize,
}

impl RecordingSpeaker {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn failing(message: &str) -> Self {
        Self {
            fail_with: Some(message.to_string()),
            ..Self::default()
        }
    }

    /// Report `is_playing() == true` for this many polls after each `play`.
    pub fn with_busy_polls(mut self, polls: usize) -> Self {
        self.busy_polls = polls;
        self
    }

    pub fn played(&self) -> Vec<PlayRecord> {
        self.state.lock().unwrap().played.clone()
    }
}

impl AudioDriver for RecordingSpeaker {
    fn play(&mut self, clip: &WaveClip) -> Result<(), AudioError> {
        if let Some(message) = &self.fail_with {
            return Err(AudioError::Device(message.clone()));
        }
        let mut state = self.state.lock().unwrap();
        state.played.push(PlayRecord {
            path: clip.path().to_path_buf(),
            sample_rate: clip.spec().sample_rate,
            existed_during_playback: clip.path().exists(),
        });
        state.polls_remaining = self.busy_polls;
        Ok(())
    }

    fn is_playing(&mut self) -> bool {
        let mut state = self.state.lock().unwrap();
        if state.polls_remaining == 0 {
            false
        } else {
            state.polls_remaining -= 1;
            true
        }
    }
}

/// A short mono 16 kHz WAV file.
pub fn sample_wav_bytes() -> Vec<u8> {
    let spec = hound::WavSpec {
        channels: 1,
        sample_rate: 16_000,
        bits_per_sample: 16,
        sample_format: hound::SampleFormat::Int,
    };
    let mut cursor = Cursor::new(Vec::new());
    {
        let mut writer = hound::WavWriter::new(&mut cursor, spec).unwrap();
        for i in 0..160i16 {
            writer.write_sample(i * 100).unwrap();
        }
        writer.finalize().unwrap();
    }
    cursor.into_inner()
}

pub fn test_settings(sd_card_path: &Path) -> Settings {
    Settings {
        lm_studio_base_url: "http://h".to_string(),
        api_key: "k123".to_string(),
        last_used_model: None,
        logging_enabled: false,
        sd_card_path: sd_card_path.display().to_string(),
        ..Settings::default()
    }
}

pub fn write_settings(dir: &Path, settings: &Settings) -> SettingsStore {
    let path = dir.join("config.json");
    let store = SettingsStore::new(path, settings.clone());
    store.save().unwrap();
    store
}

/// Keypad that yields a fixed sequence and then reports itself closed.
pub struct ScriptedKeypad {
    keys: VecDeque<Keypress>,
}

impl ScriptedKeypad {
    pub fn new(typed: &str) -> Self {
        Self::from_keys(typed.chars().filter_map(Keypress::from_char).collect())
    }

    pub fn from_keys(keys: Vec<Keypress>) -> Self {
        Self { keys: keys.into() }
    }
}

impl KeypressSource for ScriptedKeypad {
    fn next_keypress(&mut self) -> Option<Keypress> {
        self.keys.pop_front()
    }

    fn is_closed(&self) -> bool {
        self.keys.is_empty()
    }
}

/// Display that keeps every rendered scene.
#[derive(Default)]
pub struct RecordingDisplay {
    frames: Vec<Scene>,
}

impl RecordingDisplay {
    pub fn frames(&self) -> &[Scene] {
        &self.frames
    }
}

impl DisplaySurface for RecordingDisplay {
    fn render(&mut self, scene: &Scene) -> Result<(), DisplayError> {
        self.frames.push(scene.clone());
        Ok(())
    }
}
