use std::path::PathBuf;

use crate::core::config::data::Settings;
use crate::core::constants::{CHAT_LOG_FILE, TEMP_AUDIO_FILE};

pub const DEFAULT_SD_CARD_PATH: &str = "/sd";

pub const DEFAULT_TTS_MODEL: &str = "chatterbox";
pub const DEFAULT_TTS_VOICE: &str = "voices/chatterbox/whywishnotfar.wav";
pub const DEFAULT_TTS_EXAGGERATION: f64 = 0.4;
pub const DEFAULT_TTS_CFG_WEIGHT: f64 = 0.5;
pub const DEFAULT_TTS_TEMPERATURE: f64 = 0.6;
pub const DEFAULT_TTS_DEVICE: &str = "auto";
pub const DEFAULT_TTS_DTYPE: &str = "float16";
/// Negative seed lets the TTS server pick a random one.
pub const DEFAULT_TTS_SEED: i64 = -1;
pub const DEFAULT_TTS_CHUNKED: bool = true;

impl Settings {
    /// TTS is on exactly when this returns a URL.
    pub fn tts_base_url(&self) -> Option<&str> {
        self.tts_base_url
            .as_deref()
            .map(str::trim)
            .filter(|url| !url.is_empty())
    }

    /// `None` when the key is blank, so no auth header is sent.
    pub fn bearer_token(&self) -> Option<&str> {
        Some(self.api_key.trim()).filter(|key| !key.is_empty())
    }

    pub fn temp_audio_path(&self) -> PathBuf {
        PathBuf::from(&self.sd_card_path).join(TEMP_AUDIO_FILE)
    }

    pub fn chat_log_path(&self) -> PathBuf {
        PathBuf::from(&self.sd_card_path).join(CHAT_LOG_FILE)
    }

    /// Status line text; always mirrors `last_used_model`.
    pub fn model_label(&self) -> String {
        format!(
            "Model: {}",
            self.last_used_model.as_deref().unwrap_or("None")
        )
    }
}
