use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use super::defaults::DEFAULT_SD_CARD_PATH;

/// Session settings as stored in `config.json`.
///
/// Every field is written back on save, unset optionals as `null`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Settings {
    pub lm_studio_base_url: String,
    pub api_key: String,
    pub last_used_model: Option<String>,
    pub logging_enabled: bool,
    pub sd_card_path: String,
    pub tts_base_url: Option<String>,
    pub tts_model_name: Option<String>,
    pub tts_voice: Option<String>,
    pub tts_exaggeration: Option<f64>,
    pub tts_cfg_weight: Option<f64>,
    pub tts_temperature: Option<f64>,
    pub tts_device: Option<String>,
    pub tts_dtype: Option<String>,
    pub tts_seed: Option<i64>,
    pub tts_chunked: Option<bool>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            lm_studio_base_url: String::new(),
            api_key: String::new(),
            last_used_model: None,
            logging_enabled: false,
            sd_card_path: DEFAULT_SD_CARD_PATH.to_string(),
            tts_base_url: None,
            tts_model_name: None,
            tts_voice: None,
            tts_exaggeration: None,
            tts_cfg_weight: None,
            tts_temperature: None,
            tts_device: None,
            tts_dtype: None,
            tts_seed: None,
            tts_chunked: None,
        }
    }
}

/// On-disk shape before validation: every key may be absent or `null`.
#[derive(Debug, Default, Deserialize)]
pub(crate) struct StoredSettings {
    pub lm_studio_base_url: Option<String>,
    pub api_key: Option<String>,
    pub last_used_model: Option<String>,
    pub logging_enabled: Option<bool>,
    pub sd_card_path: Option<String>,
    pub tts_base_url: Option<String>,
    pub tts_model_name: Option<String>,
    pub tts_voice: Option<String>,
    pub tts_exaggeration: Option<f64>,
    pub tts_cfg_weight: Option<f64>,
    pub tts_temperature: Option<f64>,
    pub tts_device: Option<String>,
    pub tts_dtype: Option<String>,
    pub tts_seed: Option<i64>,
    pub tts_chunked: Option<bool>,
}

impl StoredSettings {
    /// Fails with the name of the first missing required key.
    pub(crate) fn validate(self) -> Result<Settings, &'static str> {
        let lm_studio_base_url = self.lm_studio_base_url.ok_or("lm_studio_base_url")?;
        let api_key = self.api_key.ok_or("api_key")?;
        Ok(Settings {
            lm_studio_base_url,
            api_key,
            last_used_model: self.last_used_model,
            logging_enabled: self.logging_enabled.unwrap_or(false),
            sd_card_path: self
                .sd_card_path
                .unwrap_or_else(|| DEFAULT_SD_CARD_PATH.to_string()),
            tts_base_url: self.tts_base_url,
            tts_model_name: self.tts_model_name,
            tts_voice: self.tts_voice,
            tts_exaggeration: self.tts_exaggeration,
            tts_cfg_weight: self.tts_cfg_weight,
            tts_temperature: self.tts_temperature,
            tts_device: self.tts_device,
            tts_dtype: self.tts_dtype,
            tts_seed: self.tts_seed,
            tts_chunked: self.tts_chunked,
        })
    }
}

/// Get a user-friendly display string for a path
/// Converts absolute paths to use ~ notation on Unix-like systems when possible
pub fn path_display<P: AsRef<Path>>(path: P) -> String {
    let path = path.as_ref();

    #[cfg(unix)]
    {
        if let Some(home) = std::env::var_os("HOME") {
            let home_path = PathBuf::from(home);
            if let Ok(relative) = path.strip_prefix(&home_path) {
                return format!("~/{}", relative.display());
            }
        }
    }

    path.display().to_string()
}
