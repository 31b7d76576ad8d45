use crate::core::config::data::Settings;

impl Settings {
    /// First five characters of the API key, for logs.
    pub fn api_key_preview(&self) -> String {
        let preview: String = self.api_key.chars().take(5).collect();
        format!("{preview}...")
    }

    pub fn summary(&self) -> String {
        let mut summary = format!(
            "base_url={}, api_key={}, model={}, logging={}, sd_path={}",
            self.lm_studio_base_url,
            self.api_key_preview(),
            self.last_used_model.as_deref().unwrap_or("(unset)"),
            self.logging_enabled,
            self.sd_card_path,
        );
        match self.tts_base_url() {
            Some(url) => summary.push_str(&format!(", tts={url}")),
            None => summary.push_str(", tts=off"),
        }
        summary
    }
}
