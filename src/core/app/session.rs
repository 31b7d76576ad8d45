use crate::api::CompletionClient;
use crate::core::config::{Settings, SettingsError, SettingsStore};
use crate::utils::logging::LoggingState;

/// Backend-facing state: settings, the completion client and the transcript log.
pub struct SessionContext {
    pub store: SettingsStore,
    pub client: CompletionClient,
    pub system_prompt: String,
    pub logging: LoggingState,
}

impl SessionContext {
    pub fn settings(&self) -> &Settings {
        self.store.settings()
    }

    /// Model field for chat requests; empty when nothing is selected.
    pub fn model_for_request(&self) -> String {
        self.settings().last_used_model.clone().unwrap_or_default()
    }

    pub fn has_model(&self) -> bool {
        self.settings().last_used_model.is_some()
    }

    pub fn remember_model(&mut self, model: &str) -> Result<(), SettingsError> {
        self.store.set_last_used_model(model)
    }
}
