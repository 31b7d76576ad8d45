use crate::core::config::data::Settings;
use crate::core::config::io::SettingsError;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Owns the loaded settings and the file they came from.
///
/// Every mutation goes through [`SettingsStore::mutate`], which writes the
/// whole settings object back before returning.
#[derive(Debug)]
pub struct SettingsStore {
    path: PathBuf,
    settings: Settings,
}

impl SettingsStore {
    pub fn new(path: PathBuf, settings: Settings) -> Self {
        Self { path, settings }
    }

    pub fn load(path: impl Into<PathBuf>) -> Result<Self, SettingsError> {
        let path = path.into();
        let settings = Settings::load_from_path(&path)?;
        Ok(Self { path, settings })
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn save(&self) -> Result<(), SettingsError> {
        self.settings.save_to_path(&self.path)
    }

    /// Apply `mutator` and persist. In-memory state keeps the change even if
    /// the write fails, so the session stays consistent with what it did.
    pub fn mutate<F>(&mut self, mutator: F) -> Result<(), SettingsError>
    where
        F: FnOnce(&mut Settings),
    {
        mutator(&mut self.settings);
        self.save()
    }

    pub fn set_last_used_model(&mut self, model: &str) -> Result<(), SettingsError> {
        debug!(model, path = %self.path.display(), "Persisting last used model");
        self.mutate(|settings| settings.last_used_model = Some(model.to_string()))
    }
}
