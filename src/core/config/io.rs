use crate::core::config::data::{path_display, Settings, StoredSettings};
use std::error::Error as StdError;
use std::fmt;
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;

/// Errors that can occur when loading or saving the settings file.
#[derive(Debug)]
pub enum SettingsError {
    /// No settings file exists at the given path.
    NotFound { path: PathBuf },

    /// Failed to read the settings file from disk.
    Read {
        path: PathBuf,
        source: std::io::Error,
    },

    /// The file is not a JSON object of the expected shape.
    Parse {
        path: PathBuf,
        source: serde_json::Error,
    },

    /// A required key is absent or `null`.
    MissingField { path: PathBuf, field: &'static str },

    /// Failed to write the settings file back to disk.
    Write {
        path: PathBuf,
        source: std::io::Error,
    },

    Serialize(serde_json::Error),
}

impl SettingsError {
    fn display_path(path: &Path) -> String {
        path_display(path)
    }
}

impl fmt::Display for SettingsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SettingsError::NotFound { path } => {
                write!(f, "No settings file at {}", Self::display_path(path))
            }
            SettingsError::Read { path, source } => {
                write!(
                    f,
                    "Failed to read settings at {}: {}",
                    Self::display_path(path),
                    source
                )
            }
            SettingsError::Parse { path, source } => {
                write!(
                    f,
                    "Failed to parse settings at {}: {}",
                    Self::display_path(path),
                    source
                )
            }
            SettingsError::MissingField { path, field } => {
                write!(
                    f,
                    "Settings at {} are missing required key '{}'",
                    Self::display_path(path),
                    field
                )
            }
            SettingsError::Write { path, source } => {
                write!(
                    f,
                    "Failed to write settings to {}: {}",
                    Self::display_path(path),
                    source
                )
            }
            SettingsError::Serialize(source) => {
                write!(f, "Failed to serialize settings: {source}")
            }
        }
    }
}

impl StdError for SettingsError {
    fn source(&self) -> Option<&(dyn StdError + 'static)> {
        match self {
            SettingsError::NotFound { .. } | SettingsError::MissingField { .. } => None,
            SettingsError::Read { source, .. } => Some(source),
            SettingsError::Parse { source, .. } => Some(source),
            SettingsError::Write { source, .. } => Some(source),
            SettingsError::Serialize(source) => Some(source),
        }
    }
}

impl Settings {
    pub fn load_from_path(path: &Path) -> Result<Settings, SettingsError> {
        if !path.exists() {
            return Err(SettingsError::NotFound {
                path: path.to_path_buf(),
            });
        }
        let contents = fs::read_to_string(path).map_err(|source| SettingsError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let stored: StoredSettings =
            serde_json::from_str(&contents).map_err(|source| SettingsError::Parse {
                path: path.to_path_buf(),
                source,
            })?;
        stored
            .validate()
            .map_err(|field| SettingsError::MissingField {
                path: path.to_path_buf(),
                field,
            })
    }

    pub(crate) fn save_to_path(&self, path: &Path) -> Result<(), SettingsError> {
        let write_err = |source: std::io::Error| SettingsError::Write {
            path: path.to_path_buf(),
            source,
        };
        let parent = path.parent().filter(|dir| !dir.as_os_str().is_empty());

        if let Some(dir) = parent {
            fs::create_dir_all(dir).map_err(write_err)?;
        }

        let contents = serde_json::to_string_pretty(self).map_err(SettingsError::Serialize)?;
        // Same directory as the target so `persist` is a rename, not a copy.
        let mut temp_file =
            NamedTempFile::new_in(parent.unwrap_or(Path::new("."))).map_err(write_err)?;

        temp_file.write_all(contents.as_bytes()).map_err(write_err)?;
        temp_file.as_file_mut().sync_all().map_err(write_err)?;
        temp_file
            .persist(path)
            .map_err(|err| write_err(err.error))?;
        Ok(())
    }
}
