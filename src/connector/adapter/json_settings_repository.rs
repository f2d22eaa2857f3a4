use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use async_trait::async_trait;
use tracing::debug;

use crate::application::SettingsRepository;
use crate::domain::{ChatSettings, DomainError};

/// Settings location relative to the project folder.
pub const DEFAULT_SETTINGS_PATH: &str = "UserSettings/scriptgpt.json";

/// Stores [`ChatSettings`] as pretty-printed JSON in a single file.
pub struct JsonSettingsRepository {
    path: PathBuf,
}

impl JsonSettingsRepository {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

#[async_trait]
impl SettingsRepository for JsonSettingsRepository {
    async fn load(&self) -> Result<ChatSettings, DomainError> {
        let raw = match tokio::fs::read_to_string(&self.path).await {
            Ok(raw) => raw,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                debug!("No settings at {}, using defaults", self.path.display());
                return Ok(ChatSettings::default());
            }
            Err(e) => {
                return Err(DomainError::storage(format!(
                    "Failed to read settings {}: {}",
                    self.path.display(),
                    e
                )))
            }
        };

        serde_json::from_str(&raw).map_err(|e| {
            DomainError::storage(format!(
                "Invalid settings file {}: {}",
                self.path.display(),
                e
            ))
        })
    }

    async fn save(&self, settings: &ChatSettings) -> Result<(), DomainError> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            tokio::fs::create_dir_all(parent).await.map_err(|e| {
                DomainError::storage(format!("Failed to create {}: {}", parent.display(), e))
            })?;
        }

        let json = serde_json::to_string_pretty(settings)
            .map_err(|e| DomainError::internal(format!("Failed to serialize settings: {}", e)))?;

        tokio::fs::write(&self.path, json).await.map_err(|e| {
            DomainError::storage(format!(
                "Failed to write settings {}: {}",
                self.path.display(),
                e
            ))
        })?;

        debug!("Wrote settings to {}", self.path.display());
        Ok(())
    }
}
