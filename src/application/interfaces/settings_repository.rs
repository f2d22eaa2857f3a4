use async_trait::async_trait;

use crate::domain::{ChatSettings, DomainError};

/// Persists [`ChatSettings`] between runs.
#[async_trait]
pub trait SettingsRepository: Send + Sync {
    /// Load the stored settings, or defaults when nothing has been stored yet.
    async fn load(&self) -> Result<ChatSettings, DomainError>;

    async fn save(&self, settings: &ChatSettings) -> Result<(), DomainError>;
}
