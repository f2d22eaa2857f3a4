use std::sync::Arc;

use tracing::{info, warn};

use crate::application::SettingsRepository;
use crate::domain::{ChatSettings, DomainError};

/// Field-by-field edit of the stored settings; `None` leaves a field as is.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SettingsUpdate {
    pub endpoint_url: Option<String>,
    pub api_key: Option<String>,
    pub organization_id: Option<String>,
    pub model: Option<String>,
}

impl SettingsUpdate {
    pub fn is_empty(&self) -> bool {
        self.endpoint_url.is_none()
            && self.api_key.is_none()
            && self.organization_id.is_none()
            && self.model.is_none()
    }

    pub fn apply_to(&self, settings: &ChatSettings) -> ChatSettings {
        let mut updated = settings.clone();
        if let Some(url) = &self.endpoint_url {
            updated = updated.with_endpoint_url(url.as_str());
        }
        if let Some(key) = &self.api_key {
            updated = updated.with_api_key(key.as_str());
        }
        if let Some(organization) = &self.organization_id {
            updated = updated.with_organization_id(organization.as_str());
        }
        if let Some(model) = &self.model {
            updated = updated.with_model(model.as_str());
        }
        updated
    }
}

pub struct ManageSettingsUseCase {
    settings_repo: Arc<dyn SettingsRepository>,
}

impl ManageSettingsUseCase {
    pub fn new(settings_repo: Arc<dyn SettingsRepository>) -> Self {
        Self { settings_repo }
    }

    /// Settings as stored, without environment overrides.
    pub async fn show(&self) -> Result<ChatSettings, DomainError> {
        self.settings_repo.load().await
    }

    /// Apply `update` and persist the result if anything changed.
    ///
    /// An unreadable settings file is replaced: the update is applied on top
    /// of the defaults and always saved.
    /// Returns the resulting settings and whether they were saved.
    pub async fn update(
        &self,
        update: &SettingsUpdate,
    ) -> Result<(ChatSettings, bool), DomainError> {
        let (current, recovered) = match self.settings_repo.load().await {
            Ok(settings) => (settings, false),
            Err(e) if e.is_storage_error() => {
                warn!("Replacing unreadable settings: {}", e);
                (ChatSettings::default(), true)
            }
            Err(e) => return Err(e),
        };
        let updated = update.apply_to(&current);

        if updated == current && !recovered {
            return Ok((current, false));
        }

        self.settings_repo.save(&updated).await?;
        info!("Settings saved");

        Ok((updated, true))
    }
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Mutex;

    use async_trait::async_trait;

    use super::*;

    #[derive(Default)]
    struct InMemorySettings {
        stored: Mutex<Option<ChatSettings>>,
        saves: AtomicUsize,
    }

    #[async_trait]
    impl SettingsRepository for InMemorySettings {
        async fn load(&self) -> Result<ChatSettings, DomainError> {
            Ok(self.stored.lock().unwrap().clone().unwrap_or_default())
        }

        async fn save(&self, settings: &ChatSettings) -> Result<(), DomainError> {
            self.saves.fetch_add(1, Ordering::SeqCst);
            *self.stored.lock().unwrap() = Some(settings.clone());
            Ok(())
        }
    }

    #[tokio::test]
    async fn test_update_persists_changed_fields() {
        let repo = Arc::new(InMemorySettings::default());
        let use_case = ManageSettingsUseCase::new(repo.clone());

        let update = SettingsUpdate {
            api_key: Some("sk-new".to_string()),
            model: Some("gpt-4".to_string()),
            ..Default::default()
        };
        let (settings, saved) = use_case.update(&update).await.unwrap();

        assert!(saved);
        assert_eq!(settings.api_key(), "sk-new");
        assert_eq!(settings.model(), "gpt-4");
        assert_eq!(use_case.show().await.unwrap(), settings);
    }

    #[tokio::test]
    async fn test_update_without_changes_does_not_save() {
        let repo = Arc::new(InMemorySettings::default());
        let use_case = ManageSettingsUseCase::new(repo.clone());

        let update = SettingsUpdate {
            model: Some(crate::domain::DEFAULT_MODEL.to_string()),
            ..Default::default()
        };
        let (_, saved) = use_case.update(&update).await.unwrap();

        assert!(!saved);
        assert_eq!(repo.saves.load(Ordering::SeqCst), 0);
    }

    struct CorruptSettings {
        saved: Mutex<Option<ChatSettings>>,
    }

    #[async_trait]
    impl SettingsRepository for CorruptSettings {
        async fn load(&self) -> Result<ChatSettings, DomainError> {
            match self.saved.lock().unwrap().clone() {
                Some(settings) => Ok(settings),
                None => Err(DomainError::storage("Invalid settings file: expected value")),
            }
        }

        async fn save(&self, settings: &ChatSettings) -> Result<(), DomainError> {
            *self.saved.lock().unwrap() = Some(settings.clone());
            Ok(())
        }
    }

    #[tokio::test]
    async fn test_update_replaces_unreadable_settings() {
        let repo = Arc::new(CorruptSettings {
            saved: Mutex::new(None),
        });
        let use_case = ManageSettingsUseCase::new(repo.clone());

        assert!(use_case.show().await.unwrap_err().is_storage_error());

        let update = SettingsUpdate {
            api_key: Some("sk-fixed".to_string()),
            ..Default::default()
        };
        let (settings, saved) = use_case.update(&update).await.unwrap();

        assert!(saved);
        assert_eq!(settings.api_key(), "sk-fixed");
        assert_eq!(settings.model(), crate::domain::DEFAULT_MODEL);
        assert_eq!(use_case.show().await.unwrap(), settings);
    }

    #[tokio::test]
    async fn test_update_with_defaults_still_rewrites_unreadable_settings() {
        let repo = Arc::new(CorruptSettings {
            saved: Mutex::new(None),
        });
        let use_case = ManageSettingsUseCase::new(repo.clone());

        let update = SettingsUpdate {
            model: Some(crate::domain::DEFAULT_MODEL.to_string()),
            ..Default::default()
        };
        let (_, saved) = use_case.update(&update).await.unwrap();

        assert!(saved);
        assert!(repo.saved.lock().unwrap().is_some());
    }

    #[test]
    fn test_empty_update() {
        assert!(SettingsUpdate::default().is_empty());
        let update = SettingsUpdate {
            organization_id: Some(String::new()),
            ..Default::default()
        };
        assert!(!update.is_empty());
    }
}
