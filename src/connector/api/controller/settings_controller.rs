use anyhow::Result;

use crate::SettingsUpdate;

use super::super::Container;

pub struct SettingsController<'a> {
    container: &'a Container,
}

impl<'a> SettingsController<'a> {
    pub fn new(container: &'a Container) -> Self {
        Self { container }
    }

    /// Show the stored settings, or update them when `update` sets any field.
    pub async fn config(&self, update: SettingsUpdate) -> Result<String> {
        let use_case = self.container.settings_use_case();
        let path = self.container.settings_path().display().to_string();

        if update.is_empty() {
            let settings = use_case.show().await?;
            return Ok(format!("Settings ({})\n{}", path, settings.summary()));
        }

        let (settings, saved) = use_case.update(&update).await?;
        let status = if saved {
            format!("Settings saved to {}", path)
        } else {
            "Settings unchanged".to_string()
        };
        Ok(format!("{}\n{}", status, settings.summary()))
    }
}
