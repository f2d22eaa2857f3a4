use anyhow::Result;

use crate::{Commands, ScriptTask, SettingsUpdate};

use super::container::Container;
use super::controller::{PromptController, RewriteController, SettingsController};

pub struct Router<'a> {
    prompt_controller: PromptController<'a>,
    rewrite_controller: RewriteController<'a>,
    settings_controller: SettingsController<'a>,
}

impl<'a> Router<'a> {
    pub fn new(container: &'a Container) -> Self {
        Self {
            prompt_controller: PromptController::new(container),
            rewrite_controller: RewriteController::new(container),
            settings_controller: SettingsController::new(container),
        }
    }

    pub async fn route(&self, command: Commands) -> Result<String> {
        match command {
            Commands::Prompt { text } => self.prompt_controller.prompt(text).await,
            Commands::Optimize { path, apply } => {
                self.rewrite_controller
                    .rewrite(path, ScriptTask::Optimize, apply)
                    .await
            }
            Commands::Comment { path, apply } => {
                self.rewrite_controller
                    .rewrite(path, ScriptTask::Comment, apply)
                    .await
            }
            Commands::Custom {
                path,
                instruction,
                no_context,
                apply,
            } => {
                self.rewrite_controller
                    .rewrite(path, ScriptTask::custom(instruction, !no_context), apply)
                    .await
            }
            Commands::Config {
                url,
                key,
                organization,
                model,
            } => {
                let update = SettingsUpdate {
                    endpoint_url: url,
                    api_key: key,
                    organization_id: organization,
                    model,
                };
                self.settings_controller.config(update).await
            }
        }
    }
}
