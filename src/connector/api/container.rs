use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;

use anyhow::Result;
use tracing::debug;

use crate::application::{ChatTransport, ScriptRepository, SettingsRepository};
use crate::{
    ApplyRewriteUseCase, ChatClient, ChatSettings, FsScriptRepository, JsonSettingsRepository,
    ManageSettingsUseCase, MockChatTransport, ReqwestTransport, RewriteScriptUseCase,
    ScriptEncoding,
};

pub struct ContainerConfig {
    pub settings_path: PathBuf,
    pub encoding: ScriptEncoding,
    /// Answer every prompt offline by echoing it back.
    pub mock: bool,
    pub timeout_secs: u64,
}

pub struct Container {
    transport: Arc<dyn ChatTransport>,
    settings_repo: Arc<JsonSettingsRepository>,
    script_repo: Arc<dyn ScriptRepository>,
}

impl Container {
    pub async fn new(config: ContainerConfig) -> Result<Self> {
        let settings_repo = Arc::new(JsonSettingsRepository::new(&config.settings_path));

        let transport: Arc<dyn ChatTransport> = if config.mock {
            debug!("Using mock chat transport");
            Arc::new(MockChatTransport::new())
        } else {
            debug!(
                "Using HTTP chat transport with {}s timeout",
                config.timeout_secs
            );
            Arc::new(ReqwestTransport::with_timeout(Duration::from_secs(
                config.timeout_secs,
            )))
        };

        debug!("Reading scripts as {}", config.encoding);
        let script_repo: Arc<dyn ScriptRepository> =
            Arc::new(FsScriptRepository::new(config.encoding));

        Ok(Self {
            transport,
            settings_repo,
            script_repo,
        })
    }

    /// Stored settings with environment overrides applied.
    ///
    /// Read on demand so that `config` can still repair an unreadable file.
    pub async fn chat_settings(&self) -> Result<ChatSettings> {
        Ok(self.settings_repo.load().await?.with_env_overrides())
    }

    pub async fn chat_client(&self) -> Result<ChatClient> {
        let settings = self.chat_settings().await?;
        Ok(ChatClient::new(self.transport.clone(), settings))
    }

    pub async fn rewrite_use_case(&self) -> Result<RewriteScriptUseCase> {
        Ok(RewriteScriptUseCase::new(
            self.chat_client().await?,
            self.script_repo.clone(),
        ))
    }

    pub fn apply_rewrite_use_case(&self) -> ApplyRewriteUseCase {
        ApplyRewriteUseCase::new(self.script_repo.clone())
    }

    pub fn settings_use_case(&self) -> ManageSettingsUseCase {
        let repo: Arc<dyn SettingsRepository> = self.settings_repo.clone();
        ManageSettingsUseCase::new(repo)
    }

    pub fn settings_path(&self) -> &Path {
        self.settings_repo.path()
    }
}
