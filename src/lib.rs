pub mod application;
pub mod cli;
pub mod connector;
pub mod domain;

pub use application::{
    ApplyRewriteUseCase, ChatClient, ChatTransport, ManageSettingsUseCase, RewriteScriptUseCase,
    ScriptRepository, SettingsRepository, SettingsUpdate, TransportRequest, TransportResponse,
};

pub use cli::Commands;

pub use connector::{
    Container, ContainerConfig, FsScriptRepository, JsonSettingsRepository, MockChatTransport,
    ReqwestTransport, Router, DEFAULT_SETTINGS_PATH, DEFAULT_TIMEOUT_SECS,
};

pub use domain::{
    ChatChoice, ChatMessage, ChatRequest, ChatResponse, ChatSettings, ChatUsage, DomainError,
    RewriteProposal, ScriptEncoding, ScriptTask,
};
