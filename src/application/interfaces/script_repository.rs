use std::path::Path;

use async_trait::async_trait;

use crate::domain::DomainError;

/// Reads and writes script source files.
#[async_trait]
pub trait ScriptRepository: Send + Sync {
    async fn read(&self, path: &Path) -> Result<String, DomainError>;

    async fn write(&self, path: &Path, content: &str) -> Result<(), DomainError>;
}
