use std::io::ErrorKind;
use std::path::Path;

use async_trait::async_trait;
use tracing::warn;

use crate::application::ScriptRepository;
use crate::domain::{DomainError, ScriptEncoding};

/// Reads and writes scripts on the local file system in a fixed encoding.
pub struct FsScriptRepository {
    encoding: ScriptEncoding,
}

impl FsScriptRepository {
    pub fn new(encoding: ScriptEncoding) -> Self {
        Self { encoding }
    }
}

impl Default for FsScriptRepository {
    fn default() -> Self {
        Self::new(ScriptEncoding::default())
    }
}

#[async_trait]
impl ScriptRepository for FsScriptRepository {
    async fn read(&self, path: &Path) -> Result<String, DomainError> {
        let bytes = match tokio::fs::read(path).await {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                return Err(DomainError::not_found(format!(
                    "Script not found: {}",
                    path.display()
                )))
            }
            Err(e) => return Err(e.into()),
        };

        self.encoding.decode(&bytes)
    }

    async fn write(&self, path: &Path, content: &str) -> Result<(), DomainError> {
        let (bytes, replaced) = self.encoding.encode(content);
        if replaced > 0 {
            warn!(
                "{} character(s) cannot be represented in {} and were written as '?' in {}",
                replaced,
                self.encoding,
                path.display()
            );
        }

        tokio::fs::write(path, bytes).await?;
        Ok(())
    }
}
