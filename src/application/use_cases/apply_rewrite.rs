use std::sync::Arc;

use tracing::info;

use crate::application::ScriptRepository;
use crate::domain::{DomainError, RewriteProposal};

/// Use case for writing an accepted [`RewriteProposal`] back to its script.
pub struct ApplyRewriteUseCase {
    script_repo: Arc<dyn ScriptRepository>,
}

impl ApplyRewriteUseCase {
    pub fn new(script_repo: Arc<dyn ScriptRepository>) -> Self {
        Self { script_repo }
    }

    pub async fn execute(&self, proposal: &RewriteProposal) -> Result<(), DomainError> {
        self.script_repo
            .write(proposal.path(), proposal.proposed())
            .await?;

        info!("Script saved at {}", proposal.path().display());

        Ok(())
    }
}
