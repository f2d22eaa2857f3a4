use std::path::Path;
use std::sync::Arc;

use tracing::{debug, info};

use crate::application::{ChatClient, ScriptRepository};
use crate::domain::{strip_leading_newlines, DomainError, RewriteProposal, ScriptTask};

/// Use case for asking the model to rewrite a script.
///
/// Produces a [`RewriteProposal`] and leaves the file untouched; see
/// [`super::ApplyRewriteUseCase`] for writing it back.
pub struct RewriteScriptUseCase {
    chat_client: ChatClient,
    script_repo: Arc<dyn ScriptRepository>,
}

impl RewriteScriptUseCase {
    pub fn new(chat_client: ChatClient, script_repo: Arc<dyn ScriptRepository>) -> Self {
        Self {
            chat_client,
            script_repo,
        }
    }

    pub async fn execute(
        &self,
        path: &Path,
        task: ScriptTask,
    ) -> Result<RewriteProposal, DomainError> {
        let original = self.script_repo.read(path).await?;
        debug!(
            "Read {} ({} chars) for task '{}'",
            path.display(),
            original.chars().count(),
            task.name()
        );

        let prompt = task.prompt_for(&original);
        let response = self.chat_client.complete(&prompt).await?;

        let reply = response.first_content().ok_or(DomainError::EmptyChoices)?;
        let proposed = strip_leading_newlines(reply).to_string();

        info!(
            "Received rewrite for {} in {:.0} ms ({} tokens)",
            path.display(),
            response.total_round_trip_millis(),
            response.usage().total_tokens()
        );

        Ok(RewriteProposal::new(path, task, original, proposed)
            .with_timing(response.total_round_trip_millis(), *response.usage()))
    }
}
