use std::path::PathBuf;

use anyhow::Result;

use crate::{RewriteProposal, ScriptTask};

use super::super::Container;
use super::{format_stats, request_spinner};

pub struct RewriteController<'a> {
    container: &'a Container,
}

impl<'a> RewriteController<'a> {
    pub fn new(container: &'a Container) -> Self {
        Self { container }
    }

    pub async fn rewrite(&self, path: PathBuf, task: ScriptTask, apply: bool) -> Result<String> {
        let use_case = self.container.rewrite_use_case().await?;
        let spinner = request_spinner();
        let result = use_case.execute(&path, task).await;
        spinner.finish_and_clear();
        let proposal = result?;

        let mut output = self.format_proposal(&proposal);

        if proposal.is_unchanged() {
            output.push_str("The model returned the script unchanged; nothing to apply.");
        } else if apply {
            self.container
                .apply_rewrite_use_case()
                .execute(&proposal)
                .await?;
            output.push_str(&format!("Script saved at {}", proposal.path().display()));
        } else {
            output.push_str(&format!(
                "Run again with --apply to overwrite {}",
                proposal.path().display()
            ));
        }

        Ok(output)
    }

    fn format_proposal(&self, proposal: &RewriteProposal) -> String {
        let mut output = String::new();
        output.push_str("Old Content\n===========\n");
        output.push_str(proposal.original());
        if !proposal.original().ends_with('\n') {
            output.push('\n');
        }
        output.push_str("\nNew Content\n===========\n");
        output.push_str(proposal.proposed());
        if !proposal.proposed().ends_with('\n') {
            output.push('\n');
        }
        output.push('\n');
        output.push_str(&format_stats(proposal.round_trip_millis(), proposal.usage()));
        output.push('\n');
        output
    }
}
