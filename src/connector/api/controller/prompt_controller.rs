use anyhow::{anyhow, Result};
use tokio::sync::oneshot;

use crate::ChatResponse;

use super::super::Container;
use super::{format_stats, request_spinner};

pub struct PromptController<'a> {
    container: &'a Container,
}

impl<'a> PromptController<'a> {
    pub fn new(container: &'a Container) -> Self {
        Self { container }
    }

    pub async fn prompt(&self, text: String) -> Result<String> {
        let client = self.container.chat_client().await?;
        let (tx, rx) = oneshot::channel();
        let spinner = request_spinner();

        client.send_prompt(text, move |result| {
            let _ = tx.send(result);
        });

        let result = rx.await;
        spinner.finish_and_clear();

        let response = result.map_err(|_| anyhow!("Chat request ended without a result"))??;
        Ok(self.format_response(&response))
    }

    fn format_response(&self, response: &ChatResponse) -> String {
        let mut output = String::new();
        for choice in response.choices() {
            if response.choices().len() > 1 {
                output.push_str(&format!("--- choice {} ---\n", choice.index()));
            }
            output.push_str(choice.message().content());
            output.push('\n');
        }
        output.push('\n');
        output.push_str(&format_stats(
            response.total_round_trip_millis(),
            response.usage(),
        ));
        output
    }
}
