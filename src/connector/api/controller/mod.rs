pub mod prompt_controller;
pub mod rewrite_controller;
pub mod settings_controller;

pub use prompt_controller::PromptController;
pub use rewrite_controller::RewriteController;
pub use settings_controller::SettingsController;

use std::time::Duration;

use indicatif::{ProgressBar, ProgressStyle};

use crate::ChatUsage;

/// Spinner shown while a chat request is pending.
fn request_spinner() -> ProgressBar {
    let spinner = ProgressBar::new_spinner();
    spinner.set_style(
        ProgressStyle::default_spinner()
            .template("{spinner:.green} [{elapsed}] {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_spinner()),
    );
    spinner.set_message("Communicating with OpenAI: Generating...");
    spinner.enable_steady_tick(Duration::from_millis(100));
    spinner
}

fn format_stats(round_trip_millis: f64, usage: &ChatUsage) -> String {
    format!(
        "Round trip: {:.0} ms, tokens: {} prompt + {} completion = {}",
        round_trip_millis,
        usage.prompt_tokens(),
        usage.completion_tokens(),
        usage.total_tokens()
    )
}
