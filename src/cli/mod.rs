use std::path::PathBuf;

use clap::Subcommand;

#[derive(Subcommand)]
pub enum Commands {
    /// Send a prompt as-is and print the reply
    Prompt { text: String },

    /// Ask the model to optimize a script
    Optimize {
        path: PathBuf,

        /// Overwrite the script with the returned code
        #[arg(long)]
        apply: bool,
    },

    /// Ask the model to comment a script
    Comment {
        path: PathBuf,

        /// Overwrite the script with the returned code
        #[arg(long)]
        apply: bool,
    },

    /// Run a custom instruction, with the script appended as context
    Custom {
        path: PathBuf,

        instruction: String,

        /// Send the instruction alone, without the script contents
        #[arg(long)]
        no_context: bool,

        /// Overwrite the script with the returned code
        #[arg(long)]
        apply: bool,
    },

    /// Show or edit the chat API settings
    Config {
        /// Chat-completion endpoint URL
        #[arg(long)]
        url: Option<String>,

        /// API key sent as a bearer token
        #[arg(long)]
        key: Option<String>,

        /// Organization id sent in the OpenAI-Organization header
        #[arg(long)]
        organization: Option<String>,

        #[arg(long)]
        model: Option<String>,
    },
}
