use std::path::PathBuf;

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::{EnvFilter, FmtSubscriber};

use scriptgpt::{
    Commands, Container, ContainerConfig, Router, ScriptEncoding, DEFAULT_SETTINGS_PATH,
    DEFAULT_TIMEOUT_SECS,
};

#[derive(Parser)]
#[command(name = "scriptgpt")]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Settings file (created on first `config` edit)
    #[arg(long, global = true, default_value = DEFAULT_SETTINGS_PATH)]
    settings: PathBuf,

    /// Encoding used to read and write scripts (latin1 or utf8)
    #[arg(long, global = true, default_value = "latin1")]
    encoding: ScriptEncoding,

    /// Answer prompts offline by echoing them back
    #[arg(long, global = true)]
    mock: bool,

    /// Overall request timeout in seconds
    #[arg(
        long,
        global = true,
        default_value_t = DEFAULT_TIMEOUT_SECS,
        value_parser = clap::value_parser!(u64).range(1..)
    )]
    timeout: u64,

    #[command(subcommand)]
    command: Commands,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // RUST_LOG takes precedence over --verbose.
    let default_level = if cli.verbose { "debug" } else { "info" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    let subscriber = FmtSubscriber::builder()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    let container = Container::new(ContainerConfig {
        settings_path: expand_tilde(&cli.settings),
        encoding: cli.encoding,
        mock: cli.mock,
        timeout_secs: cli.timeout,
    })
    .await?;

    let router = Router::new(&container);
    let output = router.route(cli.command).await?;
    println!("{}", output);

    Ok(())
}

fn expand_tilde(path: &std::path::Path) -> PathBuf {
    let Some(raw) = path.to_str() else {
        return path.to_path_buf();
    };
    if raw == "~" || raw.starts_with("~/") {
        if let Some(home) = std::env::var_os("HOME") {
            return PathBuf::from(raw.replacen('~', &home.to_string_lossy(), 1));
        }
    }
    path.to_path_buf()
}
