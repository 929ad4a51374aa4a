mod config;

use std::io::{self, Write};
use std::path::PathBuf;
use std::time::Duration;

use anyhow::{Context, Result};
use clap::Parser;
use llm_lint_core::{Hook, LlmSettings, ModelServer, OllamaClient, ServerCommand};
use tracing::{error, info, warn};
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(
    name = "llm-lint",
    author,
    version,
    about = "Pre-commit hook reviewing Go sources with a local Ollama model"
)]
struct Cli {
    /// Config file (TOML, JSON or YAML) with `[llm]` and `[limits]` sections
    #[arg(long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Model used for reviews
    #[arg(long, value_name = "NAME")]
    model: Option<String>,

    /// Port the model server listens on at 127.0.0.1
    #[arg(long, value_name = "PORT")]
    port: Option<u16>,

    /// Base URL of an already running server, replacing the loopback address
    #[arg(long, value_name = "URL")]
    endpoint: Option<String>,

    /// Per-request timeout such as `90s`; requests wait indefinitely by default
    #[arg(long, value_name = "DURATION", value_parser = humantime::parse_duration)]
    timeout: Option<Duration>,

    /// Do not launch `ollama serve`; use a server that is already running
    #[arg(long)]
    no_server: bool,

    /// Files staged for commit
    #[arg(value_name = "FILE")]
    files: Vec<PathBuf>,
}

impl Cli {
    fn apply(&self, mut settings: LlmSettings) -> LlmSettings {
        if let Some(model) = &self.model {
            settings.model = model.clone();
        }
        if let Some(port) = self.port {
            settings.port = port;
        }
        if let Some(endpoint) = &self.endpoint {
            settings.endpoint = Some(endpoint.clone());
        }
        if let Some(timeout) = self.timeout {
            settings.timeout = Some(timeout);
        }
        settings
    }
}

// Warnings are advisory: every path through main exits 0.
#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    init_tracing();
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(err) => {
            let _ = err.print();
            return Ok(());
        }
    };
    if let Err(err) = run(cli).await {
        error!("{err:#}");
    }
    Ok(())
}

async fn run(cli: Cli) -> Result<()> {
    let file_config = config::load(cli.config.as_deref())?;
    let settings = cli.apply(file_config.apply(LlmSettings::default())?.with_env()?);
    let hook = Hook::new(OllamaClient::new(&settings)?, file_config.filter());

    let admitted = hook.filter().admit_batch(cli.files.len()).is_ok();
    let server = (admitted && !cli.no_server)
        .then(|| ModelServer::spawn(ServerCommand::ollama(&settings)));

    let mut stdout = io::stdout().lock();
    let outcome = tokio::select! {
        result = hook.run(&cli.files, &mut stdout) => {
            result.context("failed to write review output").map(Some)
        }
        // A failed signal registration disables this branch instead of aborting.
        Ok(()) = tokio::signal::ctrl_c() => Ok(None),
    };
    stdout.flush().ok();
    drop(stdout);

    if let Some(server) = server {
        server.shutdown().await;
    }

    match outcome? {
        Some(summary) => info!(?summary, "hook finished"),
        None => warn!("interrupted, review aborted"),
    }
    Ok(())
}

fn init_tracing() {
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(io::stderr)
        .try_init();
}
