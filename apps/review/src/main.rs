mod analysis;
mod cli;
mod config;
mod errors;
mod history;
mod ingest;
mod llm_client;
mod pipeline;
mod report;
#[cfg(test)]
mod testing;

use std::io::IsTerminal;
use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::Parser;
use tokio::io::AsyncReadExt;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::analysis::GeminiGateway;
use crate::cli::{mime_for_path, AnalyzeArgs, Cli, Command};
use crate::config::Config;
use crate::errors::{ExtractionError, PipelineError};
use crate::history::{FileStore, HistoryEntry, HistoryLog, KeyValueStore};
use crate::ingest::{FileArtifact, Modality, Normalizer, PdfTextExtractor, RawInput};
use crate::llm_client::LlmClient;
use crate::pipeline::Orchestrator;
use crate::report::{render_analysis, render_history, render_status};

/// `--file -` reads the upload from stdin.
const STDIN_PATH: &str = "-";

// All work is driven from one logical thread; blocking PDF parsing is the only
// thing handed off (spawn_blocking).
#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Load configuration first
    let config = Config::from_env()?;

    // Initialize structured logging (stderr, so --json output stays clean)
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!("{}={}", env!("CARGO_CRATE_NAME"), &config.rust_log))
        }))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    info!("Starting resume-review v{}", env!("CARGO_PKG_VERSION"));

    let store = FileStore::new(&config.data_dir);
    info!("History store at {}", store.dir().display());
    let store: Arc<dyn KeyValueStore> = Arc::new(store);
    let history = HistoryLog::load(store);

    match cli.command {
        Command::History { json } => print_history(history.all(), json),
        Command::Analyze(args) => analyze(&config, history, args).await,
    }
}

async fn analyze(config: &Config, history: HistoryLog, args: AnalyzeArgs) -> Result<()> {
    let llm = LlmClient::new(config.require_api_key()?.to_string(), config.analysis_timeout)?;
    info!("LLM client initialized (model: {})", llm_client::MODEL);

    let orchestrator = Orchestrator::new(
        Normalizer::new(Arc::new(PdfTextExtractor)),
        Arc::new(GeminiGateway::new(llm)),
        history,
    );

    let input = match read_input(args.text, args.file, args.mime).await {
        Ok(input) => input,
        Err(e) => match e.downcast::<ExtractionError>() {
            Ok(e) => {
                eprintln!("Error: {}", PipelineError::from(e).user_message(Modality::Text));
                std::process::exit(1);
            }
            Err(e) => return Err(e),
        },
    };

    eprintln!("Analyzing your resume...");
    match orchestrator.submit(input).await {
        Ok(submission) => {
            for notice in &submission.notices {
                eprintln!("Note: {notice}");
            }
            if args.json {
                println!("{}", serde_json::to_string_pretty(&submission.analysis)?);
            } else {
                println!("{}", render_analysis(&submission.analysis));
            }
            Ok(())
        }
        Err(_) => {
            let view = orchestrator.view();
            for notice in &view.notices {
                eprintln!("Note: {notice}");
            }
            eprintln!("{}", render_status(&view));
            std::process::exit(1);
        }
    }
}

async fn read_input(
    text: Option<String>,
    file: Option<PathBuf>,
    mime: Option<String>,
) -> Result<RawInput> {
    if let Some(text) = text {
        return Ok(RawInput::Text(text));
    }

    if let Some(path) = file {
        let mime = mime.unwrap_or_else(|| mime_for_path(&path).to_string());
        if path.as_os_str() == STDIN_PATH {
            let mut bytes = Vec::new();
            tokio::io::stdin()
                .read_to_end(&mut bytes)
                .await
                .map_err(|source| ExtractionError::FileRead {
                    kind: "resume",
                    source,
                })?;
            return Ok(RawInput::File(FileArtifact::from_bytes("stdin", mime, bytes)));
        }
        return Ok(RawInput::File(FileArtifact::from_path(&path, mime).await?));
    }

    if std::io::stdin().is_terminal() {
        eprintln!("Paste your resume text, then press Ctrl-D:");
    }
    let mut text = String::new();
    tokio::io::stdin()
        .read_to_string(&mut text)
        .await
        .context("Failed to read resume text from stdin")?;
    Ok(RawInput::Text(text))
}

fn print_history(entries: &[HistoryEntry], json: bool) -> Result<()> {
    if json {
        println!("{}", serde_json::to_string_pretty(entries)?);
    } else {
        println!("{}", render_history(entries));
    }
    Ok(())
}
