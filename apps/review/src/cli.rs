use std::path::{Path, PathBuf};

use clap::{Args, Parser, Subcommand};

/// Get structured, AI-assisted feedback on a resume.
#[derive(Debug, Parser)]
#[command(name = "resume-review", version, about)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Analyze pasted text (argument or stdin) or a PDF, image or text file.
    Analyze(AnalyzeArgs),
    /// Show the most recent analyses.
    History {
        /// Print as JSON.
        #[arg(long)]
        json: bool,
    },
}

#[derive(Debug, Args)]
pub struct AnalyzeArgs {
    /// Resume text. Read from stdin when neither --text nor --file is given.
    #[arg(long, conflicts_with = "file")]
    pub text: Option<String>,

    /// PDF, JPEG/PNG/WebP image, or plain-text file. `-` reads it from stdin (set --mime).
    #[arg(long, short)]
    pub file: Option<PathBuf>,

    /// Override the MIME type inferred from the file extension.
    #[arg(long, requires = "file")]
    pub mime: Option<String>,

    /// Print the full analysis as JSON.
    #[arg(long)]
    pub json: bool,
}

/// Declared MIME type for a path, from its extension.
pub fn mime_for_path(path: &Path) -> &'static str {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .map(str::to_ascii_lowercase);
    match ext.as_deref() {
        Some("pdf") => "application/pdf",
        Some("jpg" | "jpeg") => "image/jpeg",
        Some("png") => "image/png",
        Some("webp") => "image/webp",
        Some("txt") => "text/plain",
        _ => "application/octet-stream",
    }
}
