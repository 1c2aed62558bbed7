use std::path::PathBuf;
use std::time::Duration;

use anyhow::{Context, Result};

const APP_DIR: &str = "resume-review";

/// Application configuration loaded from environment variables.
/// The API key is only demanded by commands that call the model.
#[derive(Debug, Clone)]
pub struct Config {
    pub gemini_api_key: Option<String>,
    pub data_dir: PathBuf,
    /// `None` means no client-side timeout on the analysis call.
    pub analysis_timeout: Option<Duration>,
    pub rust_log: String,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        let data_dir = match std::env::var("RESUME_REVIEW_DATA_DIR") {
            Ok(dir) => PathBuf::from(dir),
            Err(_) => dirs::data_dir()
                .context("Could not determine a data directory; set RESUME_REVIEW_DATA_DIR")?
                .join(APP_DIR),
        };

        let analysis_timeout = std::env::var("ANALYSIS_TIMEOUT_SECS")
            .ok()
            .map(|v| {
                v.parse::<u64>()
                    .context("ANALYSIS_TIMEOUT_SECS must be a whole number of seconds")
            })
            .transpose()?
            .map(Duration::from_secs);

        Ok(Config {
            gemini_api_key: std::env::var("GEMINI_API_KEY")
                .ok()
                .filter(|k| !k.trim().is_empty()),
            data_dir,
            analysis_timeout,
            rust_log: std::env::var("RUST_LOG").unwrap_or_else(|_| "warn".to_string()),
        })
    }

    pub fn require_api_key(&self) -> Result<&str> {
        self.gemini_api_key
            .as_deref()
            .context("Required environment variable 'GEMINI_API_KEY' is not set")
    }
}
