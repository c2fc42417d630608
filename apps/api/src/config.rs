use anyhow::{anyhow, Context, Result};

use crate::directory::tmdb::DEFAULT_BASE_URL;
use crate::selection::policy::{parse_pages, PipelineConfig};

/// Application configuration loaded from environment variables.
/// Fails at startup if required variables are missing or malformed.
#[derive(Debug, Clone)]
pub struct Config {
    pub database_url: String,
    /// Absent token is not a startup error; directory calls fail with `UpstreamUnavailable`.
    pub tmdb_api_token: Option<String>,
    pub tmdb_base_url: String,
    /// Absent key disables ranking; selections use the deterministic fallback.
    pub openai_api_key: Option<String>,
    pub pipeline: PipelineConfig,
    pub port: u16,
    pub rust_log: String,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        let mut pipeline = optional_env("SELECTION_POLICY")
            .map(|p| p.parse::<PipelineConfig>().map_err(|e| anyhow!(e)))
            .transpose()
            .context("SELECTION_POLICY is invalid")?
            .unwrap_or_default();

        if let Some(pages) = optional_env("DIRECTORY_PAGES") {
            pipeline.pages = parse_pages(&pages)
                .map_err(|e| anyhow!(e))
                .context("DIRECTORY_PAGES must be a comma-separated list of page numbers")?;
        }

        Ok(Config {
            database_url: require_env("DATABASE_URL")?,
            tmdb_api_token: optional_env("TMDB_API_TOKEN"),
            tmdb_base_url: optional_env("TMDB_BASE_URL")
                .unwrap_or_else(|| DEFAULT_BASE_URL.to_string()),
            openai_api_key: optional_env("OPENAI_API_KEY"),
            pipeline,
            port: std::env::var("PORT")
                .unwrap_or_else(|_| "8080".to_string())
                .parse::<u16>()
                .context("PORT must be a valid port number")?,
            rust_log: std::env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string()),
        })
    }
}

fn require_env(key: &str) -> Result<String> {
    std::env::var(key).with_context(|| format!("Required environment variable '{key}' is not set"))
}

/// Unset and blank are the same thing.
fn optional_env(key: &str) -> Option<String> {
    std::env::var(key)
        .ok()
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}
