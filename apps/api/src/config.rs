use anyhow::{Context, Result};

/// Application configuration loaded from environment variables.
/// Every variable has a sensible default; only malformed values fail startup.
#[derive(Debug, Clone)]
pub struct Config {
    /// Base URL of the vacancy-details page; the job id is appended as `?id=`.
    pub statejobs_base_url: String,
    /// Timeout for a single job-page fetch, in seconds.
    pub fetch_timeout_secs: u64,
    /// Explicit path to the wkhtmltopdf binary. When unset, PATH is probed.
    pub wkhtmltopdf_path: Option<String>,
    /// Whether the rule-based entity classifier drives greeting selection.
    /// When false the plain space-and-token-count heuristic is used.
    pub greeting_ner: bool,
    pub port: u16,
    pub rust_log: String,
}

const DEFAULT_BASE_URL: &str = "https://statejobs.ny.gov/public/vacancyDetailsView.cfm";

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        Ok(Config {
            statejobs_base_url: env_or("STATEJOBS_BASE_URL", DEFAULT_BASE_URL),
            fetch_timeout_secs: env_or("FETCH_TIMEOUT_SECS", "10")
                .parse::<u64>()
                .context("FETCH_TIMEOUT_SECS must be a number of seconds")?,
            wkhtmltopdf_path: std::env::var("WKHTMLTOPDF_PATH").ok(),
            greeting_ner: env_or("GREETING_NER", "true")
                .parse::<bool>()
                .context("GREETING_NER must be 'true' or 'false'")?,
            port: env_or("PORT", "8080")
                .parse::<u16>()
                .context("PORT must be a valid port number")?,
            rust_log: env_or("RUST_LOG", "info"),
        })
    }
}

fn env_or(key: &str, default: &str) -> String {
    std::env::var(key).unwrap_or_else(|_| default.to_string())
}
