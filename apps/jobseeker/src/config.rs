use std::path::PathBuf;
use std::time::Duration;

use anyhow::{Context, Result};

use crate::comparisons::BuildPolicy;

/// Client configuration loaded from environment variables.
/// Fails at startup if required variables are missing or malformed.
#[derive(Debug, Clone)]
pub struct Config {
    /// Server origin, e.g. `http://localhost:8000`. The client appends `/api/v1`.
    pub api_base_url: String,
    /// Bearer token from a previous `login`, if any.
    pub api_token: Option<String>,
    pub request_timeout: Duration,
    pub build_policy: BuildPolicy,
    /// Directory where downloaded PDFs are written.
    pub output_dir: PathBuf,
    pub rust_log: String,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds the config from an arbitrary key lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let api_base_url = lookup("API_BASE_URL")
            .filter(|v| !v.trim().is_empty())
            .with_context(|| "Required environment variable 'API_BASE_URL' is not set")?;

        let request_timeout = lookup("REQUEST_TIMEOUT_SECS")
            .unwrap_or_else(|| "120".to_string())
            .parse::<u64>()
            .map(Duration::from_secs)
            .context("REQUEST_TIMEOUT_SECS must be a whole number of seconds")?;

        let build_policy = lookup("BUILD_POLICY")
            .unwrap_or_else(|| "independent".to_string())
            .parse::<BuildPolicy>()
            .context("BUILD_POLICY must be 'independent' or 'chained'")?;

        Ok(Config {
            api_base_url: api_base_url.trim_end_matches('/').to_string(),
            api_token: lookup("API_TOKEN").filter(|t| !t.trim().is_empty()),
            request_timeout,
            build_policy,
            output_dir: lookup("OUTPUT_DIR")
                .map(PathBuf::from)
                .unwrap_or_else(|| PathBuf::from(".")),
            rust_log: lookup("RUST_LOG").unwrap_or_else(|| "info".to_string()),
        })
    }
}
