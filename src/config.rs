use crate::retry::RetryConfig;
use crate::wti::DEFAULT_API_URL;
use anyhow::{bail, Result};
use std::path::PathBuf;
use std::time::Duration;

pub const USAGE: &str = "Usage: fetch-translations <destination_path> <project_token>";

#[derive(Debug, Clone)]
pub struct Config {
    /// Application source path; bundles go to `<destination>/translations`
    pub destination: PathBuf,
    /// WebTranslateIt project token
    pub project_token: String,

    /// When false the run exits successfully without fetching anything
    pub fetch_enabled: bool,

    // Remote service
    pub api_url: String,
    pub http_timeout: Duration,

    // Attempts
    pub retry: RetryConfig,
}

impl Config {
    /// Config with default settings. Fetching is disabled.
    pub fn new(destination: impl Into<PathBuf>, project_token: impl Into<String>) -> Self {
        Self {
            destination: destination.into(),
            project_token: project_token.into(),
            fetch_enabled: false,
            api_url: DEFAULT_API_URL.to_string(),
            http_timeout: Duration::from_secs(30),
            retry: RetryConfig::translations_download(),
        }
    }

    /// Build from the two positional arguments (program name excluded) and
    /// `TRANSLATIONS_*` environment variables.
    pub fn from_args_and_env<I>(args: I) -> Result<Self>
    where
        I: IntoIterator<Item = String>,
    {
        let args: Vec<String> = args.into_iter().collect();
        let (destination, project_token) = match args.as_slice() {
            [destination, project_token] => (destination, project_token),
            _ => bail!("expected 2 arguments, got {}\n{}", args.len(), USAGE),
        };

        if project_token.trim().is_empty() {
            bail!("project token must not be empty\n{}", USAGE);
        }

        let defaults = Self::new(destination, project_token.as_str());

        Ok(Self {
            fetch_enabled: env_flag("TRANSLATIONS_FETCH_ENABLED"),
            api_url: std::env::var("TRANSLATIONS_API_URL").unwrap_or(defaults.api_url),
            http_timeout: std::env::var("TRANSLATIONS_HTTP_TIMEOUT_SECS")
                .ok()
                .and_then(|v| v.parse().ok())
                .map(Duration::from_secs)
                .unwrap_or(defaults.http_timeout),
            retry: RetryConfig::new(
                std::env::var("TRANSLATIONS_MAX_ATTEMPTS")
                    .ok()
                    .and_then(|v| v.parse::<u32>().ok())
                    .unwrap_or(defaults.retry.max_attempts)
                    .max(1),
                std::env::var("TRANSLATIONS_RETRY_DELAY_MS")
                    .ok()
                    .and_then(|v| v.parse().ok())
                    .map(Duration::from_millis)
                    .unwrap_or(defaults.retry.delay),
            ),
            ..defaults
        })
    }
}

fn env_flag(name: &str) -> bool {
    std::env::var(name)
        .map(|v| matches!(v.trim().to_ascii_lowercase().as_str(), "1" | "true" | "yes" | "on"))
        .unwrap_or(false)
}
