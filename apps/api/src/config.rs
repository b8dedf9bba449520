use std::path::PathBuf;

use anyhow::{Context, Result};

const DEFAULT_SCORECARD_MAX_PAGES: u32 = 5;

/// Application configuration loaded from environment variables.
/// Startup fails if a numeric variable is set but unparseable.
#[derive(Debug, Clone)]
pub struct Config {
    pub port: u16,
    pub rust_log: String,
    /// When set, schools come from College Scorecard instead of the seed table.
    pub scorecard_api_key: Option<String>,
    pub scorecard_state: Option<String>,
    pub scorecard_ownership: Option<String>,
    /// Page cap for Scorecard fetches. `SCORECARD_MAX_PAGES=0` means no cap.
    pub scorecard_max_pages: Option<u32>,
    pub ipeds_csv_path: Option<PathBuf>,
    pub max_per_bucket: usize,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            port: 5001,
            rust_log: "info".to_string(),
            scorecard_api_key: None,
            scorecard_state: None,
            scorecard_ownership: None,
            scorecard_max_pages: Some(DEFAULT_SCORECARD_MAX_PAGES),
            ipeds_csv_path: None,
            max_per_bucket: 10,
        }
    }
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        let defaults = Config::default();
        Ok(Config {
            port: parse_env("PORT", defaults.port)?,
            rust_log: std::env::var("RUST_LOG").unwrap_or(defaults.rust_log),
            scorecard_api_key: optional_env("SCORECARD_API_KEY"),
            scorecard_state: optional_env("SCORECARD_STATE"),
            scorecard_ownership: optional_env("SCORECARD_OWNERSHIP"),
            scorecard_max_pages: page_cap(parse_env(
                "SCORECARD_MAX_PAGES",
                DEFAULT_SCORECARD_MAX_PAGES,
            )?),
            ipeds_csv_path: optional_env("IPEDS_CSV_PATH").map(PathBuf::from),
            max_per_bucket: positive_env("MAX_PER_BUCKET", defaults.max_per_bucket)?,
        })
    }
}

fn page_cap(max_pages: u32) -> Option<u32> {
    (max_pages > 0).then_some(max_pages)
}

fn positive_env(key: &str, default: usize) -> Result<usize> {
    let value = parse_env(key, default)?;
    if value == 0 {
        anyhow::bail!("{key} must be at least 1");
    }
    Ok(value)
}

/// Unset and blank variables are both treated as absent.
fn optional_env(key: &str) -> Option<String> {
    std::env::var(key)
        .ok()
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

fn parse_env<T>(key: &str, default: T) -> Result<T>
where
    T: std::str::FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match optional_env(key) {
        Some(raw) => raw
            .parse::<T>()
            .with_context(|| format!("{key} must be a valid number, got '{raw}'")),
        None => Ok(default),
    }
}
