use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;

use anyhow::{Context, Result};

/// Application configuration loaded from environment variables.
/// Every variable has a default; malformed values fail startup.
#[derive(Debug, Clone)]
pub struct Config {
    pub port: u16,
    pub rust_log: String,
    pub dataset_path: PathBuf,
    /// Length of each simulated processing stage.
    pub processing_stage_delay: Duration,
    /// Use the LLM-backed reason generator instead of the static one.
    pub enable_llm_reasons: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            port: 8080,
            rust_log: "info".to_string(),
            dataset_path: PathBuf::from("data/career_all_20.csv"),
            processing_stage_delay: Duration::from_millis(1000),
            enable_llm_reasons: false,
        }
    }
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let defaults = Config::default();

        Ok(Config {
            port: parse_var(&lookup, "PORT", defaults.port)?,
            rust_log: lookup("RUST_LOG").unwrap_or(defaults.rust_log),
            dataset_path: lookup("DATASET_PATH")
                .map(PathBuf::from)
                .unwrap_or(defaults.dataset_path),
            processing_stage_delay: Duration::from_millis(parse_var(
                &lookup,
                "PROCESSING_STAGE_DELAY_MS",
                defaults.processing_stage_delay.as_millis() as u64,
            )?),
            enable_llm_reasons: parse_var(
                &lookup,
                "ENABLE_LLM_REASONS",
                defaults.enable_llm_reasons,
            )?,
        })
    }
}

fn parse_var<T>(lookup: &impl Fn(&str) -> Option<String>, key: &str, default: T) -> Result<T>
where
    T: FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match lookup(key) {
        Some(raw) => raw
            .trim()
            .parse::<T>()
            .with_context(|| format!("Environment variable '{key}' has an invalid value '{raw}'")),
        None => Ok(default),
    }
}
