use anyhow::{Context, Result};
use std::path::PathBuf;

use crate::feed::MissingCurrencyPolicy;

pub(crate) const DEFAULT_CURRENCY: &str = "GBP";
const DB_FILE: &str = "breakdown.db";
const LOG_FILE: &str = "breakdown.log";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub(crate) enum LogFormat {
    #[default]
    Text,
    Json,
}

#[derive(Debug, Clone, PartialEq)]
pub(crate) struct Config {
    pub db_path: PathBuf,
    pub log_path: PathBuf,
    pub currency: String,
    pub missing_currency: MissingCurrencyPolicy,
    pub log_filter: String,
    pub log_format: LogFormat,
}

impl Config {
    /// Read `.env` if present, then the `BREAKDOWN_*` variables.
    pub(crate) fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub(crate) fn from_lookup(var: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let db_path = match var("BREAKDOWN_DB_PATH").filter(|p| !p.trim().is_empty()) {
            Some(path) => PathBuf::from(path),
            None => default_data_dir()?.join(DB_FILE),
        };
        let log_path = db_path
            .parent()
            .map(|dir| dir.join(LOG_FILE))
            .unwrap_or_else(|| PathBuf::from(LOG_FILE));

        let currency = var("BREAKDOWN_CURRENCY")
            .map(|c| c.trim().to_uppercase())
            .filter(|c| !c.is_empty())
            .unwrap_or_else(|| DEFAULT_CURRENCY.to_string());

        let missing_currency = match var("BREAKDOWN_MISSING_CURRENCY") {
            Some(policy) => policy
                .parse()
                .context("Invalid BREAKDOWN_MISSING_CURRENCY")?,
            None => MissingCurrencyPolicy::default(),
        };

        let log_filter = var("BREAKDOWN_LOG").unwrap_or_else(|| "info".to_string());
        let log_format = match var("BREAKDOWN_LOG_FORMAT") {
            Some(f) if f.eq_ignore_ascii_case("json") => LogFormat::Json,
            _ => LogFormat::Text,
        };

        Ok(Self {
            db_path,
            log_path,
            currency,
            missing_currency,
            log_filter,
            log_format,
        })
    }

    /// Create the directory holding the database and log file.
    pub(crate) fn ensure_dirs(&self) -> Result<()> {
        if let Some(dir) = self.db_path.parent().filter(|d| !d.as_os_str().is_empty()) {
            std::fs::create_dir_all(dir)
                .with_context(|| format!("Failed to create data directory: {}", dir.display()))?;
        }
        Ok(())
    }
}

fn default_data_dir() -> Result<PathBuf> {
    let proj_dirs = directories::ProjectDirs::from("com", "breakdown", "Breakdown")
        .ok_or_else(|| anyhow::anyhow!("Could not determine data directory"))?;
    Ok(proj_dirs.data_dir().to_path_buf())
}
