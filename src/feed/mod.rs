//! Budget data feeds.
//!
//! A feed is one year of budgets in one of two shapes: the JSON document the
//! web dashboard serves (`data.2024.json`), or a flat CSV export with one
//! budget per row. Both end up as validated [`BudgetRecord`]s.

mod csv_feed;
mod json_feed;

use anyhow::{Context, Result};
use regex::Regex;
use std::path::{Path, PathBuf};
use std::sync::LazyLock;

use crate::error::BreakdownError;
use crate::models::BudgetRecord;

pub(crate) use csv_feed::CsvFeed;
pub(crate) use json_feed::{parse_json_feed, to_feed, to_records, MissingCurrencyPolicy};

static FEED_FILE_NAME: LazyLock<Option<Regex>> =
    LazyLock::new(|| Regex::new(r"^data\.([0-9]{4})\.json$").ok());

static YEAR: LazyLock<Option<Regex>> = LazyLock::new(|| Regex::new(r"^[0-9]{4}$").ok());

/// Year encoded in a feed file name such as `data.2024.json`.
pub(crate) fn year_from_path(path: &Path) -> Option<i32> {
    let file_name = path.file_name()?.to_str()?;
    let caps = FEED_FILE_NAME.as_ref()?.captures(file_name)?;
    caps.get(1)?.as_str().parse().ok()
}

pub(crate) fn parse_year(s: &str) -> crate::error::Result<i32> {
    let trimmed = s.trim();
    let valid = YEAR.as_ref().is_some_and(|re| re.is_match(trimmed));
    if !valid {
        return Err(BreakdownError::InvalidYear(s.to_string()));
    }
    trimmed
        .parse()
        .map_err(|_| BreakdownError::InvalidYear(s.to_string()))
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum FeedFormat {
    Json,
    Csv,
}

impl FeedFormat {
    pub(crate) fn from_path(path: &Path) -> Result<Self> {
        let ext = path
            .extension()
            .and_then(|e| e.to_str())
            .map(str::to_lowercase)
            .unwrap_or_default();
        match ext.as_str() {
            "json" => Ok(Self::Json),
            "csv" => Ok(Self::Csv),
            _ => anyhow::bail!(
                "Unsupported feed file: {} (expected .json or .csv)",
                path.display()
            ),
        }
    }
}

/// Load and validate a feed file. `currency` and `policy` only matter for
/// JSON feeds, which carry amounts for several currencies.
pub(crate) fn load_file(
    path: &Path,
    currency: &str,
    policy: MissingCurrencyPolicy,
) -> Result<Vec<BudgetRecord>> {
    let records = match FeedFormat::from_path(path)? {
        FeedFormat::Json => {
            let text = std::fs::read_to_string(path)
                .with_context(|| format!("Failed to read {}", path.display()))?;
            let feed = parse_json_feed(&text)?;
            to_records(&feed, currency, policy)
                .with_context(|| format!("Invalid budget feed {}", path.display()))?
        }
        FeedFormat::Csv => CsvFeed::load(path)?,
    };
    tracing::debug!(path = %path.display(), records = records.len(), "loaded feed");
    Ok(records)
}

/// Every `data.YYYY.json` file directly inside `dir`, sorted by year.
pub(crate) fn discover(dir: &Path) -> Result<Vec<(i32, PathBuf)>> {
    let mut found = Vec::new();
    let entries =
        std::fs::read_dir(dir).with_context(|| format!("Failed to read {}", dir.display()))?;
    for entry in entries {
        let path = entry?.path();
        if let Some(year) = year_from_path(&path) {
            found.push((year, path));
        }
    }
    found.sort_by_key(|(year, _)| *year);
    Ok(found)
}

#[cfg(test)]
mod tests;
