mod cli;
mod tui;

use anyhow::Result;
use std::path::Path;

use crate::db::Database;
use crate::feed::{self, MissingCurrencyPolicy};

pub(crate) use cli::as_cli;
pub(crate) use tui::as_tui;

/// Load a feed file and store it as one year. The year comes from
/// `year`, or failing that from a `data.YYYY.json` file name.
pub(crate) fn import_file(
    db: &mut Database,
    path: &Path,
    year: Option<i32>,
    currency: &str,
    policy: MissingCurrencyPolicy,
) -> Result<(i32, usize)> {
    if !path.exists() {
        anyhow::bail!("File not found: {}", path.display());
    }
    let year = year
        .or_else(|| feed::year_from_path(path))
        .ok_or_else(|| {
            anyhow::anyhow!(
                "Cannot tell which year {} holds; name it data.YYYY.json or pass a year",
                path.display()
            )
        })?;

    let records = feed::load_file(path, currency, policy)?;
    let count = db.replace_year(year, currency, &records)?;
    tracing::info!(path = %path.display(), year, currency, count, "imported feed");
    Ok((year, count))
}

pub(crate) fn shellexpand(path: &str) -> String {
    if let Some(rest) = path.strip_prefix("~/") {
        let home = std::env::var("HOME").unwrap_or_else(|_| ".".into());
        format!("{home}/{rest}")
    } else {
        path.to_string()
    }
}
