use anyhow::{Context, Result};
use rust_decimal::Decimal;
use std::path::Path;
use std::str::FromStr;

use crate::models::{month_label, BudgetRecord, MONTHS};

/// `name, categories, monthly_budget, jan .. dec`
const COLUMNS: usize = 3 + MONTHS;

pub(crate) struct CsvFeed;

impl CsvFeed {
    /// Read a spreadsheet export with one budget per row. Categories are
    /// `;`-separated in the second column. A header row is skipped when its
    /// budget cell is not a number.
    pub(crate) fn load(path: &Path) -> Result<Vec<BudgetRecord>> {
        let mut rdr = csv::ReaderBuilder::new()
            .flexible(true)
            .has_headers(false)
            .trim(csv::Trim::All)
            .from_path(path)
            .context("Failed to open CSV file")?;

        let mut rows: Vec<Vec<String>> = Vec::new();
        for result in rdr.records() {
            let record = result.context("Failed to read CSV record")?;
            rows.push(record.iter().map(|s| s.to_string()).collect());
        }
        Self::parse(&rows)
    }

    /// Every row needs exactly fifteen cells once trailing blanks are
    /// dropped. Blank amounts are rejected rather than read as zero.
    pub(crate) fn parse(rows: &[Vec<String>]) -> Result<Vec<BudgetRecord>> {
        if rows.is_empty() {
            anyhow::bail!("CSV file is empty");
        }

        let skip = usize::from(looks_like_header(&rows[0]));
        let mut records = Vec::new();

        for (i, row) in rows.iter().enumerate().skip(skip) {
            if row.iter().all(|f| f.trim().is_empty()) {
                continue;
            }
            // Spreadsheets pad rows with empty trailing cells.
            let used = row
                .iter()
                .rposition(|f| !f.trim().is_empty())
                .map_or(0, |p| p + 1);
            let row = &row[..used];
            if row.len() != COLUMNS {
                anyhow::bail!(
                    "Row {}: expected {} columns, found {}",
                    i + 1,
                    COLUMNS,
                    row.len()
                );
            }

            let name = row[0].trim().to_string();
            if name.is_empty() {
                anyhow::bail!("Row {}: budget name is empty", i + 1);
            }
            let categories = split_categories(&row[1]);
            let budget = parse_decimal(&row[2])
                .with_context(|| format!("Row {}: failed to parse monthly budget", i + 1))?;
            let amounts = row[3..]
                .iter()
                .enumerate()
                .map(|(month, cell)| {
                    parse_decimal(cell).with_context(|| {
                        format!("Row {}: failed to parse {} amount", i + 1, month_label(month))
                    })
                })
                .collect::<Result<Vec<_>>>()?;

            let record = BudgetRecord::new(name, categories, budget, amounts)
                .with_context(|| format!("Row {}", i + 1))?;
            records.push(record);
        }

        Ok(records)
    }
}

fn looks_like_header(row: &[String]) -> bool {
    row.get(2)
        .map(|cell| parse_decimal(cell).is_err())
        .unwrap_or(true)
}

fn split_categories(cell: &str) -> Vec<String> {
    cell.split(';')
        .map(str::trim)
        .filter(|c| !c.is_empty())
        .map(String::from)
        .collect()
}

fn parse_decimal(s: &str) -> Result<Decimal> {
    let cleaned = s
        .replace(['£', '$', '€', ','], "")
        .replace('(', "-")
        .replace(')', "")
        .trim()
        .to_string();
    if cleaned.is_empty() {
        anyhow::bail!("Amount is blank; write 0 for no spend");
    }
    Decimal::from_str(&cleaned)
        .or_else(|_| Decimal::from_str(&cleaned.replace('"', "")))
        .context(format!("Failed to parse '{}' as decimal", s))
}

#[cfg(test)]
#[path = "csv_feed_tests.rs"]
mod tests;
