mod schema;

use anyhow::{Context, Result};
use rusqlite::{params, Connection};
use rust_decimal::Decimal;
use std::path::Path;
use std::str::FromStr;

use crate::models::BudgetRecord;

pub(crate) struct Database {
    conn: Connection,
}

impl Database {
    pub(crate) fn open(path: &Path) -> Result<Self> {
        let conn = Connection::open(path)
            .with_context(|| format!("Failed to open database: {}", path.display()))?;
        conn.execute_batch("PRAGMA journal_mode=WAL; PRAGMA foreign_keys=ON;")
            .context("Failed to set database pragmas")?;
        let mut db = Self { conn };
        db.migrate().context("Database migration failed")?;
        tracing::debug!(path = %path.display(), "opened database");
        Ok(db)
    }

    #[cfg(test)]
    pub(crate) fn open_in_memory() -> Result<Self> {
        let conn = Connection::open_in_memory()?;
        conn.execute_batch("PRAGMA foreign_keys=ON;")?;
        let mut db = Self { conn };
        db.migrate()?;
        Ok(db)
    }

    fn migrate(&mut self) -> Result<()> {
        let has_version_table: bool = self.conn.query_row(
            "SELECT EXISTS(SELECT 1 FROM sqlite_master WHERE type='table' AND name='schema_version')",
            [],
            |row| row.get(0),
        )?;

        if !has_version_table {
            self.conn.execute_batch(schema::SCHEMA_V1)?;
            self.conn.execute(
                "INSERT INTO schema_version (version) VALUES (?1)",
                params![schema::CURRENT_VERSION],
            )?;
            return Ok(());
        }

        let current: i32 = self
            .conn
            .query_row("SELECT version FROM schema_version LIMIT 1", [], |row| {
                row.get(0)
            })
            .unwrap_or(0);

        for &(from_version, sql) in schema::MIGRATIONS {
            if current <= from_version {
                tracing::info!(from_version, "applying migration");
                self.conn.execute_batch(sql)?;
            }
        }

        if current < schema::CURRENT_VERSION {
            self.conn.execute(
                "UPDATE schema_version SET version = ?1",
                params![schema::CURRENT_VERSION],
            )?;
        }

        Ok(())
    }

    // ── Budgets ───────────────────────────────────────────────

    /// Replace every budget stored for `year` in `currency`. Record order is
    /// kept. Either all records are stored or none are.
    pub(crate) fn replace_year(
        &mut self,
        year: i32,
        currency: &str,
        records: &[BudgetRecord],
    ) -> Result<usize> {
        let now = chrono::Utc::now().to_rfc3339();
        let tx = self.conn.transaction()?;
        let removed = tx.execute(
            "DELETE FROM budgets WHERE year = ?1 AND currency = ?2",
            params![year, currency],
        )?;

        for (position, record) in records.iter().enumerate() {
            let categories = serde_json::to_string(&record.categories)?;
            tx.execute(
                "INSERT INTO budgets (year, currency, position, name, categories, monthly_budget, imported_at)
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)",
                params![
                    year,
                    currency,
                    position as i64,
                    record.name,
                    categories,
                    record.monthly_budget.to_string(),
                    now,
                ],
            )
            .with_context(|| format!("Failed to store budget '{}'", record.name))?;
            let budget_id = tx.last_insert_rowid();

            for (month, amount) in record.monthly_amount.iter().enumerate() {
                tx.execute(
                    "INSERT INTO budget_amounts (budget_id, month, amount) VALUES (?1, ?2, ?3)",
                    params![budget_id, month as i64, amount.to_string()],
                )?;
            }
        }

        tx.commit()?;
        tracing::info!(
            year,
            currency,
            removed,
            stored = records.len(),
            "replaced budgets for year"
        );
        Ok(records.len())
    }

    /// Budgets for one year and currency, in the order they were imported.
    pub(crate) fn get_records(&self, year: i32, currency: &str) -> Result<Vec<BudgetRecord>> {
        let mut stmt = self.conn.prepare(
            "SELECT id, name, categories, monthly_budget FROM budgets
             WHERE year = ?1 AND currency = ?2 ORDER BY position",
        )?;
        let rows = stmt
            .query_map(params![year, currency], |row| {
                Ok((
                    row.get::<_, i64>(0)?,
                    row.get::<_, String>(1)?,
                    row.get::<_, String>(2)?,
                    row.get::<_, String>(3)?,
                ))
            })?
            .collect::<std::result::Result<Vec<_>, _>>()?;

        let mut amount_stmt = self
            .conn
            .prepare("SELECT amount FROM budget_amounts WHERE budget_id = ?1 ORDER BY month")?;

        let mut records = Vec::with_capacity(rows.len());
        for (id, name, categories, budget) in rows {
            let categories: Vec<String> = serde_json::from_str(&categories)
                .with_context(|| format!("Corrupt categories for budget '{name}'"))?;
            let budget = parse_stored(&budget)
                .with_context(|| format!("Corrupt monthly budget for '{name}'"))?;
            let amounts = amount_stmt
                .query_map(params![id], |row| row.get::<_, String>(0))?
                .collect::<std::result::Result<Vec<_>, _>>()?
                .iter()
                .map(|a| parse_stored(a))
                .collect::<Result<Vec<_>>>()
                .with_context(|| format!("Corrupt monthly amounts for '{name}'"))?;
            records.push(BudgetRecord::new(name, categories, budget, amounts)?);
        }
        Ok(records)
    }

    /// Years with data for `currency`, newest first.
    pub(crate) fn get_years(&self, currency: &str) -> Result<Vec<i32>> {
        let mut stmt = self
            .conn
            .prepare("SELECT DISTINCT year FROM budgets WHERE currency = ?1 ORDER BY year DESC")?;
        let rows = stmt.query_map(params![currency], |row| row.get(0))?;
        Ok(rows.collect::<std::result::Result<Vec<_>, _>>()?)
    }

    pub(crate) fn delete_year(&self, year: i32, currency: &str) -> Result<usize> {
        let removed = self.conn.execute(
            "DELETE FROM budgets WHERE year = ?1 AND currency = ?2",
            params![year, currency],
        )?;
        tracing::info!(year, currency, removed, "deleted year");
        Ok(removed)
    }

    pub(crate) fn record_count(&self, year: i32, currency: &str) -> Result<i64> {
        Ok(self.conn.query_row(
            "SELECT COUNT(*) FROM budgets WHERE year = ?1 AND currency = ?2",
            params![year, currency],
            |row| row.get(0),
        )?)
    }
}

fn parse_stored(s: &str) -> Result<Decimal> {
    Decimal::from_str(s).with_context(|| format!("Failed to parse '{s}' as decimal"))
}

#[cfg(test)]
mod tests;
