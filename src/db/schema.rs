pub(crate) const SCHEMA_V1: &str = r#"
CREATE TABLE IF NOT EXISTS schema_version (
    version INTEGER NOT NULL
);

CREATE TABLE IF NOT EXISTS budgets (
    id              INTEGER PRIMARY KEY AUTOINCREMENT,
    year            INTEGER NOT NULL,
    currency        TEXT NOT NULL,
    position        INTEGER NOT NULL,
    name            TEXT NOT NULL,
    categories      TEXT NOT NULL DEFAULT '[]',
    monthly_budget  TEXT NOT NULL,
    imported_at     TEXT NOT NULL,
    UNIQUE(year, currency, name)
);

CREATE INDEX IF NOT EXISTS idx_budgets_year ON budgets(year, currency, position);

CREATE TABLE IF NOT EXISTS budget_amounts (
    budget_id   INTEGER NOT NULL REFERENCES budgets(id) ON DELETE CASCADE,
    month       INTEGER NOT NULL CHECK (month BETWEEN 0 AND 11),
    amount      TEXT NOT NULL,
    PRIMARY KEY (budget_id, month)
);

"#;

pub(crate) const CURRENT_VERSION: i32 = 1;

/// Migrations from version N to N+1.
/// Each entry is (from_version, sql).
pub(crate) const MIGRATIONS: &[(i32, &str)] = &[];
