#![allow(clippy::unwrap_used)]

use super::*;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use std::path::PathBuf;

fn args(list: &[&str]) -> Vec<String> {
    list.iter().map(|s| s.to_string()).collect()
}

fn config() -> Config {
    Config {
        db_path: PathBuf::from("/tmp/breakdown.db"),
        log_path: PathBuf::from("/tmp/breakdown.log"),
        currency: "GBP".into(),
        missing_currency: MissingCurrencyPolicy::Reject,
        log_filter: "info".into(),
        log_format: crate::config::LogFormat::Text,
    }
}

fn record(name: &str, budget: Decimal, monthly: Decimal) -> BudgetRecord {
    BudgetRecord::new(name.into(), vec![], budget, vec![monthly; MONTHS]).unwrap()
}

// ── Argument helpers ─────────────────────────────────────────

#[test]
fn test_flag_lookup() {
    let a = args(&["2024", "--month", "Mar", "--currency", "eur"]);
    assert_eq!(flag(&a, "--month"), Some("Mar"));
    assert_eq!(flag(&a, "--year"), None);
    assert_eq!(currency_arg(&a, &config()), "EUR");
    assert_eq!(currency_arg(&args(&["2024"]), &config()), "GBP");
}

#[test]
fn test_positional_ignores_flags() {
    assert_eq!(positional(&args(&["2024", "--month", "1"])), Some("2024"));
    assert_eq!(positional(&args(&["--month", "1"])), None);
    assert_eq!(positional(&[]), None);
}

#[test]
fn test_positional_after_flags() {
    assert_eq!(positional(&args(&["--month", "3", "2024"])), Some("2024"));
    assert_eq!(
        positional(&args(&["--year", "2024", "f.json", "--currency", "EUR"])),
        Some("f.json")
    );
    assert_eq!(positional(&args(&["--zero-fill", "f.json"])), Some("f.json"));
    assert_eq!(month_arg(&args(&["--month", "3", "2024"])).unwrap(), Some(2));
}

#[test]
fn test_zero_fill_flag() {
    assert_eq!(
        policy_arg(&args(&["f.json", "--zero-fill"]), &config()),
        MissingCurrencyPolicy::ZeroFill
    );
    assert_eq!(
        policy_arg(&args(&["f.json"]), &config()),
        MissingCurrencyPolicy::Reject
    );
}

#[test]
fn test_year_arg() {
    assert_eq!(year_arg(&args(&["2023"]), "usage").unwrap(), 2023);
    assert!(year_arg(&args(&["23"]), "usage").is_err());
    let err = year_arg(&[], "breakdown feed <YYYY>").unwrap_err();
    assert!(err.to_string().contains("breakdown feed"));
}

#[test]
fn test_month_arg() {
    assert_eq!(month_arg(&args(&["2024", "--month", "Mar"])).unwrap(), Some(2));
    assert_eq!(month_arg(&args(&["2024", "--month", "12"])).unwrap(), Some(11));
    assert_eq!(month_arg(&args(&["2024"])).unwrap(), None);
    assert!(month_arg(&args(&["2024", "--month", "13"])).is_err());
}

#[test]
fn test_default_month() {
    assert_eq!(default_month(2024, (2024, 3)), 3);
    assert_eq!(default_month(2023, (2024, 3)), 11);
}

// ── Summary ──────────────────────────────────────────────────

#[test]
fn test_summary_text() {
    let records = vec![
        record("Bills", dec!(100), dec!(100)),
        record("Food", dec!(200), dec!(150)),
    ];
    let text = summary_text(&records, 2024, 1, "GBP").unwrap();

    assert!(text.starts_with("Breakdown 2024 (GBP), through Feb"));
    assert!(text.contains("Annual budget:   £3,600.00"));
    assert!(text.contains("Spent:           £3,000.00"));
    assert!(text.contains("Left to spend:   £600.00"));
    assert!(text.contains("Budget to date:  £600.00"));
    assert!(text.contains("Spent to date:   £500.00"));
    assert!(text.contains("Hit Budget"));
    assert!(text.contains("£50.00 Left"));
}

#[test]
fn test_summary_requires_budget() {
    let records = vec![record("Nothing", Decimal::ZERO, dec!(10))];
    assert!(summary_text(&records, 2024, 0, "GBP").is_err());
}

#[test]
fn test_stored_records_empty_year() {
    let db = Database::open_in_memory().unwrap();
    let err = stored_records(&db, 2024, "GBP").unwrap_err();
    assert!(err.to_string().contains("No GBP data stored for 2024"));
}

// ── Commands ─────────────────────────────────────────────────

#[test]
fn test_cli_import_and_years() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("budgets.csv");
    std::fs::write(&path, "Bills,,100,1,2,3,4,5,6,7,8,9,10,11,12\n").unwrap();

    let mut db = Database::open_in_memory().unwrap();
    let a = args(&["--year", "2022", path.to_str().unwrap()]);
    cli_import(&a, &mut db, &config()).unwrap();

    assert_eq!(db.get_years("GBP").unwrap(), vec![2022]);
    cli_years(&[], &mut db, &config()).unwrap();
    cli_feed(&args(&["2022"]), &mut db, &config()).unwrap();
    cli_summary(&args(&["2022", "--month", "Jun"]), &mut db, &config()).unwrap();
    cli_geometry(&args(&["2022"]), &mut db, &config()).unwrap();
    cli_geometry(&args(&["--month", "3", "2022"]), &mut db, &config()).unwrap();
}

#[test]
fn test_cli_import_dir() {
    let dir = tempfile::tempdir().unwrap();
    let feed = r#"[{"name":"Bills","categories":[],"monthlyBudget":{"amount":10,"currency":"GBP"},
        "monthlyAmount":{"GBP":[1,1,1,1,1,1,1,1,1,1,1,1]}}]"#;
    std::fs::write(dir.path().join("data.2021.json"), feed).unwrap();
    std::fs::write(dir.path().join("data.2022.json"), feed).unwrap();

    let mut db = Database::open_in_memory().unwrap();
    cli_import_dir(&args(&[dir.path().to_str().unwrap()]), &mut db, &config()).unwrap();
    assert_eq!(db.get_years("GBP").unwrap(), vec![2022, 2021]);
}

#[test]
fn test_unknown_command() {
    let mut db = Database::open_in_memory().unwrap();
    assert!(as_cli(&args(&["breakdown", "frobnicate"]), &mut db, &config()).is_err());
    assert!(as_cli(&args(&["breakdown", "version"]), &mut db, &config()).is_ok());
}
