#![allow(clippy::unwrap_used)]

use super::*;
use rust_decimal_macros::dec;

fn record(name: &str, budget: Decimal, january: Decimal) -> BudgetRecord {
    let mut months = vec![Decimal::ZERO; 12];
    months[0] = january;
    months[11] = dec!(-12.34);
    BudgetRecord::new(
        name.into(),
        vec!["Food & Dining".into(), "Groceries".into()],
        budget,
        months,
    )
    .unwrap()
}

// ── Schema ────────────────────────────────────────────────────

#[test]
fn test_fresh_database_is_empty() {
    let db = Database::open_in_memory().unwrap();
    assert!(db.get_years("GBP").unwrap().is_empty());
    assert_eq!(db.record_count(2024, "GBP").unwrap(), 0);
    assert!(db.get_records(2024, "GBP").unwrap().is_empty());
}

#[test]
fn test_open_file_twice_keeps_data() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("breakdown.db");
    {
        let mut db = Database::open(&path).unwrap();
        db.replace_year(2024, "GBP", &[record("Bills", dec!(100), dec!(5))])
            .unwrap();
    }
    let db = Database::open(&path).unwrap();
    assert_eq!(db.record_count(2024, "GBP").unwrap(), 1);
}

// ── Round trip ────────────────────────────────────────────────

#[test]
fn test_replace_and_get_records() {
    let mut db = Database::open_in_memory().unwrap();
    let records = vec![
        record("Groceries", dec!(300.50), dec!(280.25)),
        record("Bills", dec!(120), dec!(0)),
    ];
    assert_eq!(db.replace_year(2024, "GBP", &records).unwrap(), 2);

    let fetched = db.get_records(2024, "GBP").unwrap();
    assert_eq!(fetched, records);
    assert_eq!(fetched[0].monthly_amount[11], dec!(-12.34));
    assert_eq!(fetched[1].categories, vec!["Food & Dining", "Groceries"]);
}

#[test]
fn test_records_keep_import_order() {
    let mut db = Database::open_in_memory().unwrap();
    let records = vec![
        record("Zoo", dec!(1), dec!(0)),
        record("Apples", dec!(2), dec!(0)),
        record("Middle", dec!(3), dec!(0)),
    ];
    db.replace_year(2023, "GBP", &records).unwrap();
    let names: Vec<String> = db
        .get_records(2023, "GBP")
        .unwrap()
        .into_iter()
        .map(|r| r.name)
        .collect();
    assert_eq!(names, vec!["Zoo", "Apples", "Middle"]);
}

#[test]
fn test_replace_overwrites_previous_import() {
    let mut db = Database::open_in_memory().unwrap();
    db.replace_year(
        2024,
        "GBP",
        &[record("Old", dec!(1), dec!(0)), record("Gone", dec!(1), dec!(0))],
    )
    .unwrap();
    db.replace_year(2024, "GBP", &[record("New", dec!(5), dec!(1))])
        .unwrap();

    let fetched = db.get_records(2024, "GBP").unwrap();
    assert_eq!(fetched.len(), 1);
    assert_eq!(fetched[0].name, "New");
}

#[test]
fn test_duplicate_names_roll_back() {
    let mut db = Database::open_in_memory().unwrap();
    db.replace_year(2024, "GBP", &[record("Keep", dec!(1), dec!(0))])
        .unwrap();

    let dupes = vec![record("Dup", dec!(1), dec!(0)), record("Dup", dec!(2), dec!(0))];
    assert!(db.replace_year(2024, "GBP", &dupes).is_err());

    let fetched = db.get_records(2024, "GBP").unwrap();
    assert_eq!(fetched.len(), 1);
    assert_eq!(fetched[0].name, "Keep");
}

// ── Years and currencies ──────────────────────────────────────

#[test]
fn test_years_newest_first_per_currency() {
    let mut db = Database::open_in_memory().unwrap();
    let r = [record("Bills", dec!(1), dec!(0))];
    db.replace_year(2022, "GBP", &r).unwrap();
    db.replace_year(2024, "GBP", &r).unwrap();
    db.replace_year(2023, "GBP", &r).unwrap();
    db.replace_year(2021, "EUR", &r).unwrap();

    assert_eq!(db.get_years("GBP").unwrap(), vec![2024, 2023, 2022]);
    assert_eq!(db.get_years("EUR").unwrap(), vec![2021]);
    assert!(db.get_years("USD").unwrap().is_empty());
}

#[test]
fn test_currencies_are_separate() {
    let mut db = Database::open_in_memory().unwrap();
    db.replace_year(2024, "GBP", &[record("Bills", dec!(1), dec!(10))])
        .unwrap();
    db.replace_year(2024, "EUR", &[record("Bills", dec!(1), dec!(20))])
        .unwrap();

    assert_eq!(
        db.get_records(2024, "GBP").unwrap()[0].monthly_amount[0],
        dec!(10)
    );
    assert_eq!(
        db.get_records(2024, "EUR").unwrap()[0].monthly_amount[0],
        dec!(20)
    );
}

#[test]
fn test_delete_year_cascades() {
    let mut db = Database::open_in_memory().unwrap();
    db.replace_year(
        2024,
        "GBP",
        &[record("A", dec!(1), dec!(0)), record("B", dec!(1), dec!(0))],
    )
    .unwrap();
    db.replace_year(2023, "GBP", &[record("A", dec!(1), dec!(0))])
        .unwrap();

    assert_eq!(db.delete_year(2024, "GBP").unwrap(), 2);
    assert_eq!(db.record_count(2024, "GBP").unwrap(), 0);
    assert_eq!(db.record_count(2023, "GBP").unwrap(), 1);

    let orphans: i64 = db
        .conn
        .query_row(
            "SELECT COUNT(*) FROM budget_amounts WHERE budget_id NOT IN (SELECT id FROM budgets)",
            [],
            |row| row.get(0),
        )
        .unwrap();
    assert_eq!(orphans, 0);
    assert_eq!(db.delete_year(2024, "GBP").unwrap(), 0);
}

#[test]
fn test_corrupt_amount_is_an_error() {
    let mut db = Database::open_in_memory().unwrap();
    db.replace_year(2024, "GBP", &[record("Bills", dec!(1), dec!(0))])
        .unwrap();
    db.conn
        .execute("UPDATE budget_amounts SET amount = 'abc' WHERE month = 3", [])
        .unwrap();

    let err = db.get_records(2024, "GBP").unwrap_err();
    assert!(format!("{err:#}").contains("Bills"));
}
