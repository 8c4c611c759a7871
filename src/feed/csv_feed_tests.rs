#![allow(clippy::unwrap_used)]

use super::*;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use std::io::Write;

fn make_csv_file(content: &str) -> tempfile::NamedTempFile {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    file.write_all(content.as_bytes()).unwrap();
    file
}

fn row(cells: &[&str]) -> Vec<String> {
    cells.iter().map(|s| s.to_string()).collect()
}

const HEADER: &str =
    "name,categories,monthly_budget,jan,feb,mar,apr,may,jun,jul,aug,sep,oct,nov,dec\n";

// ── parse_decimal ─────────────────────────────────────────────

#[test]
fn test_parse_decimal_basic() {
    assert_eq!(parse_decimal("100.50").unwrap(), dec!(100.50));
    assert_eq!(parse_decimal("-42.99").unwrap(), dec!(-42.99));
}

#[test]
fn test_parse_decimal_with_currency() {
    assert_eq!(parse_decimal("£1,234.56").unwrap(), dec!(1234.56));
    assert_eq!(parse_decimal("$99.99").unwrap(), dec!(99.99));
    assert_eq!(parse_decimal("€5").unwrap(), dec!(5));
}

#[test]
fn test_parse_decimal_parentheses_negative() {
    assert_eq!(parse_decimal("(500.00)").unwrap(), dec!(-500.00));
}

#[test]
fn test_parse_decimal_empty_rejected() {
    assert!(parse_decimal("").is_err());
    assert!(parse_decimal("  ").is_err());
    assert_eq!(parse_decimal("0").unwrap(), Decimal::ZERO);
}

#[test]
fn test_parse_decimal_invalid() {
    assert!(parse_decimal("monthly_budget").is_err());
}

// ── header / categories ───────────────────────────────────────

#[test]
fn test_header_detection() {
    assert!(looks_like_header(&row(&["name", "categories", "budget"])));
    assert!(!looks_like_header(&row(&["Bills", "Phone", "250"])));
    assert!(looks_like_header(&row(&["only"])));
}

#[test]
fn test_split_categories() {
    assert_eq!(
        split_categories("Utilities; Phone;;"),
        vec!["Utilities".to_string(), "Phone".to_string()]
    );
    assert!(split_categories("").is_empty());
}

// ── CsvFeed::load ─────────────────────────────────────────────

#[test]
fn test_load_with_header() {
    let content = format!(
        "{HEADER}Bills,Utilities;Phone,250,240.50,251,0,0,0,0,0,0,0,0,0,0\n\
         Food,Groceries,\"£1,000\",900,1100,(50),0,0,0,0,0,0,0,0,0\n"
    );
    let file = make_csv_file(&content);
    let records = CsvFeed::load(file.path()).unwrap();

    assert_eq!(records.len(), 2);
    assert_eq!(records[0].name, "Bills");
    assert_eq!(records[0].categories, vec!["Utilities", "Phone"]);
    assert_eq!(records[0].monthly_budget, dec!(250));
    assert_eq!(records[0].monthly_amount[0], dec!(240.50));
    assert_eq!(records[1].monthly_budget, dec!(1000));
    assert_eq!(records[1].monthly_amount[2], dec!(-50));
}

#[test]
fn test_load_without_header() {
    let file = make_csv_file("Bills,,100,1,2,3,4,5,6,7,8,9,10,11,12\n");
    let records = CsvFeed::load(file.path()).unwrap();
    assert_eq!(records.len(), 1);
    assert_eq!(records[0].annual_amount(), dec!(78));
    assert!(records[0].categories.is_empty());
}

#[test]
fn test_blank_rows_skipped() {
    let content = format!("{HEADER}Bills,,100,1,2,3,4,5,6,7,8,9,10,11,12\n,,\n");
    let file = make_csv_file(&content);
    assert_eq!(CsvFeed::load(file.path()).unwrap().len(), 1);
}

#[test]
fn test_short_row_rejected() {
    let content = format!("{HEADER}Bills,,100,1,2,3\n");
    let file = make_csv_file(&content);
    let err = CsvFeed::load(file.path()).unwrap_err();
    assert!(err.to_string().contains("expected 15 columns"));
}

#[test]
fn test_thirteen_month_cells_rejected() {
    let mut cells = vec!["Bills", "Utilities", "100"];
    cells.extend(["10"; 13]);
    let err = CsvFeed::parse(&[row(&cells)]).unwrap_err();
    assert!(err.to_string().contains("expected 15 columns, found 16"));
}

#[test]
fn test_trailing_blank_cells_tolerated() {
    let mut cells = vec!["Bills", "", "100"];
    cells.extend(["1"; 12]);
    cells.extend(["", " "]);
    let records = CsvFeed::parse(&[row(&cells)]).unwrap();
    assert_eq!(records[0].annual_amount(), dec!(12));
}

#[test]
fn test_blank_month_cell_rejected() {
    let rows = vec![row(&[
        "Bills", "", "100", "1", "", "1", "1", "1", "1", "1", "1", "1", "1", "1", "1",
    ])];
    let err = CsvFeed::parse(&rows).unwrap_err();
    assert!(format!("{err:#}").contains("Feb amount"));
}

#[test]
fn test_negative_budget_rejected() {
    let rows = vec![row(&[
        "Bills", "", "-10", "0", "0", "0", "0", "0", "0", "0", "0", "0", "0", "0", "0",
    ])];
    assert!(CsvFeed::parse(&rows).is_err());
}

#[test]
fn test_empty_name_rejected() {
    let rows = vec![row(&[
        " ", "", "10", "0", "0", "0", "0", "0", "0", "0", "0", "0", "0", "0", "0",
    ])];
    let err = CsvFeed::parse(&rows).unwrap_err();
    assert!(err.to_string().contains("name is empty"));
}

#[test]
fn test_empty_file() {
    let file = make_csv_file("");
    assert!(CsvFeed::load(file.path()).is_err());
}

#[test]
fn test_missing_file() {
    assert!(CsvFeed::load(Path::new("/no/such/file.csv")).is_err());
}
