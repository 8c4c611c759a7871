#![allow(clippy::unwrap_used)]

use super::*;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use std::io::Write;

const FEED: &str = r#"[
  {
    "name": "Bills",
    "categories": ["Utilities", "Phone"],
    "monthlyBudget": { "amount": 250, "currency": "GBP" },
    "monthlyAmount": {
      "GBP": [240.5, 251, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0],
      "EUR": [10, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0]
    }
  },
  {
    "name": "Holiday",
    "categories": [],
    "monthlyBudget": { "amount": 100, "currency": "GBP" },
    "monthlyAmount": {
      "EUR": [0, 0, 0, 0, 0, 0, 300, 0, 0, 0, 0, 0]
    }
  }
]"#;

// ── JSON feed ─────────────────────────────────────────────────

#[test]
fn test_parse_json_feed() {
    let feed = parse_json_feed(FEED).unwrap();
    assert_eq!(feed.len(), 2);
    assert_eq!(feed[0].name, "Bills");
    assert_eq!(feed[0].categories, vec!["Utilities", "Phone"]);
    assert_eq!(feed[0].monthly_budget.amount, dec!(250));
    assert_eq!(feed[0].monthly_amount["GBP"][0], dec!(240.5));
}

#[test]
fn test_parse_json_feed_invalid() {
    assert!(parse_json_feed("{ not json").is_err());
    assert!(parse_json_feed(r#"[{"name": "x"}]"#).is_err());
}

#[test]
fn test_missing_categories_default_to_empty() {
    let feed = parse_json_feed(
        r#"[{"name":"x","monthlyBudget":{"amount":1,"currency":"GBP"},"monthlyAmount":{}}]"#,
    )
    .unwrap();
    assert!(feed[0].categories.is_empty());
}

#[test]
fn test_to_record_selects_currency() {
    let feed = parse_json_feed(FEED).unwrap();
    let record = feed[0].to_record("EUR", MissingCurrencyPolicy::Reject).unwrap();
    assert_eq!(record.monthly_amount[0], dec!(10));
    assert_eq!(record.annual_amount(), dec!(10));
}

#[test]
fn test_missing_currency_rejected() {
    let feed = parse_json_feed(FEED).unwrap();
    let err = to_records(&feed, "GBP", MissingCurrencyPolicy::Reject).unwrap_err();
    assert_eq!(
        err,
        BreakdownError::MissingCurrency {
            name: "Holiday".into(),
            currency: "GBP".into(),
        }
    );
}

#[test]
fn test_missing_currency_zero_filled() {
    let feed = parse_json_feed(FEED).unwrap();
    let records = to_records(&feed, "GBP", MissingCurrencyPolicy::ZeroFill).unwrap();
    assert_eq!(records.len(), 2);
    assert_eq!(records[1].monthly_amount, [Decimal::ZERO; 12]);
    assert_eq!(records[1].monthly_budget, dec!(100));
}

#[test]
fn test_wrong_month_count_rejected() {
    let feed = parse_json_feed(
        r#"[{"name":"Short","monthlyBudget":{"amount":1,"currency":"GBP"},
             "monthlyAmount":{"GBP":[1,2,3]}}]"#,
    )
    .unwrap();
    let err = to_records(&feed, "GBP", MissingCurrencyPolicy::Reject).unwrap_err();
    assert_eq!(
        err,
        BreakdownError::MonthCount {
            name: "Short".into(),
            found: 3,
        }
    );
}

#[test]
fn test_feed_round_trip_through_records() {
    let feed = parse_json_feed(FEED).unwrap();
    let records = to_records(&feed, "EUR", MissingCurrencyPolicy::Reject).unwrap();
    let back = to_feed(&records, "EUR");
    assert_eq!(back[1].monthly_amount["EUR"][6], dec!(300));
    assert_eq!(back[1].monthly_budget.currency, "EUR");

    let json = serde_json::to_string(&back).unwrap();
    assert!(json.contains("\"monthlyBudget\""));
    assert!(json.contains("\"monthlyAmount\""));
}

#[test]
fn test_policy_from_str() {
    assert_eq!(
        "reject".parse::<MissingCurrencyPolicy>().unwrap(),
        MissingCurrencyPolicy::Reject
    );
    assert_eq!(
        " Zero ".parse::<MissingCurrencyPolicy>().unwrap(),
        MissingCurrencyPolicy::ZeroFill
    );
    assert!("maybe".parse::<MissingCurrencyPolicy>().is_err());
    assert_eq!(MissingCurrencyPolicy::default(), MissingCurrencyPolicy::Reject);
}

// ── Years ─────────────────────────────────────────────────────

#[test]
fn test_year_from_path() {
    assert_eq!(year_from_path(Path::new("data/data.2023.json")), Some(2023));
    assert_eq!(year_from_path(Path::new("data.1999.json")), Some(1999));
    assert_eq!(year_from_path(Path::new("data.23.json")), None);
    assert_eq!(year_from_path(Path::new("data.2023.csv")), None);
    assert_eq!(year_from_path(Path::new("mydata.2023.json")), None);
}

#[test]
fn test_parse_year() {
    assert_eq!(parse_year("2024").unwrap(), 2024);
    assert_eq!(parse_year(" 2024 ").unwrap(), 2024);
    assert_eq!(
        parse_year("24").unwrap_err(),
        BreakdownError::InvalidYear("24".into())
    );
    assert!(parse_year("20x4").is_err());
    assert!(parse_year("").is_err());
}

// ── Files ─────────────────────────────────────────────────────

#[test]
fn test_feed_format_from_path() {
    assert_eq!(
        FeedFormat::from_path(Path::new("a.JSON")).unwrap(),
        FeedFormat::Json
    );
    assert_eq!(
        FeedFormat::from_path(Path::new("a.csv")).unwrap(),
        FeedFormat::Csv
    );
    assert!(FeedFormat::from_path(Path::new("a.xlsx")).is_err());
    assert!(FeedFormat::from_path(Path::new("noext")).is_err());
}

#[test]
fn test_load_json_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("data.2024.json");
    std::fs::File::create(&path)
        .unwrap()
        .write_all(FEED.as_bytes())
        .unwrap();

    let records = load_file(&path, "GBP", MissingCurrencyPolicy::ZeroFill).unwrap();
    assert_eq!(records.len(), 2);
    assert_eq!(records[0].monthly_amount[1], dec!(251));

    let err = load_file(&path, "GBP", MissingCurrencyPolicy::Reject).unwrap_err();
    assert!(format!("{err:#}").contains("Holiday"));
}

#[test]
fn test_discover_sorts_by_year() {
    let dir = tempfile::tempdir().unwrap();
    for name in ["data.2024.json", "data.2022.json", "notes.txt", "data.23.json"] {
        std::fs::write(dir.path().join(name), "[]").unwrap();
    }

    let found = discover(dir.path()).unwrap();
    let years: Vec<i32> = found.iter().map(|(y, _)| *y).collect();
    assert_eq!(years, vec![2022, 2024]);
    assert!(found[1].1.ends_with("data.2024.json"));
}

#[test]
fn test_discover_missing_dir() {
    assert!(discover(Path::new("/definitely/not/here")).is_err());
}
