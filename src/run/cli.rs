use anyhow::{Context, Result};
use chrono::Datelike;
use std::fmt::Write as _;
use std::path::Path;

use super::{import_file, shellexpand};
use crate::config::Config;
use crate::db::Database;
use crate::engine::{BreakdownEngine, Canvas};
use crate::feed::{self, parse_year, MissingCurrencyPolicy};
use crate::models::{month_label, parse_month, BudgetRecord, MONTHS};
use crate::progress::month_progress;
use crate::ui::util::{format_amount, format_percent, progress_label, truncate};

pub(crate) fn as_cli(args: &[String], db: &mut Database, config: &Config) -> Result<()> {
    let rest = &args[2..];
    match args[1].as_str() {
        "import" => cli_import(rest, db, config),
        "import-dir" => cli_import_dir(rest, db, config),
        "feed" => cli_feed(rest, db, config),
        "geometry" | "g" => cli_geometry(rest, db, config),
        "summary" | "s" => cli_summary(rest, db, config),
        "years" => cli_years(rest, db, config),
        "--help" | "-h" | "help" => {
            print_usage();
            Ok(())
        }
        "--version" | "-V" | "version" => {
            println!("breakdown {}", env!("CARGO_PKG_VERSION"));
            Ok(())
        }
        other => {
            print_usage();
            anyhow::bail!("Unknown command: {other}");
        }
    }
}

fn print_usage() {
    println!("Breakdown: annual budget usage charts");
    println!();
    println!("Usage: breakdown [command]");
    println!();
    println!("Commands:");
    println!("  (none)                        Launch interactive TUI");
    println!("  import <file>                 Import a feed (.json or .csv) as one year");
    println!("    --year <YYYY>               Year to store it under (default: from data.YYYY.json)");
    println!("    --currency <CUR>            Currency to read (default: BREAKDOWN_CURRENCY or GBP)");
    println!("    --zero-fill                 Treat budgets without that currency as zero spend");
    println!("  import-dir <dir>              Import every data.YYYY.json in a directory");
    println!("  feed <YYYY>                   Print a stored year as feed JSON");
    println!("  geometry <YYYY>               Print the chart geometry as JSON");
    println!("    --month <Jan..Dec|1..12>    Month for the spend-to-date line");
    println!("  summary <YYYY>                Print budget totals and monthly progress");
    println!("    --month <Jan..Dec|1..12>    Month to report (default: latest)");
    println!("  years                         List stored years");
    println!("  --help, -h                    Show this help");
    println!("  --version, -V                 Show version");
}

// ── Argument helpers ─────────────────────────────────────────

fn flag<'a>(args: &'a [String], name: &str) -> Option<&'a str> {
    args.windows(2)
        .find(|w| w[0] == name)
        .map(|w| w[1].as_str())
}

fn has_flag(args: &[String], name: &str) -> bool {
    args.iter().any(|a| a == name)
}

/// Flags that stand alone; every other `--flag` takes the next argument.
const SWITCHES: [&str; 1] = ["--zero-fill"];

/// First argument that is neither a flag nor a flag's value.
fn positional(args: &[String]) -> Option<&str> {
    let mut iter = args.iter();
    while let Some(arg) = iter.next() {
        if !arg.starts_with('-') {
            return Some(arg);
        }
        if !SWITCHES.contains(&arg.as_str()) {
            iter.next();
        }
    }
    None
}

fn currency_arg(args: &[String], config: &Config) -> String {
    flag(args, "--currency")
        .map(str::to_uppercase)
        .unwrap_or_else(|| config.currency.clone())
}

fn policy_arg(args: &[String], config: &Config) -> MissingCurrencyPolicy {
    if has_flag(args, "--zero-fill") {
        MissingCurrencyPolicy::ZeroFill
    } else {
        config.missing_currency
    }
}

fn year_arg(args: &[String], usage: &str) -> Result<i32> {
    let raw = positional(args).ok_or_else(|| anyhow::anyhow!("Usage: {usage}"))?;
    Ok(parse_year(raw)?)
}

fn month_arg(args: &[String]) -> Result<Option<usize>> {
    flag(args, "--month")
        .map(|m| {
            parse_month(m).ok_or_else(|| anyhow::anyhow!("Invalid month '{m}'. Use Jan..Dec or 1..12"))
        })
        .transpose()
}

/// Latest month with data: the current month for the current year,
/// December otherwise.
fn default_month(year: i32, today: (i32, usize)) -> usize {
    if year == today.0 {
        today.1
    } else {
        MONTHS - 1
    }
}

fn today() -> (i32, usize) {
    let now = chrono::Local::now();
    (now.year(), now.month0() as usize)
}

fn stored_records(db: &Database, year: i32, currency: &str) -> Result<Vec<BudgetRecord>> {
    let records = db.get_records(year, currency)?;
    if records.is_empty() {
        anyhow::bail!("No {currency} data stored for {year}. Import a feed first");
    }
    Ok(records)
}

// ── Commands ─────────────────────────────────────────────────

fn cli_import(args: &[String], db: &mut Database, config: &Config) -> Result<()> {
    let file = positional(args).ok_or_else(|| {
        anyhow::anyhow!("Usage: breakdown import <file> [--year YYYY] [--currency CUR] [--zero-fill]")
    })?;
    let expanded = shellexpand(file);
    let year = flag(args, "--year").map(parse_year).transpose()?;
    let currency = currency_arg(args, config);

    let (year, count) = import_file(
        db,
        Path::new(&expanded),
        year,
        &currency,
        policy_arg(args, config),
    )?;
    println!("Imported {count} budgets for {year} ({currency})");
    Ok(())
}

fn cli_import_dir(args: &[String], db: &mut Database, config: &Config) -> Result<()> {
    let dir = positional(args)
        .ok_or_else(|| anyhow::anyhow!("Usage: breakdown import-dir <dir> [--currency CUR]"))?;
    let expanded = shellexpand(dir);
    let currency = currency_arg(args, config);
    let policy = policy_arg(args, config);

    let found = feed::discover(Path::new(&expanded))?;
    if found.is_empty() {
        println!("No data.YYYY.json files in {expanded}");
        return Ok(());
    }
    for (year, path) in found {
        let (year, count) = import_file(db, &path, Some(year), &currency, policy)
            .with_context(|| format!("Failed to import {}", path.display()))?;
        println!("  {year}: {count} budgets");
    }
    Ok(())
}

fn cli_feed(args: &[String], db: &mut Database, config: &Config) -> Result<()> {
    let year = year_arg(args, "breakdown feed <YYYY> [--currency CUR]")?;
    let currency = currency_arg(args, config);
    let records = db.get_records(year, &currency)?;
    let feed = feed::to_feed(&records, &currency);
    println!("{}", serde_json::to_string_pretty(&feed)?);
    Ok(())
}

fn cli_geometry(args: &[String], db: &mut Database, config: &Config) -> Result<()> {
    let year = year_arg(args, "breakdown geometry <YYYY> [--month M] [--currency CUR]")?;
    let currency = currency_arg(args, config);
    let records = stored_records(db, year, &currency)?;

    let today = today();
    let current = match month_arg(args)? {
        Some(month) => Some(month),
        None if year == today.0 => Some(today.1),
        None => None,
    };

    let engine = BreakdownEngine::new(&records, Canvas::default())?;
    let breakdown = engine.breakdown(current)?;
    println!("{}", serde_json::to_string_pretty(&breakdown)?);
    Ok(())
}

fn cli_summary(args: &[String], db: &mut Database, config: &Config) -> Result<()> {
    let year = year_arg(args, "breakdown summary <YYYY> [--month M] [--currency CUR]")?;
    let currency = currency_arg(args, config);
    let records = stored_records(db, year, &currency)?;
    let month = month_arg(args)?.unwrap_or_else(|| default_month(year, today()));
    print!("{}", summary_text(&records, year, month, &currency)?);
    Ok(())
}

fn cli_years(args: &[String], db: &mut Database, config: &Config) -> Result<()> {
    let currency = currency_arg(args, config);
    let years = db.get_years(&currency)?;
    if years.is_empty() {
        println!("No {currency} data stored");
        return Ok(());
    }

    println!("{:<6} {:>8}", "Year", "Budgets");
    println!("{}", "─".repeat(15));
    for year in years {
        println!("{year:<6} {:>8}", db.record_count(year, &currency)?);
    }
    Ok(())
}

/// Plain-text report: annual totals, spend to date through `month`, and
/// every budget's progress for that month.
fn summary_text(
    records: &[BudgetRecord],
    year: i32,
    month: usize,
    currency: &str,
) -> Result<String> {
    let engine = BreakdownEngine::new(records, Canvas::default())?;
    let total = engine.total_line();
    let current = engine.current_line(month)?;
    let progress = month_progress(records, month)?;
    let canvas = engine.canvas();
    let money = |v| format_amount(v, currency);

    let mut out = String::new();
    writeln!(out, "Breakdown {year} ({currency}), through {}", month_label(month))?;
    writeln!(out, "{}", "─".repeat(56))?;
    writeln!(out, "  Annual budget:   {}", money(total.budget))?;
    writeln!(out, "  Spent:           {}", money(total.amount))?;
    writeln!(out, "  Left to spend:   {}", money(total.left_to_spend()))?;
    writeln!(out, "  Budget to date:  {}", money(current.budget))?;
    writeln!(out, "  Spent to date:   {}", money(current.amount))?;
    writeln!(
        out,
        "  Peak budget use: {}",
        format_percent(engine.highest_y(), canvas.height)
    )?;
    writeln!(out)?;
    writeln!(out, "{}:", month_label(month))?;
    for p in &progress {
        writeln!(
            out,
            "  {:<20} {:>12} / {:<12} {}",
            truncate(&p.name, 20),
            money(p.amount),
            money(p.budget),
            progress_label(p.label, currency)
        )?;
    }
    Ok(out)
}

#[cfg(test)]
#[path = "cli_tests.rs"]
mod tests;
