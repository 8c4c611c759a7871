use std::collections::HashMap;
use std::path::Path;
use std::sync::LazyLock;

use super::app::{App, InputMode, PendingAction, Screen};
use crate::db::Database;
use crate::feed::parse_year;
use crate::models::{month_label, parse_month};
use crate::run::{import_file, shellexpand};

pub(crate) struct Command {
    pub(crate) description: &'static str,
    pub(crate) run: fn(&str, &mut App, &mut Database) -> anyhow::Result<()>,
}

macro_rules! register_command {
    ($name:expr, $desc:expr, $func:expr, $registry:expr) => {{
        $registry.insert(
            $name,
            Command {
                description: $desc,
                run: $func,
            },
        );
    }};
}

pub(crate) static COMMANDS: LazyLock<HashMap<&str, Command>> = LazyLock::new(|| {
    let mut r: HashMap<&str, Command> = HashMap::new();

    register_command!("q", "Quit Breakdown", cmd_quit, r);
    register_command!("quit", "Quit Breakdown", cmd_quit, r);
    register_command!("c", "Go to Chart", cmd_chart, r);
    register_command!("chart", "Go to Chart", cmd_chart, r);
    register_command!("p", "Go to Progress", cmd_progress, r);
    register_command!("progress", "Go to Progress", cmd_progress, r);
    register_command!("d", "Go to Data", cmd_data, r);
    register_command!("data", "Go to Data", cmd_data, r);
    register_command!("help", "Show available commands", cmd_help, r);
    register_command!("h", "Show available commands", cmd_help, r);
    register_command!("year", "Show a stored year (e.g. :year 2023)", cmd_year, r);
    register_command!("y", "Show a stored year (e.g. :y 2023)", cmd_year, r);
    register_command!("month", "Set month (e.g. :month Mar or :month 3)", cmd_month, r);
    register_command!("m", "Set month (e.g. :m Mar)", cmd_month, r);
    register_command!("next-month", "Go to next month", cmd_next_month, r);
    register_command!("prev-month", "Go to previous month", cmd_prev_month, r);
    register_command!("next-year", "Go to next stored year", cmd_next_year, r);
    register_command!("prev-year", "Go to previous stored year", cmd_prev_year, r);
    register_command!(
        "aggregate",
        "Toggle month totals instead of per-budget columns",
        cmd_aggregate,
        r
    );
    register_command!("a", "Toggle aggregate chart", cmd_aggregate, r);
    register_command!(
        "toggle",
        "Show/hide a budget on the chart (e.g. :toggle Bills)",
        cmd_toggle,
        r
    );
    register_command!("select-all", "Show every budget on the chart", cmd_select_all, r);
    register_command!("select-none", "Hide every budget", cmd_select_none, r);
    register_command!(
        "currency",
        "Switch currency (e.g. :currency EUR)",
        cmd_currency,
        r
    );
    register_command!(
        "import",
        "Import a feed file (e.g. :import ~/data.2024.json)",
        cmd_import,
        r
    );
    register_command!("i", "Import a feed file", cmd_import, r);
    register_command!(
        "delete-year",
        "Delete the displayed year",
        cmd_delete_year,
        r
    );

    r
});

pub(crate) fn handle_command(input: &str, app: &mut App, db: &mut Database) -> anyhow::Result<()> {
    let trimmed = input.trim();
    let mut parts = trimmed.splitn(2, ' ');
    let cmd_name = parts.next().unwrap_or("");
    let args = parts.next().unwrap_or("").trim();

    if let Some(cmd) = COMMANDS.get(cmd_name) {
        tracing::debug!(command = cmd_name, args, "running command");
        (cmd.run)(args, app, db)?;
    } else {
        let suggestion = find_closest(cmd_name);
        app.set_status(format!(
            "Unknown command: :{cmd_name}. Did you mean :{suggestion}?"
        ));
    }

    Ok(())
}

fn find_closest(input: &str) -> String {
    COMMANDS
        .keys()
        .filter(|k| k.len() > 1)
        .min_by_key(|k| levenshtein(input, k))
        .unwrap_or(&"help")
        .to_string()
}

fn levenshtein(a: &str, b: &str) -> usize {
    let (a, b) = (a.as_bytes(), b.as_bytes());
    let mut prev: Vec<usize> = (0..=b.len()).collect();
    let mut curr = vec![0; b.len() + 1];

    for i in 1..=a.len() {
        curr[0] = i;
        for j in 1..=b.len() {
            let cost = if a[i - 1] == b[j - 1] { 0 } else { 1 };
            curr[j] = (prev[j] + 1).min(curr[j - 1] + 1).min(prev[j - 1] + cost);
        }
        std::mem::swap(&mut prev, &mut curr);
    }

    prev[b.len()]
}

// ── Command implementations ──────────────────────────────────

fn cmd_quit(_args: &str, app: &mut App, _db: &mut Database) -> anyhow::Result<()> {
    app.running = false;
    Ok(())
}

fn cmd_chart(_args: &str, app: &mut App, _db: &mut Database) -> anyhow::Result<()> {
    app.screen = Screen::Chart;
    Ok(())
}

fn cmd_progress(_args: &str, app: &mut App, _db: &mut Database) -> anyhow::Result<()> {
    app.screen = Screen::Progress;
    Ok(())
}

fn cmd_data(_args: &str, app: &mut App, _db: &mut Database) -> anyhow::Result<()> {
    app.screen = Screen::Data;
    Ok(())
}

fn cmd_help(_args: &str, app: &mut App, _db: &mut Database) -> anyhow::Result<()> {
    app.show_help = true;
    Ok(())
}

fn cmd_year(args: &str, app: &mut App, db: &mut Database) -> anyhow::Result<()> {
    let year = match parse_year(args) {
        Ok(year) => year,
        Err(e) => {
            app.set_status(e.to_string());
            return Ok(());
        }
    };
    if !app.years.contains(&year) {
        app.set_status(format!("No {} data stored for {year}", app.currency));
        return Ok(());
    }
    app.load_year(db, year)?;
    app.set_status(format!("Year: {year}"));
    Ok(())
}

fn cmd_month(args: &str, app: &mut App, _db: &mut Database) -> anyhow::Result<()> {
    let Some(month) = parse_month(args) else {
        app.set_status("Invalid month. Use Jan..Dec or 1..12");
        return Ok(());
    };
    if app.set_month(month) {
        app.set_status(format!("Month: {} {}", month_label(month), app.year));
    } else {
        app.set_status(format!(
            "{} {} has no data yet",
            month_label(month),
            app.year
        ));
    }
    Ok(())
}

fn cmd_next_month(_args: &str, app: &mut App, _db: &mut Database) -> anyhow::Result<()> {
    advance_month(app, 1);
    Ok(())
}

fn cmd_prev_month(_args: &str, app: &mut App, _db: &mut Database) -> anyhow::Result<()> {
    advance_month(app, -1);
    Ok(())
}

fn advance_month(app: &mut App, delta: isize) {
    if app.shift_month(delta) {
        app.set_status(format!("Month: {} {}", month_label(app.month), app.year));
    }
}

fn cmd_next_year(_args: &str, app: &mut App, db: &mut Database) -> anyhow::Result<()> {
    advance_year(app, db, 1)
}

fn cmd_prev_year(_args: &str, app: &mut App, db: &mut Database) -> anyhow::Result<()> {
    advance_year(app, db, -1)
}

fn advance_year(app: &mut App, db: &mut Database, delta: isize) -> anyhow::Result<()> {
    if app.shift_year(db, delta)? {
        app.set_status(format!("Year: {}", app.year));
    }
    Ok(())
}

fn cmd_aggregate(_args: &str, app: &mut App, _db: &mut Database) -> anyhow::Result<()> {
    app.show_aggregate = !app.show_aggregate;
    app.set_status(if app.show_aggregate {
        "Showing month totals"
    } else {
        "Showing budgets"
    });
    Ok(())
}

fn cmd_toggle(args: &str, app: &mut App, _db: &mut Database) -> anyhow::Result<()> {
    if args.is_empty() {
        app.set_status("Usage: :toggle <budget name>");
        return Ok(());
    }
    let found = app
        .records
        .iter()
        .find(|r| r.name.eq_ignore_ascii_case(args))
        .map(|r| r.name.clone());
    match found {
        Some(name) => {
            app.toggle_budget(&name);
            let state = if app.is_selected(&name) { "shown" } else { "hidden" };
            app.set_status(format!("{name} {state}"));
        }
        None => app.set_status(format!("No budget named '{args}'")),
    }
    Ok(())
}

fn cmd_select_all(_args: &str, app: &mut App, _db: &mut Database) -> anyhow::Result<()> {
    app.select_all();
    app.set_status("All budgets shown");
    Ok(())
}

fn cmd_select_none(_args: &str, app: &mut App, _db: &mut Database) -> anyhow::Result<()> {
    app.select_none();
    app.set_status("All budgets hidden");
    Ok(())
}

fn cmd_currency(args: &str, app: &mut App, db: &mut Database) -> anyhow::Result<()> {
    let code = args.trim().to_uppercase();
    if code.len() != 3 || !code.chars().all(|c| c.is_ascii_alphabetic()) {
        app.set_status("Usage: :currency <ISO code, e.g. GBP>");
        return Ok(());
    }
    app.currency = code;
    app.refresh_all(db)?;
    app.set_status(format!(
        "Currency: {} ({} years stored)",
        app.currency,
        app.years.len()
    ));
    Ok(())
}

fn cmd_import(args: &str, app: &mut App, db: &mut Database) -> anyhow::Result<()> {
    let mut parts = args.split_whitespace();
    let Some(raw_path) = parts.next() else {
        app.set_status("Usage: :import <file> [YYYY]");
        return Ok(());
    };
    let year = match parts.next().map(parse_year).transpose() {
        Ok(year) => year,
        Err(e) => {
            app.set_status(e.to_string());
            return Ok(());
        }
    };

    let expanded = shellexpand(raw_path);
    let path = Path::new(&expanded);
    match import_file(db, path, year, &app.currency, app.missing_currency) {
        Ok((year, count)) => {
            app.refresh_all(db)?;
            app.load_year(db, year)?;
            app.set_status(format!("Imported {count} budgets for {year}"));
        }
        Err(e) => {
            tracing::warn!(path = %path.display(), error = %e, "import failed");
            app.set_status(format!("Import failed: {e:#}"));
        }
    }
    Ok(())
}

fn cmd_delete_year(_args: &str, app: &mut App, _db: &mut Database) -> anyhow::Result<()> {
    if app.records.is_empty() {
        app.set_status(format!("Nothing stored for {}", app.year));
        return Ok(());
    }
    app.confirm_message = format!(
        "Delete {} budgets for {} ({})?",
        app.records.len(),
        app.year,
        app.currency
    );
    app.pending_action = Some(PendingAction::DeleteYear { year: app.year });
    app.input_mode = InputMode::Confirm;
    Ok(())
}

#[cfg(test)]
#[path = "commands_tests.rs"]
mod tests;
