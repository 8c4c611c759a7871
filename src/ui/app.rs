use anyhow::Result;
use chrono::Datelike;
use std::collections::HashSet;

use crate::db::Database;
use crate::engine::{color_index, first_seen_names, BreakdownEngine, Canvas};
use crate::error::BreakdownError;
use crate::feed::{self, MissingCurrencyPolicy};
use crate::models::{Breakdown, BudgetRecord, MONTHS};
use crate::progress::{month_progress, MonthProgress};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Screen {
    Chart,
    Progress,
    Data,
}

impl Screen {
    pub(crate) fn all() -> &'static [Screen] {
        &[Self::Chart, Self::Progress, Self::Data]
    }
}

impl std::fmt::Display for Screen {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Chart => write!(f, "Chart"),
            Self::Progress => write!(f, "Progress"),
            Self::Data => write!(f, "Data"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum InputMode {
    Normal,
    Command,
    Confirm,
}

impl std::fmt::Display for InputMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Normal => write!(f, "NORMAL"),
            Self::Command => write!(f, "COMMAND"),
            Self::Confirm => write!(f, "CONFIRM"),
        }
    }
}

/// Pending action that requires user confirmation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum PendingAction {
    DeleteYear { year: i32 },
}

pub(crate) struct App {
    pub(crate) running: bool,
    pub(crate) screen: Screen,
    pub(crate) input_mode: InputMode,
    pub(crate) command_input: String,
    pub(crate) status_message: String,
    pub(crate) show_help: bool,
    pub(crate) visible_rows: usize,

    pub(crate) currency: String,
    pub(crate) missing_currency: MissingCurrencyPolicy,
    pub(crate) today_year: i32,
    pub(crate) today_month: usize,

    // Selected period
    pub(crate) years: Vec<i32>,
    pub(crate) year: i32,
    pub(crate) month: usize,

    // Year data
    pub(crate) records: Vec<BudgetRecord>,
    pub(crate) selected: HashSet<String>,
    /// First-seen order over the whole year, so palette slots survive
    /// toggling budgets off.
    pub(crate) budget_names: Vec<String>,
    pub(crate) show_aggregate: bool,
    pub(crate) progress: Vec<MonthProgress>,
    pub(crate) load_error: Option<String>,

    // Lists
    pub(crate) progress_index: usize,
    pub(crate) progress_scroll: usize,
    pub(crate) data_scroll: usize,

    pub(crate) pending_action: Option<PendingAction>,
    pub(crate) confirm_message: String,
}

impl App {
    pub(crate) fn new(currency: &str, missing_currency: MissingCurrencyPolicy) -> Self {
        let now = chrono::Local::now();
        Self::with_today(
            currency,
            missing_currency,
            now.year(),
            now.month0() as usize,
        )
    }

    pub(crate) fn with_today(
        currency: &str,
        missing_currency: MissingCurrencyPolicy,
        today_year: i32,
        today_month: usize,
    ) -> Self {
        Self {
            running: true,
            screen: Screen::Chart,
            input_mode: InputMode::Normal,
            command_input: String::new(),
            status_message: String::new(),
            show_help: false,
            visible_rows: 20,
            currency: currency.to_string(),
            missing_currency,
            today_year,
            today_month: today_month.min(MONTHS - 1),
            years: Vec::new(),
            year: today_year,
            month: today_month.min(MONTHS - 1),
            records: Vec::new(),
            selected: HashSet::new(),
            budget_names: Vec::new(),
            show_aggregate: false,
            progress: Vec::new(),
            load_error: None,
            progress_index: 0,
            progress_scroll: 0,
            data_scroll: 0,
            pending_action: None,
            confirm_message: String::new(),
        }
    }

    pub(crate) fn set_status(&mut self, msg: impl Into<String>) {
        self.status_message = msg.into();
    }

    // ── Loading ───────────────────────────────────────────────

    /// Reload the year list and show the current year if it has data,
    /// otherwise the newest stored year.
    pub(crate) fn refresh_all(&mut self, db: &Database) -> Result<()> {
        self.years = db.get_years(&self.currency)?;
        let year = if self.years.contains(&self.year) {
            self.year
        } else if self.years.contains(&self.today_year) {
            self.today_year
        } else {
            self.years.first().copied().unwrap_or(self.today_year)
        };
        self.load_year(db, year)
    }

    /// Switch to `year`. Selection resets to every budget and the month
    /// jumps to the latest one available for that year.
    pub(crate) fn load_year(&mut self, db: &Database, year: i32) -> Result<()> {
        self.year = year;
        self.records = db.get_records(year, &self.currency)?;
        self.selected = self.records.iter().map(|r| r.name.clone()).collect();
        self.budget_names = first_seen_names(&self.records);
        self.month = self.month_count() - 1;
        self.progress_index = 0;
        self.progress_scroll = 0;
        self.data_scroll = 0;
        self.refresh_progress();
        tracing::debug!(year, records = self.records.len(), "loaded year");
        Ok(())
    }

    pub(crate) fn refresh_progress(&mut self) {
        match month_progress(&self.records, self.month) {
            Ok(progress) => {
                self.progress = progress;
                self.load_error = None;
            }
            Err(e) => {
                self.progress.clear();
                self.load_error = Some(e.to_string());
            }
        }
    }

    // ── Period ────────────────────────────────────────────────

    /// Months that can be picked for the selected year. The current year
    /// stops at the current month.
    pub(crate) fn month_count(&self) -> usize {
        if self.year == self.today_year {
            self.today_month + 1
        } else {
            MONTHS
        }
    }

    pub(crate) fn set_month(&mut self, month: usize) -> bool {
        if month >= self.month_count() {
            return false;
        }
        self.month = month;
        self.refresh_progress();
        true
    }

    pub(crate) fn shift_month(&mut self, delta: isize) -> bool {
        match self.month.checked_add_signed(delta) {
            Some(month) => self.set_month(month),
            None => false,
        }
    }

    /// Step through stored years. Positive `delta` moves to a newer year.
    pub(crate) fn shift_year(&mut self, db: &Database, delta: isize) -> Result<bool> {
        let Some(idx) = self.years.iter().position(|y| *y == self.year) else {
            return match self.years.first().copied() {
                Some(year) => self.load_year(db, year).map(|_| true),
                None => Ok(false),
            };
        };
        // `years` is newest first.
        let target = idx.checked_add_signed(-delta).and_then(|i| self.years.get(i));
        match target.copied() {
            Some(year) => self.load_year(db, year).map(|_| true),
            None => Ok(false),
        }
    }

    pub(crate) fn show_current(&self) -> bool {
        self.year == self.today_year
    }

    // ── Selection ─────────────────────────────────────────────

    pub(crate) fn toggle_budget(&mut self, name: &str) {
        if !self.selected.remove(name) {
            self.selected.insert(name.to_string());
        }
    }

    pub(crate) fn toggle_at_cursor(&mut self) -> Option<String> {
        let name = self.records.get(self.progress_index)?.name.clone();
        self.toggle_budget(&name);
        Some(name)
    }

    pub(crate) fn select_all(&mut self) {
        self.selected = self.records.iter().map(|r| r.name.clone()).collect();
    }

    pub(crate) fn select_none(&mut self) {
        self.selected.clear();
    }

    pub(crate) fn is_selected(&self, name: &str) -> bool {
        self.selected.contains(name)
    }

    pub(crate) fn selected_records(&self) -> Vec<BudgetRecord> {
        self.records
            .iter()
            .filter(|r| self.selected.contains(&r.name))
            .cloned()
            .collect()
    }

    /// Palette slot from the whole year's first-seen order, so hiding a
    /// budget leaves the others' colours alone.
    pub(crate) fn color_slot(&self, name: &str) -> usize {
        color_index(&self.budget_names, name).unwrap_or(0)
    }

    // ── Derived views ─────────────────────────────────────────

    /// Chart geometry for the selected budgets.
    pub(crate) fn breakdown(&self) -> std::result::Result<Breakdown, BreakdownError> {
        let records = self.selected_records();
        let engine = BreakdownEngine::new(&records, Canvas::default())?;
        let current = self.show_current().then_some(self.month);
        engine.breakdown(current)
    }

    /// The year's records in the JSON feed shape, pretty-printed.
    pub(crate) fn feed_json(&self) -> String {
        let feed = feed::to_feed(&self.records, &self.currency);
        serde_json::to_string_pretty(&feed).unwrap_or_else(|e| format!("<{e}>"))
    }

    pub(crate) fn progress_page(&self) -> usize {
        self.visible_rows.saturating_sub(2).max(1)
    }
}

#[cfg(test)]
#[path = "app_tests.rs"]
mod tests;
