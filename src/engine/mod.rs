//! Chart geometry for the annual budget breakdown.
//!
//! Every budget gets a column whose width is its share of the total monthly
//! budget. Spend is stacked month by month inside that column so that the
//! *area* of each rectangle, not its height, is proportional to the spend
//! relative to the total annual budget:
//!
//! ```text
//! area = amount / total_budget * canvas.width * canvas.height
//! ```
//!
//! A budget that spends exactly its allocation fills its column to
//! `canvas.height`. Nothing here is cached; the engine borrows the records
//! and recomputes on every call.

use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;

use crate::error::{BreakdownError, Result};
use crate::models::{
    AnnualBudgetRect, AxisBounds, Breakdown, BudgetRecord, MonthGroup, MonthlyChartRect,
    RectKind, SummaryKind, SummaryLine, MONTHS,
};

/// Logical drawing area. Defaults to 100x100, i.e. percent of budget on both
/// axes.
#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) struct Canvas {
    pub width: f64,
    pub height: f64,
}

impl Canvas {
    pub(crate) fn new(width: f64, height: f64) -> Result<Self> {
        let valid = |v: f64| v.is_finite() && v > 0.0;
        if !valid(width) || !valid(height) {
            return Err(BreakdownError::InvalidCanvas { width, height });
        }
        Ok(Self { width, height })
    }

    fn area(&self) -> f64 {
        self.width * self.height
    }
}

impl Default for Canvas {
    fn default() -> Self {
        Self {
            width: 100.0,
            height: 100.0,
        }
    }
}

/// Column placement of one budget: `(x_start, x_length)`.
type Column = (f64, f64);

pub(crate) struct BreakdownEngine<'a> {
    records: &'a [BudgetRecord],
    canvas: Canvas,
    total_budget: Decimal,
    total_amount: Decimal,
    budget_names: Vec<String>,
}

impl<'a> BreakdownEngine<'a> {
    /// Precompute the year's totals.
    ///
    /// Fails with [`BreakdownError::NoBudget`] when the records add up to a
    /// zero annual budget (this includes an empty list), since every
    /// proportion on the chart divides by it.
    pub(crate) fn new(records: &'a [BudgetRecord], canvas: Canvas) -> Result<Self> {
        let total_budget: Decimal = records.iter().map(BudgetRecord::annual_budget).sum();
        if total_budget <= Decimal::ZERO {
            return Err(BreakdownError::NoBudget);
        }
        let total_amount: Decimal = records.iter().map(BudgetRecord::annual_amount).sum();

        Ok(Self {
            records,
            canvas,
            total_budget,
            total_amount,
            budget_names: first_seen_names(records),
        })
    }

    pub(crate) fn canvas(&self) -> Canvas {
        self.canvas
    }

    pub(crate) fn total_budget(&self) -> Decimal {
        self.total_budget
    }

    pub(crate) fn total_amount(&self) -> Decimal {
        self.total_amount
    }

    pub(crate) fn budget_names(&self) -> &[String] {
        &self.budget_names
    }

    /// Palette slot for a budget, by first-seen order. Callers wrap it
    /// modulo their palette length.
    pub(crate) fn color_index(&self, name: &str) -> Option<usize> {
        color_index(&self.budget_names, name)
    }

    /// One full-height column per record, in input order.
    pub(crate) fn annual_rects(&self) -> Vec<AnnualBudgetRect> {
        self.records
            .iter()
            .zip(self.columns())
            .map(|(record, (x_start, x_length))| AnnualBudgetRect {
                name: record.name.clone(),
                categories: record.categories.clone(),
                monthly_budget: record.monthly_budget,
                amount: record.annual_amount(),
                x_start,
                x_length,
                y_start: 0.0,
                y_length: self.canvas.height,
            })
            .collect()
    }

    /// Twelve stacked rectangles per record, record-major.
    pub(crate) fn chart_rects(&self) -> Vec<MonthlyChartRect> {
        let mut rects = Vec::with_capacity(self.records.len() * MONTHS);

        for (record, (x_start, x_length)) in self.records.iter().zip(self.columns()) {
            let mut y_cursor = 0.0;
            for (month, &amount) in record.monthly_amount.iter().enumerate() {
                let y_length = self.height_of(amount, x_length);
                rects.push(MonthlyChartRect {
                    kind: RectKind::PerRecord {
                        name: record.name.clone(),
                        categories: record.categories.clone(),
                    },
                    monthly_budget: record.monthly_budget,
                    month,
                    amount,
                    x_start,
                    x_length,
                    y_start: y_cursor,
                    y_length,
                });
                y_cursor += y_length;
            }
        }

        rects
    }

    /// Chart rectangles grouped by month, each group closed by a full-width
    /// month total. Month totals stack on their own cursor.
    pub(crate) fn monthly_chart_rects(&self) -> Vec<MonthGroup> {
        let mut by_month: Vec<Vec<MonthlyChartRect>> = vec![Vec::new(); MONTHS];
        for rect in self.chart_rects() {
            if let Some(group) = by_month.get_mut(rect.month) {
                group.push(rect);
            }
        }

        let mut y_cursor = 0.0;
        by_month
            .into_iter()
            .enumerate()
            .map(|(month, rects)| {
                let monthly_budget: Decimal = rects.iter().map(|r| r.monthly_budget).sum();
                let amount: Decimal = rects.iter().map(|r| r.amount).sum();
                let y_length = self.height_of(amount, self.canvas.width);
                let total = MonthlyChartRect {
                    kind: RectKind::MonthTotal,
                    monthly_budget,
                    month,
                    amount,
                    x_start: 0.0,
                    x_length: self.canvas.width,
                    y_start: y_cursor,
                    y_length,
                };
                y_cursor += y_length;
                MonthGroup {
                    month,
                    rects,
                    total,
                }
            })
            .collect()
    }

    /// Highest cumulative point any single budget reaches during the year.
    /// Never below zero.
    pub(crate) fn highest_y(&self) -> f64 {
        self.cumulative_extremes().1
    }

    /// Lowest cumulative point any single budget reaches during the year.
    /// Never above zero.
    pub(crate) fn lowest_y(&self) -> f64 {
        self.cumulative_extremes().0
    }

    pub(crate) fn axis_bounds(&self) -> AxisBounds {
        let label_step = self.canvas.height / 4.0;
        let (lowest, highest) = self.cumulative_extremes();
        let min = lowest.min(0.0);
        let max = highest.max(self.canvas.height);
        AxisBounds {
            min: (min / label_step).floor() * label_step,
            max: (max / label_step).ceil() * label_step,
            tick: self.canvas.height / MONTHS as f64,
            label_step,
        }
    }

    /// The annual budget line, sitting at the top of the nominal canvas.
    pub(crate) fn total_line(&self) -> SummaryLine {
        SummaryLine {
            kind: SummaryKind::Total,
            budget: self.total_budget,
            amount: self.total_amount,
            y: self.canvas.height,
        }
    }

    /// Budget available up to the end of `month`, against spend to date.
    pub(crate) fn current_line(&self, month: usize) -> Result<SummaryLine> {
        if month >= MONTHS {
            return Err(BreakdownError::InvalidMonth(month));
        }
        let budget = self.total_budget / Decimal::from(MONTHS) * Decimal::from(month + 1);
        let amount: Decimal = self.records.iter().map(|r| r.amount_to_date(month)).sum();
        Ok(SummaryLine {
            kind: SummaryKind::Current,
            budget,
            amount,
            y: to_f64(budget) / to_f64(self.total_budget) * self.canvas.height,
        })
    }

    /// Bundle the whole chart. `current_month` adds the spend-to-date line.
    pub(crate) fn breakdown(&self, current_month: Option<usize>) -> Result<Breakdown> {
        let current = current_month.map(|m| self.current_line(m)).transpose()?;
        let (lowest_y, highest_y) = self.cumulative_extremes();
        Ok(Breakdown {
            total_budget: self.total_budget,
            total_amount: self.total_amount,
            highest_y,
            lowest_y,
            axis: self.axis_bounds(),
            budget_names: self.budget_names.clone(),
            budgets: self.annual_rects(),
            months: self.monthly_chart_rects(),
            total: self.total_line(),
            current,
        })
    }

    /// Column placement shared by the annual and monthly passes, so both
    /// produce identical X coordinates.
    fn columns(&self) -> Vec<Column> {
        let monthly_total = to_f64(self.total_budget) / MONTHS as f64;
        let mut cursor: Column = (0.0, 0.0);
        self.records
            .iter()
            .map(|record| {
                let x_start = cursor.0 + cursor.1;
                let x_length = to_f64(record.monthly_budget) / monthly_total * self.canvas.width;
                cursor = (x_start, x_length);
                cursor
            })
            .collect()
    }

    /// Height that gives a rectangle of width `x_length` an area
    /// proportional to `amount`. Zero-width columns get zero height.
    fn height_of(&self, amount: Decimal, x_length: f64) -> f64 {
        if x_length <= 0.0 {
            return 0.0;
        }
        to_f64(amount) / to_f64(self.total_budget) * self.canvas.area() / x_length
    }

    /// `(lowest, highest)` cumulative heights over all records.
    fn cumulative_extremes(&self) -> (f64, f64) {
        let mut lowest = 0.0_f64;
        let mut highest = 0.0_f64;

        for (record, (_, x_length)) in self.records.iter().zip(self.columns()) {
            if x_length <= 0.0 {
                continue;
            }
            let mut running = Decimal::ZERO;
            let mut trough = Decimal::ZERO;
            let mut peak = Decimal::ZERO;
            for &amount in &record.monthly_amount {
                running += amount;
                trough = trough.min(running);
                peak = peak.max(running);
            }
            lowest = lowest.min(self.height_of(trough, x_length));
            highest = highest.max(self.height_of(peak, x_length));
        }

        (lowest, highest)
    }
}

/// Position of `name` in a first-seen name list.
pub(crate) fn color_index(names: &[String], name: &str) -> Option<usize> {
    names.iter().position(|n| n == name)
}

/// Distinct record names in first-seen order.
pub(crate) fn first_seen_names(records: &[BudgetRecord]) -> Vec<String> {
    let mut names: Vec<String> = Vec::new();
    for record in records {
        if !names.contains(&record.name) {
            names.push(record.name.clone());
        }
    }
    names
}

fn to_f64(value: Decimal) -> f64 {
    value.to_f64().unwrap_or(0.0)
}
