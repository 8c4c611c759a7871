use rust_decimal::Decimal;
use serde::Serialize;

use crate::error::{BreakdownError, Result};

pub(crate) const MONTHS: usize = 12;

pub(crate) const MONTH_LABELS: [&str; MONTHS] = [
    "Jan", "Feb", "Mar", "Apr", "May", "Jun", "Jul", "Aug", "Sep", "Oct", "Nov", "Dec",
];

/// One budgeted category for one year.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct BudgetRecord {
    pub name: String,
    pub categories: Vec<String>,
    pub monthly_budget: Decimal,
    /// Actual spend per calendar month, index 0 = January.
    pub monthly_amount: [Decimal; MONTHS],
}

impl BudgetRecord {
    /// Build a record, rejecting negative budgets and month sequences that
    /// are not exactly twelve long.
    pub(crate) fn new(
        name: String,
        categories: Vec<String>,
        monthly_budget: Decimal,
        monthly_amount: Vec<Decimal>,
    ) -> Result<Self> {
        if monthly_budget < Decimal::ZERO {
            return Err(BreakdownError::NegativeBudget {
                name,
                amount: monthly_budget,
            });
        }
        let found = monthly_amount.len();
        let monthly_amount: [Decimal; MONTHS] = monthly_amount
            .try_into()
            .map_err(|_| BreakdownError::MonthCount {
                name: name.clone(),
                found,
            })?;
        Ok(Self {
            name,
            categories,
            monthly_budget,
            monthly_amount,
        })
    }

    pub(crate) fn annual_budget(&self) -> Decimal {
        self.monthly_budget * Decimal::from(MONTHS)
    }

    pub(crate) fn annual_amount(&self) -> Decimal {
        self.monthly_amount.iter().copied().sum()
    }

    /// Spend from January up to and including `month`.
    pub(crate) fn amount_to_date(&self, month: usize) -> Decimal {
        self.monthly_amount
            .iter()
            .take(month.saturating_add(1))
            .copied()
            .sum()
    }

    pub(crate) fn description(&self) -> String {
        self.categories.join(", ")
    }
}

pub(crate) fn month_label(month: usize) -> &'static str {
    MONTH_LABELS.get(month).copied().unwrap_or("???")
}

/// Parse a month given as a label ("Jan", "january") or a 1-based number.
/// Returns the 0-based month index.
pub(crate) fn parse_month(s: &str) -> Option<usize> {
    let trimmed = s.trim();
    if let Ok(n) = trimmed.parse::<usize>() {
        return (1..=MONTHS).contains(&n).then(|| n - 1);
    }
    let lower = trimmed.to_lowercase();
    if lower.len() < 3 {
        return None;
    }
    MONTH_LABELS
        .iter()
        .position(|label| lower.starts_with(&label.to_lowercase()))
}
