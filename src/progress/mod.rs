use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;
use serde::Serialize;

use crate::error::{BreakdownError, Result};
use crate::models::{BudgetRecord, MONTHS};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub(crate) enum ProgressLevel {
    Success,
    Info,
    Warning,
    Danger,
}

impl ProgressLevel {
    fn from_percentage(percentage: Decimal) -> Self {
        if percentage >= Decimal::ONE_HUNDRED {
            Self::Danger
        } else if percentage > Decimal::from(90) {
            Self::Warning
        } else if percentage > Decimal::from(80) {
            Self::Info
        } else {
            Self::Success
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "status", content = "amount", rename_all = "camelCase")]
pub(crate) enum ProgressLabel {
    Over(Decimal),
    Hit,
    Left(Decimal),
}

/// How one budget is doing in one month.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct MonthProgress {
    pub name: String,
    pub month: usize,
    pub budget: Decimal,
    pub amount: Decimal,
    /// `None` when the budget is zero.
    pub percentage: Option<Decimal>,
    pub level: ProgressLevel,
    pub label: ProgressLabel,
}

impl MonthProgress {
    pub(crate) fn for_record(record: &BudgetRecord, month: usize) -> Result<Self> {
        let amount = *record
            .monthly_amount
            .get(month)
            .ok_or(BreakdownError::InvalidMonth(month))?;
        let budget = record.monthly_budget;
        let difference = amount.checked_sub(budget).unwrap_or(Decimal::MIN);

        // A zero budget, or one so small the ratio leaves the Decimal range,
        // has no meaningful percentage.
        let percentage = if budget.is_zero() {
            None
        } else {
            amount
                .checked_div(budget)
                .and_then(|ratio| ratio.checked_mul(Decimal::ONE_HUNDRED))
        };

        let (level, label) = match percentage {
            None if amount > Decimal::ZERO => {
                (ProgressLevel::Danger, ProgressLabel::Over(difference))
            }
            None => (ProgressLevel::Success, ProgressLabel::Left(-difference)),
            Some(p) => {
                let label = if p > Decimal::ONE_HUNDRED {
                    ProgressLabel::Over(difference)
                } else if p == Decimal::ONE_HUNDRED {
                    ProgressLabel::Hit
                } else {
                    ProgressLabel::Left(-difference)
                };
                (ProgressLevel::from_percentage(p), label)
            }
        };

        Ok(Self {
            name: record.name.clone(),
            month,
            budget,
            amount,
            percentage,
            level,
            label,
        })
    }

    /// Bar fill between 0.0 and 1.0.
    pub(crate) fn fill_ratio(&self) -> f64 {
        match self.percentage {
            Some(p) => (p / Decimal::ONE_HUNDRED)
                .to_f64()
                .unwrap_or(0.0)
                .clamp(0.0, 1.0),
            None if self.amount > Decimal::ZERO => 1.0,
            None => 0.0,
        }
    }
}

/// Progress of every record for `month`, in record order.
pub(crate) fn month_progress(records: &[BudgetRecord], month: usize) -> Result<Vec<MonthProgress>> {
    if month >= MONTHS {
        return Err(BreakdownError::InvalidMonth(month));
    }
    records
        .iter()
        .map(|r| MonthProgress::for_record(r, month))
        .collect()
}
