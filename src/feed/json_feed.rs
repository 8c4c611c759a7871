use std::collections::BTreeMap;
use std::str::FromStr;

use anyhow::Context;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::{BreakdownError, Result};
use crate::models::{BudgetRecord, MONTHS};

/// What to do when a feed record has no month sequence for the selected
/// currency.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub(crate) enum MissingCurrencyPolicy {
    /// Fail the whole conversion.
    #[default]
    Reject,
    /// Treat the record as twelve months of zero spend.
    ZeroFill,
}

impl FromStr for MissingCurrencyPolicy {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> anyhow::Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "reject" | "error" => Ok(Self::Reject),
            "zero" | "zero-fill" | "zerofill" => Ok(Self::ZeroFill),
            other => anyhow::bail!("Unknown missing-currency policy: {other} (use reject or zero)"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct FeedBudget {
    pub amount: Decimal,
    pub currency: String,
}

/// One budget as it appears in a yearly JSON feed.
///
/// ```json
/// {
///   "name": "Bills",
///   "categories": ["Utilities", "Phone"],
///   "monthlyBudget": { "amount": 250, "currency": "GBP" },
///   "monthlyAmount": { "GBP": [240.5, 251, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0] }
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct FeedRecord {
    pub name: String,
    #[serde(default)]
    pub categories: Vec<String>,
    pub monthly_budget: FeedBudget,
    #[serde(default)]
    pub monthly_amount: BTreeMap<String, Vec<Decimal>>,
}

impl FeedRecord {
    pub(crate) fn to_record(
        &self,
        currency: &str,
        policy: MissingCurrencyPolicy,
    ) -> Result<BudgetRecord> {
        let amounts = match (self.monthly_amount.get(currency), policy) {
            (Some(amounts), _) => amounts.clone(),
            (None, MissingCurrencyPolicy::ZeroFill) => vec![Decimal::ZERO; MONTHS],
            (None, MissingCurrencyPolicy::Reject) => {
                return Err(BreakdownError::MissingCurrency {
                    name: self.name.clone(),
                    currency: currency.to_string(),
                })
            }
        };
        if self.monthly_budget.currency != currency {
            tracing::warn!(
                budget = %self.name,
                budget_currency = %self.monthly_budget.currency,
                currency,
                "budget currency differs from spend currency"
            );
        }
        BudgetRecord::new(
            self.name.clone(),
            self.categories.clone(),
            self.monthly_budget.amount,
            amounts,
        )
    }

    pub(crate) fn from_record(record: &BudgetRecord, currency: &str) -> Self {
        let mut monthly_amount = BTreeMap::new();
        monthly_amount.insert(currency.to_string(), record.monthly_amount.to_vec());
        Self {
            name: record.name.clone(),
            categories: record.categories.clone(),
            monthly_budget: FeedBudget {
                amount: record.monthly_budget,
                currency: currency.to_string(),
            },
            monthly_amount,
        }
    }
}

pub(crate) fn parse_json_feed(text: &str) -> anyhow::Result<Vec<FeedRecord>> {
    serde_json::from_str(text).context("Failed to parse budget feed JSON")
}

/// Convert a whole feed. The first invalid record fails the conversion.
pub(crate) fn to_records(
    feed: &[FeedRecord],
    currency: &str,
    policy: MissingCurrencyPolicy,
) -> Result<Vec<BudgetRecord>> {
    feed.iter().map(|f| f.to_record(currency, policy)).collect()
}

pub(crate) fn to_feed(records: &[BudgetRecord], currency: &str) -> Vec<FeedRecord> {
    records
        .iter()
        .map(|r| FeedRecord::from_record(r, currency))
        .collect()
}
