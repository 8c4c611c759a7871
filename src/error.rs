//! Validation and geometry errors.
//!
//! Storage, I/O and terminal failures stay in `anyhow` at the application
//! layer; this enum only covers problems with the budget data itself.

use rust_decimal::Decimal;
use thiserror::Error;

pub(crate) type Result<T> = std::result::Result<T, BreakdownError>;

#[derive(Error, Debug, Clone, PartialEq)]
pub(crate) enum BreakdownError {
    #[error("Budget '{name}' has no monthly amounts for currency {currency}")]
    MissingCurrency { name: String, currency: String },

    #[error("Budget '{name}' has {found} monthly amounts, expected 12")]
    MonthCount { name: String, found: usize },

    #[error("Budget '{name}' has a negative monthly budget ({amount})")]
    NegativeBudget { name: String, amount: Decimal },

    #[error("No budget configured: the total budget for the year is zero")]
    NoBudget,

    #[error("Invalid canvas size {width}x{height}")]
    InvalidCanvas { width: f64, height: f64 },

    #[error("Invalid month index {0}, expected 0-11")]
    InvalidMonth(usize),

    #[error("Invalid year '{0}', expected four digits")]
    InvalidYear(String),
}
