use rust_decimal::Decimal;
use serde::Serialize;

/// A budget's column on the annual chart. Width is the budget's share of
/// the total, height always spans the canvas.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct AnnualBudgetRect {
    pub name: String,
    pub categories: Vec<String>,
    pub monthly_budget: Decimal,
    pub amount: Decimal,
    pub x_start: f64,
    pub x_length: f64,
    pub y_start: f64,
    pub y_length: f64,
}

/// What a monthly rectangle stands for.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub(crate) enum RectKind {
    PerRecord {
        name: String,
        categories: Vec<String>,
    },
    /// Sum of every record for one month, spanning the full width.
    MonthTotal,
}

impl RectKind {
    pub(crate) fn name(&self) -> Option<&str> {
        match self {
            Self::PerRecord { name, .. } => Some(name),
            Self::MonthTotal => None,
        }
    }
}

/// One month of spend, stacked on top of the previous months.
///
/// `y_length` is signed: a refund month produces a negative length, and the
/// following month starts from the lower edge of that rectangle.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct MonthlyChartRect {
    #[serde(flatten)]
    pub kind: RectKind,
    pub monthly_budget: Decimal,
    pub month: usize,
    pub amount: Decimal,
    pub x_start: f64,
    pub x_length: f64,
    pub y_start: f64,
    pub y_length: f64,
}

impl MonthlyChartRect {
    pub(crate) fn is_refund(&self) -> bool {
        self.y_length < 0.0
    }

    /// Lower and upper Y edges, regardless of sign.
    pub(crate) fn y_bounds(&self) -> (f64, f64) {
        let end = self.y_start + self.y_length;
        (self.y_start.min(end), self.y_start.max(end))
    }

    pub(crate) fn area(&self) -> f64 {
        self.x_length * self.y_length.abs()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct MonthGroup {
    pub month: usize,
    pub rects: Vec<MonthlyChartRect>,
    pub total: MonthlyChartRect,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub(crate) enum SummaryKind {
    Total,
    Current,
}

/// Horizontal marker line: a budget level and the spend measured against it.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct SummaryLine {
    pub kind: SummaryKind,
    pub budget: Decimal,
    pub amount: Decimal,
    pub y: f64,
}

impl SummaryLine {
    pub(crate) fn left_to_spend(&self) -> Decimal {
        self.budget - self.amount
    }
}

/// Vertical axis range, already rounded outward to `label_step`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct AxisBounds {
    pub min: f64,
    pub max: f64,
    pub tick: f64,
    pub label_step: f64,
}

impl AxisBounds {
    /// Values on the label step between `min` and `max`, inclusive.
    pub(crate) fn labels(&self) -> Vec<f64> {
        if self.label_step <= 0.0 {
            return Vec::new();
        }
        let steps = ((self.max - self.min) / self.label_step).round() as i64;
        (0..=steps)
            .map(|i| self.min + i as f64 * self.label_step)
            .collect()
    }
}

/// Everything the chart needs for one year, ready to serialize.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct Breakdown {
    pub total_budget: Decimal,
    pub total_amount: Decimal,
    pub highest_y: f64,
    pub lowest_y: f64,
    pub axis: AxisBounds,
    pub budget_names: Vec<String>,
    pub budgets: Vec<AnnualBudgetRect>,
    pub months: Vec<MonthGroup>,
    pub total: SummaryLine,
    pub current: Option<SummaryLine>,
}
