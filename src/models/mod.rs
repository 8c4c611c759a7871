mod geometry;
mod record;

pub(crate) use geometry::{
    AnnualBudgetRect, AxisBounds, Breakdown, MonthGroup, MonthlyChartRect, RectKind, SummaryKind,
    SummaryLine,
};
pub(crate) use record::{month_label, parse_month, BudgetRecord, MONTHS, MONTH_LABELS};
