use rust_decimal::Decimal;

use crate::progress::ProgressLabel;

/// Symbol for the currencies the feeds usually carry; anything else is
/// shown as its code.
pub(crate) fn currency_symbol(currency: &str) -> String {
    match currency.to_uppercase().as_str() {
        "GBP" => "£".into(),
        "USD" => "$".into(),
        "EUR" => "€".into(),
        "JPY" => "¥".into(),
        other => format!("{other} "),
    }
}

/// Format a decimal amount with thousand separators and 2 decimal places.
/// e.g. `1234567.89` in GBP → `"£1,234,567.89"`
pub(crate) fn format_amount(val: Decimal, currency: &str) -> String {
    let symbol = currency_symbol(currency);
    let abs = val.abs();
    let formatted = format!("{abs:.2}");
    let mut parts = formatted.split('.');
    let int_part = parts.next().unwrap_or("0");
    let dec_part = parts.next().unwrap_or("00");

    let with_commas: String = int_part
        .as_bytes()
        .rchunks(3)
        .rev()
        .map(|chunk| std::str::from_utf8(chunk).unwrap_or(""))
        .collect::<Vec<_>>()
        .join(",");

    if val < Decimal::ZERO {
        format!("-{symbol}{with_commas}.{dec_part}")
    } else {
        format!("{symbol}{with_commas}.{dec_part}")
    }
}

/// Badge text for a month's progress, e.g. `"£35.50 Over"`.
pub(crate) fn progress_label(label: ProgressLabel, currency: &str) -> String {
    match label {
        ProgressLabel::Over(amount) => format!("{} Over", format_amount(amount, currency)),
        ProgressLabel::Hit => "Hit Budget".into(),
        ProgressLabel::Left(amount) => format!("{} Left", format_amount(amount, currency)),
    }
}

/// Axis label for a canvas height. The default canvas is 100 tall, so
/// heights read as percent of the annual budget.
pub(crate) fn format_percent(y: f64, canvas_height: f64) -> String {
    if canvas_height <= 0.0 {
        return "0%".into();
    }
    format!("{:.0}%", y / canvas_height * 100.0)
}

/// Truncate a string to `max` visible characters, appending "…" if truncated.
/// The result is guaranteed to be at most `max` characters (counting "…" as one).
/// Safe for multi-byte UTF-8 characters.
pub(crate) fn truncate(s: &str, max: usize) -> String {
    if max == 0 {
        return String::new();
    }
    let char_count = s.chars().count();
    if char_count <= max {
        return s.to_string();
    }
    let truncated: String = s.chars().take(max.saturating_sub(1)).collect();
    format!("{truncated}…")
}

/// Move a list cursor down by one, adjusting scroll to keep cursor visible.
pub(crate) fn scroll_down(index: &mut usize, scroll: &mut usize, len: usize, page: usize) {
    if *index + 1 < len {
        *index += 1;
        if *index >= *scroll + page {
            *scroll = index.saturating_sub(page - 1);
        }
    }
}

/// Move a list cursor up by one, adjusting scroll to keep cursor visible.
pub(crate) fn scroll_up(index: &mut usize, scroll: &mut usize) {
    *index = index.saturating_sub(1);
    if *index < *scroll {
        *scroll = *index;
    }
}

pub(crate) fn scroll_to_top(index: &mut usize, scroll: &mut usize) {
    *index = 0;
    *scroll = 0;
}

pub(crate) fn scroll_to_bottom(index: &mut usize, scroll: &mut usize, len: usize, page: usize) {
    if len > 0 {
        *index = len - 1;
        *scroll = index.saturating_sub(page.saturating_sub(1));
    }
}
