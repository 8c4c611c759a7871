use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, Paragraph},
    Frame,
};

use crate::models::month_label;
use crate::ui::app::App;
use crate::ui::theme;
use crate::ui::util::{format_amount, progress_label, truncate};

pub(crate) fn render(f: &mut Frame, area: Rect, app: &App) {
    if app.progress.is_empty() {
        render_empty(f, area, app);
        return;
    }

    let items: Vec<ListItem> = app
        .progress
        .iter()
        .enumerate()
        .skip(app.progress_scroll)
        .take(area.height.saturating_sub(2) as usize)
        .map(|(i, p)| {
            let color = theme::level_color(p.level);
            let style = if i == app.progress_index {
                theme::selected_style()
            } else if i % 2 == 0 {
                theme::alt_row_style()
            } else {
                theme::normal_style()
            };

            let shown = app.is_selected(&p.name);
            let check = if shown { "[x] " } else { "[ ] " };
            let swatch = if shown {
                Style::default().fg(theme::palette_color(app.color_slot(&p.name)))
            } else {
                theme::dim_style()
            };
            let percent = p
                .percentage
                .map(|v| format!(" {:>4}%", v.round_dp(0)))
                .unwrap_or_else(|| "    -".into());
            let categories = app
                .records
                .get(i)
                .map(|r| r.description())
                .unwrap_or_default();

            ListItem::new(Line::from(vec![
                Span::styled(check, swatch),
                Span::styled(format!("{:<18}", truncate(&p.name, 17)), style),
                Span::styled(
                    format!(
                        "{:>11}/{:<11} ",
                        format_amount(p.amount, &app.currency),
                        format_amount(p.budget, &app.currency)
                    ),
                    Style::default().fg(color),
                ),
                Span::styled(create_progress_bar(p.fill_ratio(), 20), Style::default().fg(color)),
                Span::styled(
                    percent,
                    Style::default().fg(color).add_modifier(Modifier::BOLD),
                ),
                Span::styled(
                    format!("  {}", progress_label(p.label, &app.currency)),
                    Style::default().fg(color),
                ),
                Span::styled(format!("  {}", truncate(&categories, 30)), theme::dim_style()),
            ]))
        })
        .collect();

    let list = List::new(items).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(theme::OVERLAY))
            .title(Span::styled(
                format!(" Progress for {} {} ", month_label(app.month), app.year),
                Style::default()
                    .fg(theme::TEXT_DIM)
                    .add_modifier(Modifier::BOLD),
            )),
    );
    f.render_widget(list, area);
}

fn render_empty(f: &mut Frame, area: Rect, app: &App) {
    let reason = app
        .load_error
        .clone()
        .unwrap_or_else(|| format!("No {} budgets stored for {}", app.currency, app.year));
    let msg = Paragraph::new(vec![
        Line::from(""),
        Line::from(Span::styled(reason, theme::dim_style())),
        Line::from(""),
        Line::from(Span::styled(
            "Use :import <data.YYYY.json> to load a year",
            theme::dim_style(),
        )),
    ])
    .centered()
    .block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(theme::OVERLAY))
            .title(Span::styled(
                " Progress ",
                Style::default()
                    .fg(theme::TEXT_DIM)
                    .add_modifier(Modifier::BOLD),
            )),
    );
    f.render_widget(msg, area);
}

fn create_progress_bar(ratio: f64, width: usize) -> String {
    let filled = (ratio * width as f64) as usize;
    let empty = width.saturating_sub(filled);
    format!("[{}{}]", "█".repeat(filled), "░".repeat(empty))
}
