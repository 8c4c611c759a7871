use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    symbols::Marker,
    text::{Line, Span},
    widgets::canvas::{Canvas, Context, Line as CanvasLine, Rectangle},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

use crate::error::BreakdownError;
use crate::models::{month_label, AnnualBudgetRect, Breakdown, MonthlyChartRect, SummaryLine};
use crate::ui::app::App;
use crate::ui::theme;
use crate::ui::util::{format_amount, format_percent, truncate};

/// Room left of x = 0 for the axis labels, in canvas units.
const LABEL_GUTTER: f64 = 14.0;

pub(crate) fn render(f: &mut Frame, area: Rect, app: &App) {
    let breakdown = match app.breakdown() {
        Ok(b) => b,
        Err(e) => {
            render_empty(f, area, app, &e);
            return;
        }
    };

    let chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Min(30), Constraint::Length(34)])
        .split(area);

    render_canvas(f, chunks[0], app, &breakdown);
    render_legend(f, chunks[1], app, &breakdown);
}

fn render_canvas(f: &mut Frame, area: Rect, app: &App, breakdown: &Breakdown) {
    let width = breakdown.budgets.iter().map(|b| b.x_start + b.x_length).fold(0.0, f64::max);
    let height = breakdown.total.y;
    let axis = breakdown.axis;
    // One braille dot row in canvas units; fills are drawn as stacked lines.
    let fill_step = (axis.max - axis.min) / (area.height.max(1) as f64 * 4.0);
    // Canvas units per terminal column, for fitting labels inside columns.
    let unit_cells = area.width.saturating_sub(2) as f64 / (width.max(1.0) + LABEL_GUTTER);

    let title = if app.show_aggregate {
        format!(" {} month totals ", app.year)
    } else {
        format!(" {} budget breakdown ", app.year)
    };

    let canvas = Canvas::default()
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(theme::OVERLAY))
                .title(Span::styled(
                    title,
                    Style::default()
                        .fg(theme::TEXT_DIM)
                        .add_modifier(Modifier::BOLD),
                )),
        )
        .marker(Marker::Braille)
        .x_bounds([-LABEL_GUTTER, width.max(1.0)])
        .y_bounds([axis.min, axis.max])
        .paint(|ctx| {
            if app.show_aggregate {
                for group in &breakdown.months {
                    draw_rect(ctx, &group.total, theme::AGGREGATE, fill_step);
                }
            } else {
                for budget in &breakdown.budgets {
                    draw_column(ctx, budget, unit_cells);
                }
                for group in &breakdown.months {
                    for rect in &group.rects {
                        let slot = rect.kind.name().map(|n| app.color_slot(n)).unwrap_or(0);
                        draw_rect(ctx, rect, theme::palette_color(slot), fill_step);
                    }
                }
            }
            ctx.layer();

            if app.show_aggregate {
                for group in &breakdown.months {
                    let total = &group.total;
                    if total.y_length != 0.0 {
                        let (lower, upper) = total.y_bounds();
                        ctx.print(
                            1.0,
                            (lower + upper) / 2.0,
                            Span::styled(month_label(group.month), theme::normal_style()),
                        );
                    }
                }
            }

            if axis.min < 0.0 {
                ctx.draw(&CanvasLine {
                    x1: 0.0,
                    y1: 0.0,
                    x2: width,
                    y2: 0.0,
                    color: theme::OVERLAY,
                });
            }
            for y in axis.labels() {
                ctx.print(
                    -LABEL_GUTTER,
                    y,
                    Span::styled(format_percent(y, height), Style::default().fg(theme::TEXT_DIM)),
                );
            }

            draw_summary_line(ctx, &breakdown.total, width, theme::TOTAL_LINE, "Total");
            if let Some(current) = &breakdown.current {
                draw_summary_line(ctx, current, width, theme::CURRENT_LINE, month_label(app.month));
            }
        });

    f.render_widget(canvas, area);
}

/// A budget's full-year allowance, outlined behind its spend and labelled
/// at the top when the column is wide enough.
fn draw_column(ctx: &mut Context, budget: &AnnualBudgetRect, unit_cells: f64) {
    if budget.x_length <= 0.0 {
        return;
    }
    ctx.draw(&Rectangle {
        x: budget.x_start,
        y: budget.y_start,
        width: budget.x_length,
        height: budget.y_length,
        color: theme::OVERLAY,
    });
    if let Some(label) = column_label(&budget.name, budget.x_length * unit_cells) {
        ctx.print(
            budget.x_start + 0.5,
            budget.y_start + budget.y_length,
            Span::styled(label, theme::dim_style()),
        );
    }
}

/// Name cut to fit `cells` terminal columns, leaving one for the border.
/// `None` when fewer than two characters would fit.
fn column_label(name: &str, cells: f64) -> Option<String> {
    let room = cells.floor() as usize;
    if room < 3 {
        return None;
    }
    Some(truncate(name, room - 1))
}

/// Spend is drawn filled; a refund month is only outlined so it reads as
/// negative space below the running total.
fn draw_rect(ctx: &mut Context, rect: &MonthlyChartRect, color: Color, fill_step: f64) {
    if rect.x_length <= 0.0 || rect.y_length == 0.0 {
        return;
    }
    let (lower, upper) = rect.y_bounds();
    let x2 = rect.x_start + rect.x_length;

    if rect.is_refund() {
        ctx.draw(&Rectangle {
            x: rect.x_start,
            y: lower,
            width: rect.x_length,
            height: upper - lower,
            color,
        });
        return;
    }

    let step = fill_step.max(f64::EPSILON);
    let mut y = lower;
    while y <= upper {
        ctx.draw(&CanvasLine {
            x1: rect.x_start,
            y1: y,
            x2,
            y2: y,
            color,
        });
        y += step;
    }
}

fn draw_summary_line(ctx: &mut Context, line: &SummaryLine, width: f64, color: Color, label: &str) {
    ctx.draw(&CanvasLine {
        x1: 0.0,
        y1: line.y,
        x2: width,
        y2: line.y,
        color,
    });
    ctx.print(
        width * 0.85,
        line.y,
        Span::styled(label.to_string(), Style::default().fg(color)),
    );
}

fn render_legend(f: &mut Frame, area: Rect, app: &App, breakdown: &Breakdown) {
    let money = |v| format_amount(v, &app.currency);
    let mut lines = vec![
        Line::from(Span::styled(
            "Year",
            Style::default()
                .fg(theme::YELLOW)
                .add_modifier(Modifier::BOLD),
        )),
        summary_row("Budget", money(breakdown.total.budget), theme::TEXT),
        summary_row("Spent", money(breakdown.total.amount), theme::TOTAL_LINE),
        summary_row("Left", money(breakdown.total.left_to_spend()), theme::TEXT),
    ];

    if let Some(current) = &breakdown.current {
        lines.push(Line::from(""));
        lines.push(Line::from(Span::styled(
            format!("To end of {}", month_label(app.month)),
            Style::default()
                .fg(theme::YELLOW)
                .add_modifier(Modifier::BOLD),
        )));
        lines.push(summary_row("Budget", money(current.budget), theme::CURRENT_LINE));
        lines.push(summary_row("Spent", money(current.amount), theme::TEXT));
        lines.push(summary_row("Left", money(current.left_to_spend()), theme::TEXT));
    }

    lines.push(Line::from(""));
    lines.push(Line::from(Span::styled(
        "Budgets",
        Style::default()
            .fg(theme::YELLOW)
            .add_modifier(Modifier::BOLD),
    )));
    for budget in &breakdown.budgets {
        let color = theme::palette_color(app.color_slot(&budget.name));
        lines.push(Line::from(vec![
            Span::styled("██ ", Style::default().fg(color)),
            Span::styled(truncate(&budget.name, 16), theme::normal_style()),
            Span::styled(
                format!(" {:.0}%", budget.x_length),
                theme::dim_style(),
            ),
        ]));
    }

    let legend = Paragraph::new(lines).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(theme::OVERLAY))
            .title(Span::styled(
                format!(" {} ", app.currency),
                Style::default()
                    .fg(theme::TEXT_DIM)
                    .add_modifier(Modifier::BOLD),
            )),
    );
    f.render_widget(legend, area);
}

fn summary_row(label: &str, value: String, color: Color) -> Line<'static> {
    Line::from(vec![
        Span::styled(format!("  {label:<8}"), theme::dim_style()),
        Span::styled(value, Style::default().fg(color)),
    ])
}

fn render_empty(f: &mut Frame, area: Rect, app: &App, error: &BreakdownError) {
    let hint = if app.records.is_empty() {
        "Use :import <data.YYYY.json> to load a year"
    } else if app.selected.is_empty() {
        "Every budget is hidden. Press A to show them all"
    } else {
        "The selected budgets add up to a zero annual budget"
    };
    let msg = Paragraph::new(vec![
        Line::from(""),
        Line::from(Span::styled(error.to_string(), theme::dim_style())),
        Line::from(""),
        Line::from(Span::styled(hint, theme::dim_style())),
    ])
    .centered()
    .block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(theme::OVERLAY))
            .title(Span::styled(
                format!(" {} ", app.year),
                Style::default()
                    .fg(theme::TEXT_DIM)
                    .add_modifier(Modifier::BOLD),
            )),
    );
    f.render_widget(msg, area);
}

#[cfg(test)]
#[path = "chart_tests.rs"]
mod tests;
