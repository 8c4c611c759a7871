use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

use crate::ui::app::App;
use crate::ui::theme;

/// The stored year rendered back as the JSON feed it would export to.
pub(crate) fn render(f: &mut Frame, area: Rect, app: &App) {
    let json = app.feed_json();
    let lines: Vec<Line> = json
        .lines()
        .map(|l| Line::from(Span::styled(l.to_string(), theme::normal_style())))
        .collect();
    let total = lines.len();
    let scroll = app.data_scroll.min(total.saturating_sub(1));

    let para = Paragraph::new(lines)
        .scroll((scroll.min(u16::MAX as usize) as u16, 0))
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(theme::OVERLAY))
                .title(Span::styled(
                    format!(
                        " data.{}.json ({}, {} budgets) ",
                        app.year,
                        app.currency,
                        app.records.len()
                    ),
                    Style::default()
                        .fg(theme::TEXT_DIM)
                        .add_modifier(Modifier::BOLD),
                )),
        );
    f.render_widget(para, area);
}
