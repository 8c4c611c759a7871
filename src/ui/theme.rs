use ratatui::style::{Color, Style};

use crate::progress::ProgressLevel;

pub(crate) const HEADER_BG: Color = Color::Rgb(30, 30, 46);
pub(crate) const ACCENT: Color = Color::Rgb(137, 180, 250);
pub(crate) const GREEN: Color = Color::Rgb(166, 227, 161);
pub(crate) const RED: Color = Color::Rgb(243, 139, 168);
pub(crate) const YELLOW: Color = Color::Rgb(249, 226, 175);
pub(crate) const SKY: Color = Color::Rgb(137, 220, 235);
pub(crate) const SURFACE: Color = Color::Rgb(49, 50, 68);
pub(crate) const TEXT: Color = Color::Rgb(205, 214, 244);
pub(crate) const TEXT_DIM: Color = Color::Rgb(127, 132, 156);
pub(crate) const OVERLAY: Color = Color::Rgb(69, 71, 90);
pub(crate) const COMMAND_BG: Color = Color::Rgb(24, 24, 37);

/// Budget colors, assigned by first-seen order and reused modulo length.
pub(crate) const PALETTE: [Color; 9] = [
    Color::Rgb(0xed, 0xae, 0x49),
    Color::Rgb(0xd1, 0x49, 0x5b),
    Color::Rgb(0x00, 0x79, 0x8c),
    Color::Rgb(0x30, 0x63, 0x8e),
    Color::Rgb(0x00, 0x3d, 0x5b),
    Color::Rgb(0x40, 0x8e, 0x9a),
    Color::Rgb(0x80, 0xde, 0xd9),
    Color::Rgb(0xae, 0xec, 0xef),
    Color::Rgb(0xbd, 0xad, 0xea),
];

pub(crate) const TOTAL_LINE: Color = Color::Rgb(0xee, 0x44, 0x33);
pub(crate) const CURRENT_LINE: Color = Color::Rgb(0xee, 0x77, 0x11);
pub(crate) const AGGREGATE: Color = ACCENT;

pub(crate) fn palette_color(slot: usize) -> Color {
    PALETTE[slot % PALETTE.len()]
}

pub(crate) fn level_color(level: ProgressLevel) -> Color {
    match level {
        ProgressLevel::Success => GREEN,
        ProgressLevel::Info => SKY,
        ProgressLevel::Warning => YELLOW,
        ProgressLevel::Danger => RED,
    }
}

pub(crate) fn selected_style() -> Style {
    Style::default().fg(HEADER_BG).bg(ACCENT)
}

pub(crate) fn normal_style() -> Style {
    Style::default().fg(TEXT)
}

pub(crate) fn dim_style() -> Style {
    Style::default().fg(TEXT_DIM)
}

pub(crate) fn alt_row_style() -> Style {
    Style::default().fg(TEXT).bg(SURFACE)
}

pub(crate) fn command_bar_style() -> Style {
    Style::default().fg(TEXT).bg(COMMAND_BG)
}

pub(crate) fn status_bar_style() -> Style {
    Style::default().fg(TEXT_DIM).bg(SURFACE)
}
