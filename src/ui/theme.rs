use ratatui::style::{Color, Modifier, Style};

pub(crate) const HEADER_BG: Color = Color::Rgb(30, 30, 46);
pub(crate) const HEADER_FG: Color = Color::Rgb(205, 214, 244);
pub(crate) const ACCENT: Color = Color::Rgb(108, 92, 231);
pub(crate) const GREEN: Color = Color::Rgb(0, 184, 148);
pub(crate) const RED: Color = Color::Rgb(214, 48, 49);
pub(crate) const YELLOW: Color = Color::Rgb(253, 203, 110);
pub(crate) const SURFACE: Color = Color::Rgb(45, 45, 68);
pub(crate) const INPUT_BG: Color = Color::Rgb(61, 61, 92);
pub(crate) const TEXT: Color = Color::Rgb(255, 255, 255);
pub(crate) const TEXT_DIM: Color = Color::Rgb(160, 160, 160);
pub(crate) const OVERLAY: Color = Color::Rgb(69, 71, 90);
pub(crate) const COMMAND_BG: Color = Color::Rgb(24, 24, 37);

pub(crate) fn header_style() -> Style {
    Style::default()
        .fg(HEADER_FG)
        .bg(HEADER_BG)
        .add_modifier(Modifier::BOLD)
}

pub(crate) fn title_style() -> Style {
    Style::default().fg(TEXT_DIM).add_modifier(Modifier::BOLD)
}

pub(crate) fn selected_style() -> Style {
    Style::default().fg(TEXT).bg(ACCENT)
}

pub(crate) fn normal_style() -> Style {
    Style::default().fg(TEXT)
}

pub(crate) fn dim_style() -> Style {
    Style::default().fg(TEXT_DIM)
}

pub(crate) fn amount_style() -> Style {
    Style::default().fg(RED)
}

pub(crate) fn alt_row_style() -> Style {
    Style::default().fg(TEXT).bg(SURFACE)
}

pub(crate) fn input_style(focused: bool) -> Style {
    if focused {
        Style::default().fg(TEXT).bg(INPUT_BG)
    } else {
        Style::default().fg(TEXT_DIM).bg(SURFACE)
    }
}

pub(crate) fn command_bar_style() -> Style {
    Style::default().fg(TEXT).bg(COMMAND_BG)
}

pub(crate) fn status_bar_style() -> Style {
    Style::default().fg(TEXT_DIM).bg(SURFACE)
}
