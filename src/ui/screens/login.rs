use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph},
    Frame,
};

use crate::ui::app::{App, LoginField};
use crate::ui::theme;
use crate::ui::util::mask;

const FORM_WIDTH: u16 = 44;
const FORM_HEIGHT: u16 = 15;

pub(crate) fn render(f: &mut Frame, area: Rect, app: &App) {
    let width = FORM_WIDTH.min(area.width);
    let height = FORM_HEIGHT.min(area.height);
    let x = area.x + (area.width.saturating_sub(width)) / 2;
    let y = area.y + (area.height.saturating_sub(height)) / 2;
    let form_area = Rect::new(x, y, width, height);

    f.render_widget(Clear, form_area);
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(theme::ACCENT))
        .style(Style::default().bg(theme::SURFACE));
    let inner = block.inner(form_area);
    f.render_widget(block, form_area);

    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1), // Title
            Constraint::Length(1), // Subtitle
            Constraint::Length(1),
            Constraint::Length(1), // Username label
            Constraint::Length(1), // Username input
            Constraint::Length(1),
            Constraint::Length(1), // Password label
            Constraint::Length(1), // Password input
            Constraint::Length(1),
            Constraint::Min(1), // Key hints
        ])
        .split(inner);

    f.render_widget(
        Paragraph::new(Line::from(Span::styled(
            "Expense Tracker",
            Style::default()
                .fg(theme::TEXT)
                .add_modifier(Modifier::BOLD),
        )))
        .centered(),
        rows[0],
    );
    f.render_widget(
        Paragraph::new(Line::from(Span::styled(
            "Track your expenses effortlessly",
            theme::dim_style(),
        )))
        .centered(),
        rows[1],
    );

    let username_focused = app.login_field == LoginField::Username;
    render_field(f, rows[3], rows[4], "Username", &app.login_username, username_focused);
    render_field(
        f,
        rows[6],
        rows[7],
        "Password",
        &mask(&app.login_password),
        !username_focused,
    );

    let hints = vec![
        Line::from(Span::styled(
            "Enter  Login        Tab  Switch field",
            theme::dim_style(),
        )),
        Line::from(Span::styled(
            "Ctrl-n Create account   Ctrl-q Quit",
            theme::dim_style(),
        )),
    ];
    f.render_widget(Paragraph::new(hints).centered(), rows[9]);

    let (cursor_row, value_len) = if username_focused {
        (rows[4], app.login_username.chars().count())
    } else {
        (rows[7], app.login_password.chars().count())
    };
    let offset = (1 + value_len as u16).min(cursor_row.width.saturating_sub(1));
    f.set_cursor_position((cursor_row.x + offset, cursor_row.y));
}

fn render_field(
    f: &mut Frame,
    label_area: Rect,
    input_area: Rect,
    label: &str,
    value: &str,
    focused: bool,
) {
    let label_style = if focused {
        Style::default().fg(theme::ACCENT).add_modifier(Modifier::BOLD)
    } else {
        theme::normal_style()
    };
    f.render_widget(
        Paragraph::new(Line::from(Span::styled(format!(" {label}"), label_style))),
        label_area,
    );
    f.render_widget(
        Paragraph::new(Line::from(Span::raw(format!(" {value}"))))
            .style(theme::input_style(focused)),
        input_area,
    );
}
