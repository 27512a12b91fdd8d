use anyhow::Result;
use crossterm::event::{self, Event, KeyCode, KeyEventKind, KeyModifiers};
use crossterm::{
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use log::error;
use ratatui::{backend::CrosstermBackend, Terminal};
use std::io;

use crate::db::Database;
use crate::ui::app::{App, InputMode, LoginField, PendingAction, Screen};
use crate::ui::commands;
use crate::ui::util::{scroll_down, scroll_up};

pub(crate) fn as_tui(db: &mut Database) -> Result<()> {
    let mut app = App::new();

    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let result = run_app(&mut terminal, &mut app, db);

    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    // Quitting while logged in still ends the session.
    if let Some(session) = app.session.take() {
        session.logout();
    }

    if let Err(ref e) = result {
        eprintln!("Error: {e:?}");
    }

    result
}

fn run_app(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    app: &mut App,
    db: &mut Database,
) -> Result<()> {
    while app.running {
        terminal.draw(|f| {
            // title + status + command bars, cards, table borders and header
            let content_height = f.area().height.saturating_sub(11) as usize;
            app.visible_rows = content_height.max(1);
            crate::ui::render::render(f, app);
        })?;

        let Event::Key(key) = event::read()? else {
            continue;
        };
        if key.kind != KeyEventKind::Press {
            continue;
        }
        if app.show_help {
            app.show_help = false;
            continue;
        }
        if key.code == KeyCode::Char('q') && key.modifiers.contains(KeyModifiers::CONTROL) {
            app.running = false;
            continue;
        }

        let handled = match (app.screen, app.input_mode) {
            (_, InputMode::Confirm) => handle_confirm_input(key, app, db),
            (_, InputMode::Command) => handle_command_input(key, app, db),
            (Screen::Login, InputMode::Normal) => handle_login_input(key, app, db),
            (Screen::Expenses, InputMode::Normal) => handle_normal_input(key, app, db),
        };

        // Failures are reported and the session continues.
        if let Err(e) = handled {
            error!("event=ui_action module=tui status=error error={e}");
            app.input_mode = InputMode::Normal;
            app.set_status(format!("Error: {e}"));
        }
    }
    Ok(())
}

// ── Input handlers ───────────────────────────────────────────

fn handle_login_input(key: event::KeyEvent, app: &mut App, db: &mut Database) -> Result<()> {
    let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
    match key.code {
        KeyCode::Char('n') if ctrl => app.register(db)?,
        KeyCode::Enter => match app.login_field {
            LoginField::Username if app.login_password.is_empty() => {
                app.login_field = LoginField::Password;
            }
            _ => app.login(db)?,
        },
        KeyCode::Tab | KeyCode::BackTab | KeyCode::Up | KeyCode::Down => {
            app.login_field = match app.login_field {
                LoginField::Username => LoginField::Password,
                LoginField::Password => LoginField::Username,
            };
        }
        KeyCode::Esc => app.status_message.clear(),
        KeyCode::Backspace => {
            focused_login_field(app).pop();
        }
        KeyCode::Char(c) if !ctrl => {
            focused_login_field(app).push(c);
        }
        _ => {}
    }
    Ok(())
}

fn focused_login_field(app: &mut App) -> &mut String {
    match app.login_field {
        LoginField::Username => &mut app.login_username,
        LoginField::Password => &mut app.login_password,
    }
}

fn handle_normal_input(key: event::KeyEvent, app: &mut App, db: &mut Database) -> Result<()> {
    match key.code {
        KeyCode::Char(':') => {
            app.input_mode = InputMode::Command;
            app.command_input.clear();
        }
        KeyCode::Char('j') | KeyCode::Down => scroll_down(
            &mut app.expense_index,
            &mut app.expense_scroll,
            app.expenses.len(),
            app.visible_rows.max(1),
        ),
        KeyCode::Char('k') | KeyCode::Up => {
            scroll_up(&mut app.expense_index, &mut app.expense_scroll);
        }
        KeyCode::Char('g') => {
            app.expense_index = 0;
            app.expense_scroll = 0;
        }
        KeyCode::Char('G') => {
            if !app.expenses.is_empty() {
                app.expense_index = app.expenses.len() - 1;
                let page = app.visible_rows.max(1);
                app.expense_scroll = app.expense_index.saturating_sub(page - 1);
            }
        }
        KeyCode::Char('D') | KeyCode::Delete => commands::cmd_delete("", app, db)?,
        KeyCode::Char('?') => app.show_help = true,
        KeyCode::Esc => app.status_message.clear(),
        _ => {}
    }
    Ok(())
}

fn handle_command_input(key: event::KeyEvent, app: &mut App, db: &mut Database) -> Result<()> {
    match key.code {
        KeyCode::Enter => {
            let input = app.command_input.clone();
            app.input_mode = InputMode::Normal;
            app.command_input.clear();
            commands::handle_command(&input, app, db)?;
        }
        KeyCode::Esc => {
            app.input_mode = InputMode::Normal;
            app.command_input.clear();
        }
        KeyCode::Backspace => {
            app.command_input.pop();
            if app.command_input.is_empty() {
                app.input_mode = InputMode::Normal;
            }
        }
        KeyCode::Char(c) => {
            app.command_input.push(c);
        }
        _ => {}
    }
    Ok(())
}

fn handle_confirm_input(key: event::KeyEvent, app: &mut App, db: &mut Database) -> Result<()> {
    app.input_mode = InputMode::Normal;
    app.confirm_message.clear();
    let action = app.pending_action.take();

    if !matches!(key.code, KeyCode::Char('y') | KeyCode::Char('Y')) {
        app.set_status("Cancelled");
        return Ok(());
    }

    match action {
        Some(PendingAction::DeleteExpense { id, description }) => {
            let Some(session) = app.session.as_ref() else {
                return Ok(());
            };
            match db.delete_expense(session, id) {
                Ok(()) => {
                    app.refresh_expenses(db)?;
                    app.set_status(format!("Deleted: {description}"));
                }
                Err(crate::error::Error::NotFound(_)) => {
                    app.refresh_expenses(db)?;
                    app.set_status("Failed to delete expense");
                }
                Err(e) => return Err(e.into()),
            }
        }
        Some(PendingAction::Logout) => app.logout(),
        None => {}
    }
    Ok(())
}
