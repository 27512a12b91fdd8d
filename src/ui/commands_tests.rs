#![allow(clippy::unwrap_used)]

use rust_decimal_macros::dec;

use super::*;
use crate::ui::app::LoginField;

fn today() -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 3, 15).unwrap()
}

fn logged_in_app(db: &mut Database) -> App {
    db.register("alice", "pass1").unwrap();
    let mut app = App::new();
    app.login_username = "alice".into();
    app.login_password = "pass1".into();
    app.login(db).unwrap();
    app
}

// ── :add argument parsing ─────────────────────────────────────

#[test]
fn test_parse_add_full() {
    let e = parse_add_args("12.50 Food 2024-01-10 lunch with team", today()).unwrap();
    assert_eq!(e.amount, dec!(12.50));
    assert_eq!(e.category, Category::Food);
    assert_eq!(e.date, NaiveDate::from_ymd_opt(2024, 1, 10).unwrap());
    assert_eq!(e.description, "lunch with team");
}

#[test]
fn test_parse_add_defaults_date_to_today() {
    let e = parse_add_args("3 transport bus ticket", today()).unwrap();
    assert_eq!(e.date, today());
    assert_eq!(e.category, Category::Transport);
    assert_eq!(e.description, "bus ticket");
}

#[test]
fn test_parse_add_blank_description() {
    let e = parse_add_args("40.00 Bills 2024-01-05", today()).unwrap();
    assert_eq!(e.description, "No description");
}

#[test]
fn test_parse_add_errors() {
    assert!(parse_add_args("", today()).unwrap_err().starts_with("Usage"));
    assert!(parse_add_args("12.50", today()).unwrap_err().starts_with("Usage"));
    assert!(parse_add_args("0 Food", today())
        .unwrap_err()
        .contains("greater than 0"));
    assert!(parse_add_args("79228162514264337593543950335 Food", today())
        .unwrap_err()
        .contains("must not exceed"));
    assert!(parse_add_args("5 Rent", today())
        .unwrap_err()
        .contains("unknown category"));
    assert!(parse_add_args("5 Food 2024-02-30", today())
        .unwrap_err()
        .contains("invalid date"));
}

// ── Command dispatch ──────────────────────────────────────────

#[test]
fn test_unknown_command_suggests() {
    let mut db = Database::open_in_memory().unwrap();
    let mut app = logged_in_app(&mut db);
    handle_command("logot", &mut app, &mut db).unwrap();
    assert!(app.status_message.contains("Did you mean :logout?"));
}

#[test]
fn test_levenshtein() {
    assert_eq!(levenshtein("", "abc"), 3);
    assert_eq!(levenshtein("clear", "clear"), 0);
    assert_eq!(levenshtein("delte", "delete"), 1);
}

#[test]
fn test_add_and_filter_flow() {
    let mut db = Database::open_in_memory().unwrap();
    let mut app = logged_in_app(&mut db);
    assert_eq!(app.screen, Screen::Expenses);

    handle_command("add 12.50 Food 2024-01-10 lunch", &mut app, &mut db).unwrap();
    handle_command("add 40.00 Bills 2024-01-05", &mut app, &mut db).unwrap();
    handle_command("add 7 Transport 2024-02-01 taxi", &mut app, &mut db).unwrap();
    assert_eq!(app.expenses.len(), 3);
    assert_eq!(app.summary.count, 3);

    handle_command("cat food", &mut app, &mut db).unwrap();
    assert_eq!(app.expenses.len(), 1);
    // Summary ignores the category filter
    assert_eq!(app.summary.total, dec!(59.50));

    handle_command("cat All", &mut app, &mut db).unwrap();
    handle_command("to 2024-01-31", &mut app, &mut db).unwrap();
    assert_eq!(app.expenses.len(), 2);
    assert_eq!(app.summary.total, dec!(52.50));

    handle_command("from 2024-01-06", &mut app, &mut db).unwrap();
    assert_eq!(app.expenses.len(), 1);

    handle_command("clear", &mut app, &mut db).unwrap();
    assert_eq!(app.expenses.len(), 3);
}

#[test]
fn test_bad_filter_keeps_previous() {
    let mut db = Database::open_in_memory().unwrap();
    let mut app = logged_in_app(&mut db);
    handle_command("from 2024-01-01", &mut app, &mut db).unwrap();
    handle_command("from 01/01/2024", &mut app, &mut db).unwrap();
    assert_eq!(app.filter.start_date, NaiveDate::from_ymd_opt(2024, 1, 1));
    assert!(app.status_message.contains("invalid date"));
}

#[test]
fn test_delete_asks_for_confirmation() {
    let mut db = Database::open_in_memory().unwrap();
    let mut app = logged_in_app(&mut db);
    handle_command("delete", &mut app, &mut db).unwrap();
    assert!(app.pending_action.is_none());

    handle_command("add 5 Other 2024-01-01 pens", &mut app, &mut db).unwrap();
    handle_command("delete", &mut app, &mut db).unwrap();
    assert_eq!(app.input_mode, InputMode::Confirm);
    assert!(matches!(
        app.pending_action,
        Some(PendingAction::DeleteExpense { ref description, .. }) if description == "pens"
    ));
}

#[test]
fn test_logout_clears_session() {
    let mut db = Database::open_in_memory().unwrap();
    let mut app = logged_in_app(&mut db);
    handle_command("add 5 Food", &mut app, &mut db).unwrap();
    handle_command("logout", &mut app, &mut db).unwrap();
    assert_eq!(app.pending_action, Some(PendingAction::Logout));

    app.logout();
    assert!(app.session.is_none());
    assert!(app.expenses.is_empty());
    assert_eq!(app.screen, Screen::Login);
    assert!(app.login_password.is_empty());
}

#[test]
fn test_login_rejects_wrong_password() {
    let mut db = Database::open_in_memory().unwrap();
    db.register("alice", "pass1").unwrap();
    let mut app = App::new();
    app.login_username = "alice".into();
    app.login_password = "nope".into();
    app.login(&mut db).unwrap();
    assert!(app.session.is_none());
    assert_eq!(app.screen, Screen::Login);
    assert_eq!(app.status_message, "Invalid username or password");
}

#[test]
fn test_register_from_login_form() {
    let mut db = Database::open_in_memory().unwrap();
    let mut app = App::new();
    app.login_username = "bob".into();
    app.login_password = "abc".into();
    app.register(&mut db).unwrap();
    assert!(app.status_message.contains("at least 4"));

    app.login_password = "abcd".into();
    app.register(&mut db).unwrap();
    assert!(app.status_message.contains("Account created"));
    assert_eq!(app.login_field, LoginField::Password);

    app.login_password = "abcd".into();
    app.register(&mut db).unwrap();
    assert_eq!(app.status_message, "Username already exists");
}
