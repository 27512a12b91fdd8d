use std::collections::HashMap;
use std::sync::LazyLock;

use chrono::NaiveDate;

use super::app::{App, InputMode, PendingAction, Screen};
use crate::db::Database;
use crate::models::{Category, NewExpense};
use crate::validate;

pub(crate) struct Command {
    pub(crate) description: &'static str,
    pub(crate) run: fn(&str, &mut App, &mut Database) -> anyhow::Result<()>,
}

macro_rules! register_command {
    ($name:expr, $desc:expr, $func:expr, $registry:expr) => {{
        $registry.insert(
            $name,
            Command {
                description: $desc,
                run: $func,
            },
        );
    }};
}

pub(crate) static COMMANDS: LazyLock<HashMap<&str, Command>> = LazyLock::new(|| {
    let mut r: HashMap<&str, Command> = HashMap::new();

    register_command!("q", "Quit ExpenseTUI", cmd_quit, r);
    register_command!("quit", "Quit ExpenseTUI", cmd_quit, r);
    register_command!("help", "Show available commands", cmd_help, r);
    register_command!("h", "Show available commands", cmd_help, r);
    register_command!(
        "add",
        "Add expense (e.g. :add 12.50 Food 2024-01-10 lunch)",
        cmd_add,
        r
    );
    register_command!(
        "a",
        "Add expense (e.g. :a 12.50 Food lunch)",
        cmd_add,
        r
    );
    register_command!(
        "from",
        "Only show expenses on/after a date (e.g. :from 2024-01-01)",
        cmd_from,
        r
    );
    register_command!(
        "to",
        "Only show expenses on/before a date (e.g. :to 2024-01-31)",
        cmd_to,
        r
    );
    register_command!(
        "cat",
        "Filter list by category (e.g. :cat Food, :cat All)",
        cmd_category,
        r
    );
    register_command!(
        "category",
        "Filter list by category (e.g. :category Food)",
        cmd_category,
        r
    );
    register_command!("clear", "Clear all filters", cmd_clear, r);
    register_command!("delete", "Delete selected expense", cmd_delete, r);
    register_command!("del", "Delete selected expense", cmd_delete, r);
    register_command!("logout", "Log out", cmd_logout, r);
    register_command!("categories", "List valid categories", cmd_categories, r);

    r
});

pub(crate) fn handle_command(input: &str, app: &mut App, db: &mut Database) -> anyhow::Result<()> {
    let trimmed = input.trim();
    let mut parts = trimmed.splitn(2, ' ');
    let cmd_name = parts.next().unwrap_or("");
    let args = parts.next().unwrap_or("").trim();

    if cmd_name.is_empty() {
        return Ok(());
    }

    if let Some(cmd) = COMMANDS.get(cmd_name) {
        (cmd.run)(args, app, db)?;
    } else {
        let suggestion = find_closest(cmd_name);
        app.set_status(format!(
            "Unknown command: :{cmd_name}. Did you mean :{suggestion}?"
        ));
    }

    Ok(())
}

fn cmd_quit(_args: &str, app: &mut App, _db: &mut Database) -> anyhow::Result<()> {
    app.running = false;
    Ok(())
}

fn cmd_help(_args: &str, app: &mut App, _db: &mut Database) -> anyhow::Result<()> {
    app.show_help = true;
    Ok(())
}

fn cmd_add(args: &str, app: &mut App, db: &mut Database) -> anyhow::Result<()> {
    let Some(session) = app.session.as_ref() else {
        app.set_status("Log in first");
        return Ok(());
    };
    let today = chrono::Local::now().date_naive();
    let expense = match parse_add_args(args, today) {
        Ok(e) => e,
        Err(msg) => {
            app.set_status(msg);
            return Ok(());
        }
    };

    db.add_expense(session, &expense)?;
    app.refresh_expenses(db)?;
    app.set_status(format!(
        "Added {} {} on {}: {}",
        crate::ui::util::format_amount(expense.amount),
        expense.category,
        expense.date,
        expense.description
    ));
    Ok(())
}

/// `<amount> <category> [YYYY-MM-DD] [description...]`. The date defaults to
/// `today` when the third token isn't a date.
pub(crate) fn parse_add_args(args: &str, today: NaiveDate) -> Result<NewExpense, String> {
    const USAGE: &str = "Usage: :add <amount> <category> [YYYY-MM-DD] [description]";

    let mut parts = args.split_whitespace();
    let (Some(amount), Some(category)) = (parts.next(), parts.next()) else {
        return Err(USAGE.to_string());
    };
    let rest: Vec<&str> = parts.collect();

    let (date, description) = match rest.first() {
        Some(first) if looks_like_date(first) => {
            let date = validate::parse_date(first).map_err(|e| e.to_string())?;
            (date, rest[1..].join(" "))
        }
        _ => (today, rest.join(" ")),
    };

    let amount = validate::parse_amount(amount).map_err(|e| e.to_string())?;
    let category = validate::parse_category(category).map_err(|e| e.to_string())?;
    NewExpense::new(amount, category, &description, date).map_err(|e| e.to_string())
}

fn looks_like_date(token: &str) -> bool {
    let bytes = token.as_bytes();
    bytes.len() == 10 && bytes[4] == b'-' && bytes[7] == b'-'
}

fn cmd_from(args: &str, app: &mut App, db: &mut Database) -> anyhow::Result<()> {
    match parse_optional_date(args) {
        Ok(date) => {
            app.filter.start_date = date;
            app.expense_index = 0;
            app.expense_scroll = 0;
            app.refresh_expenses(db)?;
            app.set_status(match date {
                Some(d) => format!("From {d}"),
                None => "Start date cleared".into(),
            });
        }
        Err(msg) => app.set_status(msg),
    }
    Ok(())
}

fn cmd_to(args: &str, app: &mut App, db: &mut Database) -> anyhow::Result<()> {
    match parse_optional_date(args) {
        Ok(date) => {
            app.filter.end_date = date;
            app.expense_index = 0;
            app.expense_scroll = 0;
            app.refresh_expenses(db)?;
            app.set_status(match date {
                Some(d) => format!("To {d}"),
                None => "End date cleared".into(),
            });
        }
        Err(msg) => app.set_status(msg),
    }
    Ok(())
}

/// Empty input clears the bound.
fn parse_optional_date(args: &str) -> Result<Option<NaiveDate>, String> {
    if args.trim().is_empty() {
        return Ok(None);
    }
    validate::parse_date(args)
        .map(Some)
        .map_err(|e| e.to_string())
}

fn cmd_category(args: &str, app: &mut App, db: &mut Database) -> anyhow::Result<()> {
    match validate::parse_category_filter(args) {
        Ok(category) => {
            app.filter.category = category;
            app.expense_index = 0;
            app.expense_scroll = 0;
            app.refresh_expenses(db)?;
            app.set_status(match category {
                Some(c) => format!("Category: {c}"),
                None => "Category: All".into(),
            });
        }
        Err(e) => app.set_status(e.to_string()),
    }
    Ok(())
}

fn cmd_clear(_args: &str, app: &mut App, db: &mut Database) -> anyhow::Result<()> {
    app.filter = Default::default();
    app.expense_index = 0;
    app.expense_scroll = 0;
    app.refresh_expenses(db)?;
    app.set_status("Filters cleared");
    Ok(())
}

fn cmd_categories(_args: &str, app: &mut App, _db: &mut Database) -> anyhow::Result<()> {
    let names: Vec<&str> = Category::all().iter().map(|c| c.as_str()).collect();
    app.set_status(format!("Categories: {}", names.join(", ")));
    Ok(())
}

pub(crate) fn cmd_delete(_args: &str, app: &mut App, _db: &mut Database) -> anyhow::Result<()> {
    if app.screen != Screen::Expenses {
        return Ok(());
    }
    let Some(expense) = app.selected_expense() else {
        app.set_status("Please select an expense to delete");
        return Ok(());
    };

    let id = expense.id;
    let date = expense.date;
    let description = expense.description.clone();
    app.confirm_message = format!("Delete '{description}' ({date})?");
    app.pending_action = Some(PendingAction::DeleteExpense { id, description });
    app.input_mode = InputMode::Confirm;
    Ok(())
}

pub(crate) fn cmd_logout(_args: &str, app: &mut App, _db: &mut Database) -> anyhow::Result<()> {
    if app.session.is_none() {
        return Ok(());
    }
    app.confirm_message = "Are you sure you want to logout?".into();
    app.pending_action = Some(PendingAction::Logout);
    app.input_mode = InputMode::Confirm;
    Ok(())
}

fn find_closest(input: &str) -> String {
    COMMANDS
        .keys()
        .filter(|k| k.len() > 1) // skip single-letter aliases for suggestions
        .min_by_key(|k| levenshtein(input, k))
        .unwrap_or(&"help")
        .to_string()
}

fn levenshtein(a: &str, b: &str) -> usize {
    let (a, b) = (a.as_bytes(), b.as_bytes());
    let mut prev: Vec<usize> = (0..=b.len()).collect();
    let mut curr = vec![0; b.len() + 1];

    for i in 1..=a.len() {
        curr[0] = i;
        for j in 1..=b.len() {
            let cost = if a[i - 1] == b[j - 1] { 0 } else { 1 };
            curr[j] = (prev[j] + 1).min(curr[j - 1] + 1).min(prev[j - 1] + cost);
        }
        std::mem::swap(&mut prev, &mut curr);
    }

    prev[b.len()]
}

#[cfg(test)]
#[path = "commands_tests.rs"]
mod tests;
