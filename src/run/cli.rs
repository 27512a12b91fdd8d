use anyhow::{Context, Result};
use chrono::{Local, NaiveDate};
use log::info;
use std::io::{self, BufRead, Write};

use crate::db::Database;
use crate::error::Error;
use crate::models::{Category, ExpenseFilter, NewExpense, Session};
use crate::ui::util::format_amount;
use crate::validate;

pub(crate) fn as_cli(args: &[String], db: &mut Database) -> Result<()> {
    let stdin = io::stdin();
    let mut input = stdin.lock();
    let mut out = io::stdout().lock();
    run_cli(&args[1..], db, &mut input, &mut out)
}

/// Dispatch one CLI command. `args` excludes the program name.
pub(crate) fn run_cli(
    args: &[String],
    db: &mut Database,
    input: &mut impl BufRead,
    out: &mut impl Write,
) -> Result<()> {
    let Some(command) = args.first() else {
        print_usage(out)?;
        return Ok(());
    };
    let rest = &args[1..];
    match command.as_str() {
        "register" => cli_register(rest, db, input, out),
        "add" | "a" => cli_add(rest, db, input, out),
        "list" | "ls" => cli_list(rest, db, input, out),
        "summary" | "s" => cli_summary(rest, db, input, out),
        "delete" | "rm" => cli_delete(rest, db, input, out),
        "categories" => {
            for category in Category::all() {
                writeln!(out, "{category}")?;
            }
            Ok(())
        }
        "--help" | "-h" | "help" => print_usage(out),
        "--version" | "-V" | "version" => {
            writeln!(out, "expensetui {}", env!("CARGO_PKG_VERSION"))?;
            Ok(())
        }
        other => {
            print_usage(out)?;
            anyhow::bail!("Unknown command: {other}");
        }
    }
}

fn print_usage(out: &mut impl Write) -> Result<()> {
    let usage = "\
ExpenseTUI - local personal expense tracker

Usage: expensetui [--db <path>] [--log-level <level>] [command]

Commands (the password is read from the first line of stdin):
  (none)                              Launch interactive TUI
  register <user>                     Create an account
  add <user> <amount> <category>      Record an expense
    --date <YYYY-MM-DD>               Expense date (default: today)
    --desc <text>                     Description
  list <user>                         List expenses, newest first
    --from <date> --to <date>         Inclusive date range
    --category <name>                 Only this category
  summary <user> [--from] [--to]      Total, count and average
  delete <user> <id>                  Delete one of your expenses
  categories                          List the expense categories
  --help, -h                          Show this help
  --version, -V                       Show version
";
    out.write_all(usage.as_bytes())?;
    Ok(())
}

fn cli_register(
    args: &[String],
    db: &mut Database,
    input: &mut impl BufRead,
    out: &mut impl Write,
) -> Result<()> {
    let username = positional(args, 0, "Usage: expensetui register <user>")?;
    let password = read_password(input)?;
    match db.register(username, &password) {
        Ok(_) => {
            writeln!(out, "Account created for {}", validate::normalize_username(username))?;
            Ok(())
        }
        Err(Error::AlreadyExists(_)) => anyhow::bail!("Username already exists"),
        Err(e) => Err(e.into()),
    }
}

fn cli_add(
    args: &[String],
    db: &mut Database,
    input: &mut impl BufRead,
    out: &mut impl Write,
) -> Result<()> {
    const USAGE: &str = "Usage: expensetui add <user> <amount> <category> \
                         [--date <date>] [--desc <text>]";
    let username = positional(args, 0, USAGE)?;
    let amount = positional(args, 1, USAGE)?;
    let category = positional(args, 2, USAGE)?;

    let date = match flag_value(args, "--date") {
        Some(d) => validate::parse_date(d)?,
        None => today(),
    };
    let description = flag_value(args, "--desc").unwrap_or("");
    let expense = NewExpense::new(
        validate::parse_amount(amount)?,
        validate::parse_category(category)?,
        description,
        date,
    )?;

    let session = login(username, db, input)?;
    let id = db.add_expense(&session, &expense)?;
    writeln!(
        out,
        "Added expense #{id}: {} {} on {} ({})",
        format_amount(expense.amount),
        expense.category,
        expense.date,
        expense.description
    )?;
    session.logout();
    Ok(())
}

fn cli_list(
    args: &[String],
    db: &mut Database,
    input: &mut impl BufRead,
    out: &mut impl Write,
) -> Result<()> {
    const USAGE: &str = "Usage: expensetui list <user> [--from <date>] [--to <date>] \
                         [--category <name>]";
    let username = positional(args, 0, USAGE)?;
    let filter = ExpenseFilter {
        start_date: optional_date(args, "--from")?,
        end_date: optional_date(args, "--to")?,
        category: match flag_value(args, "--category") {
            Some(c) => validate::parse_category_filter(c)?,
            None => None,
        },
    };

    let session = login(username, db, input)?;
    let expenses = db.get_expenses(&session, &filter)?;
    if expenses.is_empty() {
        writeln!(out, "No expenses found")?;
    } else {
        writeln!(
            out,
            "{:>6}  {:<10}  {:<13}  {:>12}  Description",
            "ID", "Date", "Category", "Amount"
        )?;
        writeln!(out, "{}", "-".repeat(60))?;
        for e in &expenses {
            writeln!(
                out,
                "{:>6}  {:<10}  {:<13}  {:>12}  {}",
                e.id,
                e.date,
                e.category.as_str(),
                format_amount(e.amount),
                e.description
            )?;
        }
    }
    session.logout();
    Ok(())
}

fn cli_summary(
    args: &[String],
    db: &mut Database,
    input: &mut impl BufRead,
    out: &mut impl Write,
) -> Result<()> {
    const USAGE: &str = "Usage: expensetui summary <user> [--from <date>] [--to <date>]";
    let username = positional(args, 0, USAGE)?;
    let start = optional_date(args, "--from")?;
    let end = optional_date(args, "--to")?;

    let session = login(username, db, input)?;
    let summary = db.get_expense_summary(&session, start, end)?;

    let range = match (start, end) {
        (None, None) => "all time".to_string(),
        (Some(s), None) => format!("from {s}"),
        (None, Some(e)) => format!("until {e}"),
        (Some(s), Some(e)) => format!("{s} to {e}"),
    };
    writeln!(out, "Expense summary for {} ({range})", session.username())?;
    writeln!(out, "{}", "=".repeat(40))?;
    writeln!(out, "  Total:    {:>14}", format_amount(summary.total))?;
    writeln!(out, "  Count:    {:>14}", summary.count)?;
    writeln!(out, "  Average:  {:>14}", format_amount(summary.average()))?;
    session.logout();
    Ok(())
}

fn cli_delete(
    args: &[String],
    db: &mut Database,
    input: &mut impl BufRead,
    out: &mut impl Write,
) -> Result<()> {
    const USAGE: &str = "Usage: expensetui delete <user> <id>";
    let username = positional(args, 0, USAGE)?;
    let id: i64 = positional(args, 1, USAGE)?
        .parse()
        .with_context(|| format!("Invalid expense id. {USAGE}"))?;

    let session = login(username, db, input)?;
    match db.delete_expense(&session, id) {
        Ok(()) => writeln!(out, "Deleted expense #{id}")?,
        Err(Error::NotFound(_)) => {
            session.logout();
            anyhow::bail!("Failed to delete expense #{id}");
        }
        Err(e) => return Err(e.into()),
    }
    session.logout();
    Ok(())
}

// ── Helpers ──────────────────────────────────────────────────

fn login(username: &str, db: &mut Database, input: &mut impl BufRead) -> Result<Session> {
    let password = read_password(input)?;
    match db.authenticate(username, &password) {
        Ok(session) => {
            info!("event=cli_login module=cli status=ok user_id={}", session.user_id());
            Ok(session)
        }
        Err(Error::InvalidCredentials) => anyhow::bail!("Invalid username or password"),
        Err(e) => Err(e.into()),
    }
}

/// First line of `input`, without the line terminator.
pub(crate) fn read_password(input: &mut impl BufRead) -> Result<String> {
    let mut line = String::new();
    input
        .read_line(&mut line)
        .context("Failed to read password from stdin")?;
    let password = line.trim_end_matches(['\r', '\n']);
    Ok(password.to_string())
}

/// The `index`-th argument that is neither a flag nor a flag's value.
fn positional<'a>(args: &'a [String], index: usize, usage: &str) -> Result<&'a str> {
    let mut found = Vec::new();
    let mut iter = args.iter();
    while let Some(arg) = iter.next() {
        if arg.starts_with("--") {
            iter.next();
        } else {
            found.push(arg.as_str());
        }
    }
    found
        .get(index)
        .copied()
        .ok_or_else(|| anyhow::anyhow!("{usage}"))
}

fn flag_value<'a>(args: &'a [String], flag: &str) -> Option<&'a str> {
    args.windows(2)
        .find(|w| w[0] == flag)
        .map(|w| w[1].as_str())
}

fn optional_date(args: &[String], flag: &str) -> Result<Option<NaiveDate>> {
    match flag_value(args, flag) {
        Some(d) => Ok(Some(validate::parse_date(d)?)),
        None => Ok(None),
    }
}

fn today() -> NaiveDate {
    Local::now().date_naive()
}

#[cfg(test)]
#[path = "cli_tests.rs"]
mod tests;
