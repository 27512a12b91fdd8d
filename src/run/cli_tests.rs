#![allow(clippy::unwrap_used)]

use std::io::Cursor;

use super::*;

fn args(list: &[&str]) -> Vec<String> {
    list.iter().map(|s| s.to_string()).collect()
}

/// Run a command with `stdin` as input and return what it printed.
fn run(db: &mut Database, list: &[&str], stdin: &str) -> Result<String> {
    let mut input = Cursor::new(stdin.as_bytes().to_vec());
    let mut out = Vec::new();
    run_cli(&args(list), db, &mut input, &mut out)?;
    Ok(String::from_utf8(out).unwrap())
}

fn registered_db() -> Database {
    let mut db = Database::open_in_memory().unwrap();
    run(&mut db, &["register", "alice"], "pass1\n").unwrap();
    db
}

#[test]
fn test_read_password_strips_line_ending() {
    let mut input = Cursor::new(b"secret\r\nnext\n".to_vec());
    assert_eq!(read_password(&mut input).unwrap(), "secret");

    let mut empty = Cursor::new(Vec::new());
    assert_eq!(read_password(&mut empty).unwrap(), "");
}

#[test]
fn test_positional_skips_flags() {
    let a = args(&["alice", "--date", "2024-01-01", "12.50", "--desc", "x", "Food"]);
    assert_eq!(positional(&a, 0, "usage").unwrap(), "alice");
    assert_eq!(positional(&a, 1, "usage").unwrap(), "12.50");
    assert_eq!(positional(&a, 2, "usage").unwrap(), "Food");
    assert_eq!(positional(&a, 3, "usage").unwrap_err().to_string(), "usage");
}

#[test]
fn test_register_twice_fails() {
    let mut db = registered_db();
    let err = run(&mut db, &["register", "alice"], "other\n").unwrap_err();
    assert_eq!(err.to_string(), "Username already exists");
}

#[test]
fn test_register_short_password_fails() {
    let mut db = Database::open_in_memory().unwrap();
    assert!(run(&mut db, &["register", "bob"], "abc\n").is_err());
}

#[test]
fn test_add_list_summary_delete() {
    let mut db = registered_db();
    let out = run(
        &mut db,
        &["add", "alice", "12.50", "food", "--date", "2024-01-10", "--desc", "lunch"],
        "pass1\n",
    )
    .unwrap();
    assert!(out.contains("Added expense #1"));
    assert!(out.contains("$12.50 Food on 2024-01-10 (lunch)"));

    run(
        &mut db,
        &["add", "alice", "40", "Bills", "--date", "2024-02-01"],
        "pass1\n",
    )
    .unwrap();

    let out = run(&mut db, &["list", "alice"], "pass1\n").unwrap();
    let bills = out.find("2024-02-01").unwrap();
    let food = out.find("2024-01-10").unwrap();
    assert!(bills < food, "newest first:\n{out}");
    assert!(out.contains("No description"));

    let out = run(&mut db, &["list", "alice", "--category", "Food"], "pass1\n").unwrap();
    assert!(!out.contains("Bills"));

    // Category is not a summary option
    let out = run(&mut db, &["summary", "alice", "--to", "2024-01-31"], "pass1\n").unwrap();
    assert!(out.contains("until 2024-01-31"));
    assert!(out.contains("$12.50"));

    let out = run(&mut db, &["delete", "alice", "1"], "pass1\n").unwrap();
    assert_eq!(out.trim(), "Deleted expense #1");
    let err = run(&mut db, &["delete", "alice", "1"], "pass1\n").unwrap_err();
    assert_eq!(err.to_string(), "Failed to delete expense #1");
}

#[test]
fn test_wrong_password_rejected() {
    let mut db = registered_db();
    let err = run(&mut db, &["list", "alice"], "wrong\n").unwrap_err();
    assert_eq!(err.to_string(), "Invalid username or password");
}

#[test]
fn test_cannot_delete_other_users_expense() {
    let mut db = registered_db();
    run(&mut db, &["register", "bob"], "pass2\n").unwrap();
    run(&mut db, &["add", "alice", "5", "Other"], "pass1\n").unwrap();

    assert!(run(&mut db, &["delete", "bob", "1"], "pass2\n").is_err());
    let out = run(&mut db, &["list", "alice"], "pass1\n").unwrap();
    assert!(out.contains("$5.00"));
}

#[test]
fn test_add_validates_before_login() {
    let mut db = registered_db();
    let err = run(&mut db, &["add", "alice", "0", "Food"], "pass1\n").unwrap_err();
    assert!(err.to_string().contains("greater than 0"));
    assert!(run(&mut db, &["add", "alice", "5", "Rent"], "pass1\n").is_err());
    let err = run(&mut db, &["add", "alice", "1000000000.01", "Bills"], "pass1\n")
        .unwrap_err();
    assert!(err.to_string().contains("must not exceed"));
    assert!(run(&mut db, &["add", "alice", "5"], "pass1\n").is_err());
}

#[test]
fn test_categories_and_version() {
    let mut db = Database::open_in_memory().unwrap();
    let out = run(&mut db, &["categories"], "").unwrap();
    assert_eq!(out.lines().count(), Category::all().len());
    assert!(out.lines().any(|l| l == "Entertainment"));

    let out = run(&mut db, &["--version"], "").unwrap();
    assert!(out.starts_with("expensetui "));
    assert!(run(&mut db, &["bogus"], "").is_err());
}
