#![allow(clippy::unwrap_used)]

use chrono::NaiveDate;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use super::*;
use crate::validate::ValidationError;

fn day(s: &str) -> NaiveDate {
    NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
}

// ── Category ──────────────────────────────────────────────────

#[test]
fn test_category_parse() {
    assert_eq!(Category::parse("Food"), Some(Category::Food));
    assert_eq!(Category::parse("FOOD"), Some(Category::Food));
    assert_eq!(Category::parse("entertainment"), Some(Category::Entertainment));
    assert_eq!(Category::parse("Groceries"), None);
    assert_eq!(Category::parse(""), None);
}

#[test]
fn test_category_all_order() {
    let names: Vec<&str> = Category::all().iter().map(|c| c.as_str()).collect();
    assert_eq!(
        names,
        [
            "Food",
            "Transport",
            "Shopping",
            "Bills",
            "Entertainment",
            "Healthcare",
            "Education",
            "Other"
        ]
    );
}

#[test]
fn test_category_roundtrip() {
    for c in Category::all() {
        assert_eq!(Category::parse(c.as_str()), Some(*c), "Roundtrip failed for {c}");
    }
}

#[test]
fn test_category_display() {
    assert_eq!(format!("{}", Category::Healthcare), "Healthcare");
}

// ── NewExpense ────────────────────────────────────────────────

#[test]
fn test_new_expense_blank_description_defaults() {
    let e = NewExpense::new(dec!(40.00), Category::Bills, "  ", day("2024-01-05")).unwrap();
    assert_eq!(e.description, DEFAULT_DESCRIPTION);
}

#[test]
fn test_new_expense_rejects_non_positive() {
    assert_eq!(
        NewExpense::new(Decimal::ZERO, Category::Food, "x", day("2024-01-05")),
        Err(ValidationError::NonPositiveAmount)
    );
    assert_eq!(
        NewExpense::new(dec!(-1), Category::Food, "x", day("2024-01-05")),
        Err(ValidationError::NonPositiveAmount)
    );
}

#[test]
fn test_new_expense_trims_description() {
    let e = NewExpense::new(dec!(12.50), Category::Food, " lunch ", day("2024-01-10")).unwrap();
    assert_eq!(e.amount, dec!(12.50));
    assert_eq!(e.description, "lunch");
    assert_eq!(e.date, day("2024-01-10"));
}

#[test]
fn test_new_expense_rejects_amount_over_limit() {
    assert_eq!(
        NewExpense::new(dec!(1000000000.01), Category::Bills, "", day("2024-01-05")),
        Err(ValidationError::AmountTooLarge)
    );
    let mut e = NewExpense::new(dec!(5), Category::Bills, "", day("2024-01-05")).unwrap();
    e.amount = Decimal::MAX;
    assert_eq!(e.validate(), Err(ValidationError::AmountTooLarge));
}

#[test]
fn test_validate_catches_mutated_amount() {
    let mut e = NewExpense::new(dec!(5), Category::Other, "", day("2024-03-01")).unwrap();
    e.amount = dec!(-5);
    assert_eq!(e.validate(), Err(ValidationError::NonPositiveAmount));
}

// ── Filter / Summary ──────────────────────────────────────────

#[test]
fn test_filter_default_is_empty() {
    assert!(ExpenseFilter::default().is_empty());
    let f = ExpenseFilter {
        category: Some(Category::Food),
        ..Default::default()
    };
    assert!(!f.is_empty());
}

#[test]
fn test_summary_average() {
    let s = ExpenseSummary {
        total: dec!(52.50),
        count: 2,
    };
    assert_eq!(s.average(), dec!(26.25));
}

#[test]
fn test_summary_average_rounds() {
    let s = ExpenseSummary {
        total: dec!(10),
        count: 3,
    };
    assert_eq!(s.average(), dec!(3.33));
}

#[test]
fn test_summary_average_empty() {
    assert_eq!(ExpenseSummary::default().average(), Decimal::ZERO);
}

#[test]
fn test_session_accessors_and_logout() {
    let session = Session::new(7, "alice".into());
    assert_eq!(session.user_id(), 7);
    assert_eq!(session.username(), "alice");
    session.logout();
}
