#![allow(clippy::unwrap_used)]

use chrono::NaiveDate;
use rust_decimal_macros::dec;

use super::util::*;
use crate::models::{Category, ExpenseFilter};

// ── truncate ──────────────────────────────────────────────────

#[test]
fn test_truncate_short_string() {
    assert_eq!(truncate("lunch", 10), "lunch");
}

#[test]
fn test_truncate_long_string() {
    assert_eq!(truncate("groceries for the week", 9), "grocerie…");
}

#[test]
fn test_truncate_exact_and_zero() {
    assert_eq!(truncate("taxi", 4), "taxi");
    assert_eq!(truncate("taxi", 0), "");
    assert_eq!(truncate("taxi", 1), "…");
}

#[test]
fn test_truncate_unicode() {
    assert_eq!(truncate("café résumé", 5), "café…");
}

// ── format_amount ─────────────────────────────────────────────

#[test]
fn test_format_amount_basic() {
    assert_eq!(format_amount(dec!(52.5)), "$52.50");
    assert_eq!(format_amount(dec!(0)), "$0.00");
}

#[test]
fn test_format_amount_thousands() {
    assert_eq!(format_amount(dec!(1234567.891)), "$1,234,567.89");
}

#[test]
fn test_format_amount_negative() {
    assert_eq!(format_amount(dec!(-42.50)), "-$42.50");
}

// ── mask / describe_filter ────────────────────────────────────

#[test]
fn test_mask() {
    assert_eq!(mask("pass1"), "•••••");
    assert_eq!(mask(""), "");
}

#[test]
fn test_describe_filter() {
    assert_eq!(describe_filter(&ExpenseFilter::default()), "All expenses");

    let filter = ExpenseFilter {
        start_date: NaiveDate::from_ymd_opt(2024, 1, 1),
        end_date: None,
        category: Some(Category::Food),
    };
    assert_eq!(describe_filter(&filter), "Food | 2024-01-01 → …");
}

// ── cursor helpers ────────────────────────────────────────────

#[test]
fn test_scroll_down_follows_page() {
    let (mut index, mut scroll) = (0, 0);
    for _ in 0..5 {
        scroll_down(&mut index, &mut scroll, 10, 3);
    }
    assert_eq!(index, 5);
    assert_eq!(scroll, 3);

    // Stops at the end of the list
    for _ in 0..10 {
        scroll_down(&mut index, &mut scroll, 10, 3);
    }
    assert_eq!(index, 9);
}

#[test]
fn test_scroll_up_pulls_scroll() {
    let (mut index, mut scroll) = (3, 3);
    scroll_up(&mut index, &mut scroll);
    assert_eq!((index, scroll), (2, 2));
}

#[test]
fn test_clamp_cursor_after_delete() {
    let (mut index, mut scroll) = (4, 2);
    clamp_cursor(&mut index, &mut scroll, 3);
    assert_eq!((index, scroll), (2, 2));

    clamp_cursor(&mut index, &mut scroll, 0);
    assert_eq!((index, scroll), (0, 0));
}
