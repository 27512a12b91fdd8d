use rust_decimal::Decimal;

use crate::models::ExpenseFilter;

/// Amount with thousand separators and two decimals, e.g. `$1,234.50`.
pub(crate) fn format_amount(val: Decimal) -> String {
    let formatted = format!("{:.2}", val.abs().round_dp(2));
    let (int_part, dec_part) = formatted.split_once('.').unwrap_or((&formatted, "00"));

    let with_commas: String = int_part
        .as_bytes()
        .rchunks(3)
        .rev()
        .map(|chunk| std::str::from_utf8(chunk).unwrap_or(""))
        .collect::<Vec<_>>()
        .join(",");

    let sign = if val < Decimal::ZERO { "-" } else { "" };
    format!("{sign}${with_commas}.{dec_part}")
}

/// Truncate to `max` characters, ending in "…" when shortened. UTF-8 safe.
pub(crate) fn truncate(s: &str, max: usize) -> String {
    if max == 0 {
        return String::new();
    }
    if s.chars().count() <= max {
        return s.to_string();
    }
    let truncated: String = s.chars().take(max - 1).collect();
    format!("{truncated}…")
}

pub(crate) fn mask(secret: &str) -> String {
    "•".repeat(secret.chars().count())
}

/// One-line description of the active filter, e.g. `Food | 2024-01-01 → …`.
pub(crate) fn describe_filter(filter: &ExpenseFilter) -> String {
    if filter.is_empty() {
        return "All expenses".to_string();
    }
    let mut parts = Vec::new();
    if let Some(category) = filter.category {
        parts.push(category.to_string());
    }
    if filter.start_date.is_some() || filter.end_date.is_some() {
        let start = filter
            .start_date
            .map(|d| d.to_string())
            .unwrap_or_else(|| "…".into());
        let end = filter
            .end_date
            .map(|d| d.to_string())
            .unwrap_or_else(|| "…".into());
        parts.push(format!("{start} → {end}"));
    }
    parts.join(" | ")
}

/// Move a list cursor down by one, adjusting scroll to keep cursor visible.
pub(crate) fn scroll_down(index: &mut usize, scroll: &mut usize, len: usize, page: usize) {
    if *index + 1 < len {
        *index += 1;
        if *index >= *scroll + page {
            *scroll = index.saturating_sub(page.saturating_sub(1));
        }
    }
}

/// Move a list cursor up by one, adjusting scroll to keep cursor visible.
pub(crate) fn scroll_up(index: &mut usize, scroll: &mut usize) {
    *index = index.saturating_sub(1);
    if *index < *scroll {
        *scroll = *index;
    }
}

/// Keep a cursor inside a list that may have shrunk.
pub(crate) fn clamp_cursor(index: &mut usize, scroll: &mut usize, len: usize) {
    if *index >= len {
        *index = len.saturating_sub(1);
    }
    if *scroll > *index {
        *scroll = *index;
    }
}
