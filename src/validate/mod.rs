//! Input parsing and validation, independent of the store.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use std::str::FromStr;

use crate::models::{Category, DEFAULT_DESCRIPTION};

pub(crate) const DATE_FORMAT: &str = "%Y-%m-%d";
pub(crate) const MIN_PASSWORD_LEN: usize = 4;

/// Largest accepted single amount (1,000,000,000). Keeps any realistic sum far
/// inside `Decimal`'s range. The schema CHECK repeats this bound.
pub(crate) const MAX_AMOUNT: Decimal = Decimal::from_parts(1_000_000_000, 0, 0, false, 0);

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum ValidationError {
    InvalidAmount(String),
    NonPositiveAmount,
    AmountTooLarge,
    InvalidDate(String),
    UnknownCategory(String),
    EmptyUsername,
    EmptyPassword,
    PasswordTooShort,
}

impl std::fmt::Display for ValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidAmount(s) => write!(f, "invalid amount: '{s}'"),
            Self::NonPositiveAmount => write!(f, "amount must be greater than 0"),
            Self::AmountTooLarge => write!(f, "amount must not exceed {MAX_AMOUNT}"),
            Self::InvalidDate(s) => write!(f, "invalid date '{s}', expected YYYY-MM-DD"),
            Self::UnknownCategory(s) => write!(
                f,
                "unknown category '{s}', expected one of: {}",
                Category::all()
                    .iter()
                    .map(|c| c.as_str())
                    .collect::<Vec<_>>()
                    .join(", ")
            ),
            Self::EmptyUsername => write!(f, "username must not be empty"),
            Self::EmptyPassword => write!(f, "password must not be empty"),
            Self::PasswordTooShort => write!(
                f,
                "password must be at least {MIN_PASSWORD_LEN} characters"
            ),
        }
    }
}

impl std::error::Error for ValidationError {}

pub(crate) fn parse_amount(input: &str) -> Result<Decimal, ValidationError> {
    let trimmed = input.trim();
    let amount = Decimal::from_str(trimmed)
        .map_err(|_| ValidationError::InvalidAmount(trimmed.to_string()))?;
    check_amount(amount)?;
    Ok(amount)
}

pub(crate) fn check_amount(amount: Decimal) -> Result<(), ValidationError> {
    if amount <= Decimal::ZERO {
        return Err(ValidationError::NonPositiveAmount);
    }
    if amount > MAX_AMOUNT {
        return Err(ValidationError::AmountTooLarge);
    }
    Ok(())
}

/// Strict `YYYY-MM-DD`. Unpadded fields such as `2024-1-5` are rejected so
/// stored dates always compare correctly as text.
pub(crate) fn parse_date(input: &str) -> Result<NaiveDate, ValidationError> {
    let trimmed = input.trim();
    if trimmed.len() != 10 {
        return Err(ValidationError::InvalidDate(trimmed.to_string()));
    }
    NaiveDate::parse_from_str(trimmed, DATE_FORMAT)
        .map_err(|_| ValidationError::InvalidDate(trimmed.to_string()))
}

pub(crate) fn parse_category(input: &str) -> Result<Category, ValidationError> {
    let trimmed = input.trim();
    Category::parse(trimmed).ok_or_else(|| ValidationError::UnknownCategory(trimmed.to_string()))
}

/// Empty input and `All` mean "every category".
pub(crate) fn parse_category_filter(input: &str) -> Result<Option<Category>, ValidationError> {
    let trimmed = input.trim();
    if trimmed.is_empty() || trimmed.eq_ignore_ascii_case("all") {
        return Ok(None);
    }
    parse_category(trimmed).map(Some)
}

pub(crate) fn normalize_description(input: &str) -> String {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        DEFAULT_DESCRIPTION.to_string()
    } else {
        trimmed.to_string()
    }
}

pub(crate) fn normalize_username(input: &str) -> &str {
    input.trim()
}

/// Rules for creating an account. Login only needs both fields non-empty.
pub(crate) fn validate_credentials(username: &str, password: &str) -> Result<(), ValidationError> {
    if normalize_username(username).is_empty() {
        return Err(ValidationError::EmptyUsername);
    }
    if password.is_empty() {
        return Err(ValidationError::EmptyPassword);
    }
    if password.chars().count() < MIN_PASSWORD_LEN {
        return Err(ValidationError::PasswordTooShort);
    }
    Ok(())
}
