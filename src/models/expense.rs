use chrono::NaiveDate;
use rust_decimal::Decimal;

use super::Category;
use crate::validate::{self, ValidationError};

/// Stored in place of a blank description.
pub const DEFAULT_DESCRIPTION: &str = "No description";

#[derive(Debug, Clone, PartialEq)]
pub struct Expense {
    pub id: i64,
    pub user_id: i64,
    pub amount: Decimal,
    pub category: Category,
    pub description: String,
    pub date: NaiveDate,
}

/// An expense that has not been persisted yet.
#[derive(Debug, Clone, PartialEq)]
pub struct NewExpense {
    pub amount: Decimal,
    pub category: Category,
    pub description: String,
    pub date: NaiveDate,
}

impl NewExpense {
    pub fn new(
        amount: Decimal,
        category: Category,
        description: &str,
        date: NaiveDate,
    ) -> Result<Self, ValidationError> {
        let expense = Self {
            amount,
            category,
            description: validate::normalize_description(description),
            date,
        };
        expense.validate()?;
        Ok(expense)
    }

    pub fn validate(&self) -> Result<(), ValidationError> {
        validate::check_amount(self.amount)?;
        // ISO text ordering only holds for four-digit years.
        let year = chrono::Datelike::year(&self.date);
        if !(1..=9999).contains(&year) {
            return Err(ValidationError::InvalidDate(self.date.to_string()));
        }
        Ok(())
    }
}

/// Optional constraints on a listing. `None` fields do not restrict.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExpenseFilter {
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
    pub category: Option<Category>,
}

impl ExpenseFilter {
    pub fn is_empty(&self) -> bool {
        self.start_date.is_none() && self.end_date.is_none() && self.category.is_none()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ExpenseSummary {
    pub total: Decimal,
    pub count: i64,
}

impl ExpenseSummary {
    /// Mean amount rounded to cents; zero for an empty set.
    pub fn average(&self) -> Decimal {
        if self.count == 0 {
            return Decimal::ZERO;
        }
        (self.total / Decimal::from(self.count)).round_dp(2)
    }
}
