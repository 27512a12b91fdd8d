mod category;
mod expense;
mod session;

pub use category::Category;
pub use expense::{Expense, ExpenseFilter, ExpenseSummary, NewExpense, DEFAULT_DESCRIPTION};
pub use session::Session;

#[cfg(test)]
mod tests;
