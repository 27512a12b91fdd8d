use anyhow::Result;

use crate::db::Database;
use crate::error::Error;
use crate::models::*;
use crate::ui::util::clamp_cursor;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Screen {
    Login,
    Expenses,
}

impl std::fmt::Display for Screen {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Login => write!(f, "Login"),
            Self::Expenses => write!(f, "Expenses"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum InputMode {
    Normal,
    Command,
    Confirm,
}

impl std::fmt::Display for InputMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Normal => write!(f, "NORMAL"),
            Self::Command => write!(f, "COMMAND"),
            Self::Confirm => write!(f, "CONFIRM"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum LoginField {
    Username,
    Password,
}

/// Pending action that requires user confirmation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum PendingAction {
    DeleteExpense { id: i64, description: String },
    Logout,
}

pub(crate) struct App {
    pub(crate) running: bool,
    pub(crate) screen: Screen,
    pub(crate) input_mode: InputMode,
    pub(crate) command_input: String,
    pub(crate) status_message: String,
    pub(crate) show_help: bool,

    // Login form
    pub(crate) login_username: String,
    pub(crate) login_password: String,
    pub(crate) login_field: LoginField,

    // Present only between a successful login and logout
    pub(crate) session: Option<Session>,

    // Expenses
    pub(crate) filter: ExpenseFilter,
    pub(crate) expenses: Vec<Expense>,
    pub(crate) expense_index: usize,
    pub(crate) expense_scroll: usize,
    pub(crate) summary: ExpenseSummary,

    // Confirmation
    pub(crate) pending_action: Option<PendingAction>,
    pub(crate) confirm_message: String,

    // Layout (updated each render frame)
    pub(crate) visible_rows: usize,
}

impl App {
    pub(crate) fn new() -> Self {
        Self {
            running: true,
            screen: Screen::Login,
            input_mode: InputMode::Normal,
            command_input: String::new(),
            status_message: String::new(),
            show_help: false,

            login_username: String::new(),
            login_password: String::new(),
            login_field: LoginField::Username,

            session: None,

            filter: ExpenseFilter::default(),
            expenses: Vec::new(),
            expense_index: 0,
            expense_scroll: 0,
            summary: ExpenseSummary::default(),

            pending_action: None,
            confirm_message: String::new(),

            visible_rows: 20,
        }
    }

    pub(crate) fn login(&mut self, db: &mut Database) -> Result<()> {
        if self.login_username.trim().is_empty() || self.login_password.is_empty() {
            self.set_status("Please enter both username and password");
            return Ok(());
        }

        match db.authenticate(&self.login_username, &self.login_password) {
            Ok(session) => {
                self.login_password.clear();
                self.status_message = format!("Welcome, {}!", session.username());
                self.session = Some(session);
                self.screen = Screen::Expenses;
                self.filter = ExpenseFilter::default();
                self.expense_index = 0;
                self.expense_scroll = 0;
                self.refresh_expenses(db)
            }
            Err(Error::InvalidCredentials) => {
                self.login_password.clear();
                self.set_status("Invalid username or password");
                Ok(())
            }
            Err(e) => Err(e.into()),
        }
    }

    pub(crate) fn register(&mut self, db: &mut Database) -> Result<()> {
        match db.register(&self.login_username, &self.login_password) {
            Ok(_) => {
                self.login_password.clear();
                self.login_field = LoginField::Password;
                self.set_status("Account created successfully! Please login.");
                Ok(())
            }
            Err(Error::AlreadyExists(_)) => {
                self.set_status("Username already exists");
                Ok(())
            }
            Err(Error::Validation(e)) => {
                self.set_status(format!("Error: {e}"));
                Ok(())
            }
            Err(e) => Err(e.into()),
        }
    }

    /// End the session and drop everything loaded for it.
    pub(crate) fn logout(&mut self) {
        if let Some(session) = self.session.take() {
            session.logout();
        }
        self.screen = Screen::Login;
        self.login_password.clear();
        self.login_field = LoginField::Password;
        self.filter = ExpenseFilter::default();
        self.expenses.clear();
        self.expense_index = 0;
        self.expense_scroll = 0;
        self.summary = ExpenseSummary::default();
        self.set_status("Logged out");
    }

    /// Reload the listing (full filter) and the summary (date range only).
    pub(crate) fn refresh_expenses(&mut self, db: &mut Database) -> Result<()> {
        let Some(session) = self.session.as_ref() else {
            return Ok(());
        };
        self.expenses = db.get_expenses(session, &self.filter)?;
        self.summary =
            db.get_expense_summary(session, self.filter.start_date, self.filter.end_date)?;
        clamp_cursor(
            &mut self.expense_index,
            &mut self.expense_scroll,
            self.expenses.len(),
        );
        Ok(())
    }

    pub(crate) fn selected_expense(&self) -> Option<&Expense> {
        self.expenses.get(self.expense_index)
    }

    pub(crate) fn set_status(&mut self, msg: impl Into<String>) {
        self.status_message = msg.into();
    }
}
