mod schema;

use chrono::NaiveDate;
use log::{info, warn};
use rusqlite::types::{ToSql, Type};
use rusqlite::{params, Connection, OptionalExtension, Row};
use rust_decimal::Decimal;
use std::path::Path;
use std::str::FromStr;

use crate::auth;
use crate::error::{Error, Result};
use crate::models::*;
use crate::validate::{self, ValidationError, DATE_FORMAT};

const EXPENSE_SELECT_SQL: &str =
    "SELECT id, user_id, amount, category, description, date FROM expenses";

/// The only gateway to the persistent store.
///
/// Each public operation runs in its own transaction: it either commits in
/// full or is rolled back when the transaction is dropped on an error path.
pub(crate) struct Database {
    conn: Connection,
}

impl Database {
    pub(crate) fn open(path: &Path) -> Result<Self> {
        info!("event=db_open module=db status=start mode=file");
        let conn = Connection::open(path)?;
        conn.execute_batch("PRAGMA journal_mode=WAL; PRAGMA foreign_keys=ON;")?;
        let mut db = Self { conn };
        db.migrate()?;
        info!("event=db_open module=db status=ok mode=file");
        Ok(db)
    }

    #[cfg(test)]
    pub(crate) fn open_in_memory() -> Result<Self> {
        let conn = Connection::open_in_memory()?;
        conn.execute_batch("PRAGMA foreign_keys=ON;")?;
        let mut db = Self { conn };
        db.migrate()?;
        Ok(db)
    }

    fn migrate(&mut self) -> Result<()> {
        let tx = self.conn.transaction()?;
        tx.execute_batch(schema::SCHEMA_V1)?;

        let current: Option<i32> = tx
            .query_row("SELECT version FROM schema_version LIMIT 1", [], |row| {
                row.get(0)
            })
            .optional()?;

        match current {
            None => {
                tx.execute(
                    "INSERT INTO schema_version (version) VALUES (?1)",
                    params![schema::CURRENT_VERSION],
                )?;
            }
            Some(found) if found > schema::CURRENT_VERSION => {
                return Err(Error::UnsupportedSchemaVersion {
                    found,
                    supported: schema::CURRENT_VERSION,
                });
            }
            Some(_) => {}
        }

        tx.commit()?;
        Ok(())
    }

    // ── Users ─────────────────────────────────────────────────

    /// Create an account. A taken username fails with `AlreadyExists` and
    /// writes nothing.
    pub(crate) fn register(&mut self, username: &str, password: &str) -> Result<i64> {
        validate::validate_credentials(username, password)?;
        let username = validate::normalize_username(username);
        let password_hash = auth::hash_password(password)?;

        let tx = self.conn.transaction()?;
        let exists: bool = tx.query_row(
            "SELECT EXISTS(SELECT 1 FROM users WHERE username = ?1)",
            params![username],
            |row| row.get(0),
        )?;
        if exists {
            warn!("event=register module=db status=duplicate");
            return Err(Error::AlreadyExists(username.to_string()));
        }

        let inserted = tx.execute(
            "INSERT INTO users (username, password_hash, created_at) VALUES (?1, ?2, ?3)",
            params![username, password_hash, chrono::Utc::now().to_rfc3339()],
        );
        match inserted {
            Ok(_) => {}
            // Another process registered the same name between our check and insert.
            Err(err) if is_constraint_violation(&err) => {
                warn!("event=register module=db status=duplicate");
                return Err(Error::AlreadyExists(username.to_string()));
            }
            Err(err) => return Err(err.into()),
        }
        let user_id = tx.last_insert_rowid();
        tx.commit()?;

        info!("event=register module=db status=ok user_id={user_id}");
        Ok(user_id)
    }

    /// Check a username/password pair and open a session.
    pub(crate) fn authenticate(&mut self, username: &str, password: &str) -> Result<Session> {
        let username = validate::normalize_username(username);
        if username.is_empty() || password.is_empty() {
            return Err(Error::InvalidCredentials);
        }

        let tx = self.conn.transaction()?;
        let row: Option<(i64, String)> = tx
            .query_row(
                "SELECT id, password_hash FROM users WHERE username = ?1",
                params![username],
                |row| Ok((row.get(0)?, row.get(1)?)),
            )
            .optional()?;
        tx.commit()?;

        let Some((user_id, password_hash)) = row else {
            warn!("event=login module=db status=rejected");
            return Err(Error::InvalidCredentials);
        };
        if !auth::verify_password(password, &password_hash)? {
            warn!("event=login module=db status=rejected");
            return Err(Error::InvalidCredentials);
        }

        info!("event=login module=db status=ok user_id={user_id}");
        Ok(Session::new(user_id, username.to_string()))
    }

    // ── Expenses ──────────────────────────────────────────────

    pub(crate) fn add_expense(&mut self, session: &Session, expense: &NewExpense) -> Result<i64> {
        expense.validate()?;

        let tx = self.conn.transaction()?;
        tx.execute(
            "INSERT INTO expenses (user_id, amount, category, description, date, created_at)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
            params![
                session.user_id(),
                expense.amount.to_string(),
                expense.category.as_str(),
                expense.description,
                expense.date.format(DATE_FORMAT).to_string(),
                chrono::Utc::now().to_rfc3339(),
            ],
        )?;
        let expense_id = tx.last_insert_rowid();
        tx.commit()?;

        info!(
            "event=expense_add module=db status=ok user_id={} expense_id={expense_id}",
            session.user_id()
        );
        Ok(expense_id)
    }

    /// The session owner's expenses matching `filter`, newest first.
    pub(crate) fn get_expenses(
        &mut self,
        session: &Session,
        filter: &ExpenseFilter,
    ) -> Result<Vec<Expense>> {
        let mut sql = format!("{EXPENSE_SELECT_SQL} WHERE user_id = ?1");
        let mut param_values: Vec<Box<dyn ToSql>> = vec![Box::new(session.user_id())];

        push_date_range(&mut sql, &mut param_values, filter.start_date, filter.end_date);
        if let Some(category) = filter.category {
            sql.push_str(&format!(" AND category = ?{}", param_values.len() + 1));
            param_values.push(Box::new(category.as_str()));
        }
        sql.push_str(" ORDER BY date DESC, id DESC");

        let params_ref: Vec<&dyn ToSql> = param_values.iter().map(|p| p.as_ref()).collect();

        let tx = self.conn.transaction()?;
        let expenses = {
            let mut stmt = tx.prepare(&sql)?;
            let rows = stmt.query_map(params_ref.as_slice(), parse_expense_row)?;
            rows.collect::<std::result::Result<Vec<_>, _>>()?
        };
        tx.commit()?;
        Ok(expenses)
    }

    /// Total and count over the date-filtered set. Category is intentionally
    /// not a parameter: the summary covers every category in the range.
    pub(crate) fn get_expense_summary(
        &mut self,
        session: &Session,
        start_date: Option<NaiveDate>,
        end_date: Option<NaiveDate>,
    ) -> Result<ExpenseSummary> {
        let mut sql = String::from("SELECT amount FROM expenses WHERE user_id = ?1");
        let mut param_values: Vec<Box<dyn ToSql>> = vec![Box::new(session.user_id())];
        push_date_range(&mut sql, &mut param_values, start_date, end_date);

        let params_ref: Vec<&dyn ToSql> = param_values.iter().map(|p| p.as_ref()).collect();

        let tx = self.conn.transaction()?;
        let amounts = {
            let mut stmt = tx.prepare(&sql)?;
            let rows = stmt.query_map(params_ref.as_slice(), |row| parse_amount_column(row, 0))?;
            rows.collect::<std::result::Result<Vec<_>, _>>()?
        };
        tx.commit()?;

        let total = amounts
            .iter()
            .try_fold(Decimal::ZERO, |acc, amount| acc.checked_add(*amount))
            .ok_or_else(|| {
                warn!(
                    "event=expense_summary module=db status=overflow user_id={}",
                    session.user_id()
                );
                Error::AmountOverflow
            })?;
        Ok(ExpenseSummary {
            total,
            count: amounts.len() as i64,
        })
    }

    /// Delete an expense owned by the session user. Absent and foreign ids
    /// both fail with `NotFound` and delete nothing.
    pub(crate) fn delete_expense(&mut self, session: &Session, expense_id: i64) -> Result<()> {
        let tx = self.conn.transaction()?;
        let changed = tx.execute(
            "DELETE FROM expenses WHERE id = ?1 AND user_id = ?2",
            params![expense_id, session.user_id()],
        )?;
        if changed == 0 {
            warn!(
                "event=expense_delete module=db status=not_found user_id={} expense_id={}",
                session.user_id(),
                expense_id
            );
            return Err(Error::NotFound(expense_id));
        }
        tx.commit()?;

        info!(
            "event=expense_delete module=db status=ok user_id={} expense_id={expense_id}",
            session.user_id()
        );
        Ok(())
    }

    #[cfg(test)]
    pub(crate) fn count_users_named(&self, username: &str) -> Result<i64> {
        Ok(self.conn.query_row(
            "SELECT COUNT(*) FROM users WHERE username = ?1",
            params![username],
            |row| row.get(0),
        )?)
    }

    #[cfg(test)]
    pub(crate) fn count_expenses(&self) -> Result<i64> {
        Ok(self
            .conn
            .query_row("SELECT COUNT(*) FROM expenses", [], |row| row.get(0))?)
    }

    #[cfg(test)]
    pub(crate) fn conn(&self) -> &Connection {
        &self.conn
    }
}

fn push_date_range(
    sql: &mut String,
    param_values: &mut Vec<Box<dyn ToSql>>,
    start_date: Option<NaiveDate>,
    end_date: Option<NaiveDate>,
) {
    if let Some(start) = start_date {
        sql.push_str(&format!(" AND date >= ?{}", param_values.len() + 1));
        param_values.push(Box::new(start.format(DATE_FORMAT).to_string()));
    }
    if let Some(end) = end_date {
        sql.push_str(&format!(" AND date <= ?{}", param_values.len() + 1));
        param_values.push(Box::new(end.format(DATE_FORMAT).to_string()));
    }
}

fn is_constraint_violation(err: &rusqlite::Error) -> bool {
    matches!(
        err,
        rusqlite::Error::SqliteFailure(e, _) if e.code == rusqlite::ErrorCode::ConstraintViolation
    )
}

fn parse_amount_column(row: &Row<'_>, idx: usize) -> rusqlite::Result<Decimal> {
    let amount_str: String = row.get(idx)?;
    Decimal::from_str(&amount_str)
        .map_err(|e| rusqlite::Error::FromSqlConversionFailure(idx, Type::Text, Box::new(e)))
}

fn parse_expense_row(row: &Row<'_>) -> rusqlite::Result<Expense> {
    let category_str: String = row.get(3)?;
    let category = Category::parse(&category_str).ok_or_else(|| {
        rusqlite::Error::FromSqlConversionFailure(
            3,
            Type::Text,
            Box::new(ValidationError::UnknownCategory(category_str.clone())),
        )
    })?;
    let date_str: String = row.get(5)?;
    let date = NaiveDate::parse_from_str(&date_str, DATE_FORMAT)
        .map_err(|e| rusqlite::Error::FromSqlConversionFailure(5, Type::Text, Box::new(e)))?;

    Ok(Expense {
        id: row.get(0)?,
        user_id: row.get(1)?,
        amount: parse_amount_column(row, 2)?,
        category,
        description: row.get(4)?,
        date,
    })
}
