use std::error::Error as StdError;
use std::fmt::{Display, Formatter};

use crate::validate::ValidationError;

pub(crate) type Result<T> = std::result::Result<T, Error>;

/// Failures surfaced by the data-access layer.
///
/// Every variant leaves the store in its prior state; callers decide how to
/// present it.
#[derive(Debug)]
pub(crate) enum Error {
    /// Registration attempted with a username that is already taken.
    AlreadyExists(String),
    /// Unknown username or wrong password. The two cases are not distinguished.
    InvalidCredentials,
    Validation(ValidationError),
    /// Expense is absent or owned by another user.
    NotFound(i64),
    /// A summary total does not fit in a `Decimal`.
    AmountOverflow,
    Storage(rusqlite::Error),
    PasswordHash(argon2::password_hash::Error),
    UnsupportedSchemaVersion { found: i32, supported: i32 },
}

impl Display for Error {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::AlreadyExists(username) => write!(f, "username '{username}' already exists"),
            Self::InvalidCredentials => write!(f, "invalid username or password"),
            Self::Validation(err) => write!(f, "{err}"),
            Self::NotFound(id) => write!(f, "expense {id} not found"),
            Self::AmountOverflow => write!(f, "expense total is too large to compute"),
            Self::Storage(err) => write!(f, "storage error: {err}"),
            Self::PasswordHash(err) => write!(f, "password hashing failed: {err}"),
            Self::UnsupportedSchemaVersion { found, supported } => write!(
                f,
                "database schema version {found} is newer than supported version {supported}"
            ),
        }
    }
}

impl StdError for Error {
    fn source(&self) -> Option<&(dyn StdError + 'static)> {
        match self {
            Self::Validation(err) => Some(err),
            Self::Storage(err) => Some(err),
            _ => None,
        }
    }
}

impl From<rusqlite::Error> for Error {
    fn from(value: rusqlite::Error) -> Self {
        Self::Storage(value)
    }
}

impl From<ValidationError> for Error {
    fn from(value: ValidationError) -> Self {
        Self::Validation(value)
    }
}

impl From<argon2::password_hash::Error> for Error {
    fn from(value: argon2::password_hash::Error) -> Self {
        Self::PasswordHash(value)
    }
}
