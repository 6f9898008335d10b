use crate::db::DbError;
use std::error::Error;
use std::fmt::{Display, Formatter};

pub type SqliteResult<T> = Result<T, SqliteError>;

/// SQLite adapter error. Passed through repositories unchanged.
#[derive(Debug)]
pub enum SqliteError {
    Db(DbError),
    /// Table or column name rejected before reaching SQL text.
    InvalidIdentifier(String),
    InvalidPageSize(u32),
    /// Row content the adapter cannot represent as a `Value`.
    InvalidData(String),
}

impl SqliteError {
    /// Returns the underlying SQLite error code, if any.
    pub fn sqlite_error_code(&self) -> Option<rusqlite::ErrorCode> {
        match self {
            Self::Db(DbError::Sqlite(err)) => err.sqlite_error_code(),
            _ => None,
        }
    }
}

impl Display for SqliteError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Db(err) => write!(f, "{err}"),
            Self::InvalidIdentifier(name) => write!(f, "invalid sql identifier `{name}`"),
            Self::InvalidPageSize(value) => {
                write!(f, "page size must be greater than zero, got {value}")
            }
            Self::InvalidData(message) => write!(f, "invalid row data: {message}"),
        }
    }
}

impl Error for SqliteError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Db(err) => Some(err),
            Self::InvalidIdentifier(_) => None,
            Self::InvalidPageSize(_) => None,
            Self::InvalidData(_) => None,
        }
    }
}

impl From<DbError> for SqliteError {
    fn from(value: DbError) -> Self {
        Self::Db(value)
    }
}

impl From<rusqlite::Error> for SqliteError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Db(DbError::Sqlite(value))
    }
}
