//! SQLite adapter for the query-builder and entity contracts.
//!
//! # Responsibility
//! - Compile predicates, ordering and projections into parameterized SQL.
//! - Execute terminal operations on a borrowed `rusqlite::Connection`.
//!
//! # Invariants
//! - Every table and column name reaching SQL text matched
//!   `^[A-Za-z_][A-Za-z0-9_]*$`; values are always bound parameters.
//! - Identifiers are backtick-quoted. SQLite never reads a backtick-quoted
//!   token as a string literal, so an unknown column is a prepare error on
//!   every connection, whatever its double-quoted-string setting.
//! - Builder steps never fail; an invalid identifier is reported by the
//!   terminal call that would have executed it.

mod error;
mod query;
mod record;
mod table;

pub use error::{SqliteError, SqliteResult};
pub use query::SqliteQuery;
pub use record::Record;
pub use table::SqliteTable;

use crate::model::Value;
use once_cell::sync::Lazy;
use regex::Regex;
use rusqlite::types::{ToSql, ToSqlOutput, ValueRef};

static IDENTIFIER_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[A-Za-z_][A-Za-z0-9_]*$").expect("valid identifier regex"));

pub(crate) fn is_valid_identifier(name: &str) -> bool {
    IDENTIFIER_RE.is_match(name)
}

/// Validates and backtick-quotes one identifier.
pub(crate) fn quote_identifier(name: &str) -> SqliteResult<String> {
    if !is_valid_identifier(name) {
        return Err(SqliteError::InvalidIdentifier(name.to_string()));
    }
    Ok(format!("`{name}`"))
}

impl ToSql for Value {
    fn to_sql(&self) -> rusqlite::Result<ToSqlOutput<'_>> {
        Ok(match self {
            Self::Null => ToSqlOutput::Owned(rusqlite::types::Value::Null),
            Self::Integer(value) => ToSqlOutput::Owned(rusqlite::types::Value::Integer(*value)),
            Self::Real(value) => ToSqlOutput::Owned(rusqlite::types::Value::Real(*value)),
            Self::Text(value) => ToSqlOutput::Borrowed(ValueRef::Text(value.as_bytes())),
            Self::Blob(value) => ToSqlOutput::Borrowed(ValueRef::Blob(value.as_slice())),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::{is_valid_identifier, quote_identifier};

    #[test]
    fn identifiers_are_restricted_to_word_characters() {
        assert!(is_valid_identifier("users"));
        assert!(is_valid_identifier("_tenant_id2"));
        assert!(!is_valid_identifier("2fast"));
        assert!(!is_valid_identifier("name; DROP TABLE users"));
        assert!(!is_valid_identifier(""));
    }

    #[test]
    fn quote_identifier_wraps_valid_names() {
        assert_eq!(quote_identifier("email").unwrap(), "`email`");
        assert!(quote_identifier("a\"b").is_err());
        assert!(quote_identifier("a`b").is_err());
    }
}
