use super::{quote_identifier, Record, SqliteError, SqliteQuery, SqliteResult};
use crate::model::{Attributes, Columns, Predicate, Value};
use crate::query::{Entity, QueryBuilder};
use rusqlite::{params_from_iter, Connection};

const DEFAULT_KEY: &str = "id";

/// Entity descriptor for one SQLite table.
#[derive(Debug, Clone)]
pub struct SqliteTable<'conn> {
    conn: &'conn Connection,
    table: String,
    key: String,
}

impl<'conn> SqliteTable<'conn> {
    /// Describes `table` with identity column `id`.
    pub fn new(conn: &'conn Connection, table: impl Into<String>) -> SqliteResult<Self> {
        let table = table.into();
        quote_identifier(&table)?;
        Ok(Self {
            conn,
            table,
            key: DEFAULT_KEY.to_string(),
        })
    }

    /// Overrides the identity column.
    pub fn with_key(mut self, key: impl Into<String>) -> SqliteResult<Self> {
        let key = key.into();
        quote_identifier(&key)?;
        self.key = key;
        Ok(self)
    }

    pub fn table(&self) -> &str {
        &self.table
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    fn insert(&self, attributes: &Attributes) -> SqliteResult<()> {
        let table = quote_identifier(&self.table)?;
        if attributes.is_empty() {
            self.conn
                .execute(&format!("INSERT INTO {table} DEFAULT VALUES"), [])?;
            return Ok(());
        }

        let columns = attributes
            .keys()
            .map(|column| quote_identifier(column))
            .collect::<SqliteResult<Vec<_>>>()?;
        let placeholders = vec!["?"; columns.len()].join(", ");
        let sql = format!(
            "INSERT INTO {table} ({}) VALUES ({placeholders})",
            columns.join(", ")
        );
        self.conn.execute(&sql, params_from_iter(attributes.values()))?;
        Ok(())
    }
}

impl<'conn> Entity for SqliteTable<'conn> {
    type Query = SqliteQuery<'conn>;

    fn name(&self) -> &str {
        &self.table
    }

    fn new_query(&self) -> SqliteQuery<'conn> {
        SqliteQuery::new(self.conn, &self.table, &self.key)
    }

    /// Inserts one row and reads it back by key, or by rowid when the key was
    /// generated by SQLite.
    fn create(&self, attributes: &Attributes) -> SqliteResult<Record> {
        self.insert(attributes)?;

        let lookup = match attributes.get(&self.key) {
            Some(value) if !value.is_null() => Predicate::eq(self.key.as_str(), value.clone()),
            _ => Predicate::eq("rowid", Value::Integer(self.conn.last_insert_rowid())),
        };
        self.new_query()
            .filter(lookup)
            .first(&Columns::All)?
            .ok_or_else(|| {
                SqliteError::InvalidData(format!(
                    "row inserted into `{}` could not be read back",
                    self.table
                ))
            })
    }
}
