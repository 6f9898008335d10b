use super::{is_valid_identifier, quote_identifier, Record, SqliteError, SqliteResult};
use crate::model::{Attributes, Columns, Direction, Page, Predicate, SimplePage, Value};
use crate::query::QueryBuilder;
use rusqlite::{params_from_iter, Connection};

/// Statement builder for one table.
///
/// Predicates are ANDed in the order they were added; ordering clauses apply
/// to reads only.
#[derive(Debug, Clone)]
pub struct SqliteQuery<'conn> {
    conn: &'conn Connection,
    table: String,
    key: String,
    predicates: Vec<Predicate>,
    orders: Vec<(String, Direction)>,
    invalid_identifier: Option<String>,
}

impl<'conn> SqliteQuery<'conn> {
    /// `table` and `key` must already be validated identifiers.
    pub(crate) fn new(conn: &'conn Connection, table: &str, key: &str) -> Self {
        Self {
            conn,
            table: table.to_string(),
            key: key.to_string(),
            predicates: Vec::new(),
            orders: Vec::new(),
            invalid_identifier: None,
        }
    }

    pub fn table(&self) -> &str {
        &self.table
    }

    pub fn predicates(&self) -> &[Predicate] {
        &self.predicates
    }

    /// Renders the read statement for `columns` together with its bind values.
    pub fn to_sql(&self, columns: &Columns) -> SqliteResult<(String, Vec<Value>)> {
        self.select_sql(columns, None)
    }

    fn remember_identifier(&mut self, name: &str) {
        if self.invalid_identifier.is_none() && !is_valid_identifier(name) {
            self.invalid_identifier = Some(name.to_string());
        }
    }

    fn ensure_valid(&self) -> SqliteResult<()> {
        match &self.invalid_identifier {
            Some(name) => Err(SqliteError::InvalidIdentifier(name.clone())),
            None => Ok(()),
        }
    }

    fn where_clause(&self, binds: &mut Vec<Value>) -> SqliteResult<String> {
        if self.predicates.is_empty() {
            return Ok(String::new());
        }

        let mut parts = Vec::with_capacity(self.predicates.len());
        for predicate in &self.predicates {
            let column = quote_identifier(predicate.column())?;
            let part = match predicate {
                Predicate::Compare {
                    operator, value, ..
                } => {
                    binds.push(value.clone());
                    format!("{column} {} ?", operator.as_sql())
                }
                Predicate::IsNull(_) => format!("{column} IS NULL"),
                Predicate::NotNull(_) => format!("{column} IS NOT NULL"),
                Predicate::In { values, .. } if values.is_empty() => "0 = 1".to_string(),
                Predicate::In { values, .. } => {
                    binds.extend(values.iter().cloned());
                    let placeholders = vec!["?"; values.len()].join(", ");
                    format!("{column} IN ({placeholders})")
                }
            };
            parts.push(part);
        }

        Ok(format!(" WHERE {}", parts.join(" AND ")))
    }

    fn order_clause(&self) -> SqliteResult<String> {
        if self.orders.is_empty() {
            return Ok(String::new());
        }

        let parts = self
            .orders
            .iter()
            .map(|(column, direction)| {
                quote_identifier(column).map(|column| format!("{column} {}", direction.as_sql()))
            })
            .collect::<SqliteResult<Vec<_>>>()?;
        Ok(format!(" ORDER BY {}", parts.join(", ")))
    }

    fn projection(columns: &Columns) -> SqliteResult<String> {
        match columns {
            Columns::All => Ok("*".to_string()),
            Columns::Only(list) if list.is_empty() => Ok("*".to_string()),
            Columns::Only(list) => Ok(list
                .iter()
                .map(|column| quote_identifier(column))
                .collect::<SqliteResult<Vec<_>>>()?
                .join(", ")),
        }
    }

    fn select_sql(
        &self,
        columns: &Columns,
        window: Option<(u64, u64)>,
    ) -> SqliteResult<(String, Vec<Value>)> {
        self.ensure_valid()?;
        let mut binds = Vec::new();
        let mut sql = format!(
            "SELECT {} FROM {}{}{}",
            Self::projection(columns)?,
            quote_identifier(&self.table)?,
            self.where_clause(&mut binds)?,
            self.order_clause()?
        );
        if let Some((limit, offset)) = window {
            sql.push_str(" LIMIT ? OFFSET ?");
            binds.push(Value::Integer(i64::try_from(limit).unwrap_or(i64::MAX)));
            binds.push(Value::Integer(i64::try_from(offset).unwrap_or(i64::MAX)));
        }
        Ok((sql, binds))
    }

    fn fetch(&self, columns: &Columns, window: Option<(u64, u64)>) -> SqliteResult<Vec<Record>> {
        let (sql, binds) = self.select_sql(columns, window)?;
        let mut stmt = self.conn.prepare(&sql)?;
        let names = stmt
            .column_names()
            .into_iter()
            .map(String::from)
            .collect::<Vec<_>>();

        let mut rows = stmt.query(params_from_iter(binds.iter()))?;
        let mut records = Vec::new();
        while let Some(row) = rows.next()? {
            records.push(Record::from_row(&names, row)?);
        }
        Ok(records)
    }

    fn count_rows(&self) -> SqliteResult<u64> {
        self.ensure_valid()?;
        let mut binds = Vec::new();
        let sql = format!(
            "SELECT COUNT(*) FROM {}{}",
            quote_identifier(&self.table)?,
            self.where_clause(&mut binds)?
        );
        let count = self
            .conn
            .query_row(&sql, params_from_iter(binds.iter()), |row| row.get::<_, i64>(0))?;
        Ok(u64::try_from(count).unwrap_or(0))
    }

    fn page_window(per_page: u32, page: u32) -> SqliteResult<(u32, u64)> {
        if per_page == 0 {
            return Err(SqliteError::InvalidPageSize(per_page));
        }
        let page = page.max(1);
        Ok((page, u64::from(page - 1) * u64::from(per_page)))
    }

    /// Row limit for simple pagination: one row past the page to detect more.
    fn over_fetch_limit(per_page: u32) -> u64 {
        u64::from(per_page) + 1
    }
}

impl QueryBuilder for SqliteQuery<'_> {
    type Record = Record;
    type Error = SqliteError;

    fn key_name(&self) -> &str {
        &self.key
    }

    fn filter(mut self, predicate: Predicate) -> Self {
        self.remember_identifier(predicate.column());
        self.predicates.push(predicate);
        self
    }

    fn order_by(mut self, column: &str, direction: Direction) -> Self {
        self.remember_identifier(column);
        self.orders.push((column.to_string(), direction));
        self
    }

    fn get(self, columns: &Columns) -> SqliteResult<Vec<Record>> {
        self.fetch(columns, None)
    }

    fn first(self, columns: &Columns) -> SqliteResult<Option<Record>> {
        Ok(self.fetch(columns, Some((1, 0)))?.into_iter().next())
    }

    fn paginate(self, per_page: u32, page: u32, columns: &Columns) -> SqliteResult<Page<Record>> {
        let (current_page, offset) = Self::page_window(per_page, page)?;
        let total = self.count_rows()?;
        let items = self.fetch(columns, Some((u64::from(per_page), offset)))?;
        Ok(Page {
            items,
            per_page,
            current_page,
            total,
        })
    }

    fn simple_paginate(
        self,
        per_page: u32,
        page: u32,
        columns: &Columns,
    ) -> SqliteResult<SimplePage<Record>> {
        let (current_page, offset) = Self::page_window(per_page, page)?;
        let limit = Self::over_fetch_limit(per_page);
        let mut items = self.fetch(columns, Some((limit, offset)))?;
        let has_more = items.len() > per_page as usize;
        items.truncate(per_page as usize);
        Ok(SimplePage {
            items,
            per_page,
            current_page,
            has_more,
        })
    }

    fn count(self) -> SqliteResult<u64> {
        self.count_rows()
    }

    fn update(self, attributes: &Attributes) -> SqliteResult<u64> {
        self.ensure_valid()?;
        if attributes.is_empty() {
            return Ok(0);
        }

        let mut binds = Vec::with_capacity(attributes.len());
        let mut assignments = Vec::with_capacity(attributes.len());
        for (column, value) in attributes {
            assignments.push(format!("{} = ?", quote_identifier(column)?));
            binds.push(value.clone());
        }

        let where_sql = self.where_clause(&mut binds)?;
        let sql = format!(
            "UPDATE {} SET {}{}",
            quote_identifier(&self.table)?,
            assignments.join(", "),
            where_sql
        );
        let changed = self.conn.execute(&sql, params_from_iter(binds.iter()))?;
        Ok(changed as u64)
    }

    fn delete(self) -> SqliteResult<u64> {
        self.ensure_valid()?;
        let mut binds = Vec::new();
        let sql = format!(
            "DELETE FROM {}{}",
            quote_identifier(&self.table)?,
            self.where_clause(&mut binds)?
        );
        let changed = self.conn.execute(&sql, params_from_iter(binds.iter()))?;
        Ok(changed as u64)
    }
}
