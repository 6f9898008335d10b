use super::{SqliteError, SqliteResult};
use crate::model::{Attributes, Value};
use rusqlite::types::ValueRef;
use rusqlite::Row;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// One retrieved row as a column-name to value map.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Record {
    fields: BTreeMap<String, Value>,
}

impl Record {
    pub(crate) fn from_row(columns: &[String], row: &Row<'_>) -> SqliteResult<Self> {
        let mut fields = BTreeMap::new();
        for (index, column) in columns.iter().enumerate() {
            let value = match row.get_ref(index)? {
                ValueRef::Null => Value::Null,
                ValueRef::Integer(value) => Value::Integer(value),
                ValueRef::Real(value) => Value::Real(value),
                ValueRef::Text(bytes) => {
                    let text = std::str::from_utf8(bytes).map_err(|_| {
                        SqliteError::InvalidData(format!("column `{column}` is not valid UTF-8"))
                    })?;
                    Value::Text(text.to_string())
                }
                ValueRef::Blob(bytes) => Value::Blob(bytes.to_vec()),
            };
            fields.insert(column.clone(), value);
        }
        Ok(Self { fields })
    }

    pub fn get(&self, column: &str) -> Option<&Value> {
        self.fields.get(column)
    }

    pub fn get_i64(&self, column: &str) -> Option<i64> {
        self.get(column).and_then(Value::as_i64)
    }

    pub fn get_str(&self, column: &str) -> Option<&str> {
        self.get(column).and_then(Value::as_str)
    }

    pub fn get_bytes(&self, column: &str) -> Option<&[u8]> {
        self.get(column).and_then(Value::as_bytes)
    }

    pub fn columns(&self) -> impl Iterator<Item = &str> {
        self.fields.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    pub fn into_attributes(self) -> Attributes {
        self.fields
    }
}
