//! Stock criteria that work against any [`QueryBuilder`].

use super::Criteria;
use crate::model::{Direction, Predicate, Value};
use crate::query::QueryBuilder;

/// Equality filter, `column = value`. Also the shape of tenant scopes.
#[derive(Debug, Clone, PartialEq)]
pub struct WhereEq {
    pub column: String,
    pub value: Value,
}

impl WhereEq {
    pub fn new(column: impl Into<String>, value: impl Into<Value>) -> Self {
        Self {
            column: column.into(),
            value: value.into(),
        }
    }
}

impl<Q: QueryBuilder> Criteria<Q> for WhereEq {
    fn apply(&self, query: Q) -> Q {
        query.filter(Predicate::eq(self.column.as_str(), self.value.clone()))
    }
}

/// Arbitrary predicate (ranges, null checks, `IN` lists).
#[derive(Debug, Clone, PartialEq)]
pub struct WherePredicate(pub Predicate);

impl<Q: QueryBuilder> Criteria<Q> for WherePredicate {
    fn apply(&self, query: Q) -> Q {
        query.filter(self.0.clone())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OrderBy {
    pub column: String,
    pub direction: Direction,
}

impl OrderBy {
    pub fn asc(column: impl Into<String>) -> Self {
        Self {
            column: column.into(),
            direction: Direction::Asc,
        }
    }

    pub fn desc(column: impl Into<String>) -> Self {
        Self {
            column: column.into(),
            direction: Direction::Desc,
        }
    }
}

impl<Q: QueryBuilder> Criteria<Q> for OrderBy {
    fn apply(&self, query: Q) -> Q {
        query.order_by(&self.column, self.direction)
    }
}

/// Soft-delete scope: only rows whose tombstone column is `NULL`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WithoutSoftDeleted {
    pub column: String,
}

impl Default for WithoutSoftDeleted {
    fn default() -> Self {
        Self {
            column: "deleted_at".to_string(),
        }
    }
}

impl<Q: QueryBuilder> Criteria<Q> for WithoutSoftDeleted {
    fn apply(&self, query: Q) -> Q {
        query.filter(Predicate::IsNull(self.column.clone()))
    }
}
