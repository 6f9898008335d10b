//! Contracts consumed from the persistence engine.
//!
//! # Responsibility
//! - Describe the minimum query-builder capability a repository needs.
//! - Describe the entity descriptor that hands out fresh builders.
//!
//! # Invariants
//! - Builders are threaded by value: every shaping step consumes the builder
//!   and returns the one the next step must use.
//! - Shaping steps are infallible; engines surface problems from the terminal
//!   call that executes the statement.

use crate::model::{Attributes, Columns, Direction, Page, Predicate, SimplePage, Value};
use std::error::Error;

/// Record type produced by builder `Q`.
pub type RecordOf<Q> = <Q as QueryBuilder>::Record;
/// Engine error type of builder `Q`.
pub type ErrorOf<Q> = <Q as QueryBuilder>::Error;

/// Engine-provided statement builder.
pub trait QueryBuilder: Sized {
    type Record;
    type Error: Error + 'static;

    /// Name of the identity column used by key lookups.
    fn key_name(&self) -> &str;

    /// Adds one predicate, ANDed with the existing ones.
    fn filter(self, predicate: Predicate) -> Self;

    fn order_by(self, column: &str, direction: Direction) -> Self;

    /// Retrieves every matching record.
    fn get(self, columns: &Columns) -> Result<Vec<Self::Record>, Self::Error>;

    /// Retrieves the first matching record, if any.
    fn first(self, columns: &Columns) -> Result<Option<Self::Record>, Self::Error>;

    /// Retrieves the record whose key equals `id`.
    fn find(self, id: Value, columns: &Columns) -> Result<Option<Self::Record>, Self::Error> {
        let key = self.key_name().to_string();
        self.filter(Predicate::eq(key, id)).first(columns)
    }

    fn paginate(
        self,
        per_page: u32,
        page: u32,
        columns: &Columns,
    ) -> Result<Page<Self::Record>, Self::Error>;

    fn simple_paginate(
        self,
        per_page: u32,
        page: u32,
        columns: &Columns,
    ) -> Result<SimplePage<Self::Record>, Self::Error>;

    fn count(self) -> Result<u64, Self::Error>;

    /// Applies `attributes` to every matching row; returns affected rows.
    fn update(self, attributes: &Attributes) -> Result<u64, Self::Error>;

    /// Deletes every matching row; returns affected rows.
    fn delete(self) -> Result<u64, Self::Error>;
}

/// Entity/model descriptor injected into a repository.
pub trait Entity {
    type Query: QueryBuilder;

    /// Human-readable entity name used in diagnostics and `NotFound` errors.
    fn name(&self) -> &str;

    /// Produces a fresh, unconstrained builder.
    fn new_query(&self) -> Self::Query;

    /// Persists a new record directly, outside any builder.
    fn create(
        &self,
        attributes: &Attributes,
    ) -> Result<RecordOf<Self::Query>, ErrorOf<Self::Query>>;
}

impl<T: Entity + ?Sized> Entity for &T {
    type Query = T::Query;

    fn name(&self) -> &str {
        (**self).name()
    }

    fn new_query(&self) -> Self::Query {
        (**self).new_query()
    }

    fn create(
        &self,
        attributes: &Attributes,
    ) -> Result<RecordOf<Self::Query>, ErrorOf<Self::Query>> {
        (**self).create(attributes)
    }
}
