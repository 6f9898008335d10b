//! Repository contract and the criteria-driven implementation.
//!
//! # Responsibility
//! - Define the CRUD capability set application code depends on.
//! - Own the query lifecycle: fresh base query, ordered criteria application,
//!   transient reset.
//!
//! # Invariants
//! - Every retrieval and mutation except `create` builds its query through
//!   `query()` and therefore consumes transient criteria.
//! - `create` never consults the criteria registry.
//! - Engine errors are returned as `RepoError::Persistence` without inspection.

pub mod entity_repo;
pub mod error;

pub use entity_repo::EntityRepository;
pub use error::{NotFound, RepoError, RepoResult};

use crate::criteria::Criteria;
use crate::model::{Attributes, Columns, Page, SimplePage, Value};
use crate::query::{ErrorOf, QueryBuilder, RecordOf};

/// Result of a repository call whose builder type is `Q`.
pub type QueryResult<Q, T> = RepoResult<T, ErrorOf<Q>>;

/// Capability set exposed to application code.
///
/// `'q` is the lifetime registered criteria must outlive; it is `'static` for
/// builders that own their engine handle.
pub trait Repository<'q> {
    type Query: QueryBuilder;

    /// Builds a fresh query with every registered criteria applied.
    fn query(&mut self) -> Self::Query;

    /// Registers criteria for the next query construction, or for every
    /// future one when `permanent` is set.
    fn criteria<C>(&mut self, criteria: C, permanent: bool) -> &mut Self
    where
        C: Criteria<Self::Query> + 'q;

    /// Shorthand for `criteria(criteria, false)`.
    fn push_criteria<C>(&mut self, criteria: C) -> &mut Self
    where
        C: Criteria<Self::Query> + 'q,
    {
        self.criteria(criteria, false)
    }

    /// Shorthand for `criteria(criteria, true)`.
    fn permanent_criteria<C>(&mut self, criteria: C) -> &mut Self
    where
        C: Criteria<Self::Query> + 'q,
    {
        self.criteria(criteria, true)
    }

    /// Forgets every registered criteria, permanent ones included.
    fn clear_criteria(&mut self) -> &mut Self;

    fn all(&mut self, columns: &Columns) -> QueryResult<Self::Query, Vec<RecordOf<Self::Query>>>;

    /// Length-aware page. `None` falls back to the configured page size.
    fn paginate(
        &mut self,
        per_page: Option<u32>,
        page: u32,
        columns: &Columns,
    ) -> QueryResult<Self::Query, Page<RecordOf<Self::Query>>>;

    fn simple_paginate(
        &mut self,
        per_page: Option<u32>,
        page: u32,
        columns: &Columns,
    ) -> QueryResult<Self::Query, SimplePage<RecordOf<Self::Query>>>;

    fn find<V: Into<Value>>(
        &mut self,
        id: V,
        columns: &Columns,
    ) -> QueryResult<Self::Query, Option<RecordOf<Self::Query>>>;

    fn find_or_fail<V: Into<Value>>(
        &mut self,
        id: V,
        columns: &Columns,
    ) -> QueryResult<Self::Query, RecordOf<Self::Query>>;

    fn first(
        &mut self,
        columns: &Columns,
    ) -> QueryResult<Self::Query, Option<RecordOf<Self::Query>>>;

    fn first_or_fail(
        &mut self,
        columns: &Columns,
    ) -> QueryResult<Self::Query, RecordOf<Self::Query>>;

    fn find_by<V: Into<Value>>(
        &mut self,
        column: &str,
        value: V,
        columns: &Columns,
    ) -> QueryResult<Self::Query, Option<RecordOf<Self::Query>>>;

    fn find_by_or_fail<V: Into<Value>>(
        &mut self,
        column: &str,
        value: V,
        columns: &Columns,
    ) -> QueryResult<Self::Query, RecordOf<Self::Query>>;

    fn count(&mut self) -> QueryResult<Self::Query, u64>;

    /// Persists a new record. Registered criteria do not apply.
    fn create(&self, attributes: &Attributes) -> QueryResult<Self::Query, RecordOf<Self::Query>>;

    /// Updates the record with key `id`; returns affected rows.
    fn update<V: Into<Value>>(
        &mut self,
        id: V,
        attributes: &Attributes,
    ) -> QueryResult<Self::Query, u64>;

    /// Updates every record matched by the registered criteria.
    fn update_all(&mut self, attributes: &Attributes) -> QueryResult<Self::Query, u64>;

    fn delete<V: Into<Value>>(&mut self, id: V) -> QueryResult<Self::Query, u64>;

    /// Deletes every record matched by the registered criteria.
    fn delete_all(&mut self) -> QueryResult<Self::Query, u64>;
}
