//! Criteria-driven repository over an injected entity descriptor.
//!
//! # Responsibility
//! - Resolve base queries from the entity and thread them through the registry.
//! - Expire transient criteria after every query construction.
//! - Translate empty `*_or_fail` lookups into `RepoError::NotFound`.
//!
//! # Invariants
//! - The entity descriptor is fixed at construction.
//! - Explicit page sizes never overwrite the configured default.
//! - Instances are not meant to be shared across concurrent callers; all
//!   registry-mutating calls take `&mut self`.

use super::error::{NotFound, RepoError};
use super::{QueryResult, Repository};
use crate::config::RepositoryConfig;
use crate::criteria::{Criteria, CriteriaRegistry, SharedCriteria};
use crate::model::{Attributes, Columns, Page, Predicate, SimplePage, Value};
use crate::query::{Entity, QueryBuilder, RecordOf};
use log::debug;
use std::sync::Arc;

/// Repository bound to one entity descriptor.
pub struct EntityRepository<'q, E: Entity> {
    entity: E,
    registry: CriteriaRegistry<'q, E::Query>,
    per_page: u32,
}

impl<'q, E: Entity> EntityRepository<'q, E> {
    /// Creates a repository with an empty registry and the default page size.
    pub fn new(entity: E) -> Self {
        Self::with_config(entity, RepositoryConfig::default())
    }

    pub fn with_config(entity: E, config: RepositoryConfig) -> Self {
        Self {
            entity,
            registry: CriteriaRegistry::new(),
            per_page: config.per_page(),
        }
    }

    pub fn entity(&self) -> &E {
        &self.entity
    }

    /// Default page size used when a pagination call omits one.
    pub fn per_page(&self) -> u32 {
        self.per_page
    }

    /// Read-only view of the registered criteria.
    pub fn registry(&self) -> &CriteriaRegistry<'q, E::Query> {
        &self.registry
    }

    /// Registers an already shared criteria instance.
    pub fn shared_criteria(
        &mut self,
        criteria: SharedCriteria<'q, E::Query>,
        permanent: bool,
    ) -> &mut Self {
        self.registry.push(criteria, permanent);
        self
    }

    fn apply_criteria(&mut self, query: E::Query) -> E::Query {
        let applied = self.registry.len();
        let query = self.registry.apply(query);
        let expired = self.registry.reset_transient();
        debug!(
            "event=query_build module=repo status=ok entity={} applied={} expired={} retained={}",
            self.entity.name(),
            applied,
            expired,
            self.registry.len()
        );
        query
    }

    fn not_found(&self, lookup: String) -> NotFound {
        NotFound {
            entity: self.entity.name().to_string(),
            lookup,
        }
    }

    fn keyed_query(&mut self, id: Value) -> E::Query {
        let query = self.query();
        let key = query.key_name().to_string();
        query.filter(Predicate::eq(key, id))
    }
}

impl<'q, E: Entity> Repository<'q> for EntityRepository<'q, E> {
    type Query = E::Query;

    fn query(&mut self) -> Self::Query {
        let query = self.entity.new_query();
        self.apply_criteria(query)
    }

    fn criteria<C>(&mut self, criteria: C, permanent: bool) -> &mut Self
    where
        C: Criteria<Self::Query> + 'q,
    {
        self.shared_criteria(Arc::new(criteria), permanent)
    }

    fn clear_criteria(&mut self) -> &mut Self {
        self.registry.clear();
        self
    }

    fn all(&mut self, columns: &Columns) -> QueryResult<Self::Query, Vec<RecordOf<Self::Query>>> {
        Ok(self.query().get(columns)?)
    }

    fn paginate(
        &mut self,
        per_page: Option<u32>,
        page: u32,
        columns: &Columns,
    ) -> QueryResult<Self::Query, Page<RecordOf<Self::Query>>> {
        let per_page = per_page.unwrap_or(self.per_page);
        Ok(self.query().paginate(per_page, page, columns)?)
    }

    fn simple_paginate(
        &mut self,
        per_page: Option<u32>,
        page: u32,
        columns: &Columns,
    ) -> QueryResult<Self::Query, SimplePage<RecordOf<Self::Query>>> {
        let per_page = per_page.unwrap_or(self.per_page);
        Ok(self.query().simple_paginate(per_page, page, columns)?)
    }

    fn find<V: Into<Value>>(
        &mut self,
        id: V,
        columns: &Columns,
    ) -> QueryResult<Self::Query, Option<RecordOf<Self::Query>>> {
        Ok(self.query().find(id.into(), columns)?)
    }

    fn find_or_fail<V: Into<Value>>(
        &mut self,
        id: V,
        columns: &Columns,
    ) -> QueryResult<Self::Query, RecordOf<Self::Query>> {
        let id = id.into();
        let query = self.query();
        let lookup = format!("{} = {id}", query.key_name());
        query
            .find(id, columns)?
            .ok_or_else(|| RepoError::NotFound(self.not_found(lookup)))
    }

    fn first(
        &mut self,
        columns: &Columns,
    ) -> QueryResult<Self::Query, Option<RecordOf<Self::Query>>> {
        Ok(self.query().first(columns)?)
    }

    fn first_or_fail(
        &mut self,
        columns: &Columns,
    ) -> QueryResult<Self::Query, RecordOf<Self::Query>> {
        self.query()
            .first(columns)?
            .ok_or_else(|| RepoError::NotFound(self.not_found("first row".to_string())))
    }

    fn find_by<V: Into<Value>>(
        &mut self,
        column: &str,
        value: V,
        columns: &Columns,
    ) -> QueryResult<Self::Query, Option<RecordOf<Self::Query>>> {
        Ok(self
            .query()
            .filter(Predicate::eq(column, value))
            .first(columns)?)
    }

    fn find_by_or_fail<V: Into<Value>>(
        &mut self,
        column: &str,
        value: V,
        columns: &Columns,
    ) -> QueryResult<Self::Query, RecordOf<Self::Query>> {
        let predicate = Predicate::eq(column, value);
        let lookup = predicate.to_string();
        self.query()
            .filter(predicate)
            .first(columns)?
            .ok_or_else(|| RepoError::NotFound(self.not_found(lookup)))
    }

    fn count(&mut self) -> QueryResult<Self::Query, u64> {
        Ok(self.query().count()?)
    }

    fn create(&self, attributes: &Attributes) -> QueryResult<Self::Query, RecordOf<Self::Query>> {
        Ok(self.entity.create(attributes)?)
    }

    fn update<V: Into<Value>>(
        &mut self,
        id: V,
        attributes: &Attributes,
    ) -> QueryResult<Self::Query, u64> {
        Ok(self.keyed_query(id.into()).update(attributes)?)
    }

    fn update_all(&mut self, attributes: &Attributes) -> QueryResult<Self::Query, u64> {
        Ok(self.query().update(attributes)?)
    }

    fn delete<V: Into<Value>>(&mut self, id: V) -> QueryResult<Self::Query, u64> {
        Ok(self.keyed_query(id.into()).delete()?)
    }

    fn delete_all(&mut self) -> QueryResult<Self::Query, u64> {
        Ok(self.query().delete()?)
    }
}
