//! Criteria-driven repository layer.
//!
//! Application code talks to a [`Repository`]; query shaping is delegated to
//! composable [`Criteria`] that are applied, in registration order, to a fresh
//! engine query on every call. Transient criteria expire after one query
//! construction, permanent ones stay until cleared.

pub mod config;
pub mod criteria;
pub mod db;
pub mod logging;
pub mod model;
pub mod query;
pub mod repo;
pub mod sqlite;

pub use config::{ConfigError, RepositoryConfig, DEFAULT_PER_PAGE};
pub use criteria::{
    from_fn, Criteria, CriteriaRegistry, FnCriteria, OrderBy, SharedCriteria, WhereEq,
    WherePredicate, WithoutSoftDeleted,
};
pub use logging::{default_log_level, init_logging, logging_status};
pub use model::{
    attributes, Attributes, Columns, Direction, Operator, Page, Predicate, SimplePage, Value,
};
pub use query::{Entity, ErrorOf, QueryBuilder, RecordOf};
pub use repo::{EntityRepository, NotFound, QueryResult, RepoError, RepoResult, Repository};
pub use sqlite::{Record, SqliteError, SqliteQuery, SqliteResult, SqliteTable};

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

#[cfg(test)]
mod tests {
    use super::core_version;

    #[test]
    fn version_is_not_empty() {
        assert!(!core_version().is_empty());
    }
}
