//! Criteria contract and composition helpers.
//!
//! # Responsibility
//! - Define the single `apply` capability every query-shaping rule exposes.
//! - Provide the ordered registry repositories use to hold criteria.
//!
//! # Invariants
//! - `apply` returns the builder the next criteria must receive; callers never
//!   reuse the builder they passed in.
//! - Criteria carry no repository state; registration flags live in the registry.

pub mod common;
pub mod registry;

pub use common::{OrderBy, WhereEq, WherePredicate, WithoutSoftDeleted};
pub use registry::{CriteriaEntry, CriteriaRegistry};

use std::sync::Arc;

/// One query-shaping rule (filter, ordering, scope).
pub trait Criteria<Q> {
    fn apply(&self, query: Q) -> Q;
}

/// Shared, type-erased criteria as stored by [`CriteriaRegistry`].
///
/// `'q` bounds the borrows a criteria may hold, so criteria written against a
/// builder that borrows a connection can be erased as well.
pub type SharedCriteria<'q, Q> = Arc<dyn Criteria<Q> + 'q>;

impl<Q, C: Criteria<Q> + ?Sized> Criteria<Q> for Arc<C> {
    fn apply(&self, query: Q) -> Q {
        (**self).apply(query)
    }
}

impl<Q, C: Criteria<Q> + ?Sized> Criteria<Q> for Box<C> {
    fn apply(&self, query: Q) -> Q {
        (**self).apply(query)
    }
}

/// Closure-backed criteria. Build with [`from_fn`].
#[derive(Clone)]
pub struct FnCriteria<F> {
    f: F,
}

impl<Q, F> Criteria<Q> for FnCriteria<F>
where
    F: Fn(Q) -> Q,
{
    fn apply(&self, query: Q) -> Q {
        (self.f)(query)
    }
}

/// Wraps a closure as criteria.
pub fn from_fn<Q, F>(f: F) -> FnCriteria<F>
where
    F: Fn(Q) -> Q,
{
    FnCriteria { f }
}
