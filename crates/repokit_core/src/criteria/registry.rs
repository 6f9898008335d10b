//! Ordered criteria registry owned by one repository instance.
//!
//! # Invariants
//! - Entries apply in registration order regardless of their permanence flag.
//! - `reset_transient` keeps permanent entries in their original relative order.
//! - No deduplication: an entry registered twice applies twice.

use super::{Criteria, SharedCriteria};
use std::fmt::{Debug, Formatter};
use std::sync::Arc;

/// One registered criteria plus its permanence flag.
pub struct CriteriaEntry<'q, Q> {
    criteria: SharedCriteria<'q, Q>,
    permanent: bool,
}

impl<'q, Q> CriteriaEntry<'q, Q> {
    pub fn is_permanent(&self) -> bool {
        self.permanent
    }

    pub fn criteria(&self) -> &SharedCriteria<'q, Q> {
        &self.criteria
    }
}

impl<Q> Clone for CriteriaEntry<'_, Q> {
    fn clone(&self) -> Self {
        Self {
            criteria: Arc::clone(&self.criteria),
            permanent: self.permanent,
        }
    }
}

/// Insertion-ordered list of `{criteria, permanent}` entries.
pub struct CriteriaRegistry<'q, Q> {
    entries: Vec<CriteriaEntry<'q, Q>>,
}

impl<Q> Default for CriteriaRegistry<'_, Q> {
    fn default() -> Self {
        Self {
            entries: Vec::new(),
        }
    }
}

impl<Q> Debug for CriteriaRegistry<'_, Q> {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CriteriaRegistry")
            .field("len", &self.entries.len())
            .field("permanent", &self.permanent_len())
            .finish()
    }
}

impl<'q, Q> CriteriaRegistry<'q, Q> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends one entry at the end of the application order.
    pub fn push(&mut self, criteria: SharedCriteria<'q, Q>, permanent: bool) {
        self.entries.push(CriteriaEntry {
            criteria,
            permanent,
        });
    }

    /// Threads `query` through every entry in order.
    ///
    /// Each criteria receives the builder returned by the previous one.
    pub fn apply(&self, query: Q) -> Q {
        self.entries
            .iter()
            .fold(query, |query, entry| entry.criteria.apply(query))
    }

    /// Drops every transient entry; returns how many were removed.
    pub fn reset_transient(&mut self) -> usize {
        let before = self.entries.len();
        self.entries.retain(CriteriaEntry::is_permanent);
        before - self.entries.len()
    }

    /// Removes every entry, permanent ones included.
    pub fn clear(&mut self) {
        self.entries.clear();
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn permanent_len(&self) -> usize {
        self.entries.iter().filter(|entry| entry.permanent).count()
    }

    pub fn entries(&self) -> &[CriteriaEntry<'q, Q>] {
        &self.entries
    }
}

#[cfg(test)]
mod tests {
    use super::CriteriaRegistry;
    use crate::criteria::{from_fn, SharedCriteria};
    use std::sync::Arc;

    fn tag(label: &'static str) -> SharedCriteria<'static, Vec<&'static str>> {
        Arc::new(from_fn(move |mut trail: Vec<&'static str>| {
            trail.push(label);
            trail
        }))
    }

    #[test]
    fn apply_threads_in_registration_order() {
        let mut registry = CriteriaRegistry::new();
        registry.push(tag("a"), false);
        registry.push(tag("b"), true);
        registry.push(tag("c"), false);

        assert_eq!(registry.apply(Vec::new()), vec!["a", "b", "c"]);
    }

    #[test]
    fn reset_transient_keeps_permanent_order() {
        let mut registry = CriteriaRegistry::new();
        registry.push(tag("p1"), true);
        registry.push(tag("t1"), false);
        registry.push(tag("p2"), true);
        registry.push(tag("t2"), false);

        assert_eq!(registry.reset_transient(), 2);
        assert_eq!(registry.len(), 2);
        assert_eq!(registry.permanent_len(), 2);
        assert_eq!(registry.apply(Vec::new()), vec!["p1", "p2"]);
    }

    #[test]
    fn same_instance_registered_twice_applies_twice() {
        let shared = tag("x");
        let mut registry = CriteriaRegistry::new();
        registry.push(Arc::clone(&shared), false);
        registry.push(shared, false);

        assert_eq!(registry.apply(Vec::new()), vec!["x", "x"]);
    }

    #[test]
    fn clear_drops_permanent_entries() {
        let mut registry = CriteriaRegistry::new();
        registry.push(tag("p"), true);
        registry.clear();
        assert!(registry.is_empty());
        assert!(registry.apply(Vec::new()).is_empty());
    }
}
