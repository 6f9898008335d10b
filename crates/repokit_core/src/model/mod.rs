//! Shared data vocabulary between criteria, repositories and query builders.
//!
//! # Responsibility
//! - Define engine-neutral values, predicates and page containers.
//!
//! # Invariants
//! - Nothing here depends on a concrete persistence engine.

pub mod page;
pub mod value;

pub use page::{Page, SimplePage};
pub use value::{attributes, Attributes, Columns, Direction, Operator, Predicate, Value};
