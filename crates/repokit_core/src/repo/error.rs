//! Repository error taxonomy.
//!
//! # Invariants
//! - `NotFound` is the only variant this layer originates.
//! - `Persistence` carries the engine error value untouched.

use std::error::Error;
use std::fmt::{Display, Formatter};

pub type RepoResult<T, E> = Result<T, RepoError<E>>;

/// Details of a lookup that matched zero rows.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NotFound {
    pub entity: String,
    /// What was looked up, e.g. `id = 7` or `first row`.
    pub lookup: String,
}

impl Display for NotFound {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "no {} record matched {}", self.entity, self.lookup)
    }
}

#[derive(Debug)]
pub enum RepoError<E> {
    NotFound(NotFound),
    Persistence(E),
}

impl<E> RepoError<E> {
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound(_))
    }

    /// Returns the engine error, if this is a passthrough failure.
    pub fn into_persistence(self) -> Option<E> {
        match self {
            Self::Persistence(err) => Some(err),
            Self::NotFound(_) => None,
        }
    }
}

impl<E: Display> Display for RepoError<E> {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NotFound(detail) => write!(f, "{detail}"),
            Self::Persistence(err) => write!(f, "{err}"),
        }
    }
}

impl<E: Error + 'static> Error for RepoError<E> {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::NotFound(_) => None,
            Self::Persistence(err) => Some(err),
        }
    }
}

impl<E> From<E> for RepoError<E> {
    fn from(value: E) -> Self {
        Self::Persistence(value)
    }
}
