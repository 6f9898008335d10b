//! Paginated result containers.
//!
//! Rendering (links, page windows) belongs to callers; these types only carry
//! what the query produced.

use serde::{Deserialize, Serialize};

/// Length-aware page: knows the total number of matching rows.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Page<R> {
    pub items: Vec<R>,
    pub per_page: u32,
    /// 1-based.
    pub current_page: u32,
    pub total: u64,
}

impl<R> Page<R> {
    /// Last 1-based page number; `1` for an empty result.
    pub fn last_page(&self) -> u32 {
        if self.total == 0 || self.per_page == 0 {
            return 1;
        }
        let pages = self.total.div_ceil(u64::from(self.per_page));
        u32::try_from(pages).unwrap_or(u32::MAX)
    }

    pub fn has_more_pages(&self) -> bool {
        self.current_page < self.last_page()
    }
}

/// Page without a total count. `has_more` is detected by over-fetching one row.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SimplePage<R> {
    pub items: Vec<R>,
    pub per_page: u32,
    pub current_page: u32,
    pub has_more: bool,
}
