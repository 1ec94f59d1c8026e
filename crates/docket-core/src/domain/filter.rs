//! List filter for tasks.

use serde::{Deserialize, Serialize};

use super::TaskStatus;
use crate::PageRequest;

/// Normalized list filter.
///
/// Construction always goes through [`TaskFilter::new`], so `page` and
/// `page_size` are already defaulted and clamped. Two filters are
/// interchangeable for caching iff they compare equal.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TaskFilter {
    /// Only tasks in this status.
    pub status: Option<TaskStatus>,
    /// Only tasks assigned to this assignee.
    pub assignee: Option<String>,
    /// 1-based page number.
    pub page: u32,
    /// Items per page.
    pub page_size: u32,
}

impl TaskFilter {
    /// Builds a filter, applying the pagination defaults and clamps.
    ///
    /// An empty assignee is the same as no assignee predicate.
    #[must_use]
    pub fn new(
        status: Option<TaskStatus>,
        assignee: Option<String>,
        page: Option<i64>,
        page_size: Option<i64>,
    ) -> Self {
        let request = PageRequest::new(page, page_size);
        Self {
            status,
            assignee: assignee.filter(|a| !a.is_empty()),
            page: request.page,
            page_size: request.page_size,
        }
    }

    /// Returns the pagination part of the filter.
    #[must_use]
    pub const fn page_request(&self) -> PageRequest {
        PageRequest {
            page: self.page,
            page_size: self.page_size,
        }
    }

    /// Returns the row offset of the first task on the page.
    #[must_use]
    pub const fn offset(&self) -> u64 {
        self.page_request().offset()
    }
}

impl Default for TaskFilter {
    fn default() -> Self {
        Self::new(None, None, None, None)
    }
}
