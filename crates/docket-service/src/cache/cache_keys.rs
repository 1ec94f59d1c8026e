//! Cache key generators for consistent key naming.

use docket_core::{TaskFilter, TaskId};

/// Prefix of every single-task key.
const TASK_PREFIX: &str = "docket:task";

/// Prefix of every cached task collection.
pub const COLLECTION_PREFIX: &str = "docket:tasks:list";

/// Key of a single task.
#[must_use]
pub fn task_by_id(id: TaskId) -> String {
    format!("{TASK_PREFIX}:{id}")
}

/// Key of one filtered, paginated collection page.
///
/// Segments are appended in a fixed order: status, assignee, then
/// pagination. Absent predicates contribute nothing. `None` maps to the
/// distinguished `:all` key.
#[must_use]
pub fn task_collection(filter: Option<&TaskFilter>) -> String {
    let Some(filter) = filter else {
        return format!("{COLLECTION_PREFIX}:all");
    };

    let mut key = String::from(COLLECTION_PREFIX);
    if let Some(status) = filter.status {
        key.push_str(":status:");
        key.push_str(status.as_str());
    }
    if let Some(assignee) = &filter.assignee {
        key.push_str(":assignee:");
        key.push_str(assignee);
    }
    key.push_str(&format!(":page:{}:size:{}", filter.page, filter.page_size));
    key
}

/// Pattern matching every cached collection, whatever its filter.
#[must_use]
pub fn collection_pattern() -> String {
    format!("{COLLECTION_PREFIX}*")
}
