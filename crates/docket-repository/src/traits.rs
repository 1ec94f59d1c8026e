//! Repository trait definitions.

use async_trait::async_trait;
use docket_core::{DocketResult, Interface, Task, TaskFilter, TaskId};

/// Durable store of tasks; the source of truth.
///
/// A missing task is always reported as `DocketError::NotFound`, never as a
/// database error, so callers can tell "absent" apart from "store failed".
#[async_trait]
pub trait TaskRepository: Interface + Send + Sync {
    /// Inserts a new task.
    async fn create(&self, task: &Task) -> DocketResult<()>;

    /// Finds a task by ID.
    async fn get_by_id(&self, id: TaskId) -> DocketResult<Task>;

    /// Returns one page of tasks matching the filter, newest first, together
    /// with the total number of matching tasks across all pages.
    async fn get_all(&self, filter: &TaskFilter) -> DocketResult<(Vec<Task>, u64)>;

    /// Overwrites the mutable fields of an existing task.
    async fn update(&self, task: &Task) -> DocketResult<()>;

    /// Deletes a task by ID.
    async fn delete(&self, id: TaskId) -> DocketResult<()>;

    /// Counts all tasks.
    async fn count(&self) -> DocketResult<u64>;
}
