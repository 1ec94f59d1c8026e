//! Task service trait definition.

use crate::dto::{CreateTaskRequest, ListTasksQuery, TaskListResponse, UpdateTaskRequest};
use async_trait::async_trait;
use docket_core::{DocketResult, Interface, Task, TaskId};

/// Task orchestration: validation, persistence and cache consistency.
///
/// Errors from the record store come back in kind (`NotFound`, `Database`,
/// `Timeout`). Cache failures never do.
#[async_trait]
pub trait TaskService: Interface + Send + Sync {
    /// Validates and persists a new task, then drops every cached list.
    async fn create_task(&self, request: CreateTaskRequest) -> DocketResult<Task>;

    /// Gets a task by ID, cache first.
    async fn get_task(&self, id: TaskId) -> DocketResult<Task>;

    /// Lists one page of tasks matching the query.
    async fn list_tasks(&self, query: ListTasksQuery) -> DocketResult<TaskListResponse>;

    /// Applies the present fields of a partial update.
    async fn update_task(&self, id: TaskId, request: UpdateTaskRequest) -> DocketResult<Task>;

    /// Deletes a task.
    async fn delete_task(&self, id: TaskId) -> DocketResult<()>;

    /// Counts every stored task. Never cached.
    async fn count_tasks(&self) -> DocketResult<u64>;
}
