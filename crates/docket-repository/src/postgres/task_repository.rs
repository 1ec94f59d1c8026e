//! PostgreSQL task repository implementation.

use crate::{traits::TaskRepository, DatabasePoolInterface};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use docket_core::{DocketError, DocketResult, Task, TaskFilter, TaskId, TaskStatus};
use sqlx::{FromRow, Postgres, QueryBuilder};
use std::sync::Arc;
use tracing::debug;
use uuid::Uuid;

const SELECT_COLUMNS: &str =
    "SELECT id, title, description, status, assignee, created_at, updated_at FROM tasks";

/// PostgreSQL task repository implementation.
#[derive(Clone)]
pub struct PgTaskRepository {
    pool: Arc<dyn DatabasePoolInterface>,
}

impl PgTaskRepository {
    /// Creates a new PostgreSQL task repository.
    #[must_use]
    pub fn new(pool: Arc<dyn DatabasePoolInterface>) -> Self {
        Self { pool }
    }
}

/// Database row representation of a task.
#[derive(Debug, FromRow)]
struct TaskRow {
    id: Uuid,
    title: String,
    description: String,
    status: String,
    assignee: String,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl TryFrom<TaskRow> for Task {
    type Error = DocketError;

    fn try_from(row: TaskRow) -> Result<Self, Self::Error> {
        let status: TaskStatus = row.status.parse().map_err(|_| {
            DocketError::Internal(format!(
                "Invalid status '{}' stored for task {}",
                row.status, row.id
            ))
        })?;

        Ok(Task {
            id: TaskId::from_uuid(row.id),
            title: row.title,
            description: row.description,
            status,
            assignee: row.assignee,
            created_at: row.created_at,
            updated_at: row.updated_at,
        })
    }
}

/// Appends the `WHERE` clause for the filter's equality predicates.
fn push_filters(builder: &mut QueryBuilder<'_, Postgres>, filter: &TaskFilter) {
    let mut separator = " WHERE ";
    if let Some(status) = filter.status {
        builder.push(separator).push("status = ").push_bind(status.as_str());
        separator = " AND ";
    }
    if let Some(assignee) = &filter.assignee {
        builder.push(separator).push("assignee = ").push_bind(assignee.clone());
    }
}

#[async_trait]
impl TaskRepository for PgTaskRepository {
    async fn create(&self, task: &Task) -> DocketResult<()> {
        debug!("Inserting task: {}", task.id);

        sqlx::query(
            r"
            INSERT INTO tasks (id, title, description, status, assignee, created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            ",
        )
        .bind(task.id.into_inner())
        .bind(&task.title)
        .bind(&task.description)
        .bind(task.status.as_str())
        .bind(&task.assignee)
        .bind(task.created_at)
        .bind(task.updated_at)
        .execute(self.pool.inner())
        .await?;

        Ok(())
    }

    async fn get_by_id(&self, id: TaskId) -> DocketResult<Task> {
        debug!("Finding task by id: {}", id);

        let row = sqlx::query_as::<_, TaskRow>(&format!("{SELECT_COLUMNS} WHERE id = $1"))
            .bind(id.into_inner())
            .fetch_optional(self.pool.inner())
            .await?;

        row.ok_or_else(|| DocketError::not_found("Task", id))
            .and_then(Task::try_from)
    }

    async fn get_all(&self, filter: &TaskFilter) -> DocketResult<(Vec<Task>, u64)> {
        debug!(
            "Listing tasks: status={:?}, assignee={:?}, page={}, page_size={}",
            filter.status, filter.assignee, filter.page, filter.page_size
        );

        let mut count_query = QueryBuilder::<Postgres>::new("SELECT COUNT(*) FROM tasks");
        push_filters(&mut count_query, filter);
        let total: i64 = count_query
            .build_query_scalar::<i64>()
            .fetch_one(self.pool.inner())
            .await?;

        let request = filter.page_request();
        let mut page_query = QueryBuilder::<Postgres>::new(SELECT_COLUMNS);
        push_filters(&mut page_query, filter);
        page_query
            .push(" ORDER BY created_at DESC, id DESC LIMIT ")
            .push_bind(i64::from(request.limit()))
            .push(" OFFSET ")
            .push_bind(i64::try_from(request.offset()).unwrap_or(i64::MAX));

        let rows = page_query
            .build_query_as::<TaskRow>()
            .fetch_all(self.pool.inner())
            .await?;

        let tasks = rows
            .into_iter()
            .map(Task::try_from)
            .collect::<Result<Vec<_>, _>>()?;

        Ok((tasks, u64::try_from(total).unwrap_or_default()))
    }

    async fn update(&self, task: &Task) -> DocketResult<()> {
        debug!("Updating task: {}", task.id);

        let result = sqlx::query(
            r"
            UPDATE tasks
            SET title = $1, description = $2, status = $3, assignee = $4, updated_at = $5
            WHERE id = $6
            ",
        )
        .bind(&task.title)
        .bind(&task.description)
        .bind(task.status.as_str())
        .bind(&task.assignee)
        .bind(task.updated_at)
        .bind(task.id.into_inner())
        .execute(self.pool.inner())
        .await?;

        if result.rows_affected() == 0 {
            return Err(DocketError::not_found("Task", task.id));
        }
        Ok(())
    }

    async fn delete(&self, id: TaskId) -> DocketResult<()> {
        debug!("Deleting task: {}", id);

        let result = sqlx::query("DELETE FROM tasks WHERE id = $1")
            .bind(id.into_inner())
            .execute(self.pool.inner())
            .await?;

        if result.rows_affected() == 0 {
            return Err(DocketError::not_found("Task", id));
        }
        Ok(())
    }

    async fn count(&self) -> DocketResult<u64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM tasks")
            .fetch_one(self.pool.inner())
            .await?;

        Ok(u64::try_from(count).unwrap_or_default())
    }
}

impl std::fmt::Debug for PgTaskRepository {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PgTaskRepository").finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(status: &str) -> TaskRow {
        let now = Utc::now();
        TaskRow {
            id: Uuid::now_v7(),
            title: "Buy milk".to_string(),
            description: String::new(),
            status: status.to_string(),
            assignee: "alice".to_string(),
            created_at: now,
            updated_at: now,
        }
    }

    #[test]
    fn test_row_conversion() {
        let task = Task::try_from(row("in_progress")).unwrap();
        assert_eq!(task.status, TaskStatus::InProgress);
        assert_eq!(task.title, "Buy milk");
    }

    #[test]
    fn test_row_with_unknown_status_is_rejected() {
        let err = Task::try_from(row("archived")).unwrap_err();
        assert!(matches!(err, DocketError::Internal(_)));
    }

    #[test]
    fn test_filters_render_in_fixed_order() {
        let filter = TaskFilter::new(
            Some(TaskStatus::Pending),
            Some("bob".to_string()),
            None,
            None,
        );
        let mut builder = QueryBuilder::<Postgres>::new("SELECT COUNT(*) FROM tasks");
        push_filters(&mut builder, &filter);
        assert_eq!(
            builder.sql(),
            "SELECT COUNT(*) FROM tasks WHERE status = $1 AND assignee = $2"
        );
    }

    #[test]
    fn test_assignee_only_filter() {
        let filter = TaskFilter::new(None, Some("bob".to_string()), None, None);
        let mut builder = QueryBuilder::<Postgres>::new("SELECT COUNT(*) FROM tasks");
        push_filters(&mut builder, &filter);
        assert_eq!(builder.sql(), "SELECT COUNT(*) FROM tasks WHERE assignee = $1");
    }

    #[test]
    fn test_no_filters() {
        let mut builder = QueryBuilder::<Postgres>::new("SELECT COUNT(*) FROM tasks");
        push_filters(&mut builder, &TaskFilter::default());
        assert_eq!(builder.sql(), "SELECT COUNT(*) FROM tasks");
    }
}
