//! Task service implementation.

use crate::cache::TaskCache;
use crate::dto::{
    parse_status, CreateTaskRequest, ListTasksQuery, TaskListResponse, UpdateTaskRequest,
};
use crate::metrics::TaskMetrics;
use crate::task_service::TaskService;
use async_trait::async_trait;
use docket_config::AppConfig;
use docket_core::{total_pages, DocketError, DocketResult, Task, TaskId, ValidateExt};
use docket_repository::TaskRepository;
use std::future::Future;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, info, warn};

/// Optional per-call deadlines.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ServiceTimeouts {
    /// Exceeding it fails the operation with `Timeout`.
    pub store: Option<Duration>,
    /// Exceeding it counts as a cache failure.
    pub cache: Option<Duration>,
}

impl ServiceTimeouts {
    #[must_use]
    pub fn from_config(config: &AppConfig) -> Self {
        Self {
            store: config.database.operation_timeout(),
            cache: config.cache.operation_timeout(),
        }
    }
}

/// Task service over a record store and an optional cache.
///
/// Without a cache every read goes to the store; results are the same.
pub struct TaskServiceImpl {
    repository: Arc<dyn TaskRepository>,
    cache: Option<TaskCache>,
    timeouts: ServiceTimeouts,
}

impl TaskServiceImpl {
    pub fn new(repository: Arc<dyn TaskRepository>, cache: Option<TaskCache>) -> Self {
        Self {
            repository,
            cache,
            timeouts: ServiceTimeouts::default(),
        }
    }

    #[must_use]
    pub fn with_timeouts(mut self, timeouts: ServiceTimeouts) -> Self {
        self.timeouts = timeouts;
        self
    }

    #[must_use]
    pub fn has_cache(&self) -> bool {
        self.cache.is_some()
    }

    async fn store<T>(
        &self,
        operation: &'static str,
        call: impl Future<Output = DocketResult<T>> + Send,
    ) -> DocketResult<T> {
        match self.timeouts.store {
            Some(limit) => tokio::time::timeout(limit, call).await.map_err(|_| {
                DocketError::Timeout(format!("store {operation} exceeded {}ms", limit.as_millis()))
            })?,
            None => call.await,
        }
    }

    async fn cache_call<T>(
        &self,
        operation: &'static str,
        call: impl Future<Output = DocketResult<T>> + Send,
    ) -> DocketResult<T> {
        match self.timeouts.cache {
            Some(limit) => tokio::time::timeout(limit, call).await.map_err(|_| {
                DocketError::cache(format!("cache {operation} exceeded {}ms", limit.as_millis()))
            })?,
            None => call.await,
        }
    }

    async fn cached_task(&self, cache: &TaskCache, id: TaskId) -> Option<Task> {
        match self.cache_call("get_task", cache.get_task(id)).await {
            Ok(found) => found,
            Err(e) => {
                warn!("Cache read failed for task {}, reading store: {}", id, e);
                None
            }
        }
    }

    async fn cached_collection(&self, cache: &TaskCache, key: &str) -> Option<Vec<Task>> {
        match self.cache_call("get_collection", cache.get_collection(key)).await {
            Ok(found) => found,
            Err(e) => {
                warn!("Cache read failed for '{}', reading store: {}", key, e);
                None
            }
        }
    }

    /// Drops the task entry (when given) and every cached list.
    async fn invalidate(&self, id: Option<TaskId>) {
        let Some(cache) = &self.cache else {
            return;
        };

        if let Some(id) = id {
            if let Err(e) = self.cache_call("evict_task", cache.evict_task(id)).await {
                warn!("Failed to evict task {} from cache: {}", id, e);
            }
        }

        match self
            .cache_call("evict_all_collections", cache.evict_all_collections())
            .await
        {
            Ok(evicted) => debug!("Evicted {} cached task lists", evicted),
            Err(e) => warn!("Failed to evict cached task lists: {}", e),
        }
    }
}

#[async_trait]
impl TaskService for TaskServiceImpl {
    async fn create_task(&self, request: CreateTaskRequest) -> DocketResult<Task> {
        debug!("Creating task: {}", request.title);

        request.validate_request()?;
        // an empty status is the same as none
        let status = parse_status(request.status.as_deref().filter(|s| !s.is_empty()))?
            .unwrap_or_default();

        let task = Task::new(request.title, request.description, status, request.assignee);
        self.store("create", self.repository.create(&task)).await?;

        self.invalidate(None).await;

        info!("Task created: {}", task.id);
        Ok(task)
    }

    async fn get_task(&self, id: TaskId) -> DocketResult<Task> {
        debug!("Getting task: {}", id);

        if let Some(cache) = &self.cache {
            let cached = self.cached_task(cache, id).await;
            TaskMetrics::cache_lookup("task", cached.is_some());
            if let Some(task) = cached {
                return Ok(task);
            }
        }

        let task = self.store("get_by_id", self.repository.get_by_id(id)).await?;

        if let Some(cache) = &self.cache {
            if let Err(e) = self.cache_call("put_task", cache.put_task(&task)).await {
                warn!("Failed to cache task {}: {}", id, e);
            }
        }

        Ok(task)
    }

    async fn list_tasks(&self, query: ListTasksQuery) -> DocketResult<TaskListResponse> {
        let filter = query.into_filter()?;
        debug!(
            "Listing tasks: status={:?}, assignee={:?}, page={}, page_size={}",
            filter.status, filter.assignee, filter.page, filter.page_size
        );

        let key = TaskCache::derive_collection_key(Some(&filter));

        if let Some(cache) = &self.cache {
            let cached = self.cached_collection(cache, &key).await;
            TaskMetrics::cache_lookup("list", cached.is_some());
            if let Some(tasks) = cached {
                // Only the cached page is known here, so its length stands in
                // for the total.
                let total = tasks.len() as u64;
                return Ok(TaskListResponse {
                    tasks,
                    total,
                    page: filter.page,
                    page_size: filter.page_size,
                    total_pages: total_pages(total, filter.page_size),
                });
            }
        }

        let (tasks, total) = self.store("get_all", self.repository.get_all(&filter)).await?;

        if let Some(cache) = &self.cache {
            if let Err(e) = self
                .cache_call("put_collection", cache.put_collection(&key, &tasks))
                .await
            {
                warn!("Failed to cache task list '{}': {}", key, e);
            }
        }

        Ok(TaskListResponse {
            tasks,
            total,
            page: filter.page,
            page_size: filter.page_size,
            total_pages: total_pages(total, filter.page_size).max(1),
        })
    }

    async fn update_task(&self, id: TaskId, request: UpdateTaskRequest) -> DocketResult<Task> {
        debug!("Updating task: {}", id);

        let mut task = self.store("get_by_id", self.repository.get_by_id(id)).await?;
        let status = request.parse()?;

        if let Some(title) = request.title {
            task.title = title;
        }
        if let Some(description) = request.description {
            task.description = description;
        }
        if let Some(status) = status {
            task.status = status;
        }
        if let Some(assignee) = request.assignee {
            task.assignee = assignee;
        }
        task.touch();

        self.store("update", self.repository.update(&task)).await?;

        self.invalidate(Some(id)).await;

        info!("Task updated: {}", id);
        Ok(task)
    }

    async fn delete_task(&self, id: TaskId) -> DocketResult<()> {
        debug!("Deleting task: {}", id);

        self.store("delete", self.repository.delete(id)).await?;

        self.invalidate(Some(id)).await;

        info!("Task deleted: {}", id);
        Ok(())
    }

    async fn count_tasks(&self) -> DocketResult<u64> {
        self.store("count", self.repository.count()).await
    }
}

impl std::fmt::Debug for TaskServiceImpl {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TaskServiceImpl")
            .field("cache", &self.cache)
            .field("timeouts", &self.timeouts)
            .finish_non_exhaustive()
    }
}
