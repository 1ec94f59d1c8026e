//! Task-shaped view over a raw cache backend.

use super::{cache_keys, CacheExt, CacheInterface};
use docket_core::{DocketResult, Task, TaskFilter, TaskId};
use std::sync::Arc;
use std::time::Duration;

/// Default entry lifetime.
pub const DEFAULT_TTL: Duration = Duration::from_secs(300);

/// Single-task and collection caching with a fixed TTL.
///
/// Every method surfaces backend failures as errors; deciding that a cache
/// failure is only a miss is the caller's business.
#[derive(Clone)]
pub struct TaskCache {
    backend: Arc<dyn CacheInterface>,
    ttl: Duration,
}

impl TaskCache {
    #[must_use]
    pub fn new(backend: Arc<dyn CacheInterface>, ttl: Duration) -> Self {
        Self { backend, ttl }
    }

    #[must_use]
    pub fn with_default_ttl(backend: Arc<dyn CacheInterface>) -> Self {
        Self::new(backend, DEFAULT_TTL)
    }

    #[must_use]
    pub fn ttl(&self) -> Duration {
        self.ttl
    }

    #[must_use]
    pub fn backend_name(&self) -> &'static str {
        self.backend.backend_name()
    }

    pub async fn get_task(&self, id: TaskId) -> DocketResult<Option<Task>> {
        self.backend.get(&cache_keys::task_by_id(id)).await
    }

    pub async fn put_task(&self, task: &Task) -> DocketResult<()> {
        self.backend
            .set(&cache_keys::task_by_id(task.id), task, self.ttl)
            .await
    }

    /// Removes a task entry. Deleting an absent key succeeds.
    pub async fn evict_task(&self, id: TaskId) -> DocketResult<()> {
        self.backend.delete(&cache_keys::task_by_id(id)).await?;
        Ok(())
    }

    pub async fn get_collection(&self, key: &str) -> DocketResult<Option<Vec<Task>>> {
        self.backend.get(key).await
    }

    pub async fn put_collection(&self, key: &str, tasks: &[Task]) -> DocketResult<()> {
        self.backend.set(key, &tasks, self.ttl).await
    }

    /// Drops every cached collection regardless of filter. Returns how many
    /// entries went away.
    pub async fn evict_all_collections(&self) -> DocketResult<u64> {
        self.backend
            .delete_pattern(&cache_keys::collection_pattern())
            .await
    }

    #[must_use]
    pub fn derive_collection_key(filter: Option<&TaskFilter>) -> String {
        cache_keys::task_collection(filter)
    }
}

impl std::fmt::Debug for TaskCache {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TaskCache")
            .field("backend", &self.backend.backend_name())
            .field("ttl", &self.ttl)
            .finish()
    }
}
