//! In-process record store for tests of the layers above.
//!
//! Honours the [`TaskRepository`] contract and adds a few knobs: a
//! `get_by_id` call counter, a switch that makes every call fail as a storage
//! error, and a fixed delay before each call.

use crate::traits::TaskRepository;
use async_trait::async_trait;
use docket_core::{DocketError, DocketResult, Task, TaskFilter, TaskId};
use parking_lot::Mutex;
use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::time::Duration;

#[derive(Debug, Default)]
pub struct InMemoryTaskRepository {
    tasks: Mutex<HashMap<TaskId, Task>>,
    get_calls: AtomicUsize,
    broken: AtomicBool,
    delay: Option<Duration>,
}

impl InMemoryTaskRepository {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_tasks(tasks: Vec<Task>) -> Self {
        let repo = Self::new();
        repo.tasks
            .lock()
            .extend(tasks.into_iter().map(|task| (task.id, task)));
        repo
    }

    /// Every call sleeps for `delay` first.
    #[must_use]
    pub fn slow(delay: Duration) -> Self {
        Self {
            delay: Some(delay),
            ..Self::default()
        }
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.tasks.lock().len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// How many times `get_by_id` has been called.
    #[must_use]
    pub fn get_calls(&self) -> usize {
        self.get_calls.load(Ordering::SeqCst)
    }

    /// While set, every call fails with a database error.
    pub fn set_broken(&self, broken: bool) {
        self.broken.store(broken, Ordering::SeqCst);
    }

    async fn enter(&self) -> DocketResult<()> {
        if let Some(delay) = self.delay {
            tokio::time::sleep(delay).await;
        }
        if self.broken.load(Ordering::SeqCst) {
            return Err(DocketError::database("connection reset"));
        }
        Ok(())
    }
}

#[async_trait]
impl TaskRepository for InMemoryTaskRepository {
    async fn create(&self, task: &Task) -> DocketResult<()> {
        self.enter().await?;
        self.tasks.lock().insert(task.id, task.clone());
        Ok(())
    }

    async fn get_by_id(&self, id: TaskId) -> DocketResult<Task> {
        self.get_calls.fetch_add(1, Ordering::SeqCst);
        self.enter().await?;
        self.tasks
            .lock()
            .get(&id)
            .cloned()
            .ok_or_else(|| DocketError::not_found("Task", id))
    }

    async fn get_all(&self, filter: &TaskFilter) -> DocketResult<(Vec<Task>, u64)> {
        self.enter().await?;
        let mut matching: Vec<Task> = self
            .tasks
            .lock()
            .values()
            .filter(|t| filter.status.map_or(true, |s| t.status == s))
            .filter(|t| filter.assignee.as_ref().map_or(true, |a| &t.assignee == a))
            .cloned()
            .collect();
        // newest first, id as tie-break so equal timestamps page stably
        matching.sort_by(|a, b| b.created_at.cmp(&a.created_at).then(b.id.0.cmp(&a.id.0)));

        let total = matching.len() as u64;
        let request = filter.page_request();
        let page = matching
            .into_iter()
            .skip(request.offset() as usize)
            .take(request.limit() as usize)
            .collect();
        Ok((page, total))
    }

    async fn update(&self, task: &Task) -> DocketResult<()> {
        self.enter().await?;
        match self.tasks.lock().get_mut(&task.id) {
            Some(existing) => {
                *existing = task.clone();
                Ok(())
            }
            None => Err(DocketError::not_found("Task", task.id)),
        }
    }

    async fn delete(&self, id: TaskId) -> DocketResult<()> {
        self.enter().await?;
        self.tasks
            .lock()
            .remove(&id)
            .map(|_| ())
            .ok_or_else(|| DocketError::not_found("Task", id))
    }

    async fn count(&self) -> DocketResult<u64> {
        self.enter().await?;
        Ok(self.tasks.lock().len() as u64)
    }
}
