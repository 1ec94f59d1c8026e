//! Dependency wiring.
//!
//! Components are built once at startup and shared as trait objects. The
//! cache is optional: without one the service reads the store directly.

use docket_core::{DocketError, DocketResult, HealthCheck};
use docket_repository::{DatabasePool, DatabasePoolInterface, PgTaskRepository, TaskRepository};
use docket_service::{
    CacheInterface, ServiceTimeouts, TaskCache, TaskService, TaskServiceImpl, DEFAULT_TTL,
};
use std::sync::Arc;
use std::time::Duration;

/// A cache backend together with its health probe.
#[derive(Clone)]
pub struct CacheHandle {
    pub backend: Arc<dyn CacheInterface>,
    pub health: Arc<dyn HealthCheck>,
}

impl CacheHandle {
    pub fn new<C>(cache: Arc<C>) -> Self
    where
        C: CacheInterface + HealthCheck + 'static,
    {
        Self {
            backend: cache.clone(),
            health: cache,
        }
    }
}

/// Fully wired application components.
pub struct AppModule {
    database_pool: Arc<DatabasePool>,
    task_repository: Arc<dyn TaskRepository>,
    cache: Option<CacheHandle>,
    task_service: Arc<dyn TaskService>,
}

impl AppModule {
    pub fn task_service(&self) -> Arc<dyn TaskService> {
        self.task_service.clone()
    }

    pub fn task_repository(&self) -> Arc<dyn TaskRepository> {
        self.task_repository.clone()
    }

    pub fn database_pool(&self) -> Arc<dyn DatabasePoolInterface> {
        self.database_pool.clone()
    }

    /// Probes `/ready` runs: the store first, then the cache if present.
    pub fn health_checks(&self) -> Vec<Arc<dyn HealthCheck>> {
        let mut checks: Vec<Arc<dyn HealthCheck>> = Vec::with_capacity(2);
        checks.push(self.database_pool.clone());
        if let Some(cache) = &self.cache {
            checks.push(cache.health.clone());
        }
        checks
    }

    pub fn cache_backend(&self) -> Option<&'static str> {
        self.cache.as_ref().map(|c| c.backend.backend_name())
    }
}

/// Builder for [`AppModule`].
#[derive(Default)]
pub struct AppModuleBuilder {
    database_pool: Option<Arc<DatabasePool>>,
    cache: Option<CacheHandle>,
    cache_ttl: Option<Duration>,
    timeouts: ServiceTimeouts,
}

impl AppModuleBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_database_pool(mut self, pool: Arc<DatabasePool>) -> Self {
        self.database_pool = Some(pool);
        self
    }

    pub fn with_cache(mut self, cache: Option<CacheHandle>) -> Self {
        self.cache = cache;
        self
    }

    pub fn with_cache_ttl(mut self, ttl: Duration) -> Self {
        self.cache_ttl = Some(ttl);
        self
    }

    pub fn with_timeouts(mut self, timeouts: ServiceTimeouts) -> Self {
        self.timeouts = timeouts;
        self
    }

    pub fn build(self) -> DocketResult<AppModule> {
        let database_pool = self.database_pool.ok_or_else(|| {
            DocketError::Configuration("database pool is required".to_string())
        })?;

        let task_repository: Arc<dyn TaskRepository> =
            Arc::new(PgTaskRepository::new(database_pool.clone()));

        let ttl = self.cache_ttl.unwrap_or(DEFAULT_TTL);
        let task_cache = self
            .cache
            .as_ref()
            .map(|c| TaskCache::new(c.backend.clone(), ttl));

        let task_service: Arc<dyn TaskService> = Arc::new(
            TaskServiceImpl::new(task_repository.clone(), task_cache).with_timeouts(self.timeouts),
        );

        Ok(AppModule {
            database_pool,
            task_repository,
            cache: self.cache,
            task_service,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use docket_service::MemoryCacheService;

    #[test]
    fn test_build_without_pool_fails() {
        let err = AppModuleBuilder::new().build().err().unwrap();
        assert!(matches!(err, DocketError::Configuration(_)));
    }

    #[test]
    fn test_cache_handle_shares_backend() {
        let handle = CacheHandle::new(Arc::new(MemoryCacheService::new()));
        assert_eq!(handle.backend.backend_name(), "memory");
        assert_eq!(handle.health.name(), "cache");
    }
}
