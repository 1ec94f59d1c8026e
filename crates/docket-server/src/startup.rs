//! Server startup utilities.

use crate::di::CacheHandle;
use docket_config::{CacheBackend, CacheConfig};
use docket_core::DocketResult;
use docket_rest::middleware::{install_recorder, register_metrics as register_http_metrics};
use docket_service::{
    metrics::{register_metrics as register_service_metrics, TaskMetrics},
    MemoryCacheService, RedisCacheService, TaskService,
};
use metrics_exporter_prometheus::PrometheusHandle;
use std::sync::Arc;
use std::time::Duration;
use tokio::task::JoinHandle;
use tracing::{debug, info, warn};

/// Prints the startup banner.
pub fn print_banner() {
    info!(r#"
    ____             __        __
   / __ \____  _____/ /_____  / /_
  / / / / __ \/ ___/ //_/ _ \/ __/
 / /_/ / /_/ / /__/ ,< /  __/ /_
/_____/\____/\___/_/|_|\___/\__/
    "#);
}

/// Prints server startup information.
pub fn print_startup_info(addr: &str, cache_backend: Option<&str>) {
    let separator = "=".repeat(60);
    info!("{}", separator);
    info!("REST API:  http://{}/api/v1/tasks", addr);
    info!("Health:    http://{}/health", addr);
    info!("API Docs:  http://{}/swagger-ui", addr);
    info!("Cache:     {}", cache_backend.unwrap_or("disabled"));
    info!("{}", separator);
}

/// Builds the configured cache backend.
///
/// A Redis server that cannot be reached is not fatal: the service runs
/// without a cache and every read goes to the store.
pub async fn connect_cache(config: &CacheConfig) -> Option<CacheHandle> {
    if !config.enabled {
        info!("Cache disabled by configuration");
        return None;
    }

    match config.backend {
        CacheBackend::Memory => {
            info!("Using in-process cache");
            Some(CacheHandle::new(Arc::new(MemoryCacheService::new())))
        }
        CacheBackend::Redis => match RedisCacheService::connect(config).await {
            Ok(cache) => Some(CacheHandle::new(Arc::new(cache))),
            Err(e) => {
                warn!("Redis unavailable, running without cache: {}", e);
                None
            }
        },
    }
}

/// Installs the Prometheus recorder and registers metric descriptions.
pub fn init_metrics(enabled: bool) -> DocketResult<Option<PrometheusHandle>> {
    if !enabled {
        return Ok(None);
    }
    let handle = install_recorder()?;
    register_http_metrics();
    register_service_metrics();
    Ok(Some(handle))
}

/// Periodically publishes the stored task count as a gauge.
///
/// Failures are logged and the tick is skipped. The returned handle must be
/// aborted on shutdown.
pub fn spawn_count_reporter(service: Arc<dyn TaskService>, interval: Duration) -> JoinHandle<()> {
    tokio::spawn(async move {
        let mut ticker = tokio::time::interval(interval);
        loop {
            ticker.tick().await;
            match service.count_tasks().await {
                Ok(count) => {
                    debug!("Task count: {}", count);
                    TaskMetrics::tasks_count(count);
                }
                Err(e) => warn!("Failed to refresh task count: {}", e),
            }
        }
    })
}
