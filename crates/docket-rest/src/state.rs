//! Application state for Axum handlers.

use docket_core::HealthCheck;
use docket_service::TaskService;
use metrics_exporter_prometheus::PrometheusHandle;
use std::sync::Arc;

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    pub task_service: Arc<dyn TaskService>,
    /// Dependencies probed by `/ready`.
    pub health_checks: Vec<Arc<dyn HealthCheck>>,
    /// Renders `/metrics`; `None` when metrics are disabled.
    pub metrics: Option<PrometheusHandle>,
}

impl AppState {
    /// Creates a new application state.
    pub fn new(task_service: Arc<dyn TaskService>) -> Self {
        Self {
            task_service,
            health_checks: Vec::new(),
            metrics: None,
        }
    }

    #[must_use]
    pub fn with_health_check(mut self, check: Arc<dyn HealthCheck>) -> Self {
        self.health_checks.push(check);
        self
    }

    #[must_use]
    pub fn with_metrics(mut self, handle: PrometheusHandle) -> Self {
        self.metrics = Some(handle);
        self
    }
}
