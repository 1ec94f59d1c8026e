//! HTTP middleware.

mod logging;
mod http_metrics;

pub use logging::logging_middleware;
pub use http_metrics::{install_recorder, metrics_middleware, register_metrics};
