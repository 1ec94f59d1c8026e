//! HTTP metrics middleware and Prometheus recorder.

use axum::{
    body::Body,
    extract::MatchedPath,
    http::Request,
    middleware::Next,
    response::Response,
};
use docket_core::{DocketError, DocketResult};
use metrics::{counter, describe_counter, describe_histogram, histogram};
use metrics_exporter_prometheus::{PrometheusBuilder, PrometheusHandle};
use std::time::Instant;

/// Metric names for the HTTP layer.
pub mod names {
    /// Total HTTP requests served.
    pub const HTTP_REQUESTS_TOTAL: &str = "docket_http_requests_total";
    /// HTTP request duration in seconds.
    pub const HTTP_REQUEST_DURATION_SECONDS: &str = "docket_http_request_duration_seconds";
}

/// Register HTTP metric descriptions.
pub fn register_metrics() {
    describe_counter!(names::HTTP_REQUESTS_TOTAL, "Total number of HTTP requests");
    describe_histogram!(
        names::HTTP_REQUEST_DURATION_SECONDS,
        "HTTP request duration in seconds"
    );
}

/// Installs the global Prometheus recorder and returns a handle for `/metrics`.
pub fn install_recorder() -> DocketResult<PrometheusHandle> {
    PrometheusBuilder::new()
        .install_recorder()
        .map_err(|e| DocketError::Configuration(format!("Failed to install metrics recorder: {e}")))
}

/// Records request count and latency, labelled by route template.
pub async fn metrics_middleware(request: Request<Body>, next: Next) -> Response {
    // Route templates keep ids out of the label set.
    let endpoint = request
        .extensions()
        .get::<MatchedPath>()
        .map_or_else(|| "unmatched".to_string(), |p| p.as_str().to_string());
    let method = request.method().to_string();
    let start = Instant::now();

    let response = next.run(request).await;

    let status = response.status().as_u16().to_string();
    counter!(
        names::HTTP_REQUESTS_TOTAL,
        "method" => method.clone(),
        "endpoint" => endpoint.clone(),
        "status" => status
    )
    .increment(1);
    histogram!(
        names::HTTP_REQUEST_DURATION_SECONDS,
        "method" => method,
        "endpoint" => endpoint
    )
    .record(start.elapsed().as_secs_f64());

    response
}
