//! End-to-end tests of the HTTP surface over an in-memory store.

use async_trait::async_trait;
use axum::{
    body::Body,
    http::{Method, Request, StatusCode},
    Router,
};
use docket_config::ServerConfig;
use docket_core::{HealthCheck, HealthStatus};
use docket_repository::InMemoryTaskRepository;
use docket_rest::{create_router, AppState};
use docket_service::{MemoryCacheService, TaskCache, TaskServiceImpl};
use http_body_util::BodyExt;
use serde_json::{json, Value};
use std::sync::Arc;
use tower::ServiceExt;

struct FixedHealth(&'static str, HealthStatus);

#[async_trait]
impl HealthCheck for FixedHealth {
    fn name(&self) -> &str {
        self.0
    }

    async fn check(&self) -> HealthStatus {
        self.1.clone()
    }
}

fn app_with(health: Vec<Arc<dyn HealthCheck>>) -> Router {
    let repository = Arc::new(InMemoryTaskRepository::new());
    let cache = TaskCache::with_default_ttl(Arc::new(MemoryCacheService::new()));
    let service = Arc::new(TaskServiceImpl::new(repository, Some(cache)));

    let mut state = AppState::new(service);
    for check in health {
        state = state.with_health_check(check);
    }
    create_router(state, &ServerConfig::default())
}

fn app() -> Router {
    app_with(Vec::new())
}

async fn send(app: &Router, method: Method, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
    let builder = Request::builder().method(method).uri(uri);
    let request = match body {
        Some(body) => builder
            .header("content-type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };

    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let value = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap_or(Value::Null)
    };
    (status, value)
}

#[tokio::test]
async fn test_health() {
    let (status, body) = send(&app(), Method::GET, "/health", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "healthy");
    assert_eq!(body["service"], "docket");
}

#[tokio::test]
async fn test_readiness_ignores_degraded_cache() {
    let app = app_with(vec![
        Arc::new(FixedHealth("database", HealthStatus::Healthy)),
        Arc::new(FixedHealth("cache", HealthStatus::Degraded("down".into()))),
    ]);
    let (status, body) = send(&app, Method::GET, "/ready", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["checks"][1]["status"], "degraded");
}

#[tokio::test]
async fn test_readiness_fails_when_store_unhealthy() {
    let app = app_with(vec![Arc::new(FixedHealth(
        "database",
        HealthStatus::Unhealthy("refused".into()),
    ))]);
    let (status, _) = send(&app, Method::GET, "/ready", None).await;
    assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
}

#[tokio::test]
async fn test_task_lifecycle() {
    let app = app();

    let (status, body) = send(
        &app,
        Method::POST,
        "/api/v1/tasks",
        Some(json!({"title": "Buy milk", "assignee": "alice"})),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["success"], true);
    assert_eq!(body["data"]["status"], "pending");
    let id = body["data"]["id"].as_str().unwrap().to_string();

    let (status, body) = send(&app, Method::GET, &format!("/api/v1/tasks/{id}"), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["title"], "Buy milk");

    let (status, body) = send(
        &app,
        Method::PUT,
        &format!("/api/v1/tasks/{id}"),
        Some(json!({"status": "completed"})),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["status"], "completed");

    let (status, body) = send(&app, Method::GET, "/api/v1/tasks?status=completed", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["total"], 1);

    let (status, _) = send(&app, Method::DELETE, &format!("/api/v1/tasks/{id}"), None).await;
    assert_eq!(status, StatusCode::NO_CONTENT);

    let (status, body) = send(&app, Method::GET, &format!("/api/v1/tasks/{id}"), None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["success"], false);
    assert_eq!(body["error"]["code"], "NOT_FOUND");
}

#[tokio::test]
async fn test_create_with_empty_status_is_pending() {
    let (status, body) = send(
        &app(),
        Method::POST,
        "/api/v1/tasks",
        Some(json!({"title": "Buy milk", "status": ""})),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["data"]["status"], "pending");
}

#[tokio::test]
async fn test_blank_title_is_bad_request() {
    let (status, body) = send(
        &app(),
        Method::POST,
        "/api/v1/tasks",
        Some(json!({"title": "  "})),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"]["code"], "VALIDATION_ERROR");
}

#[tokio::test]
async fn test_invalid_status_filter_is_bad_request() {
    let (status, _) = send(&app(), Method::GET, "/api/v1/tasks?status=archived", None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_malformed_id_is_bad_request() {
    let (status, body) = send(&app(), Method::GET, "/api/v1/tasks/not-a-uuid", None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"]["code"], "VALIDATION_ERROR");
}

#[tokio::test]
async fn test_malformed_json_is_bad_request() {
    let request = Request::builder()
        .method(Method::POST)
        .uri("/api/v1/tasks")
        .header("content-type", "application/json")
        .body(Body::from("{not json"))
        .unwrap();
    let response = app().oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_page_size_clamped() {
    let (status, body) = send(&app(), Method::GET, "/api/v1/tasks?page_size=150", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["page_size"], 100);
    assert_eq!(body["data"]["total_pages"], 1);
}

#[tokio::test]
async fn test_metrics_disabled_is_not_found() {
    let (status, _) = send(&app(), Method::GET, "/metrics", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_openapi_document_served() {
    let (status, body) = send(&app(), Method::GET, "/api-docs/openapi.json", None).await;
    assert_eq!(status, StatusCode::OK);
    assert!(body["paths"]["/tasks"].is_object());
}
