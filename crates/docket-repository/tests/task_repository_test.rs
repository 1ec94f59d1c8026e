//! Integration tests for `PgTaskRepository`.
//!
//! These tests run against a real PostgreSQL database using testcontainers
//! and need Docker: `cargo test -p docket-repository -- --ignored`.

mod common;

use common::TestDatabase;
use docket_core::{Task, TaskFilter, TaskId, TaskStatus};
use docket_repository::{DatabasePoolInterface, PgTaskRepository, TaskRepository};

fn create_test_task(title: &str, status: TaskStatus, assignee: &str) -> Task {
    Task::new(
        title.to_string(),
        Some(format!("{title} description")),
        status,
        Some(assignee.to_string()),
    )
}

#[tokio::test]
#[ignore = "requires Docker"]
async fn test_create_and_get_by_id() {
    let db = TestDatabase::new().await;
    let repo = PgTaskRepository::new(db.pool());

    let task = create_test_task("Buy milk", TaskStatus::Pending, "alice");
    repo.create(&task).await.expect("Failed to create task");

    let found = repo.get_by_id(task.id).await.expect("Failed to find task");
    assert_eq!(found, task);
}

#[tokio::test]
#[ignore = "requires Docker"]
async fn test_get_by_id_not_found() {
    let db = TestDatabase::new().await;
    let repo = PgTaskRepository::new(db.pool());

    let err = repo.get_by_id(TaskId::new()).await.unwrap_err();
    assert!(err.is_not_found());
}

#[tokio::test]
#[ignore = "requires Docker"]
async fn test_get_all_paginates_newest_first() {
    let db = TestDatabase::new().await;
    let repo = PgTaskRepository::new(db.pool());

    for i in 0..15 {
        let task = create_test_task(&format!("task {i:02}"), TaskStatus::Pending, "alice");
        repo.create(&task).await.expect("Failed to create task");
        tokio::time::sleep(std::time::Duration::from_millis(2)).await;
    }

    let (first, total) = repo
        .get_all(&TaskFilter::new(None, None, Some(1), Some(10)))
        .await
        .expect("Failed to list tasks");
    assert_eq!(first.len(), 10);
    assert_eq!(total, 15);
    assert_eq!(first[0].title, "task 14");

    let (second, total) = repo
        .get_all(&TaskFilter::new(None, None, Some(2), Some(10)))
        .await
        .expect("Failed to list tasks");
    assert_eq!(second.len(), 5);
    assert_eq!(total, 15);
    assert_eq!(second[4].title, "task 00");
}

#[tokio::test]
#[ignore = "requires Docker"]
async fn test_get_all_with_filters() {
    let db = TestDatabase::new().await;
    let repo = PgTaskRepository::new(db.pool());

    repo.create(&create_test_task("a", TaskStatus::Pending, "alice")).await.unwrap();
    repo.create(&create_test_task("b", TaskStatus::Completed, "alice")).await.unwrap();
    repo.create(&create_test_task("c", TaskStatus::Pending, "bob")).await.unwrap();

    let by_status = TaskFilter::new(Some(TaskStatus::Pending), None, None, None);
    let (_, total) = repo.get_all(&by_status).await.unwrap();
    assert_eq!(total, 2);

    let both = TaskFilter::new(Some(TaskStatus::Pending), Some("alice".into()), None, None);
    let (tasks, total) = repo.get_all(&both).await.unwrap();
    assert_eq!(total, 1);
    assert_eq!(tasks[0].title, "a");
}

#[tokio::test]
#[ignore = "requires Docker"]
async fn test_update_task() {
    let db = TestDatabase::new().await;
    let repo = PgTaskRepository::new(db.pool());

    let mut task = create_test_task("Buy milk", TaskStatus::Pending, "alice");
    repo.create(&task).await.unwrap();

    task.status = TaskStatus::Completed;
    task.title = "Buy oat milk".to_string();
    task.touch();
    repo.update(&task).await.expect("Failed to update task");

    let found = repo.get_by_id(task.id).await.unwrap();
    assert_eq!(found.status, TaskStatus::Completed);
    assert_eq!(found.title, "Buy oat milk");
    assert_eq!(found.created_at, task.created_at);
}

#[tokio::test]
#[ignore = "requires Docker"]
async fn test_update_missing_task_is_not_found() {
    let db = TestDatabase::new().await;
    let repo = PgTaskRepository::new(db.pool());

    let task = create_test_task("ghost", TaskStatus::Pending, "");
    assert!(repo.update(&task).await.unwrap_err().is_not_found());
}

#[tokio::test]
#[ignore = "requires Docker"]
async fn test_delete_task() {
    let db = TestDatabase::new().await;
    let repo = PgTaskRepository::new(db.pool());

    let task = create_test_task("Buy milk", TaskStatus::Pending, "alice");
    repo.create(&task).await.unwrap();
    repo.delete(task.id).await.expect("Failed to delete task");

    assert!(repo.get_by_id(task.id).await.unwrap_err().is_not_found());
    assert!(repo.delete(task.id).await.unwrap_err().is_not_found());
}

#[tokio::test]
#[ignore = "requires Docker"]
async fn test_count_and_health() {
    let db = TestDatabase::new().await;
    let pool = db.pool();
    let repo = PgTaskRepository::new(pool.clone());

    assert_eq!(repo.count().await.unwrap(), 0);
    repo.create(&create_test_task("a", TaskStatus::Pending, "alice")).await.unwrap();
    assert_eq!(repo.count().await.unwrap(), 1);

    pool.health_check().await.expect("Health check failed");
    pool.ensure_schema().await.expect("Schema setup is not idempotent");
}
