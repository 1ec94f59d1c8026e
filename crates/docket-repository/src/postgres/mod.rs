//! PostgreSQL-backed repository implementations.

pub mod task_repository;

pub use task_repository::PgTaskRepository;
