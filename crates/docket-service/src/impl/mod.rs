//! Task service implementations.
//!
//! Trait definitions live in the parent module (`task_service.rs`).

pub mod task_service_impl;

pub use task_service_impl::{ServiceTimeouts, TaskServiceImpl};
