//! REST API controllers.

pub mod health_controller;
pub mod task_controller;

pub use health_controller::*;
