//! Custom Axum extractors.

mod json;
mod task_id;

pub use json::*;
pub use task_id::*;
