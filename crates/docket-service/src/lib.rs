//! # Docket Service
//!
//! The cache layer and the orchestration service that keeps it consistent
//! with the record store.
//!
//! Reads are cache-aside: a hit never touches the store, a miss reads the
//! store and populates the cache. Successful mutations evict the affected
//! task entry and every cached list. A failing cache only ever costs a
//! round trip to the store.

pub mod cache;
pub mod dto;
pub mod r#impl;
pub mod metrics;
pub mod task_service;

pub use cache::*;
pub use dto::*;
pub use r#impl::*;
pub use task_service::*;
