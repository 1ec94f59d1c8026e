//! # Docket REST
//!
//! HTTP surface of Docket: task endpoints under `/api/v1/tasks`, health
//! probes, Prometheus metrics and the OpenAPI document.

pub mod controllers;
pub mod extractors;
pub mod middleware;
pub mod openapi;
pub mod responses;
pub mod router;
pub mod state;

pub use router::*;
pub use state::*;
