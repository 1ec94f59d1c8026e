//! # Docket Server Library
//!
//! Dependency wiring and startup helpers for the Docket binary.

pub mod di;
pub mod startup;
