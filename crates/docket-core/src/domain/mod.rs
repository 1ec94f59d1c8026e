//! Task domain model: the record, its status enumeration and the list filter.

pub mod filter;
pub mod status;
pub mod task;

pub use filter::*;
pub use status::*;
pub use task::*;
