//! # Docket Repository
//!
//! The record store: durable task storage on PostgreSQL.
//!
//! ```text
//! Service
//!   ↓  Arc<dyn TaskRepository>         (store interface)
//! PgTaskRepository                     (SQLx queries)
//!   ↓  Arc<dyn DatabasePoolInterface>
//! PostgreSQL
//! ```

#[cfg(any(test, feature = "test-util"))]
pub mod memory;
pub mod pool;
pub mod postgres;
pub mod traits;

#[cfg(any(test, feature = "test-util"))]
pub use memory::InMemoryTaskRepository;
pub use pool::*;
pub use postgres::*;
pub use traits::*;
