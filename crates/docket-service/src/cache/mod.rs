//! Caching infrastructure for the service layer.
//!
//! A raw [`CacheInterface`] backend (Redis or in-process) sits under
//! [`TaskCache`], which knows the task key layout and TTL.

mod cache_interface;
pub mod cache_keys;
mod memory_cache;
mod redis_cache;
mod task_cache;

pub use cache_interface::{CacheExt, CacheInterface};
pub use memory_cache::MemoryCacheService;
pub use redis_cache::RedisCacheService;
pub use task_cache::{TaskCache, DEFAULT_TTL};
