//! Cache interface trait for abstracted caching operations.

use async_trait::async_trait;
use docket_core::DocketResult;
use shaku::Interface;
use std::time::Duration;

/// Raw key/value cache backend.
///
/// Values are JSON strings so the trait stays dyn-compatible; [`CacheExt`]
/// adds typed access on top. Every entry carries a TTL and may disappear at
/// any moment, so absence is never an error.
#[async_trait]
pub trait CacheInterface: Interface + Send + Sync {
    /// Get a raw JSON value from the cache.
    ///
    /// Returns `None` if the key doesn't exist or has expired.
    async fn get_raw(&self, key: &str) -> DocketResult<Option<String>>;

    /// Set a raw JSON value in the cache with a TTL.
    async fn set_raw(&self, key: &str, value: &str, ttl: Duration) -> DocketResult<()>;

    /// Delete a value from the cache.
    ///
    /// Returns `true` if the key existed and was deleted.
    async fn delete(&self, key: &str) -> DocketResult<bool>;

    /// Delete every key matching a glob pattern (`*` wildcard).
    ///
    /// Returns the number of keys deleted.
    async fn delete_pattern(&self, pattern: &str) -> DocketResult<u64>;

    /// Short backend name for logs and health output.
    fn backend_name(&self) -> &'static str;
}

/// Extension trait with typed methods for convenience.
#[async_trait]
pub trait CacheExt: CacheInterface {
    /// Get a typed value from the cache.
    ///
    /// A stored value that no longer deserializes is reported as an error.
    async fn get<T: serde::de::DeserializeOwned + Send>(&self, key: &str) -> DocketResult<Option<T>> {
        match self.get_raw(key).await? {
            Some(json) => {
                let value: T = serde_json::from_str(&json)?;
                Ok(Some(value))
            }
            None => Ok(None),
        }
    }

    /// Set a typed value in the cache.
    async fn set<T: serde::Serialize + Send + Sync>(
        &self,
        key: &str,
        value: &T,
        ttl: Duration,
    ) -> DocketResult<()> {
        let json = serde_json::to_string(value)?;
        self.set_raw(key, &json, ttl).await
    }
}

impl<T: CacheInterface + ?Sized> CacheExt for T {}
