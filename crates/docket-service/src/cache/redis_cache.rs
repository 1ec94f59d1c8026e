//! Redis-based cache implementation.

use super::CacheInterface;
use async_trait::async_trait;
use deadpool_redis::{
    redis::{self, AsyncCommands},
    Config, Pool, Runtime,
};
use docket_config::CacheConfig;
use docket_core::{DocketError, DocketResult, HealthCheck, HealthStatus};
use std::time::Duration;
use tracing::{debug, info};

/// Keys requested per `SCAN` round trip.
const SCAN_BATCH: usize = 100;

/// Redis-based cache service.
#[derive(Clone)]
pub struct RedisCacheService {
    pool: Pool,
}

impl RedisCacheService {
    /// Create a new Redis cache service over an existing pool.
    #[must_use]
    pub fn new(pool: Pool) -> Self {
        Self { pool }
    }

    /// Builds a pool from configuration and verifies the server answers `PING`.
    pub async fn connect(config: &CacheConfig) -> DocketResult<Self> {
        info!("Creating Redis connection pool...");

        let pool = Config::from_url(&config.url)
            .builder()
            .map_err(|e| DocketError::Configuration(format!("Invalid Redis config: {e}")))?
            .max_size(config.pool_size)
            .runtime(Runtime::Tokio1)
            .build()
            .map_err(|e| DocketError::Configuration(format!("Failed to create Redis pool: {e}")))?;

        let service = Self::new(pool);
        service.ping().await?;

        info!("Redis connection pool created successfully");
        Ok(service)
    }

    /// Round-trips a `PING`.
    pub async fn ping(&self) -> DocketResult<()> {
        let mut conn = self.get_conn().await?;
        redis::cmd("PING")
            .query_async::<String>(&mut conn)
            .await
            .map_err(|e| DocketError::Cache(format!("PING failed: {e}")))?;
        Ok(())
    }

    async fn get_conn(&self) -> DocketResult<deadpool_redis::Connection> {
        self.pool
            .get()
            .await
            .map_err(|e| DocketError::Cache(format!("Failed to get Redis connection: {e}")))
    }
}

#[async_trait]
impl CacheInterface for RedisCacheService {
    async fn get_raw(&self, key: &str) -> DocketResult<Option<String>> {
        let mut conn = self.get_conn().await?;
        let value: Option<String> = conn
            .get(key)
            .await
            .map_err(|e| DocketError::Cache(format!("Failed to get key '{key}': {e}")))?;

        match &value {
            Some(_) => debug!("Cache hit for key '{}'", key),
            None => debug!("Cache miss for key '{}'", key),
        }

        Ok(value)
    }

    async fn set_raw(&self, key: &str, value: &str, ttl: Duration) -> DocketResult<()> {
        let mut conn = self.get_conn().await?;
        let ttl_secs = ttl.as_secs().max(1);

        conn.set_ex::<_, _, ()>(key, value, ttl_secs)
            .await
            .map_err(|e| DocketError::Cache(format!("Failed to set key '{key}': {e}")))?;

        debug!("Cached key '{}' with TTL {}s", key, ttl_secs);
        Ok(())
    }

    async fn delete(&self, key: &str) -> DocketResult<bool> {
        let mut conn = self.get_conn().await?;
        let deleted: i64 = conn
            .del(key)
            .await
            .map_err(|e| DocketError::Cache(format!("Failed to delete key '{key}': {e}")))?;

        debug!("Deleted key '{}': {}", key, deleted > 0);
        Ok(deleted > 0)
    }

    async fn delete_pattern(&self, pattern: &str) -> DocketResult<u64> {
        let mut conn = self.get_conn().await?;
        let mut cursor: u64 = 0;
        let mut deleted: u64 = 0;

        // Cursor-based SCAN; KEYS would block the server on large keyspaces.
        loop {
            let (next, keys): (u64, Vec<String>) = redis::cmd("SCAN")
                .arg(cursor)
                .arg("MATCH")
                .arg(pattern)
                .arg("COUNT")
                .arg(SCAN_BATCH)
                .query_async(&mut conn)
                .await
                .map_err(|e| DocketError::Cache(format!("Failed to scan keys: {e}")))?;

            if !keys.is_empty() {
                let removed: u64 = conn
                    .del(&keys)
                    .await
                    .map_err(|e| DocketError::Cache(format!("Failed to delete keys: {e}")))?;
                deleted += removed;
            }

            if next == 0 {
                break;
            }
            cursor = next;
        }

        debug!("Deleted {} keys matching pattern '{}'", deleted, pattern);
        Ok(deleted)
    }

    fn backend_name(&self) -> &'static str {
        "redis"
    }
}

#[async_trait]
impl HealthCheck for RedisCacheService {
    fn name(&self) -> &str {
        "cache"
    }

    async fn check(&self) -> HealthStatus {
        match self.ping().await {
            Ok(()) => HealthStatus::Healthy,
            Err(e) => HealthStatus::Degraded(e.to_string()),
        }
    }
}

impl std::fmt::Debug for RedisCacheService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let status = self.pool.status();
        f.debug_struct("RedisCacheService")
            .field("size", &status.size)
            .field("available", &status.available)
            .finish()
    }
}
