//! Service-level metrics.

use metrics::{counter, describe_counter, describe_gauge, gauge};

/// Metric names emitted by the service layer.
pub mod names {
    /// Cache lookups answered from the cache.
    pub const CACHE_HITS_TOTAL: &str = "docket_cache_hits_total";
    /// Cache lookups that went to the record store.
    pub const CACHE_MISSES_TOTAL: &str = "docket_cache_misses_total";
    /// Number of stored tasks, refreshed periodically.
    pub const TASKS_COUNT: &str = "docket_tasks_count";
}

/// Register metric descriptions.
pub fn register_metrics() {
    describe_counter!(
        names::CACHE_HITS_TOTAL,
        "Total number of cache lookups served from the cache"
    );
    describe_counter!(
        names::CACHE_MISSES_TOTAL,
        "Total number of cache lookups that fell through to the store"
    );
    describe_gauge!(names::TASKS_COUNT, "Current number of stored tasks");
}

#[derive(Clone, Copy, Debug)]
pub struct TaskMetrics;

impl TaskMetrics {
    /// `kind` is `task` for single lookups and `list` for collections.
    pub fn cache_lookup(kind: &'static str, hit: bool) {
        let name = if hit {
            names::CACHE_HITS_TOTAL
        } else {
            names::CACHE_MISSES_TOTAL
        };
        counter!(name, "kind" => kind).increment(1);
    }

    #[allow(clippy::cast_precision_loss)]
    pub fn tasks_count(count: u64) {
        gauge!(names::TASKS_COUNT).set(count as f64);
    }
}
