//! Counters for the acquire paths
//!
//! One counter per outcome the acquire algorithm can take, so hit rate and
//! degradation behavior are observable without parsing logs. Cloning shares
//! the underlying counters.

use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

use serde::{Deserialize, Serialize};

/// Cache statistics for acquire outcomes
#[derive(Debug, Clone)]
pub struct CacheStats {
    /// Fresh entries served without remote I/O
    hits: Arc<AtomicU64>,
    /// Lookups that needed a refresh attempt
    misses: Arc<AtomicU64>,
    /// Refreshes that produced and persisted a new payload
    refreshes: Arc<AtomicU64>,
    /// Failed refreshes answered with a stale stored copy
    stale_served: Arc<AtomicU64>,
    /// Refresh attempts that never produced a response
    transport_failures: Arc<AtomicU64>,
    /// Responses the validator or payload model rejected
    unusable_responses: Arc<AtomicU64>,
    /// Write-backs that failed after a successful refresh
    store_write_failures: Arc<AtomicU64>,
}

/// Snapshot of cache statistics at a point in time
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CacheStatsSnapshot {
    pub hits: u64,
    pub misses: u64,
    pub refreshes: u64,
    pub stale_served: u64,
    pub transport_failures: u64,
    pub unusable_responses: u64,
    pub store_write_failures: u64,
    /// Cache hit rate as a percentage (0.0 to 100.0)
    pub hit_rate: f64,
}

impl Default for CacheStats {
    fn default() -> Self {
        Self::new()
    }
}

impl CacheStats {
    /// Create a new statistics tracker
    pub fn new() -> Self {
        Self {
            hits: Arc::new(AtomicU64::new(0)),
            misses: Arc::new(AtomicU64::new(0)),
            refreshes: Arc::new(AtomicU64::new(0)),
            stale_served: Arc::new(AtomicU64::new(0)),
            transport_failures: Arc::new(AtomicU64::new(0)),
            unusable_responses: Arc::new(AtomicU64::new(0)),
            store_write_failures: Arc::new(AtomicU64::new(0)),
        }
    }

    pub fn record_hit(&self) {
        self.hits.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_miss(&self) {
        self.misses.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_refresh(&self) {
        self.refreshes.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_stale_served(&self) {
        self.stale_served.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_transport_failure(&self) {
        self.transport_failures.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_unusable_response(&self) {
        self.unusable_responses.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_store_write_failure(&self) {
        self.store_write_failures.fetch_add(1, Ordering::Relaxed);
    }

    pub fn hits(&self) -> u64 {
        self.hits.load(Ordering::Relaxed)
    }

    pub fn misses(&self) -> u64 {
        self.misses.load(Ordering::Relaxed)
    }

    pub fn stale_served(&self) -> u64 {
        self.stale_served.load(Ordering::Relaxed)
    }

    /// Calculate hit rate as a percentage (0.0 to 100.0)
    pub fn hit_rate(&self) -> f64 {
        let hits = self.hits();
        let total = hits + self.misses();

        if total == 0 {
            0.0
        } else {
            (hits as f64 / total as f64) * 100.0
        }
    }

    /// Get a snapshot of current statistics
    pub fn snapshot(&self) -> CacheStatsSnapshot {
        CacheStatsSnapshot {
            hits: self.hits(),
            misses: self.misses(),
            refreshes: self.refreshes.load(Ordering::Relaxed),
            stale_served: self.stale_served(),
            transport_failures: self.transport_failures.load(Ordering::Relaxed),
            unusable_responses: self.unusable_responses.load(Ordering::Relaxed),
            store_write_failures: self.store_write_failures.load(Ordering::Relaxed),
            hit_rate: self.hit_rate(),
        }
    }
}
