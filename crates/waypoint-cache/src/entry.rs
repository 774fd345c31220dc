//! Cache entry model and the freshness judgment
//!
//! Freshness is a read-time decision: nothing in storage is ever evicted,
//! an entry's age is simply compared against its kind's TTL at the moment
//! of each lookup.

use std::time::{Duration, SystemTime};

/// Decide whether a stored entry is still fresh under `ttl` at `now`
///
/// True iff the entry has a known write timestamp and
/// `now <= cached_at + ttl`. A missing timestamp is never fresh: unknown
/// age always re-fetches.
pub fn is_fresh(cached_at: Option<SystemTime>, ttl: Duration, now: SystemTime) -> bool {
    match cached_at {
        Some(cached_at) => match cached_at.checked_add(ttl) {
            Some(expires_at) => now <= expires_at,
            None => false,
        },
        None => false,
    }
}

/// A typed payload together with the timestamps that govern it
///
/// `expires_at` is derived from the write timestamp and the resource
/// kind's TTL at read time; it is not stored.
#[derive(Debug, Clone)]
pub struct CacheEntry<T> {
    pub payload: T,
    pub cached_at: SystemTime,
    pub expires_at: SystemTime,
}

impl<T> CacheEntry<T> {
    /// Build an entry, deriving `expires_at` from `cached_at + ttl`
    pub fn new(payload: T, cached_at: SystemTime, ttl: Duration) -> Self {
        Self {
            payload,
            cached_at,
            expires_at: cached_at.checked_add(ttl).unwrap_or(cached_at),
        }
    }

    /// Freshness at an explicit instant
    pub fn is_fresh_at(&self, now: SystemTime) -> bool {
        now <= self.expires_at
    }

    /// Freshness at the current instant
    pub fn is_fresh(&self) -> bool {
        self.is_fresh_at(SystemTime::now())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const TTL: Duration = Duration::from_secs(8 * 60);

    #[test]
    fn test_fresh_within_ttl() {
        let now = SystemTime::now();
        let cached_at = now - Duration::from_secs(7 * 60);
        assert!(is_fresh(Some(cached_at), TTL, now));
    }

    #[test]
    fn test_stale_past_ttl() {
        let now = SystemTime::now();
        let cached_at = now - Duration::from_secs(9 * 60);
        assert!(!is_fresh(Some(cached_at), TTL, now));
    }

    #[test]
    fn test_boundary_is_inclusive() {
        let now = SystemTime::now();
        let cached_at = now - TTL;
        assert!(is_fresh(Some(cached_at), TTL, now));
        assert!(!is_fresh(Some(cached_at - Duration::from_secs(1)), TTL, now));
    }

    #[test]
    fn test_missing_timestamp_is_never_fresh() {
        assert!(!is_fresh(None, TTL, SystemTime::now()));
    }

    #[test]
    fn test_entry_derives_expiry() {
        let cached_at = SystemTime::now();
        let entry = CacheEntry::new("payload", cached_at, TTL);

        assert_eq!(entry.expires_at, cached_at + TTL);
        assert!(entry.is_fresh_at(cached_at + Duration::from_secs(60)));
        assert!(!entry.is_fresh_at(cached_at + TTL + Duration::from_secs(1)));
    }
}
