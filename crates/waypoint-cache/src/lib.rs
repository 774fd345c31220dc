//! Read-through caching layer for Waypoint stats
//!
//! This crate wraps the `waypoint-client` HTTP client with a time-bounded
//! blob cache and stale-fallback semantics:
//! - Fresh stored copies are served with zero remote I/O
//! - Stale or missing copies trigger exactly one refresh attempt
//! - A failed refresh degrades to the last stored copy rather than no data
//! - Successful player refreshes are recorded in a discovery side index
//!
//! The entry point is [`CachedWaypointClient`]; the storage and index
//! contracts ([`BlobStore`], [`PlayerIndex`]) are narrow traits with local
//! filesystem implementations.

use std::path::{Path, PathBuf};

pub mod blob;
pub mod cached_client;
pub mod entry;
pub mod error;
pub mod index;
pub mod resource;
pub mod stats;
pub mod validation;

pub use blob::{BlobHandle, BlobStore, LocalBlobStore};
pub use cached_client::CachedWaypointClient;
pub use entry::{CacheEntry, is_fresh};
pub use error::{Error, Result};
pub use index::{LocalPlayerIndex, PlayerIndex, SeenPlayer};
pub use resource::{ResourceKind, normalize_gamertag};
pub use stats::{CacheStats, CacheStatsSnapshot};
pub use validation::{ValidationVerdict, validate};

/// Get the base Waypoint cache directory
///
/// Returns a path like:
/// - Linux: `~/.cache/waypoint`
/// - macOS: `~/Library/Caches/waypoint`
/// - Windows: `C:\Users\{user}\AppData\Local\waypoint\cache`
pub fn get_cache_dir() -> Result<PathBuf> {
    dirs::cache_dir()
        .ok_or(Error::CacheDirectoryNotFound)
        .map(|dir| dir.join("waypoint"))
}

/// Ensure a directory exists, creating it if necessary
pub(crate) async fn ensure_dir(path: impl AsRef<Path>) -> Result<()> {
    let path = path.as_ref();
    if tokio::fs::metadata(path).await.is_err() {
        tokio::fs::create_dir_all(path).await?;
    }
    Ok(())
}
