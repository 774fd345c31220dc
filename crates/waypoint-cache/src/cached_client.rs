//! Cached wrapper for the Waypoint stats client
//!
//! [`CachedWaypointClient`] is a read-through cache over
//! [`waypoint_client::HttpClient`]: every lookup consults durable blob
//! storage first, goes over the wire only when the stored copy is older
//! than its kind's TTL, and keeps serving the stored copy when a refresh
//! attempt fails. Global resources are returned as plain snapshots; the
//! client holds no mutable "current metadata" state of its own.
//!
//! # Example
//!
//! ```no_run
//! use waypoint_cache::CachedWaypointClient;
//! use waypoint_client::Title;
//!
//! # #[tokio::main]
//! # async fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let client = CachedWaypointClient::new(Title::Reach).await?;
//!
//! // Served from storage when fresh; refreshed over the wire when not.
//! if let Some(record) = client.service_record("Noble Six").await {
//!     println!("{} career kills", record.total_kills.unwrap_or(0));
//! }
//! # Ok(())
//! # }
//! ```

use std::path::PathBuf;
use std::time::SystemTime;

use serde::de::DeserializeOwned;
use tracing::{debug, warn};

use waypoint_client::{
    Challenge, Endpoint, GameHistory, HttpClient, Metadata, Playlist, ServiceRecord, Title,
    VariantClass,
};

use crate::blob::{BlobStore, LocalBlobStore, read_json};
use crate::entry::is_fresh;
use crate::index::{LocalPlayerIndex, PlayerIndex, SeenPlayer};
use crate::resource::{ResourceKind, normalize_gamertag};
use crate::stats::{CacheStats, CacheStatsSnapshot};
use crate::validation::{ValidationVerdict, validate};
use crate::{Result, get_cache_dir};

/// A caching wrapper around the Waypoint HTTP client
pub struct CachedWaypointClient<S = LocalBlobStore, I = LocalPlayerIndex>
where
    S: BlobStore,
    I: PlayerIndex,
{
    /// The underlying HTTP client
    client: HttpClient,
    /// Durable blob storage for cached payloads
    store: S,
    /// Discovery side index of seen players
    index: I,
    /// Acquire outcome counters
    stats: CacheStats,
}

impl CachedWaypointClient {
    /// Create a new cached client with the default cache directory
    pub async fn new(title: Title) -> Result<Self> {
        let cache_dir = get_cache_dir()?.join(title.as_str());
        Self::with_cache_dir(title, cache_dir).await
    }

    /// Create a new cached client rooted at a custom directory
    pub async fn with_cache_dir(title: Title, cache_dir: PathBuf) -> Result<Self> {
        let client = HttpClient::new(title)?;
        let store = LocalBlobStore::with_root(cache_dir.join("blobs")).await?;
        let index = LocalPlayerIndex::with_root(cache_dir.join("known-players")).await?;

        debug!("Initialized cached Waypoint client for title {:?}", title);

        Ok(Self::with_parts(client, store, index))
    }
}

impl<S, I> CachedWaypointClient<S, I>
where
    S: BlobStore,
    I: PlayerIndex,
{
    /// Assemble a cached client from an existing client, store, and index
    pub fn with_parts(client: HttpClient, store: S, index: I) -> Self {
        Self {
            client,
            store,
            index,
            stats: CacheStats::new(),
        }
    }

    /// Get the underlying HTTP client
    pub fn inner(&self) -> &HttpClient {
        &self.client
    }

    /// Snapshot of the acquire counters
    pub fn stats(&self) -> CacheStatsSnapshot {
        self.stats.snapshot()
    }

    /// Get a player's service record
    pub async fn service_record(&self, gamertag: &str) -> Option<ServiceRecord> {
        let endpoint = Endpoint::ServiceRecord {
            gamertag: gamertag.to_string(),
        };
        self.acquire(ResourceKind::PlayerServiceRecord, gamertag, &endpoint, false)
            .await
    }

    /// Get a page of a player's game history
    ///
    /// The stored copy is keyed by gamertag alone; a different variant or
    /// page requested within the TTL is answered with the stored page.
    pub async fn game_history(
        &self,
        gamertag: &str,
        variant: VariantClass,
        page: u32,
    ) -> Option<GameHistory> {
        let endpoint = Endpoint::GameHistory {
            gamertag: gamertag.to_string(),
            variant,
            page,
        };
        self.acquire(ResourceKind::PlayerGameHistory, gamertag, &endpoint, false)
            .await
    }

    /// Get the global game metadata snapshot
    pub async fn metadata(&self) -> Option<Metadata> {
        self.acquire(ResourceKind::Metadata, "", &Endpoint::Metadata, false)
            .await
    }

    /// Get the matchmaking playlists snapshot
    pub async fn playlists(&self) -> Option<Playlist> {
        self.acquire(ResourceKind::Playlists, "", &Endpoint::Playlists, false)
            .await
    }

    /// Get the global challenges snapshot
    pub async fn challenges(&self) -> Option<Challenge> {
        self.acquire(ResourceKind::Challenges, "", &Endpoint::Challenges, false)
            .await
    }

    /// Refresh the metadata snapshot regardless of cache age
    pub async fn refresh_metadata(&self) -> Option<Metadata> {
        self.acquire(ResourceKind::Metadata, "", &Endpoint::Metadata, true)
            .await
    }

    /// Refresh the playlists snapshot regardless of cache age
    pub async fn refresh_playlists(&self) -> Option<Playlist> {
        self.acquire(ResourceKind::Playlists, "", &Endpoint::Playlists, true)
            .await
    }

    /// Refresh the challenges snapshot regardless of cache age
    pub async fn refresh_challenges(&self) -> Option<Challenge> {
        self.acquire(ResourceKind::Challenges, "", &Endpoint::Challenges, true)
            .await
    }

    /// Acquire one resource: serve fresh, else refresh, else degrade
    ///
    /// The freshness judgment happens strictly before any outbound call,
    /// so a fresh entry never costs remote I/O. The refresh is a single
    /// attempt; when it fails, the stored copy is served whatever its age,
    /// and `None` means there is no data anywhere.
    async fn acquire<T: DeserializeOwned>(
        &self,
        kind: ResourceKind,
        identifier: &str,
        endpoint: &Endpoint,
        force_refresh: bool,
    ) -> Option<T> {
        let key = kind.blob_path(identifier);
        let now = SystemTime::now();

        // A handle without a write timestamp counts as absent; unknown age
        // is never trusted.
        let cached = self
            .store
            .probe(&key)
            .await
            .filter(|handle| handle.cached_at.is_some());

        if !force_refresh {
            if let Some(handle) = &cached {
                if is_fresh(handle.cached_at, kind.ttl(), now) {
                    if let Some(payload) = read_json::<T, _>(&self.store, &key).await {
                        debug!("Cache hit for {}", key);
                        self.stats.record_hit();
                        return Some(payload);
                    }
                    // The fresh payload no longer deserializes; treat it as
                    // absent and refresh.
                }
            }

            debug!("Cache miss for {}, refreshing", key);
            self.stats.record_miss();
        }

        match validate(self.client.fetch(endpoint).await) {
            ValidationVerdict::Usable(body) => match serde_json::from_str::<T>(&body) {
                Ok(payload) => {
                    self.write_back(&key, body.as_bytes()).await;
                    if kind.is_player() {
                        self.record_seen(identifier).await;
                    }
                    self.stats.record_refresh();
                    return Some(payload);
                }
                Err(error) => {
                    // Passed the envelope check but not the payload model;
                    // same treatment as Unusable.
                    warn!("Refreshed payload for {} did not parse: {}", key, error);
                    self.stats.record_unusable_response();
                }
            },
            ValidationVerdict::Unusable => self.stats.record_unusable_response(),
            ValidationVerdict::TransportFailure => self.stats.record_transport_failure(),
        }

        // Refresh failed: a stale copy beats no copy.
        if cached.is_some() {
            if let Some(payload) = read_json::<T, _>(&self.store, &key).await {
                debug!("Serving stale {} after failed refresh", key);
                self.stats.record_stale_served();
                return Some(payload);
            }
        }

        None
    }

    /// Persist a refreshed payload; failure is observed, never propagated
    async fn write_back(&self, key: &str, body: &[u8]) {
        if let Err(error) = self.store.write(key, body).await {
            warn!("Failed to write {} to Waypoint cache: {}", key, error);
            self.stats.record_store_write_failure();
        }
    }

    /// Record a player sighting in the side index; failure never fails
    /// the read that triggered it
    async fn record_seen(&self, gamertag: &str) {
        let player = SeenPlayer::xbox360(normalize_gamertag(gamertag));
        if let Err(error) = self.index.record_seen(&player).await {
            warn!("Failed to record player sighting: {}", error);
        }
    }
}
