//! Resource kinds, their TTL table, and the blob key layout
//!
//! The key layout (`{prefix}/{name}.json`) matches the blob containers
//! earlier deployments wrote, so this implementation can be pointed at
//! existing stored data.

use std::time::Duration;

/// TTL for player service records
const SERVICE_RECORD_TTL: Duration = Duration::from_secs(8 * 60);

/// TTL for player game history
const GAME_HISTORY_TTL: Duration = Duration::from_secs(5 * 60);

/// TTL for global data (metadata, playlists, challenges)
const GLOBAL_TTL: Duration = Duration::from_secs(14 * 60);

/// Categories of cacheable Waypoint data
///
/// Each kind carries its own TTL and storage prefix. The global kinds are
/// singletons stored under a fixed file name instead of a per-player one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ResourceKind {
    PlayerServiceRecord,
    PlayerGameHistory,
    Metadata,
    Playlists,
    Challenges,
}

impl ResourceKind {
    /// Get all resource kinds
    pub fn all() -> &'static [ResourceKind] {
        &[
            ResourceKind::PlayerServiceRecord,
            ResourceKind::PlayerGameHistory,
            ResourceKind::Metadata,
            ResourceKind::Playlists,
            ResourceKind::Challenges,
        ]
    }

    /// Storage path prefix; the global kinds share the `other` prefix
    pub fn prefix(&self) -> &'static str {
        match self {
            ResourceKind::PlayerServiceRecord => "player-service-record",
            ResourceKind::PlayerGameHistory => "player-game-history",
            ResourceKind::Metadata | ResourceKind::Playlists | ResourceKind::Challenges => "other",
        }
    }

    /// How long a stored copy of this kind stays fresh
    pub fn ttl(&self) -> Duration {
        match self {
            ResourceKind::PlayerServiceRecord => SERVICE_RECORD_TTL,
            ResourceKind::PlayerGameHistory => GAME_HISTORY_TTL,
            ResourceKind::Metadata | ResourceKind::Playlists | ResourceKind::Challenges => {
                GLOBAL_TTL
            }
        }
    }

    /// Fixed file name for singleton kinds, `None` for per-player kinds
    pub fn singleton_name(&self) -> Option<&'static str> {
        match self {
            ResourceKind::Metadata => Some("metadata"),
            ResourceKind::Playlists => Some("playlists"),
            ResourceKind::Challenges => Some("challenges"),
            ResourceKind::PlayerServiceRecord | ResourceKind::PlayerGameHistory => None,
        }
    }

    /// Whether this kind is per-player and feeds the discovery index
    pub fn is_player(&self) -> bool {
        self.singleton_name().is_none()
    }

    /// Blob key for this kind and identifier: `{prefix}/{name}.json`
    ///
    /// Per-player kinds derive the file name from the normalized gamertag;
    /// singleton kinds ignore the identifier.
    pub fn blob_path(&self, identifier: &str) -> String {
        let name = match self.singleton_name() {
            Some(name) => name.to_string(),
            None => normalize_gamertag(identifier),
        };
        format!("{}/{}.json", self.prefix(), name)
    }
}

/// Normalize a user-supplied gamertag into a storage token
///
/// Lowercases and folds whitespace to hyphens. Deterministic and
/// idempotent, so any spelling of the same gamertag lands on the same key.
pub fn normalize_gamertag(gamertag: &str) -> String {
    gamertag
        .trim()
        .to_lowercase()
        .chars()
        .map(|c| if c.is_whitespace() { '-' } else { c })
        .collect()
}
