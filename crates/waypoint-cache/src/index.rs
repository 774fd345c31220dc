//! Secondary index of players the pipeline has seen
//!
//! Successful player refreshes upsert a minimal record into a side index
//! used for discovery (enumerating which gamertags have stored data). The
//! index is never on the read path; a lost write cannot affect a served
//! payload.

use std::path::{Path, PathBuf};

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tracing::{debug, trace};

use crate::{Result, ensure_dir};

/// Gamer-id kind tag for Xbox 360 gamertags
const X360_GAMERTAG: &str = "x360-xbl-gamertag";

/// Minimal record of a player the pipeline has seen
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SeenPlayer {
    /// Normalized gamertag
    pub gamertag: String,
    /// Kind of gamer id the record was seen under
    pub gamer_id_kind: String,
}

impl SeenPlayer {
    /// Record for an Xbox 360 gamertag
    pub fn xbox360(gamertag: impl Into<String>) -> Self {
        Self {
            gamertag: gamertag.into(),
            gamer_id_kind: X360_GAMERTAG.to_string(),
        }
    }
}

/// Upsert-by-identifier contract for the discovery index
#[async_trait]
pub trait PlayerIndex: Send + Sync {
    /// Upsert a sighting; replace semantics, so repeated calls with the
    /// same record leave the same end state
    async fn record_seen(&self, player: &SeenPlayer) -> Result<()>;
}

/// Filesystem-backed index, one JSON document per gamertag
pub struct LocalPlayerIndex {
    root: PathBuf,
}

impl LocalPlayerIndex {
    /// Create an index rooted at the default cache directory
    pub async fn new() -> Result<Self> {
        Self::with_root(crate::get_cache_dir()?.join("known-players")).await
    }

    /// Create an index rooted at a custom directory
    pub async fn with_root(root: PathBuf) -> Result<Self> {
        ensure_dir(&root).await?;

        debug!("Initialized player index at: {:?}", root);

        Ok(Self { root })
    }

    /// Get the base directory of this index
    pub fn root(&self) -> &Path {
        &self.root
    }

    fn record_path(&self, gamertag: &str) -> PathBuf {
        self.root.join(format!("{gamertag}.json"))
    }

    /// Enumerate every recorded player
    pub async fn known_players(&self) -> Result<Vec<SeenPlayer>> {
        let mut players = Vec::new();

        let mut entries = tokio::fs::read_dir(&self.root).await?;
        while let Some(entry) = entries.next_entry().await? {
            let raw = match tokio::fs::read_to_string(entry.path()).await {
                Ok(raw) => raw,
                Err(_) => continue,
            };
            if let Ok(player) = serde_json::from_str::<SeenPlayer>(&raw) {
                players.push(player);
            }
        }

        Ok(players)
    }
}

#[async_trait]
impl PlayerIndex for LocalPlayerIndex {
    async fn record_seen(&self, player: &SeenPlayer) -> Result<()> {
        let path = self.record_path(&player.gamertag);

        trace!("Recording player sighting: {}", player.gamertag);
        tokio::fs::write(&path, serde_json::to_string_pretty(player)?).await?;

        Ok(())
    }
}
