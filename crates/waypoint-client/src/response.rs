//! Response envelope and payload models for the Waypoint stats API
//!
//! Every Waypoint payload, player or global, carries a numeric `Status`
//! field and an optional human-readable `Reason`. [`Envelope`] deserializes
//! just that pair so a response can be classified without committing to a
//! payload model. The concrete models below cover the fields the stats
//! pipeline actually reads; unknown upstream fields are ignored.

use serde::{Deserialize, Serialize};

/// Status code for a successful generic response
pub const STATUS_OKAY: u32 = 0;

/// Status code for a successful player lookup
pub const STATUS_PLAYER_FOUND: u32 = 1;

/// The status/reason pair common to every Waypoint response
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct Envelope {
    pub status: u32,
    #[serde(default)]
    pub reason: Option<String>,
}

impl Envelope {
    /// Whether the status code is in the success allow-list
    ///
    /// Anything outside `{Okay, PlayerFound}` is an upstream-signalled
    /// failure even when the HTTP status was 200.
    pub fn is_success(&self) -> bool {
        matches!(self.status, STATUS_OKAY | STATUS_PLAYER_FOUND)
    }

    /// Parse just the envelope out of a response body
    pub fn from_json(body: &str) -> crate::Result<Self> {
        Ok(serde_json::from_str(body)?)
    }
}

/// A player's service record
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct ServiceRecord {
    pub status: u32,
    #[serde(default)]
    pub reason: Option<String>,
    pub gamertag: String,
    #[serde(default)]
    pub service_tag: Option<String>,
    #[serde(default)]
    pub player_model_url: Option<String>,
    #[serde(default)]
    pub total_kills: Option<u64>,
    #[serde(default)]
    pub total_deaths: Option<u64>,
    #[serde(default)]
    pub total_assists: Option<u64>,
    #[serde(default)]
    pub total_games_started: Option<u64>,
    #[serde(default)]
    pub total_credits_earned: Option<u64>,
    #[serde(default)]
    pub campaign_progress: Option<String>,
}

/// One page of a player's game history
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct GameHistory {
    pub status: u32,
    #[serde(default)]
    pub reason: Option<String>,
    #[serde(default)]
    pub gamertag: Option<String>,
    #[serde(default)]
    pub game_count: Option<u32>,
    #[serde(default)]
    pub games: Vec<GameHistoryEntry>,
}

/// One finished game in a player's history
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct GameHistoryEntry {
    pub game_id: u64,
    #[serde(default)]
    pub map_name: Option<String>,
    #[serde(default)]
    pub game_variant_name: Option<String>,
    #[serde(default)]
    pub kills: Option<u32>,
    #[serde(default)]
    pub deaths: Option<u32>,
    #[serde(default)]
    pub did_win: Option<bool>,
    #[serde(default)]
    pub game_timestamp: Option<String>,
}

/// Global game metadata: map and medal lookup tables
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct Metadata {
    pub status: u32,
    #[serde(default)]
    pub reason: Option<String>,
    #[serde(default)]
    pub maps: Vec<MapInfo>,
    #[serde(default)]
    pub medals: Vec<MedalInfo>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct MapInfo {
    pub map_id: u32,
    pub name: String,
    #[serde(default)]
    pub image_url: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct MedalInfo {
    pub medal_id: u32,
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
}

/// Matchmaking playlists currently in rotation
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct Playlist {
    pub status: u32,
    #[serde(default)]
    pub reason: Option<String>,
    #[serde(default)]
    pub playlists: Vec<PlaylistEntry>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct PlaylistEntry {
    pub playlist_id: u32,
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub max_players: Option<u32>,
}

/// Active global challenges
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct Challenge {
    pub status: u32,
    #[serde(default)]
    pub reason: Option<String>,
    #[serde(default)]
    pub challenges: Vec<ChallengeEntry>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct ChallengeEntry {
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub credit_reward: Option<u64>,
    #[serde(default)]
    pub is_weekly: Option<bool>,
    #[serde(default)]
    pub expiration_date: Option<String>,
}
