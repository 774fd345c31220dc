//! Endpoint descriptors for the Waypoint stats API
//!
//! An [`Endpoint`] names one remote operation and knows how to render its
//! path relative to the per-title service root. The path shapes follow the
//! mobile JSON service (`{game}apijson.svc`): player endpoints embed the
//! gamertag, global endpoints are keyed only by the API key segment.

use std::fmt;

/// Game variant classes accepted by the game-history endpoint
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum VariantClass {
    Unknown,
    Campaign,
    Firefight,
    Competitive,
    Arena,
    Invasion,
}

impl VariantClass {
    /// The token used in game-history URLs
    pub fn as_str(&self) -> &'static str {
        match self {
            VariantClass::Unknown => "Unknown",
            VariantClass::Campaign => "Campaign",
            VariantClass::Firefight => "Firefight",
            VariantClass::Competitive => "Competitive",
            VariantClass::Arena => "Arena",
            VariantClass::Invasion => "Invasion",
        }
    }

    /// Parse a variant class from string
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "unknown" => Some(VariantClass::Unknown),
            "campaign" => Some(VariantClass::Campaign),
            "firefight" => Some(VariantClass::Firefight),
            "competitive" => Some(VariantClass::Competitive),
            "arena" => Some(VariantClass::Arena),
            "invasion" => Some(VariantClass::Invasion),
            _ => None,
        }
    }
}

impl fmt::Display for VariantClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for VariantClass {
    type Err = crate::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        VariantClass::parse(s).ok_or_else(|| crate::Error::InvalidVariantClass(s.to_string()))
    }
}

/// One remote operation against the stats service
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Endpoint {
    /// A player's service record
    ServiceRecord { gamertag: String },
    /// A page of a player's game history for one variant class
    GameHistory {
        gamertag: String,
        variant: VariantClass,
        page: u32,
    },
    /// Global game metadata (maps, medals, enemy types)
    Metadata,
    /// Matchmaking playlists
    Playlists,
    /// Global challenges
    Challenges,
}

impl Endpoint {
    /// Render the endpoint path relative to the service root
    ///
    /// `api_key` is the consumer key segment the public stats endpoints
    /// are registered under.
    pub fn path(&self, api_key: &str) -> String {
        match self {
            Endpoint::ServiceRecord { gamertag } => {
                format!("player/details/byplaylist/{api_key}/{gamertag}")
            }
            Endpoint::GameHistory {
                gamertag,
                variant,
                page,
            } => {
                format!("player/gamehistory/{api_key}/{gamertag}/{variant}/{page}")
            }
            Endpoint::Metadata => format!("game/metadata/{api_key}"),
            Endpoint::Playlists => format!("game/playlists/{api_key}"),
            Endpoint::Challenges => format!("game/challenges/{api_key}"),
        }
    }
}
