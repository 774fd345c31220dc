//! Game title support for the Waypoint stats service

use std::fmt;

/// Game titles served by the Waypoint stats service
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Title {
    /// Halo: Reach
    Reach,
    /// Halo 4
    Halo4,
}

impl Title {
    /// Get all supported titles
    pub fn all() -> &'static [Title] {
        &[Title::Reach, Title::Halo4]
    }

    /// Convert title to the lowercase token used in service URLs and
    /// cache namespaces
    pub fn as_str(&self) -> &'static str {
        match self {
            Title::Reach => "reach",
            Title::Halo4 => "h4",
        }
    }

    /// Parse a title from string
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "reach" => Some(Title::Reach),
            "h4" | "halo4" => Some(Title::Halo4),
            _ => None,
        }
    }
}

impl fmt::Display for Title {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for Title {
    type Err = crate::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Title::parse(s).ok_or_else(|| crate::Error::InvalidTitle(s.to_string()))
    }
}
