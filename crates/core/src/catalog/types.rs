//! Domain types for catalog items.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

use super::CatalogError;

// ============================================================================
// Catalog keys
// ============================================================================

/// An identifier in the catalog's key space.
///
/// Keys are published as lowercase base-16 strings ("1a3f") but are ordered
/// like the integers they encode, so the key space of a catalog whose newest
/// item is `N` is the inclusive range `[0, N]`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct CatalogKey(u64);

impl CatalogKey {
    /// Create a key from its numeric value.
    pub fn new(value: u64) -> Self {
        Self(value)
    }

    /// Parse a base-16 key. Case-insensitive, leading zeros allowed.
    pub fn from_hex(s: &str) -> Result<Self, CatalogError> {
        let trimmed = s.trim();
        if trimmed.is_empty() {
            return Err(CatalogError::InvalidKey(s.to_string()));
        }
        u64::from_str_radix(trimmed, 16)
            .map(Self)
            .map_err(|_| CatalogError::InvalidKey(s.to_string()))
    }

    /// Numeric value of the key.
    pub fn value(&self) -> u64 {
        self.0
    }

    /// Canonical form: lowercase hex, no padding.
    pub fn to_hex(&self) -> String {
        format!("{:x}", self.0)
    }
}

impl fmt::Display for CatalogKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:x}", self.0)
    }
}

impl FromStr for CatalogKey {
    type Err = CatalogError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_hex(s)
    }
}

impl Serialize for CatalogKey {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_hex())
    }
}

impl<'de> Deserialize<'de> for CatalogKey {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        Self::from_hex(&s).map_err(serde::de::Error::custom)
    }
}

// ============================================================================
// Items
// ============================================================================

/// Difficulty tiers a beatmap can ship.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Difficulty {
    Easy,
    Normal,
    Hard,
    Expert,
    ExpertPlus,
}

impl Difficulty {
    /// All tiers, easiest first.
    pub const ALL: [Difficulty; 5] = [
        Difficulty::Easy,
        Difficulty::Normal,
        Difficulty::Hard,
        Difficulty::Expert,
        Difficulty::ExpertPlus,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Difficulty::Easy => "easy",
            Difficulty::Normal => "normal",
            Difficulty::Hard => "hard",
            Difficulty::Expert => "expert",
            Difficulty::ExpertPlus => "expert_plus",
        }
    }
}

impl fmt::Display for Difficulty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Which difficulty tiers are present on a beatmap.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Difficulties {
    #[serde(default)]
    pub easy: bool,
    #[serde(default)]
    pub normal: bool,
    #[serde(default)]
    pub hard: bool,
    #[serde(default)]
    pub expert: bool,
    #[serde(default)]
    pub expert_plus: bool,
}

impl Difficulties {
    /// Check whether a tier is present.
    pub fn has(&self, difficulty: Difficulty) -> bool {
        match difficulty {
            Difficulty::Easy => self.easy,
            Difficulty::Normal => self.normal,
            Difficulty::Hard => self.hard,
            Difficulty::Expert => self.expert,
            Difficulty::ExpertPlus => self.expert_plus,
        }
    }

    /// Every tier set.
    pub fn all() -> Self {
        Self {
            easy: true,
            normal: true,
            hard: true,
            expert: true,
            expert_plus: true,
        }
    }
}

/// Song and level metadata.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Metadata {
    /// Song title.
    pub song_name: String,
    /// Song subtitle.
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub song_sub_name: String,
    /// Song artist.
    pub song_author_name: String,
    /// Mapper who authored the level.
    pub level_author_name: String,
    /// Tempo in beats per minute.
    pub bpm: f64,
    /// Song length in seconds.
    pub duration: f64,
    /// Difficulty tiers present.
    pub difficulties: Difficulties,
}

/// Community statistics.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Stats {
    /// Community rating (0.0-1.0).
    pub rating: f64,
    /// Download count.
    pub downloads: u64,
    #[serde(default)]
    pub plays: u64,
    #[serde(default)]
    pub up_votes: u64,
    #[serde(default)]
    pub down_votes: u64,
}

/// A beatmap fetched from the catalog.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Item {
    /// Unique item id (used for the library ownership check).
    pub id: String,
    /// Position in the catalog key space.
    pub key: CatalogKey,
    /// Display name.
    pub name: String,
    /// Level hash, if the catalog publishes one.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hash: Option<String>,
    pub metadata: Metadata,
    pub stats: Stats,
}

impl Item {
    /// "Artist - Song by Mapper", as shown in logs.
    pub fn display_title(&self) -> String {
        format!(
            "{} - {} by {}",
            self.metadata.song_author_name, self.metadata.song_name, self.metadata.level_author_name
        )
    }
}
