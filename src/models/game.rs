//! Game snapshot as returned by the catalog API.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// A game record from the catalog.
///
/// Stored verbatim inside saved entries, so any field the API adds that we
/// do not model is kept in `extra` and written back unchanged.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Game {
    /// Catalog ID (the only field the account layer looks at)
    pub id: u64,
    pub title: String,
    #[serde(default)]
    pub thumbnail: String,
    #[serde(default)]
    pub short_description: String,
    #[serde(default)]
    pub game_url: String,
    #[serde(default)]
    pub genre: String,
    #[serde(default)]
    pub platform: String,
    #[serde(default)]
    pub publisher: String,
    #[serde(default)]
    pub developer: String,
    /// Release date as sent by the API ("YYYY-MM-DD")
    #[serde(default)]
    pub release_date: String,
    /// Long description (detail endpoint only)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Screenshots (detail endpoint only)
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub screenshots: Vec<Screenshot>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Screenshot {
    pub id: u64,
    pub image: String,
}

impl Game {
    /// Release year parsed from the first four characters of `release_date`.
    pub fn release_year(&self) -> Option<u16> {
        self.release_date.get(..4).and_then(|y| y.parse().ok())
    }

    /// Case-insensitive substring match on the title.
    pub fn title_matches(&self, needle: &str) -> bool {
        self.title.to_lowercase().contains(&needle.to_lowercase())
    }
}
