// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Saved-game annotations.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::models::Game;

/// How the user has tagged a saved game.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SavedStatus {
    Favourite,
    Interested,
    Played,
}

impl SavedStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            SavedStatus::Favourite => "favourite",
            SavedStatus::Interested => "interested",
            SavedStatus::Played => "played",
        }
    }
}

impl fmt::Display for SavedStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SavedStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "favourite" => Ok(SavedStatus::Favourite),
            "interested" => Ok(SavedStatus::Interested),
            "played" => Ok(SavedStatus::Played),
            other => Err(format!("unknown saved status: {}", other)),
        }
    }
}

/// One saved game: the status plus a snapshot of the game taken when it was saved.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SavedEntry {
    pub status: SavedStatus,
    pub game: Game,
}

impl SavedEntry {
    pub fn new(status: SavedStatus, game: Game) -> Self {
        Self { status, game }
    }
}
