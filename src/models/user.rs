//! User model for storage and API.

use serde::{Deserialize, Serialize};

use crate::models::SavedEntry;

/// A registered user as stored in the users table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
    /// Unique login name (at least 6 characters)
    pub username: String,
    /// Unique email address
    pub email: String,
    /// Salted password hash (never the plaintext)
    pub password: PasswordHash,
    /// Saved games in save order
    #[serde(default)]
    pub saved: Vec<SavedEntry>,
}

/// Salted one-way password hash.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PasswordHash {
    /// Hash algorithm identifier ("pbkdf2-sha256")
    pub algorithm: String,
    /// PBKDF2 iteration count used for this hash
    pub iterations: u32,
    /// Salt (base64)
    pub salt: String,
    /// Derived key (base64)
    pub hash: String,
}

impl User {
    /// Index of the first saved entry for the given game ID.
    pub fn saved_index(&self, game_id: u64) -> Option<usize> {
        self.saved.iter().position(|s| s.game.id == game_id)
    }

    /// First saved entry for the given game ID.
    pub fn saved_entry(&self, game_id: u64) -> Option<&SavedEntry> {
        self.saved.iter().find(|s| s.game.id == game_id)
    }
}
