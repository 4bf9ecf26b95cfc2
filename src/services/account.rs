// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! User accounts and saved games, persisted in a key/value store.
//!
//! Two keys are kept:
//! - `users`: the full users table, the only copy of every user record
//! - `activeUser`: the session, holding just the logged-in username
//!
//! The active user is always read back from the table, so the session can
//! never disagree with it. The table is re-read on every call; nothing is
//! cached between operations.

use serde::{Deserialize, Serialize};

use crate::db::{self, keys, KeyValueStore, StorageError};
use crate::models::{Game, SavedEntry, SavedStatus, User};
use crate::services::password::{PasswordError, PasswordHasher};
use crate::services::validation::{
    validate_email, validate_password, validate_username, ValidationError,
};

/// Login failures.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum AuthError {
    #[error("User not found")]
    UserNotFound,

    #[error("Incorrect password")]
    IncorrectPassword,
}

/// Errors from account operations.
#[derive(Debug, thiserror::Error)]
pub enum AccountError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error(transparent)]
    Auth(#[from] AuthError),

    #[error("No user is logged in")]
    NotLoggedIn,

    #[error("Game {0} is not saved")]
    NotSaved(u64),

    #[error("Password hashing failed: {0}")]
    Password(#[from] PasswordError),

    #[error(transparent)]
    Storage(#[from] StorageError),
}

pub type Result<T> = std::result::Result<T, AccountError>;

/// Session payload stored under `activeUser`.
#[derive(Debug, Clone, Serialize, Deserialize)]
struct Session {
    username: String,
}

/// Fields to change in a profile update. Empty strings count as "not supplied".
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ProfileUpdate {
    #[serde(default)]
    pub username: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub password: Option<String>,
    #[serde(default)]
    pub confirm_password: Option<String>,
}

fn supplied(field: &Option<String>) -> Option<&str> {
    field.as_deref().filter(|v| !v.is_empty())
}

/// Account store over a key/value backend.
pub struct UserStore {
    store: Box<dyn KeyValueStore>,
    hasher: PasswordHasher,
}

impl UserStore {
    pub fn new(store: Box<dyn KeyValueStore>, hasher: PasswordHasher) -> Self {
        Self { store, hasher }
    }

    // ─── Persistence ─────────────────────────────────────────────

    fn load_users(&self) -> Result<Vec<User>> {
        Ok(db::get_json::<Vec<User>>(self.store.as_ref(), keys::USERS)?.unwrap_or_default())
    }

    fn save_users(&self, users: &[User]) -> Result<()> {
        db::set_json(self.store.as_ref(), keys::USERS, users)?;
        Ok(())
    }

    /// The session slot; absent and `null` both mean logged out.
    fn session(&self) -> Result<Option<Session>> {
        let slot: Option<Option<Session>> = db::get_json(self.store.as_ref(), keys::ACTIVE_USER)?;
        Ok(slot.flatten())
    }

    fn set_session(&self, username: &str) -> Result<()> {
        let session = Session {
            username: username.to_string(),
        };
        db::set_json(self.store.as_ref(), keys::ACTIVE_USER, &session)?;
        Ok(())
    }

    /// Load the table and locate the active user in it.
    fn load_active(&self) -> Result<(Vec<User>, usize)> {
        let session = self.session()?.ok_or(AccountError::NotLoggedIn)?;
        let users = self.load_users()?;
        match users.iter().position(|u| u.username == session.username) {
            Some(index) => Ok((users, index)),
            None => {
                tracing::warn!(
                    username = %session.username,
                    "Session points at a user missing from the table"
                );
                Err(AccountError::NotLoggedIn)
            }
        }
    }

    /// Apply `f` to the active user and write the table back.
    fn update_active<T>(&self, f: impl FnOnce(&mut User) -> Result<T>) -> Result<T> {
        let (mut users, index) = self.load_active()?;
        let out = f(&mut users[index])?;
        self.save_users(&users)?;
        Ok(out)
    }

    // ─── Accounts ────────────────────────────────────────────────

    /// Register a new user. Does not log them in.
    pub fn register(
        &self,
        username: &str,
        email: &str,
        password: &str,
        confirm_password: &str,
    ) -> Result<()> {
        let mut users = self.load_users()?;

        validate_username(username, &users, None)?;
        validate_email(email, &users, None)?;
        validate_password(password, confirm_password)?;

        users.push(User {
            username: username.to_string(),
            email: email.to_string(),
            password: self.hasher.hash(password)?,
            saved: Vec::new(),
        });
        self.save_users(&users)?;

        tracing::info!(username, total_users = users.len(), "Registered user");
        Ok(())
    }

    /// Check credentials and start a session.
    pub fn login(&self, username: &str, password: &str) -> Result<()> {
        let users = self.load_users()?;
        let user = users
            .iter()
            .find(|u| u.username == username)
            .ok_or(AuthError::UserNotFound)?;

        if !self.hasher.verify(password, &user.password) {
            tracing::info!(username, "Login rejected: incorrect password");
            return Err(AuthError::IncorrectPassword.into());
        }

        self.set_session(username)?;
        tracing::info!(username, "User logged in");
        Ok(())
    }

    /// End the session. Succeeds when nobody is logged in.
    pub fn logout(&self) -> Result<()> {
        self.store.remove(keys::ACTIVE_USER)?;
        tracing::info!("User logged out");
        Ok(())
    }

    pub fn is_logged_in(&self) -> Result<bool> {
        Ok(self.active_user()?.is_some())
    }

    /// The logged-in user's record, or `None` when logged out.
    pub fn active_user(&self) -> Result<Option<User>> {
        match self.load_active() {
            Ok((mut users, index)) => Ok(Some(users.swap_remove(index))),
            Err(AccountError::NotLoggedIn) => Ok(None),
            Err(e) => Err(e),
        }
    }

    /// Change any of username, email and password of the active user.
    ///
    /// Fields are checked in that order and the first failure aborts the
    /// whole update. The user's own current username/email do not count as
    /// taken.
    pub fn update_profile(&self, update: &ProfileUpdate) -> Result<()> {
        let (mut users, index) = self.load_active()?;
        let current = users[index].username.clone();
        let mut user = users[index].clone();

        if let Some(username) = supplied(&update.username) {
            validate_username(username, &users, Some(&current))?;
            user.username = username.to_string();
        }
        if let Some(email) = supplied(&update.email) {
            validate_email(email, &users, Some(&current))?;
            user.email = email.to_string();
        }
        if let Some(password) = supplied(&update.password) {
            let confirm = update.confirm_password.as_deref().unwrap_or("");
            validate_password(password, confirm)?;
            user.password = self.hasher.hash(password)?;
        }

        let renamed = user.username != current;
        let new_username = user.username.clone();
        users[index] = user;

        // Table first; a stale session name reads as logged out.
        self.save_users(&users)?;
        if renamed {
            self.set_session(&new_username)?;
        }

        tracing::info!(
            username = %new_username,
            previous = %current,
            renamed,
            "Updated profile"
        );
        Ok(())
    }

    // ─── Saved games ─────────────────────────────────────────────

    /// Append a saved entry. Does not check for an existing entry.
    pub fn add_saved_game(&self, game: &Game, status: SavedStatus) -> Result<()> {
        self.update_active(|user| {
            user.saved.push(SavedEntry::new(status, game.clone()));
            tracing::debug!(
                username = %user.username,
                game_id = game.id,
                %status,
                "Saved game"
            );
            Ok(())
        })
    }

    /// Remove the first saved entry for `game`.
    pub fn remove_saved_game(&self, game_id: u64) -> Result<()> {
        self.update_active(|user| {
            let index = user
                .saved_index(game_id)
                .ok_or(AccountError::NotSaved(game_id))?;
            user.saved.remove(index);
            tracing::debug!(username = %user.username, game_id, "Removed saved game");
            Ok(())
        })
    }

    /// Set the status of a saved game.
    ///
    /// Returns `false` without writing anything when nobody is logged in or
    /// the game is not saved.
    pub fn change_saved_status(&self, game_id: u64, status: SavedStatus) -> Result<bool> {
        let (mut users, index) = match self.load_active() {
            Ok(found) => found,
            Err(AccountError::NotLoggedIn) => return Ok(false),
            Err(e) => return Err(e),
        };

        let user = &mut users[index];
        let Some(position) = user.saved_index(game_id) else {
            return Ok(false);
        };
        user.saved[position].status = status;
        tracing::debug!(username = %user.username, game_id, %status, "Changed saved status");

        self.save_users(&users)?;
        Ok(true)
    }

    /// The saved entry for `game`, if any.
    pub fn is_saved(&self, game_id: u64) -> Result<Option<SavedEntry>> {
        let (users, index) = self.load_active()?;
        Ok(users[index].saved_entry(game_id).cloned())
    }

    /// All saved entries of the active user, in save order.
    pub fn saved_games(&self) -> Result<Vec<SavedEntry>> {
        let (mut users, index) = self.load_active()?;
        Ok(users.swap_remove(index).saved)
    }

    /// Status of a saved game; `None` when logged out or not saved.
    pub fn game_status(&self, game_id: u64) -> Result<Option<SavedStatus>> {
        match self.is_saved(game_id) {
            Ok(entry) => Ok(entry.map(|e| e.status)),
            Err(AccountError::NotLoggedIn) => Ok(None),
            Err(e) => Err(e),
        }
    }

    /// Save `game` with `status` if it is not saved, otherwise remove it.
    ///
    /// Returns whether the game is saved afterwards.
    pub fn toggle_saved(&self, game: &Game, status: SavedStatus) -> Result<bool> {
        self.update_active(|user| match user.saved_index(game.id) {
            Some(index) => {
                user.saved.remove(index);
                tracing::debug!(username = %user.username, game_id = game.id, "Unsaved game");
                Ok(false)
            }
            None => {
                user.saved.push(SavedEntry::new(status, game.clone()));
                tracing::debug!(
                    username = %user.username,
                    game_id = game.id,
                    %status,
                    "Saved game"
                );
                Ok(true)
            }
        })
    }
}
