// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@kernel.org>

//! Game Shelf: browse an online games catalog and keep a personal shelf
//!
//! This crate provides the backend for a single local profile: a proxy for
//! the games catalog API plus user accounts whose saved games are persisted
//! in a key/value store.

pub mod config;
pub mod db;
pub mod error;
pub mod middleware;
pub mod models;
pub mod routes;
pub mod services;

use config::Config;
use db::KeyValueStore;
use error::AppError;
use services::{CatalogClient, PasswordHasher, UserStore};
use std::sync::Arc;
use tokio::sync::Mutex;

/// Shared application state.
pub struct AppState {
    pub config: Config,
    /// The account store; the mutex makes it the single writer.
    pub accounts: Mutex<UserStore>,
    pub catalog: CatalogClient,
}

impl AppState {
    /// Build the state around a storage backend.
    pub fn new(config: Config, store: Box<dyn KeyValueStore>) -> Self {
        let hasher = PasswordHasher::new(config.password_hash_iterations);
        let catalog = CatalogClient::new(
            config.catalog_api_url.clone(),
            config.catalog_api_host.clone(),
            config.catalog_api_key.clone(),
        );
        Self {
            accounts: Mutex::new(UserStore::new(store, hasher)),
            catalog,
            config,
        }
    }

    /// Run `f` against the account store on the blocking pool.
    ///
    /// Used for the operations that hash passwords.
    pub async fn with_accounts<T, F>(self: &Arc<Self>, f: F) -> error::Result<T>
    where
        F: FnOnce(&UserStore) -> error::Result<T> + Send + 'static,
        T: Send + 'static,
    {
        let state = Arc::clone(self);
        tokio::task::spawn_blocking(move || f(&state.accounts.blocking_lock()))
            .await
            .map_err(|e| AppError::Internal(anyhow::anyhow!("Account task failed: {}", e)))?
    }
}
