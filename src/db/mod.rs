// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Storage layer: a string key/value port plus its backends.
//!
//! The account layer only ever talks to [`KeyValueStore`]; which backend sits
//! behind it is decided at startup.

pub mod file;
pub mod memory;

pub use file::FileStore;
pub use memory::MemoryStore;

/// Key names as constants.
pub mod keys {
    /// The full users table (JSON array of users).
    pub const USERS: &str = "users";
    /// The session pointer for the logged-in user.
    pub const ACTIVE_USER: &str = "activeUser";
}

/// Result alias for storage operations.
pub type StorageResult<T> = Result<T, StorageError>;

/// String key/value store with get/set/remove semantics.
///
/// Implementations must be safe to share across request handlers; the
/// account layer still treats the store as having a single writer.
pub trait KeyValueStore: Send + Sync {
    /// Read the value under `key`, or `None` when absent.
    fn get(&self, key: &str) -> StorageResult<Option<String>>;
    /// Overwrite the value under `key`.
    fn set(&self, key: &str, value: &str) -> StorageResult<()>;
    /// Delete `key`. Removing an absent key succeeds.
    fn remove(&self, key: &str) -> StorageResult<()>;
}

impl<T: KeyValueStore + ?Sized> KeyValueStore for std::sync::Arc<T> {
    fn get(&self, key: &str) -> StorageResult<Option<String>> {
        (**self).get(key)
    }

    fn set(&self, key: &str, value: &str) -> StorageResult<()> {
        (**self).set(key, value)
    }

    fn remove(&self, key: &str) -> StorageResult<()> {
        (**self).remove(key)
    }
}

/// Errors raised by storage backends.
#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    #[error("I/O error for key '{key}': {source}")]
    Io {
        key: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid storage key: '{0}'")]
    InvalidKey(String),

    #[error("Corrupt value under key '{key}': {source}")]
    Corrupt {
        key: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("Storage lock poisoned")]
    Poisoned,
}

impl StorageError {
    pub fn io(key: &str, source: std::io::Error) -> Self {
        StorageError::Io {
            key: key.to_string(),
            source,
        }
    }

    pub fn corrupt(key: &str, source: serde_json::Error) -> Self {
        StorageError::Corrupt {
            key: key.to_string(),
            source,
        }
    }
}

/// Read a JSON value stored under `key`.
pub fn get_json<T: serde::de::DeserializeOwned>(
    store: &dyn KeyValueStore,
    key: &str,
) -> StorageResult<Option<T>> {
    match store.get(key)? {
        Some(raw) => serde_json::from_str(&raw)
            .map(Some)
            .map_err(|e| StorageError::corrupt(key, e)),
        None => Ok(None),
    }
}

/// Serialize `value` as JSON and store it under `key`.
pub fn set_json<T: serde::Serialize + ?Sized>(
    store: &dyn KeyValueStore,
    key: &str,
    value: &T,
) -> StorageResult<()> {
    let raw = serde_json::to_string(value).map_err(|e| StorageError::corrupt(key, e))?;
    store.set(key, &raw)
}
