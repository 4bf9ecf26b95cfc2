//! Application configuration loaded from environment variables.
//!
//! A `.env` file in the working directory is honoured for local development.

use std::env;
use std::num::NonZeroU32;
use std::path::PathBuf;

use crate::services::password::DEFAULT_ITERATIONS;

/// Application configuration, loaded once at startup.
#[derive(Debug, Clone)]
pub struct Config {
    /// Server port
    pub port: u16,
    /// Frontend URL allowed by CORS
    pub frontend_url: String,
    /// Directory for the file-backed store; in-memory store when `None`
    pub data_dir: Option<PathBuf>,
    /// Catalog API base URL
    pub catalog_api_url: String,
    /// Value of the `x-rapidapi-host` header
    pub catalog_api_host: String,
    /// Value of the `x-rapidapi-key` header
    pub catalog_api_key: String,
    /// PBKDF2 iterations for newly hashed passwords
    pub password_hash_iterations: NonZeroU32,
}

const DEFAULT_CATALOG_URL: &str = "https://mmo-games.p.rapidapi.com";
const DEFAULT_CATALOG_HOST: &str = "mmo-games.p.rapidapi.com";

impl Default for Config {
    /// Default config for testing only.
    fn default() -> Self {
        Self::test_default()
    }
}

impl Config {
    /// Config for tests: in-memory store, cheap password hashing.
    pub fn test_default() -> Self {
        Self {
            port: 8080,
            frontend_url: "http://localhost:5173".to_string(),
            data_dir: None,
            catalog_api_url: "http://127.0.0.1:9".to_string(),
            catalog_api_host: DEFAULT_CATALOG_HOST.to_string(),
            catalog_api_key: "test_api_key".to_string(),
            password_hash_iterations: NonZeroU32::MIN.saturating_add(999),
        }
    }

    /// Load configuration from environment variables.
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok(); // Load .env file if present

        let iterations = match env::var("PASSWORD_HASH_ITERATIONS") {
            Ok(raw) => raw
                .trim()
                .parse::<NonZeroU32>()
                .map_err(|_| ConfigError::Invalid("PASSWORD_HASH_ITERATIONS", raw))?,
            Err(_) => NonZeroU32::MIN.saturating_add(DEFAULT_ITERATIONS - 1),
        };

        Ok(Self {
            port: env::var("PORT")
                .unwrap_or_else(|_| "8080".to_string())
                .parse()
                .unwrap_or(8080),
            frontend_url: env::var("FRONTEND_URL")
                .unwrap_or_else(|_| "http://localhost:5173".to_string()),
            data_dir: env::var_os("DATA_DIR")
                .filter(|v| !v.is_empty())
                .map(PathBuf::from),
            catalog_api_url: env::var("CATALOG_API_URL")
                .unwrap_or_else(|_| DEFAULT_CATALOG_URL.to_string()),
            catalog_api_host: env::var("CATALOG_API_HOST")
                .unwrap_or_else(|_| DEFAULT_CATALOG_HOST.to_string()),
            catalog_api_key: env::var("CATALOG_API_KEY")
                .map(|v| v.trim().to_string())
                .map_err(|_| ConfigError::Missing("CATALOG_API_KEY"))?,
            password_hash_iterations: iterations,
        })
    }
}

/// Configuration errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Missing required environment variable: {0}")]
    Missing(&'static str),

    #[error("Invalid value for {0}: {1:?}")]
    Invalid(&'static str, String),
}
