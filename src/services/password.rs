// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Password hashing with salted PBKDF2-HMAC-SHA256.

use base64::{engine::general_purpose::STANDARD as BASE64, Engine as _};
use ring::digest::SHA256_OUTPUT_LEN;
use ring::pbkdf2;
use ring::rand::{SecureRandom, SystemRandom};
use std::num::NonZeroU32;

use crate::models::PasswordHash;

const ALGORITHM_ID: &str = "pbkdf2-sha256";
const SALT_LEN: usize = 16;

static PBKDF2_ALG: pbkdf2::Algorithm = pbkdf2::PBKDF2_HMAC_SHA256;

/// Default iteration count for new hashes.
pub const DEFAULT_ITERATIONS: u32 = 100_000;

/// Errors from hashing.
#[derive(Debug, thiserror::Error)]
pub enum PasswordError {
    #[error("Failed to generate salt")]
    Rng,
}

/// Hashes and verifies passwords.
#[derive(Clone)]
pub struct PasswordHasher {
    iterations: NonZeroU32,
    rng: SystemRandom,
}

impl PasswordHasher {
    pub fn new(iterations: NonZeroU32) -> Self {
        Self {
            iterations,
            rng: SystemRandom::new(),
        }
    }

    pub fn iterations(&self) -> u32 {
        self.iterations.get()
    }

    /// Hash a password with a fresh random salt.
    pub fn hash(&self, password: &str) -> Result<PasswordHash, PasswordError> {
        let mut salt = [0u8; SALT_LEN];
        self.rng.fill(&mut salt).map_err(|_| PasswordError::Rng)?;

        let mut derived = [0u8; SHA256_OUTPUT_LEN];
        pbkdf2::derive(
            PBKDF2_ALG,
            self.iterations,
            &salt,
            password.as_bytes(),
            &mut derived,
        );

        Ok(PasswordHash {
            algorithm: ALGORITHM_ID.to_string(),
            iterations: self.iterations.get(),
            salt: BASE64.encode(salt),
            hash: BASE64.encode(derived),
        })
    }

    /// Check a password against a stored hash.
    ///
    /// Uses the iteration count recorded in the hash, not the configured one.
    /// Malformed records never verify.
    pub fn verify(&self, password: &str, stored: &PasswordHash) -> bool {
        if stored.algorithm != ALGORITHM_ID {
            tracing::warn!(algorithm = %stored.algorithm, "Unknown password hash algorithm");
            return false;
        }
        let Some(iterations) = NonZeroU32::new(stored.iterations) else {
            return false;
        };
        let (Ok(salt), Ok(expected)) = (BASE64.decode(&stored.salt), BASE64.decode(&stored.hash))
        else {
            tracing::warn!("Password hash record is not valid base64");
            return false;
        };

        pbkdf2::verify(PBKDF2_ALG, iterations, &salt, password.as_bytes(), &expected).is_ok()
    }
}
