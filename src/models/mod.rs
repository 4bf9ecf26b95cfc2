// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@kernel.org>

//! Data models for the application.

pub mod game;
pub mod saved;
pub mod user;

pub use game::{Game, Screenshot};
pub use saved::{SavedEntry, SavedStatus};
pub use user::{PasswordHash, User};
