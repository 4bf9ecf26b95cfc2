// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Services module - business logic layer.

pub mod account;
pub mod catalog;
pub mod listing;
pub mod password;
pub mod validation;

pub use account::{AccountError, AuthError, ProfileUpdate, UserStore};
pub use catalog::{CatalogClient, CatalogQuery, SearchQuery, SortBy};
pub use listing::{filter_saved, paginate, Page, PER_PAGE};
pub use password::PasswordHasher;
pub use validation::ValidationError;
