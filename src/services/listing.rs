// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Pagination and saved-list filtering for game listings.

use serde::Serialize;

use crate::models::{Game, SavedEntry, SavedStatus};

/// Games shown per page.
pub const PER_PAGE: usize = 20;

/// One page of a listing.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Page<T> {
    pub items: Vec<T>,
    /// 1-indexed page number
    pub page: usize,
    pub per_page: usize,
    /// Items across all pages
    pub total: usize,
    pub total_pages: usize,
    pub has_next: bool,
    pub has_previous: bool,
}

/// Errors from pagination arguments.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PageError {
    #[error("Page must be greater than 0")]
    ZeroPage,

    #[error("Items per page must be greater than 0")]
    ZeroPerPage,

    #[error("Page number causes overflow")]
    Overflow,
}

/// Cut one page out of `items`.
///
/// Pages past the end are empty rather than an error.
pub fn paginate<T>(items: Vec<T>, page: usize, per_page: usize) -> Result<Page<T>, PageError> {
    if page == 0 {
        return Err(PageError::ZeroPage);
    }
    if per_page == 0 {
        return Err(PageError::ZeroPerPage);
    }

    let total = items.len();
    let start = (page - 1)
        .checked_mul(per_page)
        .ok_or(PageError::Overflow)?;
    let end = start.saturating_add(per_page).min(total);

    let page_items = if start < total {
        items.into_iter().skip(start).take(end - start).collect()
    } else {
        Vec::new()
    };

    Ok(Page {
        items: page_items,
        page,
        per_page,
        total,
        total_pages: total.div_ceil(per_page),
        has_next: end < total,
        has_previous: page > 1,
    })
}

/// Games from `saved` with the given status (all when `None`) whose title
/// contains `text`, in save order.
pub fn filter_saved(
    saved: Vec<SavedEntry>,
    status: Option<SavedStatus>,
    text: Option<&str>,
) -> Vec<Game> {
    let text = text.filter(|t| !t.is_empty());
    saved
        .into_iter()
        .filter(|entry| status.map_or(true, |s| entry.status == s))
        .map(|entry| entry.game)
        .filter(|game| text.map_or(true, |t| game.title_matches(t)))
        .collect()
}
