// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Catalog routes (public).

use axum::{
    extract::{Path, Query, State},
    routing::get,
    Json, Router,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

use crate::error::{AppError, Result};
use crate::models::{Game, SavedStatus};
use crate::services::catalog::POPULAR_LIMIT;
use crate::services::{paginate, CatalogQuery, Page, SearchQuery, SortBy, PER_PAGE};
use crate::AppState;

pub fn routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/api/games", get(list_games))
        .route("/api/games/popular", get(popular_games))
        .route("/api/games/search", get(search_games))
        .route("/api/games/{id}", get(get_game))
}

pub(crate) fn default_page() -> usize {
    1
}

// ─── Listing ─────────────────────────────────────────────────

#[derive(Deserialize)]
struct ListParams {
    platform: Option<String>,
    genre: Option<String>,
    #[serde(default)]
    sort: SortBy,
    /// Pagination: page number (1-indexed)
    #[serde(default = "default_page")]
    page: usize,
}

/// List catalog games with platform/genre/sort filters.
async fn list_games(
    State(state): State<Arc<AppState>>,
    Query(params): Query<ListParams>,
) -> Result<Json<Page<Game>>> {
    tracing::debug!(
        platform = ?params.platform,
        genre = ?params.genre,
        sort = ?params.sort,
        page = params.page,
        "Listing games"
    );

    let query = CatalogQuery {
        platform: params.platform,
        genre: params.genre,
        sort: params.sort,
    };
    let games = state.catalog.list_games(&query).await?;
    Ok(Json(paginate(games, params.page, PER_PAGE)?))
}

/// Front page selection.
async fn popular_games(State(state): State<Arc<AppState>>) -> Result<Json<Vec<Game>>> {
    Ok(Json(state.catalog.popular(POPULAR_LIMIT).await?))
}

// ─── Search ──────────────────────────────────────────────────

#[derive(Deserialize)]
struct SearchParams {
    /// Title text
    #[serde(default)]
    q: String,
    platform: Option<String>,
    /// Earliest release year; empty means no filter
    year: Option<String>,
    #[serde(default = "default_page")]
    page: usize,
}

fn parse_year(year: Option<&str>) -> Result<Option<u16>> {
    match year.map(str::trim).filter(|y| !y.is_empty()) {
        None => Ok(None),
        Some(raw) => raw.parse::<u16>().map(Some).map_err(|_| {
            AppError::BadRequest("Invalid 'year' parameter: must be a year".to_string())
        }),
    }
}

/// Search the catalog by title.
async fn search_games(
    State(state): State<Arc<AppState>>,
    Query(params): Query<SearchParams>,
) -> Result<Json<Page<Game>>> {
    let query = SearchQuery {
        text: params.q,
        platform: params.platform,
        from_year: parse_year(params.year.as_deref())?,
    };
    let games = state.catalog.search(&query).await?;
    Ok(Json(paginate(games, params.page, PER_PAGE)?))
}

// ─── Detail ──────────────────────────────────────────────────

/// Game detail, with the active user's saved status when logged in.
#[derive(Serialize)]
pub struct GameDetail {
    #[serde(flatten)]
    pub game: Game,
    pub saved_status: Option<SavedStatus>,
}

async fn get_game(
    State(state): State<Arc<AppState>>,
    Path(id): Path<u64>,
) -> Result<Json<GameDetail>> {
    let game = state.catalog.game(id).await?;
    let saved_status = state.accounts.lock().await.game_status(id)?;
    Ok(Json(GameDetail { game, saved_status }))
}
