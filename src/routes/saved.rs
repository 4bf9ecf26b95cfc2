// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Saved games of the active user.
//!
//! All routes here sit behind the login gate.

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    routing::{get, post},
    Extension, Json, Router,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

use super::games::default_page;
use crate::error::{AppError, Result};
use crate::middleware::auth::ActiveUser;
use crate::models::{Game, SavedEntry, SavedStatus};
use crate::services::{filter_saved, paginate, Page, PER_PAGE};
use crate::AppState;

pub fn routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/api/saved", get(list_saved).post(add_saved))
        .route("/api/saved/toggle", post(toggle_saved))
        .route(
            "/api/saved/{id}",
            get(get_saved).put(change_status).delete(remove_saved),
        )
}

// ─── Listing ─────────────────────────────────────────────────

#[derive(Deserialize)]
struct SavedParams {
    /// Status filter; empty or "all" for every status
    status: Option<String>,
    /// Title text
    q: Option<String>,
    #[serde(default = "default_page")]
    page: usize,
}

fn parse_status_filter(status: Option<&str>) -> Result<Option<SavedStatus>> {
    match status.filter(|s| !s.is_empty() && *s != "all") {
        None => Ok(None),
        Some(raw) => raw.parse().map(Some).map_err(AppError::BadRequest),
    }
}

async fn list_saved(
    State(state): State<Arc<AppState>>,
    Query(params): Query<SavedParams>,
) -> Result<Json<Page<Game>>> {
    let status = parse_status_filter(params.status.as_deref())?;
    let saved = state.accounts.lock().await.saved_games()?;
    let games = filter_saved(saved, status, params.q.as_deref());
    Ok(Json(paginate(games, params.page, PER_PAGE)?))
}

// ─── Mutations ───────────────────────────────────────────────

#[derive(Deserialize)]
pub struct SaveRequest {
    pub status: SavedStatus,
    pub game: Game,
}

#[derive(Deserialize)]
pub struct StatusRequest {
    pub status: SavedStatus,
}

#[derive(Serialize)]
pub struct ToggleResponse {
    pub saved: bool,
    pub status: Option<SavedStatus>,
}

async fn add_saved(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<ActiveUser>,
    Json(req): Json<SaveRequest>,
) -> Result<(StatusCode, Json<SavedEntry>)> {
    tracing::info!(
        username = %user.username,
        game_id = req.game.id,
        status = %req.status,
        "Saving game"
    );
    state
        .accounts
        .lock()
        .await
        .add_saved_game(&req.game, req.status)?;
    Ok((
        StatusCode::CREATED,
        Json(SavedEntry::new(req.status, req.game)),
    ))
}

/// Save the game if it is not saved yet, otherwise remove it.
async fn toggle_saved(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<ActiveUser>,
    Json(req): Json<SaveRequest>,
) -> Result<Json<ToggleResponse>> {
    let saved = state
        .accounts
        .lock()
        .await
        .toggle_saved(&req.game, req.status)?;
    tracing::info!(username = %user.username, game_id = req.game.id, saved, "Toggled saved game");
    Ok(Json(ToggleResponse {
        saved,
        status: saved.then_some(req.status),
    }))
}

async fn get_saved(
    State(state): State<Arc<AppState>>,
    Path(id): Path<u64>,
) -> Result<Json<SavedEntry>> {
    state
        .accounts
        .lock()
        .await
        .is_saved(id)?
        .map(Json)
        .ok_or_else(|| AppError::NotFound(format!("Game {} is not saved", id)))
}

async fn change_status(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<ActiveUser>,
    Path(id): Path<u64>,
    Json(req): Json<StatusRequest>,
) -> Result<Json<SavedEntry>> {
    let accounts = state.accounts.lock().await;
    if !accounts.change_saved_status(id, req.status)? {
        return Err(AppError::NotFound(format!("Game {} is not saved", id)));
    }
    tracing::info!(username = %user.username, game_id = id, status = %req.status, "Changed saved status");

    accounts
        .is_saved(id)?
        .map(Json)
        .ok_or_else(|| AppError::NotFound(format!("Game {} is not saved", id)))
}

async fn remove_saved(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<ActiveUser>,
    Path(id): Path<u64>,
) -> Result<StatusCode> {
    state.accounts.lock().await.remove_saved_game(id)?;
    tracing::info!(username = %user.username, game_id = id, "Removed saved game");
    Ok(StatusCode::NO_CONTENT)
}
