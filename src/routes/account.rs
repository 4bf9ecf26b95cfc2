// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Registration, login and profile routes.

use axum::{
    extract::State,
    http::StatusCode,
    routing::{get, post},
    Json, Router,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

use crate::error::{AppError, Result};
use crate::models::User;
use crate::services::ProfileUpdate;
use crate::AppState;

/// Routes usable while logged out.
pub fn public_routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/api/account/register", post(register))
        .route("/api/account/login", post(login))
        .route("/api/account/logout", post(logout))
}

/// Routes that need an active user.
pub fn protected_routes() -> Router<Arc<AppState>> {
    Router::new().route("/api/account/me", get(get_me).put(update_me))
}

/// Generic acknowledgement.
#[derive(Serialize)]
pub struct MessageResponse {
    pub success: bool,
    pub message: String,
}

/// Public view of the active user (never includes the password hash).
#[derive(Serialize)]
pub struct ProfileResponse {
    pub username: String,
    pub email: String,
    pub saved_count: usize,
}

impl From<User> for ProfileResponse {
    fn from(user: User) -> Self {
        Self {
            username: user.username,
            email: user.email,
            saved_count: user.saved.len(),
        }
    }
}

// ─── Registration ────────────────────────────────────────────

#[derive(Deserialize)]
pub struct RegisterRequest {
    pub username: String,
    pub email: String,
    pub password: String,
    pub confirm_password: String,
}

async fn register(
    State(state): State<Arc<AppState>>,
    Json(req): Json<RegisterRequest>,
) -> Result<(StatusCode, Json<MessageResponse>)> {
    state
        .with_accounts(move |accounts| {
            accounts.register(
                &req.username,
                &req.email,
                &req.password,
                &req.confirm_password,
            )?;
            Ok(())
        })
        .await?;

    Ok((
        StatusCode::CREATED,
        Json(MessageResponse {
            success: true,
            message: "Account created. You can now log in.".to_string(),
        }),
    ))
}

// ─── Session ─────────────────────────────────────────────────

#[derive(Deserialize)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

async fn login(
    State(state): State<Arc<AppState>>,
    Json(req): Json<LoginRequest>,
) -> Result<Json<ProfileResponse>> {
    let user = state
        .with_accounts(move |accounts| {
            accounts.login(&req.username, &req.password)?;
            accounts
                .active_user()?
                .ok_or_else(|| AppError::Internal(anyhow::anyhow!("Session missing after login")))
        })
        .await?;
    Ok(Json(user.into()))
}

async fn logout(State(state): State<Arc<AppState>>) -> Result<Json<MessageResponse>> {
    state.accounts.lock().await.logout()?;
    Ok(Json(MessageResponse {
        success: true,
        message: "Logged out".to_string(),
    }))
}

// ─── Profile ─────────────────────────────────────────────────

async fn get_me(State(state): State<Arc<AppState>>) -> Result<Json<ProfileResponse>> {
    let user = state
        .accounts
        .lock()
        .await
        .active_user()?
        .ok_or(AppError::Unauthorized)?;
    Ok(Json(user.into()))
}

/// Update username, email and/or password. Empty fields are left unchanged.
async fn update_me(
    State(state): State<Arc<AppState>>,
    Json(update): Json<ProfileUpdate>,
) -> Result<Json<ProfileResponse>> {
    let user = state
        .with_accounts(move |accounts| {
            accounts.update_profile(&update)?;
            accounts.active_user()?.ok_or(AppError::Unauthorized)
        })
        .await?;
    Ok(Json(user.into()))
}
