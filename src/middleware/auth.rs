// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Login gate for routes that act on the active user.

use crate::AppState;
use axum::{
    extract::{Request, State},
    middleware::Next,
    response::Response,
};
use std::sync::Arc;

use crate::error::AppError;

/// Active user attached to the request by [`require_login`].
#[derive(Debug, Clone)]
pub struct ActiveUser {
    pub username: String,
}

/// Middleware that rejects requests while nobody is logged in.
pub async fn require_login(
    State(state): State<Arc<AppState>>,
    mut request: Request,
    next: Next,
) -> Result<Response, AppError> {
    let user = state.accounts.lock().await.active_user()?;

    let Some(user) = user else {
        tracing::debug!(path = %request.uri().path(), "Rejected request: not logged in");
        return Err(AppError::Unauthorized);
    };

    request.extensions_mut().insert(ActiveUser {
        username: user.username,
    });

    Ok(next.run(request).await)
}
