// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Home screen data and presence routes.

use super::{messenger_auth_error, messenger_db_error, StatusResponse};
use crate::db::DbError;
use crate::error::{AppError, Result};
use crate::middleware::{authenticate, AuthError};
use crate::models::chat::delivered_updates;
use crate::models::{select_active_batch, HomeProfile, UserStatus};
use crate::AppState;
use axum::{
    extract::State,
    http::HeaderMap,
    routing::{get, post},
    Json, Router,
};
use serde::Serialize;
use serde_json::{Map, Value};
use std::sync::Arc;

pub fn routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/user-home-data", get(get_home_data))
        .route("/go-offline", post(go_offline))
}

/// Home screen payload.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HomeDataResponse {
    pub profile: HomeProfile,
    pub active_batch: Option<Map<String, Value>>,
}

/// Any failure past the header check reads as an invalid session to the
/// client; the cause only goes to the log.
fn session_error(err: DbError) -> AppError {
    tracing::warn!(error = %err, "Home data request failed");
    AppError::InvalidSession
}

/// Load the home screen, marking the user online and their pending admin
/// messages delivered.
async fn get_home_data(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
) -> Result<Json<HomeDataResponse>> {
    let user = authenticate(&state, &headers)
        .await
        .map_err(|err| match err {
            AuthError::MissingBearer => AppError::Unauthorized,
            AuthError::Verification(_) => AppError::InvalidSession,
        })?;
    let uid = user.uid.as_str();

    let profile = state
        .db
        .get_user_profile(uid)
        .await
        .map_err(session_error)?
        .ok_or_else(|| {
            tracing::warn!(uid, "Profile not found");
            AppError::ProfileNotFound
        })?;

    state
        .db
        .set_user_status(uid, UserStatus::Online)
        .await
        .map_err(session_error)?;

    // The user is reachable now, so anything the admin sent is delivered.
    let messages = state.db.get_chat_messages(uid).await.map_err(session_error)?;
    let updates = delivered_updates(&messages);
    if !updates.is_empty() {
        tracing::info!(uid, count = updates.len(), "Marking admin messages delivered");
    }
    state
        .db
        .update_chat_fields(uid, updates)
        .await
        .map_err(session_error)?;

    let batches = state.db.list_global_batches().await.map_err(session_error)?;
    let active_batch = select_active_batch(batches);

    Ok(Json(HomeDataResponse {
        profile: HomeProfile::from(profile),
        active_batch,
    }))
}

/// Mark the user offline (logout).
async fn go_offline(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
) -> Result<Json<StatusResponse>> {
    let user = authenticate(&state, &headers)
        .await
        .map_err(messenger_auth_error)?;

    state
        .db
        .set_user_status(&user.uid, UserStatus::Offline)
        .await
        .map_err(messenger_db_error)?;

    tracing::info!(uid = %user.uid, "User went offline");
    Ok(StatusResponse::success())
}
