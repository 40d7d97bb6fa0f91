// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! HTTP route handlers.

pub mod home;
pub mod messages;
pub mod weather;

use crate::db::DbError;
use crate::error::AppError;
use crate::middleware::AuthError;
use crate::AppState;
use axum::{extract::rejection::JsonRejection, routing::get, Json, Router};
use serde::Serialize;
use std::sync::Arc;
use tower_http::cors::CorsLayer;
use tower_http::trace::{DefaultMakeSpan, DefaultOnResponse, TraceLayer};
use tracing::Level;

#[derive(Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub build_id: String,
}

/// Health check response
async fn health_check() -> Json<HealthResponse> {
    let build_id = option_env!("BUILD_ID").unwrap_or("unknown").to_string();
    Json(HealthResponse {
        status: "ok".to_string(),
        build_id,
    })
}

/// `{"status": "success"}` acknowledgement for mutations.
#[derive(Debug, Serialize)]
pub struct StatusResponse {
    pub status: &'static str,
}

impl StatusResponse {
    pub fn success() -> Json<Self> {
        Json(Self { status: "success" })
    }
}

/// Error mapping shared by the messenger-style endpoints: a missing header
/// is 401, anything after that is a 400 carrying the cause.
pub(crate) fn messenger_auth_error(err: AuthError) -> AppError {
    match err {
        AuthError::MissingBearer => AppError::Unauthorized,
        AuthError::Verification(e) => AppError::BadRequest(e.to_string()),
    }
}

/// A JSON body that failed to extract. Handlers check credentials first, so
/// the rejection only surfaces once the caller is known.
pub(crate) fn body_error(rejection: JsonRejection) -> AppError {
    AppError::BadRequest(rejection.body_text())
}

pub(crate) fn messenger_db_error(err: DbError) -> AppError {
    tracing::warn!(error = %err, "Messenger store operation failed");
    AppError::BadRequest(err.to_string())
}

/// Build the complete router with all routes.
pub fn create_router(state: Arc<AppState>) -> Router {
    // Mobile clients connect from anywhere; mirror whatever they send.
    let cors = CorsLayer::very_permissive();

    Router::new()
        .route("/health", get(health_check))
        .merge(home::routes())
        .merge(messages::routes())
        .merge(weather::routes())
        .layer(cors)
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(DefaultMakeSpan::new().level(Level::INFO))
                .on_response(DefaultOnResponse::new().level(Level::INFO)),
        )
        .with_state(state)
}
