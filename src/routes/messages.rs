// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Messenger routes. Every path is scoped to the caller's own chat subtree,
//! so users can only touch their own messages.

use super::{body_error, messenger_auth_error, messenger_db_error, StatusResponse};
use crate::error::{AppError, Result};
use crate::middleware::{authenticate, AuthError};
use crate::models::chat::{edit_fields, new_user_message, seen_updates};
use crate::time_utils::now_epoch_millis;
use crate::AppState;
use axum::{
    extract::{rejection::JsonRejection, Path, State},
    http::HeaderMap,
    routing::{delete, patch, post},
    Json, Router,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

pub fn routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/send-message", post(send_message))
        .route("/edit-message", patch(edit_message))
        .route("/delete-message/{message_id}", delete(delete_message))
        .route("/mark-seen", post(mark_seen))
}

/// Body of `POST /send-message`.
#[derive(Debug, Deserialize)]
pub struct SendMessageRequest {
    pub text: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SendMessageResponse {
    pub status: &'static str,
    pub message_id: String,
}

/// Body of `PATCH /edit-message`.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EditMessageRequest {
    pub message_id: String,
    pub new_text: String,
}

/// Append a message from the caller to their chat.
async fn send_message(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    body: std::result::Result<Json<SendMessageRequest>, JsonRejection>,
) -> Result<Json<SendMessageResponse>> {
    let user = authenticate(&state, &headers)
        .await
        .map_err(messenger_auth_error)?;
    let Json(body) = body.map_err(body_error)?;

    if body.text.trim().is_empty() {
        return Err(AppError::BadRequest(
            "Message text must not be empty".to_string(),
        ));
    }

    let message = new_user_message(&body.text, now_epoch_millis());
    let message_id = state
        .db
        .send_message(&user.uid, message)
        .await
        .map_err(messenger_db_error)?;

    tracing::info!(uid = %user.uid, message_id = %message_id, "Message sent");
    Ok(Json(SendMessageResponse {
        status: "success",
        message_id,
    }))
}

/// Replace the text of one of the caller's messages.
///
/// The message is not required to exist; editing an unknown id creates it.
async fn edit_message(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    body: std::result::Result<Json<EditMessageRequest>, JsonRejection>,
) -> Result<Json<StatusResponse>> {
    let user = authenticate(&state, &headers)
        .await
        .map_err(messenger_auth_error)?;
    let Json(body) = body.map_err(body_error)?;

    let fields = edit_fields(&body.new_text, now_epoch_millis());
    state
        .db
        .edit_message(&user.uid, &body.message_id, fields)
        .await
        .map_err(messenger_db_error)?;

    tracing::info!(uid = %user.uid, message_id = %body.message_id, "Message edited");
    Ok(StatusResponse::success())
}

/// Delete one of the caller's messages. Unknown ids succeed.
async fn delete_message(
    State(state): State<Arc<AppState>>,
    Path(message_id): Path<String>,
    headers: HeaderMap,
) -> Result<Json<StatusResponse>> {
    let user = authenticate(&state, &headers)
        .await
        .map_err(messenger_auth_error)?;

    state
        .db
        .delete_message(&user.uid, &message_id)
        .await
        .map_err(messenger_db_error)?;

    tracing::info!(uid = %user.uid, message_id = %message_id, "Message deleted");
    Ok(StatusResponse::success())
}

/// Mark every admin message in the caller's chat as seen.
async fn mark_seen(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
) -> Result<Json<StatusResponse>> {
    // This endpoint answers a missing credential with a bare 401.
    let user = authenticate(&state, &headers)
        .await
        .map_err(|err| match err {
            AuthError::MissingBearer => AppError::MissingCredentials,
            other => messenger_auth_error(other),
        })?;

    let messages = state
        .db
        .get_chat_messages(&user.uid)
        .await
        .map_err(messenger_db_error)?;

    let updates = seen_updates(&messages);
    let count = updates.len() / 2;
    state
        .db
        .update_chat_fields(&user.uid, updates)
        .await
        .map_err(messenger_db_error)?;

    tracing::debug!(uid = %user.uid, count, "Admin messages marked seen");
    Ok(StatusResponse::success())
}
