// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Bearer token authentication guard.
//!
//! Every protected handler runs the guard itself; nothing is cached between
//! requests.

use crate::services::TokenError;
use crate::AppState;
use axum::http::{header, HeaderMap};

const BEARER_PREFIX: &str = "Bearer ";

/// Authenticated user extracted from a verified ID token.
#[derive(Debug, Clone)]
pub struct AuthUser {
    pub uid: String,
}

/// Why a request could not be authenticated.
#[derive(Debug, thiserror::Error)]
pub enum AuthError {
    /// No Authorization header, or not a Bearer credential.
    #[error("missing bearer credential")]
    MissingBearer,

    /// The identity provider rejected the token.
    #[error(transparent)]
    Verification(#[from] TokenError),
}

/// Pull the token out of an `Authorization: Bearer <token>` header.
pub fn extract_bearer_token(headers: &HeaderMap) -> Result<&str, AuthError> {
    headers
        .get(header::AUTHORIZATION)
        .and_then(|h| h.to_str().ok())
        .and_then(|h| h.strip_prefix(BEARER_PREFIX))
        .ok_or(AuthError::MissingBearer)
}

/// Verify the request's bearer token and return the user it belongs to.
pub async fn authenticate(state: &AppState, headers: &HeaderMap) -> Result<AuthUser, AuthError> {
    let token = extract_bearer_token(headers)?;

    let verified = state
        .token_verifier
        .verify_id_token(token)
        .await
        .inspect_err(|err| match err {
            TokenError::Rejected(reason) => {
                tracing::warn!(reason = %reason, "Rejected ID token");
            }
            TokenError::Transient(reason) => {
                tracing::error!(reason = %reason, "ID token verification transient failure");
            }
        })?;

    tracing::debug!(uid = %verified.uid, "ID token verified");

    Ok(AuthUser { uid: verified.uid })
}
