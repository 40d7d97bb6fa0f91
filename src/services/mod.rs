// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Services module - external identity and credential collaborators.

pub mod firebase_auth;
pub mod google_token;

pub use firebase_auth::{FirebaseTokenVerifier, TokenError, VerifiedUser};
pub use google_token::DatabaseTokenSource;
