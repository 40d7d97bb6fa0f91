// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Request guards.

pub mod auth;

pub use auth::{authenticate, AuthError, AuthUser};
