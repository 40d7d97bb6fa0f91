// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@kernel.org>

//! Farmhand relay: backend for the farm companion app.
//!
//! This crate verifies Firebase ID tokens from mobile clients and performs
//! the few Realtime Database reads and writes the app cannot do on its own:
//! home screen data, chat message status transitions, and the weather node.

pub mod config;
pub mod db;
pub mod error;
pub mod middleware;
pub mod models;
pub mod routes;
pub mod services;
pub mod time_utils;

use config::Config;
use db::RealtimeDb;
use services::FirebaseTokenVerifier;
use std::sync::Arc;

/// Shared application state.
pub struct AppState {
    pub config: Config,
    pub db: RealtimeDb,
    pub token_verifier: Arc<FirebaseTokenVerifier>,
}
