// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Public weather route.

use crate::error::{AppError, Result};
use crate::models::weather::weather_or_default;
use crate::AppState;
use axum::{extract::State, routing::get, Json, Router};
use serde_json::Value;
use std::sync::Arc;

pub fn routes() -> Router<Arc<AppState>> {
    Router::new().route("/get-db-weather", get(get_db_weather))
}

/// Current weather as written by the admin panel. No authentication.
async fn get_db_weather(State(state): State<Arc<AppState>>) -> Result<Json<Value>> {
    let stored = state
        .db
        .get_current_weather()
        .await
        .map_err(|e| AppError::Database(e.to_string()))?;

    Ok(Json(weather_or_default(stored)))
}
