// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Application configuration loaded from environment variables.

use std::env;
use std::path::PathBuf;

const DEFAULT_PORT: u16 = 8001;
const DEFAULT_CREDENTIALS_PATH: &str = "serviceAccountKey.json";

/// Application configuration, loaded once at startup.
#[derive(Debug, Clone)]
pub struct Config {
    /// Firebase project ID (ID token audience and issuer suffix)
    pub firebase_project_id: String,
    /// Realtime Database base URL, e.g. `https://<db>.firebaseio.com`
    pub database_url: String,
    /// Path to the service account key used to mint database access tokens
    pub credentials_path: PathBuf,
    /// Server port
    pub port: u16,
}

impl Config {
    /// Fixed config for tests.
    pub fn test_default() -> Self {
        Self {
            firebase_project_id: "test-project".to_string(),
            database_url: "https://test-project-default-rtdb.firebaseio.com".to_string(),
            credentials_path: PathBuf::from(DEFAULT_CREDENTIALS_PATH),
            port: DEFAULT_PORT,
        }
    }

    /// Load configuration from environment variables.
    ///
    /// A `.env` file in the working directory is loaded first if present.
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        Ok(Self {
            firebase_project_id: env::var("FIREBASE_PROJECT_ID")
                .map(|v| v.trim().to_string())
                .map_err(|_| ConfigError::Missing("FIREBASE_PROJECT_ID"))?,
            database_url: env::var("FIREBASE_DATABASE_URL")
                .map(|v| v.trim().trim_end_matches('/').to_string())
                .map_err(|_| ConfigError::Missing("FIREBASE_DATABASE_URL"))?,
            credentials_path: env::var("GOOGLE_APPLICATION_CREDENTIALS")
                .map(PathBuf::from)
                .unwrap_or_else(|_| PathBuf::from(DEFAULT_CREDENTIALS_PATH)),
            port: env::var("PORT")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(DEFAULT_PORT),
        })
    }
}

/// Configuration errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Missing required environment variable: {0}")]
    Missing(&'static str),
}
