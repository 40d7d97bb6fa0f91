// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! OAuth2 access tokens for the Realtime Database REST API.
//!
//! Tokens come from a `gcloud-sdk` token source, which handles the
//! service account grant and refreshes the cached token before it expires.

use anyhow::Context;
use gcloud_sdk::{GoogleAuthTokenGenerator, TokenSourceType};
use std::path::Path;

/// Scopes the Realtime Database REST API accepts for admin access.
pub const DATABASE_SCOPES: [&str; 2] = [
    "https://www.googleapis.com/auth/firebase.database",
    "https://www.googleapis.com/auth/userinfo.email",
];

/// Source of bearer tokens for the hosted database.
pub struct DatabaseTokenSource {
    generator: GoogleAuthTokenGenerator,
}

impl DatabaseTokenSource {
    /// Build a token source from the key file at `credentials_path`.
    ///
    /// When no such file exists, falls back to application default
    /// credentials (the metadata server on Cloud Run).
    pub async fn new(credentials_path: &Path) -> anyhow::Result<Self> {
        let scopes = DATABASE_SCOPES.iter().map(|s| s.to_string()).collect();
        let generator = GoogleAuthTokenGenerator::new(source_type(credentials_path), scopes)
            .await
            .with_context(|| {
                format!(
                    "failed loading Google credentials ({})",
                    credentials_path.display()
                )
            })?;

        Ok(Self { generator })
    }

    /// A currently valid access token.
    pub async fn access_token(&self) -> anyhow::Result<String> {
        let token = self
            .generator
            .create_token()
            .await
            .context("failed obtaining Google access token")?;
        Ok(token.token.as_sensitive_str().to_string())
    }
}

fn source_type(credentials_path: &Path) -> TokenSourceType {
    if credentials_path.is_file() {
        TokenSourceType::File(credentials_path.to_path_buf())
    } else {
        TokenSourceType::Default
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn key_file_is_used_when_present() {
        let path = Path::new(concat!(
            env!("CARGO_MANIFEST_DIR"),
            "/tests/fixtures/test_rsa_public.pem"
        ));
        assert!(matches!(source_type(path), TokenSourceType::File(p) if p == path));
    }

    #[test]
    fn missing_key_file_uses_default_credentials() {
        let path = Path::new("/nonexistent/serviceAccountKey.json");
        assert!(matches!(source_type(path), TokenSourceType::Default));
    }

    #[tokio::test]
    async fn malformed_key_file_is_rejected() {
        let path = Path::new(concat!(
            env!("CARGO_MANIFEST_DIR"),
            "/tests/fixtures/test_rsa_public.pem"
        ));
        let err = DatabaseTokenSource::new(path).await.err().unwrap();
        assert!(format!("{err:#}").contains("failed loading Google credentials"));
    }

    #[test]
    fn scopes_cover_database_access() {
        assert!(DATABASE_SCOPES.iter().any(|s| s.ends_with("/firebase.database")));
        assert!(DATABASE_SCOPES.iter().any(|s| s.ends_with("/userinfo.email")));
    }
}
