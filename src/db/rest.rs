// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Realtime Database REST client.
//!
//! Every node is addressable as `{database_url}/{path}.json`:
//! - `GET` reads a subtree (`null` when absent)
//! - `PATCH` is a multi-path update relative to the node
//! - `POST` appends a child under a generated key
//! - `DELETE` removes the node (absent nodes are fine)

use super::{segments, DbError};
use crate::services::DatabaseTokenSource;
use serde::Deserialize;
use serde_json::{Map, Value};
use std::sync::Arc;
use std::time::Duration;

const DEFAULT_HTTP_TIMEOUT: Duration = Duration::from_secs(10);
/// Admin credential accepted by the database emulator.
const EMULATOR_OWNER_TOKEN: &str = "owner";

/// Body of a successful `POST`.
#[derive(Deserialize)]
struct PushResponse {
    name: String,
}

#[derive(Clone)]
enum RestAuth {
    Google(Arc<DatabaseTokenSource>),
    Emulator { namespace: String },
}

/// Thin REST client for one database instance.
#[derive(Clone)]
pub struct RestClient {
    http: reqwest::Client,
    base_url: String,
    auth: RestAuth,
}

impl RestClient {
    /// Client for a hosted database, authenticated with Google credentials.
    pub fn new(
        database_url: &str,
        token_source: Arc<DatabaseTokenSource>,
    ) -> Result<Self, DbError> {
        Ok(Self {
            http: build_http_client()?,
            base_url: database_url.trim_end_matches('/').to_string(),
            auth: RestAuth::Google(token_source),
        })
    }

    /// Client for the local database emulator at `host` (e.g. `127.0.0.1:9000`).
    pub fn emulator(host: &str, namespace: &str) -> Result<Self, DbError> {
        Ok(Self {
            http: build_http_client()?,
            base_url: format!("http://{}", host.trim_end_matches('/')),
            auth: RestAuth::Emulator {
                namespace: namespace.to_string(),
            },
        })
    }

    pub async fn get(&self, path: &str) -> Result<Value, DbError> {
        let request = self.authorize(self.http.get(self.url(path))).await?;
        let response = request
            .send()
            .await
            .map_err(|e| DbError::Transport(e.to_string()))?;

        let response = check_response(response).await?;
        response
            .json()
            .await
            .map_err(|e| DbError::Decode(e.to_string()))
    }

    pub async fn update(&self, path: &str, fields: &Map<String, Value>) -> Result<(), DbError> {
        let request = self.authorize(self.http.patch(self.url(path))).await?;
        let response = request
            .json(fields)
            .send()
            .await
            .map_err(|e| DbError::Transport(e.to_string()))?;

        check_response(response).await?;
        Ok(())
    }

    /// Append `value` under `path` and return the generated key.
    pub async fn push(&self, path: &str, value: &Value) -> Result<String, DbError> {
        let request = self.authorize(self.http.post(self.url(path))).await?;
        let response = request
            .json(value)
            .send()
            .await
            .map_err(|e| DbError::Transport(e.to_string()))?;

        let response = check_response(response).await?;
        let pushed: PushResponse = response
            .json()
            .await
            .map_err(|e| DbError::Decode(e.to_string()))?;
        Ok(pushed.name)
    }

    pub async fn delete(&self, path: &str) -> Result<(), DbError> {
        let request = self.authorize(self.http.delete(self.url(path))).await?;
        let response = request
            .send()
            .await
            .map_err(|e| DbError::Transport(e.to_string()))?;

        check_response(response).await?;
        Ok(())
    }

    fn url(&self, path: &str) -> String {
        let encoded: Vec<String> = segments(path)
            .map(|seg| urlencoding::encode(seg).into_owned())
            .collect();
        format!("{}/{}.json", self.base_url, encoded.join("/"))
    }

    async fn authorize(
        &self,
        request: reqwest::RequestBuilder,
    ) -> Result<reqwest::RequestBuilder, DbError> {
        match &self.auth {
            RestAuth::Google(source) => {
                let token = source
                    .access_token()
                    .await
                    .map_err(|e| DbError::Auth(format!("{e:#}")))?;
                Ok(request.bearer_auth(token))
            }
            RestAuth::Emulator { namespace } => Ok(request
                .bearer_auth(EMULATOR_OWNER_TOKEN)
                .query(&[("ns", namespace.as_str())])),
        }
    }
}

fn build_http_client() -> Result<reqwest::Client, DbError> {
    reqwest::Client::builder()
        .timeout(DEFAULT_HTTP_TIMEOUT)
        .build()
        .map_err(|e| DbError::Transport(format!("failed building HTTP client: {e}")))
}

/// Turn a non-success response into a `DbError::Status`.
///
/// The database reports failures as `{"error": "..."}`.
async fn check_response(response: reqwest::Response) -> Result<reqwest::Response, DbError> {
    if response.status().is_success() {
        return Ok(response);
    }

    let status = response.status().as_u16();
    let body = response.text().await.unwrap_or_default();
    let message = serde_json::from_str::<Value>(&body)
        .ok()
        .and_then(|v| v.get("error").and_then(Value::as_str).map(str::to_string))
        .unwrap_or(body);

    Err(DbError::Status { status, message })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn url_encodes_segments() {
        let client = RestClient::emulator("127.0.0.1:9000", "farm").unwrap();
        assert_eq!(
            client.url("chats/u 1/m1"),
            "http://127.0.0.1:9000/chats/u%201/m1.json"
        );
        assert_eq!(
            client.url("current_weather"),
            "http://127.0.0.1:9000/current_weather.json"
        );
    }
}
