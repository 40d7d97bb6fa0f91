// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

use axum::body::Body;
use axum::http::{header, Request, StatusCode};
use farmhand_relay::config::Config;
use farmhand_relay::db::{MemoryTree, RealtimeDb};
use farmhand_relay::routes::create_router;
use farmhand_relay::services::FirebaseTokenVerifier;
use farmhand_relay::AppState;
use jsonwebtoken::{encode, Algorithm, DecodingKey, EncodingKey, Header};
use serde_json::{json, Value};
use std::sync::Arc;
use std::time::{SystemTime, UNIX_EPOCH};
use tower::ServiceExt;

/// Key id the static test verifier accepts.
#[allow(dead_code)]
pub const TEST_KID: &str = "test-key-1";

const PRIVATE_KEY_PEM: &str = include_str!("../fixtures/test_rsa_private.pem");
const PUBLIC_KEY_PEM: &str = include_str!("../fixtures/test_rsa_public.pem");

#[allow(dead_code)]
pub fn now_secs() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap()
        .as_secs()
}

/// Create a test app backed by an in-memory tree seeded with `data`.
/// Returns the router, the shared state and a handle on the tree.
#[allow(dead_code)]
pub fn create_test_app_with(data: Value) -> (axum::Router, Arc<AppState>, MemoryTree) {
    let config = Config::test_default();
    let tree = MemoryTree::with_data(data);
    let db = RealtimeDb::in_memory(tree.clone());

    let decoding_key = DecodingKey::from_rsa_pem(PUBLIC_KEY_PEM.as_bytes())
        .expect("Invalid test public key");
    let token_verifier = Arc::new(
        FirebaseTokenVerifier::new_with_static_key(&config, TEST_KID, decoding_key)
            .expect("Failed to build static verifier"),
    );

    let state = Arc::new(AppState {
        config,
        db,
        token_verifier,
    });

    (create_router(state.clone()), state, tree)
}

/// Create a test app with an empty database.
#[allow(dead_code)]
pub fn create_test_app() -> (axum::Router, Arc<AppState>, MemoryTree) {
    create_test_app_with(Value::Null)
}

/// Claims of a valid ID token for `uid` in the test project.
#[allow(dead_code)]
pub fn id_token_claims(uid: &str) -> Value {
    let now = now_secs();
    let project = Config::test_default().firebase_project_id;
    json!({
        "iss": format!("https://securetoken.google.com/{project}"),
        "aud": project,
        "sub": uid,
        "user_id": uid,
        "iat": now,
        "auth_time": now,
        "exp": now + 3600,
    })
}

/// Sign arbitrary claims with the test key under `kid`.
#[allow(dead_code)]
pub fn sign_claims(claims: &Value, kid: &str) -> String {
    let mut header = Header::new(Algorithm::RS256);
    header.kid = Some(kid.to_string());
    encode(
        &header,
        claims,
        &EncodingKey::from_rsa_pem(PRIVATE_KEY_PEM.as_bytes()).expect("Invalid test private key"),
    )
    .expect("Failed to sign test token")
}

/// A valid ID token for `uid`.
#[allow(dead_code)]
pub fn create_test_id_token(uid: &str) -> String {
    sign_claims(&id_token_claims(uid), TEST_KID)
}

/// Build a request, optionally with a bearer token and JSON body.
#[allow(dead_code)]
pub fn request(method: &str, uri: &str, token: Option<&str>, body: Option<Value>) -> Request<Body> {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(token) = token {
        builder = builder.header(header::AUTHORIZATION, format!("Bearer {token}"));
    }
    match body {
        Some(body) => builder
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    }
}

/// Send a request and decode the JSON response (`null` for an empty body).
#[allow(dead_code)]
pub async fn send(app: axum::Router, request: Request<Body>) -> (StatusCode, Value) {
    let response = app.oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let body = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };
    (status, body)
}
