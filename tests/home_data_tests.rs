// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Home data endpoint tests against the in-memory database.

use axum::http::StatusCode;
use serde_json::{json, Value};

mod common;
use common::{create_test_app_with, create_test_id_token, request, send};

fn seeded() -> Value {
    json!({
        "users": {
            "u1": {
                "firstName": "Wanjiru",
                "lastName": "Kamau",
                "role": "user",
                "username": "wanjiru",
                "status": "offline",
                "profilePicture": "https://img.example/w.png"
            },
            "u2": { "firstName": "Other" }
        },
        "chats": {
            "u1": {
                "m1": { "sender": "admin", "status": "sent", "text": "Vaccinate today", "seen": false },
                "m2": { "sender": "admin", "status": "delivered", "text": "Feed check" },
                "m3": { "sender": "admin", "status": "seen", "text": "Old", "seen": true },
                "m4": { "sender": "user", "status": "sent", "text": "Ok" }
            },
            "u2": {
                "x1": { "sender": "admin", "status": "sent", "text": "not yours" }
            }
        },
        "global_batches": {
            "b1": { "status": "completed", "batchName": "March" },
            "b2": { "status": "active", "batchName": "April", "totalDays": 30 },
            "b3": { "status": "active", "batchName": "May" }
        }
    })
}

async fn home(app: axum::Router, uid: &str) -> (StatusCode, Value) {
    let token = create_test_id_token(uid);
    send(app, request("GET", "/user-home-data", Some(&token), None)).await
}

#[tokio::test]
async fn test_missing_profile_is_forbidden() {
    let (app, _, tree) = create_test_app_with(seeded());

    let (status, _) = home(app, "ghost").await;

    assert_eq!(status, StatusCode::FORBIDDEN);
    assert_eq!(tree.get("users/ghost").await, Value::Null);
}

#[tokio::test]
async fn test_profile_projection_and_active_batch() {
    let (app, _, _) = create_test_app_with(seeded());

    let (status, body) = home(app, "u1").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        body["profile"],
        json!({
            "firstName": "Wanjiru",
            "lastName": "Kamau",
            "fullName": "Wanjiru",
            "role": "user",
            "username": "wanjiru",
            "status": "online",
            "profilePicture": "https://img.example/w.png"
        })
    );
    assert_eq!(
        body["activeBatch"],
        json!({ "status": "active", "batchName": "April", "totalDays": 30, "id": "b2" })
    );
}

#[tokio::test]
async fn test_marks_user_online() {
    let (app, _, tree) = create_test_app_with(seeded());

    home(app, "u1").await;

    assert_eq!(tree.get("users/u1/status").await, json!("online"));
    assert_eq!(tree.get("users/u1/firstName").await, json!("Wanjiru"));
}

#[tokio::test]
async fn test_sent_admin_messages_become_delivered() {
    let (app, _, tree) = create_test_app_with(seeded());

    home(app, "u1").await;

    assert_eq!(tree.get("chats/u1/m1/status").await, json!("delivered"));
    assert_eq!(tree.get("chats/u1/m1/text").await, json!("Vaccinate today"));
    assert_eq!(tree.get("chats/u1/m2/status").await, json!("delivered"));
    assert_eq!(tree.get("chats/u1/m3/status").await, json!("seen"));
    // User-authored messages are not the recipient's to deliver.
    assert_eq!(tree.get("chats/u1/m4/status").await, json!("sent"));
    // Other users' chats are untouched.
    assert_eq!(tree.get("chats/u2/x1/status").await, json!("sent"));
}

#[tokio::test]
async fn test_defaults_with_sparse_profile_and_no_chats() {
    let (app, _, tree) = create_test_app_with(json!({
        "users": { "u3": { "status": "offline" } }
    }));

    let (status, body) = home(app, "u3").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        body["profile"],
        json!({
            "firstName": "Farmer",
            "lastName": "",
            "fullName": null,
            "role": "user",
            "username": null,
            "status": "online",
            "profilePicture": ""
        })
    );
    assert_eq!(body["activeBatch"], Value::Null);
    assert_eq!(tree.get("chats").await, Value::Null);
}

#[tokio::test]
async fn test_first_active_batch_is_stable() {
    let (app, _, _) = create_test_app_with(seeded());
    let (_, first) = home(app.clone(), "u1").await;
    let (_, second) = home(app, "u1").await;

    assert_eq!(first["activeBatch"]["id"], "b2");
    assert_eq!(second["activeBatch"]["id"], "b2");
}

#[tokio::test]
async fn test_non_string_profile_fields_pass_through() {
    let (app, _, tree) = create_test_app_with(json!({
        "users": { "u1": {
            "firstName": "Ada",
            "username": 254700123,
            "profilePicture": { "url": "https://img.example/a.png" },
            "status": "offline"
        } }
    }));

    let (status, body) = home(app, "u1").await;

    assert_eq!(status, StatusCode::OK);
    let profile = &body["profile"];
    assert_eq!(profile["username"], json!(254700123));
    assert_eq!(profile["profilePicture"], json!({ "url": "https://img.example/a.png" }));
    assert_eq!(profile["fullName"], "Ada");
    assert_eq!(profile["lastName"], "");
    assert_eq!(tree.get("users/u1/status").await, json!("online"));
}

#[tokio::test]
async fn test_malformed_profile_is_invalid_session() {
    let (app, _, _) = create_test_app_with(json!({
        "users": { "u1": "just a string" }
    }));

    let (status, body) = home(app, "u1").await;

    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["detail"], "Invalid Session");
}
