// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Realtime Database handle with typed operations.
//!
//! Provides high-level operations for:
//! - Users (profile lookup and presence)
//! - Chats (message scans, multi-path status updates, edits, deletes)
//! - Global batches (active batch scan)
//! - Current weather (admin-written snapshot)

use super::memory::MemoryTree;
use super::rest::RestClient;
use super::{chat_path, message_path, nodes, user_path, validate_key, DbError};
use crate::models::{ChatMessage, UserProfile, UserStatus};
use crate::services::DatabaseTokenSource;
use serde_json::{Map, Value};
use std::sync::Arc;

#[derive(Clone)]
enum Backend {
    Rest(RestClient),
    Memory(MemoryTree),
}

/// Realtime Database client.
#[derive(Clone)]
pub struct RealtimeDb {
    backend: Backend,
}

impl RealtimeDb {
    /// Connect to a hosted database.
    ///
    /// For local development with the emulator, set
    /// FIREBASE_DATABASE_EMULATOR_HOST; no credentials are needed then.
    pub fn new(
        database_url: &str,
        token_source: Option<Arc<DatabaseTokenSource>>,
    ) -> Result<Self, DbError> {
        if let Ok(host) = std::env::var("FIREBASE_DATABASE_EMULATOR_HOST") {
            let namespace = namespace_from_url(database_url);
            tracing::info!(host = %host, namespace = %namespace, "Using Realtime Database emulator");
            return Ok(Self {
                backend: Backend::Rest(RestClient::emulator(&host, &namespace)?),
            });
        }

        let token_source = token_source.ok_or_else(|| {
            DbError::Auth("Google credentials are required".to_string())
        })?;

        tracing::info!(url = database_url, "Using Realtime Database");

        Ok(Self {
            backend: Backend::Rest(RestClient::new(database_url, token_source)?),
        })
    }

    /// In-process database, for tests and credential-less local runs.
    pub fn in_memory(tree: MemoryTree) -> Self {
        Self {
            backend: Backend::Memory(tree),
        }
    }

    // ─── Raw Tree Operations ─────────────────────────────────────

    /// Read the node at `path`. Absent nodes read as `null`.
    pub async fn get(&self, path: &str) -> Result<Value, DbError> {
        match &self.backend {
            Backend::Rest(client) => client.get(path).await,
            Backend::Memory(tree) => Ok(tree.get(path).await),
        }
    }

    /// Multi-path update relative to `path`. Missing nodes are created.
    pub async fn update(&self, path: &str, fields: Map<String, Value>) -> Result<(), DbError> {
        match &self.backend {
            Backend::Rest(client) => client.update(path, &fields).await,
            Backend::Memory(tree) => {
                tree.update(path, fields).await;
                Ok(())
            }
        }
    }

    /// Append `value` under `path` with a generated key and return the key.
    pub async fn push(&self, path: &str, value: Value) -> Result<String, DbError> {
        match &self.backend {
            Backend::Rest(client) => client.push(path, &value).await,
            Backend::Memory(tree) => Ok(tree.push(path, value).await),
        }
    }

    /// Remove the node at `path`. Removing an absent node succeeds.
    pub async fn delete(&self, path: &str) -> Result<(), DbError> {
        match &self.backend {
            Backend::Rest(client) => client.delete(path).await,
            Backend::Memory(tree) => {
                tree.delete(path).await;
                Ok(())
            }
        }
    }

    // ─── User Operations ─────────────────────────────────────────

    /// Get a user's profile, if provisioned.
    pub async fn get_user_profile(&self, uid: &str) -> Result<Option<UserProfile>, DbError> {
        validate_key(uid)?;
        match self.get(&user_path(uid)).await? {
            Value::Null => Ok(None),
            Value::Object(fields) => Ok(Some(UserProfile::from(fields))),
            _ => Err(DbError::Decode(format!("profile {uid} is not an object"))),
        }
    }

    /// Set the presence flag on a user's profile.
    pub async fn set_user_status(&self, uid: &str, status: UserStatus) -> Result<(), DbError> {
        validate_key(uid)?;
        let mut fields = Map::new();
        fields.insert("status".to_string(), Value::from(status.as_str()));
        self.update(&user_path(uid), fields).await
    }

    // ─── Chat Operations ─────────────────────────────────────────

    /// All messages in a user's chat, in store order.
    ///
    /// Entries that are not message objects are skipped.
    pub async fn get_chat_messages(&self, uid: &str) -> Result<Vec<(String, ChatMessage)>, DbError> {
        validate_key(uid)?;
        let Value::Object(entries) = self.get(&chat_path(uid)).await? else {
            return Ok(Vec::new());
        };

        let mut messages = Vec::with_capacity(entries.len());
        for (id, value) in entries {
            match serde_json::from_value::<ChatMessage>(value) {
                Ok(message) => messages.push((id, message)),
                Err(e) => {
                    tracing::warn!(uid, message_id = %id, error = %e, "Skipping malformed chat message");
                }
            }
        }
        Ok(messages)
    }

    /// Apply a multi-path update under a user's chat subtree.
    ///
    /// An empty update is not sent.
    pub async fn update_chat_fields(
        &self,
        uid: &str,
        updates: Map<String, Value>,
    ) -> Result<(), DbError> {
        validate_key(uid)?;
        if updates.is_empty() {
            return Ok(());
        }
        let count = updates.len();
        self.update(&chat_path(uid), updates).await?;
        tracing::debug!(uid, count, "Applied chat status updates");
        Ok(())
    }

    /// Append a new message to a user's chat and return its id.
    pub async fn send_message(
        &self,
        uid: &str,
        message: Map<String, Value>,
    ) -> Result<String, DbError> {
        validate_key(uid)?;
        self.push(&chat_path(uid), Value::Object(message)).await
    }

    /// Upsert edit fields on a single message.
    pub async fn edit_message(
        &self,
        uid: &str,
        message_id: &str,
        fields: Map<String, Value>,
    ) -> Result<(), DbError> {
        validate_key(uid)?;
        validate_key(message_id)?;
        self.update(&message_path(uid, message_id), fields).await
    }

    /// Delete a single message.
    pub async fn delete_message(&self, uid: &str, message_id: &str) -> Result<(), DbError> {
        validate_key(uid)?;
        validate_key(message_id)?;
        self.delete(&message_path(uid, message_id)).await
    }

    // ─── Global Operations ───────────────────────────────────────

    /// All global batches as `(id, record)` pairs, in store order.
    pub async fn list_global_batches(&self) -> Result<Vec<(String, Value)>, DbError> {
        match self.get(nodes::GLOBAL_BATCHES).await? {
            Value::Object(entries) => Ok(entries.into_iter().collect()),
            _ => Ok(Vec::new()),
        }
    }

    /// The admin-written weather snapshot, if any.
    pub async fn get_current_weather(&self) -> Result<Option<Value>, DbError> {
        match self.get(nodes::CURRENT_WEATHER).await? {
            Value::Null => Ok(None),
            value => Ok(Some(value)),
        }
    }
}

/// Emulator namespace: the first host label of the database URL.
fn namespace_from_url(database_url: &str) -> String {
    let host = database_url
        .split("://")
        .nth(1)
        .unwrap_or(database_url)
        .split(['/', ':'])
        .next()
        .unwrap_or_default();
    host.split('.').next().unwrap_or(host).to_string()
}
