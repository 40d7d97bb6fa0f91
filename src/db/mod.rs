// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Database layer (Firebase Realtime Database).

pub mod memory;
pub mod realtime;
pub mod rest;

pub use memory::MemoryTree;
pub use realtime::RealtimeDb;
pub use rest::RestClient;

/// Top-level nodes of the document tree.
pub mod nodes {
    pub const USERS: &str = "users";
    pub const CHATS: &str = "chats";
    pub const GLOBAL_BATCHES: &str = "global_batches";
    pub const CURRENT_WEATHER: &str = "current_weather";
}

/// Longest key the Realtime Database accepts, in bytes.
const MAX_KEY_BYTES: usize = 768;

/// Errors from the document store.
#[derive(Debug, thiserror::Error)]
pub enum DbError {
    #[error("invalid path segment: {0:?}")]
    InvalidPath(String),

    #[error("database request failed: {0}")]
    Transport(String),

    #[error("database returned {status}: {message}")]
    Status { status: u16, message: String },

    #[error("failed to decode database response: {0}")]
    Decode(String),

    #[error("database authentication failed: {0}")]
    Auth(String),
}

/// Check that `key` can be used as a single path segment.
pub fn validate_key(key: &str) -> Result<(), DbError> {
    let invalid = key.is_empty()
        || key.len() > MAX_KEY_BYTES
        || key
            .chars()
            .any(|c| matches!(c, '/' | '.' | '#' | '$' | '[' | ']') || c.is_ascii_control());

    if invalid {
        return Err(DbError::InvalidPath(key.to_string()));
    }
    Ok(())
}

/// Split a slash-delimited path into its non-empty segments.
pub fn segments(path: &str) -> impl Iterator<Item = &str> {
    path.split('/').filter(|s| !s.is_empty())
}

/// Path of a user's profile document.
pub fn user_path(uid: &str) -> String {
    format!("{}/{}", nodes::USERS, uid)
}

/// Path of a user's chat subtree.
pub fn chat_path(uid: &str) -> String {
    format!("{}/{}", nodes::CHATS, uid)
}

/// Path of a single chat message.
pub fn message_path(uid: &str, message_id: &str) -> String {
    format!("{}/{}/{}", nodes::CHATS, uid, message_id)
}
