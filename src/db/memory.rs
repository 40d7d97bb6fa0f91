// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! In-process JSON tree with Realtime Database write semantics.
//!
//! Used for tests and for running locally without credentials. Children keep
//! insertion order, so scans over a node are deterministic.

use super::segments;
use crate::time_utils::now_epoch_millis;
use serde_json::{Map, Value};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use tokio::sync::RwLock;

/// Alphabet of generated child keys, in ascending ASCII order.
const PUSH_CHARS: &[u8; 64] = b"-0123456789ABCDEFGHIJKLMNOPQRSTUVWXYZ_abcdefghijklmnopqrstuvwxyz";

/// Shared in-memory document tree.
#[derive(Clone, Default)]
pub struct MemoryTree {
    root: Arc<RwLock<Value>>,
    push_seq: Arc<AtomicU64>,
}

impl MemoryTree {
    /// Create an empty tree.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a tree seeded with `data` at the root.
    pub fn with_data(mut data: Value) -> Self {
        normalize(&mut data);
        Self {
            root: Arc::new(RwLock::new(data)),
            push_seq: Arc::default(),
        }
    }

    /// Read the value at `path`. Absent paths read as `null`.
    pub async fn get(&self, path: &str) -> Value {
        let root = self.root.read().await;
        let mut node = &*root;
        for seg in segments(path) {
            match node.get(seg) {
                Some(child) => node = child,
                None => return Value::Null,
            }
        }
        node.clone()
    }

    /// Multi-path update relative to `path`.
    ///
    /// Each key may itself contain slashes. A `null` value deletes the child;
    /// any other value replaces it wholesale.
    pub async fn update(&self, path: &str, fields: Map<String, Value>) {
        let mut root = self.root.write().await;
        for (key, mut value) in fields {
            let full: Vec<&str> = segments(path).chain(segments(&key)).collect();
            normalize(&mut value);
            if value.is_null() {
                remove_at(&mut root, &full);
            } else {
                set_at(&mut root, &full, value);
            }
        }
        normalize(&mut root);
    }

    /// Append `value` under `path` with a generated key and return the key.
    ///
    /// Keys sort in creation order, like the database's push ids.
    pub async fn push(&self, path: &str, mut value: Value) -> String {
        let seq = self.push_seq.fetch_add(1, Ordering::Relaxed);
        let key = push_key(now_epoch_millis().max(0) as u64, seq);

        let mut root = self.root.write().await;
        let full: Vec<&str> = segments(path).chain([key.as_str()]).collect();
        normalize(&mut value);
        if !value.is_null() {
            set_at(&mut root, &full, value);
        }
        key
    }

    /// Remove the node at `path`. Removing an absent node is a no-op.
    pub async fn delete(&self, path: &str) {
        let mut root = self.root.write().await;
        let full: Vec<&str> = segments(path).collect();
        remove_at(&mut root, &full);
        normalize(&mut root);
    }
}

/// 8 characters of timestamp followed by 12 of sequence number.
fn push_key(millis: u64, seq: u64) -> String {
    let mut chars = [0u8; 20];
    let (time, tail) = chars.split_at_mut(8);
    encode_push_chars(millis, time);
    encode_push_chars(seq, tail);
    chars.iter().map(|&c| c as char).collect()
}

fn encode_push_chars(mut n: u64, out: &mut [u8]) {
    for slot in out.iter_mut().rev() {
        *slot = PUSH_CHARS[(n % 64) as usize];
        n /= 64;
    }
}

fn set_at(node: &mut Value, path: &[&str], value: Value) {
    let Some((first, rest)) = path.split_first() else {
        *node = value;
        return;
    };

    if !node.is_object() {
        *node = Value::Object(Map::new());
    }
    if let Value::Object(children) = node {
        let child = children
            .entry((*first).to_string())
            .or_insert(Value::Null);
        set_at(child, rest, value);
    }
}

fn remove_at(node: &mut Value, path: &[&str]) {
    let Some((first, rest)) = path.split_first() else {
        *node = Value::Null;
        return;
    };

    if let Value::Object(children) = node {
        if rest.is_empty() {
            children.shift_remove(*first);
        } else if let Some(child) = children.get_mut(*first) {
            remove_at(child, rest);
        }
    }
}

/// Drop nulls and empty objects, the way the database never stores them.
/// Returns true if the node itself ended up empty.
fn normalize(node: &mut Value) -> bool {
    if let Value::Object(children) = node {
        children.retain(|_, child| !normalize(child));
        if children.is_empty() {
            *node = Value::Null;
        }
    }
    node.is_null()
}
