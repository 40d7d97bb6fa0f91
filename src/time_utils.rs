// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Shared helpers for timestamps.

use chrono::Utc;

/// Current time as Unix epoch milliseconds.
pub fn now_epoch_millis() -> i64 {
    Utc::now().timestamp_millis()
}

/// Current time as Unix epoch seconds.
pub fn now_unix_secs() -> u64 {
    Utc::now().timestamp().max(0) as u64
}
