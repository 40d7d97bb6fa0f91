// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@kernel.org>

//! Data models for the application.

pub mod batch;
pub mod chat;
pub mod user;
pub mod weather;

pub use batch::select_active_batch;
pub use chat::{ChatMessage, MessageStatus, Sender};
pub use user::{HomeProfile, UserProfile, UserStatus};
