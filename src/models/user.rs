// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! User profile model for storage and API.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

const DEFAULT_FIRST_NAME: &str = "Farmer";
const DEFAULT_ROLE: &str = "user";

/// Presence flag stored on the profile.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UserStatus {
    Online,
    Offline,
}

impl UserStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            UserStatus::Online => "online",
            UserStatus::Offline => "offline",
        }
    }
}

/// User profile stored at `users/{uid}`.
///
/// Provisioned externally with no fixed schema, so fields are kept as the
/// raw stored values. The stored `status` is only ever written, never read
/// back.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct UserProfile {
    fields: Map<String, Value>,
}

impl UserProfile {
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.fields.get(key)
    }

    fn get_or(&self, key: &str, default: &str) -> Value {
        self.get(key)
            .cloned()
            .unwrap_or_else(|| Value::from(default))
    }
}

impl From<Map<String, Value>> for UserProfile {
    fn from(fields: Map<String, Value>) -> Self {
        Self { fields }
    }
}

/// Profile as returned by the home-data endpoint.
///
/// Stored values pass through whatever their type; defaults only fill in
/// absent keys.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HomeProfile {
    pub first_name: Value,
    pub last_name: Value,
    /// Falls back to the stored first name, which may itself be absent.
    pub full_name: Value,
    pub role: Value,
    pub username: Value,
    pub status: UserStatus,
    pub profile_picture: Value,
}

impl From<UserProfile> for HomeProfile {
    fn from(profile: UserProfile) -> Self {
        let full_name = profile
            .get("fullName")
            .or_else(|| profile.get("firstName"))
            .cloned()
            .unwrap_or(Value::Null);
        Self {
            first_name: profile.get_or("firstName", DEFAULT_FIRST_NAME),
            last_name: profile.get_or("lastName", ""),
            full_name,
            role: profile.get_or("role", DEFAULT_ROLE),
            username: profile.get("username").cloned().unwrap_or(Value::Null),
            // The caller just marked the user online.
            status: UserStatus::Online,
            profile_picture: profile.get_or("profilePicture", ""),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn profile(value: Value) -> UserProfile {
        match value {
            Value::Object(fields) => UserProfile::from(fields),
            _ => panic!("expected object"),
        }
    }

    #[test]
    fn empty_profile_gets_defaults() {
        let view = HomeProfile::from(UserProfile::default());
        assert_eq!(
            serde_json::to_value(view).unwrap(),
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
    }

    #[test]
    fn full_name_falls_back_to_first_name() {
        let view = HomeProfile::from(profile(json!({
            "firstName": "Ada",
            "role": "admin",
            "status": "offline"
        })));

        assert_eq!(view.full_name, json!("Ada"));
        assert_eq!(view.role, json!("admin"));
        assert_eq!(view.status, UserStatus::Online);
    }

    #[test]
    fn stored_full_name_wins() {
        let view = HomeProfile::from(profile(json!({
            "firstName": "Ada",
            "fullName": "Ada Lovelace",
            "username": "ada",
            "profilePicture": "https://img.example/ada.png"
        })));

        assert_eq!(view.full_name, json!("Ada Lovelace"));
        assert_eq!(view.username, json!("ada"));
        assert_eq!(view.profile_picture, json!("https://img.example/ada.png"));
    }

    #[test]
    fn non_string_values_pass_through() {
        let view = HomeProfile::from(profile(json!({
            "firstName": "Ada",
            "username": 254700123,
            "profilePicture": { "url": "https://img.example/ada.png", "w": 64 }
        })));

        assert_eq!(view.username, json!(254700123));
        assert_eq!(
            view.profile_picture,
            json!({ "url": "https://img.example/ada.png", "w": 64 })
        );
    }
}
