// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Weather snapshot stored at `current_weather`.

use serde_json::{json, Value};

/// Payload returned when no snapshot has been written yet.
pub fn default_weather() -> Value {
    json!({
        "temperature": "--",
        "weatherCode": 0,
        "unit": "°C"
    })
}

/// The stored snapshot verbatim, or the default when absent or empty.
pub fn weather_or_default(stored: Option<Value>) -> Value {
    stored
        .filter(|value| !is_empty_value(value))
        .unwrap_or_else(default_weather)
}

/// `false`, zero, and empty strings, arrays and objects carry no snapshot.
fn is_empty_value(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::Bool(b) => !b,
        Value::Number(n) => n.as_f64() == Some(0.0),
        Value::String(s) => s.is_empty(),
        Value::Array(a) => a.is_empty(),
        Value::Object(o) => o.is_empty(),
    }
}
