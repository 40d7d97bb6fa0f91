// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Global batches stored at `global_batches/{batchId}`.

use serde_json::{Map, Value};

/// Status value marking the batch currently in progress.
pub const ACTIVE_STATUS: &str = "active";

/// Pick the active batch from `(id, record)` pairs in store order.
///
/// The first record whose `status` is `"active"` wins. The returned record
/// is the stored one with its key added as `"id"`. Non-object records are
/// ignored.
pub fn select_active_batch<I>(batches: I) -> Option<Map<String, Value>>
where
    I: IntoIterator<Item = (String, Value)>,
{
    batches.into_iter().find_map(|(id, record)| match record {
        Value::Object(mut fields)
            if fields.get("status").and_then(Value::as_str) == Some(ACTIVE_STATUS) =>
        {
            fields.insert("id".to_string(), Value::String(id));
            Some(fields)
        }
        _ => None,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn batches(entries: &[(&str, Value)]) -> Vec<(String, Value)> {
        entries
            .iter()
            .map(|(id, v)| (id.to_string(), v.clone()))
            .collect()
    }

    #[test]
    fn none_when_nothing_active() {
        let input = batches(&[
            ("b1", json!({ "status": "completed" })),
            ("b2", json!({ "status": "planned" })),
        ]);
        assert!(select_active_batch(input).is_none());
        assert!(select_active_batch(Vec::new()).is_none());
    }

    #[test]
    fn merges_key_as_id() {
        let input = batches(&[
            ("b1", json!({ "status": "completed" })),
            ("b2", json!({ "status": "active", "batchName": "Broilers", "totalDays": 30 })),
        ]);
        let active = select_active_batch(input).unwrap();
        assert_eq!(
            Value::Object(active),
            json!({ "status": "active", "batchName": "Broilers", "totalDays": 30, "id": "b2" })
        );
    }

    #[test]
    fn first_active_in_iteration_order_wins() {
        let input = batches(&[
            ("zz", json!({ "status": "active", "batchName": "first" })),
            ("aa", json!({ "status": "active", "batchName": "second" })),
        ]);
        let active = select_active_batch(input.clone()).unwrap();
        assert_eq!(active["id"], "zz");

        let reversed: Vec<_> = input.into_iter().rev().collect();
        assert_eq!(select_active_batch(reversed).unwrap()["id"], "aa");
    }

    #[test]
    fn skips_malformed_records() {
        let input = batches(&[
            ("junk", json!("active")),
            ("b1", json!({ "status": "active" })),
        ]);
        assert_eq!(select_active_batch(input).unwrap()["id"], "b1");
    }
}
