//! Versioned payload envelope and schema upgrades
//!
//! Current payloads are `{"version": N, "data": ...}`. Bare JSON written before
//! envelopes existed reads as version 1 and is upgraded step by step.

use serde::Serialize;
use serde_json::{Map, Value};

use super::Bucket;
use crate::error::DecodeError;

/// Envelope version written by this build
pub const CURRENT_VERSION: u32 = 2;

const LEGACY_VERSION: u32 = 1;

#[derive(Serialize)]
struct Envelope<'a, T: ?Sized> {
    version: u32,
    data: &'a T,
}

/// Wrap `data` in a current-version envelope
pub fn seal<T: Serialize + ?Sized>(data: &T) -> serde_json::Result<String> {
    serde_json::to_string(&Envelope {
        version: CURRENT_VERSION,
        data,
    })
}

/// Parse a plaintext and bring its data up to [`CURRENT_VERSION`].
///
/// Returns the version found on disk alongside the upgraded data.
pub fn open(bucket: Bucket, plaintext: &str) -> Result<(u32, Value), DecodeError> {
    let (stored_version, mut data) = split(serde_json::from_str(plaintext)?)?;

    if stored_version > CURRENT_VERSION || stored_version < LEGACY_VERSION {
        return Err(DecodeError::UnsupportedVersion(stored_version));
    }

    for from in stored_version..CURRENT_VERSION {
        data = upgrade(bucket, from, data)?;
    }
    Ok((stored_version, data))
}

fn split(value: Value) -> Result<(u32, Value), DecodeError> {
    let Value::Object(mut map) = value else {
        return Ok((LEGACY_VERSION, value));
    };

    let is_envelope =
        map.len() == 2 && map.contains_key("data") && map.get("version").is_some_and(Value::is_u64);
    if !is_envelope {
        return Ok((LEGACY_VERSION, Value::Object(map)));
    }

    let version = map
        .get("version")
        .and_then(Value::as_u64)
        .and_then(|v| u32::try_from(v).ok())
        .ok_or(DecodeError::UnsupportedVersion(u32::MAX))?;
    let data = map.remove("data").unwrap_or(Value::Null);
    Ok((version, data))
}

fn upgrade(bucket: Bucket, from: u32, data: Value) -> Result<Value, DecodeError> {
    match (bucket, from) {
        (Bucket::TaskProgress, 1) => progress_v1_to_v2(data),
        (Bucket::CustomTasks, 1) => custom_tasks_v1_to_v2(data),
        (Bucket::CharacterInfo, 1) => Ok(data),
        (_, other) => Err(DecodeError::UnsupportedVersion(other)),
    }
}

/// `count` became `currentCount`; `lastCompleted` is no longer tracked
fn progress_v1_to_v2(data: Value) -> Result<Value, DecodeError> {
    let mut tasks = into_object(data, "task progress")?;
    for state in tasks.values_mut() {
        let Value::Object(state) = state else {
            continue;
        };
        if let Some(count) = state.remove("count") {
            state.entry("currentCount").or_insert(count);
        }
        state.remove("lastCompleted");
    }
    Ok(Value::Object(tasks))
}

/// Custom task lists gained a `daily` cadence next to `weekly`
fn custom_tasks_v1_to_v2(data: Value) -> Result<Value, DecodeError> {
    let mut expansions = into_object(data, "custom tasks")?;
    for lists in expansions.values_mut() {
        let Value::Object(lists) = lists else {
            continue;
        };
        lists.entry("daily").or_insert_with(|| Value::Array(Vec::new()));
        lists.entry("weekly").or_insert_with(|| Value::Array(Vec::new()));
    }
    Ok(Value::Object(expansions))
}

fn into_object(data: Value, what: &str) -> Result<Map<String, Value>, DecodeError> {
    match data {
        Value::Object(map) => Ok(map),
        other => Err(DecodeError::Schema(format!(
            "{} must be an object, found {}",
            what,
            type_name(&other)
        ))),
    }
}

fn type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
