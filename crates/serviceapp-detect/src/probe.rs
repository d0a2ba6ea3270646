//! Version extraction from a player's JSON banner.

use serde_json::{Map, Value};

use crate::error::DetectError;

/// First line of `output` that parses as a JSON object.
///
/// Lines that are not JSON, or are JSON but not an object, are skipped.
pub fn first_json_object(output: &str) -> Option<Map<String, Value>> {
    output.lines().find_map(|line| {
        let line = line.trim();
        if !line.starts_with('{') {
            return None;
        }
        match serde_json::from_str::<Value>(line) {
            Ok(Value::Object(map)) => Some(map),
            _ => None,
        }
    })
}

/// Follow a dotted key path (`A.b.c`) through nested objects.
fn lookup<'a>(object: &'a Map<String, Value>, key_path: &str) -> Option<&'a Value> {
    let mut parts = key_path.split('.');
    let mut current = object.get(parts.next()?)?;
    for part in parts {
        current = current.as_object()?.get(part)?;
    }
    Some(current)
}

/// Extract the version at `key_path` from the first JSON object in `output`.
///
/// Only the first object found is consulted. String values are returned
/// verbatim; numeric values use their JSON text.
pub fn extract_version(output: &str, key_path: &str) -> Result<String, DetectError> {
    let object = first_json_object(output).ok_or(DetectError::NoJson)?;
    match lookup(&object, key_path) {
        Some(Value::String(s)) => Ok(s.clone()),
        Some(Value::Number(n)) => Ok(n.to_string()),
        _ => Err(DetectError::MissingKey(key_path.to_string())),
    }
}
