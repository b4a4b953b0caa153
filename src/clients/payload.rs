//! Header and payload merging.
//!
//! Both merges use caller-wins precedence: the client's defaults are laid
//! down first and every caller-supplied field replaces a default of the same
//! name.
//!
//! # Token Override
//!
//! The authentication payload `{"access_token": token}` is a default like any
//! other, so a caller payload that carries its own `access_token` replaces
//! the stored one. This is kept on purpose for compatibility with the
//! original client and is reported with a warning by the dispatcher.

use std::collections::BTreeMap;

use serde_json::{Map, Value};

/// Payload key carrying the access token.
pub const ACCESS_TOKEN_KEY: &str = "access_token";

/// Merges caller header overrides on top of the client defaults.
///
/// Header names compare case-insensitively, so an override of `user-agent`
/// replaces a default `User-Agent`. The caller's spelling is kept.
///
/// Overrides must already be validated as string values; non-string values
/// are skipped.
#[must_use]
pub fn merge_headers(
    defaults: &BTreeMap<String, String>,
    overrides: &Map<String, Value>,
) -> BTreeMap<String, String> {
    let mut merged = defaults.clone();

    for (name, value) in overrides {
        let Some(value) = value.as_str() else {
            continue;
        };
        merged.retain(|existing, _| !existing.eq_ignore_ascii_case(name));
        merged.insert(name.clone(), value.to_string());
    }

    merged
}

/// Merges caller payload fields on top of the stored defaults.
#[must_use]
pub fn merge_payload(defaults: &Map<String, Value>, overrides: &Map<String, Value>) -> Map<String, Value> {
    let mut merged = defaults.clone();
    for (key, value) in overrides {
        merged.insert(key.clone(), value.clone());
    }
    merged
}

/// Flattens a payload into query-string pairs.
///
/// Strings are sent verbatim, numbers and booleans in their JSON spelling,
/// arrays as one pair per element, and nested objects as JSON text. `null`
/// fields are omitted.
#[must_use]
pub fn query_pairs(payload: &Map<String, Value>) -> Vec<(String, String)> {
    let mut pairs = Vec::with_capacity(payload.len());

    for (key, value) in payload {
        match value {
            Value::Array(items) => {
                for item in items {
                    if let Some(text) = scalar_text(item) {
                        pairs.push((key.clone(), text));
                    }
                }
            }
            other => {
                if let Some(text) = scalar_text(other) {
                    pairs.push((key.clone(), text));
                }
            }
        }
    }

    pairs
}

/// Returns a copy of the payload with the access token masked, for dumps.
#[must_use]
pub fn redact_token(payload: &Map<String, Value>) -> Map<String, Value> {
    let mut redacted = payload.clone();
    if let Some(token) = redacted.get_mut(ACCESS_TOKEN_KEY) {
        *token = Value::String("*****".to_string());
    }
    redacted
}

fn scalar_text(value: &Value) -> Option<String> {
    match value {
        Value::Null => None,
        Value::String(s) => Some(s.clone()),
        Value::Bool(_) | Value::Number(_) | Value::Array(_) | Value::Object(_) => {
            Some(value.to_string())
        }
    }
}
