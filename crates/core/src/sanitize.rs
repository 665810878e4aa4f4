//! Redaction of secret settings before configuration is printed or logged.

use serde_json::{Map, Value};

/// Default redaction placeholder
pub const REDACTED: &str = "[REDACTED]";

/// Fragments of setting names that carry secrets (lowercase for comparison)
static SENSITIVE_KEYS: &[&str] = &[
    "password",
    "passwd",
    "secret",
    "token",
    "api_key",
    "private_key",
    "credential",
];

/// Check if a setting name indicates sensitive data.
pub fn is_sensitive_key(key: &str) -> bool {
    let key_lower = key.to_lowercase().replace('-', "_");
    SENSITIVE_KEYS
        .iter()
        .any(|sensitive| key_lower.contains(sensitive))
}

/// Copy of a configuration mapping with secret values replaced by
/// [`REDACTED`].
///
/// Unset (`null`) and empty secrets are left visible so a dump still shows
/// whether a secret was configured at all.
pub fn sanitize_map(map: &Map<String, Value>) -> Map<String, Value> {
    map.iter()
        .map(|(key, value)| {
            let redact = is_sensitive_key(key)
                && match value {
                    Value::Null => false,
                    Value::String(s) => !s.is_empty(),
                    _ => true,
                };
            let value = if redact {
                Value::String(REDACTED.to_string())
            } else {
                value.clone()
            };
            (key.clone(), value)
        })
        .collect()
}
