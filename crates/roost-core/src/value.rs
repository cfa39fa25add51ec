//! Literal coercion for attribute values typed at the prompt.

use serde_json::Value;

/// Interpret raw command text as a JSON literal where possible.
///
/// `17` becomes an integer, `2.5` a float, `true`/`false`/`null` their
/// structured forms, and `[..]`/`{..}` arrays and objects. Anything that
/// fails to parse stays a plain string, so free text is never rejected.
#[must_use]
pub fn coerce_literal(raw: &str) -> Value {
    serde_json::from_str(raw).unwrap_or_else(|_| Value::String(raw.to_string()))
}
