//! Store timestamp formatting.
//!
//! The store file records timestamps as `%Y-%m-%dT%H:%M:%S%.6f` — ISO-8601
//! shaped, microsecond precision, no zone suffix. Internally everything is
//! `DateTime<Utc>`; these helpers are the single crossing point between the
//! two representations.

use chrono::{DateTime, NaiveDateTime, Utc};

/// The store's timestamp shape, e.g. `2026-08-30T14:03:11.204817`.
pub const STORE_FORMAT: &str = "%Y-%m-%dT%H:%M:%S%.6f";

/// Render a timestamp in the store format.
#[must_use]
pub fn to_store(ts: DateTime<Utc>) -> String {
    ts.format(STORE_FORMAT).to_string()
}

/// Parse a store-format timestamp back into UTC.
///
/// # Errors
///
/// Returns the chrono parse error when `raw` does not match the store format.
pub fn from_store(raw: &str) -> Result<DateTime<Utc>, chrono::ParseError> {
    NaiveDateTime::parse_from_str(raw, STORE_FORMAT).map(|naive| naive.and_utc())
}
