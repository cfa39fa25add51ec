//! Store error types.

use std::path::PathBuf;

use thiserror::Error;

/// Errors from registry persistence.
///
/// All of these are fatal to the session: a corrupt store file means the
/// persisted state cannot be trusted, and a failed save means durability was
/// lost. Command-level failures never surface here.
#[derive(Debug, Error)]
pub enum StoreError {
    /// Reading or writing the store file failed.
    #[error("store I/O failed: {0}")]
    Io(#[from] std::io::Error),

    /// The store file exists but is not a JSON object of records.
    #[error("store file '{path}' is corrupt: {source}")]
    Corrupt {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    /// A stored record is structurally broken (missing fields, bad
    /// timestamps). Unknown class tags are skipped instead, not fatal.
    #[error("store record '{key}' is invalid: {source}")]
    BadRecord {
        key: String,
        #[source]
        source: roost_core::entity::RecordError,
    },

    /// Serializing the registry for save failed.
    #[error("failed to serialize registry: {0}")]
    Serialize(#[source] serde_json::Error),
}
