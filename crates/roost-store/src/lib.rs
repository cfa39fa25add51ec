//! # roost-store
//!
//! `FileRegistry`: the in-memory record registry with load/save against a
//! single JSON store file.
//!
//! The store file is one JSON object keyed by `"<Kind>.<id>"`; each value is
//! the record's flattened form (`__class__`, `id`, timestamps, attributes at
//! the same level). The registry is the only durable state in the system;
//! everything above it is a stateless transformation.
//!
//! Saves are all-or-nothing: the registry serializes into a temp file in the
//! store's directory and renames it over the target, so a failed save leaves
//! the prior file untouched.

mod error;

use std::collections::BTreeMap;
use std::io::Write;
use std::path::{Path, PathBuf};

use serde_json::Value;
use tracing::{debug, warn};

use roost_core::entity::RecordError;
use roost_core::Entity;

pub use error::StoreError;

/// In-memory registry of every record, keyed `"<Kind>.<id>"`.
///
/// Constructed empty; `reload()` populates it from the store file at process
/// start. Single-threaded by design — no internal locking, one operation at
/// a time (callers wanting concurrent submission must wrap the whole
/// registry in one lock).
#[derive(Debug)]
pub struct FileRegistry {
    path: PathBuf,
    entities: BTreeMap<String, Entity>,
}

impl FileRegistry {
    /// Create an empty registry backed by the store file at `path`.
    ///
    /// Nothing is read until [`reload`](Self::reload).
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            entities: BTreeMap::new(),
        }
    }

    /// Path of the backing store file.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// The live registry map. Iteration order is key order, deterministic
    /// across save/reload.
    #[must_use]
    pub const fn all(&self) -> &BTreeMap<String, Entity> {
        &self.entities
    }

    /// Look up a record by its storage key.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&Entity> {
        self.entities.get(key)
    }

    /// Mutable lookup; the registry does not defensively copy.
    pub fn get_mut(&mut self, key: &str) -> Option<&mut Entity> {
        self.entities.get_mut(key)
    }

    /// Whether a record exists at `key`.
    #[must_use]
    pub fn contains(&self, key: &str) -> bool {
        self.entities.contains_key(key)
    }

    /// Insert or overwrite the entry at the entity's own storage key.
    pub fn put(&mut self, entity: Entity) {
        self.entities.insert(entity.storage_key(), entity);
    }

    /// Remove the entry at `key` if present.
    ///
    /// Absent keys are a no-op — existence checks (and the resulting
    /// "no instance found" report) belong to the caller.
    pub fn delete(&mut self, key: &str) {
        self.entities.remove(key);
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entities.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entities.is_empty()
    }

    /// Number of records whose class tag equals `tag`.
    ///
    /// Tags outside the enumerated set simply count zero.
    #[must_use]
    pub fn count_kind(&self, tag: &str) -> usize {
        self.entities
            .values()
            .filter(|entity| entity.kind().as_str() == tag)
            .count()
    }

    /// Serialize every record to the store file.
    ///
    /// Writes through a temp file in the store's directory and renames it
    /// over the target, so either the whole save lands or the prior file
    /// stays intact.
    ///
    /// # Errors
    ///
    /// `StoreError::Io` on write/rename failure, `StoreError::Serialize` if
    /// the registry cannot be rendered as JSON.
    pub fn save(&self) -> Result<(), StoreError> {
        let mut root = serde_json::Map::new();
        for (key, entity) in &self.entities {
            root.insert(key.clone(), Value::Object(entity.to_record()));
        }
        let body = serde_json::to_vec(&Value::Object(root)).map_err(StoreError::Serialize)?;

        let dir = match self.path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent,
            _ => Path::new("."),
        };
        let mut tmp = tempfile::NamedTempFile::new_in(dir)?;
        tmp.write_all(&body)?;
        tmp.flush()?;
        tmp.persist(&self.path).map_err(|error| error.error)?;

        debug!(records = self.entities.len(), path = %self.path.display(), "store saved");
        Ok(())
    }

    /// Replace the in-memory contents with the store file's records.
    ///
    /// A missing or empty file leaves the registry empty — a fresh store is
    /// not an error. Records carrying a class tag outside the enumerated set
    /// are skipped with a warning.
    ///
    /// # Errors
    ///
    /// `StoreError::Corrupt` if the file is not a JSON object of objects,
    /// `StoreError::BadRecord` if a record is structurally broken — both
    /// indicate corrupt persisted state and are fatal to the caller.
    pub fn reload(&mut self) -> Result<(), StoreError> {
        if !self.path.exists() {
            debug!(path = %self.path.display(), "no store file, registry stays empty");
            return Ok(());
        }

        let raw = std::fs::read_to_string(&self.path)?;
        if raw.trim().is_empty() {
            self.entities.clear();
            return Ok(());
        }

        let records: BTreeMap<String, serde_json::Map<String, Value>> =
            serde_json::from_str(&raw).map_err(|source| StoreError::Corrupt {
                path: self.path.clone(),
                source,
            })?;

        let mut entities = BTreeMap::new();
        for (key, record) in records {
            match Entity::from_record(&record) {
                Ok(entity) => {
                    entities.insert(entity.storage_key(), entity);
                }
                Err(RecordError::UnknownKind(tag)) => {
                    warn!(%key, %tag, "skipping record with unknown class tag");
                }
                Err(source) => return Err(StoreError::BadRecord { key, source }),
            }
        }

        debug!(records = entities.len(), path = %self.path.display(), "store reloaded");
        self.entities = entities;
        Ok(())
    }
}
