//! The record type behind every console operation.
//!
//! An `Entity` is a class-tagged bag of attributes plus the bookkeeping the
//! store needs: a generated id and creation/update timestamps. Attribute
//! schemas are not enforced here; any name can be set at update time and the
//! value is whatever JSON literal the command layer coerced it to.

use std::collections::BTreeMap;
use std::fmt;

use chrono::{DateTime, SubsecRound, Utc};
use serde_json::Value;
use thiserror::Error;

use crate::ids;
use crate::kind::EntityKind;
use crate::timestamp;

/// Store-record field holding the class tag.
pub const CLASS_FIELD: &str = "__class__";

/// Attribute names that route to dedicated fields, never into the bag.
const PROTECTED: [&str; 4] = ["id", CLASS_FIELD, "created_at", "updated_at"];

/// A mutable typed record.
///
/// The `(kind, id)` pair is unique across the registry; `storage_key()` is
/// the sole lookup key. `id` and `kind` are immutable after construction.
#[derive(Debug, Clone, PartialEq)]
pub struct Entity {
    id: String,
    kind: EntityKind,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
    attributes: BTreeMap<String, Value>,
}

/// A store record that could not be reconstructed into an `Entity`.
#[derive(Debug, Error)]
pub enum RecordError {
    /// The record's `__class__` tag is outside the enumerated set.
    ///
    /// The registry skips these at reload rather than failing.
    #[error("unknown class tag '{0}'")]
    UnknownKind(String),

    /// A required field is absent or not a string.
    #[error("record field '{0}' missing or not a string")]
    MissingField(&'static str),

    /// A timestamp field does not match the store format.
    #[error("record field '{field}' is not a valid timestamp: {source}")]
    BadTimestamp {
        field: &'static str,
        #[source]
        source: chrono::ParseError,
    },
}

impl Entity {
    /// Construct a fresh record of `kind` with a generated id and current
    /// timestamps.
    #[must_use]
    pub fn new(kind: EntityKind) -> Self {
        let now = Utc::now().trunc_subsecs(6);
        Self {
            id: ids::new_id(),
            kind,
            created_at: now,
            updated_at: now,
            attributes: BTreeMap::new(),
        }
    }

    /// The registry lookup key for a `(kind, id)` pair.
    #[must_use]
    pub fn key_for(kind: EntityKind, id: &str) -> String {
        format!("{kind}.{id}")
    }

    /// This record's registry lookup key, `"<Kind>.<id>"`.
    #[must_use]
    pub fn storage_key(&self) -> String {
        Self::key_for(self.kind, &self.id)
    }

    #[must_use]
    pub fn id(&self) -> &str {
        &self.id
    }

    #[must_use]
    pub const fn kind(&self) -> EntityKind {
        self.kind
    }

    #[must_use]
    pub const fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    #[must_use]
    pub const fn updated_at(&self) -> DateTime<Utc> {
        self.updated_at
    }

    /// The open attribute bag.
    #[must_use]
    pub const fn attributes(&self) -> &BTreeMap<String, Value> {
        &self.attributes
    }

    /// Look up a single attribute.
    #[must_use]
    pub fn attribute(&self, name: &str) -> Option<&Value> {
        self.attributes.get(name)
    }

    /// Refresh `updated_at` to now.
    pub fn touch(&mut self) {
        self.updated_at = Utc::now().trunc_subsecs(6);
    }

    /// Set one attribute and refresh `updated_at`.
    ///
    /// The bookkeeping fields (`id`, `__class__`, `created_at`,
    /// `updated_at`) are not assignable through the bag; attempts are
    /// ignored and reported as `false`.
    pub fn set_attribute(&mut self, name: &str, value: Value) -> bool {
        if PROTECTED.contains(&name) {
            return false;
        }
        self.attributes.insert(name.to_string(), value);
        self.touch();
        true
    }

    /// Flatten into the store-record shape: `__class__`, `id`, timestamps,
    /// and every attribute at the same level.
    #[must_use]
    pub fn to_record(&self) -> serde_json::Map<String, Value> {
        let mut record = self.display_record();
        record.insert(
            CLASS_FIELD.to_string(),
            Value::String(self.kind.as_str().to_string()),
        );
        record
    }

    /// Reconstruct a record written by [`to_record`](Self::to_record).
    ///
    /// # Errors
    ///
    /// Returns `RecordError::UnknownKind` for class tags outside the set
    /// (callers skip these), and other variants for structurally broken
    /// records.
    pub fn from_record(record: &serde_json::Map<String, Value>) -> Result<Self, RecordError> {
        let class_tag = str_field(record, CLASS_FIELD)?;
        let kind: EntityKind = class_tag
            .parse()
            .map_err(|_| RecordError::UnknownKind(class_tag.to_string()))?;

        let id = str_field(record, "id")?.to_string();
        let created_at = timestamp_field(record, "created_at")?;
        let updated_at = timestamp_field(record, "updated_at")?;

        let attributes = record
            .iter()
            .filter(|(name, _)| !PROTECTED.contains(&name.as_str()))
            .map(|(name, value)| (name.clone(), value.clone()))
            .collect();

        Ok(Self {
            id,
            kind,
            created_at,
            updated_at,
            attributes,
        })
    }

    /// Record shape used by `Display`: everything but the class field.
    fn display_record(&self) -> serde_json::Map<String, Value> {
        let mut record = serde_json::Map::new();
        record.insert("id".to_string(), Value::String(self.id.clone()));
        record.insert(
            "created_at".to_string(),
            Value::String(timestamp::to_store(self.created_at)),
        );
        record.insert(
            "updated_at".to_string(),
            Value::String(timestamp::to_store(self.updated_at)),
        );
        for (name, value) in &self.attributes {
            record.insert(name.clone(), value.clone());
        }
        record
    }
}

fn str_field<'r>(
    record: &'r serde_json::Map<String, Value>,
    field: &'static str,
) -> Result<&'r str, RecordError> {
    record
        .get(field)
        .and_then(Value::as_str)
        .ok_or(RecordError::MissingField(field))
}

fn timestamp_field(
    record: &serde_json::Map<String, Value>,
    field: &'static str,
) -> Result<DateTime<Utc>, RecordError> {
    let raw = str_field(record, field)?;
    timestamp::from_store(raw).map_err(|source| RecordError::BadTimestamp { field, source })
}

impl fmt::Display for Entity {
    /// `[Kind] (id) {flattened-record-json}`.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "[{}] ({}) {}",
            self.kind,
            self.id,
            Value::Object(self.display_record())
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    #[test]
    fn new_entity_has_matching_timestamps_and_empty_bag() {
        let entity = Entity::new(EntityKind::State);
        assert_eq!(entity.created_at(), entity.updated_at());
        assert!(entity.attributes().is_empty());
        assert_eq!(
            entity.storage_key(),
            format!("State.{}", entity.id())
        );
    }

    #[test]
    fn set_attribute_touches_updated_at_only() {
        let mut entity = Entity::new(EntityKind::City);
        let created = entity.created_at();
        let before = entity.updated_at();

        assert!(entity.set_attribute("name", json!("Douala")));

        assert_eq!(entity.created_at(), created);
        assert!(entity.updated_at() >= before);
        assert_eq!(entity.attribute("name"), Some(&json!("Douala")));
    }

    #[test]
    fn bookkeeping_fields_are_not_assignable() {
        let mut entity = Entity::new(EntityKind::User);
        let id = entity.id().to_string();
        let updated = entity.updated_at();

        assert!(!entity.set_attribute("id", json!("hijacked")));
        assert!(!entity.set_attribute("__class__", json!("Review")));
        assert!(!entity.set_attribute("created_at", json!("1970-01-01T00:00:00.000000")));

        assert_eq!(entity.id(), id);
        assert_eq!(entity.kind(), EntityKind::User);
        assert_eq!(entity.updated_at(), updated);
        assert!(entity.attributes().is_empty());
    }

    #[test]
    fn record_round_trip_is_lossless() {
        let mut entity = Entity::new(EntityKind::Place);
        entity.set_attribute("name", json!("Tide Mill Loft"));
        entity.set_attribute("number_rooms", json!(3));
        entity.set_attribute("latitude", json!(51.53));

        let record = entity.to_record();
        assert_eq!(record.get(CLASS_FIELD), Some(&json!("Place")));

        let back = Entity::from_record(&record).unwrap();
        assert_eq!(back, entity);
    }

    #[test]
    fn unknown_class_tag_is_its_own_error() {
        let mut record = Entity::new(EntityKind::State).to_record();
        record.insert(CLASS_FIELD.to_string(), json!("Booking"));

        match Entity::from_record(&record) {
            Err(RecordError::UnknownKind(tag)) => assert_eq!(tag, "Booking"),
            other => panic!("expected UnknownKind, got {other:?}"),
        }
    }

    #[test]
    fn missing_id_is_rejected() {
        let mut record = Entity::new(EntityKind::State).to_record();
        record.remove("id");
        assert!(matches!(
            Entity::from_record(&record),
            Err(RecordError::MissingField("id"))
        ));
    }

    #[test]
    fn display_shows_kind_id_and_record_without_class_field() {
        let mut entity = Entity::new(EntityKind::State);
        entity.set_attribute("name", json!("California"));

        let rendered = entity.to_string();
        assert!(rendered.starts_with(&format!("[State] ({}) {{", entity.id())));
        assert!(rendered.contains("\"name\":\"California\""));
        assert!(!rendered.contains(CLASS_FIELD));
    }
}
