//! The closed set of record class tags.
//!
//! Every record in the store carries exactly one of these tags; anything
//! outside the set is rejected at the command layer with
//! `** class doesn't exist **`.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Class tag of a stored record.
///
/// Serialized as the PascalCase tag name, which is also the prefix of the
/// storage key (`"State.<id>"`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum EntityKind {
    BaseModel,
    User,
    State,
    City,
    Amenity,
    Place,
    Review,
}

impl EntityKind {
    /// Every kind, in declaration order.
    pub const ALL: [Self; 7] = [
        Self::BaseModel,
        Self::User,
        Self::State,
        Self::City,
        Self::Amenity,
        Self::Place,
        Self::Review,
    ];

    /// The string form used in storage keys and the `__class__` field.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::BaseModel => "BaseModel",
            Self::User => "User",
            Self::State => "State",
            Self::City => "City",
            Self::Amenity => "Amenity",
            Self::Place => "Place",
            Self::Review => "Review",
        }
    }

    /// Whether `tag` names a kind in the set.
    #[must_use]
    pub fn is_known(tag: &str) -> bool {
        tag.parse::<Self>().is_ok()
    }
}

impl fmt::Display for EntityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when a class tag is not in the enumerated set.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownKind(pub String);

impl fmt::Display for UnknownKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown class tag '{}'", self.0)
    }
}

impl std::error::Error for UnknownKind {}

impl FromStr for EntityKind {
    type Err = UnknownKind;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "BaseModel" => Ok(Self::BaseModel),
            "User" => Ok(Self::User),
            "State" => Ok(Self::State),
            "City" => Ok(Self::City),
            "Amenity" => Ok(Self::Amenity),
            "Place" => Ok(Self::Place),
            "Review" => Ok(Self::Review),
            other => Err(UnknownKind(other.to_string())),
        }
    }
}
