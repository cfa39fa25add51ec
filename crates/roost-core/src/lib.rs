//! # roost-core
//!
//! Core types for the roost record console:
//! - `Entity`: a typed record with an id, timestamps, and an open attribute bag
//! - `EntityKind`: the closed set of record class tags
//! - Id generation from OS randomness
//! - The console error taxonomy with its exact user-facing strings
//! - Literal coercion for attribute values typed at the prompt

pub mod entity;
pub mod errors;
pub mod ids;
pub mod kind;
pub mod timestamp;
pub mod value;

pub use entity::Entity;
pub use errors::ConsoleError;
pub use kind::EntityKind;
