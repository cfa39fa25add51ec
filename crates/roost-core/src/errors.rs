//! The console error taxonomy.
//!
//! Every non-fatal command failure is one of these variants; the `Display`
//! impl is the exact line printed at the prompt, so the REPL never needs a
//! translation table. All of them leave the session running. Fatal
//! conditions (corrupt store file, failed save) live in `roost-store` and
//! propagate out of the process instead.

use thiserror::Error;

/// A command-level failure, reported to the user as a single line.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConsoleError {
    /// A command that needs a class tag was given none.
    #[error("** class name missing **")]
    MissingClassName,

    /// The class tag is outside the enumerated set.
    #[error("** class doesn't exist **")]
    UnknownClass,

    /// A command that needs an instance id was given none.
    #[error("** instance id missing **")]
    MissingInstanceId,

    /// No record exists at the requested `<Kind>.<id>` key.
    #[error("** no instance found **")]
    InstanceNotFound,

    /// `update` was given an id but no attribute name.
    #[error("** attribute name missing **")]
    MissingAttributeName,

    /// `update` was given an attribute name but no value.
    #[error("** value missing **")]
    MissingAttributeValue,

    /// The line matched neither surface syntax; carries the raw input for
    /// display.
    #[error("*** Unknown syntax: {0}")]
    UnknownSyntax(String),
}
