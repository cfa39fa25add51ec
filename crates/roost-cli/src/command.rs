//! The canonical operations both surface syntaxes resolve to.

use serde_json::Value;

use roost_core::EntityKind;

/// Attribute changes carried by an `update` command.
///
/// The two variants exist because the two syntaxes validate in different
/// orders: the verb-first form reports a missing attribute name or value
/// only after the instance lookup succeeds, while the dotted form rejects
/// malformed arguments before dispatch ever runs.
#[derive(Debug, Clone, PartialEq)]
pub enum UpdateArgs {
    /// Verb-first `update <Kind> <id> [<attr> [<value>]]`; presence of the
    /// attribute name and value is checked by the dispatcher, after the
    /// existence check.
    Pair {
        attr: Option<String>,
        value: Option<Value>,
    },
    /// Dotted forms, fully parsed: one pair from the positional triple, or
    /// every pair of the brace-delimited mapping.
    Batch(Vec<(String, Value)>),
}

/// A resolved console command.
#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    /// Terminate the session with exit code 0.
    Quit,
    Create {
        kind: EntityKind,
    },
    Show {
        kind: EntityKind,
        id: String,
    },
    Destroy {
        kind: EntityKind,
        id: String,
    },
    /// List every record, or only those of one kind.
    All {
        kind: Option<EntityKind>,
    },
    /// Count records whose class tag equals `tag`. Unknown tags count zero
    /// rather than erroring, so the raw text is kept.
    Count {
        tag: String,
    },
    Update {
        kind: EntityKind,
        id: String,
        args: UpdateArgs,
    },
}
