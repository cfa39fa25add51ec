//! Resolves a command line into a [`Command`].
//!
//! Two surface syntaxes are accepted:
//!
//! - verb-first: `show State <id>`, `update Place <id> name "Loft"`
//! - dotted-call: `State.show("<id>")`, `Place.update("<id>", {'name': 'Loft'})`
//!
//! Both resolve to the same canonical operations. The parser owns every
//! validation that does not require the registry (class tag in the set,
//! argument shape); existence checks stay in the dispatcher. The dotted
//! argument grammar is handled by a small scanner rather than pattern
//! extraction, but accepts the same input set.

use serde_json::Value;

use roost_core::value::coerce_literal;
use roost_core::{ConsoleError, EntityKind};

use crate::command::{Command, UpdateArgs};
use crate::tokenizer::tokenize;

/// Parse one non-empty command line.
///
/// # Errors
///
/// Returns the `ConsoleError` whose display is the exact line to print.
pub fn parse(line: &str) -> Result<Command, ConsoleError> {
    let trimmed = line.trim();
    let tokens = tokenize(trimmed)
        .map_err(|_| ConsoleError::UnknownSyntax(trimmed.to_string()))?;

    let Some(verb) = tokens.first() else {
        return Err(ConsoleError::UnknownSyntax(trimmed.to_string()));
    };

    match verb.as_str() {
        "quit" => Ok(Command::Quit),
        "create" => {
            let tag = tokens.get(1).ok_or(ConsoleError::MissingClassName)?;
            let kind = parse_kind(tag)?;
            Ok(Command::Create { kind })
        }
        "show" => {
            let (kind, id) = kind_and_id(&tokens)?;
            Ok(Command::Show { kind, id })
        }
        "destroy" => {
            let (kind, id) = kind_and_id(&tokens)?;
            Ok(Command::Destroy { kind, id })
        }
        "all" => {
            let kind = match tokens.get(1) {
                Some(tag) => Some(parse_kind(tag)?),
                None => None,
            };
            Ok(Command::All { kind })
        }
        "count" => {
            let tag = tokens.get(1).ok_or(ConsoleError::MissingClassName)?;
            Ok(Command::Count { tag: tag.clone() })
        }
        "update" => {
            let (kind, id) = kind_and_id(&tokens)?;
            // Presence of attr/value is validated by the dispatcher, after
            // the existence check — that ordering is observable.
            let attr = tokens.get(3).cloned();
            let value = tokens.get(4).map(|raw| coerce_literal(raw));
            Ok(Command::Update {
                kind,
                id,
                args: UpdateArgs::Pair { attr, value },
            })
        }
        _ => parse_dotted(trimmed),
    }
}

/// Shared `<verb> <Kind> <id>` validation: missing class name, then unknown
/// class, then missing id — each terminal.
fn kind_and_id(tokens: &[String]) -> Result<(EntityKind, String), ConsoleError> {
    let tag = tokens.get(1).ok_or(ConsoleError::MissingClassName)?;
    let kind = parse_kind(tag)?;
    let id = tokens.get(2).ok_or(ConsoleError::MissingInstanceId)?;
    Ok((kind, id.clone()))
}

fn parse_kind(tag: &str) -> Result<EntityKind, ConsoleError> {
    tag.parse().map_err(|_| ConsoleError::UnknownClass)
}

/// Parse the dotted-call syntax `<Kind>.<verb>(<args>)`.
fn parse_dotted(line: &str) -> Result<Command, ConsoleError> {
    let unknown = || ConsoleError::UnknownSyntax(line.to_string());

    let mut segments = line.split('.');
    let (Some(class_name), Some(method)) = (segments.next(), segments.next()) else {
        return Err(unknown());
    };
    if segments.next().is_some() {
        return Err(unknown());
    }

    let kind = parse_kind(class_name)?;

    // `Kind.verb` with no parentheses behaves like empty arguments.
    let (verb, args) = match method.find('(') {
        Some(open) => {
            if !method.ends_with(')') || open + 1 > method.len() - 1 {
                return Err(unknown());
            }
            (&method[..open], &method[open + 1..method.len() - 1])
        }
        None => (method, ""),
    };

    match verb {
        "all" if args.trim().is_empty() => Ok(Command::All { kind: Some(kind) }),
        "count" if args.trim().is_empty() => Ok(Command::Count {
            tag: kind.as_str().to_string(),
        }),
        "show" | "destroy" => {
            let raw = args.trim();
            if raw.is_empty() {
                return Err(ConsoleError::MissingInstanceId);
            }
            let id = strip_quotes(raw).to_string();
            if verb == "show" {
                Ok(Command::Show { kind, id })
            } else {
                Ok(Command::Destroy { kind, id })
            }
        }
        "update" => parse_dotted_update(kind, args, line),
        _ => Err(unknown()),
    }
}

/// Parse the parenthesized `update` argument grammar:
/// `"<id>"`, `"<id>", <attr>, <value>`, or `"<id>", {<mapping>}`.
fn parse_dotted_update(
    kind: EntityKind,
    args: &str,
    line: &str,
) -> Result<Command, ConsoleError> {
    let Some(id) = first_quoted_token(args) else {
        return Err(ConsoleError::MissingInstanceId);
    };

    if let Some(mapping) = brace_slice(args) {
        // Single quotes are accepted in the mapping and normalized before
        // the JSON parse.
        let normalized = mapping.replace('\'', "\"");
        let parsed: serde_json::Map<String, Value> = serde_json::from_str(&normalized)
            .map_err(|_| ConsoleError::UnknownSyntax(line.to_string()))?;
        let batch = parsed.into_iter().collect();
        return Ok(Command::Update {
            kind,
            id,
            args: UpdateArgs::Batch(batch),
        });
    }

    let fields: Vec<&str> = args.split(", ").collect();
    if fields.len() < 2 {
        return Err(ConsoleError::MissingAttributeName);
    }
    if fields.len() < 3 {
        return Err(ConsoleError::MissingAttributeValue);
    }

    let attr = strip_quotes(fields[1].trim()).to_string();
    let value = coerce_literal(strip_quotes(fields[2].trim()));
    Ok(Command::Update {
        kind,
        id,
        args: UpdateArgs::Batch(vec![(attr, value)]),
    })
}

/// Extract the first double-quoted id-shaped token (`"[\w-]+"`).
fn first_quoted_token(args: &str) -> Option<String> {
    let mut rest = args;
    while let Some(open) = rest.find('"') {
        let tail = &rest[open + 1..];
        let close = tail.find('"')?;
        let candidate = &tail[..close];
        if !candidate.is_empty()
            && candidate
                .chars()
                .all(|c| c.is_alphanumeric() || c == '_' || c == '-')
        {
            return Some(candidate.to_string());
        }
        rest = &tail[close + 1..];
    }
    None
}

/// The outermost `{...}` span, if both braces are present in order.
fn brace_slice(args: &str) -> Option<&str> {
    let open = args.find('{')?;
    let close = args.rfind('}')?;
    (open < close).then(|| &args[open..=close])
}

/// Drop one pair of surrounding quote characters, either kind, each side
/// independently.
fn strip_quotes(raw: &str) -> &str {
    let raw = raw.strip_prefix(['"', '\'']).unwrap_or(raw);
    raw.strip_suffix(['"', '\'']).unwrap_or(raw)
}
