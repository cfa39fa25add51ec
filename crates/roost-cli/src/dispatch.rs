//! Executes a resolved [`Command`] against the registry.
//!
//! Command-level failures come back as `ConsoleError` (printed, loop
//! continues); store failures come back as `StoreError` (fatal, propagated
//! out of the process). Presentation stays in the REPL — this module only
//! produces lines.

use thiserror::Error;
use tracing::info;

use roost_core::{ConsoleError, Entity};
use roost_store::{FileRegistry, StoreError};

use crate::command::{Command, UpdateArgs};

/// Why a dispatched command produced no output lines.
#[derive(Debug, Error)]
pub enum DispatchError {
    /// Reported to the user as one line; the session continues.
    #[error(transparent)]
    Console(#[from] ConsoleError),

    /// Persistence failed; the session cannot continue safely.
    #[error(transparent)]
    Store(#[from] StoreError),
}

/// Run `command` against `registry`, returning the lines to print.
///
/// `Command::Quit` never reaches this function; the REPL consumes it.
///
/// # Errors
///
/// `DispatchError::Console` for the user-reportable taxonomy,
/// `DispatchError::Store` when a save fails.
pub fn execute(
    command: Command,
    registry: &mut FileRegistry,
) -> Result<Vec<String>, DispatchError> {
    match command {
        Command::Quit => Ok(Vec::new()),
        Command::Create { kind } => {
            let entity = Entity::new(kind);
            let id = entity.id().to_string();
            registry.put(entity);
            registry.save()?;
            info!(%kind, %id, "record created");
            Ok(vec![id])
        }
        Command::Show { kind, id } => {
            let key = Entity::key_for(kind, &id);
            let entity = registry.get(&key).ok_or(ConsoleError::InstanceNotFound)?;
            Ok(vec![entity.to_string()])
        }
        Command::Destroy { kind, id } => {
            let key = Entity::key_for(kind, &id);
            if !registry.contains(&key) {
                return Err(ConsoleError::InstanceNotFound.into());
            }
            registry.delete(&key);
            registry.save()?;
            info!(%key, "record destroyed");
            Ok(Vec::new())
        }
        Command::All { kind } => {
            let lines = registry
                .all()
                .values()
                .filter(|entity| kind.is_none_or(|k| entity.kind() == k))
                .map(ToString::to_string)
                .collect();
            Ok(lines)
        }
        Command::Count { tag } => Ok(vec![registry.count_kind(&tag).to_string()]),
        Command::Update { kind, id, args } => {
            let key = Entity::key_for(kind, &id);
            let entity = registry
                .get_mut(&key)
                .ok_or(ConsoleError::InstanceNotFound)?;

            match args {
                UpdateArgs::Pair { attr, value } => {
                    let attr = attr.ok_or(ConsoleError::MissingAttributeName)?;
                    let value = value.ok_or(ConsoleError::MissingAttributeValue)?;
                    entity.set_attribute(&attr, value);
                }
                UpdateArgs::Batch(pairs) => {
                    for (attr, value) in pairs {
                        entity.set_attribute(&attr, value);
                    }
                }
            }

            // One save per logical update call, both forms.
            registry.save()?;
            info!(%key, "record updated");
            Ok(Vec::new())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;
    use tempfile::TempDir;

    use roost_core::EntityKind;

    use crate::parser::parse;

    fn registry_in(dir: &TempDir) -> FileRegistry {
        FileRegistry::new(dir.path().join("file.json"))
    }

    fn run(line: &str, registry: &mut FileRegistry) -> Result<Vec<String>, DispatchError> {
        execute(parse(line).unwrap(), registry)
    }

    fn console_error(result: Result<Vec<String>, DispatchError>) -> ConsoleError {
        match result {
            Err(DispatchError::Console(error)) => error,
            other => panic!("expected console error, got {other:?}"),
        }
    }

    #[test]
    fn create_prints_the_new_id_and_persists() {
        let dir = TempDir::new().unwrap();
        let mut registry = registry_in(&dir);

        let lines = run("create State", &mut registry).unwrap();

        assert_eq!(lines.len(), 1);
        let id = &lines[0];
        assert!(registry.contains(&format!("State.{id}")));
        assert!(registry.path().exists());
    }

    #[test]
    fn create_then_show_round_trips_for_every_kind() {
        let dir = TempDir::new().unwrap();
        let mut registry = registry_in(&dir);

        for kind in EntityKind::ALL {
            let id = run(&format!("create {kind}"), &mut registry).unwrap()[0].clone();
            let shown = run(&format!("show {kind} {id}"), &mut registry).unwrap();
            assert!(shown[0].contains(&id));
            assert!(shown[0].starts_with(&format!("[{kind}]")));
        }
    }

    #[test]
    fn two_creates_yield_distinct_ids_both_listed() {
        let dir = TempDir::new().unwrap();
        let mut registry = registry_in(&dir);

        let first = run("create State", &mut registry).unwrap()[0].clone();
        let second = run("create State", &mut registry).unwrap()[0].clone();
        assert_ne!(first, second);

        let listed = run("State.all()", &mut registry).unwrap();
        assert_eq!(listed.len(), 2);
        assert!(listed.iter().any(|line| line.contains(&first)));
        assert!(listed.iter().any(|line| line.contains(&second)));
    }

    #[test]
    fn show_of_missing_instance_reports_not_found() {
        let dir = TempDir::new().unwrap();
        let mut registry = registry_in(&dir);

        let error = console_error(run("show State nope", &mut registry));
        assert_eq!(error, ConsoleError::InstanceNotFound);
    }

    #[test]
    fn destroy_removes_and_persists() {
        let dir = TempDir::new().unwrap();
        let mut registry = registry_in(&dir);
        let id = run("create User", &mut registry).unwrap()[0].clone();

        run(&format!("destroy User {id}"), &mut registry).unwrap();

        assert!(registry.is_empty());
        let mut reloaded = registry_in(&dir);
        reloaded.reload().unwrap();
        assert!(reloaded.is_empty());
    }

    #[test]
    fn destroy_of_missing_key_leaves_registry_unchanged() {
        let dir = TempDir::new().unwrap();
        let mut registry = registry_in(&dir);
        run("create User", &mut registry).unwrap();

        let error = console_error(run("destroy User nope", &mut registry));

        assert_eq!(error, ConsoleError::InstanceNotFound);
        assert_eq!(registry.len(), 1);
    }

    #[test]
    fn all_without_class_lists_every_record() {
        let dir = TempDir::new().unwrap();
        let mut registry = registry_in(&dir);
        run("create State", &mut registry).unwrap();
        run("create City", &mut registry).unwrap();

        let lines = run("all", &mut registry).unwrap();
        assert_eq!(lines.len(), 2);
    }

    #[test]
    fn all_with_class_filters() {
        let dir = TempDir::new().unwrap();
        let mut registry = registry_in(&dir);
        run("create State", &mut registry).unwrap();
        run("create City", &mut registry).unwrap();

        let lines = run("all State", &mut registry).unwrap();
        assert_eq!(lines.len(), 1);
        assert!(lines[0].starts_with("[State]"));
    }

    #[test]
    fn count_is_zero_for_unknown_tags_without_error() {
        let dir = TempDir::new().unwrap();
        let mut registry = registry_in(&dir);
        run("create State", &mut registry).unwrap();

        assert_eq!(run("count State", &mut registry).unwrap(), vec!["1"]);
        assert_eq!(
            run("count NonExistentClass", &mut registry).unwrap(),
            vec!["0"]
        );
    }

    #[test]
    fn both_update_syntaxes_store_the_same_attribute() {
        let dir = TempDir::new().unwrap();
        let mut registry = registry_in(&dir);
        let id = run("create State", &mut registry).unwrap()[0].clone();

        run(
            &format!(r#"State.update("{id}", "name", "California")"#),
            &mut registry,
        )
        .unwrap();
        let dotted = registry
            .get(&format!("State.{id}"))
            .and_then(|e| e.attribute("name"))
            .cloned();

        run(
            &format!(r#"update State {id} name "California""#),
            &mut registry,
        )
        .unwrap();
        let verb_first = registry
            .get(&format!("State.{id}"))
            .and_then(|e| e.attribute("name"))
            .cloned();

        assert_eq!(dotted, Some(json!("California")));
        assert_eq!(dotted, verb_first);
    }

    #[test]
    fn update_never_changes_id_or_kind_and_advances_updated_at() {
        let dir = TempDir::new().unwrap();
        let mut registry = registry_in(&dir);
        let id = run("create Review", &mut registry).unwrap()[0].clone();
        let key = format!("Review.{id}");
        let before = registry.get(&key).unwrap().updated_at();

        run(&format!("update Review {id} text great"), &mut registry).unwrap();

        let entity = registry.get(&key).unwrap();
        assert_eq!(entity.id(), id);
        assert_eq!(entity.kind(), EntityKind::Review);
        assert!(entity.updated_at() >= before);
    }

    #[test]
    fn verb_first_update_checks_existence_before_attr_name() {
        let dir = TempDir::new().unwrap();
        let mut registry = registry_in(&dir);

        // Missing instance wins over missing attribute name.
        let error = console_error(run("update State nope", &mut registry));
        assert_eq!(error, ConsoleError::InstanceNotFound);

        let id = run("create State", &mut registry).unwrap()[0].clone();
        let error = console_error(run(&format!("update State {id}"), &mut registry));
        assert_eq!(error, ConsoleError::MissingAttributeName);

        let error = console_error(run(&format!("update State {id} name"), &mut registry));
        assert_eq!(error, ConsoleError::MissingAttributeValue);
    }

    #[test]
    fn mapping_update_applies_every_pair_and_persists_once() {
        let dir = TempDir::new().unwrap();
        let mut registry = registry_in(&dir);
        let id = run("create Place", &mut registry).unwrap()[0].clone();

        run(
            &format!(r#"Place.update("{id}", {{'name': 'Loft', 'max_guest': 4}})"#),
            &mut registry,
        )
        .unwrap();

        let mut reloaded = registry_in(&dir);
        reloaded.reload().unwrap();
        let entity = reloaded.get(&format!("Place.{id}")).unwrap();
        assert_eq!(entity.attribute("name"), Some(&json!("Loft")));
        assert_eq!(entity.attribute("max_guest"), Some(&json!(4)));
    }

    #[test]
    fn update_cannot_overwrite_bookkeeping_fields() {
        let dir = TempDir::new().unwrap();
        let mut registry = registry_in(&dir);
        let id = run("create User", &mut registry).unwrap()[0].clone();

        run(&format!("update User {id} id hijacked"), &mut registry).unwrap();

        let entity = registry.get(&format!("User.{id}")).unwrap();
        assert_eq!(entity.id(), id);
        assert_eq!(entity.attribute("id"), None);
    }
}
