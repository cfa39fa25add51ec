//! The read-eval-print loop.
//!
//! One command per line, run to completion before the next read. Command
//! failures print their taxonomy line and the loop continues; store failures
//! propagate and end the process.

use std::io::{BufRead, Write};

use roost_store::FileRegistry;

use crate::command::Command;
use crate::dispatch::{self, DispatchError};
use crate::parser;

/// Whether the session goes on after a line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineOutcome {
    Continue,
    Quit,
}

/// Evaluate one raw input line, writing any output to `out`.
///
/// Empty and whitespace-only lines are ignored. Also used for one-shot
/// `--command` execution.
///
/// # Errors
///
/// Only store failures surface here; everything user-reportable is written
/// to `out` instead.
pub fn eval_line(
    registry: &mut FileRegistry,
    line: &str,
    out: &mut impl Write,
) -> anyhow::Result<LineOutcome> {
    let trimmed = line.trim();
    if trimmed.is_empty() {
        return Ok(LineOutcome::Continue);
    }

    let command = match parser::parse(trimmed) {
        Ok(command) => command,
        Err(error) => {
            writeln!(out, "{error}")?;
            return Ok(LineOutcome::Continue);
        }
    };

    if command == Command::Quit {
        return Ok(LineOutcome::Quit);
    }

    match dispatch::execute(command, registry) {
        Ok(lines) => {
            for printed in lines {
                writeln!(out, "{printed}")?;
            }
        }
        Err(DispatchError::Console(error)) => writeln!(out, "{error}")?,
        Err(DispatchError::Store(error)) => return Err(error.into()),
    }

    Ok(LineOutcome::Continue)
}

/// Run the interactive loop until `quit` or end of input.
///
/// # Errors
///
/// Propagates store failures and I/O errors on the output stream.
pub fn run(
    registry: &mut FileRegistry,
    prompt: &str,
    input: impl BufRead,
    mut out: impl Write,
) -> anyhow::Result<()> {
    let mut lines = input.lines();
    loop {
        write!(out, "{prompt}")?;
        out.flush()?;

        let Some(line) = lines.next().transpose()? else {
            // EOF ends the session cleanly.
            writeln!(out)?;
            return Ok(());
        };

        if eval_line(registry, &line, &mut out)? == LineOutcome::Quit {
            return Ok(());
        }
    }
}
