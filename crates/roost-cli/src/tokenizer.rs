//! Shell-style line tokenizer for the verb-first syntax.
//!
//! Whitespace separates tokens; a double- or single-quoted span keeps its
//! embedded spaces and may sit anywhere inside a token (`ab"c d"e` is one
//! token `abc de`). A quote left open at end of line is a parse error.

/// The line ended inside a quoted span.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UnmatchedQuote;

/// Split `line` into shell-style tokens.
///
/// # Errors
///
/// Returns `UnmatchedQuote` when a quote is opened and never closed; the
/// caller reports the whole line as unknown syntax.
pub fn tokenize(line: &str) -> Result<Vec<String>, UnmatchedQuote> {
    let mut tokens = Vec::new();
    let mut current = String::new();
    let mut in_token = false;
    let mut chars = line.chars();

    while let Some(c) = chars.next() {
        match c {
            '"' | '\'' => {
                in_token = true;
                let mut closed = false;
                for inner in chars.by_ref() {
                    if inner == c {
                        closed = true;
                        break;
                    }
                    current.push(inner);
                }
                if !closed {
                    return Err(UnmatchedQuote);
                }
            }
            c if c.is_whitespace() => {
                if in_token {
                    tokens.push(std::mem::take(&mut current));
                    in_token = false;
                }
            }
            c => {
                in_token = true;
                current.push(c);
            }
        }
    }

    if in_token {
        tokens.push(current);
    }
    Ok(tokens)
}
