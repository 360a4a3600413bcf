//! Reader for the canonical term form
//!
//! Reads back what [`Term`]'s `Display` produces:
//!
//! ```text
//! (agg (gt k 1) (sum k))
//! (matches name /^ann?a$/)
//! (eq seen_at 2024-03-01T12:30:00Z)
//! (either nickname 'O\'Hara')
//! ```
//!
//! The store's own query language is translated into terms elsewhere; this
//! reader only covers the canonical form used for diagnostics, tooling and
//! tests.

mod combinators;

pub use combinators::MAX_NESTING;

use combinators::{term_parser, ws, Input};
use factq_term::Term;
use thiserror::Error;
use winnow::combinator::eof;
use winnow::error::ContextError;
use winnow::prelude::*;

/// Errors raised while reading a term
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ReadError {
    /// The input is not a well-formed term
    #[error("Syntax error at offset {offset}: {message}")]
    Syntax { offset: usize, message: String },

    /// The input was empty or whitespace only
    #[error("Empty input")]
    Empty,
}

/// Result type for reading terms
pub type ReadResult<T> = Result<T, ReadError>;

/// Read a single term from its canonical string form
pub fn parse_term(source: &str) -> ReadResult<Term> {
    if source.trim().is_empty() {
        return Err(ReadError::Empty);
    }

    let mut input: Input<'_> = source;
    let syntax = |input: &str, message: String| ReadError::Syntax {
        offset: source.len() - input.len(),
        message,
    };

    ws(&mut input).map_err(|e| syntax(input, format!("{:?}", e)))?;
    let term = term_parser(&mut input).map_err(|e| syntax(input, describe(&e)))?;
    ws(&mut input).map_err(|e| syntax(input, format!("{:?}", e)))?;
    eof::<_, ContextError>
        .parse_next(&mut input)
        .map_err(|_| syntax(input, "unexpected trailing input".to_string()))?;

    Ok(term)
}

fn describe(error: &winnow::error::ErrMode<ContextError>) -> String {
    match error {
        winnow::error::ErrMode::Backtrack(ctx) | winnow::error::ErrMode::Cut(ctx) => {
            let rendered = ctx.to_string();
            if rendered.is_empty() {
                "malformed term".to_string()
            } else {
                rendered
            }
        }
        winnow::error::ErrMode::Incomplete(_) => "incomplete input".to_string(),
    }
}
