//! Term trees for the factq predicate engine
//!
//! This crate defines the data the evaluator walks:
//!
//! - [`Scalar`]: a single value stored in a fact field or written as a literal
//! - [`Value`]: the result of a field lookup or evaluation (`Nil`, one scalar, or a sequence)
//! - [`Operator`]: a closed set of built-in operators plus custom names
//! - [`Term`]: an operator, its ordered [`Operand`]s and private evaluation state
//!
//! The [`Display`](std::fmt::Display) form of a term is its canonical string
//! `(op operand ...)`. It doubles as the identifier used in every diagnostic,
//! so it is deterministic for all literal kinds.
//!
//! # Example
//!
//! ```
//! use factq_term::{Operand, Term};
//!
//! let term = Term::new(
//!     "either",
//!     [Operand::field("nickname"), Operand::literal("anonymous")],
//! );
//! assert_eq!(term.to_string(), "(either nickname 'anonymous')");
//! ```

mod operator;
mod scalar;
mod state;
mod term;
mod value;

pub use operator::*;
pub use scalar::*;
pub use state::*;
pub use term::*;
pub use value::*;
