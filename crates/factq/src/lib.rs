//! Predicate and query evaluation over in-memory facts
//!
//! This crate bundles the factq crates:
//! - [`term`]: scalars, values and term trees
//! - [`reader`]: reading terms from their canonical string form
//! - [`eval`]: the evaluation engine, operator registry and simplifier
//!
//! # Example
//!
//! ```
//! use factq::{parse_term, Engine, MemoryFact, Value};
//!
//! let engine = Engine::isolated();
//! let mut term = parse_term("(and (exists name) (ge age 18))").unwrap();
//! let mut fact = MemoryFact::new().with("name", "ann").with("age", 34);
//! assert_eq!(engine.evaluate(&mut term, &mut fact, &[]).unwrap(), Value::boolean(true));
//! ```

// Re-export all public APIs from internal crates
pub use factq_eval as eval;
pub use factq_reader as reader;
pub use factq_term as term;

// Convenience re-exports
pub use factq_eval::{
    Engine, EngineConfig, EvalError, EvalResult, Fact, MemoryFact, OperatorDef, Row, TermExt,
};
pub use factq_reader::{parse_term, ReadError};
pub use factq_term::{Operand, Scalar, Term, Value};

// CLI module (only available with cli feature)
#[cfg(feature = "cli")]
pub mod cli;
