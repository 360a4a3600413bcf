//! factq Evaluation Engine
//!
//! Evaluates [`Term`]s against an in-memory fact and a working set of rows
//! (`maps`). Operators fall into these groups:
//!
//! - **Existence**: exists, absent, nil, either
//! - **Selection and cardinality**: at, many, one, size, type, const
//! - **Stateful**: prev, unique (state lives on the term instance)
//! - **Mutation**: as (appends to the fact)
//! - **Pattern matching**: matches
//! - **Registration**: defn, undef
//! - **Aggregation**: min, max, count, nth, first, sum, agg
//! - **Comparison and arithmetic**: eq, ne, lt, le, gt, ge, add, sub, mul, div
//! - **Logical**: and, or, not
//! - **Diagnostics**: traced
//!
//! # Example
//!
//! ```
//! use factq_eval::{Engine, MemoryFact};
//! use factq_term::{Operand, Term, Value};
//!
//! let engine = Engine::isolated();
//! let mut fact = MemoryFact::new().with("nickname", "ann");
//! let mut term = Term::new(
//!     "either",
//!     [Operand::field("nickname"), Operand::literal("anonymous")],
//! );
//! let value = engine.evaluate(&mut term, &mut fact, &[]).unwrap();
//! assert_eq!(value, Value::from(factq_term::Scalar::from("ann")));
//! ```
//!
//! # Architecture
//!
//! - [`Engine`]: dispatches built-ins and invokes custom operators
//! - [`OperatorRegistry`]: hosted operator families and custom definitions,
//!   shared process-wide unless an engine is built over its own
//! - [`Fact`]: the read/append contract of a fact record
//! - `simplify`: static rewriting that never looks at a fact
//!
//! # Scans
//!
//! `prev` and `unique` remember what they saw on the term instance that was
//! evaluated. Evaluating one instance against a series of facts is a scan;
//! [`Term::fresh`] starts a new one.

pub mod config;
pub mod context;
pub mod engine;
pub mod error;
pub mod fact;
pub mod json;
pub mod operators;
pub mod registry;
pub mod simplify;
pub mod view;

// Re-export main types
pub use config::{EngineConfig, EngineConfigBuilder, TraceLevel, DEFAULT_MAX_DEPTH};
pub use context::Scope;
pub use engine::{Engine, TermExt};
pub use error::{CallContext, EvalError, EvalResult, Expected};
pub use fact::{EmptyFact, Fact, MemoryFact, Row, SharedFact};
pub use registry::{
    global_registry, register_operator, unregister_operator, ComparisonOperators, CoreOperators,
    LogicalOperators, NativeOpFn, OperatorBody, OperatorDef, OperatorFamily, OperatorRegistry,
    SharedRegistry, SimplifyFn,
};
pub use view::CompositeView;

pub use factq_term::{Builtin, Family, Operand, Operator, Pattern, Scalar, Term, Value};
