//! Evaluation errors for the factq engine

use std::fmt;
use thiserror::Error;

/// Result type for evaluation operations
pub type EvalResult<T> = Result<T, EvalError>;

/// Operand counts an operator accepts
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Expected {
    Exactly(usize),
    AtLeast(usize),
    Between(usize, usize),
}

impl Expected {
    /// Whether `count` operands are acceptable
    pub fn admits(self, count: usize) -> bool {
        match self {
            Self::Exactly(n) => count == n,
            Self::AtLeast(n) => count >= n,
            Self::Between(low, high) => (low..=high).contains(&count),
        }
    }
}

impl fmt::Display for Expected {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Exactly(n) => write!(f, "exactly {}", n),
            Self::AtLeast(n) => write!(f, "at least {}", n),
            Self::Between(low, high) => write!(f, "between {} and {}", low, high),
        }
    }
}

/// Where an operator body failed
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CallContext {
    /// Nesting depth of the failing term
    pub depth: usize,
    /// Operator of the failing term
    pub operator: String,
    /// Rows in `maps` at the time
    pub rows: usize,
}

impl fmt::Display for CallContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "operator {} at depth {} with {} rows",
            self.operator, self.depth, self.rows
        )
    }
}

/// Errors that can occur during evaluation
#[derive(Debug, Error, Clone)]
pub enum EvalError {
    /// Operator name is neither a hosted built-in nor registered
    #[error("Unknown operator '{operator}' in {term}")]
    UnknownOperator { operator: String, term: String },

    /// Operand count mismatch
    #[error("Operator {operator} expects {expected} operands, found {actual} in {term}")]
    Arity {
        operator: String,
        expected: Expected,
        actual: usize,
        term: String,
    },

    /// Operand is not of the kind required at its position
    #[error("Operand {position} of {term} must be a {expected}, found {found}")]
    OperandType {
        operator: String,
        position: usize,
        expected: &'static str,
        found: &'static str,
        term: String,
    },

    /// Failure raised while evaluating an operator body
    #[error("Error evaluating {term}: {source}")]
    Evaluation {
        term: String,
        context: CallContext,
        source: Box<EvalError>,
    },

    /// Value of the wrong type
    #[error("Type mismatch: expected {expected}, found {found}")]
    TypeMismatch { expected: String, found: String },

    /// More than one value where one is required
    #[error("{operator} expects a single value, found {found}")]
    Cardinality { operator: String, found: usize },

    /// Index out of bounds
    #[error("Index {index} out of bounds for length {length}")]
    IndexOutOfBounds { index: i64, length: usize },

    /// Regular expression failed to compile
    #[error("Invalid regex pattern {pattern}: {message}")]
    InvalidPattern { pattern: String, message: String },

    /// Division by zero
    #[error("Division by zero")]
    DivisionByZero,

    /// Integer overflow
    #[error("Arithmetic overflow in {operation}")]
    Overflow { operation: String },

    /// Custom operator name outside `[a-z_]+`
    #[error("Invalid operator name '{name}': use lowercase letters and underscores")]
    InvalidOperatorName { name: String },

    /// Attempt to define or remove a built-in
    #[error("Operator '{name}' is built in")]
    ReservedOperator { name: String },

    /// Attempt to define a name that is already registered
    #[error("Operator '{name}' is already defined")]
    DuplicateOperator { name: String },

    /// Write to a fact that does not accept writes
    #[error("Cannot write field '{field}': fact is read-only")]
    ReadOnlyFact { field: String },

    /// Term nesting exceeded the configured depth
    #[error("Maximum evaluation depth {limit} exceeded")]
    RecursionLimit { limit: usize },

    /// Failure reported by a host-registered callback
    #[error("{message}")]
    Host { message: String },
}

impl EvalError {
    /// Create a type mismatch error
    pub fn type_mismatch(expected: impl Into<String>, found: impl Into<String>) -> Self {
        Self::TypeMismatch {
            expected: expected.into(),
            found: found.into(),
        }
    }

    /// Create a cardinality error
    pub fn cardinality(operator: impl Into<String>, found: usize) -> Self {
        Self::Cardinality {
            operator: operator.into(),
            found,
        }
    }

    /// Create an overflow error
    pub fn overflow(operation: impl Into<String>) -> Self {
        Self::Overflow {
            operation: operation.into(),
        }
    }

    /// Create a host callback error
    pub fn host(message: impl Into<String>) -> Self {
        Self::Host {
            message: message.into(),
        }
    }

    /// Whether this is a dispatch-level error raised for the term rendered as
    /// `term` itself, as opposed to one coming out of its operands
    pub(crate) fn concerns(&self, term: &str) -> bool {
        match self {
            Self::UnknownOperator { term: t, .. }
            | Self::Arity { term: t, .. }
            | Self::OperandType { term: t, .. } => t == term,
            _ => false,
        }
    }

    /// The innermost error, below every `Evaluation` wrapper
    pub fn root_cause(&self) -> &EvalError {
        let mut current = self;
        while let Self::Evaluation { source, .. } = current {
            current = source;
        }
        current
    }

    /// Enclosing terms from the outermost to the failing one
    pub fn breadcrumb(&self) -> Vec<&str> {
        let mut trail = Vec::new();
        let mut current = self;
        while let Self::Evaluation { term, source, .. } = current {
            trail.push(term.as_str());
            current = source;
        }
        trail
    }
}
