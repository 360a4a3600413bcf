//! Operator integration tests
//!
//! Terms are written in their canonical form and read back with
//! `factq_reader`, so each case reads like the term it exercises.

mod aggregate;
mod comparison;
mod errors;
mod existence;
mod logical;
mod registration;
mod stateful;

use factq_eval::json::rows_from_json;
use factq_eval::{Engine, EvalResult, MemoryFact, Row};
use factq_reader::parse_term;
use factq_term::{Scalar, Term, Value};

// ============================================================================
// Test Helpers
// ============================================================================

pub fn term(source: &str) -> Term {
    parse_term(source).expect("test term should parse")
}

/// Evaluate against `fact` with no rows, on a private registry
pub fn eval(source: &str, fact: &mut MemoryFact) -> EvalResult<Value> {
    Engine::isolated().evaluate(&mut term(source), fact, &[])
}

/// Evaluate against an empty fact and the given rows
pub fn eval_rows(source: &str, rows: &[Row]) -> EvalResult<Value> {
    Engine::isolated().evaluate(&mut term(source), &mut MemoryFact::new(), rows)
}

pub fn rows(json: serde_json::Value) -> Vec<Row> {
    rows_from_json(&json).expect("test rows should convert")
}

pub fn int(i: i64) -> Value {
    Value::Scalar(Scalar::Integer(i))
}

pub fn string(s: &str) -> Value {
    Value::Scalar(Scalar::from(s))
}

pub fn boolean(b: bool) -> Value {
    Value::boolean(b)
}
