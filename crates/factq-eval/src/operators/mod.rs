//! Built-in operator implementations
//!
//! Each module adds `eval_*` methods to [`Engine`](crate::Engine) for one
//! group of operators. Every body checks its own operand count first, since
//! some operators (`count`, `sum`) accept more than one shape.

pub mod aggregate;
pub mod arithmetic;
pub mod cardinality;
pub mod comparison;
pub mod diagnostics;
pub mod existence;
pub mod logical;
pub mod mutation;
pub mod pattern;
pub mod registration;
pub mod stateful;

pub use arithmetic::ArithmeticOp;
pub use comparison::ComparisonOp;

use crate::error::{EvalError, EvalResult, Expected};
use factq_term::{Operand, Scalar, Term, Value};

/// Fail with `Arity` unless the term has an acceptable operand count
pub(crate) fn assert_args(term: &Term, expected: Expected) -> EvalResult<()> {
    if expected.admits(term.arity()) {
        return Ok(());
    }
    Err(EvalError::Arity {
        operator: term.name().to_string(),
        expected,
        actual: term.arity(),
        term: term.to_string(),
    })
}

pub(crate) fn operand_type(term: &Term, position: usize, expected: &'static str) -> EvalError {
    EvalError::OperandType {
        operator: term.name().to_string(),
        position,
        expected,
        found: term.operand(position).map_or("nothing", Operand::kind),
        term: term.to_string(),
    }
}

/// The operand at `position`, which must be a field reference
pub(crate) fn field_name(term: &Term, position: usize) -> EvalResult<&str> {
    term.operand(position)
        .and_then(Operand::as_field)
        .ok_or_else(|| operand_type(term, position, "field reference"))
}

/// A name given as a bare word or a string literal
pub(crate) fn symbol(term: &Term, position: usize) -> EvalResult<String> {
    match term.operand(position) {
        Some(Operand::Field(name)) => Ok(name.clone()),
        Some(Operand::Literal(Scalar::String(name))) => Ok(name.clone()),
        _ => Err(operand_type(term, position, "symbol")),
    }
}

/// The nested term at `position`, written inline or carried as a literal
pub(crate) fn nested_mut(term: &mut Term, position: usize) -> EvalResult<&mut Term> {
    if !matches!(
        term.operand(position),
        Some(Operand::Term(_) | Operand::Literal(Scalar::Term(_)))
    ) {
        return Err(operand_type(term, position, "term"));
    }
    match term.parts_mut().0.get_mut(position) {
        Some(Operand::Term(nested) | Operand::Literal(Scalar::Term(nested))) => Ok(nested.as_mut()),
        _ => unreachable!("operand kind checked above"),
    }
}

/// The single scalar of a resolved value: `None` for nil, `Cardinality` for
/// more than one
pub(crate) fn single<'v>(operator: &str, value: &'v Value) -> EvalResult<Option<&'v Scalar>> {
    match value.as_slice() {
        [] => Ok(None),
        [scalar] => Ok(Some(scalar)),
        items => Err(EvalError::cardinality(operator, items.len())),
    }
}

pub(crate) fn integer(scalar: &Scalar) -> EvalResult<i64> {
    scalar
        .as_integer()
        .ok_or_else(|| EvalError::type_mismatch("integer", scalar.type_name()))
}
