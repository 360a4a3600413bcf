//! Logical operators
//!
//! Implements: and, or, not
//!
//! Operands are judged by truthiness: nil, `false`, `[false]` and the empty
//! sequence are false, everything else is true. `and` and `or` stop at the
//! first operand that decides the result.

use super::assert_args;
use crate::context::Scope;
use crate::engine::Engine;
use crate::error::{EvalResult, Expected};
use factq_term::{Term, Value};

impl Engine {
    /// `(and a b ...)`
    pub(crate) fn eval_and(&self, term: &mut Term, cx: &mut Scope<'_>) -> EvalResult<Value> {
        assert_args(term, Expected::AtLeast(1))?;
        for position in 0..term.arity() {
            if !self.resolve(term, position, cx)?.is_truthy() {
                return Ok(Value::boolean(false));
            }
        }
        Ok(Value::boolean(true))
    }

    /// `(or a b ...)`
    pub(crate) fn eval_or(&self, term: &mut Term, cx: &mut Scope<'_>) -> EvalResult<Value> {
        assert_args(term, Expected::AtLeast(1))?;
        for position in 0..term.arity() {
            if self.resolve(term, position, cx)?.is_truthy() {
                return Ok(Value::boolean(true));
            }
        }
        Ok(Value::boolean(false))
    }

    /// `(not x)`
    pub(crate) fn eval_not(&self, term: &mut Term, cx: &mut Scope<'_>) -> EvalResult<Value> {
        assert_args(term, Expected::Exactly(1))?;
        Ok(Value::boolean(!self.resolve(term, 0, cx)?.is_truthy()))
    }
}
