//! Existence operators
//!
//! Implements: exists, absent, nil, either

use super::{assert_args, field_name};
use crate::context::Scope;
use crate::engine::Engine;
use crate::error::{EvalResult, Expected};
use factq_term::{Term, Value};

impl Engine {
    /// `(exists field)`: the field is present on the fact
    pub(crate) fn eval_exists(&self, term: &mut Term, cx: &mut Scope<'_>) -> EvalResult<Value> {
        assert_args(term, Expected::Exactly(1))?;
        let field = field_name(term, 0)?;
        Ok(Value::boolean(cx.fact.has(field)))
    }

    /// `(absent field)`: negation of `exists`
    pub(crate) fn eval_absent(&self, term: &mut Term, cx: &mut Scope<'_>) -> EvalResult<Value> {
        assert_args(term, Expected::Exactly(1))?;
        let field = field_name(term, 0)?;
        Ok(Value::boolean(!cx.fact.has(field)))
    }

    /// `(nil x)`: `x` resolves to nothing
    pub(crate) fn eval_nil(&self, term: &mut Term, cx: &mut Scope<'_>) -> EvalResult<Value> {
        assert_args(term, Expected::Exactly(1))?;
        Ok(Value::boolean(self.resolve(term, 0, cx)?.is_nil()))
    }

    /// `(either a b)`: `a` unless it is nil, then `b`.
    ///
    /// `b` is only resolved when needed.
    pub(crate) fn eval_either(&self, term: &mut Term, cx: &mut Scope<'_>) -> EvalResult<Value> {
        assert_args(term, Expected::Exactly(2))?;
        let first = self.resolve(term, 0, cx)?;
        if !first.is_nil() {
            return Ok(first.unwrap_singleton());
        }
        Ok(self.resolve(term, 1, cx)?.unwrap_singleton())
    }
}
