//! Selection, cardinality and type operators
//!
//! Implements: at, many, one, size, type, const

use super::{assert_args, integer, operand_type, single};
use crate::context::Scope;
use crate::engine::Engine;
use crate::error::{EvalError, EvalResult, Expected};
use factq_term::{Operand, Scalar, Term, Value};

impl Engine {
    /// `(at index sequence)`
    ///
    /// Nil when either side is nil. An index outside the sequence is an
    /// error, negative indexes included.
    pub(crate) fn eval_at(&self, term: &mut Term, cx: &mut Scope<'_>) -> EvalResult<Value> {
        assert_args(term, Expected::Exactly(2))?;
        let index = self.resolve(term, 0, cx)?;
        let sequence = self.resolve(term, 1, cx)?;
        let Some(index) = single("at", &index)? else {
            return Ok(Value::Nil);
        };
        if sequence.is_nil() {
            return Ok(Value::Nil);
        }
        let index = integer(index)?;

        let items = sequence.as_slice();
        usize::try_from(index)
            .ok()
            .and_then(|i| items.get(i))
            .map(|item| Value::Scalar(item.clone()))
            .ok_or(EvalError::IndexOutOfBounds {
                index,
                length: items.len(),
            })
    }

    /// `(many x)`: more than one value
    pub(crate) fn eval_many(&self, term: &mut Term, cx: &mut Scope<'_>) -> EvalResult<Value> {
        assert_args(term, Expected::Exactly(1))?;
        Ok(Value::boolean(self.resolve(term, 0, cx)?.len() > 1))
    }

    /// `(one x)`: exactly one value
    pub(crate) fn eval_one(&self, term: &mut Term, cx: &mut Scope<'_>) -> EvalResult<Value> {
        assert_args(term, Expected::Exactly(1))?;
        Ok(Value::boolean(self.resolve(term, 0, cx)?.len() == 1))
    }

    /// `(size x)`: 0 when absent, 1 for a scalar, else the sequence length
    pub(crate) fn eval_size(&self, term: &mut Term, cx: &mut Scope<'_>) -> EvalResult<Value> {
        assert_args(term, Expected::Exactly(1))?;
        let len = self.resolve(term, 0, cx)?.len();
        Ok(Value::Scalar(Scalar::Integer(len as i64)))
    }

    /// `(type x)`
    pub(crate) fn eval_type(&self, term: &mut Term, cx: &mut Scope<'_>) -> EvalResult<Value> {
        assert_args(term, Expected::Exactly(1))?;
        let value = self.resolve(term, 0, cx)?.unwrap_singleton();
        Ok(Value::Scalar(Scalar::from(value.type_name())))
    }

    /// `(const literal)`
    pub(crate) fn eval_const(&self, term: &Term) -> EvalResult<Value> {
        assert_args(term, Expected::Exactly(1))?;
        match term.operand(0) {
            Some(Operand::Literal(scalar)) => Ok(Value::Scalar(scalar.clone())),
            _ => Err(operand_type(term, 0, "literal")),
        }
    }
}
