//! Runtime operator registration
//!
//! Implements: defn, undef
//!
//! A definition is data: a term whose `$n` placeholders stand for the
//! operands of the invoking term. It is registered in the engine's registry,
//! which is process-wide unless the engine is isolated.

use super::{assert_args, operand_type, symbol};
use crate::engine::Engine;
use crate::error::{EvalResult, Expected};
use crate::registry::OperatorDef;
use factq_term::{Operand, Scalar, Term, Value};

impl Engine {
    /// `(defn name (body ...))`
    pub(crate) fn eval_defn(&self, term: &Term) -> EvalResult<Value> {
        assert_args(term, Expected::Exactly(2))?;
        let name = symbol(term, 0)?;
        let body = match term.operand(1) {
            Some(Operand::Term(body) | Operand::Literal(Scalar::Term(body))) => body.fresh(),
            _ => return Err(operand_type(term, 1, "term")),
        };
        self.register(OperatorDef::expression(name, body))?;
        Ok(Value::boolean(true))
    }

    /// `(undef name)`: true whether or not `name` was defined
    pub(crate) fn eval_undef(&self, term: &Term) -> EvalResult<Value> {
        assert_args(term, Expected::Exactly(1))?;
        let name = symbol(term, 0)?;
        self.unregister(&name)?;
        Ok(Value::boolean(true))
    }
}
