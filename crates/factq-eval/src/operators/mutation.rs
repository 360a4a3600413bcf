//! Field assignment
//!
//! Implements: as

use super::{assert_args, field_name};
use crate::context::Scope;
use crate::engine::Engine;
use crate::error::{EvalResult, Expected};
use factq_term::{Term, Value};

impl Engine {
    /// `(as field x)`: append every value of `x` to `field`, one at a time.
    /// Always true; nil writes nothing.
    pub(crate) fn eval_as(&self, term: &mut Term, cx: &mut Scope<'_>) -> EvalResult<Value> {
        assert_args(term, Expected::Exactly(2))?;
        let field = field_name(term, 0)?.to_string();
        let value = self.resolve(term, 1, cx)?;
        for scalar in value.into_items() {
            cx.fact.append(&field, scalar)?;
        }
        Ok(Value::boolean(true))
    }
}
