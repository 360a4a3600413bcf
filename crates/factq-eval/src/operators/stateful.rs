//! Operators whose result depends on earlier calls on the same term
//!
//! Implements: prev, unique
//!
//! The state lives on the term instance (see [`factq_term::TermState`]), so a
//! scan must evaluate the same instance for every fact.

use super::assert_args;
use crate::context::Scope;
use crate::engine::Engine;
use crate::error::{EvalResult, Expected};
use factq_term::{Scalar, Term, Value};

impl Engine {
    /// `(prev x)`: the value `x` had on the previous call, nil on the first
    pub(crate) fn eval_prev(&self, term: &mut Term, cx: &mut Scope<'_>) -> EvalResult<Value> {
        assert_args(term, Expected::Exactly(1))?;
        let current = self.resolve(term, 0, cx)?.unwrap_singleton();
        Ok(std::mem::replace(term.state_mut().previous_mut(), current))
    }

    /// `(unique x)`: true when none of the values of `x` were seen by earlier
    /// calls. Every value is recorded; nil counts as a value of its own.
    pub(crate) fn eval_unique(&self, term: &mut Term, cx: &mut Scope<'_>) -> EvalResult<Value> {
        assert_args(term, Expected::Exactly(1))?;
        let value = self.resolve(term, 0, cx)?;
        let keys: Vec<Option<Scalar>> = match value {
            Value::Nil => vec![None],
            other => other.into_items().into_iter().map(Some).collect(),
        };

        let seen = term.state_mut().seen_mut();
        let fresh = keys.iter().all(|key| !seen.contains(key));
        seen.extend(keys);
        Ok(Value::boolean(fresh))
    }
}
