//! Implements: traced

use super::assert_args;
use crate::context::Scope;
use crate::engine::Engine;
use crate::error::{EvalResult, Expected};
use factq_term::{Term, Value};

impl Engine {
    /// `(traced x)`: evaluate `x`, log `term => result` and return the result
    pub(crate) fn eval_traced(&self, term: &mut Term, cx: &mut Scope<'_>) -> EvalResult<Value> {
        assert_args(term, Expected::Exactly(1))?;
        let result = match term.subterm_mut(0) {
            Some(inner) => self.eval_child(inner, cx)?,
            None => self.resolve(term, 0, cx)?.unwrap_singleton(),
        };
        let level = log::Level::from(self.config().trace_level);
        log::log!(target: "factq::trace", level, "{} => {}", term, result);
        Ok(result)
    }
}
