//! Regular expression matching
//!
//! Implements: matches

use super::{assert_args, single};
use crate::context::Scope;
use crate::engine::Engine;
use crate::error::{EvalError, EvalResult, Expected};
use factq_term::{Pattern, Scalar, Term, TermState, Value};

impl Engine {
    /// `(matches subject pattern)`
    ///
    /// False when either side is nil; more than one value on either side is
    /// an error. The pattern is a regex literal or a string, which is compiled
    /// once and reused while it stays the same.
    pub(crate) fn eval_matches(&self, term: &mut Term, cx: &mut Scope<'_>) -> EvalResult<Value> {
        assert_args(term, Expected::Exactly(2))?;
        let subject = self.resolve(term, 0, cx)?;
        let pattern = self.resolve(term, 1, cx)?;
        let (Some(subject), Some(pattern)) = (single("matches", &subject)?, single("matches", &pattern)?)
        else {
            return Ok(Value::boolean(false));
        };

        let text = subject
            .as_str()
            .ok_or_else(|| EvalError::type_mismatch("string", subject.type_name()))?;
        let compiled = match pattern {
            Scalar::Regex(p) => p.clone(),
            Scalar::String(source) => cached_pattern(term.state_mut(), source)?,
            other => return Err(EvalError::type_mismatch("regex", other.type_name())),
        };
        Ok(Value::boolean(compiled.is_match(text)))
    }
}

fn cached_pattern(state: &mut TermState, source: &str) -> EvalResult<Pattern> {
    if let Some(cached) = state.pattern() {
        if cached.as_str() == source {
            return Ok(cached.clone());
        }
    }
    let compiled = Pattern::new(source).map_err(|e| EvalError::InvalidPattern {
        pattern: source.to_string(),
        message: e.to_string(),
    })?;
    state.set_pattern(compiled.clone());
    Ok(compiled)
}
