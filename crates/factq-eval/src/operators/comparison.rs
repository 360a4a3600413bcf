//! Comparison operators
//!
//! Implements: eq, ne, lt, le, gt, ge
//!
//! Comparisons are existential over sequences: `(eq tags 'red')` holds when
//! any value of `tags` equals `'red'`. A nil side makes every comparison
//! false. Integers and floats compare numerically; ordering values of
//! unrelated kinds is a type error.

use super::assert_args;
use crate::context::Scope;
use crate::engine::Engine;
use crate::error::{EvalError, EvalResult, Expected};
use factq_term::{Scalar, Term, Value};
use std::cmp::Ordering;

/// The comparison a term asks for
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ComparisonOp {
    Eq,
    Ne,
    Lt,
    Le,
    Gt,
    Ge,
}

impl ComparisonOp {
    fn accepts(self, order: Ordering) -> bool {
        match self {
            Self::Eq => order.is_eq(),
            Self::Ne => order.is_ne(),
            Self::Lt => order.is_lt(),
            Self::Le => order.is_le(),
            Self::Gt => order.is_gt(),
            Self::Ge => order.is_ge(),
        }
    }
}

/// Whether `op` holds between two scalars
pub fn compare_scalars(op: ComparisonOp, left: &Scalar, right: &Scalar) -> EvalResult<bool> {
    match op {
        ComparisonOp::Eq => Ok(left.loosely_equals(right)),
        ComparisonOp::Ne => Ok(!left.loosely_equals(right)),
        _ => left
            .compare(right)
            .map(|order| op.accepts(order))
            .ok_or_else(|| EvalError::type_mismatch(left.type_name(), right.type_name())),
    }
}

impl Engine {
    pub(crate) fn eval_comparison(&self, op: ComparisonOp, term: &mut Term, cx: &mut Scope<'_>) -> EvalResult<Value> {
        assert_args(term, Expected::Exactly(2))?;
        let left = self.resolve(term, 0, cx)?;
        let right = self.resolve(term, 1, cx)?;
        if left.is_nil() || right.is_nil() {
            return Ok(Value::boolean(false));
        }

        // `ne` is the negation of `eq`, not "some pair differs"
        if op == ComparisonOp::Ne {
            let equal = any_pair(&left, &right, ComparisonOp::Eq)?;
            return Ok(Value::boolean(!equal));
        }
        Ok(Value::boolean(any_pair(&left, &right, op)?))
    }
}

fn any_pair(left: &Value, right: &Value, op: ComparisonOp) -> EvalResult<bool> {
    for l in left.iter() {
        for r in right.iter() {
            if compare_scalars(op, l, r)? {
                return Ok(true);
            }
        }
    }
    Ok(false)
}
