//! Aggregate operators over the `maps` rows
//!
//! Implements: min, max, count, nth, first, sum, agg
//!
//! Multi-valued row entries are flattened, so a row holding `[1, 2]` for a
//! field contributes both values.

use super::arithmetic::{apply, ArithmeticOp};
use super::{assert_args, field_name, integer, nested_mut, single};
use crate::context::Scope;
use crate::engine::Engine;
use crate::error::{EvalError, EvalResult, Expected};
use crate::fact::{EmptyFact, Row};
use crate::view::CompositeView;
use factq_term::{Scalar, Term, Value};
use std::cmp::Ordering;

/// Every value of `field` across the rows, in row order
fn field_values<'r>(maps: &'r [Row], field: &'r str) -> impl Iterator<Item = &'r Scalar> + 'r {
    maps.iter()
        .filter_map(move |row| row.get(field))
        .flat_map(Value::iter)
}

impl Engine {
    /// `(min field)`: nil when no row has a value
    pub(crate) fn eval_min(&self, term: &mut Term, cx: &mut Scope<'_>) -> EvalResult<Value> {
        extremum(term, cx.maps, Ordering::Less)
    }

    /// `(max field)`: nil when no row has a value
    pub(crate) fn eval_max(&self, term: &mut Term, cx: &mut Scope<'_>) -> EvalResult<Value> {
        extremum(term, cx.maps, Ordering::Greater)
    }

    /// `(count)` counts the rows; `(count field)` the rows where `field` is present
    pub(crate) fn eval_count(&self, term: &mut Term, cx: &mut Scope<'_>) -> EvalResult<Value> {
        assert_args(term, Expected::Between(0, 1))?;
        let rows = if term.arity() == 0 {
            cx.maps.len()
        } else {
            let field = field_name(term, 0)?;
            cx.maps
                .iter()
                .filter(|row| row.get(field).is_some_and(|v| !v.is_nil()))
                .count()
        };
        Ok(Value::Scalar(Scalar::Integer(rows as i64)))
    }

    /// `(nth index field)`: `field` of the row at `index`.
    ///
    /// An index outside the rows is an error, not nil.
    pub(crate) fn eval_nth(&self, term: &mut Term, cx: &mut Scope<'_>) -> EvalResult<Value> {
        assert_args(term, Expected::Exactly(2))?;
        let index = self.resolve(term, 0, cx)?;
        let index = match single("nth", &index)? {
            Some(scalar) => integer(scalar)?,
            None => return Err(EvalError::type_mismatch("integer", "nil")),
        };
        let field = field_name(term, 1)?;

        let row = usize::try_from(index)
            .ok()
            .and_then(|i| cx.maps.get(i))
            .ok_or(EvalError::IndexOutOfBounds {
                index,
                length: cx.maps.len(),
            })?;
        Ok(row.get(field).cloned().unwrap_or_default())
    }

    /// `(first field)`: `field` of the first row, nil without rows
    pub(crate) fn eval_first(&self, term: &mut Term, cx: &mut Scope<'_>) -> EvalResult<Value> {
        assert_args(term, Expected::Exactly(1))?;
        let field = field_name(term, 0)?;
        Ok(cx
            .maps
            .first()
            .and_then(|row| row.get(field))
            .cloned()
            .unwrap_or_default())
    }

    /// `(sum field ...)`: numeric total over every listed field, starting at 0
    pub(crate) fn eval_sum(&self, term: &mut Term, cx: &mut Scope<'_>) -> EvalResult<Value> {
        assert_args(term, Expected::AtLeast(1))?;
        let mut total = Scalar::Integer(0);
        for position in 0..term.arity() {
            let field = field_name(term, position)?;
            for value in field_values(cx.maps, field) {
                if !value.is_numeric() {
                    return Err(EvalError::type_mismatch("number", value.type_name()));
                }
                total = apply(ArithmeticOp::Add, &total, value)?;
            }
        }
        Ok(Value::Scalar(total))
    }

    /// `(agg selector value)`
    ///
    /// Keeps the rows for which `selector` is true when evaluated against the
    /// row overlaid on the outer fact, then evaluates `value` with those rows
    /// as `maps` and an empty outer fact.
    pub(crate) fn eval_agg(&self, term: &mut Term, cx: &mut Scope<'_>) -> EvalResult<Value> {
        assert_args(term, Expected::Exactly(2))?;

        let selector = nested_mut(term, 0)?;
        let mut kept = Vec::new();
        for row in cx.maps {
            let mut view = CompositeView::new(row, &*cx.fact);
            let mut scope = Scope::new(&mut view, cx.maps, cx.depth + 1);
            if self.eval(selector, &mut scope)?.is_truthy() {
                kept.push(row.clone());
            }
        }
        log::trace!(
            target: "factq::eval",
            "agg kept {} of {} rows",
            kept.len(),
            cx.maps.len()
        );

        let value = nested_mut(term, 1)?;
        let mut outer = EmptyFact;
        let mut scope = Scope::new(&mut outer, &kept, cx.depth + 1);
        self.eval(value, &mut scope)
    }
}

fn extremum(term: &Term, maps: &[Row], wanted: Ordering) -> EvalResult<Value> {
    assert_args(term, Expected::Exactly(1))?;
    let field = field_name(term, 0)?;
    let mut best: Option<&Scalar> = None;
    for candidate in field_values(maps, field) {
        best = match best {
            None => Some(candidate),
            Some(current) => match candidate.compare(current) {
                Some(order) if order == wanted => Some(candidate),
                Some(_) => Some(current),
                None => {
                    return Err(EvalError::type_mismatch(
                        current.type_name(),
                        candidate.type_name(),
                    ))
                }
            },
        };
    }
    Ok(best.cloned().map_or(Value::Nil, Value::Scalar))
}
