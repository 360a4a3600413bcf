//! Read-only overlay of an aggregation row on its outer fact

use crate::error::{EvalError, EvalResult};
use crate::fact::{Fact, Row};
use factq_term::{Scalar, Value};

/// A row merged with the outer fact for `agg` selectors.
///
/// Lookups check the row first and fall back to the outer fact when the row
/// lacks the field. Writes are refused.
pub struct CompositeView<'a> {
    row: &'a Row,
    outer: &'a dyn Fact,
}

impl<'a> CompositeView<'a> {
    pub fn new(row: &'a Row, outer: &'a dyn Fact) -> Self {
        Self { row, outer }
    }
}

impl Fact for CompositeView<'_> {
    fn get(&self, field: &str) -> Value {
        match self.row.get(field) {
            Some(value) if !value.is_nil() => value.clone(),
            _ => self.outer.get(field),
        }
    }

    fn has(&self, field: &str) -> bool {
        self.row.get(field).is_some_and(|v| !v.is_nil()) || self.outer.has(field)
    }

    fn append(&mut self, field: &str, _value: Scalar) -> EvalResult<()> {
        Err(EvalError::ReadOnlyFact {
            field: field.to_string(),
        })
    }
}
