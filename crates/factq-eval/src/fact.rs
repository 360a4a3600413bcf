//! Facts the engine reads from and writes to
//!
//! The engine consumes facts through the narrow [`Fact`] contract. Assignment
//! appends: a field's history only ever grows.

use crate::error::{EvalError, EvalResult};
use factq_term::{Scalar, Value};
use indexmap::IndexMap;
use parking_lot::Mutex;
use std::sync::Arc;

/// One row of the `maps` working set
pub type Row = IndexMap<String, Value>;

/// Read/write contract of a fact record
pub trait Fact {
    /// The field's value: `Nil` when absent, a scalar, or its history
    fn get(&self, field: &str) -> Value;

    /// Whether the field is present
    fn has(&self, field: &str) -> bool {
        !self.get(field).is_nil()
    }

    /// Grow the field's history by one value
    fn append(&mut self, field: &str, value: Scalar) -> EvalResult<()>;
}

/// A fact held in memory, field histories in insertion order
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MemoryFact {
    fields: IndexMap<String, Vec<Scalar>>,
}

impl MemoryFact {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style append
    pub fn with(mut self, field: impl Into<String>, value: impl Into<Scalar>) -> Self {
        self.fields.entry(field.into()).or_default().push(value.into());
        self
    }

    /// Recorded values of a field, oldest first
    pub fn history(&self, field: &str) -> &[Scalar] {
        self.fields.get(field).map(Vec::as_slice).unwrap_or_default()
    }

    pub fn field_names(&self) -> impl Iterator<Item = &str> {
        self.fields.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Flatten into a row, one entry per field
    pub fn to_row(&self) -> Row {
        self.fields
            .iter()
            .map(|(name, history)| (name.clone(), Value::from_history(history.clone())))
            .collect()
    }
}

impl Fact for MemoryFact {
    fn get(&self, field: &str) -> Value {
        Value::from_history(self.history(field).to_vec())
    }

    fn has(&self, field: &str) -> bool {
        !self.history(field).is_empty()
    }

    fn append(&mut self, field: &str, value: Scalar) -> EvalResult<()> {
        self.fields.entry(field.to_string()).or_default().push(value);
        Ok(())
    }
}

/// A fact shared between owners and guarded by its own lock.
///
/// Every `get` or `append` takes the lock for that one access only; nothing
/// holds it while sub-terms are evaluated.
#[derive(Debug, Clone, Default)]
pub struct SharedFact {
    inner: Arc<Mutex<MemoryFact>>,
}

impl SharedFact {
    pub fn new(fact: MemoryFact) -> Self {
        Self {
            inner: Arc::new(Mutex::new(fact)),
        }
    }

    /// Copy of the current contents
    pub fn snapshot(&self) -> MemoryFact {
        self.inner.lock().clone()
    }
}

impl Fact for SharedFact {
    fn get(&self, field: &str) -> Value {
        self.inner.lock().get(field)
    }

    fn has(&self, field: &str) -> bool {
        self.inner.lock().has(field)
    }

    fn append(&mut self, field: &str, value: Scalar) -> EvalResult<()> {
        self.inner.lock().append(field, value)
    }
}

/// The fact with no fields, seen by the value term of `agg`
#[derive(Debug, Clone, Copy, Default)]
pub struct EmptyFact;

impl Fact for EmptyFact {
    fn get(&self, _field: &str) -> Value {
        Value::Nil
    }

    fn has(&self, _field: &str) -> bool {
        false
    }

    fn append(&mut self, field: &str, _value: Scalar) -> EvalResult<()> {
        Err(EvalError::ReadOnlyFact {
            field: field.to_string(),
        })
    }
}

impl Fact for Row {
    fn get(&self, field: &str) -> Value {
        IndexMap::get(self, field).cloned().unwrap_or_default()
    }

    fn has(&self, field: &str) -> bool {
        IndexMap::get(self, field).is_some_and(|v| !v.is_nil())
    }

    fn append(&mut self, field: &str, value: Scalar) -> EvalResult<()> {
        let slot = self.entry(field.to_string()).or_default();
        let mut items = std::mem::take(slot).into_items();
        items.push(value);
        *slot = Value::from_history(items);
        Ok(())
    }
}
