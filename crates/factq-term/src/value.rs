//! Evaluation values
//!
//! A field lookup yields nothing, one scalar, or the ordered history of
//! scalars appended to that field. [`Value`] makes those three shapes explicit
//! so operators match on them instead of probing for "is this a list".

use crate::Scalar;
use std::fmt;

/// The result of a field lookup or of evaluating a term.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum Value {
    /// Absent field, or an operator returning nothing
    #[default]
    Nil,
    /// Exactly one scalar
    Scalar(Scalar),
    /// An ordered sequence of scalars
    Sequence(Vec<Scalar>),
}

impl Value {
    /// Build a value from a field's append history.
    ///
    /// No entries yields `Nil`, one entry a bare scalar, more a sequence.
    pub fn from_history(mut items: Vec<Scalar>) -> Self {
        match items.len() {
            0 => Self::Nil,
            1 => Self::Scalar(items.remove(0)),
            _ => Self::Sequence(items),
        }
    }

    pub fn boolean(b: bool) -> Self {
        Self::Scalar(Scalar::Boolean(b))
    }

    pub fn is_nil(&self) -> bool {
        matches!(self, Self::Nil)
    }

    /// Normalize for operators: `Nil` stays `Nil`, a bare scalar becomes a
    /// one-element sequence, sequences pass through.
    pub fn normalized(self) -> Self {
        match self {
            Self::Nil => Self::Nil,
            Self::Scalar(s) => Self::Sequence(vec![s]),
            seq @ Self::Sequence(_) => seq,
        }
    }

    /// Unwrap a one-element sequence into a bare scalar
    pub fn unwrap_singleton(self) -> Self {
        match self {
            Self::Sequence(mut items) if items.len() == 1 => Self::Scalar(items.remove(0)),
            other => other,
        }
    }

    /// Number of scalars held: 0 for `Nil`, 1 for a scalar
    pub fn len(&self) -> usize {
        self.as_slice().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// View the held scalars as a slice
    pub fn as_slice(&self) -> &[Scalar] {
        match self {
            Self::Nil => &[],
            Self::Scalar(s) => std::slice::from_ref(s),
            Self::Sequence(items) => items,
        }
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Scalar> {
        self.as_slice().iter()
    }

    pub fn into_items(self) -> Vec<Scalar> {
        match self {
            Self::Nil => Vec::new(),
            Self::Scalar(s) => vec![s],
            Self::Sequence(items) => items,
        }
    }

    /// The held scalar when there is exactly one
    pub fn single(&self) -> Option<&Scalar> {
        match self.as_slice() {
            [s] => Some(s),
            _ => None,
        }
    }

    /// The held boolean when the value is exactly one boolean
    pub fn as_boolean(&self) -> Option<bool> {
        self.single().and_then(Scalar::as_boolean)
    }

    /// Dynamic type name: `nil`, the scalar kind, or `sequence`
    pub fn type_name(&self) -> &'static str {
        match self.as_slice() {
            [] if self.is_nil() => "nil",
            [s] => s.type_name(),
            _ => "sequence",
        }
    }

    /// Truthiness used by selectors and logical operators.
    ///
    /// `Nil`, `false`, `[false]` and `[]` are falsy; everything else is truthy.
    pub fn is_truthy(&self) -> bool {
        match self.as_slice() {
            [] => false,
            [Scalar::Boolean(b)] => *b,
            _ => true,
        }
    }
}

impl From<Scalar> for Value {
    fn from(s: Scalar) -> Self {
        Self::Scalar(s)
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Self::boolean(b)
    }
}

impl From<i64> for Value {
    fn from(i: i64) -> Self {
        Self::Scalar(Scalar::Integer(i))
    }
}

impl From<Vec<Scalar>> for Value {
    fn from(items: Vec<Scalar>) -> Self {
        Self::Sequence(items)
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Nil => f.write_str("nil"),
            Self::Scalar(s) => write!(f, "{}", s),
            Self::Sequence(items) => {
                f.write_str("[")?;
                for (i, item) in items.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{}", item)?;
                }
                f.write_str("]")
            }
        }
    }
}
