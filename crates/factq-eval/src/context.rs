//! What one operator call evaluates against

use crate::fact::{Fact, Row};

/// The fact, rows and nesting depth of the term being evaluated
pub struct Scope<'a> {
    /// Fact fields are read from and `as` writes to
    pub fact: &'a mut dyn Fact,
    /// Working set for aggregate operators
    pub maps: &'a [Row],
    /// Nesting depth of the term being evaluated
    pub depth: usize,
}

impl<'a> Scope<'a> {
    pub fn new(fact: &'a mut dyn Fact, maps: &'a [Row], depth: usize) -> Self {
        Self { fact, maps, depth }
    }
}
