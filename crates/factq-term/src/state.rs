//! Per-instance evaluation state
//!
//! `prev` and `unique` are generators over a sequence of calls, and a
//! structural custom operator keeps its expanded body between calls. That
//! state lives on the term instance that owns it, created lazily on first use
//! and scoped to the instance's lifetime. A fresh term starts over.
//!
//! Evaluation takes `&mut Term`, so one instance serves one scan at a time.
//! Sharing an instance between concurrent scans needs external locking.

use crate::{Pattern, Scalar, Term, Value};
use std::collections::HashSet;

/// The body of a custom operator instantiated for one invoking term
#[derive(Debug, Clone)]
pub struct Expansion {
    /// Generation of the registry definition this was expanded from
    pub generation: u64,
    /// The body with argument placeholders replaced by the invoking operands
    pub body: Term,
}

/// One state block; a term only ever holds the kind its operator uses.
#[derive(Debug, Clone)]
pub enum StateBlock {
    /// Value seen on the previous call (`prev`)
    Previous(Value),
    /// Values seen so far (`unique`); `None` stands for nil
    Seen(HashSet<Option<Scalar>>),
    /// Last compiled pattern (`matches`)
    Pattern(Pattern),
    /// Expanded custom operator body
    Expansion(Box<Expansion>),
}

/// Lazily created state owned by a term instance
#[derive(Debug, Clone, Default)]
pub struct TermState {
    block: Option<Box<StateBlock>>,
}

impl TermState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether any state has been recorded yet
    pub fn is_empty(&self) -> bool {
        self.block.is_none()
    }

    /// Drop all recorded state
    pub fn reset(&mut self) {
        self.block = None;
    }

    pub fn block(&self) -> Option<&StateBlock> {
        self.block.as_deref()
    }

    /// The value remembered by `prev`, starting at `Nil`
    pub fn previous_mut(&mut self) -> &mut Value {
        if !matches!(self.block(), Some(StateBlock::Previous(_))) {
            self.block = Some(Box::new(StateBlock::Previous(Value::Nil)));
        }
        match self.block.as_deref_mut() {
            Some(StateBlock::Previous(value)) => value,
            _ => unreachable!("previous-value block was just installed"),
        }
    }

    /// The set of values seen by `unique`, starting empty
    pub fn seen_mut(&mut self) -> &mut HashSet<Option<Scalar>> {
        if !matches!(self.block(), Some(StateBlock::Seen(_))) {
            self.block = Some(Box::new(StateBlock::Seen(HashSet::new())));
        }
        match self.block.as_deref_mut() {
            Some(StateBlock::Seen(seen)) => seen,
            _ => unreachable!("seen-set block was just installed"),
        }
    }

    /// The cached pattern, if one was compiled
    pub fn pattern(&self) -> Option<&Pattern> {
        match self.block() {
            Some(StateBlock::Pattern(p)) => Some(p),
            _ => None,
        }
    }

    pub fn set_pattern(&mut self, pattern: Pattern) {
        self.block = Some(Box::new(StateBlock::Pattern(pattern)));
    }

    /// The cached custom-operator expansion, if it matches `generation`
    pub fn expansion_mut(&mut self, generation: u64) -> Option<&mut Term> {
        match self.block.as_deref_mut() {
            Some(StateBlock::Expansion(e)) if e.generation == generation => Some(&mut e.body),
            _ => None,
        }
    }

    /// The expansion for `generation`, expanding the body again when the
    /// cached one is missing or stale
    pub fn expansion_or_install(&mut self, generation: u64, expand: impl FnOnce() -> Term) -> &mut Term {
        let current = matches!(
            self.block(),
            Some(StateBlock::Expansion(e)) if e.generation == generation
        );
        if !current {
            self.block = Some(Box::new(StateBlock::Expansion(Box::new(Expansion {
                generation,
                body: expand(),
            }))));
        }
        match self.block.as_deref_mut() {
            Some(StateBlock::Expansion(e)) => &mut e.body,
            _ => unreachable!("expansion block was just installed"),
        }
    }
}
