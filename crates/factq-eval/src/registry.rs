//! Operator registry
//!
//! The registry records which built-in families are hosted and which custom
//! operators are defined. Built-ins are always dispatched by the engine's
//! `match`; the registry only decides whether a family is available. Custom
//! operators live here as a structural body (a term with `$n` placeholders) or
//! a host callback.
//!
//! One registry is process-wide. Defining or removing an operator through it
//! affects every engine that shares it, including engines on other threads.

use crate::error::{EvalError, EvalResult, Expected};
use crate::fact::{Fact, Row};
use factq_term::{Builtin, Family, Term, Value};
use indexmap::IndexMap;
use once_cell::sync::Lazy;
use parking_lot::RwLock;
use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

/// Host callback implementing a custom operator.
///
/// Receives the resolved value of every operand, the fact and the rows.
pub type NativeOpFn = Arc<dyn Fn(&[Value], &dyn Fact, &[Row]) -> EvalResult<Value> + Send + Sync>;

/// Static rewrite hook for a custom operator; `None` keeps the term
pub type SimplifyFn = Arc<dyn Fn(&Term) -> Option<Term> + Send + Sync>;

/// A registry shared between engines
pub type SharedRegistry = Arc<RwLock<OperatorRegistry>>;

static GLOBAL_REGISTRY: Lazy<SharedRegistry> =
    Lazy::new(|| Arc::new(RwLock::new(OperatorRegistry::with_standard_families())));

/// Definitions are numbered so expansions cached on term instances can tell
/// when the definition behind them was replaced.
static NEXT_GENERATION: AtomicU64 = AtomicU64::new(1);

/// The process-wide registry
pub fn global_registry() -> SharedRegistry {
    Arc::clone(&GLOBAL_REGISTRY)
}

/// Define a custom operator in the process-wide registry
pub fn register_operator(def: OperatorDef) -> EvalResult<()> {
    GLOBAL_REGISTRY.write().define(def)
}

/// Remove a custom operator from the process-wide registry.
///
/// Returns whether a definition was removed.
pub fn unregister_operator(name: &str) -> EvalResult<bool> {
    GLOBAL_REGISTRY.write().undefine(name)
}

/// A group of built-in operators hosted together
pub trait OperatorFamily: Send + Sync {
    fn family(&self) -> Family;

    /// Operators this family contributes
    fn operators(&self) -> Vec<Builtin> {
        Builtin::ALL
            .iter()
            .copied()
            .filter(|b| b.family() == self.family())
            .collect()
    }
}

/// Existence, selection, cardinality, mutation, matching, aggregation,
/// registration and diagnostics
#[derive(Debug, Clone, Copy, Default)]
pub struct CoreOperators;

impl OperatorFamily for CoreOperators {
    fn family(&self) -> Family {
        Family::Core
    }
}

/// Comparison and arithmetic
#[derive(Debug, Clone, Copy, Default)]
pub struct ComparisonOperators;

impl OperatorFamily for ComparisonOperators {
    fn family(&self) -> Family {
        Family::Comparison
    }
}

/// `and`, `or`, `not`
#[derive(Debug, Clone, Copy, Default)]
pub struct LogicalOperators;

impl OperatorFamily for LogicalOperators {
    fn family(&self) -> Family {
        Family::Logical
    }
}

/// Behavior of a custom operator
#[derive(Clone)]
pub enum OperatorBody {
    /// A term evaluated in place of the invoking term, `$n` standing for the
    /// invoking term's n-th operand
    Expression(Term),
    /// A host callback
    Native(NativeOpFn),
}

impl fmt::Debug for OperatorBody {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Expression(body) => write!(f, "Expression({})", body),
            Self::Native(_) => f.write_str("Native(..)"),
        }
    }
}

/// A custom operator definition
#[derive(Clone)]
pub struct OperatorDef {
    pub name: String,
    pub body: OperatorBody,
    pub arity: Expected,
    pub simplify: Option<SimplifyFn>,
    generation: u64,
}

impl OperatorDef {
    /// Operator defined by a term body.
    ///
    /// The arity is one more than the highest `$n` placeholder in the body.
    pub fn expression(name: impl Into<String>, body: Term) -> Self {
        let arity = Expected::Exactly(body.max_arg().map_or(0, |n| n + 1));
        Self::new(name, OperatorBody::Expression(body.fresh()), arity)
    }

    /// Operator implemented by a host callback
    pub fn native<F>(name: impl Into<String>, arity: Expected, callback: F) -> Self
    where
        F: Fn(&[Value], &dyn Fact, &[Row]) -> EvalResult<Value> + Send + Sync + 'static,
    {
        Self::new(name, OperatorBody::Native(Arc::new(callback)), arity)
    }

    fn new(name: impl Into<String>, body: OperatorBody, arity: Expected) -> Self {
        Self {
            name: name.into(),
            body,
            arity,
            simplify: None,
            generation: 0,
        }
    }

    /// Attach a static rewrite hook
    pub fn with_simplify<F>(mut self, hook: F) -> Self
    where
        F: Fn(&Term) -> Option<Term> + Send + Sync + 'static,
    {
        self.simplify = Some(Arc::new(hook));
        self
    }

    /// Identifies this definition among every definition ever registered
    pub fn generation(&self) -> u64 {
        self.generation
    }
}

impl fmt::Debug for OperatorDef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("OperatorDef")
            .field("name", &self.name)
            .field("body", &self.body)
            .field("arity", &self.arity)
            .field("simplify", &self.simplify.is_some())
            .field("generation", &self.generation)
            .finish()
    }
}

/// Hosted built-in families and custom operator definitions
#[derive(Default)]
pub struct OperatorRegistry {
    hosted: IndexMap<&'static str, Builtin>,
    custom: IndexMap<String, Arc<OperatorDef>>,
}

impl OperatorRegistry {
    /// Create an empty registry hosting no operators at all
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a registry hosting the core, comparison and logical families
    pub fn with_standard_families() -> Self {
        let mut registry = Self::new();
        registry.install(&CoreOperators);
        registry.install(&ComparisonOperators);
        registry.install(&LogicalOperators);
        registry
    }

    /// Host every operator of a family
    pub fn install(&mut self, family: &dyn OperatorFamily) {
        for builtin in family.operators() {
            self.hosted.insert(builtin.name(), builtin);
        }
    }

    /// Whether a built-in is available
    pub fn hosts(&self, builtin: Builtin) -> bool {
        self.hosted.contains_key(builtin.name())
    }

    /// Hosted built-ins, in installation order
    pub fn builtins(&self) -> impl Iterator<Item = Builtin> + '_ {
        self.hosted.values().copied()
    }

    /// Defined custom operator names, in definition order
    pub fn custom_names(&self) -> impl Iterator<Item = &str> {
        self.custom.keys().map(String::as_str)
    }

    pub fn lookup(&self, name: &str) -> Option<Arc<OperatorDef>> {
        self.custom.get(name).cloned()
    }

    pub fn is_defined(&self, name: &str) -> bool {
        self.custom.contains_key(name)
    }

    /// Define a new custom operator
    pub fn define(&mut self, def: OperatorDef) -> EvalResult<()> {
        Self::check_name(&def.name)?;
        if self.custom.contains_key(&def.name) {
            return Err(EvalError::DuplicateOperator { name: def.name });
        }
        self.insert(def);
        Ok(())
    }

    /// Define a custom operator, replacing any earlier definition of the name
    pub fn redefine(&mut self, def: OperatorDef) -> EvalResult<Option<Arc<OperatorDef>>> {
        Self::check_name(&def.name)?;
        Ok(self.insert(def))
    }

    /// Remove a custom operator. Removing a name that is not defined is not
    /// an error; built-ins cannot be removed.
    pub fn undefine(&mut self, name: &str) -> EvalResult<bool> {
        if Builtin::from_name(name).is_some() {
            return Err(EvalError::ReservedOperator {
                name: name.to_string(),
            });
        }
        let removed = self.custom.shift_remove(name).is_some();
        if removed {
            log::debug!("undefined operator {}", name);
        }
        Ok(removed)
    }

    fn check_name(name: &str) -> EvalResult<()> {
        let well_formed =
            !name.is_empty() && name.chars().all(|c| c.is_ascii_lowercase() || c == '_');
        if !well_formed {
            return Err(EvalError::InvalidOperatorName {
                name: name.to_string(),
            });
        }
        if Builtin::from_name(name).is_some() {
            return Err(EvalError::ReservedOperator {
                name: name.to_string(),
            });
        }
        Ok(())
    }

    fn insert(&mut self, mut def: OperatorDef) -> Option<Arc<OperatorDef>> {
        def.generation = NEXT_GENERATION.fetch_add(1, Ordering::Relaxed);
        log::debug!(
            "defined operator {} ({:?}, arity {})",
            def.name,
            def.body,
            def.arity
        );
        self.custom.insert(def.name.clone(), Arc::new(def))
    }
}

impl fmt::Debug for OperatorRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("OperatorRegistry")
            .field("hosted", &self.hosted.len())
            .field("custom", &self.custom.keys().collect::<Vec<_>>())
            .finish()
    }
}
