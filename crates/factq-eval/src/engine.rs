//! factq evaluation engine
//!
//! [`Engine`] evaluates a term against one fact and the `maps` rows. Built-in
//! operators are dispatched by a single `match`; any other name is looked up
//! in the registry.

use crate::config::EngineConfig;
use crate::context::Scope;
use crate::error::{CallContext, EvalError, EvalResult};
use crate::fact::{Fact, Row};
use crate::operators::{ArithmeticOp, ComparisonOp};
use crate::registry::{global_registry, OperatorBody, OperatorDef, OperatorRegistry, SharedRegistry};
use factq_term::{Builtin, Operand, Term, Value};
use parking_lot::RwLock;
use std::sync::Arc;

/// The predicate evaluation engine
///
/// Cloning an engine shares its registry.
#[derive(Debug, Clone)]
pub struct Engine {
    /// Hosted families and custom operators
    registry: SharedRegistry,
    config: EngineConfig,
}

impl Default for Engine {
    fn default() -> Self {
        Self::new()
    }
}

impl Engine {
    /// Create an engine over the process-wide registry
    pub fn new() -> Self {
        Self::with_registry(global_registry())
    }

    /// Create an engine with a private registry hosting the standard families.
    ///
    /// Definitions made through it are invisible to every other engine.
    pub fn isolated() -> Self {
        Self::with_registry(Arc::new(RwLock::new(
            OperatorRegistry::with_standard_families(),
        )))
    }

    /// Create an engine over the given registry
    pub fn with_registry(registry: SharedRegistry) -> Self {
        Self {
            registry,
            config: EngineConfig::default(),
        }
    }

    /// Replace the configuration
    pub fn with_config(mut self, config: EngineConfig) -> Self {
        self.config = config;
        self
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    pub fn registry(&self) -> &SharedRegistry {
        &self.registry
    }

    /// Define a custom operator
    pub fn register(&self, def: OperatorDef) -> EvalResult<()> {
        self.registry.write().define(def)
    }

    /// Remove a custom operator; returns whether one was removed
    pub fn unregister(&self, name: &str) -> EvalResult<bool> {
        self.registry.write().undefine(name)
    }

    /// Evaluate `term` against `fact` with `maps` as the aggregation rows.
    ///
    /// Stateful operators keep their state on `term`, so pass the same
    /// instance for every fact of a scan.
    pub fn evaluate(&self, term: &mut Term, fact: &mut dyn Fact, maps: &[Row]) -> EvalResult<Value> {
        let mut scope = Scope::new(fact, maps, 0);
        self.eval(term, &mut scope)
    }

    /// Evaluate one term instance against each fact in turn
    pub fn scan<F: Fact>(&self, term: &mut Term, facts: &mut [F], maps: &[Row]) -> EvalResult<Vec<Value>> {
        facts
            .iter_mut()
            .map(|fact| self.evaluate(term, fact, maps))
            .collect()
    }

    /// Main dispatcher
    pub(crate) fn eval(&self, term: &mut Term, cx: &mut Scope<'_>) -> EvalResult<Value> {
        if cx.depth > self.config.max_depth {
            return Err(EvalError::RecursionLimit {
                limit: self.config.max_depth,
            });
        }
        log::trace!(target: "factq::eval", "{:indent$}{}", "", term, indent = cx.depth * 2);

        let outcome = match term.operator().as_builtin() {
            Some(builtin) => {
                if !self.registry.read().hosts(builtin) {
                    return Err(unknown_operator(term));
                }
                self.dispatch(builtin, term, cx)
            }
            None => {
                // The lock is released before the body runs
                let def = self.registry.read().lookup(term.name());
                match def {
                    Some(def) => self.invoke_custom(&def, term, cx),
                    None => return Err(unknown_operator(term)),
                }
            }
        };

        outcome.map_err(|error| {
            let rendered = term.to_string();
            if error.concerns(&rendered) {
                return error;
            }
            EvalError::Evaluation {
                term: rendered,
                context: CallContext {
                    depth: cx.depth,
                    operator: term.name().to_string(),
                    rows: cx.maps.len(),
                },
                source: Box::new(error),
            }
        })
    }

    fn dispatch(&self, builtin: Builtin, term: &mut Term, cx: &mut Scope<'_>) -> EvalResult<Value> {
        match builtin {
            // === Existence ===
            Builtin::Exists => self.eval_exists(term, cx),
            Builtin::Absent => self.eval_absent(term, cx),
            Builtin::Nil => self.eval_nil(term, cx),
            Builtin::Either => self.eval_either(term, cx),

            // === Selection and cardinality ===
            Builtin::At => self.eval_at(term, cx),
            Builtin::Many => self.eval_many(term, cx),
            Builtin::One => self.eval_one(term, cx),
            Builtin::Size => self.eval_size(term, cx),
            Builtin::Type => self.eval_type(term, cx),
            Builtin::Const => self.eval_const(term),

            // === Stateful ===
            Builtin::Prev => self.eval_prev(term, cx),
            Builtin::Unique => self.eval_unique(term, cx),

            // === Mutation ===
            Builtin::As => self.eval_as(term, cx),

            // === Pattern matching ===
            Builtin::Matches => self.eval_matches(term, cx),

            // === Registration ===
            Builtin::Defn => self.eval_defn(term),
            Builtin::Undef => self.eval_undef(term),

            // === Aggregation ===
            Builtin::Min => self.eval_min(term, cx),
            Builtin::Max => self.eval_max(term, cx),
            Builtin::Count => self.eval_count(term, cx),
            Builtin::Nth => self.eval_nth(term, cx),
            Builtin::First => self.eval_first(term, cx),
            Builtin::Sum => self.eval_sum(term, cx),
            Builtin::Agg => self.eval_agg(term, cx),

            // === Diagnostics ===
            Builtin::Traced => self.eval_traced(term, cx),

            // === Comparison ===
            Builtin::Eq => self.eval_comparison(ComparisonOp::Eq, term, cx),
            Builtin::Ne => self.eval_comparison(ComparisonOp::Ne, term, cx),
            Builtin::Lt => self.eval_comparison(ComparisonOp::Lt, term, cx),
            Builtin::Le => self.eval_comparison(ComparisonOp::Le, term, cx),
            Builtin::Gt => self.eval_comparison(ComparisonOp::Gt, term, cx),
            Builtin::Ge => self.eval_comparison(ComparisonOp::Ge, term, cx),

            // === Arithmetic ===
            Builtin::Add => self.eval_arithmetic(ArithmeticOp::Add, term, cx),
            Builtin::Sub => self.eval_arithmetic(ArithmeticOp::Sub, term, cx),
            Builtin::Mul => self.eval_arithmetic(ArithmeticOp::Mul, term, cx),
            Builtin::Div => self.eval_arithmetic(ArithmeticOp::Div, term, cx),

            // === Logical ===
            Builtin::And => self.eval_and(term, cx),
            Builtin::Or => self.eval_or(term, cx),
            Builtin::Not => self.eval_not(term, cx),
        }
    }

    /// Run a custom operator.
    ///
    /// A structural body is expanded with this term's operands once and kept
    /// on the term, so `prev` or `unique` inside the body see the whole scan.
    fn invoke_custom(&self, def: &OperatorDef, term: &mut Term, cx: &mut Scope<'_>) -> EvalResult<Value> {
        crate::operators::assert_args(term, def.arity)?;
        match &def.body {
            OperatorBody::Expression(body) => {
                let (operands, state) = term.parts_mut();
                let expanded = state.expansion_or_install(def.generation(), || {
                    log::debug!("expanding {} with {} operands", def.name, operands.len());
                    body.instantiate(&*operands)
                });
                self.eval_child(expanded, cx)
            }
            OperatorBody::Native(callback) => {
                let mut args = Vec::with_capacity(term.arity());
                for position in 0..term.arity() {
                    args.push(self.resolve(term, position, cx)?);
                }
                callback(&args, &*cx.fact, cx.maps)
            }
        }
    }

    /// Evaluate a nested term one level deeper, against the same fact and rows
    pub(crate) fn eval_child(&self, child: &mut Term, cx: &mut Scope<'_>) -> EvalResult<Value> {
        let mut scope = Scope::new(&mut *cx.fact, cx.maps, cx.depth + 1);
        self.eval(child, &mut scope)
    }

    /// Value resolution: a nested term is evaluated, a field is looked up and
    /// a literal passes through. The result is `Nil` or a sequence.
    pub(crate) fn resolve(&self, term: &mut Term, position: usize, cx: &mut Scope<'_>) -> EvalResult<Value> {
        if let Some(child) = term.subterm_mut(position) {
            return Ok(self.eval_child(child, cx)?.normalized());
        }
        let value = match term.operand(position) {
            Some(Operand::Literal(scalar)) => Value::Scalar(scalar.clone()),
            Some(Operand::Field(name)) => cx.fact.get(name),
            _ => return Err(crate::operators::operand_type(term, position, "value")),
        };
        Ok(value.normalized())
    }
}

fn unknown_operator(term: &Term) -> EvalError {
    EvalError::UnknownOperator {
        operator: term.name().to_string(),
        term: term.to_string(),
    }
}

/// Evaluation and simplification as methods on [`Term`], using the
/// process-wide registry
pub trait TermExt {
    /// Evaluate against a fact and rows
    fn evaluate(&mut self, fact: &mut dyn Fact, maps: &[Row]) -> EvalResult<Value>;

    /// Statically rewritten copy of the term
    fn simplify(&self) -> Term;
}

impl TermExt for Term {
    fn evaluate(&mut self, fact: &mut dyn Fact, maps: &[Row]) -> EvalResult<Value> {
        Engine::new().evaluate(self, fact, maps)
    }

    fn simplify(&self) -> Term {
        Engine::new().simplify(self)
    }
}
