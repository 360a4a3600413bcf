//! Static simplification
//!
//! Rewrites a term into an equivalent, cheaper one without looking at any
//! fact. Operands are simplified first, then the rule for the term's own
//! operator, if it has one, is applied. Folded sub-expressions become
//! `(const x)` terms. Applying [`Engine::simplify`] twice gives the same
//! result as applying it once. Sub-terms nested deeper than the engine's
//! `max_depth` are left as they are.

use crate::engine::Engine;
use crate::fact::EmptyFact;
use factq_term::{Builtin, Operand, Scalar, Term, Value};

type Rule = fn(&Engine, Term) -> Term;

/// The rewrite rule of a built-in, if it has one
fn rule_for(builtin: Builtin) -> Option<Rule> {
    match builtin {
        Builtin::And => Some(simplify_and),
        Builtin::Or => Some(simplify_or),
        Builtin::Not => Some(simplify_not),
        Builtin::Either => Some(simplify_either),
        Builtin::Eq
        | Builtin::Ne
        | Builtin::Lt
        | Builtin::Le
        | Builtin::Gt
        | Builtin::Ge
        | Builtin::Add
        | Builtin::Sub
        | Builtin::Mul
        | Builtin::Div => Some(simplify_constant_operands),
        _ => None,
    }
}

impl Engine {
    /// Simplified copy of `term`, with no recorded state
    pub fn simplify(&self, term: &Term) -> Term {
        self.simplify_at(term, 0)
    }

    fn simplify_at(&self, term: &Term, depth: usize) -> Term {
        // Registration bodies are data, not expressions to rewrite
        if depth > self.config().max_depth || term.operator().as_builtin() == Some(Builtin::Defn) {
            return term.fresh();
        }
        let rebuilt = Term::with_operator(
            term.operator().clone(),
            term.operands().iter().map(|op| match op {
                Operand::Term(t) => Operand::from(self.simplify_at(t, depth + 1)),
                other => other.clone(),
            }),
        );

        match rebuilt.operator().as_builtin() {
            Some(builtin) => match rule_for(builtin) {
                Some(rule) => rule(self, rebuilt),
                None => rebuilt,
            },
            None => {
                let hook = self
                    .registry()
                    .read()
                    .lookup(rebuilt.name())
                    .and_then(|def| def.simplify.clone());
                match hook.and_then(|hook| hook(&rebuilt)) {
                    Some(replacement) => replacement,
                    None => rebuilt,
                }
            }
        }
    }
}

fn truthy(scalar: &Scalar) -> bool {
    scalar.as_boolean().unwrap_or(true)
}

/// No stateful operator, side effect or custom operator anywhere inside
fn is_pure(operand: &Operand) -> bool {
    let Operand::Term(term) = operand else {
        return true;
    };
    let mut pure = true;
    term.walk(&mut |t| {
        pure &= t
            .operator()
            .as_builtin()
            .is_some_and(|b| !b.is_stateful() && !b.has_side_effects());
    });
    pure
}

fn simplify_and(_: &Engine, term: Term) -> Term {
    simplify_junction(term, false)
}

fn simplify_or(_: &Engine, term: Term) -> Term {
    simplify_junction(term, true)
}

/// `and` (absorbing `false`) and `or` (absorbing `true`): drop neutral
/// constants and everything after an absorbing one. Operands before the
/// absorbing constant still run unless they are pure.
fn simplify_junction(term: Term, absorbing: bool) -> Term {
    if term.arity() == 0 {
        return term;
    }
    let mut kept: Vec<Operand> = Vec::new();
    for operand in term.operands() {
        match operand.constant().map(truthy) {
            Some(t) if t != absorbing => {}
            Some(_) => {
                if kept.iter().all(is_pure) {
                    return Term::constant_of(absorbing);
                }
                kept.push(operand.clone());
                return Term::with_operator(term.operator().clone(), kept);
            }
            None => kept.push(operand.clone()),
        }
    }
    if kept.is_empty() {
        return Term::constant_of(!absorbing);
    }
    if kept.len() == term.arity() {
        return term;
    }
    Term::with_operator(term.operator().clone(), kept)
}

fn simplify_not(_: &Engine, term: Term) -> Term {
    match (term.arity(), term.operand(0).and_then(Operand::constant)) {
        (1, Some(value)) => Term::constant_of(!truthy(value)),
        _ => term,
    }
}

/// A constant first operand is never nil, so the fallback never runs
fn simplify_either(_: &Engine, term: Term) -> Term {
    match (term.arity(), term.operand(0).and_then(Operand::constant)) {
        (2, Some(value)) => Term::constant_of(value.clone()),
        _ => term,
    }
}

/// Comparison or arithmetic over constants only: compute it now. Failures
/// are left for evaluation to report.
fn simplify_constant_operands(engine: &Engine, term: Term) -> Term {
    if term.arity() != 2 || term.operands().iter().any(|op| op.constant().is_none()) {
        return term;
    }
    let mut probe = Term::with_operator(
        term.operator().clone(),
        term.operands()
            .iter()
            .filter_map(|op| op.constant().cloned().map(Operand::Literal)),
    );
    match engine.evaluate(&mut probe, &mut EmptyFact, &[]) {
        Ok(Value::Scalar(value)) => Term::constant_of(value),
        _ => term,
    }
}
