//! Stateful operator tests
//!
//! Tests for: prev, unique

use super::{boolean, int, term};
use factq_eval::{Engine, MemoryFact};
use factq_term::Value;
use pretty_assertions::assert_eq;

fn facts(field: &str, values: &[i64]) -> Vec<MemoryFact> {
    values
        .iter()
        .map(|v| MemoryFact::new().with(field, *v))
        .collect()
}

#[test]
fn test_prev_over_a_scan() {
    let engine = Engine::isolated();
    let mut prev = term("(prev a)");
    let results = engine.scan(&mut prev, &mut facts("a", &[10, 20, 30]), &[]).unwrap();
    assert_eq!(results, vec![Value::Nil, int(10), int(20)]);
}

#[test]
fn test_unique_over_a_scan() {
    let engine = Engine::isolated();
    let mut unique = term("(unique a)");
    let results = engine.scan(&mut unique, &mut facts("a", &[1, 1, 2]), &[]).unwrap();
    assert_eq!(results, vec![boolean(true), boolean(false), boolean(true)]);
}

#[test]
fn test_unique_nil_is_a_value() {
    let engine = Engine::isolated();
    let mut unique = term("(unique a)");
    let mut empty = vec![MemoryFact::new(), MemoryFact::new()];
    let results = engine.scan(&mut unique, &mut empty, &[]).unwrap();
    assert_eq!(results, vec![boolean(true), boolean(false)]);
}

#[test]
fn test_fresh_term_restarts_the_scan() {
    let engine = Engine::isolated();
    let mut unique = term("(unique a)");
    engine.scan(&mut unique, &mut facts("a", &[1, 2]), &[]).unwrap();

    let mut again = unique.fresh();
    let mut fact = MemoryFact::new().with("a", 1);
    assert_eq!(engine.evaluate(&mut again, &mut fact, &[]).unwrap(), boolean(true));
    assert_eq!(engine.evaluate(&mut unique, &mut fact, &[]).unwrap(), boolean(false));
}

#[test]
fn test_separate_instances_have_separate_state() {
    let engine = Engine::isolated();
    let mut first = term("(prev a)");
    let mut second = term("(prev a)");
    let mut fact = MemoryFact::new().with("a", 5);
    engine.evaluate(&mut first, &mut fact, &[]).unwrap();
    assert_eq!(engine.evaluate(&mut second, &mut fact, &[]).unwrap(), Value::Nil);
    assert_eq!(engine.evaluate(&mut first, &mut fact, &[]).unwrap(), int(5));
}

#[test]
fn test_nested_stateful_operand_keeps_state() {
    // The first fact has no previous value, and comparisons with nil are false
    let engine = Engine::isolated();
    let mut changed = term("(ne a (prev a))");
    let results = engine
        .scan(&mut changed, &mut facts("a", &[1, 1, 2]), &[])
        .unwrap();
    assert_eq!(results, vec![boolean(false), boolean(false), boolean(true)]);
}
