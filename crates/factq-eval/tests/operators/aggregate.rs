//! Aggregate operator tests
//!
//! Tests for: min, max, count, nth, first, sum, agg

use super::{eval_rows, int, rows, string, term};
use factq_eval::{Engine, EvalError, MemoryFact};
use factq_term::Value;
use pretty_assertions::assert_eq;
use rstest::rstest;
use serde_json::json;

fn people() -> Vec<factq_eval::Row> {
    rows(json!([
        {"name": "ann", "age": 34, "k": 1},
        {"name": "bob", "k": 2},
        {"name": "cy", "age": 19, "k": [3, 4]},
    ]))
}

#[rstest]
#[case("(count)", int(3))]
#[case("(count age)", int(2))]
#[case("(min age)", int(19))]
#[case("(max age)", int(34))]
#[case("(min k)", int(1))]
#[case("(max k)", int(4))]
#[case("(sum k)", int(10))]
#[case("(sum age k)", int(63))]
#[case("(first name)", string("ann"))]
#[case("(nth 1 name)", string("bob"))]
#[case("(nth 1 age)", Value::Nil)]
fn test_aggregates(#[case] source: &str, #[case] expected: Value) {
    assert_eq!(eval_rows(source, &people()).unwrap(), expected);
}

#[rstest]
#[case("(count)", int(0))]
#[case("(count age)", int(0))]
#[case("(first age)", Value::Nil)]
#[case("(sum age)", int(0))]
#[case("(min age)", Value::Nil)]
#[case("(max age)", Value::Nil)]
fn test_aggregates_over_no_rows(#[case] source: &str, #[case] expected: Value) {
    assert_eq!(eval_rows(source, &[]).unwrap(), expected);
}

#[test]
fn test_nth_outside_rows_is_an_error() {
    let error = eval_rows("(nth 0 age)", &[]).unwrap_err();
    assert!(matches!(
        error.root_cause(),
        EvalError::IndexOutOfBounds { index: 0, length: 0 }
    ));
}

#[test]
fn test_sum_rejects_strings() {
    let error = eval_rows("(sum name)", &people()).unwrap_err();
    assert!(matches!(error.root_cause(), EvalError::TypeMismatch { .. }));
}

#[test]
fn test_sum_promotes_to_float() {
    let maps = rows(json!([{"x": 1}, {"x": 0.5}]));
    assert_eq!(eval_rows("(sum x)", &maps).unwrap(), Value::from(factq_term::Scalar::Float(1.5)));
}

#[test]
fn test_agg_filters_then_aggregates() {
    let maps = rows(json!([{"k": 1}, {"k": 2}, {"k": 3}]));
    assert_eq!(eval_rows("(agg (gt k 1) (sum k))", &maps).unwrap(), int(5));
    assert_eq!(eval_rows("(agg (gt k 1) (count))", &maps).unwrap(), int(2));
    assert_eq!(eval_rows("(agg (gt k 5) (first k))", &maps).unwrap(), Value::Nil);
}

#[test]
fn test_agg_selector_sees_the_outer_fact() {
    let engine = Engine::isolated();
    let maps = rows(json!([{"k": 1}, {"k": 2}, {"k": 3}]));
    let mut fact = MemoryFact::new().with("floor", 2);
    let mut selected = term("(agg (ge k floor) (count))");
    assert_eq!(engine.evaluate(&mut selected, &mut fact, &maps).unwrap(), int(2));
}

#[test]
fn test_agg_row_shadows_the_fact() {
    let engine = Engine::isolated();
    let maps = rows(json!([{"k": 1}, {"k": 2}]));
    let mut fact = MemoryFact::new().with("k", 100);
    let mut selected = term("(agg (lt k 10) (sum k))");
    assert_eq!(engine.evaluate(&mut selected, &mut fact, &maps).unwrap(), int(3));
}

#[test]
fn test_agg_value_term_does_not_see_the_fact() {
    let engine = Engine::isolated();
    let maps = rows(json!([{"k": 1}]));
    let mut fact = MemoryFact::new().with("name", "ann");
    let mut selected = term("(agg (exists k) (exists name))");
    assert_eq!(
        engine.evaluate(&mut selected, &mut fact, &maps).unwrap(),
        Value::boolean(false)
    );
}

#[test]
fn test_agg_selector_cannot_write() {
    let maps = rows(json!([{"k": 1}]));
    let error = eval_rows("(agg (as k 5) (count))", &maps).unwrap_err();
    assert!(matches!(error.root_cause(), EvalError::ReadOnlyFact { .. }));
}
