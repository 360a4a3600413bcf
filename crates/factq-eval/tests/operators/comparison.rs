//! Comparison and arithmetic tests
//!
//! Tests for: eq, ne, lt, le, gt, ge, add, sub, mul, div

use super::{boolean, eval, int, string};
use factq_eval::{EvalError, MemoryFact};
use factq_term::{Scalar, Value};
use pretty_assertions::assert_eq;
use rstest::rstest;

fn reading() -> MemoryFact {
    MemoryFact::new()
        .with("temp", 21)
        .with("ratio", 0.5)
        .with("label", "kitchen")
        .with("tags", "red")
        .with("tags", "blue")
}

#[rstest]
#[case("(eq temp 21)", true)]
#[case("(eq temp 21.0)", true)]
#[case("(ne temp 21)", false)]
#[case("(lt temp 30)", true)]
#[case("(le temp 21)", true)]
#[case("(gt ratio 0.25)", true)]
#[case("(ge ratio 1)", false)]
#[case("(eq label 'kitchen')", true)]
#[case("(lt label 'lounge')", true)]
#[case("(eq tags 'blue')", true)]
#[case("(ne tags 'blue')", false)]
#[case("(ne tags 'green')", true)]
#[case("(eq missing 1)", false)]
#[case("(ne missing 1)", false)]
#[case("(gt missing 1)", false)]
#[case("(lt 2024-01-01T00:00:00Z 2024-06-01T00:00:00Z)", true)]
fn test_comparisons(#[case] source: &str, #[case] expected: bool) {
    assert_eq!(eval(source, &mut reading()).unwrap(), boolean(expected));
}

#[test]
fn test_ordering_unrelated_kinds_is_an_error() {
    let error = eval("(lt label 3)", &mut reading()).unwrap_err();
    assert!(matches!(error.root_cause(), EvalError::TypeMismatch { .. }));
}

#[test]
fn test_equality_of_unrelated_kinds_is_false() {
    assert_eq!(eval("(eq label 3)", &mut reading()).unwrap(), boolean(false));
}

#[rstest]
#[case("(add temp 1)", int(22))]
#[case("(sub temp 30)", int(-9))]
#[case("(mul temp 2)", int(42))]
#[case("(div temp 4)", int(5))]
#[case("(add temp ratio)", Value::Scalar(Scalar::Float(21.5)))]
#[case("(add label '!')", string("kitchen!"))]
#[case("(add missing 1)", Value::Nil)]
#[case("(gt (add temp 1) 21)", boolean(true))]
fn test_arithmetic(#[case] source: &str, #[case] expected: Value) {
    assert_eq!(eval(source, &mut reading()).unwrap(), expected);
}

#[rstest]
#[case("(div temp 0)")]
#[case("(div ratio 0.0)")]
fn test_division_by_zero(#[case] source: &str) {
    let error = eval(source, &mut reading()).unwrap_err();
    assert!(matches!(error.root_cause(), EvalError::DivisionByZero));
}

#[test]
fn test_arithmetic_needs_single_values() {
    let error = eval("(add tags 1)", &mut reading()).unwrap_err();
    assert!(matches!(
        error.root_cause(),
        EvalError::Cardinality { found: 2, .. }
    ));
}

#[test]
fn test_integer_overflow() {
    let mut fact = MemoryFact::new().with("big", i64::MAX);
    let error = eval("(add big 1)", &mut fact).unwrap_err();
    assert!(matches!(error.root_cause(), EvalError::Overflow { .. }));
}
