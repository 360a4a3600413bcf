//! Diagnostic tests
//!
//! Error messages name the failing term in canonical form, and failures
//! inside operands carry the enclosing terms.

use super::eval;
use factq_eval::{CallContext, EvalError, MemoryFact};
use insta::assert_snapshot;

fn tagged() -> MemoryFact {
    MemoryFact::new().with("tags", "red").with("tags", "blue")
}

#[test]
fn test_operand_type_message() {
    let error = eval("(exists 42)", &mut MemoryFact::new()).unwrap_err();
    assert_snapshot!(error, @"Operand 0 of (exists 42) must be a field reference, found literal");
}

#[test]
fn test_unknown_operator_message() {
    let error = eval("(frobnicate x)", &mut MemoryFact::new()).unwrap_err();
    assert_snapshot!(error, @"Unknown operator 'frobnicate' in (frobnicate x)");
}

#[test]
fn test_arity_message() {
    let error = eval("(exists a b)", &mut MemoryFact::new()).unwrap_err();
    assert_snapshot!(error, @"Operator exists expects exactly 1 operands, found 2 in (exists a b)");
}

#[test]
fn test_nested_failure_message() {
    let error = eval("(not (at 5 tags))", &mut tagged()).unwrap_err();
    assert_snapshot!(
        error,
        @"Error evaluating (not (at 5 tags)): Error evaluating (at 5 tags): Index 5 out of bounds for length 2"
    );
}

#[test]
fn test_breadcrumb_runs_outermost_first() {
    let error = eval("(and (exists tags) (not (at 5 tags)))", &mut tagged()).unwrap_err();
    assert_eq!(
        error.breadcrumb(),
        vec![
            "(and (exists tags) (not (at 5 tags)))",
            "(not (at 5 tags))",
            "(at 5 tags)",
        ]
    );
    assert!(matches!(
        error.root_cause(),
        EvalError::IndexOutOfBounds { index: 5, length: 2 }
    ));
}

#[test]
fn test_operand_errors_are_wrapped_by_the_parent() {
    let error = eval("(not (exists 42))", &mut MemoryFact::new()).unwrap_err();
    match &error {
        EvalError::Evaluation { term, context, source } => {
            assert_eq!(term, "(not (exists 42))");
            assert_eq!(
                context,
                &CallContext {
                    depth: 0,
                    operator: "not".to_string(),
                    rows: 0,
                }
            );
            assert!(matches!(**source, EvalError::OperandType { position: 0, .. }));
        }
        other => panic!("expected a wrapped error, got {:?}", other),
    }
}

#[test]
fn test_field_where_term_expected() {
    let error = eval("(agg k (count))", &mut MemoryFact::new()).unwrap_err();
    assert!(matches!(
        error,
        EvalError::OperandType { expected: "term", .. }
    ));
}
