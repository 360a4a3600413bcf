//! Existence and selection tests
//!
//! Tests for: exists, absent, nil, either, at, many, one, size, type, const, as, matches

use super::{boolean, eval, int, string};
use factq_eval::{EvalError, MemoryFact};
use factq_term::{Scalar, Value};
use pretty_assertions::assert_eq;
use rstest::rstest;

fn person() -> MemoryFact {
    MemoryFact::new()
        .with("name", "ann")
        .with("age", 34)
        .with("tags", "red")
        .with("tags", "blue")
}

// ============================================================================
// Existence
// ============================================================================

#[rstest]
#[case("(exists name)", true)]
#[case("(exists nickname)", false)]
#[case("(absent name)", false)]
#[case("(absent nickname)", true)]
#[case("(nil nickname)", true)]
#[case("(nil tags)", false)]
#[case("(nil (at 0 nickname))", true)]
fn test_existence(#[case] source: &str, #[case] expected: bool) {
    assert_eq!(eval(source, &mut person()).unwrap(), boolean(expected));
}

#[test]
fn test_either_prefers_first() {
    let mut fact = person();
    assert_eq!(eval("(either name 'anonymous')", &mut fact).unwrap(), string("ann"));
    assert_eq!(
        eval("(either nickname 'anonymous')", &mut fact).unwrap(),
        string("anonymous")
    );
}

#[test]
fn test_either_keeps_sequences() {
    assert_eq!(
        eval("(either tags 'none')", &mut person()).unwrap(),
        Value::Sequence(vec![Scalar::from("red"), Scalar::from("blue")])
    );
}

#[test]
fn test_either_does_not_run_unneeded_fallback() {
    let mut fact = person();
    eval("(either name (as touched true))", &mut fact).unwrap();
    assert!(fact.history("touched").is_empty());
}

// ============================================================================
// Selection and cardinality
// ============================================================================

#[rstest]
#[case("(at 0 tags)", string("red"))]
#[case("(at 1 tags)", string("blue"))]
#[case("(at 0 name)", string("ann"))]
#[case("(at 0 nickname)", Value::Nil)]
#[case("(at missing tags)", Value::Nil)]
#[case("(size tags)", int(2))]
#[case("(size name)", int(1))]
#[case("(size nickname)", int(0))]
#[case("(many tags)", boolean(true))]
#[case("(many name)", boolean(false))]
#[case("(one name)", boolean(true))]
#[case("(one nickname)", boolean(false))]
#[case("(type age)", string("integer"))]
#[case("(type tags)", string("sequence"))]
#[case("(type nickname)", string("nil"))]
#[case("(const 7)", int(7))]
fn test_selection(#[case] source: &str, #[case] expected: Value) {
    assert_eq!(eval(source, &mut person()).unwrap(), expected);
}

#[rstest]
#[case("(at 2 tags)", 2)]
#[case("(at -1 tags)", -1)]
fn test_at_out_of_range(#[case] source: &str, #[case] index: i64) {
    let error = eval(source, &mut person()).unwrap_err();
    assert!(matches!(
        error.root_cause(),
        EvalError::IndexOutOfBounds { index: i, length: 2 } if *i == index
    ));
}

#[test]
fn test_const_rejects_fields() {
    assert!(matches!(
        eval("(const age)", &mut person()),
        Err(EvalError::OperandType { position: 0, .. })
    ));
}

// ============================================================================
// Assignment
// ============================================================================

#[test]
fn test_as_appends_history() {
    let mut fact = MemoryFact::new();
    eval("(as foo 42)", &mut fact).unwrap();
    assert_eq!(eval("(size foo)", &mut fact).unwrap(), int(1));
    eval("(as foo 256)", &mut fact).unwrap();
    assert_eq!(eval("(size foo)", &mut fact).unwrap(), int(2));
    assert_eq!(eval("(at 1 foo)", &mut fact).unwrap(), int(256));
}

#[test]
fn test_as_copies_every_value() {
    let mut fact = person();
    assert_eq!(eval("(as copy tags)", &mut fact).unwrap(), boolean(true));
    assert_eq!(fact.history("copy"), fact.history("tags"));
}

#[test]
fn test_as_nil_writes_nothing() {
    let mut fact = MemoryFact::new();
    assert_eq!(eval("(as foo nickname)", &mut fact).unwrap(), boolean(true));
    assert!(fact.is_empty());
}

// ============================================================================
// Pattern matching
// ============================================================================

#[rstest]
#[case("(matches name /^an+$/)", true)]
#[case("(matches name /^bob$/)", false)]
#[case("(matches name '^a')", true)]
#[case("(matches nickname /.*/)", false)]
fn test_matches(#[case] source: &str, #[case] expected: bool) {
    assert_eq!(eval(source, &mut person()).unwrap(), boolean(expected));
}

#[test]
fn test_matches_rejects_sequences() {
    let error = eval("(matches tags /r/)", &mut person()).unwrap_err();
    assert!(matches!(error.root_cause(), EvalError::Cardinality { found: 2, .. }));
}

#[test]
fn test_matches_reports_bad_string_pattern() {
    let error = eval("(matches name '[')", &mut person()).unwrap_err();
    assert!(matches!(error.root_cause(), EvalError::InvalidPattern { .. }));
}
