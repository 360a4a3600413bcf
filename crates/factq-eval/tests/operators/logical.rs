//! Logical operator tests
//!
//! Tests for: and, or, not, traced

use super::{boolean, eval, int};
use factq_eval::MemoryFact;
use pretty_assertions::assert_eq;
use rstest::rstest;

fn flags() -> MemoryFact {
    MemoryFact::new()
        .with("on", true)
        .with("off", false)
        .with("count", 0)
}

#[rstest]
#[case("(and on on)", true)]
#[case("(and on off)", false)]
#[case("(and on missing)", false)]
#[case("(and on count)", true)]
#[case("(or off missing)", false)]
#[case("(or off on)", true)]
#[case("(or (exists missing) (exists on))", true)]
#[case("(not off)", true)]
#[case("(not missing)", true)]
#[case("(not on)", false)]
#[case("(and on)", true)]
fn test_truth_table(#[case] source: &str, #[case] expected: bool) {
    assert_eq!(eval(source, &mut flags()).unwrap(), boolean(expected));
}

#[test]
fn test_and_stops_at_first_false() {
    let mut fact = flags();
    eval("(and off (as touched 1))", &mut fact).unwrap();
    assert!(fact.history("touched").is_empty());
}

#[test]
fn test_or_stops_at_first_true() {
    let mut fact = flags();
    eval("(or on (as touched 1))", &mut fact).unwrap();
    assert!(fact.history("touched").is_empty());
    eval("(or off (as touched 1))", &mut fact).unwrap();
    assert_eq!(fact.history("touched").len(), 1);
}

#[test]
fn test_traced_returns_its_operand() {
    let mut fact = flags();
    assert_eq!(eval("(traced (add count 2))", &mut fact).unwrap(), int(2));
    assert_eq!(eval("(traced on)", &mut fact).unwrap(), boolean(true));
}
