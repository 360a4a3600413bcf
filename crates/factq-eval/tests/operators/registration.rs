//! Runtime registration tests
//!
//! Tests for: defn, undef, custom expression and native operators

use super::{boolean, int, term};
use factq_eval::{Engine, EvalError, EvalResult, Expected, MemoryFact, OperatorDef};
use factq_term::{Scalar, Value};
use pretty_assertions::assert_eq;

fn run(engine: &Engine, source: &str, fact: &mut MemoryFact) -> EvalResult<Value> {
    engine.evaluate(&mut term(source), fact, &[])
}

#[test]
fn test_defined_operator_expands_its_body() {
    let engine = Engine::isolated();
    let mut fact = MemoryFact::new().with("age", 34);
    assert_eq!(run(&engine, "(defn adult (ge $0 18))", &mut fact).unwrap(), boolean(true));
    assert_eq!(run(&engine, "(adult age)", &mut fact).unwrap(), boolean(true));
    assert_eq!(run(&engine, "(adult (sub age 20))", &mut fact).unwrap(), boolean(false));
}

#[test]
fn test_defined_operator_checks_arity() {
    let engine = Engine::isolated();
    run(&engine, "(defn between (and (ge $0 $1) (le $0 $2)))", &mut MemoryFact::new()).unwrap();
    let error = run(&engine, "(between 1 2)", &mut MemoryFact::new()).unwrap_err();
    assert!(matches!(
        error,
        EvalError::Arity { expected: Expected::Exactly(3), actual: 2, .. }
    ));
    assert_eq!(
        run(&engine, "(between 5 1 9)", &mut MemoryFact::new()).unwrap(),
        boolean(true)
    );
}

#[test]
fn test_definitions_are_scoped_to_the_registry() {
    let engine = Engine::isolated();
    run(&engine, "(defn twice (mul $0 2))", &mut MemoryFact::new()).unwrap();
    let other = Engine::isolated();
    assert!(matches!(
        run(&other, "(twice 4)", &mut MemoryFact::new()),
        Err(EvalError::UnknownOperator { .. })
    ));
    assert_eq!(run(&engine.clone(), "(twice 4)", &mut MemoryFact::new()).unwrap(), int(8));
}

#[test]
fn test_defining_a_builtin_fails() {
    let engine = Engine::isolated();
    let error = run(&engine, "(defn exists (const true))", &mut MemoryFact::new()).unwrap_err();
    assert!(matches!(error.root_cause(), EvalError::ReservedOperator { .. }));
}

#[test]
fn test_defining_twice_fails() {
    let engine = Engine::isolated();
    run(&engine, "(defn flag (const true))", &mut MemoryFact::new()).unwrap();
    let error = run(&engine, "(defn flag (const false))", &mut MemoryFact::new()).unwrap_err();
    assert!(matches!(error.root_cause(), EvalError::DuplicateOperator { .. }));
}

#[test]
fn test_operator_names_are_lowercase() {
    let engine = Engine::isolated();
    let error = run(&engine, "(defn Flag (const true))", &mut MemoryFact::new()).unwrap_err();
    assert!(matches!(error.root_cause(), EvalError::InvalidOperatorName { .. }));
    let error = run(&engine, "(defn flag2 (const true))", &mut MemoryFact::new()).unwrap_err();
    assert!(matches!(error.root_cause(), EvalError::InvalidOperatorName { .. }));
}

#[test]
fn test_undef_unknown_name_is_true() {
    let engine = Engine::isolated();
    assert_eq!(
        run(&engine, "(undef never_defined)", &mut MemoryFact::new()).unwrap(),
        boolean(true)
    );
}

#[test]
fn test_undef_builtin_fails() {
    let engine = Engine::isolated();
    let error = run(&engine, "(undef exists)", &mut MemoryFact::new()).unwrap_err();
    assert!(matches!(error.root_cause(), EvalError::ReservedOperator { .. }));
}

#[test]
fn test_undef_then_define_again() {
    let engine = Engine::isolated();
    let mut fact = MemoryFact::new();
    run(&engine, "(defn flag (const 1))", &mut fact).unwrap();
    run(&engine, "(undef flag)", &mut fact).unwrap();
    assert!(matches!(
        run(&engine, "(flag)", &mut fact),
        Err(EvalError::UnknownOperator { .. })
    ));
    run(&engine, "(defn flag (const 2))", &mut fact).unwrap();
    assert_eq!(run(&engine, "(flag)", &mut fact).unwrap(), int(2));
}

#[test]
fn test_custom_body_state_persists_across_a_scan() {
    let engine = Engine::isolated();
    run(&engine, "(defn changed (ne $0 (prev $0)))", &mut MemoryFact::new()).unwrap();
    let mut changed = term("(changed a)");
    let mut facts: Vec<MemoryFact> = [1, 1, 2]
        .into_iter()
        .map(|v| MemoryFact::new().with("a", v))
        .collect();
    let results = engine.scan(&mut changed, &mut facts, &[]).unwrap();
    assert_eq!(results, vec![boolean(false), boolean(false), boolean(true)]);
}

#[test]
fn test_redefinition_replaces_the_cached_expansion() {
    let engine = Engine::isolated();
    let mut fact = MemoryFact::new();
    run(&engine, "(defn level (const 1))", &mut fact).unwrap();
    let mut level = term("(level)");
    assert_eq!(engine.evaluate(&mut level, &mut fact, &[]).unwrap(), int(1));

    run(&engine, "(undef level)", &mut fact).unwrap();
    run(&engine, "(defn level (const 2))", &mut fact).unwrap();
    assert_eq!(engine.evaluate(&mut level, &mut fact, &[]).unwrap(), int(2));
}

#[test]
fn test_native_operator() {
    let engine = Engine::isolated();
    engine
        .register(OperatorDef::native("double", Expected::Exactly(1), |args, _, _| {
            match args[0].single() {
                Some(Scalar::Integer(i)) => Ok(Value::from(i * 2)),
                Some(other) => Err(EvalError::type_mismatch("integer", other.type_name())),
                None => Ok(Value::Nil),
            }
        }))
        .unwrap();

    let mut fact = MemoryFact::new().with("n", 21).with("s", "x");
    assert_eq!(run(&engine, "(double n)", &mut fact).unwrap(), int(42));
    assert_eq!(run(&engine, "(double missing)", &mut fact).unwrap(), Value::Nil);
    let error = run(&engine, "(double s)", &mut fact).unwrap_err();
    assert!(matches!(error.root_cause(), EvalError::TypeMismatch { .. }));
}

#[test]
fn test_native_operator_reads_rows() {
    let engine = Engine::isolated();
    engine
        .register(OperatorDef::native("rows", Expected::Exactly(0), |_, _, maps| {
            Ok(Value::from(maps.len() as i64))
        }))
        .unwrap();
    let maps = super::rows(serde_json::json!([{"k": 1}, {"k": 2}]));
    assert_eq!(
        engine
            .evaluate(&mut term("(rows)"), &mut MemoryFact::new(), &maps)
            .unwrap(),
        int(2)
    );
}
