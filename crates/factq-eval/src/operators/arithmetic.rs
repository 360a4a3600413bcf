//! Arithmetic operators
//!
//! Implements: add, sub, mul, div
//!
//! Operands must resolve to at most one value each; nil on either side gives
//! nil. Integer arithmetic is checked, and `div` on integers truncates toward
//! zero. Mixing an integer with a float promotes to float. `add` also joins
//! two strings.

use super::{assert_args, single};
use crate::context::Scope;
use crate::engine::Engine;
use crate::error::{EvalError, EvalResult, Expected};
use factq_term::{Scalar, Term, Value};

/// The arithmetic a term asks for
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ArithmeticOp {
    Add,
    Sub,
    Mul,
    Div,
}

impl ArithmeticOp {
    pub fn name(self) -> &'static str {
        match self {
            Self::Add => "add",
            Self::Sub => "sub",
            Self::Mul => "mul",
            Self::Div => "div",
        }
    }
}

/// Apply `op` to two scalars
pub fn apply(op: ArithmeticOp, left: &Scalar, right: &Scalar) -> EvalResult<Scalar> {
    if let (Scalar::Integer(a), Scalar::Integer(b)) = (left, right) {
        return integer_op(op, *a, *b);
    }
    if let (Some(a), Some(b)) = (left.as_float(), right.as_float()) {
        return float_op(op, a, b);
    }
    if let (ArithmeticOp::Add, Scalar::String(a), Scalar::String(b)) = (op, left, right) {
        return Ok(Scalar::String(format!("{}{}", a, b)));
    }
    let offender = if left.is_numeric() { right } else { left };
    Err(EvalError::type_mismatch("number", offender.type_name()))
}

fn integer_op(op: ArithmeticOp, a: i64, b: i64) -> EvalResult<Scalar> {
    let result = match op {
        ArithmeticOp::Add => a.checked_add(b),
        ArithmeticOp::Sub => a.checked_sub(b),
        ArithmeticOp::Mul => a.checked_mul(b),
        ArithmeticOp::Div => {
            if b == 0 {
                return Err(EvalError::DivisionByZero);
            }
            a.checked_div(b)
        }
    };
    result
        .map(Scalar::Integer)
        .ok_or_else(|| EvalError::overflow(op.name()))
}

fn float_op(op: ArithmeticOp, a: f64, b: f64) -> EvalResult<Scalar> {
    let result = match op {
        ArithmeticOp::Add => a + b,
        ArithmeticOp::Sub => a - b,
        ArithmeticOp::Mul => a * b,
        ArithmeticOp::Div => {
            if b == 0.0 {
                return Err(EvalError::DivisionByZero);
            }
            a / b
        }
    };
    Ok(Scalar::Float(result))
}

impl Engine {
    pub(crate) fn eval_arithmetic(&self, op: ArithmeticOp, term: &mut Term, cx: &mut Scope<'_>) -> EvalResult<Value> {
        assert_args(term, Expected::Exactly(2))?;
        let left = self.resolve(term, 0, cx)?;
        let right = self.resolve(term, 1, cx)?;
        let (Some(a), Some(b)) = (single(op.name(), &left)?, single(op.name(), &right)?) else {
            return Ok(Value::Nil);
        };
        Ok(Value::Scalar(apply(op, a, b)?))
    }
}
