//! Conversion between JSON documents and facts, rows and values
//!
//! A JSON object becomes a fact or row. An array under a key is read as that
//! field's history; `null` leaves the field out. Nested objects are not
//! scalars and are rejected.

use crate::error::{EvalError, EvalResult};
use crate::fact::{Fact, MemoryFact, Row};
use chrono::SecondsFormat;
use factq_term::{Scalar, Value};
use serde_json::{Map, Number, Value as Json};

fn json_kind(json: &Json) -> &'static str {
    match json {
        Json::Null => "null",
        Json::Bool(_) => "boolean",
        Json::Number(_) => "number",
        Json::String(_) => "string",
        Json::Array(_) => "array",
        Json::Object(_) => "object",
    }
}

/// A JSON scalar; `None` for `null`
pub fn scalar_from_json(json: &Json) -> EvalResult<Option<Scalar>> {
    let scalar = match json {
        Json::Null => return Ok(None),
        Json::Bool(b) => Scalar::Boolean(*b),
        Json::Number(n) => match n.as_i64() {
            Some(i) => Scalar::Integer(i),
            None => Scalar::Float(n.as_f64().unwrap_or(f64::NAN)),
        },
        Json::String(s) => Scalar::String(s.clone()),
        other => return Err(EvalError::type_mismatch("scalar", json_kind(other))),
    };
    Ok(Some(scalar))
}

/// The scalars under one key: an array's elements, or the single value
fn history_from_json(json: &Json) -> EvalResult<Vec<Scalar>> {
    match json {
        Json::Array(items) => items
            .iter()
            .filter_map(|item| scalar_from_json(item).transpose())
            .collect(),
        other => Ok(scalar_from_json(other)?.into_iter().collect()),
    }
}

fn object(json: &Json) -> EvalResult<&Map<String, Json>> {
    json.as_object()
        .ok_or_else(|| EvalError::type_mismatch("object", json_kind(json)))
}

/// Build a fact from a JSON object
pub fn fact_from_json(json: &Json) -> EvalResult<MemoryFact> {
    let mut fact = MemoryFact::new();
    for (field, value) in object(json)? {
        for scalar in history_from_json(value)? {
            fact.append(field, scalar)?;
        }
    }
    Ok(fact)
}

/// Build a row from a JSON object
pub fn row_from_json(json: &Json) -> EvalResult<Row> {
    object(json)?
        .iter()
        .map(|(field, value)| Ok((field.clone(), Value::from_history(history_from_json(value)?))))
        .collect()
}

/// Build the `maps` rows from a JSON array of objects
pub fn rows_from_json(json: &Json) -> EvalResult<Vec<Row>> {
    match json {
        Json::Array(items) => items.iter().map(row_from_json).collect(),
        other => Err(EvalError::type_mismatch("array", json_kind(other))),
    }
}

/// Render a scalar as JSON. Timestamps become RFC 3339 strings and
/// regexes and terms their canonical text.
pub fn scalar_to_json(scalar: &Scalar) -> Json {
    match scalar {
        Scalar::Integer(i) => Json::from(*i),
        Scalar::Float(f) => Number::from_f64(*f).map_or(Json::Null, Json::Number),
        Scalar::String(s) => Json::String(s.clone()),
        Scalar::Boolean(b) => Json::Bool(*b),
        Scalar::Timestamp(t) => Json::String(t.to_rfc3339_opts(SecondsFormat::AutoSi, true)),
        Scalar::Regex(p) => Json::String(p.to_string()),
        Scalar::Term(t) => Json::String(t.to_string()),
    }
}

/// Render a value as JSON: `null`, a scalar or an array
pub fn value_to_json(value: &Value) -> Json {
    match value {
        Value::Nil => Json::Null,
        Value::Scalar(s) => scalar_to_json(s),
        Value::Sequence(items) => Json::Array(items.iter().map(scalar_to_json).collect()),
    }
}
