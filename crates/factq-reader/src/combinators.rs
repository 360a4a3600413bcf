//! Parser combinators for the canonical term form

use chrono::{DateTime, NaiveDate, NaiveTime, Utc};
use factq_term::{Operand, Pattern, Scalar, Term};
use winnow::ascii::{digit1, multispace0};
use winnow::combinator::{alt, cut_err, fail, peek, preceded, repeat};
use winnow::error::{ContextError, ErrMode, StrContext};
use winnow::prelude::*;
use winnow::token::{any, one_of, take_while};

pub(crate) type Input<'a> = &'a str;
pub(crate) type PResult<T> = Result<T, ErrMode<ContextError>>;

/// Deepest nesting of terms the reader accepts
pub const MAX_NESTING: usize = 256;

/// Skip whitespace
pub(crate) fn ws(input: &mut Input<'_>) -> PResult<()> {
    multispace0.void().parse_next(input)
}

/// Next character, whatever it is
fn next_char(input: &mut Input<'_>) -> PResult<char> {
    any.parse_next(input)
}

/// Exactly `expected`
fn tag_char(mut expected: char) -> impl FnMut(&mut Input<'_>) -> PResult<char> {
    move |input: &mut Input<'_>| expected.parse_next(input)
}

/// `(name operand*)`
pub(crate) fn term_parser(input: &mut Input<'_>) -> PResult<Term> {
    nested_term(input, 0)
}

fn nested_term(input: &mut Input<'_>, depth: usize) -> PResult<Term> {
    tag_char('(').parse_next(input)?;
    if depth >= MAX_NESTING {
        return cut_err(fail::<_, Term, _>.context(StrContext::Label("nesting depth"))).parse_next(input);
    }
    ws(input)?;
    let name = word
        .context(StrContext::Label("operator name"))
        .parse_next(input)?;
    let operands: Vec<Operand> =
        repeat(0.., preceded(ws, |i: &mut Input<'_>| operand(i, depth))).parse_next(input)?;
    ws(input)?;
    tag_char(')')
        .context(StrContext::Label("closing parenthesis"))
        .parse_next(input)?;
    Ok(Term::new(name, operands))
}

fn operand(input: &mut Input<'_>, depth: usize) -> PResult<Operand> {
    alt((
        (|i: &mut Input<'_>| nested_term(i, depth + 1)).map(Operand::from),
        string_literal.map(|s| Operand::Literal(Scalar::String(s))),
        regex_literal.map(|p| Operand::Literal(Scalar::Regex(p))),
        argument.map(Operand::Arg),
        numeric_atom.map(Operand::Literal),
        word.map(|w| match w {
            "true" => Operand::Literal(Scalar::Boolean(true)),
            "false" => Operand::Literal(Scalar::Boolean(false)),
            field => Operand::Field(field.to_string()),
        }),
    ))
    .context(StrContext::Label("operand"))
    .parse_next(input)
}

/// Identifier: operator names and field references
fn word<'a>(input: &mut Input<'a>) -> PResult<&'a str> {
    (
        one_of(|c: char| c.is_ascii_alphabetic() || c == '_'),
        take_while(0.., |c: char| c.is_ascii_alphanumeric() || c == '_' || c == '.'),
    )
        .take()
        .parse_next(input)
}

/// `'...'` with `\'` and `\\` escapes
fn string_literal(input: &mut Input<'_>) -> PResult<String> {
    tag_char('\'').parse_next(input)?;
    let mut out = String::new();
    loop {
        match next_char(input)? {
            '\'' => return Ok(out),
            '\\' => out.push(next_char(input)?),
            c => out.push(c),
        }
    }
}

/// `/.../`, escape pairs such as `\/` kept as written for the regex
fn regex_source(input: &mut Input<'_>) -> PResult<String> {
    tag_char('/').parse_next(input)?;
    let mut out = String::new();
    loop {
        match next_char(input)? {
            '/' => return Ok(out),
            '\\' => {
                out.push('\\');
                out.push(next_char(input)?);
            }
            c => out.push(c),
        }
    }
}

/// Once a slash opens a regex, a bad pattern is an error rather than another
/// alternative to try
fn regex_literal(input: &mut Input<'_>) -> PResult<Pattern> {
    preceded(
        peek('/'),
        cut_err(
            regex_source
                .verify_map(|source: String| Pattern::new(&source).ok())
                .context(StrContext::Label("regular expression")),
        ),
    )
    .parse_next(input)
}

/// `$n`
fn argument(input: &mut Input<'_>) -> PResult<usize> {
    preceded('$', digit1.verify_map(|digits: &str| digits.parse::<usize>().ok()))
        .parse_next(input)
}

/// Integers, floats and timestamps share a leading digit or sign, so take the
/// whole token and classify it.
fn numeric_atom(input: &mut Input<'_>) -> PResult<Scalar> {
    take_while(1.., |c: char| {
        c.is_ascii_alphanumeric() || matches!(c, '-' | '+' | ':' | '.')
    })
    .verify_map(classify_atom)
    .parse_next(input)
}

fn classify_atom(token: &str) -> Option<Scalar> {
    let first = token.chars().next()?;
    if !(first.is_ascii_digit() || first == '-' || first == '+') {
        return None;
    }
    if token.contains('T') {
        return DateTime::parse_from_rfc3339(token)
            .map(|ts| ts.with_timezone(&Utc))
            .ok()
            .or_else(|| extended_timestamp(token))
            .map(Scalar::Timestamp);
    }
    if let Ok(i) = token.parse::<i64>() {
        return Some(Scalar::Integer(i));
    }
    let unsigned = token.trim_start_matches(['-', '+']);
    let looks_float = token.contains('.')
        || token.contains('e')
        || token.contains('E')
        || unsigned == "inf"
        || unsigned == "nan";
    if looks_float {
        return token.parse::<f64>().ok().map(Scalar::Float);
    }
    None
}

/// UTC timestamps whose year needs a sign or more than four digits, such as
/// `+10000-01-01T00:00:00Z`
fn extended_timestamp(token: &str) -> Option<DateTime<Utc>> {
    let (date, time) = token.strip_suffix('Z')?.split_once('T')?;
    let (sign, date) = match date.strip_prefix('-') {
        Some(rest) => (-1, rest),
        None => (1, date.strip_prefix('+').unwrap_or(date)),
    };
    let mut parts = date.splitn(3, '-');
    let year: i32 = parts.next()?.parse().ok()?;
    let month: u32 = parts.next()?.parse().ok()?;
    let day: u32 = parts.next()?.parse().ok()?;
    let date = NaiveDate::from_ymd_opt(sign * year, month, day)?;
    let time = NaiveTime::parse_from_str(time, "%H:%M:%S%.f").ok()?;
    Some(date.and_time(time).and_utc())
}
