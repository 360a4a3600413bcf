//! Scalar values

use crate::Term;
use chrono::{DateTime, SecondsFormat, Utc};
use regex::Regex;
use std::cmp::Ordering;
use std::fmt;
use std::hash::{Hash, Hasher};

/// A compiled regular expression carried as a scalar.
///
/// Two patterns are equal when their sources are equal once every unescaped
/// `/` is written as `\/`, so `a/b` and `a\/b` are the same pattern.
#[derive(Debug, Clone)]
pub struct Pattern(Regex);

impl Pattern {
    /// Compile a pattern from its source
    pub fn new(source: &str) -> Result<Self, regex::Error> {
        Regex::new(source).map(Self)
    }

    /// The pattern source
    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }

    /// The source with every slash escaped, as written between `/.../`.
    ///
    /// Existing escape pairs are copied unchanged.
    pub fn canonical(&self) -> String {
        let mut out = String::with_capacity(self.as_str().len());
        let mut chars = self.as_str().chars();
        while let Some(c) = chars.next() {
            match c {
                '\\' => {
                    out.push('\\');
                    out.extend(chars.next());
                }
                '/' => out.push_str("\\/"),
                c => out.push(c),
            }
        }
        out
    }

    /// Check whether the pattern matches anywhere in `haystack`
    pub fn is_match(&self, haystack: &str) -> bool {
        self.0.is_match(haystack)
    }

    /// The underlying compiled regex
    pub fn regex(&self) -> &Regex {
        &self.0
    }
}

impl PartialEq for Pattern {
    fn eq(&self, other: &Self) -> bool {
        self.as_str() == other.as_str() || self.canonical() == other.canonical()
    }
}

impl Eq for Pattern {}

impl Hash for Pattern {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.canonical().hash(state);
    }
}

impl fmt::Display for Pattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "/{}/", self.canonical())
    }
}

/// A single value held by a fact field or written as a term literal.
#[derive(Debug, Clone)]
pub enum Scalar {
    /// 64-bit signed integer
    Integer(i64),
    /// 64-bit float
    Float(f64),
    /// UTF-8 string
    String(String),
    /// Boolean
    Boolean(bool),
    /// Point in time, always UTC
    Timestamp(DateTime<Utc>),
    /// Regular expression
    Regex(Pattern),
    /// A term carried as data (e.g. stored in a field)
    Term(Box<Term>),
}

impl Scalar {
    /// Name of the dynamic type, as reported by the `type` operator
    pub fn type_name(&self) -> &'static str {
        match self {
            Self::Integer(_) => "integer",
            Self::Float(_) => "float",
            Self::String(_) => "string",
            Self::Boolean(_) => "boolean",
            Self::Timestamp(_) => "timestamp",
            Self::Regex(_) => "regex",
            Self::Term(_) => "term",
        }
    }

    pub fn is_numeric(&self) -> bool {
        matches!(self, Self::Integer(_) | Self::Float(_))
    }

    pub fn as_integer(&self) -> Option<i64> {
        match self {
            Self::Integer(i) => Some(*i),
            _ => None,
        }
    }

    /// Numeric value as a float (integers are promoted)
    pub fn as_float(&self) -> Option<f64> {
        match self {
            Self::Integer(i) => Some(*i as f64),
            Self::Float(f) => Some(*f),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::String(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_boolean(&self) -> Option<bool> {
        match self {
            Self::Boolean(b) => Some(*b),
            _ => None,
        }
    }

    /// Natural ordering between two scalars.
    ///
    /// Integers and floats compare numerically with each other. Strings,
    /// booleans and timestamps compare within their own kind. Any other
    /// pairing is incomparable.
    pub fn compare(&self, other: &Scalar) -> Option<Ordering> {
        match (self, other) {
            (Self::Integer(a), Self::Integer(b)) => Some(a.cmp(b)),
            (Self::Float(_), _) | (_, Self::Float(_)) if self.is_numeric() && other.is_numeric() => {
                self.as_float()?.partial_cmp(&other.as_float()?)
            }
            (Self::String(a), Self::String(b)) => Some(a.cmp(b)),
            (Self::Boolean(a), Self::Boolean(b)) => Some(a.cmp(b)),
            (Self::Timestamp(a), Self::Timestamp(b)) => Some(a.cmp(b)),
            _ => None,
        }
    }

    /// Equality that lets integers and floats meet (`1 == 1.0`).
    pub fn loosely_equals(&self, other: &Scalar) -> bool {
        if self.is_numeric() && other.is_numeric() {
            return self.compare(other) == Some(Ordering::Equal);
        }
        self == other
    }
}

impl PartialEq for Scalar {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::Integer(a), Self::Integer(b)) => a == b,
            (Self::Float(a), Self::Float(b)) => float_bits(*a) == float_bits(*b),
            (Self::String(a), Self::String(b)) => a == b,
            (Self::Boolean(a), Self::Boolean(b)) => a == b,
            (Self::Timestamp(a), Self::Timestamp(b)) => a == b,
            (Self::Regex(a), Self::Regex(b)) => a == b,
            (Self::Term(a), Self::Term(b)) => a == b,
            _ => false,
        }
    }
}

impl Eq for Scalar {}

/// Bit pattern used for equality and hashing; every NaN is the same value
fn float_bits(f: f64) -> u64 {
    if f.is_nan() { f64::NAN.to_bits() } else { f.to_bits() }
}

impl Hash for Scalar {
    fn hash<H: Hasher>(&self, state: &mut H) {
        std::mem::discriminant(self).hash(state);
        match self {
            Self::Integer(i) => i.hash(state),
            Self::Float(f) => float_bits(*f).hash(state),
            Self::String(s) => s.hash(state),
            Self::Boolean(b) => b.hash(state),
            Self::Timestamp(t) => t.hash(state),
            Self::Regex(p) => p.hash(state),
            Self::Term(t) => t.hash(state),
        }
    }
}

impl fmt::Display for Scalar {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Integer(i) => write!(f, "{}", i),
            // Signed so the reader cannot take them for field names
            Self::Float(x) if x.is_nan() => f.write_str("+nan"),
            Self::Float(x) if x.is_infinite() => f.write_str(if *x > 0.0 { "+inf" } else { "-inf" }),
            // Debug keeps the decimal point (`1.0`) so floats read back as floats
            Self::Float(x) => write!(f, "{:?}", x),
            Self::String(s) => {
                f.write_str("'")?;
                for c in s.chars() {
                    match c {
                        '\'' => f.write_str("\\'")?,
                        '\\' => f.write_str("\\\\")?,
                        _ => write!(f, "{}", c)?,
                    }
                }
                f.write_str("'")
            }
            Self::Boolean(b) => write!(f, "{}", b),
            Self::Timestamp(t) => f.write_str(&t.to_rfc3339_opts(SecondsFormat::AutoSi, true)),
            Self::Regex(p) => write!(f, "{}", p),
            Self::Term(t) => write!(f, "{}", t),
        }
    }
}

impl From<i64> for Scalar {
    fn from(i: i64) -> Self {
        Self::Integer(i)
    }
}

impl From<i32> for Scalar {
    fn from(i: i32) -> Self {
        Self::Integer(i64::from(i))
    }
}

impl From<f64> for Scalar {
    fn from(f: f64) -> Self {
        Self::Float(f)
    }
}

impl From<bool> for Scalar {
    fn from(b: bool) -> Self {
        Self::Boolean(b)
    }
}

impl From<&str> for Scalar {
    fn from(s: &str) -> Self {
        Self::String(s.to_string())
    }
}

impl From<String> for Scalar {
    fn from(s: String) -> Self {
        Self::String(s)
    }
}

impl From<DateTime<Utc>> for Scalar {
    fn from(t: DateTime<Utc>) -> Self {
        Self::Timestamp(t)
    }
}

impl From<Pattern> for Scalar {
    fn from(p: Pattern) -> Self {
        Self::Regex(p)
    }
}

impl From<Term> for Scalar {
    fn from(t: Term) -> Self {
        Self::Term(Box::new(t))
    }
}
