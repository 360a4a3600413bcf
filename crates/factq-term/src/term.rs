//! Terms and operands

use crate::{Builtin, Operator, Scalar, TermState};
use smallvec::SmallVec;
use std::fmt;
use std::hash::{Hash, Hasher};

/// Inline storage for operand lists; most operators take one or two.
pub type Operands = SmallVec<[Operand; 2]>;

/// An operand of a term
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Operand {
    /// A literal scalar
    Literal(Scalar),
    /// A reference to a fact field by name
    Field(String),
    /// A nested term
    Term(Box<Term>),
    /// Placeholder for the invoking term's operand at this position.
    /// Only meaningful inside a registered operator body.
    Arg(usize),
}

impl Operand {
    pub fn literal(value: impl Into<Scalar>) -> Self {
        Self::Literal(value.into())
    }

    pub fn field(name: impl Into<String>) -> Self {
        Self::Field(name.into())
    }

    pub fn arg(index: usize) -> Self {
        Self::Arg(index)
    }

    /// Short description of the operand kind, used in diagnostics
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Literal(_) => "literal",
            Self::Field(_) => "field reference",
            Self::Term(_) => "term",
            Self::Arg(_) => "argument placeholder",
        }
    }

    pub fn as_field(&self) -> Option<&str> {
        match self {
            Self::Field(name) => Some(name),
            _ => None,
        }
    }

    pub fn as_term(&self) -> Option<&Term> {
        match self {
            Self::Term(t) => Some(t.as_ref()),
            _ => None,
        }
    }

    /// The scalar this operand stands for without any fact: a literal, or a
    /// `(const x)` term left behind by simplification.
    pub fn constant(&self) -> Option<&Scalar> {
        match self {
            Self::Literal(s) => Some(s),
            Self::Term(t) => t.constant(),
            _ => None,
        }
    }
}

impl From<Term> for Operand {
    fn from(term: Term) -> Self {
        Self::Term(Box::new(term))
    }
}

impl From<Scalar> for Operand {
    fn from(value: Scalar) -> Self {
        Self::Literal(value)
    }
}

impl fmt::Display for Operand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Literal(s) => write!(f, "{}", s),
            Self::Field(name) => f.write_str(name),
            Self::Term(t) => write!(f, "{}", t),
            Self::Arg(i) => write!(f, "${}", i),
        }
    }
}

/// A term: an operator applied to ordered operands.
///
/// The operator and operands are fixed at construction. Arity is checked when
/// the term is evaluated, not here. The term also owns the private state of
/// stateful operators, so reuse the same instance across a scan.
#[derive(Debug, Clone)]
pub struct Term {
    operator: Operator,
    operands: Operands,
    state: TermState,
}

impl Term {
    /// Create a term from an operator name
    pub fn new(name: &str, operands: impl IntoIterator<Item = Operand>) -> Self {
        Self::with_operator(Operator::from_name(name), operands)
    }

    /// Create a term for a built-in operator
    pub fn builtin(builtin: Builtin, operands: impl IntoIterator<Item = Operand>) -> Self {
        Self::with_operator(Operator::Builtin(builtin), operands)
    }

    pub fn with_operator(operator: Operator, operands: impl IntoIterator<Item = Operand>) -> Self {
        Self {
            operator,
            operands: operands.into_iter().collect(),
            state: TermState::new(),
        }
    }

    /// `(const value)`
    pub fn constant_of(value: impl Into<Scalar>) -> Self {
        Self::builtin(Builtin::Const, [Operand::literal(value)])
    }

    pub fn operator(&self) -> &Operator {
        &self.operator
    }

    pub fn name(&self) -> &str {
        self.operator.name()
    }

    pub fn operands(&self) -> &[Operand] {
        &self.operands
    }

    pub fn operand(&self, position: usize) -> Option<&Operand> {
        self.operands.get(position)
    }

    pub fn arity(&self) -> usize {
        self.operands.len()
    }

    pub fn state(&self) -> &TermState {
        &self.state
    }

    pub fn state_mut(&mut self) -> &mut TermState {
        &mut self.state
    }

    /// Split into mutable operands and state, for operator bodies that
    /// evaluate sub-terms and record state in the same call
    pub fn parts_mut(&mut self) -> (&mut [Operand], &mut TermState) {
        (&mut self.operands, &mut self.state)
    }

    /// Mutable access to a nested term operand
    pub fn subterm_mut(&mut self, position: usize) -> Option<&mut Term> {
        match self.operands.get_mut(position) {
            Some(Operand::Term(t)) => Some(t.as_mut()),
            _ => None,
        }
    }

    /// The literal of a `(const x)` term
    pub fn constant(&self) -> Option<&Scalar> {
        match (&self.operator, self.operands.as_slice()) {
            (Operator::Builtin(Builtin::Const), [Operand::Literal(s)]) => Some(s),
            _ => None,
        }
    }

    /// Copy of this term with no recorded state, recursively
    pub fn fresh(&self) -> Self {
        Self::with_operator(
            self.operator.clone(),
            self.operands.iter().map(|op| match op {
                Operand::Term(t) => Operand::Term(Box::new(t.fresh())),
                other => other.clone(),
            }),
        )
    }

    /// Highest `$n` placeholder index used anywhere in this term
    pub fn max_arg(&self) -> Option<usize> {
        self.operands
            .iter()
            .filter_map(|op| match op {
                Operand::Arg(i) => Some(*i),
                Operand::Term(t) => t.max_arg(),
                _ => None,
            })
            .max()
    }

    /// Replace `$n` placeholders with `args[n]`, producing a stateless copy.
    /// Placeholders beyond `args` are left in place.
    pub fn instantiate(&self, args: &[Operand]) -> Self {
        Self::with_operator(
            self.operator.clone(),
            self.operands.iter().map(|op| match op {
                Operand::Arg(i) => match args.get(*i) {
                    Some(Operand::Term(t)) => Operand::Term(Box::new(t.fresh())),
                    Some(arg) => arg.clone(),
                    None => Operand::Arg(*i),
                },
                Operand::Term(t) => Operand::Term(Box::new(t.instantiate(args))),
                other => other.clone(),
            }),
        )
    }

    /// Visit this term and every nested term, depth first
    pub fn walk<'a>(&'a self, visit: &mut impl FnMut(&'a Term)) {
        visit(self);
        for op in &self.operands {
            if let Operand::Term(t) = op {
                t.walk(visit);
            }
        }
    }
}

/// Terms compare by shape; recorded state is ignored.
impl PartialEq for Term {
    fn eq(&self, other: &Self) -> bool {
        self.operator == other.operator && self.operands == other.operands
    }
}

impl Eq for Term {}

impl Hash for Term {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.operator.hash(state);
        self.operands.as_slice().hash(state);
    }
}

impl fmt::Display for Term {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}", self.operator)?;
        for op in &self.operands {
            write!(f, " {}", op)?;
        }
        f.write_str(")")
    }
}
