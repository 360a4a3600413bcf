//! Operators and operator families

use std::fmt;

/// The family a built-in operator is contributed by.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Family {
    /// Existence, selection, cardinality, mutation, matching, aggregation,
    /// registration and diagnostics
    Core,
    /// Comparison and arithmetic
    Comparison,
    /// Boolean combinators
    Logical,
}

macro_rules! builtins {
    ($($variant:ident => $name:literal, $family:ident;)+) => {
        /// Built-in operators, dispatched by a single `match` in the evaluator
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
        pub enum Builtin {
            $($variant,)+
        }

        impl Builtin {
            /// Every built-in operator
            pub const ALL: &'static [Builtin] = &[$(Builtin::$variant,)+];

            /// Operator name as written in terms
            pub const fn name(self) -> &'static str {
                match self {
                    $(Self::$variant => $name,)+
                }
            }

            /// Family that contributes this operator
            pub const fn family(self) -> Family {
                match self {
                    $(Self::$variant => Family::$family,)+
                }
            }

            /// Look up a built-in by name
            pub fn from_name(name: &str) -> Option<Self> {
                match name {
                    $($name => Some(Self::$variant),)+
                    _ => None,
                }
            }
        }
    };
}

builtins! {
    Exists => "exists", Core;
    Absent => "absent", Core;
    Nil => "nil", Core;
    Either => "either", Core;
    At => "at", Core;
    Prev => "prev", Core;
    Unique => "unique", Core;
    Many => "many", Core;
    One => "one", Core;
    Size => "size", Core;
    Type => "type", Core;
    As => "as", Core;
    Matches => "matches", Core;
    Defn => "defn", Core;
    Undef => "undef", Core;
    Min => "min", Core;
    Max => "max", Core;
    Count => "count", Core;
    Nth => "nth", Core;
    First => "first", Core;
    Sum => "sum", Core;
    Traced => "traced", Core;
    Agg => "agg", Core;
    Const => "const", Core;
    Eq => "eq", Comparison;
    Ne => "ne", Comparison;
    Lt => "lt", Comparison;
    Le => "le", Comparison;
    Gt => "gt", Comparison;
    Ge => "ge", Comparison;
    Add => "add", Comparison;
    Sub => "sub", Comparison;
    Mul => "mul", Comparison;
    Div => "div", Comparison;
    And => "and", Logical;
    Or => "or", Logical;
    Not => "not", Logical;
}

impl Builtin {
    /// Operators whose result depends on earlier calls on the same term
    pub const fn is_stateful(self) -> bool {
        matches!(self, Self::Prev | Self::Unique)
    }

    /// Operators with effects beyond their return value
    pub const fn has_side_effects(self) -> bool {
        matches!(self, Self::As | Self::Defn | Self::Undef | Self::Traced)
    }

    /// Operators that read the `maps` working set
    pub const fn is_aggregate(self) -> bool {
        matches!(
            self,
            Self::Min | Self::Max | Self::Count | Self::Nth | Self::First | Self::Sum | Self::Agg
        )
    }
}

impl fmt::Display for Builtin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// The operator of a term: a built-in or a name resolved through the registry.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Operator {
    Builtin(Builtin),
    Custom(String),
}

impl Operator {
    /// Resolve a name, preferring built-ins
    pub fn from_name(name: &str) -> Self {
        match Builtin::from_name(name) {
            Some(builtin) => Self::Builtin(builtin),
            None => Self::Custom(name.to_string()),
        }
    }

    pub fn name(&self) -> &str {
        match self {
            Self::Builtin(b) => b.name(),
            Self::Custom(name) => name,
        }
    }

    pub fn as_builtin(&self) -> Option<Builtin> {
        match self {
            Self::Builtin(b) => Some(*b),
            Self::Custom(_) => None,
        }
    }
}

impl From<Builtin> for Operator {
    fn from(b: Builtin) -> Self {
        Self::Builtin(b)
    }
}

impl fmt::Display for Operator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
