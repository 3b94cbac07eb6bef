//! The expression tree produced by the parser.
//!
//! Nesting in an [`Expr`] encodes operator precedence. A disjunction is a [`Expr::Group`] whose
//! operands are separated by [`Connective::Or`] tokens, each operand being either a conjunction
//! group, a negation, or a single comparison. A precedence level with only one operand is never
//! wrapped in a group, so `[a]='1'` parses to a bare [`Expr::Comparison`] while
//! `[a]='1' AND [b]='2' OR [c]='3'` parses to
//!
//! ```text
//! Group[ Group[ [a]='1', AND, [b]='2' ], OR, [c]='3' ]
//! ```
//!
//! The [`Display`] implementation renders a tree produced by [`parse`](crate::parse()) back
//! into branching logic text that parses to an identical tree. Hand-built trees carry no such
//! guarantee: a group mixing `AND` and `OR` loses its grouping, and a literal holding both quote
//! characters cannot be written back at all.

use std::fmt::{Display, Formatter};

use nonempty::NonEmpty;

use crate::field::FieldRef;

/// Relational operator of a comparison. Operands are always compared as text.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ComparisonOp {
    Eq,
    Ne,
    Lt,
    Gt,
    Le,
    Ge,
}

impl ComparisonOp {
    pub fn symbol(self) -> &'static str {
        match self {
            Self::Eq => "=",
            Self::Ne => "<>",
            Self::Lt => "<",
            Self::Gt => ">",
            Self::Le => "<=",
            Self::Ge => ">=",
        }
    }

    /// Compare two values using lexicographic string ordering, so `"9" > "10"`.
    pub fn apply(self, left: &str, right: &str) -> bool {
        match self {
            Self::Eq => left == right,
            Self::Ne => left != right,
            Self::Lt => left < right,
            Self::Gt => left > right,
            Self::Le => left <= right,
            Self::Ge => left >= right,
        }
    }
}

impl Display for ComparisonOp {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.symbol())
    }
}

/// Binary logical connective joining the operands of a group.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Connective {
    And,
    Or,
}

impl Connective {
    pub fn apply(self, left: bool, right: bool) -> bool {
        match self {
            Self::And => left && right,
            Self::Or => left || right,
        }
    }
}

impl Display for Connective {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::And => f.write_str("AND"),
            Self::Or => f.write_str("OR"),
        }
    }
}

/// Left-hand side of a comparison.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Operand {
    Field(FieldRef),
    Literal(String),
}

impl Display for Operand {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Field(field) => Display::fmt(field, f),
            Self::Literal(value) => fmt_literal(value, f),
        }
    }
}

fn fmt_literal(value: &str, f: &mut Formatter<'_>) -> std::fmt::Result {
    if value.contains('\'') {
        write!(f, "\"{}\"", value)
    } else {
        write!(f, "'{}'", value)
    }
}

/// A comparison leaf, the only place an operand is tested against a literal value.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Comparison {
    pub left: Operand,
    pub op: ComparisonOp,
    pub right: String,
}

impl Comparison {
    pub fn new(left: impl Into<Operand>, op: ComparisonOp, right: impl Into<String>) -> Self {
        Self {
            left: left.into(),
            op,
            right: right.into(),
        }
    }
}

impl From<FieldRef> for Operand {
    fn from(field: FieldRef) -> Self {
        Operand::Field(field)
    }
}

impl Display for Comparison {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}{}", self.left, self.op)?;
        fmt_literal(&self.right, f)
    }
}

/// Node of a parsed branching logic expression.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Expr {
    Comparison(Comparison),
    Connective(Connective),
    Not(Box<Expr>),
    Group(Box<NonEmpty<Expr>>),
}

impl Expr {
    /// Build a group from operands joined by the same connective.
    ///
    /// A single operand is returned as-is rather than wrapped in a group.
    pub fn joined(connective: Connective, first: Expr, rest: Vec<Expr>) -> Expr {
        if rest.is_empty() {
            return first;
        }

        let mut group = NonEmpty::new(first);

        for operand in rest {
            group.push(Expr::Connective(connective));
            group.push(operand);
        }

        Expr::Group(Box::new(group))
    }

    pub fn negated(self) -> Expr {
        Expr::Not(Box::new(self))
    }

    /// Every field referenced by the expression, in the order they appear.
    pub fn fields(&self) -> Vec<&FieldRef> {
        let mut fields = Vec::new();
        self.collect_fields(&mut fields);
        fields
    }

    fn collect_fields<'a>(&'a self, fields: &mut Vec<&'a FieldRef>) {
        match self {
            Expr::Comparison(comparison) => {
                if let Operand::Field(field) = &comparison.left {
                    fields.push(field);
                }
            }
            Expr::Connective(_) => {}
            Expr::Not(operand) => operand.collect_fields(fields),
            Expr::Group(elements) => {
                for element in elements.iter() {
                    element.collect_fields(fields);
                }
            }
        }
    }

    fn fmt_nested(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Expr::Group(_) => write!(f, "({})", self),
            _ => Display::fmt(self, f),
        }
    }
}

impl From<Comparison> for Expr {
    fn from(comparison: Comparison) -> Self {
        Expr::Comparison(comparison)
    }
}

impl Display for Expr {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Expr::Comparison(comparison) => Display::fmt(comparison, f),
            Expr::Connective(connective) => Display::fmt(connective, f),
            Expr::Not(operand) => {
                f.write_str("!")?;
                operand.fmt_nested(f)
            }
            Expr::Group(elements) => {
                elements.head.fmt_nested(f)?;

                for element in &elements.tail {
                    f.write_str(" ")?;
                    element.fmt_nested(f)?;
                }

                Ok(())
            }
        }
    }
}
