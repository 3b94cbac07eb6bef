//! Resolution of comparison leaves into booleans.
//!
//! Substitution walks an [`Expr`] depth-first and replaces every comparison with the boolean
//! obtained by looking up its field in a [`DataSource`] and comparing the value against the
//! literal. The resulting [`Truth`] tree keeps the shape of the expression: connectives and
//! negations are carried over untouched, and only groups that end up holding a single element
//! are collapsed into that element.

use std::fmt::{Display, Formatter};

use thiserror::Error;
use tracing::debug;

use crate::expression::{Comparison, Connective, Expr, Operand};
use crate::field::FieldRef;
use crate::source::DataSource;

/// Boolean tree produced by substitution and reduced by [`evaluate`](crate::evaluate()).
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Truth {
    Value(bool),
    Connective(Connective),
    Not(Box<Truth>),
    Group(Vec<Truth>),
}

impl From<bool> for Truth {
    fn from(value: bool) -> Self {
        Truth::Value(value)
    }
}

impl From<Connective> for Truth {
    fn from(connective: Connective) -> Self {
        Truth::Connective(connective)
    }
}

impl Display for Truth {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Truth::Value(value) => write!(f, "{}", value),
            Truth::Connective(connective) => write!(f, "{}", connective),
            Truth::Not(operand) => write!(f, "!{}", operand),
            Truth::Group(elements) => {
                f.write_str("[")?;

                for (index, element) in elements.iter().enumerate() {
                    if index > 0 {
                        f.write_str(" ")?;
                    }
                    write!(f, "{}", element)?;
                }

                f.write_str("]")
            }
        }
    }
}

/// Error produced when the data source has no value for a referenced field.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
#[error("Could not find field {field}")]
pub struct LookupError {
    field: FieldRef,
}

impl LookupError {
    /// The field reference that could not be resolved.
    pub fn field(&self) -> &FieldRef {
        &self.field
    }
}

impl From<FieldRef> for LookupError {
    fn from(field: FieldRef) -> Self {
        Self { field }
    }
}

fn operand_value<S>(operand: &Operand, source: &S) -> Result<String, LookupError>
where
    S: DataSource + ?Sized,
{
    match operand {
        Operand::Field(field) => source
            .value_for_field(field)
            .ok_or_else(|| LookupError::from(field.clone())),
        Operand::Literal(value) => Ok(value.clone()),
    }
}

fn resolve<S>(comparison: &Comparison, source: &S) -> Result<bool, LookupError>
where
    S: DataSource + ?Sized,
{
    let actual = operand_value(&comparison.left, source)?;
    let result = comparison.op.apply(&actual, &comparison.right);

    debug!(
        operand = %comparison.left,
        op = %comparison.op,
        expected = %comparison.right,
        actual = %actual,
        result,
        "resolved comparison"
    );

    Ok(result)
}

/// Replace every comparison of the expression with its boolean value.
///
/// Fails with the first [`LookupError`] encountered; no partial tree is returned.
///
/// ```rust
/// use std::collections::HashMap;
///
/// use branching_logic::{parse, substitute, Connective, Truth};
///
/// let expr = parse("[a]='1' OR [b]='2'").unwrap();
/// let record = HashMap::from([("a", "0"), ("b", "2")]);
/// let truth = substitute(&expr, &record).unwrap();
///
/// assert_eq!(truth, Truth::Group(vec![false.into(), Connective::Or.into(), true.into()]));
/// ```
pub fn substitute<S>(expr: &Expr, source: &S) -> Result<Truth, LookupError>
where
    S: DataSource + ?Sized,
{
    match expr {
        Expr::Comparison(comparison) => resolve(comparison, source).map(Truth::Value),
        Expr::Connective(connective) => Ok(Truth::Connective(*connective)),
        Expr::Not(operand) => substitute(operand, source).map(|inner| Truth::Not(Box::new(inner))),
        Expr::Group(elements) => {
            let mut resolved = elements
                .iter()
                .map(|element| substitute(element, source))
                .collect::<Result<Vec<_>, _>>()?;

            if resolved.len() == 1 {
                Ok(resolved.remove(0))
            } else {
                Ok(Truth::Group(resolved))
            }
        }
    }
}
