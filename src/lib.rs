#![deny(clippy::all)]
//! Parse and evaluate REDCap branching logic.
//!
//! Branching logic decides whether a record satisfies a condition over its fields, for example
//! `[consent]='1' AND ([age] >= '18' OR [guardian(1)] = '1')`. Evaluation is a pipeline of three
//! stages, each of which is available on its own:
//!
//!   1. [`parse`] turns the expression text into an [`Expr`] whose nesting encodes precedence
//!      (`!`, then comparisons, then `AND`, then `OR`).
//!   2. [`substitute`] resolves every comparison against a [`DataSource`], producing a
//!      [`Truth`] tree of booleans and connectives with the same shape.
//!   3. [`evaluate`] folds the [`Truth`] tree into a single `bool`.
//!
//! All values are compared as text, so `'9' < '10'` does not hold.
//!
//! ```rust
//! use std::collections::HashMap;
//!
//! use branching_logic::parse_and_evaluate;
//!
//! let record = HashMap::from([("status", "active"), ("age", "15")]);
//!
//! assert_eq!(parse_and_evaluate("[status]='active' AND [age]>'18'", &record).unwrap(), false);
//! assert_eq!(parse_and_evaluate("[status]='active' OR [age]>'18'", &record).unwrap(), true);
//! ```
//!
//! # Features
//!
//! - `parser` (default): the expression grammar, [`parse`] and [`parse_and_evaluate`].
//! - `serde`: `Serialize` and `Deserialize` for [`FieldRef`], [`Expr`] and [`Truth`].
//! - `json`: [`DataSource`] for `serde_json` objects.

pub mod errors;
pub mod evaluate;
pub mod expression;
pub mod field;
#[cfg(feature = "parser")]
pub mod parser;
pub mod source;
pub mod substitute;

pub use crate::errors::{Error, SyntaxError};
pub use crate::evaluate::{evaluate, EvaluationError};
pub use crate::expression::{Comparison, ComparisonOp, Connective, Expr, Operand};
pub use crate::field::FieldRef;
#[cfg(feature = "parser")]
pub use crate::parser::{parse, MAX_DEPTH};
pub use crate::source::DataSource;
pub use crate::substitute::{substitute, LookupError, Truth};

impl Expr {
    /// Decide whether a record satisfies this expression.
    ///
    /// A parsed expression can be kept and evaluated against any number of records.
    pub fn is_satisfied_by<S>(&self, source: &S) -> Result<bool, Error>
    where
        S: DataSource + ?Sized,
    {
        let truth = substitute(self, source)?;
        let result = evaluate(&truth)?;

        Ok(result)
    }
}

/// Parse an expression and evaluate it against a record in one step.
#[cfg(feature = "parser")]
pub fn parse_and_evaluate<S>(input: &str, source: &S) -> Result<bool, Error>
where
    S: DataSource + ?Sized,
{
    let expr = parse(input)?;
    expr.is_satisfied_by(source)
}
