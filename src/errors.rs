use std::error::Error as StdError;
use std::fmt::{Display, Formatter};

use thiserror::Error;

use crate::evaluate::EvaluationError;
use crate::substitute::LookupError;

/// Error produced when an expression does not match the branching logic grammar.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SyntaxError {
    position: usize,
    remaining: String,
    too_deep: bool,
}

impl SyntaxError {
    #[cfg(feature = "parser")]
    pub(crate) fn at(input: &str, rest: &str) -> Self {
        use nom::Offset;

        Self {
            position: input.offset(rest),
            remaining: rest.to_string(),
            too_deep: false,
        }
    }

    #[cfg(feature = "parser")]
    pub(crate) fn from_error(input: &str, err: nom::error::Error<&str>) -> Self {
        Self {
            too_deep: err.code == nom::error::ErrorKind::TooLarge,
            ..Self::at(input, err.input)
        }
    }

    /// Byte offset into the expression where parsing stopped.
    pub fn position(&self) -> usize {
        self.position
    }

    /// The unparsed input starting at [`SyntaxError::position`].
    pub fn remaining(&self) -> &str {
        &self.remaining
    }

    /// Whether parsing stopped because parentheses or negations were nested too deeply.
    pub fn is_too_deep(&self) -> bool {
        self.too_deep
    }
}

impl Display for SyntaxError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        if self.too_deep {
            write!(f, "Syntax error at position {}: expression is nested too deeply", self.position)
        } else if self.remaining.is_empty() {
            write!(f, "Syntax error at position {}: unexpected end of input", self.position)
        } else {
            write!(
                f,
                "Syntax error at position {}: could not parse remaining input \"{}\"",
                self.position, self.remaining
            )
        }
    }
}

impl StdError for SyntaxError {}

/// Any error produced while parsing and evaluating an expression.
#[derive(Debug, Error)]
pub enum Error {
    #[error(transparent)]
    Syntax(#[from] SyntaxError),

    #[error(transparent)]
    Lookup(#[from] LookupError),

    #[error(transparent)]
    Evaluation(#[from] EvaluationError),
}
