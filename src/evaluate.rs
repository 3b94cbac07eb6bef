//! Reduction of a boolean tree into a single value.
//!
//! Each group is folded left to right with a value stack and a single pending connective. A
//! value (or the result of a nested group or negation) is pushed onto the stack; a connective is
//! held until the next value arrives, at which point the two most recent values are popped and
//! combined. The precedence of the parsed expression is already encoded in the nesting, so a
//! strict left-to-right fold of each level is sufficient.
//!
//! | element               | action                                     |
//! | --------------------- | ------------------------------------------ |
//! | `Value(b)`            | push `b`                                   |
//! | `Group(..)`           | evaluate the group, push the result        |
//! | `Not(t)`              | evaluate `t`, push its negation            |
//! | `Connective(c)`       | hold `c` until the next value is pushed    |
//!
//! Trees built by [`substitute`](crate::substitute()) always reduce cleanly. Anything else that
//! violates the alternation of values and connectives is reported as an [`EvaluationError`].

use thiserror::Error;
use tracing::trace;

use crate::expression::Connective;
use crate::substitute::Truth;

/// Error produced when a boolean tree is malformed.
///
/// These errors indicate a tree that did not come from [`substitute`](crate::substitute()), or
/// a defect in the parser and substitution stages.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Error)]
pub enum EvaluationError {
    #[error("Malformed boolean tree: empty group")]
    EmptyGroup,

    #[error("Malformed boolean tree: {0} has no left operand")]
    MissingLeftOperand(Connective),

    #[error("Malformed boolean tree: {1} follows {0} without an operand in between")]
    ConsecutiveConnectives(Connective, Connective),

    #[error("Malformed boolean tree: trailing {0} has no right operand")]
    TrailingConnective(Connective),

    #[error("Malformed boolean tree: {0} values were not joined by a connective")]
    UnjoinedValues(usize),

    #[error("Malformed boolean tree: {0} cannot be evaluated on its own")]
    BareConnective(Connective),
}

/// Value stack for a single level of the tree.
#[derive(Debug, Default)]
struct Stack {
    values: Vec<bool>,
    pending: Option<Connective>,
}

impl Stack {
    fn push(&mut self, value: bool) -> Result<(), EvaluationError> {
        self.values.push(value);

        if let Some(connective) = self.pending.take() {
            let (right, left) = match (self.values.pop(), self.values.pop()) {
                (Some(right), Some(left)) => (right, left),
                _ => return Err(EvaluationError::MissingLeftOperand(connective)),
            };

            self.values.push(connective.apply(left, right));
        }

        Ok(())
    }

    fn hold(&mut self, connective: Connective) -> Result<(), EvaluationError> {
        if let Some(previous) = self.pending {
            return Err(EvaluationError::ConsecutiveConnectives(previous, connective));
        }

        if self.values.is_empty() {
            return Err(EvaluationError::MissingLeftOperand(connective));
        }

        self.pending = Some(connective);
        Ok(())
    }

    fn finish(mut self) -> Result<bool, EvaluationError> {
        if let Some(connective) = self.pending {
            return Err(EvaluationError::TrailingConnective(connective));
        }

        match self.values.len() {
            0 => Err(EvaluationError::EmptyGroup),
            1 => Ok(self.values.remove(0)),
            n => Err(EvaluationError::UnjoinedValues(n)),
        }
    }
}

fn evaluate_group(elements: &[Truth]) -> Result<bool, EvaluationError> {
    let mut stack = Stack::default();

    for element in elements {
        match element {
            Truth::Connective(connective) => stack.hold(*connective)?,
            operand => stack.push(evaluate_operand(operand)?)?,
        }
    }

    stack.finish()
}

fn evaluate_operand(truth: &Truth) -> Result<bool, EvaluationError> {
    match truth {
        Truth::Value(value) => Ok(*value),
        Truth::Not(operand) => evaluate_operand(operand).map(|value| !value),
        Truth::Group(elements) => evaluate_group(elements),
        Truth::Connective(connective) => Err(EvaluationError::BareConnective(*connective)),
    }
}

/// Reduce a boolean tree to a single value.
///
/// ```rust
/// use branching_logic::{evaluate, Connective, Truth};
///
/// let tree = Truth::Group(vec![
///     Truth::Group(vec![true.into(), Connective::And.into(), false.into()]),
///     Connective::Or.into(),
///     true.into(),
/// ]);
///
/// assert_eq!(evaluate(&tree), Ok(true));
/// ```
pub fn evaluate(truth: &Truth) -> Result<bool, EvaluationError> {
    let result = evaluate_operand(truth)?;
    trace!(tree = %truth, result, "evaluated boolean tree");

    Ok(result)
}
