//! Parse branching logic strings into expression trees.
//!
//! The grammar, from the loosest binding construct to the tightest:
//!
//! ```text
//! expression  ::= conjunction ( OR conjunction )*
//! conjunction ::= unary ( AND unary )*
//! unary       ::= ( "!" | NOT ) unary | "(" expression ")" | comparison
//! comparison  ::= ( field | literal ) operator literal
//! field       ::= "[" event "]" "[" name "(" option ")" "]"
//!               | "[" event "]" "[" name "]"
//!               | "[" name "(" option ")" "]"
//!               | "[" name "]"
//! operator    ::= "=" | "<>" | ">" | ">=" | "<" | "<="
//! literal     ::= "'" text "'" | '"' text '"'
//! ```
//!
//! Names are made of ASCII letters, digits and underscores. Keywords are case-insensitive and
//! whitespace is allowed between any two tokens. Parentheses and negations may be nested at
//! most [`MAX_DEPTH`] levels deep.
//!
//! ```rust
//! use branching_logic::parse;
//!
//! let expr = parse("[consent]='1' and ([age] >= '18' or [guardian_consent(1)] = '1')").unwrap();
//! assert_eq!(expr.fields().len(), 3);
//!
//! assert!(parse("[age] >= 18").is_err());
//! ```

mod common;
mod field;
mod operators;

use nom::branch::alt;
use nom::character::complete::{char, multispace0};
use nom::combinator::map;
use nom::sequence::{delimited, preceded, terminated, tuple};
use nom::{Finish, IResult};
use tracing::trace;

use self::common::{commit, literal, nested, ws};
use self::field::field_ref;
use self::operators::comparison_op;
use crate::errors::SyntaxError;
use crate::expression::{Comparison, Expr, Operand};

/// Deepest nesting of parentheses and negations accepted by [`parse`].
pub const MAX_DEPTH: usize = 64;

fn comparison(input: &str) -> IResult<&str, Comparison> {
    let operand = alt((map(field_ref, Operand::Field), map(literal, Operand::Literal)));
    let mut parser = tuple((operand, ws(comparison_op), literal));
    let (rest, (left, op, right)) = parser(input)?;

    Ok((rest, Comparison { left, op, right }))
}

fn subexpression(input: &str, depth: usize) -> IResult<&str, Expr> {
    let (next, depth) = terminated(nested(char('('), depth), multispace0)(input)?;
    let (next, expr) = disjunction(next, depth).map_err(commit)?;
    let (rest, _) = preceded(multispace0, char(')'))(next).map_err(commit)?;

    Ok((rest, expr))
}

fn primary(input: &str, depth: usize) -> IResult<&str, Expr> {
    let mut parser = alt((|i| subexpression(i, depth), map(comparison, Expr::Comparison)));
    parser(input)
}

fn unary(input: &str, depth: usize) -> IResult<&str, Expr> {
    let mut parser = alt((operators::not(depth, unary), |i| primary(i, depth)));
    parser(input)
}

fn conjunction(input: &str, depth: usize) -> IResult<&str, Expr> {
    let mut parser = operators::and(move |i| unary(i, depth));
    parser(input)
}

fn disjunction(input: &str, depth: usize) -> IResult<&str, Expr> {
    let mut parser = operators::or(move |i| conjunction(i, depth));
    parser(input)
}

fn expression(input: &str) -> IResult<&str, Expr> {
    let mut parser = delimited(multispace0, |i| disjunction(i, 0), multispace0);
    parser(input)
}

/// Parse a branching logic expression, requiring the whole input to be consumed.
pub fn parse(input: &str) -> Result<Expr, SyntaxError> {
    trace!(input, "parsing branching logic");

    let (rest, expr) = expression(input).finish().map_err(|err| SyntaxError::from_error(input, err))?;

    if !rest.is_empty() {
        return Err(SyntaxError::at(input, rest));
    }

    Ok(expr)
}
