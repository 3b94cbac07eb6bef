use nom::branch::alt;
use nom::bytes::complete::tag;
use nom::character::complete::multispace0;
use nom::combinator::{cut, value};
use nom::multi::many0;
use nom::sequence::{delimited, pair, preceded};
use nom::IResult;

use super::common::{commit, keyword, nested, ws};
use crate::expression::{ComparisonOp, Connective, Expr};

/// Relational operator, matching two-character operators before their one-character prefixes.
pub fn comparison_op(input: &str) -> IResult<&str, ComparisonOp> {
    let mut parser = alt((
        value(ComparisonOp::Ne, tag("<>")),
        value(ComparisonOp::Le, tag("<=")),
        value(ComparisonOp::Ge, tag(">=")),
        value(ComparisonOp::Lt, tag("<")),
        value(ComparisonOp::Gt, tag(">")),
        value(ComparisonOp::Eq, tag("=")),
    ));

    parser(input)
}

/// Negation of an operand one level deeper than `depth`.
pub fn not<'a, S>(depth: usize, mut operand: S) -> impl FnMut(&'a str) -> IResult<&'a str, Expr>
where
    S: FnMut(&'a str, usize) -> IResult<&'a str, Expr>,
{
    let mut op = delimited(multispace0, nested(alt((tag("!"), keyword("NOT"))), depth), multispace0);

    move |input: &'a str| {
        let (next, depth) = op(input)?;
        let (rest, operand) = operand(next, depth).map_err(commit)?;

        Ok((rest, operand.negated()))
    }
}

/// Left-associative chain of operands joined by the same connective, collected into one group.
fn chain<'a, S>(connective: Connective, operand: S) -> impl FnMut(&'a str) -> IResult<&'a str, Expr>
where
    S: Fn(&'a str) -> IResult<&'a str, Expr> + Copy,
{
    let word = match connective {
        Connective::And => "AND",
        Connective::Or => "OR",
    };
    let mut parser = pair(operand, many0(preceded(ws(keyword(word)), cut(operand))));

    move |input: &'a str| {
        let (rest, (first, others)) = parser(input)?;

        Ok((rest, Expr::joined(connective, first, others)))
    }
}

pub fn and<'a, S>(operand: S) -> impl FnMut(&'a str) -> IResult<&'a str, Expr>
where
    S: Fn(&'a str) -> IResult<&'a str, Expr> + Copy,
{
    chain(Connective::And, operand)
}

pub fn or<'a, S>(operand: S) -> impl FnMut(&'a str) -> IResult<&'a str, Expr>
where
    S: Fn(&'a str) -> IResult<&'a str, Expr> + Copy,
{
    chain(Connective::Or, operand)
}

#[cfg(test)]
mod tests {
    use std::error::Error;

    use super::comparison_op;
    use crate::expression::ComparisonOp;

    #[test]
    fn parse_comparison_op() -> Result<(), Box<dyn Error>> {
        let cases = [
            ("<>'1'", ComparisonOp::Ne),
            ("<='1'", ComparisonOp::Le),
            (">='1'", ComparisonOp::Ge),
            ("<'1'", ComparisonOp::Lt),
            (">'1'", ComparisonOp::Gt),
            ("='1'", ComparisonOp::Eq),
        ];

        for (input, expected) in cases {
            let (rest, op) = comparison_op(input)?;

            assert_eq!(rest, "'1'");
            assert_eq!(op, expected);
        }

        assert!(comparison_op("!='1'").is_err());

        Ok(())
    }
}
