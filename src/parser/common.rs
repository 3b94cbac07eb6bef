use nom::branch::alt;
use nom::bytes::complete::{is_not, tag_no_case, take_while1};
use nom::character::complete::{char, multispace0, satisfy};
use nom::combinator::{map, not, opt};
use nom::error::{Error, ErrorKind};
use nom::sequence::{delimited, terminated};
use nom::{IResult, Parser};

use super::MAX_DEPTH;

pub fn is_ident_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '_'
}

/// Field, event and checkbox names: one or more ASCII letters, digits or `_`.
pub fn identifier(input: &str) -> IResult<&str, &str> {
    take_while1(is_ident_char)(input)
}

/// Quoted text value. Either quote character may be used, there are no escapes, and the value
/// may be empty.
pub fn literal(input: &str) -> IResult<&str, String> {
    let single = delimited(char('\''), opt(is_not("'")), char('\''));
    let double = delimited(char('"'), opt(is_not("\"")), char('"'));
    let mut parser = map(alt((single, double)), |text: Option<&str>| text.unwrap_or_default().to_string());

    parser(input)
}

pub fn ws<'a, O, P>(parser: P) -> impl FnMut(&'a str) -> IResult<&'a str, O>
where
    P: Parser<&'a str, O, Error<&'a str>>,
{
    delimited(multispace0, parser, multispace0)
}

/// Case-insensitive keyword that is not the prefix of a longer word.
pub fn keyword<'a>(word: &'static str) -> impl FnMut(&'a str) -> IResult<&'a str, &'a str> {
    terminated(tag_no_case(word), not(satisfy(is_ident_char)))
}

/// Opening marker of a nested operand, yielding the depth of that operand.
///
/// Once `depth` has reached [`MAX_DEPTH`] the marker fails without backtracking, at its own
/// position.
pub fn nested<'a, O, P>(mut marker: P, depth: usize) -> impl FnMut(&'a str) -> IResult<&'a str, usize>
where
    P: Parser<&'a str, O, Error<&'a str>>,
{
    move |input: &'a str| {
        let (rest, _) = marker.parse(input)?;

        if depth >= MAX_DEPTH {
            return Err(nom::Err::Failure(Error::new(input, ErrorKind::TooLarge)));
        }

        Ok((rest, depth + 1))
    }
}

/// Turn a recoverable error into a failure, so that enclosing alternatives are not tried.
pub fn commit<E>(err: nom::Err<E>) -> nom::Err<E> {
    match err {
        nom::Err::Error(e) => nom::Err::Failure(e),
        other => other,
    }
}
