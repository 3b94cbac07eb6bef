//! The four surface forms of a field reference.

use nom::branch::alt;
use nom::character::complete::{char, multispace0};
use nom::sequence::{delimited, pair, terminated};
use nom::IResult;

use super::common::identifier;
use crate::field::FieldRef;

fn checkbox(input: &str) -> IResult<&str, &str> {
    let mut parser = delimited(char('('), identifier, char(')'));
    parser(input)
}

fn event(input: &str) -> IResult<&str, &str> {
    let mut parser = terminated(delimited(char('['), identifier, char(']')), multispace0);
    parser(input)
}

fn variable(input: &str) -> IResult<&str, FieldRef> {
    let mut parser = delimited(char('['), identifier, char(']'));
    let (rest, name) = parser(input)?;

    Ok((rest, FieldRef::new(name)))
}

fn variable_in_check(input: &str) -> IResult<&str, FieldRef> {
    let mut parser = delimited(char('['), pair(identifier, checkbox), char(']'));
    let (rest, (name, option)) = parser(input)?;

    Ok((rest, FieldRef::new(name).with_checkbox(option)))
}

fn variable_in_event(input: &str) -> IResult<&str, FieldRef> {
    let mut parser = pair(event, variable);
    let (rest, (event_name, field)) = parser(input)?;

    Ok((rest, field.with_event(event_name)))
}

fn varcheck_in_event(input: &str) -> IResult<&str, FieldRef> {
    let mut parser = pair(event, variable_in_check);
    let (rest, (event_name, field)) = parser(input)?;

    Ok((rest, field.with_event(event_name)))
}

/// Any field reference, trying the most qualified form first.
pub fn field_ref(input: &str) -> IResult<&str, FieldRef> {
    let mut parser = alt((varcheck_in_event, variable_in_event, variable_in_check, variable));
    parser(input)
}
