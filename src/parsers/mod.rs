use crate::rule::Rule;
use crate::symbol::Symbol;

use nom::{
    IResult, Parser,
    bytes::complete::take_till1,
    character::complete::{space0, space1},
    combinator::all_consuming,
    multi::many0,
    sequence::{delimited, preceded},
};

/// One whitespace-free token, classified into a [`Symbol`]
pub fn symbol(input: &str) -> IResult<&str, Symbol> {
    let (input, name) = take_till1(|c: char| c.is_whitespace()).parse(input)?;
    Ok((input, Symbol::new(name)))
}

pub fn symbol_complete(input: &str) -> IResult<&str, Symbol> {
    all_consuming(symbol).parse(input)
}

/// A rule line: `LHS RHS1 RHS2 ...`, tokens separated by spaces or tabs.
/// A lone `LHS` is an empty string production.
pub fn rule(input: &str) -> IResult<&str, Rule> {
    let (input, lhs) = preceded(space0, symbol).parse(input)?;
    let (input, rhs) = many0(preceded(space1, symbol)).parse(input)?;
    let (input, _) = space0::<&str, nom::error::Error<&str>>(input)?;

    Ok((input, Rule::new(lhs, rhs)))
}

pub fn rule_complete(input: &str) -> IResult<&str, Rule> {
    all_consuming(delimited(space0, rule, space0)).parse(input)
}
