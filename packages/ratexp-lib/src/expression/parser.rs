use std::str::FromStr;

use anyhow::anyhow;
use nom::{
    IResult, Parser,
    branch::alt,
    bytes::complete::tag,
    character::complete::{char, multispace0, satisfy},
    combinator::opt,
    error::ParseError,
    sequence::preceded,
};

use crate::expression::Expression;

// Grammar, from lowest to highest precedence:
//
//   union   := concat ('+' concat)*
//   concat  := starred ('.'? starred)*
//   starred := atom '*'*
//   atom    := letter | 'ε' | '1' | '(' union ')'

fn is_letter(c: char) -> bool {
    c.is_ascii_alphanumeric() && c != '1'
}

fn letter<'a, E: ParseError<&'a str>>(input: &'a str) -> IResult<&'a str, Expression, E> {
    let (input, c) = satisfy(is_letter)(input)?;
    Ok((input, Expression::letter(c)))
}

fn epsilon<'a, E: ParseError<&'a str>>(input: &'a str) -> IResult<&'a str, Expression, E> {
    let (input, _) = alt((tag("ε"), tag("1"))).parse(input)?;
    Ok((input, Expression::epsilon()))
}

fn group<'a, E: ParseError<&'a str>>(input: &'a str) -> IResult<&'a str, Expression, E> {
    let (input, _) = char('(')(input)?;
    let (input, expression) = union(input)?;
    let (input, _) = multispace0(input)?;
    let (input, _) = char(')')(input)?;
    Ok((input, expression))
}

fn atom<'a, E: ParseError<&'a str>>(input: &'a str) -> IResult<&'a str, Expression, E> {
    let (input, _) = multispace0(input)?;
    alt((epsilon::<E>, letter::<E>, group::<E>)).parse(input)
}

fn starred<'a, E: ParseError<&'a str>>(input: &'a str) -> IResult<&'a str, Expression, E> {
    let (mut input, mut expression) = atom(input)?;

    while let (rest, Some(_)) = opt(preceded(multispace0, char('*'))).parse(input)? {
        expression = Expression::star(expression);
        input = rest;
    }

    Ok((input, expression))
}

fn concat<'a, E: ParseError<&'a str>>(input: &'a str) -> IResult<&'a str, Expression, E> {
    let (mut input, mut expression) = starred(input)?;

    loop {
        let (rest, _) = opt(preceded(multispace0, char('.'))).parse(input)?;
        match starred::<E>(rest) {
            Ok((rest, next)) => {
                expression = Expression::concat(expression, next);
                input = rest;
            }
            Err(nom::Err::Error(_)) => break,
            Err(e) => return Err(e),
        }
    }

    Ok((input, expression))
}

fn union<'a, E: ParseError<&'a str>>(input: &'a str) -> IResult<&'a str, Expression, E> {
    let (mut input, mut expression) = concat(input)?;

    while let (rest, Some(_)) = opt(preceded(multispace0, char('+'))).parse(input)? {
        let (rest, next) = concat(rest)?;
        expression = Expression::union(expression, next);
        input = rest;
    }

    Ok((input, expression))
}

fn expression<'a, E: ParseError<&'a str>>(input: &'a str) -> IResult<&'a str, Expression, E> {
    let (input, expression) = union(input)?;
    let (input, _) = multispace0(input)?;
    Ok((input, expression))
}

impl Expression {
    /// Parses the textual form, e.g. `(a+b)*.c` or `a b* ε`.
    pub fn parse(input: &str) -> anyhow::Result<Expression> {
        match expression::<nom::error::Error<&str>>(input) {
            Ok(("", expression)) => Ok(expression),
            Ok((rest, _)) => Err(anyhow!(
                "Unexpected input '{}' in rational expression '{}'",
                rest,
                input
            )),
            Err(e) => Err(anyhow!(
                "Failed to parse rational expression '{}': {}",
                input,
                e
            )),
        }
    }
}

impl FromStr for Expression {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Expression::parse(s)
    }
}

#[test]
fn test_parse_precedence() {
    let parsed = Expression::parse("a+b.c*").unwrap();
    let expected = Expression::union(
        Expression::letter('a'),
        Expression::concat(
            Expression::letter('b'),
            Expression::star(Expression::letter('c')),
        ),
    );

    assert_eq!(parsed, expected);
}

#[test]
fn test_parse_juxtaposition_and_whitespace() {
    let dotted = Expression::parse("(a + b) . c").unwrap();
    let juxtaposed = Expression::parse("(a+b)c").unwrap();

    assert_eq!(dotted, juxtaposed);
}

#[test]
fn test_parse_left_associative() {
    let parsed = Expression::parse("a.b.c").unwrap();
    let expected = Expression::concat(
        Expression::concat(Expression::letter('a'), Expression::letter('b')),
        Expression::letter('c'),
    );

    assert_eq!(parsed, expected);
}

#[test]
fn test_parse_epsilon_is_folded() {
    assert_eq!(
        Expression::parse("a.ε.b").unwrap(),
        Expression::parse("ab").unwrap()
    );
    assert!(Expression::parse("1").unwrap().is_epsilon());
}

#[test]
fn test_parse_repeated_star() {
    let parsed = Expression::parse("a**").unwrap();
    let expected = Expression::star(Expression::star(Expression::letter('a')));

    assert_eq!(parsed, expected);
}

#[test]
fn test_parse_errors() {
    assert!(Expression::parse("").is_err());
    assert!(Expression::parse("a+").is_err());
    assert!(Expression::parse("(a").is_err());
    assert!(Expression::parse("a.").is_err());
    assert!(Expression::parse("a)").is_err());
    assert!(Expression::parse("*a").is_err());
}
