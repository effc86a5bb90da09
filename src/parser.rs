pub(crate) mod basics;

use crate::parser::basics::{parse_id, parse_ident, parse_number, parse_separator};
use controller::{BookId, UserId};
use nom::branch::alt;
use nom::bytes::complete::tag;
use nom::character::complete::char;
use nom::combinator::opt;
use nom::sequence::{delimited, preceded, tuple};
use nom::IResult;

#[derive(Debug, Clone, Eq, PartialEq)]
pub enum Statement {
    Login(UserId),
    QueryBook(BookId),
    Similar(BookId, usize),
    Liked(usize),
    Interest(usize),
    Rate(BookId, i32),
    Action(BookId, String),
    Prefs,
}

fn parse_page(input: &str) -> IResult<&str, usize> {
    let (input, page) = opt(delimited(char('('), parse_number, char(')')))(input)?;
    Ok((input, page.unwrap_or(1) as usize))
}

fn parse_statement(input: &str) -> IResult<&str, Statement> {
    let (input, statement_type) = alt((
        tag("query_book"),
        tag("similar"),
        tag("interest"),
        tag("liked"),
        tag("login"),
        tag("prefs"),
        tag("rate"),
        tag("action"),
    ))(input)?;

    let (input, statement) = match statement_type {
        "login" => {
            let (input, id) = delimited(char('('), parse_id, char(')'))(input)?;
            (input, Statement::Login(id.to_string()))
        }

        "query_book" => {
            let (input, id) = delimited(char('('), parse_id, char(')'))(input)?;
            (input, Statement::QueryBook(id.to_string()))
        }

        "similar" => {
            let (input, (id, page)) = delimited(
                char('('),
                tuple((parse_id, opt(preceded(parse_separator, parse_number)))),
                char(')'),
            )(input)?;

            (
                input,
                Statement::Similar(id.to_string(), page.unwrap_or(1) as usize),
            )
        }

        "liked" => {
            let (input, page) = parse_page(input)?;
            (input, Statement::Liked(page))
        }

        "interest" => {
            let (input, page) = parse_page(input)?;
            (input, Statement::Interest(page))
        }

        "rate" => {
            let (input, (id, _, value)) = delimited(
                char('('),
                tuple((parse_id, parse_separator, parse_number)),
                char(')'),
            )(input)?;

            (input, Statement::Rate(id.to_string(), value as i32))
        }

        "action" => {
            let (input, (id, _, payload)) = delimited(
                char('('),
                tuple((parse_id, parse_separator, parse_ident)),
                char(')'),
            )(input)?;

            (input, Statement::Action(id.to_string(), payload.to_string()))
        }

        "prefs" => (input, Statement::Prefs),

        _ => unreachable!(),
    };

    Ok((input, statement))
}

pub fn parse_line(input: &str) -> Option<Statement> {
    let input = input.trim();
    let (rest, statement) = parse_statement(input).ok()?;

    if rest.is_empty() {
        Some(statement)
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn login_statement() {
        let parsed = parse_statement("login(id(alice))");
        let expected = ("", Statement::Login("alice".into()));

        assert_eq!(parsed, Ok(expected));
    }

    #[test]
    fn similar_statement() {
        let parsed = parse_statement("similar(id(b01))");
        let expected = ("", Statement::Similar("b01".into(), 1));

        assert_eq!(parsed, Ok(expected));

        let parsed = parse_statement("similar(id(b01), 3)");
        let expected = ("", Statement::Similar("b01".into(), 3));

        assert_eq!(parsed, Ok(expected));
    }

    #[test]
    fn paged_statements() {
        let parsed = parse_line("liked");
        assert_eq!(parsed, Some(Statement::Liked(1)));

        let parsed = parse_line("interest(2)");
        assert_eq!(parsed, Some(Statement::Interest(2)));
    }

    #[test]
    fn rate_statement() {
        let parsed = parse_statement("rate(id(b04), 5)");
        let expected = ("", Statement::Rate("b04".into(), 5));

        assert_eq!(parsed, Ok(expected));
    }

    #[test]
    fn action_statement() {
        let parsed = parse_statement("action(id(b02), want-to-read)");
        let expected = ("", Statement::Action("b02".into(), "want-to-read".into()));

        assert_eq!(parsed, Ok(expected));
    }

    #[test]
    fn parse_invalid_line() {
        let parsed = parse_line("rate(id(b01), )");
        assert!(parsed.is_none());

        let parsed = parse_line("similar(id(b01)) trailing");
        assert!(parsed.is_none());
    }

    #[test]
    fn parse_valid_line() {
        let parsed = parse_line("  query_book(id(b07))  ");
        assert_eq!(parsed, Some(Statement::QueryBook("b07".into())));
    }
}
