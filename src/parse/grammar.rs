use winnow::error::{ErrMode, ModalResult, ParserError};
use winnow::prelude::*;
use winnow::stream::Stream;
use winnow::token::take_while;

use crate::types::{FilterNode, Segment};

// The grammar is scanner-driven rather than combinator-driven: every error
// message interpolates the unparsed tail of the input, and the present-test
// disambiguation needs an explicit checkpoint/reset, so the productions
// mostly peek and consume tokens by hand.

/// Internal grammar error: a rendered message, or `None` when the input
/// ended in the middle of a production.
#[derive(Debug)]
pub(super) struct Syntax {
    message: Option<String>,
}

impl<I: Stream> ParserError<I> for Syntax {
    type Inner = Self;

    fn from_input(_input: &I) -> Self {
        Syntax { message: None }
    }

    fn into_inner(self) -> Result<Self::Inner, Self> {
        Ok(self)
    }
}

/// Render a grammar failure as the public error message.
pub(super) fn describe(err: ErrMode<Syntax>) -> String {
    let syntax = match err {
        ErrMode::Backtrack(e) | ErrMode::Cut(e) => e,
        ErrMode::Incomplete(_) => Syntax { message: None },
    };
    syntax
        .message
        .unwrap_or_else(|| String::from("Filter ended abruptly"))
}

fn cut(message: String) -> ErrMode<Syntax> {
    ErrMode::Cut(Syntax {
        message: Some(message),
    })
}

fn abrupt() -> ErrMode<Syntax> {
    ErrMode::Cut(Syntax { message: None })
}

fn ws(input: &mut &str) -> ModalResult<(), Syntax> {
    let _: &str = take_while(0.., |c: char| c.is_ascii_whitespace()).parse_next(input)?;
    Ok(())
}

fn expect(wanted: char, input: &mut &str) -> ModalResult<(), Syntax> {
    match input.chars().next() {
        Some(c) if c == wanted => {
            let _ = input.next_token();
            Ok(())
        }
        Some(_) => Err(cut(format!("Missing \"{wanted}\" at \"{input}\""))),
        None => Err(abrupt()),
    }
}

// -- filter := '(' filter-comp ')' ------------------------------------------

pub(super) fn filter(input: &mut &str) -> ModalResult<FilterNode, Syntax> {
    ws(input)?;
    expect('(', input)?;
    let node = filter_comp(input)?;
    ws(input)?;
    expect(')', input)?;
    ws(input)?;
    Ok(node)
}

fn filter_comp(input: &mut &str) -> ModalResult<FilterNode, Syntax> {
    ws(input)?;
    match input.chars().next() {
        Some('&') => {
            let _ = input.next_token();
            Ok(FilterNode::And(children(input)?))
        }
        Some('|') => {
            let _ = input.next_token();
            Ok(FilterNode::Or(children(input)?))
        }
        Some('!') => {
            let _ = input.next_token();
            not(input)
        }
        Some(_) => item(input),
        None => Err(abrupt()),
    }
}

/// One or more parenthesized child filters, for `&` and `|`.
fn children(input: &mut &str) -> ModalResult<Vec<FilterNode>, Syntax> {
    let mut nodes = vec![filter(input)?];
    loop {
        match input.chars().next() {
            Some('(') => nodes.push(filter(input)?),
            Some(_) => break,
            None => return Err(abrupt()),
        }
    }
    Ok(nodes)
}

fn not(input: &mut &str) -> ModalResult<FilterNode, Syntax> {
    let child = filter(input)?;
    Ok(FilterNode::Not(Box::new(child)))
}

// -- item := attr ( '~=' | '>=' | '<=' | '=' '*'? ) ... ----------------------

fn item(input: &mut &str) -> ModalResult<FilterNode, Syntax> {
    let attr = attribute(input)?;
    ws(input)?;

    let mut lookahead = input.chars();
    let first = lookahead.next();
    let second = lookahead.next();

    match first {
        Some('~') => {
            operator_tail(input, second)?;
            let value = value(input)?;
            Ok(FilterNode::Approx { attr, value })
        }
        Some('>') => {
            operator_tail(input, second)?;
            let value = value(input)?;
            Ok(FilterNode::GreaterOrEqual { attr, value })
        }
        Some('<') => {
            operator_tail(input, second)?;
            let value = value(input)?;
            Ok(FilterNode::LessOrEqual { attr, value })
        }
        Some('=') => {
            if second == Some('*') {
                // Tentatively read "=*" as a present test; it only is one
                // when the next significant character closes the item.
                // Otherwise rewind and scan "*..." as a substring pattern.
                let checkpoint = input.checkpoint();
                let _ = input.next_token();
                let _ = input.next_token();
                ws(input)?;
                match input.chars().next() {
                    Some(')') => return Ok(FilterNode::Present { attr }),
                    Some(_) => input.reset(&checkpoint),
                    None => return Err(abrupt()),
                }
            } else if second.is_none() {
                return Err(abrupt());
            }
            let _ = input.next_token();
            match substring(input)? {
                Scanned::Literal(value) => Ok(FilterNode::Equal { attr, value }),
                Scanned::Pattern(pattern) => Ok(FilterNode::Substring { attr, pattern }),
            }
        }
        Some(_) => Err(cut(format!("Invalid operator at \"{input}\""))),
        None => Err(abrupt()),
    }
}

/// Consume a two-character operator whose second character must be `=`.
fn operator_tail(input: &mut &str, second: Option<char>) -> ModalResult<(), Syntax> {
    match second {
        Some('=') => {
            let _ = input.next_token();
            let _ = input.next_token();
            Ok(())
        }
        Some(_) => Err(cut(format!("Invalid operator at \"{input}\""))),
        None => Err(abrupt()),
    }
}

/// Attribute name: everything up to an operator or paren, with trailing
/// whitespace trimmed. Interior whitespace is part of the name.
fn attribute(input: &mut &str) -> ModalResult<String, Syntax> {
    ws(input)?;
    let scanned: &str = take_while(0.., |c: char| {
        !matches!(c, '~' | '<' | '>' | '=' | '(' | ')')
    })
    .parse_next(input)?;
    if input.is_empty() {
        // ran off the end without hitting an operator or paren
        return Err(abrupt());
    }
    let name = scanned.trim_end_matches(|c: char| c.is_ascii_whitespace());
    if name.is_empty() {
        return Err(cut(format!("Missing attr at \"{input}\"")));
    }
    Ok(name.to_owned())
}

/// Comparison value: verbatim up to an unescaped `)`, with `\` escaping the
/// following character. Unescaped whitespace at the edges is insignificant;
/// interior and escaped whitespace is kept.
fn value(input: &mut &str) -> ModalResult<String, Syntax> {
    ws(input)?;
    let mut out = String::new();
    let mut end = 0;
    loop {
        match input.chars().next() {
            Some(')') => break,
            Some('(') => return Err(cut(format!("Invalid value at \"{input}\""))),
            Some('\\') => {
                let _ = input.next_token();
                match input.next_token() {
                    Some(c) => {
                        out.push(c);
                        end = out.len();
                    }
                    None => return Err(abrupt()),
                }
            }
            Some(c) => {
                let _ = input.next_token();
                out.push(c);
                if !c.is_ascii_whitespace() {
                    end = out.len();
                }
            }
            None => return Err(abrupt()),
        }
    }
    out.truncate(end);
    if out.is_empty() {
        return Err(cut(format!("Missing value at \"{input}\"")));
    }
    Ok(out)
}

enum Scanned {
    Literal(String),
    Pattern(Vec<Segment>),
}

/// Substring value: literal runs split by `*` wildcards. A scan with exactly
/// one literal run and no wildcard collapses to a plain equality value.
fn substring(input: &mut &str) -> ModalResult<Scanned, Syntax> {
    ws(input)?;
    let mut segments: Vec<Segment> = Vec::new();
    let mut run = String::new();
    let mut end = 0;
    loop {
        match input.chars().next() {
            Some(')') => {
                run.truncate(end);
                if !run.is_empty() {
                    segments.push(Segment::Literal(run));
                }
                break;
            }
            Some('(') => return Err(cut(format!("Invalid value at \"{input}\""))),
            Some('*') => {
                let _ = input.next_token();
                if !run.is_empty() {
                    segments.push(Segment::Literal(std::mem::take(&mut run)));
                }
                run.clear();
                end = 0;
                segments.push(Segment::Wildcard);
            }
            Some('\\') => {
                let _ = input.next_token();
                match input.next_token() {
                    Some(c) => {
                        run.push(c);
                        end = run.len();
                    }
                    None => return Err(abrupt()),
                }
            }
            Some(c) => {
                let _ = input.next_token();
                run.push(c);
                if !c.is_ascii_whitespace() {
                    end = run.len();
                }
            }
            None => return Err(abrupt()),
        }
    }

    if segments.is_empty() {
        return Err(cut(format!("Missing value at \"{input}\"")));
    }
    if let [Segment::Literal(single)] = segments.as_slice() {
        return Ok(Scanned::Literal(single.clone()));
    }
    Ok(Scanned::Pattern(segments))
}
