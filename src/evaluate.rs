//! Filter evaluation against a property dictionary.
//!
//! Comparison is type-aware: the filter literal is kept as raw text and
//! converted to the runtime type of whatever value the dictionary returns,
//! so one filter works against differently-typed property sets.

use std::num::ParseFloatError;
use std::str::FromStr;

use crate::types::{strip_whitespace, Dictionary, FilterNode, MatchError, Segment, Value};

#[derive(Clone, Copy)]
enum Op {
    Equal,
    Approx,
    GreaterOrEqual,
    LessOrEqual,
}

/// Walk the expression tree against `properties`.
///
/// `&` and `|` short-circuit left to right; an error from any visited
/// comparison aborts the whole match.
pub(crate) fn matches<D: Dictionary + ?Sized>(
    node: &FilterNode,
    properties: &D,
    ignore_case: bool,
) -> Result<bool, MatchError> {
    match node {
        FilterNode::And(children) => {
            for child in children {
                if !matches(child, properties, ignore_case)? {
                    return Ok(false);
                }
            }
            Ok(true)
        }
        FilterNode::Or(children) => {
            for child in children {
                if matches(child, properties, ignore_case)? {
                    return Ok(true);
                }
            }
            Ok(false)
        }
        FilterNode::Not(child) => Ok(!matches(child, properties, ignore_case)?),
        FilterNode::Present { attr } => Ok(lookup(properties, attr, ignore_case).is_some()),
        FilterNode::Equal { attr, value } => leaf(properties, attr, ignore_case, Op::Equal, value),
        FilterNode::Approx { attr, value } => leaf(properties, attr, ignore_case, Op::Approx, value),
        FilterNode::GreaterOrEqual { attr, value } => {
            leaf(properties, attr, ignore_case, Op::GreaterOrEqual, value)
        }
        FilterNode::LessOrEqual { attr, value } => {
            leaf(properties, attr, ignore_case, Op::LessOrEqual, value)
        }
        FilterNode::Substring { attr, pattern } => {
            match lookup(properties, attr, ignore_case) {
                Some(Value::String(text)) => Ok(substring_match(pattern, text)),
                Some(Value::List(items)) => Ok(items.iter().any(|item| match item {
                    Value::String(text) => substring_match(pattern, text),
                    _ => false,
                })),
                // Substring patterns are defined on strings only.
                Some(_) | None => Ok(false),
            }
        }
    }
}

fn lookup<'a, D: Dictionary + ?Sized>(
    properties: &'a D,
    attr: &str,
    ignore_case: bool,
) -> Option<&'a Value> {
    if ignore_case {
        properties.get_ignore_case(attr)
    } else {
        properties.get(attr)
    }
}

/// An absent attribute never matches and never errors.
fn leaf<D: Dictionary + ?Sized>(
    properties: &D,
    attr: &str,
    ignore_case: bool,
    op: Op,
    literal: &str,
) -> Result<bool, MatchError> {
    match lookup(properties, attr, ignore_case) {
        Some(value) => compare(value, op, literal),
        None => Ok(false),
    }
}

fn compare(value: &Value, op: Op, literal: &str) -> Result<bool, MatchError> {
    match value {
        Value::String(s) => Ok(compare_string(s, op, literal)),
        Value::Int(i) => compare_int(*i, op, literal),
        Value::Float(f) => compare_float(*f, op, literal),
        Value::Double(d) => compare_float(*d, op, literal),
        Value::Bool(b) => Ok(compare_bool(*b, literal)),
        Value::Char(c) => compare_char(*c, op, literal),
        // A list matches when any element does.
        Value::List(items) => {
            for item in items {
                if compare(item, op, literal)? {
                    return Ok(true);
                }
            }
            Ok(false)
        }
    }
}

fn compare_string(have: &str, op: Op, literal: &str) -> bool {
    match op {
        Op::Equal => have == literal,
        Op::Approx => {
            strip_whitespace(have).eq_ignore_ascii_case(&strip_whitespace(literal))
        }
        Op::GreaterOrEqual => have >= literal,
        Op::LessOrEqual => have <= literal,
    }
}

fn compare_int(have: i64, op: Op, literal: &str) -> Result<bool, MatchError> {
    let want: i64 = literal.trim().parse().map_err(|source| MatchError::Int {
        literal: literal.to_owned(),
        source,
    })?;
    Ok(match op {
        Op::Equal | Op::Approx => have == want,
        Op::GreaterOrEqual => have >= want,
        Op::LessOrEqual => have <= want,
    })
}

fn compare_float<T>(have: T, op: Op, literal: &str) -> Result<bool, MatchError>
where
    T: PartialOrd + FromStr<Err = ParseFloatError>,
{
    let want: T = literal.trim().parse().map_err(|source| MatchError::Float {
        literal: literal.to_owned(),
        source,
    })?;
    Ok(match op {
        Op::Equal | Op::Approx => have == want,
        Op::GreaterOrEqual => have >= want,
        Op::LessOrEqual => have <= want,
    })
}

/// Every operator degenerates to equality for booleans. The literal is
/// coerced: `true` iff it equals "true" ignoring case and edge whitespace,
/// anything else is `false`.
fn compare_bool(have: bool, literal: &str) -> bool {
    let want = literal.trim().eq_ignore_ascii_case("true");
    have == want
}

fn compare_char(have: char, op: Op, literal: &str) -> Result<bool, MatchError> {
    let want = literal.trim().chars().next().ok_or(MatchError::Char)?;
    Ok(match op {
        Op::Equal => have == want,
        Op::Approx => {
            have == want || have.to_ascii_lowercase() == want.to_ascii_lowercase()
        }
        Op::GreaterOrEqual => have >= want,
        Op::LessOrEqual => have <= want,
    })
}

/// Match a wildcard pattern against `text`.
///
/// Literal runs before the last segment are anchored greedily left to
/// right; the final segment anchors to the end of the text. Consecutive
/// wildcards behave as one.
pub(crate) fn substring_match(pattern: &[Segment], text: &str) -> bool {
    let mut pos = 0;
    let size = pattern.len();
    let mut i = 0;
    while i < size {
        if i + 1 == size {
            // last segment: anchor to the end
            return match &pattern[i] {
                Segment::Wildcard => true,
                Segment::Literal(run) => text.ends_with(run.as_str()),
            };
        }
        match &pattern[i] {
            Segment::Wildcard => {
                let Segment::Literal(next) = &pattern[i + 1] else {
                    i += 1;
                    continue;
                };
                let Some(index) = text[pos..].find(next.as_str()) else {
                    return false;
                };
                pos += index + next.len();
                if i + 2 < size {
                    // the literal after the wildcard is consumed too
                    i += 1;
                }
            }
            Segment::Literal(run) => {
                if text[pos..].starts_with(run.as_str()) {
                    pos += run.len();
                } else {
                    return false;
                }
            }
        }
        i += 1;
    }
    true
}
