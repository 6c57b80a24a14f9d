use std::fmt;

/// Well-known attribute used by [`FilterNode::required_object_class`],
/// compared ASCII case-insensitively.
const OBJECT_CLASS: &str = "objectClass";

/// One element of a substring pattern such as `*abs*ens*`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Segment {
    /// A `*` wildcard matching zero or more characters.
    Wildcard,
    /// A literal run that must occur verbatim.
    Literal(String),
}

/// A parsed filter expression tree.
///
/// Produced by [`parse`](crate::parse); immutable after construction. The
/// literal in a comparison node is kept as raw text and converted to the
/// property's runtime type at match time, so `(age>=30)` works against both
/// integer- and string-valued `age` properties.
///
/// The `>=`/`<=` operators are inclusive, hence the `GreaterOrEqual` /
/// `LessOrEqual` names.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FilterNode {
    /// Conjunction; the parser guarantees at least one child.
    And(Vec<FilterNode>),
    /// Disjunction; the parser guarantees at least one child.
    Or(Vec<FilterNode>),
    Not(Box<FilterNode>),
    Equal { attr: String, value: String },
    /// Whitespace-insensitive, case-insensitive equality (`~=`).
    Approx { attr: String, value: String },
    GreaterOrEqual { attr: String, value: String },
    LessOrEqual { attr: String, value: String },
    Substring { attr: String, pattern: Vec<Segment> },
    /// Existence test (`attr=*`); the value is never inspected.
    Present { attr: String },
}

impl FilterNode {
    /// Append the canonical textual form of this node to `out`.
    pub(crate) fn write_normalized(&self, out: &mut String) {
        out.push('(');
        match self {
            FilterNode::And(children) => {
                out.push('&');
                for child in children {
                    child.write_normalized(out);
                }
            }
            FilterNode::Or(children) => {
                out.push('|');
                for child in children {
                    child.write_normalized(out);
                }
            }
            FilterNode::Not(child) => {
                out.push('!');
                child.write_normalized(out);
            }
            FilterNode::Equal { attr, value } => {
                out.push_str(attr);
                out.push('=');
                encode_value(out, value);
            }
            FilterNode::Approx { attr, value } => {
                out.push_str(attr);
                out.push_str("~=");
                encode_value(out, &strip_whitespace(value));
            }
            FilterNode::GreaterOrEqual { attr, value } => {
                out.push_str(attr);
                out.push_str(">=");
                encode_value(out, value);
            }
            FilterNode::LessOrEqual { attr, value } => {
                out.push_str(attr);
                out.push_str("<=");
                encode_value(out, value);
            }
            FilterNode::Substring { attr, pattern } => {
                out.push_str(attr);
                out.push('=');
                for segment in pattern {
                    match segment {
                        Segment::Wildcard => out.push('*'),
                        Segment::Literal(run) => encode_value(out, run),
                    }
                }
            }
            FilterNode::Present { attr } => {
                out.push_str(attr);
                out.push_str("=*");
            }
        }
        out.push(')');
    }

    /// The value of an `Equal` node on the `objectClass` attribute, either
    /// at the top level or among the immediate children of a top-level
    /// `And`. Only the first such child is considered; `Or` and every other
    /// shape yield `None`.
    pub(crate) fn required_object_class(&self) -> Option<&str> {
        match self {
            FilterNode::Equal { attr, value } if attr.eq_ignore_ascii_case(OBJECT_CLASS) => {
                Some(value.as_str())
            }
            FilterNode::And(children) => children.iter().find_map(|child| match child {
                FilterNode::Equal { .. } => child.required_object_class(),
                _ => None,
            }),
            _ => None,
        }
    }

    /// Collect every attribute referenced by this subtree, in traversal
    /// order, duplicates preserved.
    pub(crate) fn attributes_into<'a>(&'a self, out: &mut Vec<&'a str>) {
        match self {
            FilterNode::And(children) | FilterNode::Or(children) => {
                for child in children {
                    child.attributes_into(out);
                }
            }
            FilterNode::Not(child) => child.attributes_into(out),
            FilterNode::Equal { attr, .. }
            | FilterNode::Approx { attr, .. }
            | FilterNode::GreaterOrEqual { attr, .. }
            | FilterNode::LessOrEqual { attr, .. }
            | FilterNode::Substring { attr, .. }
            | FilterNode::Present { attr } => out.push(attr),
        }
    }
}

impl fmt::Display for FilterNode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut out = String::new();
        self.write_normalized(&mut out);
        f.write_str(&out)
    }
}

/// Remove every ASCII whitespace character; used by approximate matching on
/// both sides of the comparison.
pub(crate) fn strip_whitespace(s: &str) -> String {
    s.chars().filter(|c| !c.is_ascii_whitespace()).collect()
}

/// Append `value` to `out`, escaping the four metacharacters `( ) * \` and
/// any whitespace at the edges of the value. Edge whitespace must be escaped
/// or a re-parse would trim it away.
fn encode_value(out: &mut String, value: &str) {
    let is_ws = |c: char| c.is_ascii_whitespace();
    let lead = value.len() - value.trim_start_matches(is_ws).len();
    let tail = value.trim_end_matches(is_ws).len();
    for (i, c) in value.char_indices() {
        if matches!(c, '(' | ')' | '*' | '\\') || i < lead || i >= tail {
            out.push('\\');
        }
        out.push(c);
    }
}
