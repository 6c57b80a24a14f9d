use std::fmt;
use std::hash::{Hash, Hasher};
use std::sync::OnceLock;

use crate::parse::ParseError;

use super::dict::Dictionary;
use super::error::MatchError;
use super::node::FilterNode;

/// A compiled, immutable filter expression. Thread-safe and designed to be
/// shared (e.g. behind `Arc`) and evaluated concurrently.
///
/// # Example
///
/// ```
/// use propmatch::{Filter, Properties};
///
/// let filter = Filter::parse("(&(cn=Ba*)(age>=30))").unwrap();
/// let props = Properties::new()
///     .set("cn", "Babs Jensen")
///     .set("age", 35_i64);
/// assert!(filter.matches(&props).unwrap());
/// ```
#[derive(Debug, Clone)]
pub struct Filter {
    node: FilterNode,
    /// Canonical form, filled on first use. `OnceLock` keeps a concurrent
    /// first-use race harmless.
    text: OnceLock<String>,
}

impl Filter {
    /// Parse a filter string. Equivalent to [`parse`](crate::parse).
    ///
    /// # Errors
    ///
    /// Returns [`ParseError`] when the input is not a single well-formed
    /// filter expression.
    pub fn parse(filterstring: &str) -> Result<Self, ParseError> {
        crate::parse::parse(filterstring)
    }

    /// The underlying expression tree.
    #[must_use]
    pub fn node(&self) -> &FilterNode {
        &self.node
    }

    /// Match against a property source, looking attribute names up ASCII
    /// case-insensitively.
    ///
    /// # Errors
    ///
    /// Returns [`MatchError`] when a comparison against a typed property
    /// requires converting a malformed filter literal.
    pub fn matches<D: Dictionary + ?Sized>(&self, properties: &D) -> Result<bool, MatchError> {
        crate::evaluate::matches(&self.node, properties, true)
    }

    /// Match against a property source with exact attribute-name lookup.
    ///
    /// # Errors
    ///
    /// Same as [`matches`](Self::matches).
    pub fn matches_case<D: Dictionary + ?Sized>(&self, properties: &D) -> Result<bool, MatchError> {
        crate::evaluate::matches(&self.node, properties, false)
    }

    /// Canonical textual form of the expression tree: every node is
    /// parenthesized, whitespace is dropped, values are re-escaped, and
    /// approximate-match values are whitespace-stripped.
    #[must_use]
    pub fn normalize(&self) -> String {
        let mut out = String::new();
        self.node.write_normalized(&mut out);
        out
    }

    /// The value required of the `objectClass` attribute, when this filter
    /// pins it with an equality test at the top level or directly under a
    /// top-level `&`. Used by registries as a pre-filter fast path.
    #[must_use]
    pub fn required_object_class(&self) -> Option<&str> {
        self.node.required_object_class()
    }

    /// Every attribute referenced anywhere in the filter, in traversal
    /// order, duplicates preserved.
    #[must_use]
    pub fn attributes(&self) -> Vec<&str> {
        let mut out = Vec::new();
        self.node.attributes_into(&mut out);
        out
    }

    fn text(&self) -> &str {
        self.text.get_or_init(|| self.normalize())
    }
}

impl From<FilterNode> for Filter {
    fn from(node: FilterNode) -> Self {
        Self {
            node,
            text: OnceLock::new(),
        }
    }
}

impl fmt::Display for Filter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.text())
    }
}

/// Filters compare by canonical string, not tree shape: two filters parsed
/// from differently-spaced inputs are equal when they normalize alike.
impl PartialEq for Filter {
    fn eq(&self, other: &Self) -> bool {
        self.text() == other.text()
    }
}

impl Eq for Filter {}

impl Hash for Filter {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.text().hash(state);
    }
}
