//! RFC 1960 filter-string parsing.
//!
//! The grammar is the LDAP search-filter grammar with one extension: values
//! may escape any single following character with `\`, which also suppresses
//! the wildcard meaning of `*` and the delimiter meaning of `(` and `)`.

mod error;
mod grammar;

pub use error::ParseError;

use winnow::Parser;

use crate::types::Filter;

/// Parse a filter string into a [`Filter`].
///
/// # Errors
///
/// Returns [`ParseError`] when the input is not exactly one well-formed
/// filter expression. The message names the kind of failure and quotes the
/// unparsed remainder of the input.
pub fn parse(filterstring: &str) -> Result<Filter, ParseError> {
    let mut input = filterstring;
    let node = grammar::filter
        .parse_next(&mut input)
        .map_err(|err| ParseError::new(grammar::describe(err), filterstring))?;
    if !input.is_empty() {
        return Err(ParseError::new(
            format!("Extraneous trailing characters at \"{input}\""),
            filterstring,
        ));
    }
    Ok(Filter::from(node))
}
