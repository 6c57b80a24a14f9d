use thiserror::Error;

/// Syntax error produced by [`parse`](crate::parse).
///
/// The message interpolates the unparsed tail of the input, and the full
/// original filter string is carried alongside so callers can point a user
/// at the offending spot.
#[derive(Debug, Clone, Error)]
#[error("{message}")]
pub struct ParseError {
    message: String,
    filter: String,
}

impl ParseError {
    pub(crate) fn new(message: impl Into<String>, filter: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            filter: filter.into(),
        }
    }

    /// Human-readable description of the failure.
    #[must_use]
    pub fn message(&self) -> &str {
        &self.message
    }

    /// The filter string that failed to parse.
    #[must_use]
    pub fn filter(&self) -> &str {
        &self.filter
    }
}
