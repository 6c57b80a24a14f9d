use thiserror::Error;

use crate::parse::ParseError;
use crate::types::MatchError;

/// Unified error type covering parsing and matching.
///
/// Returned by callers that parse and match in one step and do not care
/// which stage failed; the individual stages return [`ParseError`] and
/// [`MatchError`] directly.
#[derive(Debug, Error)]
pub enum PropmatchError {
    #[error(transparent)]
    Parse(#[from] ParseError),

    #[error(transparent)]
    Match(#[from] MatchError),
}
