use std::num::{ParseFloatError, ParseIntError};

use thiserror::Error;

/// Raised when a comparison reaches a typed property but the filter literal
/// cannot be converted to that type.
///
/// A malformed numeric literal is a caller bug, not a matching failure, so
/// it is surfaced instead of being coerced to `false`. Absent attributes
/// never produce an error; they simply fail to match.
#[derive(Debug, Error)]
pub enum MatchError {
    #[error("malformed integer literal \"{literal}\"")]
    Int {
        literal: String,
        #[source]
        source: ParseIntError,
    },

    #[error("malformed floating-point literal \"{literal}\"")]
    Float {
        literal: String,
        #[source]
        source: ParseFloatError,
    },

    #[error("empty character literal")]
    Char,
}
