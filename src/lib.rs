mod error;
mod evaluate;
mod parse;
mod types;

pub use error::PropmatchError;
pub use parse::{ParseError, parse};
pub use types::{Dictionary, Filter, FilterNode, MatchError, Properties, Segment, Value};
