mod dict;
mod error;
mod filter;
mod node;
mod value;

pub use dict::{Dictionary, Properties};
pub use error::MatchError;
pub use filter::Filter;
pub use node::{FilterNode, Segment};
pub use value::Value;

pub(crate) use node::strip_whitespace;
