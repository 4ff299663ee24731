//! Parsers for the conditional restriction mini-language:
//!
//! ```text
//! <restriction-type>[:<transportation mode>][:<direction>]:conditional
//!     = <restriction-value> @ (<condition>)[;<restriction-value> @ (<condition>)]
//! ```

mod key;
mod restriction_value;
mod value;

pub use key::{is_conditional_key, parse_key};
pub use restriction_value::{is_known_restriction_value, parse_restriction_value};
pub use value::{parse_value, split_clauses};
