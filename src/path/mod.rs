//! Path expressions for locating values inside a payload.
//!
//! This module handles:
//! - The token vocabulary a parsed expression reduces to
//! - Parsing textual expressions such as `$.items[*].name`

pub mod parser;
pub mod token;

pub use parser::parse_path;
pub use token::PathToken;
