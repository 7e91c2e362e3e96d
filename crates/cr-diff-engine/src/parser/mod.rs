//! Patch text parsing.

mod unified;

pub use unified::{parse_patch, ParseError};
