//! Configuration types
//!
//! Board-agnostic configuration structures and the allocation-free parser
//! for the embedded `device.toml`.

pub mod parse;
pub mod types;

pub use parse::{parse_config, ParseError};
pub use types::*;
