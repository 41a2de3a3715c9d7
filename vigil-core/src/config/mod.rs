//! Configuration types
//!
//! The panel is configured once at startup; nothing is persisted.

pub mod toml;
pub mod types;

pub use toml::{parse_config, ParseError};
pub use types::*;
