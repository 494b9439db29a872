//! Basic low-level byte parser functionality.
//!
//! Provides [ByteParser] to walk an in-memory buffer and [ParsingError]
//! to report syntax errors with position and context.

pub mod byte_parser;
pub mod parsing_error;

pub use byte_parser::ByteParser;
pub use parsing_error::{ParsingError, ParsingErrorType};
