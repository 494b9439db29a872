//! Error types for the fact tree parser.
//!
//! This module provides [ParsingError] and [ParsingErrorType] for representing
//! and reporting syntax errors found while loading a knowledge base.

use crate::parser::byte_parser::ByteParser;
use thiserror::Error;

/// Default length of context provided by error from parser
const DEFAULT_CONTEXT_LENGTH: usize = 50;

// =#========================================================================#=
// PARSING ERROR TYPE
// =#========================================================================$=
/// Error types that can occur while parsing a fact tree.
#[derive(Error, PartialEq, Debug, Clone)]
pub enum ParsingErrorType {
    /// A byte that cannot start the expected token.
    #[error("unexpected symbol {} (ASCII code {found}), expected {expected}", printable(.found))]
    UnexpectedSymbol {
        /// The offending byte
        found: u8,
        /// Description of what was expected
        expected: &'static str,
    },

    /// Input ended while a token was still expected.
    #[error("unexpected end of input, expected {expected}")]
    UnexpectedEof {
        /// Description of what was expected
        expected: &'static str,
    },

    /// A name without closing quote.
    #[error("name is never closed, missing '\"'")]
    UnclosedName,

    /// A node with `nil` on one side and a node on the other.
    #[error("node has a single child, expected either two children or 'nil nil'")]
    SingleChild,

    /// Input is not valid UTF-8.
    #[error("invalid UTF-8")]
    InvalidUtf8,
}

/// Printable form of a byte, e.g. `'('` or `'\n'`.
fn printable(byte: &u8) -> String {
    format!("'{}'", byte.escape_ascii())
}

// =#========================================================================#=
// PARSING ERROR
// =#========================================================================$=
/// Parsing error with contextual information (position and surrounding bytes).
#[derive(Error, Debug, Clone, PartialEq)]
#[error("Syntax error at line {line}, column {column} (byte {position}): {kind}{}", context_suffix(.context))]
pub struct ParsingError {
    kind: ParsingErrorType,
    position: usize,
    line: usize,
    column: usize,
    context: String,
}

fn context_suffix(context: &str) -> String {
    if context.is_empty() {
        String::new()
    } else {
        format!("\n  Context (next {} bytes): {}", context.len(), context)
    }
}

impl ParsingError {
    /// Create a ParsingError from an error type and parser state
    pub fn from_parser(kind: ParsingErrorType, parser: &ByteParser) -> Self {
        let (line, column) = parser.line_and_column();
        Self {
            kind,
            position: parser.position(),
            line,
            column,
            context: parser.get_context_as_string(DEFAULT_CONTEXT_LENGTH),
        }
    }

    /// Reports the token at the current position as not being `expected`,
    /// which is [ParsingErrorType::UnexpectedEof] at the end of input and
    /// [ParsingErrorType::UnexpectedSymbol] otherwise.
    pub fn unexpected(parser: &ByteParser, expected: &'static str) -> Self {
        let kind = match parser.peek() {
            Some(found) => ParsingErrorType::UnexpectedSymbol { found, expected },
            None => ParsingErrorType::UnexpectedEof { expected },
        };
        Self::from_parser(kind, parser)
    }

    /// Convenience constructor for UnclosedName
    pub fn unclosed_name(parser: &ByteParser) -> Self {
        Self::from_parser(ParsingErrorType::UnclosedName, parser)
    }

    /// Convenience constructor for SingleChild
    pub fn single_child(parser: &ByteParser) -> Self {
        Self::from_parser(ParsingErrorType::SingleChild, parser)
    }

    /// Create an InvalidUtf8 error at byte `position` of `input`.
    pub fn invalid_utf8(input: &[u8], position: usize) -> Self {
        let mut parser = ByteParser::new(input);
        parser.set_position(position);
        Self::from_parser(ParsingErrorType::InvalidUtf8, &parser)
    }

    /// Get the error kind
    pub fn kind(&self) -> &ParsingErrorType {
        &self.kind
    }

    /// Get the byte offset where the error occurred
    pub fn position(&self) -> usize {
        self.position
    }

    /// Get the 1-based line where the error occurred
    pub fn line(&self) -> usize {
        self.line
    }

    /// Get the 1-based column where the error occurred
    pub fn column(&self) -> usize {
        self.column
    }

    /// Get the input following the error position
    pub fn context(&self) -> &str {
        &self.context
    }
}
