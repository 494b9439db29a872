//! Low-level byte-by-byte parser for ASCII-delimited text.
//!
//! This module provides [ByteParser] for parsing text-based formats with support
//! for peeking, consuming and pattern matching over an in-memory buffer. Used as
//! the foundation of the [fact tree parser](crate::format::FactTreeParser).

// =#========================================================================#=
// BYTE PARSER
// =#========================================================================$=
/// A byte-by-byte parser over a borrowed buffer with support for peeking,
/// consuming, and pattern matching.
///
/// Matching is exact (case-sensitive). Since the whole input stays
/// available, the parser can hand out slices and offsets into it, which
/// is what allows node texts to borrow from the loaded file.
///
/// # Example
/// ```
/// use factree::parser::ByteParser;
///
/// let mut parser = ByteParser::for_str("  (\"has fur\" nil nil)");
///
/// parser.skip_whitespace();
/// assert!(parser.consume_if(b'('));
/// assert_eq!(parser.peek(), Some(b'"'));
/// assert_eq!(parser.position(), 3);
/// ```
pub struct ByteParser<'a> {
    /// The data being parsed
    input: &'a [u8],
    /// Current position in the data
    pos: usize,
}

impl<'a> ByteParser<'a> {
    /// Creates a new `ByteParser` over a byte slice.
    ///
    /// # Arguments
    /// * `input` - The byte slice to parse
    pub fn new(input: &'a [u8]) -> Self {
        Self { input, pos: 0 }
    }

    /// Creates a new `ByteParser` over the bytes of a string.
    ///
    /// # Arguments
    /// * `input` - The string to parse
    pub fn for_str(input: &'a str) -> Self {
        Self::new(input.as_bytes())
    }

    /// Peeks at the current byte without consuming it.
    ///
    /// # Returns
    /// * `Some(u8)` - The current byte if available
    /// * `None` - If at end of data (EOF)
    #[inline(always)]
    pub fn peek(&self) -> Option<u8> {
        self.input.get(self.pos).copied()
    }

    /// Gets the current byte and advances the position (consumes it).
    ///
    /// # Returns
    /// * `Some(u8)` - The current byte if available
    /// * `None` - If at end of data (EOF)
    #[inline(always)]
    pub fn next_byte(&mut self) -> Option<u8> {
        let byte = self.peek()?;
        self.pos += 1;
        Some(byte)
    }

    /// Skips (consumes) all consecutive whitespace characters.
    ///
    /// Whitespace includes: space, tab, newline, carriage return,
    /// vertical tab and form feed.
    pub fn skip_whitespace(&mut self) {
        while let Some(b) = self.peek() {
            if b.is_ascii_whitespace() || b == 0x0b {
                self.pos += 1;
            } else {
                break;
            }
        }
    }

    /// Checks if the current byte is the target byte.
    pub fn peek_is(&self, ch: u8) -> bool {
        self.peek() == Some(ch)
    }

    /// Checks if the following bytes match the given byte sequence.
    ///
    /// This is a peek operation - the parser position is not changed.
    #[inline]
    pub fn peek_is_sequence(&self, sequence: &[u8]) -> bool {
        self.input[self.pos.min(self.input.len())..].starts_with(sequence)
    }

    /// Consumes the current byte if it is the target byte.
    ///
    /// # Returns
    /// `true` if the byte was matched and consumed, `false` otherwise
    pub fn consume_if(&mut self, ch: u8) -> bool {
        if self.peek_is(ch) {
            self.pos += 1;
            true
        } else {
            false
        }
    }

    /// Consumes the next bytes if they match the given byte sequence.
    ///
    /// # Returns
    /// `true` if the sequence was matched and consumed, `false` otherwise
    pub fn consume_if_sequence(&mut self, sequence: &[u8]) -> bool {
        if !self.peek_is_sequence(sequence) {
            return false;
        }

        self.pos += sequence.len();
        true
    }

    /// Consumes bytes until the target byte is found.
    ///
    /// # Arguments
    /// * `target` - The byte to search for
    /// * `mode` - Whether to consume the target byte (`Inclusive`) or stop before it (`Exclusive`)
    ///
    /// # Returns
    /// `true` if the target was found, `false` if EOF was reached first
    pub fn consume_until(&mut self, target: u8, mode: ConsumeMode) -> bool {
        while let Some(b) = self.peek() {
            if b == target {
                if mode == ConsumeMode::Inclusive {
                    self.pos += 1;
                }
                return true;
            }
            self.pos += 1;
        }
        false // reached EOF without finding target
    }

    /// Returns whether the end of data (EOF) has been reached.
    pub fn is_eof(&self) -> bool {
        self.pos >= self.input.len()
    }

    /// Returns the current parser position, the byte offset in the input.
    pub fn position(&self) -> usize {
        self.pos
    }

    /// Sets the position in the input.
    ///
    /// # Arguments
    /// * `pos` - The byte offset to seek to
    pub fn set_position(&mut self, pos: usize) {
        self.pos = pos;
    }

    /// Returns the number of bytes not consumed yet.
    pub fn remaining(&self) -> usize {
        self.input.len().saturating_sub(self.pos)
    }

    /// Returns a slice of the input from a start position to the current position.
    ///
    /// # Returns
    /// A byte slice from `start` to the current position, or empty slice if not available
    pub fn slice_from(&self, start: usize) -> &'a [u8] {
        self.input.get(start..self.pos).unwrap_or(&[])
    }

    /// Returns the 1-based line and column of the current position.
    ///
    /// Columns count bytes, so a multi-byte character advances the column
    /// by more than one.
    pub fn line_and_column(&self) -> (usize, usize) {
        let consumed = &self.input[..self.pos.min(self.input.len())];
        let line = consumed.iter().filter(|&&b| b == b'\n').count() + 1;
        let line_start = consumed
            .iter()
            .rposition(|&b| b == b'\n')
            .map_or(0, |newline| newline + 1);
        (line, consumed.len() - line_start + 1)
    }

    /// Returns up to `k` bytes from the current position for error context.
    pub fn get_context(&self, k: usize) -> &'a [u8] {
        let start = self.pos.min(self.input.len());
        let end = (start + k).min(self.input.len());
        &self.input[start..end]
    }

    /// Returns a string from up to `k` bytes from the current position for error context.
    ///
    /// Invalid UTF-8 sequences are replaced with the Unicode replacement character.
    pub fn get_context_as_string(&self, k: usize) -> String {
        String::from_utf8_lossy(self.get_context(k)).into_owned()
    }
}

/// Specifies whether to consume or leave the target when using `consume_until`.
///
/// # Examples
/// ```
/// use factree::parser::byte_parser::{ByteParser, ConsumeMode};
///
/// let mut parser = ByteParser::for_str("(\"has fur\" nil nil)");
/// parser.next_byte();
/// parser.next_byte();
///
/// // Exclusive: stop at the closing quote of a name
/// parser.consume_until(b'"', ConsumeMode::Exclusive);
/// assert_eq!(parser.peek(), Some(b'"'));
///
/// // Inclusive: consume up to and including it
/// parser.consume_until(b'"', ConsumeMode::Inclusive);
/// assert_eq!(parser.peek(), Some(b' '));
/// ```
#[derive(Debug, Copy, Clone, PartialEq)]
pub enum ConsumeMode {
    /// Consume the target byte along with everything before it.
    Inclusive,

    /// Stop before the target byte without consuming it.
    Exclusive,
}
