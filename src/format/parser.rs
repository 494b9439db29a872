//! Structs and logic to parse the fact tree text format.
//!
//! This module provides the [FactTreeParser] struct, a recursive-descent
//! parser building a [FactTree] whose node texts borrow from the parsed buffer.

use crate::format::defs::{NAME_QUOTE, NIL, NODE_CLOSE, NODE_OPEN};
use crate::model::{FactTree, NodeIndex, NodeText};
use crate::parser::byte_parser::{ByteParser, ConsumeMode};
use crate::parser::parsing_error::ParsingError;
use tracing::{debug, trace, warn};

// =#========================================================================#=
// FACT TREE PARSER
// =#========================================================================$=
/// Parser for a single fact tree expression.
///
/// The parser takes ownership of the buffer, builds the nodes bottom-up with
/// texts recorded as [NodeText::Borrowed] ranges, and finally hands the
/// buffer over to the resulting tree, which keeps it alive for them.
///
/// Only the root expression is parsed; anything after it is ignored.
///
/// # Example
/// ```
/// use factree::format::FactTreeParser;
///
/// let input = r#"("has fur" ("nothing" nil nil) ("cat" nil nil))"#;
/// let tree = FactTreeParser::new().parse(input.to_string()).unwrap();
///
/// assert_eq!(tree.size(), 3);
/// assert!(tree.find_by_name("cat").is_some());
/// ```
pub struct FactTreeParser {
    tree: FactTree,
}

impl FactTreeParser {
    /// Creates a new [FactTreeParser].
    pub fn new() -> Self {
        Self {
            tree: FactTree::empty(),
        }
    }

    /// Parses the buffer into a [FactTree] owning the buffer.
    ///
    /// # Returns
    /// * `Ok(FactTree)` - The parsed tree; empty if the root is `nil`
    /// * `Err(ParsingError)` - If the buffer is not a well-formed tree expression
    pub fn parse(mut self, buffer: String) -> Result<FactTree, ParsingError> {
        let root = {
            let mut parser = ByteParser::for_str(&buffer);
            parser.skip_whitespace();
            let root = self.parse_node(&mut parser)?;

            if parser.remaining() > 0 {
                debug!(bytes = parser.remaining(), "ignoring content after root node");
            }
            root
        };

        match root {
            Some(root) => self.tree.set_root(root),
            None => warn!("fact tree root is nil, knowledge base is empty"),
        }

        let mut tree = self.tree;
        tree.attach_buffer(buffer);
        Ok(tree)
    }
}

impl Default for FactTreeParser {
    fn default() -> Self {
        Self::new()
    }
}

// ============================================================================
// Parsing
// ============================================================================
impl FactTreeParser {
    /// Parses a node or `nil` and returns the index of the node:
    /// - `( name node node )` adds an entity (both children `nil`)
    ///   or a qualifier (both children nodes)
    /// - `nil` is an absent child
    /// - Skips whitespace after the node
    ///
    /// # Returns
    /// - `Some(index)` of the parsed node, `None` for `nil`
    /// - [ParsingError] if something went wrong
    fn parse_node(&mut self, parser: &mut ByteParser) -> Result<Option<NodeIndex>, ParsingError> {
        let start = parser.position();

        if parser.consume_if_sequence(NIL) {
            parser.skip_whitespace();
            return Ok(None);
        }

        if !parser.consume_if(NODE_OPEN) {
            return Err(ParsingError::unexpected(parser, "'(' or 'nil'"));
        }
        parser.skip_whitespace();

        let text = self.parse_name(parser)?;
        parser.skip_whitespace();

        let no = self.parse_node(parser)?;
        let yes = self.parse_node(parser)?;

        if !parser.consume_if(NODE_CLOSE) {
            return Err(ParsingError::unexpected(parser, "')'"));
        }

        let index = match (no, yes) {
            (None, None) => self.tree.add_leaf(text),
            (Some(no), Some(yes)) => {
                trace!(no, yes, "linking children");
                self.tree.add_qualifier(text, (no, yes))
            }
            _ => {
                parser.set_position(start);
                return Err(ParsingError::single_child(parser));
            }
        };

        parser.skip_whitespace();
        Ok(Some(index))
    }

    /// Parses a quoted name and returns its range in the buffer:
    /// - `"` any byte but `"` `"`
    /// - Expects parser at the opening quote
    ///
    /// # Returns
    /// - [NodeText::Borrowed] with the range between the quotes
    /// - [ParsingError] if there is no opening or closing quote
    fn parse_name(&mut self, parser: &mut ByteParser) -> Result<NodeText, ParsingError> {
        if !parser.consume_if(NAME_QUOTE) {
            return Err(ParsingError::unexpected(parser, "'\"'"));
        }

        let start = parser.position();
        if !parser.consume_until(NAME_QUOTE, ConsumeMode::Exclusive) {
            parser.set_position(start - 1);
            return Err(ParsingError::unclosed_name(parser));
        }
        let len = parser.position() - start;
        parser.next_byte(); // consume closing quote

        Ok(NodeText::borrowed(start, len))
    }
}
