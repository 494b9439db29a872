//! Text format of a fact tree: parser, writer and Graphviz export.
//!
//! # Quick API
//! * [`parse_file`] - reads a file into a [FactTree] owning the file content
//! * [`parse_str`] - parses a string into a [FactTree]
//! * [`to_fact_string`] / [`write_fact_file`] - serialize a [FactTree]
//! * [`to_dot`] / [`write_dot_file`] - Graphviz export
//!
//! # Format
//! A knowledge base file holds exactly one tree expression:
//! * `node ::= '(' name node node ')' | 'nil'`
//! * `name ::= '"' any-byte-except-quote* '"'`
//!
//! Furthermore:
//! * Whitespace can occur between any two tokens
//! * Both children are nodes (qualifier) or both are `nil` (entity)
//! * The left child is the "No" branch, the right child the "Yes" branch
//! * A root of `nil` is an empty knowledge base
//! * Content after the root expression is ignored
//!
//! Example:
//! ```text
//! ("has fur"
//!   ("nothing" nil nil)
//!   ("barks"
//!     ("cat" nil nil)
//!     ("dog" nil nil)))
//! ```

mod defs;
pub mod dot;
pub mod parser;
pub mod writer;

pub use dot::{to_dot, write_dot_file};
pub use parser::FactTreeParser;
pub use writer::{WriterStyle, to_fact_string, write_fact_file, write_fact_tree};

use crate::error::{FactTreeError, Result};
use crate::model::FactTree;
use crate::parser::ParsingError;
use std::fs::File;
use std::io::Read;
use std::path::Path;
use tracing::debug;

// ============================================================================
// QUICK PARSING API (pub)
// ============================================================================
/// Reads a whole file into a fresh buffer and parses it into a [FactTree].
///
/// The tree keeps the buffer; texts of its nodes borrow from it.
///
/// # Arguments
/// * `path` - Path to the file (accepting `&str`, `String`, `Path`, or `PathBuf`)
///
/// # Returns
/// * [FactTree] - The parsed tree
/// * [FactTreeError] - If reading fails, the buffer cannot be allocated,
///   or the content is not a well-formed tree expression
///
/// # Example
/// ```no_run
/// use factree::format::parse_file;
///
/// let tree = parse_file("animals.facts")?;
/// println!("Knows {} objects", tree.num_leaves());
///
/// # Ok::<(), factree::FactTreeError>(())
/// ```
pub fn parse_file<P: AsRef<Path>>(path: P) -> Result<FactTree> {
    let mut file = File::open(path)?;
    let len = usize::try_from(file.metadata()?.len()).map_err(|_| FactTreeError::AllocationFailure)?;

    let mut bytes = Vec::new();
    bytes
        .try_reserve_exact(len)
        .map_err(|_| FactTreeError::AllocationFailure)?;
    file.read_to_end(&mut bytes)?;
    debug!(bytes = bytes.len(), "read knowledge base buffer");

    let buffer = String::from_utf8(bytes).map_err(|err| {
        ParsingError::invalid_utf8(err.as_bytes(), err.utf8_error().valid_up_to())
    })?;

    Ok(FactTreeParser::new().parse(buffer)?)
}

/// Parses a single tree expression into a [FactTree].
///
/// The string is copied into the tree's buffer.
///
/// # Example
/// ```
/// use factree::format::parse_str;
///
/// let tree = parse_str(r#"("has fur" ("nothing" nil nil) ("cat" nil nil))"#)?;
/// let cat = tree.find_by_name("cat").unwrap();
/// assert_eq!(tree.get_definition(cat).unwrap(), "cat has fur");
///
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
pub fn parse_str<S: AsRef<str>>(input: S) -> std::result::Result<FactTree, ParsingError> {
    FactTreeParser::new().parse(input.as_ref().to_owned())
}
