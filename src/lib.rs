//! Factree is the engine of a learning "20 questions" knowledge base.
//!
//! Objects (entities) are told apart by yes/no questions (qualifiers)
//! arranged in a full binary tree. When the engine guesses wrong, the user
//! names the object they meant together with a distinguishing trait, and the
//! tree learns it. Knowledge bases are stored in a small parenthesized text
//! format.
//! Core functionality provided:
//! - [FactTree]: arena-based full binary tree; every node has zero or two children.
//! - Queries: guess (root-to-leaf walk), insert (split a leaf), find by name,
//!   definition (qualifiers of one entity), difference (of two entities).
//! - [format]: recursive-descent parser with positioned syntax errors,
//!   writer, and Graphviz export.
//! - Zero-copy loading: node texts of a loaded tree borrow from the file
//!   buffer kept by the tree, texts learned later are owned strings,
//!   see [NodeText](model::NodeText).
//! - [shell]: interactive state machine driving the engine through a
//!   [Console](shell::Console) capability.
//!
//! # Example
//! ```
//! use factree::FactTree;
//!
//! let mut tree = FactTree::new();
//! let nothing = tree.root_index().unwrap();
//! let cat = tree.insert(nothing, "cat", "has fur").unwrap();
//! let dog = tree.insert(cat, "dog", "barks").unwrap();
//!
//! // The split node became the qualifier "barks", "cat" moved to its "No" child
//! let cat = tree.find_by_name("cat").unwrap();
//!
//! assert_eq!(tree.get_definition(dog).unwrap(), "dog has fur, barks");
//! assert_eq!(
//!     tree.get_difference(cat, dog).unwrap(),
//!     "cat and dog both: has fur; but cat not barks; and dog barks"
//! );
//! ```
//!
//! Loading and saving:
//! ```no_run
//! use factree::FactTree;
//!
//! let mut tree = FactTree::new();
//! tree.load("animals.facts")?;
//! // ... play ...
//! tree.save("animals.facts")?;
//! # Ok::<(), factree::FactTreeError>(())
//! ```

pub mod error;
pub mod format;
pub mod model;
pub mod parser;
pub mod shell;

pub use crate::error::{FactTreeError, Result};
pub use crate::model::{FactTree, NodeIndex};
pub use crate::parser::ParsingError;

use std::path::Path;

// ============================================================================
// Quick API
// ============================================================================
/// Loads a knowledge base file into a new [FactTree].
///
/// See [`format::parse_file`] for full documentation.
pub fn load_file<P: AsRef<Path>>(path: P) -> Result<FactTree> {
    format::parse_file(path)
}

/// Parses a knowledge base from a string into a new [FactTree].
///
/// See [`format::parse_str`] for full documentation.
pub fn parse_str<S: AsRef<str>>(input: S) -> std::result::Result<FactTree, ParsingError> {
    format::parse_str(input)
}
