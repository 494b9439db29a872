//! Data model of the fact tree.
//!
//! # Tree representation
//! The knowledge base is a [FactTree], which uses the arena pattern to store
//! [Node]s referenced by [NodeIndex]. A node with two children is a
//! qualifier (yes/no question), a node without children is an entity.
//!
//! # Text ownership
//! | Variant | Created by | Released with |
//! |---------|------------|---------------|
//! | [NodeText::Borrowed] | Parser (range of the loaded file) | Backing buffer |
//! | [NodeText::Owned] | [FactTree::new], [FactTree::insert] | Node |
//!
//! # Queries
//! [Definition] and [Difference] describe entities by the qualifiers on
//! their path from the root.

pub mod fact_tree;
pub mod node;
pub mod query;
pub mod text;

pub use fact_tree::{DEFAULT_ENTITY, FactTree, NodeIndex, PreOrderIter};
pub use node::{Branch, Node};
pub use query::{Definition, Difference, Qualifier};
pub use text::{NodeText, Ownership};
