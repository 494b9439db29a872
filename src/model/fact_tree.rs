//! Fact tree module, the knowledge base of the guessing game.
//!
//! This module provides the core data structures of the engine:
//! - [FactTree]: the full binary tree of qualifiers and entities, stored
//!   with the arena pattern together with its backing buffer.
//! - [NodeIndex] is used to reference nodes (handles handed to callers).

use crate::error::{FactTreeError, Result};
use crate::format;
use crate::format::writer::WriterStyle;
use crate::model::node::{Branch, Node};
use crate::model::text::{NodeText, Ownership};
use std::convert::Infallible;
use std::path::Path;
use tracing::{debug, info};

/// Index of a node in a fact tree (arena).
pub type NodeIndex = usize;

/// Text of the single entity of a freshly created tree.
pub const DEFAULT_ENTITY: &str = "nothing";

// =#========================================================================#=
// FACT TREE
// =#========================================================================$=
/// A full binary tree of qualifiers (questions) and entities (objects),
/// represented using the arena pattern on [Node].
///
/// Nodes are stored in a contiguous vector and referenced by [NodeIndex].
/// Children are owned through the arena, parent links are plain indices,
/// so teardown never has to follow back references.
///
/// # Structure
/// - Every node has either zero children (entity) or two children (qualifier).
/// - The left child of a qualifier is its "No" branch, the right its "Yes" branch.
/// - Index of root is maintained; `None` only for an explicitly empty tree.
/// - Nodes are never removed, so indices stay valid until the tree is
///   cleared or replaced by [FactTree::load].
/// - Text of parsed nodes borrows from the backing buffer, see [NodeText].
///
/// # Example
/// ```
/// use factree::FactTree;
///
/// let mut tree = FactTree::new();
/// let nothing = tree.find_by_name("nothing").unwrap();
/// let cat = tree.insert(nothing, "cat", "has fur").unwrap();
///
/// assert_eq!(tree.get_definition(cat).unwrap(), "cat has fur");
/// assert_eq!(tree.guess(|question| question == "has fur"), Some(cat));
/// ```
#[derive(Debug, Clone)]
pub struct FactTree {
    /// Nodes of this tree (arena pattern)
    nodes: Vec<Node>,

    /// Index of the root of this tree
    root_index: Option<NodeIndex>,

    /// Content of the file this tree was parsed from; borrowed node texts point into it
    buffer: String,
}

// ============================================================================
// New, Getters / Accessors, etc. (pub)
// ============================================================================
impl FactTree {
    /// Creates a new tree consisting of the single entity [DEFAULT_ENTITY].
    pub fn new() -> Self {
        let mut tree = Self::empty();
        let root = tree.add_leaf(NodeText::owned(DEFAULT_ENTITY));
        tree.set_root(root);
        tree
    }

    /// Creates a tree without any node.
    pub fn empty() -> Self {
        FactTree {
            nodes: Vec::new(),
            root_index: None,
            buffer: String::new(),
        }
    }

    /// Tears the tree down: releases all nodes with their owned texts,
    /// then the backing buffer. The tree is empty afterwards.
    ///
    /// Dropping a tree does the same implicitly.
    pub fn clear(&mut self) {
        let owned = self.nodes.iter().filter(|node| !node.text().is_borrowed()).count();
        debug!(
            nodes = self.nodes.len(),
            owned_texts = owned,
            buffer_bytes = self.buffer.len(),
            "tearing down fact tree"
        );
        self.root_index = None;
        self.nodes.clear();
        self.buffer = String::new();
    }

    /// Returns `true` if the tree has no node at all.
    pub fn is_empty(&self) -> bool {
        self.root_index.is_none()
    }

    /// Returns the index of the root, or `None` for an empty tree.
    pub fn root_index(&self) -> Option<NodeIndex> {
        self.root_index
    }

    /// Returns the node at the given index, or `None` if the handle is invalid.
    pub fn node(&self, index: NodeIndex) -> Option<&Node> {
        self.nodes.get(index)
    }

    /// Returns the text of the node at the given index,
    /// or `None` if the handle is invalid.
    pub fn text(&self, index: NodeIndex) -> Option<&str> {
        self.node(index).map(|node| node.text().resolve(&self.buffer))
    }

    /// Returns how the text of the given node is held,
    /// or `None` if the handle is invalid.
    pub fn ownership(&self, index: NodeIndex) -> Option<Ownership> {
        self.node(index).map(|node| node.text().ownership())
    }

    /// Returns `true` if the given handle refers to an entity.
    pub fn is_leaf(&self, index: NodeIndex) -> bool {
        self.node(index).is_some_and(Node::is_leaf)
    }

    /// Returns the total number of nodes (qualifiers and entities).
    pub fn size(&self) -> usize {
        self.nodes.len()
    }

    /// Returns the number of entities.
    pub fn num_leaves(&self) -> usize {
        self.nodes.iter().filter(|node| node.is_leaf()).count()
    }

    /// Returns the number of qualifiers.
    pub fn num_qualifiers(&self) -> usize {
        self.nodes.iter().filter(|node| node.is_qualifier()).count()
    }

    /// Returns the length of the backing buffer in bytes (0 if never loaded).
    pub fn buffer_len(&self) -> usize {
        self.buffer.len()
    }

    /// Returns an iterator over node indices in pre-order
    /// (parents before children, "No" before "Yes").
    pub fn pre_order_iter(&self) -> PreOrderIter<'_> {
        PreOrderIter::new(self)
    }

    /// Returns an iterator over the entities in left-to-right order.
    pub fn leaves(&self) -> impl Iterator<Item = NodeIndex> + '_ {
        self.pre_order_iter().filter(|&index| self.nodes[index].is_leaf())
    }

    /// Validates the tree structure and all index references.
    ///
    /// Checks:
    /// - Root is set if and only if there are nodes, and has no parent
    /// - All child indices are valid and point back to their parent
    /// - Every node but the root has a parent listing it as a child
    /// - All nodes are reachable from the root
    /// - Borrowed texts lie within the backing buffer
    ///
    /// # Returns
    /// `true` if tree is valid, `false` otherwise
    pub fn is_valid(&self) -> bool {
        let Some(root) = self.root_index else {
            return self.nodes.is_empty();
        };

        match self.nodes.get(root) {
            Some(node) if node.parent_index().is_none() => {}
            _ => return false,
        }

        for (index, node) in self.nodes.iter().enumerate() {
            if !node.text().fits(self.buffer.len()) {
                return false;
            }

            if let Some((no, yes)) = node.children() {
                if no == yes || no >= self.nodes.len() || yes >= self.nodes.len() {
                    return false;
                }
                if self.nodes[no].parent_index() != Some(index)
                    || self.nodes[yes].parent_index() != Some(index)
                {
                    return false;
                }
            }

            if index != root {
                let Some(parent) = node.parent_index().and_then(|p| self.nodes.get(p)) else {
                    return false;
                };
                match parent.children() {
                    Some((no, yes)) if no == index || yes == index => {}
                    _ => return false,
                }
            }
        }

        self.pre_order_iter().count() == self.nodes.len()
    }
}

impl Default for FactTree {
    fn default() -> Self {
        Self::new()
    }
}

impl std::ops::Index<NodeIndex> for FactTree {
    type Output = Node;

    fn index(&self, index: NodeIndex) -> &Self::Output {
        &self.nodes[index]
    }
}

// ============================================================================
// Guess & Insert & Lookup (pub)
// ============================================================================
impl FactTree {
    /// Walks from the root to an entity, asking `answer` about each qualifier
    /// on the way: `true` descends into the "Yes" branch, `false` into "No".
    ///
    /// # Arguments
    /// * `answer` - Called once per qualifier visited with its text
    ///
    /// # Returns
    /// The entity reached, or `None` if the tree is empty.
    pub fn guess<F>(&self, mut answer: F) -> Option<NodeIndex>
    where
        F: FnMut(&str) -> bool,
    {
        match self.try_guess(|question| Ok::<bool, Infallible>(answer(question))) {
            Ok(leaf) => leaf,
            Err(never) => match never {},
        }
    }

    /// Like [FactTree::guess], but `answer` may fail (e.g. because reading
    /// the user's reply failed), which aborts the walk.
    ///
    /// # Returns
    /// * `Ok(Some(leaf))` - The entity reached
    /// * `Ok(None)` - The tree is empty
    /// * `Err(E)` - The first error returned by `answer`
    pub fn try_guess<F, E>(&self, mut answer: F) -> std::result::Result<Option<NodeIndex>, E>
    where
        F: FnMut(&str) -> std::result::Result<bool, E>,
    {
        let Some(mut index) = self.root_index else {
            return Ok(None);
        };

        while let Some((no, yes)) = self.nodes[index].children() {
            index = if answer(self.text_of(index))? { yes } else { no };
        }

        Ok(Some(index))
    }

    /// Splits an entity that was guessed wrongly into a new qualifier.
    ///
    /// The entity at `leaf` becomes the qualifier `difference`; its "No"
    /// child takes over the old entity, its "Yes" child is the new `entity`.
    /// Both new texts are owned by the tree. Afterwards `leaf` refers to the
    /// qualifier; the old entity is found at a new index.
    ///
    /// # Arguments
    /// * `leaf` - The entity to split
    /// * `entity` - Name of the entity that was meant instead
    /// * `difference` - Qualifier holding for `entity` but not for the old one
    ///
    /// # Returns
    /// Index of the new entity.
    ///
    /// # Errors
    /// Fails without modifying the tree if `leaf` is not an entity of this
    /// tree, if a text is empty or contains `"`, or if the arena cannot grow.
    pub fn insert<E, D>(&mut self, leaf: NodeIndex, entity: E, difference: D) -> Result<NodeIndex>
    where
        E: Into<String>,
        D: Into<String>,
    {
        self.leaf(leaf)?;
        let entity = validate_text(entity.into())?;
        let difference = validate_text(difference.into())?;

        self.nodes
            .try_reserve(2)
            .map_err(|_| FactTreeError::AllocationFailure)?;

        debug!(leaf, entity = %entity, difference = %difference, "splitting entity");

        let previous = self.nodes[leaf].replace_text(NodeText::Owned(difference));
        let no = self.add_leaf(previous);
        let yes = self.add_leaf(NodeText::Owned(entity));
        self.link_children(leaf, (no, yes));

        Ok(yes)
    }

    /// Finds an entity by exact name.
    ///
    /// Qualifiers are never matched. If several entities share the name,
    /// the first one in left-to-right order is returned.
    ///
    /// # Returns
    /// Index of the entity, or `None` if no entity has this name.
    pub fn find_by_name(&self, name: &str) -> Option<NodeIndex> {
        self.leaves().find(|&index| self.text_of(index) == name)
    }
}

// ============================================================================
// Load & Save (pub)
// ============================================================================
impl FactTree {
    /// Replaces this tree by the one stored in the given file.
    ///
    /// The file is parsed into a separate tree first; only once that
    /// succeeded the current tree is torn down and replaced.
    /// On failure this tree is left untouched.
    ///
    /// # Errors
    /// [FactTreeError::Io] if the file cannot be read,
    /// [FactTreeError::Syntax] if it is malformed and
    /// [FactTreeError::AllocationFailure] if the buffer cannot be allocated.
    pub fn load<P: AsRef<Path>>(&mut self, path: P) -> Result<()> {
        let path = path.as_ref();
        let loaded = format::parse_file(path)?;

        info!(
            path = %path.display(),
            nodes = loaded.size(),
            replaced = self.size(),
            "loaded fact tree"
        );
        self.clear();
        *self = loaded;

        Ok(())
    }

    /// Writes this tree to the given file in the indented text format.
    ///
    /// # Errors
    /// [FactTreeError::Io] if the file cannot be created or written.
    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let path = path.as_ref();
        format::write_fact_file(self, path, WriterStyle::Indented)?;
        info!(path = %path.display(), nodes = self.size(), "saved fact tree");
        Ok(())
    }
}

// ============================================================================
// Construction & Helpers (crate)
// ============================================================================
impl FactTree {
    /// Adds an entity without parent, returning its index.
    pub(crate) fn add_leaf(&mut self, text: NodeText) -> NodeIndex {
        let index = self.nodes.len();
        self.nodes.push(Node::new_leaf(text));
        index
    }

    /// Adds a qualifier over two existing parentless nodes, returning its index.
    pub(crate) fn add_qualifier(&mut self, text: NodeText, children: (NodeIndex, NodeIndex)) -> NodeIndex {
        let index = self.nodes.len();
        self.nodes.push(Node::new_qualifier(text, children));
        self.nodes[children.0].set_parent(index);
        self.nodes[children.1].set_parent(index);
        index
    }

    pub(crate) fn set_root(&mut self, root: NodeIndex) {
        self.root_index = Some(root);
    }

    /// Installs the buffer the borrowed texts of the parsed nodes point into.
    pub(crate) fn attach_buffer(&mut self, buffer: String) {
        self.buffer = buffer;
    }

    /// Text of a node known to exist.
    pub(crate) fn text_of(&self, index: NodeIndex) -> &str {
        self.nodes[index].text().resolve(&self.buffer)
    }

    /// Returns the entity at `index`, or why the handle is not one.
    pub(crate) fn leaf(&self, index: NodeIndex) -> Result<&Node> {
        let node = self
            .nodes
            .get(index)
            .ok_or(FactTreeError::InvalidHandle(index))?;
        if node.is_leaf() {
            Ok(node)
        } else {
            Err(FactTreeError::NotALeaf(index))
        }
    }

    /// Returns on which branch of its parent the given node hangs.
    pub(crate) fn branch_of(&self, index: NodeIndex) -> Option<(NodeIndex, Branch)> {
        let parent = self.nodes[index].parent_index()?;
        let (no, _) = self.nodes[parent].children()?;
        let branch = if no == index { Branch::No } else { Branch::Yes };
        Some((parent, branch))
    }

    fn link_children(&mut self, parent: NodeIndex, children: (NodeIndex, NodeIndex)) {
        self.nodes[parent].set_children(children);
        self.nodes[children.0].set_parent(parent);
        self.nodes[children.1].set_parent(parent);
    }
}

/// Checks that a text can be stored and written back: non-empty, no quote.
fn validate_text(text: String) -> Result<String> {
    if text.is_empty() || text.contains('"') {
        Err(FactTreeError::InvalidText(text))
    } else {
        Ok(text)
    }
}

// =#========================================================================#=
// ITERATORS
// =#========================================================================$=
/// Iterator for pre-order traversal (parents before children).
///
/// This iterator uses a stack-based approach to traverse the tree without recursion.
/// Each node is visited before any of its descendants, the "No" subtree
/// before the "Yes" subtree.
pub struct PreOrderIter<'a> {
    tree: &'a FactTree,
    stack: Vec<NodeIndex>,
}

impl<'a> PreOrderIter<'a> {
    fn new(tree: &'a FactTree) -> Self {
        let stack = tree.root_index.into_iter().collect();
        PreOrderIter { tree, stack }
    }
}

impl Iterator for PreOrderIter<'_> {
    type Item = NodeIndex;

    fn next(&mut self) -> Option<Self::Item> {
        let index = self.stack.pop()?;

        // Push children onto stack (right first, so left is processed first)
        if let Some((no, yes)) = self.tree.nodes[index].children() {
            self.stack.push(yes);
            self.stack.push(no);
        }

        Some(index)
    }
}
