//! Node module for the fact tree representation.

use crate::model::fact_tree::NodeIndex;
use crate::model::text::NodeText;

// =#========================================================================#=
// NODE
// =#========================================================================$=
/// Represents a node of a [FactTree](crate::FactTree).
///
/// A node is either:
/// - **Qualifier**: has two children and holds a yes/no question or trait
/// - **Entity**: has no children and names an object
///
/// The role follows from the presence of children only; there is no tag.
///
/// # Invariants
/// - `children` is `(no, yes)`: left is the "No" branch, right the "Yes" branch
/// - A node has either zero or two children, which the tuple enforces
/// - `parent` is a non-owning back link, `None` only at the root
#[derive(PartialEq, Debug, Clone)]
pub struct Node {
    /// Question/trait of a qualifier or name of an entity
    text: NodeText,
    /// Indices of the "No" and "Yes" children
    children: Option<(NodeIndex, NodeIndex)>,
    /// Index of the parent node
    parent: Option<NodeIndex>,
}

impl Node {
    /// Creates a new entity (leaf) without parent.
    pub fn new_leaf(text: NodeText) -> Self {
        Node {
            text,
            children: None,
            parent: None,
        }
    }

    /// Creates a new qualifier with the given `(no, yes)` children.
    pub fn new_qualifier(text: NodeText, children: (NodeIndex, NodeIndex)) -> Self {
        Node {
            text,
            children: Some(children),
            parent: None,
        }
    }

    /// Returns the stored text (borrowed range or owned string).
    pub fn text(&self) -> &NodeText {
        &self.text
    }

    /// Replaces the stored text, returning the previous one.
    pub(crate) fn replace_text(&mut self, text: NodeText) -> NodeText {
        std::mem::replace(&mut self.text, text)
    }

    /// Returns `true` if this node is an entity (no children).
    pub fn is_leaf(&self) -> bool {
        self.children.is_none()
    }

    /// Returns `true` if this node is a qualifier (two children).
    pub fn is_qualifier(&self) -> bool {
        self.children.is_some()
    }

    /// Returns the `(no, yes)` children if this is a qualifier, else `None`.
    pub fn children(&self) -> Option<(NodeIndex, NodeIndex)> {
        self.children
    }

    /// Returns the child on the given branch if this is a qualifier.
    pub fn child(&self, branch: Branch) -> Option<NodeIndex> {
        self.children.map(|(no, yes)| match branch {
            Branch::No => no,
            Branch::Yes => yes,
        })
    }

    /// Turns this node into a qualifier with the given `(no, yes)` children.
    pub(crate) fn set_children(&mut self, children: (NodeIndex, NodeIndex)) {
        self.children = Some(children);
    }

    /// Returns the index of the parent, or `None` for the root.
    pub fn parent_index(&self) -> Option<NodeIndex> {
        self.parent
    }

    pub(crate) fn set_parent(&mut self, parent: NodeIndex) {
        self.parent = Some(parent);
    }
}

// =#========================================================================#=
// BRANCH
// =#========================================================================$=
/// Side of a qualifier a child hangs on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Branch {
    /// Left child; the qualifier does not hold
    No,
    /// Right child; the qualifier holds
    Yes,
}

impl From<bool> for Branch {
    fn from(answer: bool) -> Self {
        if answer { Branch::Yes } else { Branch::No }
    }
}
