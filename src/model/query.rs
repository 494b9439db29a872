//! Descriptions of entities derived from their position in the tree.
//!
//! - [Definition]: the chain of qualifiers leading from the root to one entity.
//! - [Difference]: the qualifiers two entities share and those they differ in.
//!
//! Both borrow their texts from the [FactTree] and render via [Display](fmt::Display).

use crate::error::{FactTreeError, Result};
use crate::model::fact_tree::{FactTree, NodeIndex};
use crate::model::node::Branch;
use std::fmt;

// =#========================================================================#=
// QUALIFIER
// =#========================================================================$=
/// A qualifier on the path to an entity, together with whether it holds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Qualifier<'a> {
    /// Index of the qualifier node
    pub index: NodeIndex,
    /// Text of the qualifier
    pub text: &'a str,
    /// Whether the path continues on the "Yes" branch
    pub holds: bool,
}

impl fmt::Display for Qualifier<'_> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        if self.holds {
            write!(f, "{}", self.text)
        } else {
            write!(f, "not {}", self.text)
        }
    }
}

/// Writes qualifiers separated by commas.
fn write_chain(f: &mut fmt::Formatter, chain: &[Qualifier]) -> fmt::Result {
    for (i, qualifier) in chain.iter().enumerate() {
        if i > 0 {
            f.write_str(", ")?;
        }
        write!(f, "{qualifier}")?;
    }
    Ok(())
}

/// Writes `name` followed by its qualifiers, if there are any.
fn write_described(f: &mut fmt::Formatter, name: &str, chain: &[Qualifier]) -> fmt::Result {
    f.write_str(name)?;
    if !chain.is_empty() {
        f.write_str(" ")?;
        write_chain(f, chain)?;
    }
    Ok(())
}

// =#========================================================================#=
// DEFINITION
// =#========================================================================$=
/// Definition of an entity: its qualifiers from the root down.
///
/// Renders as `"cat has fur, not barks"`, or just the name for an entity
/// without qualifiers (the root of a single-node tree).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Definition<'a> {
    /// Name of the entity
    pub entity: &'a str,
    /// Qualifiers ordered from the root towards the entity
    pub qualifiers: Vec<Qualifier<'a>>,
}

impl fmt::Display for Definition<'_> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write_described(f, self.entity, &self.qualifiers)
    }
}

// =#========================================================================#=
// DIFFERENCE
// =#========================================================================$=
/// Comparison of two entities: the qualifiers shared from the root down to
/// their last common qualifier, and the remaining qualifiers of each.
///
/// Renders as
/// `"cat and dog both: has fur; but cat not barks; and dog barks"`,
/// or `"fish not has fur; but dog has fur, barks"` if nothing is shared.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Difference<'a> {
    /// Name of the first entity
    pub first: &'a str,
    /// Name of the second entity
    pub second: &'a str,
    /// Qualifiers both entities have in common, from the root down
    pub shared: Vec<Qualifier<'a>>,
    /// Remaining qualifiers of the first entity
    pub first_only: Vec<Qualifier<'a>>,
    /// Remaining qualifiers of the second entity
    pub second_only: Vec<Qualifier<'a>>,
}

impl fmt::Display for Difference<'_> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        if self.shared.is_empty() {
            write_described(f, self.first, &self.first_only)?;
        } else {
            write!(f, "{} and {} both: ", self.first, self.second)?;
            write_chain(f, &self.shared)?;
            f.write_str("; but ")?;
            write_described(f, self.first, &self.first_only)?;
        }

        if self.shared.is_empty() {
            f.write_str("; but ")?;
        } else {
            f.write_str("; and ")?;
        }
        write_described(f, self.second, &self.second_only)
    }
}

// ============================================================================
// Queries (pub)
// ============================================================================
impl FactTree {
    /// Returns the qualifiers leading from the root to the given entity.
    ///
    /// # Errors
    /// [FactTreeError::InvalidHandle] or [FactTreeError::NotALeaf] if
    /// `leaf` is not an entity of this tree.
    pub fn definition(&self, leaf: NodeIndex) -> Result<Definition<'_>> {
        self.leaf(leaf)?;
        Ok(Definition {
            entity: self.text_of(leaf),
            qualifiers: self.path_to(leaf),
        })
    }

    /// Returns the rendered [Definition] of the given entity,
    /// e.g. `"cat has fur"`.
    pub fn get_definition(&self, leaf: NodeIndex) -> Result<String> {
        Ok(self.definition(leaf)?.to_string())
    }

    /// Compares two entities.
    ///
    /// Both root paths start at the same root, so they agree up to the last
    /// common qualifier, where one continues on "No" and the other on "Yes".
    ///
    /// # Errors
    /// [FactTreeError::SameNode] if `first == second`,
    /// [FactTreeError::InvalidHandle] or [FactTreeError::NotALeaf] if either
    /// handle is not an entity of this tree.
    pub fn difference(&self, first: NodeIndex, second: NodeIndex) -> Result<Difference<'_>> {
        if first == second {
            return Err(FactTreeError::SameNode(first));
        }
        self.leaf(first)?;
        self.leaf(second)?;

        let mut first_path = self.path_to(first);
        let mut second_path = self.path_to(second);

        let common = first_path
            .iter()
            .zip(second_path.iter())
            .take_while(|(a, b)| a == b)
            .count();

        let first_only = first_path.split_off(common);
        let second_only = second_path.split_off(common);

        Ok(Difference {
            first: self.text_of(first),
            second: self.text_of(second),
            shared: first_path,
            first_only,
            second_only,
        })
    }

    /// Returns the rendered [Difference] of two entities.
    pub fn get_difference(&self, first: NodeIndex, second: NodeIndex) -> Result<String> {
        Ok(self.difference(first, second)?.to_string())
    }

    /// Collects the qualifiers above `index`, ordered from the root down.
    fn path_to(&self, index: NodeIndex) -> Vec<Qualifier<'_>> {
        let mut path = Vec::new();
        let mut current = index;

        while let Some((parent, branch)) = self.branch_of(current) {
            path.push(Qualifier {
                index: parent,
                text: self.text_of(parent),
                holds: branch == Branch::Yes,
            });
            current = parent;
        }

        path.reverse();
        path
    }
}
