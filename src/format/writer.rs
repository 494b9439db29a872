//! Fact tree format writing.

use crate::format::defs::INDENT;
use crate::model::{FactTree, NodeIndex};
use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::Path;

/// Estimated characters per node besides its text: `("" nil nil)` plus separators
const NODE_CHARS: usize = 14;

/// Layout of the written tree expression.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum WriterStyle {
    /// Everything on one line: `("has fur" ("nothing" nil nil) ("cat" nil nil))`
    Compact,
    /// One qualifier line per child, indented by depth; entities stay on one line
    #[default]
    Indented,
}

/// Returns the text representation of the tree.
///
/// Nodes are written in pre-order as `("text" <no> <yes>)`, with `nil nil`
/// for the children of an entity. An empty tree is written as `nil`.
///
/// # Example
/// ```
/// use factree::FactTree;
/// use factree::format::{WriterStyle, to_fact_string};
///
/// let mut tree = FactTree::new();
/// let root = tree.root_index().unwrap();
/// tree.insert(root, "cat", "has fur").unwrap();
///
/// assert_eq!(
///     to_fact_string(&tree, WriterStyle::Compact),
///     r#"("has fur" ("nothing" nil nil) ("cat" nil nil))"#
/// );
/// assert_eq!(
///     to_fact_string(&tree, WriterStyle::Indented),
///     "(\"has fur\"\n  (\"nothing\" nil nil)\n  (\"cat\" nil nil))"
/// );
/// ```
pub fn to_fact_string(tree: &FactTree, style: WriterStyle) -> String {
    // Recursive helper for building the string
    fn build(tree: &FactTree, out: &mut String, index: NodeIndex, style: WriterStyle, depth: usize) {
        out.push('(');
        out.push('"');
        out.push_str(tree.text_of(index));
        out.push('"');

        match tree[index].children() {
            None => out.push_str(" nil nil"),
            Some((no, yes)) => {
                for child in [no, yes] {
                    match style {
                        WriterStyle::Compact => out.push(' '),
                        WriterStyle::Indented => {
                            out.push('\n');
                            for _ in 0..=depth {
                                out.push_str(INDENT);
                            }
                        }
                    }
                    build(tree, out, child, style, depth + 1);
                }
            }
        }

        out.push(')');
    }

    let Some(root) = tree.root_index() else {
        return "nil".to_string();
    };

    let mut out = String::with_capacity(estimate_len(tree));
    build(tree, &mut out, root, style, 0);
    out
}

/// Writes the tree to the given writer, followed by a newline.
///
/// # Errors
/// Returns an I/O error if writing fails.
pub fn write_fact_tree<W: Write>(tree: &FactTree, writer: &mut W, style: WriterStyle) -> io::Result<()> {
    writer.write_all(to_fact_string(tree, style).as_bytes())?;
    writer.write_all(b"\n")
}

/// Writes the tree to a file, creating or truncating it.
///
/// # Errors
/// Returns an I/O error if the file cannot be created or written.
pub fn write_fact_file<P: AsRef<Path>>(tree: &FactTree, path: P, style: WriterStyle) -> io::Result<()> {
    let mut writer = BufWriter::new(File::create(path)?);
    write_fact_tree(tree, &mut writer, style)?;
    writer.flush()
}

/// Estimates the length of the written tree to pre-allocate the string.
fn estimate_len(tree: &FactTree) -> usize {
    tree.pre_order_iter()
        .map(|index| tree[index].text().len() + NODE_CHARS)
        .sum()
}
