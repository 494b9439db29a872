//! Graphviz export of a fact tree, for inspecting a knowledge base.
//!
//! Every node becomes a record showing its index, parent and text;
//! edges to the left child are labelled `No`, to the right child `Yes`.
//! Render with e.g. `dot -T svg -o tree.svg tree.dot`.

use crate::model::FactTree;
use std::fmt::Write as _;
use std::fs;
use std::io;
use std::path::Path;

/// Returns the DOT representation of the tree.
pub fn to_dot(tree: &FactTree) -> String {
    let mut dot = String::from("digraph {\n  rankdir=TB;\n  nodesep=0.9;\n  ranksep=0.75;\n");

    // Writing into a String cannot fail
    for index in tree.pre_order_iter() {
        let node = &tree[index];
        let parent = node
            .parent_index()
            .map_or_else(|| "-".to_string(), |parent| parent.to_string());
        let _ = writeln!(
            dot,
            "  node_{index} [shape=record, label=\"{{ index: {index} | parent: {parent} | text: {} }}\"];",
            escape_record(tree.text_of(index))
        );

        if let Some((no, yes)) = node.children() {
            let _ = writeln!(dot, "  node_{index} -> node_{no} [label=\"No\"];");
            let _ = writeln!(dot, "  node_{index} -> node_{yes} [label=\"Yes\"];");
        }
    }

    dot.push_str("}\n");
    dot
}

/// Writes the DOT representation of the tree to a file.
///
/// # Errors
/// Returns an I/O error if the file cannot be written.
pub fn write_dot_file<P: AsRef<Path>>(tree: &FactTree, path: P) -> io::Result<()> {
    fs::write(path, to_dot(tree))
}

/// Escapes characters with a meaning inside DOT record labels.
fn escape_record(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for ch in text.chars() {
        if matches!(ch, '"' | '\\' | '{' | '}' | '|' | '<' | '>') {
            escaped.push('\\');
        }
        escaped.push(ch);
    }
    escaped
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dot_lists_nodes_and_labelled_edges() {
        let mut tree = FactTree::new();
        let root = tree.root_index().unwrap();
        let cat = tree.insert(root, "cat", "has fur").unwrap();

        let dot = to_dot(&tree);
        assert!(dot.starts_with("digraph {"));
        assert!(dot.trim_end().ends_with('}'));
        assert!(dot.contains("text: has fur"));
        assert!(dot.contains(&format!("node_{root} -> node_{cat} [label=\"Yes\"];")));
        assert_eq!(dot.matches("label=\"No\"").count(), 1);
        assert_eq!(dot.matches("shape=record").count(), 3);
    }

    #[test]
    fn test_record_special_characters_are_escaped() {
        assert_eq!(escape_record("a|b {c} <d>"), "a\\|b \\{c\\} \\<d\\>");
        assert_eq!(escape_record("plain"), "plain");
    }

    #[test]
    fn test_empty_tree_has_no_nodes() {
        let dot = to_dot(&FactTree::empty());
        assert!(!dot.contains("node_"));
    }
}
