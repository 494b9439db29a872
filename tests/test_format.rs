use factree::format::{WriterStyle, parse_file, to_dot, to_fact_string, write_fact_tree};
use factree::model::Ownership;
use factree::parser::ParsingErrorType;
use factree::{FactTree, FactTreeError, NodeIndex, parse_str};
use std::fs;

const ANIMALS: &str = r#"("has fur"
  ("nothing" nil nil)
  ("barks"
    ("cat" nil nil)
    ("dog" nil nil)))"#;

/// Shape and texts of the subtree at `index`, in the compact format.
fn describe(tree: &FactTree, index: NodeIndex) -> String {
    match tree[index].children() {
        None => format!("({})", tree.text(index).unwrap()),
        Some((no, yes)) => format!(
            "({} {} {})",
            tree.text(index).unwrap(),
            describe(tree, no),
            describe(tree, yes)
        ),
    }
}

fn assert_isomorphic(a: &FactTree, b: &FactTree) {
    match (a.root_index(), b.root_index()) {
        (Some(ra), Some(rb)) => assert_eq!(describe(a, ra), describe(b, rb)),
        (None, None) => {}
        _ => panic!("only one of the trees is empty"),
    }
}

// --- PARSING ---
#[test]
fn test_parse_tree() {
    let tree = parse_str(ANIMALS).unwrap();
    assert_eq!(tree.size(), 5);
    assert_eq!(tree.num_leaves(), 3);
    assert!(tree.is_valid());

    let root = tree.root_index().unwrap();
    assert_eq!(tree.text(root), Some("has fur"));
    let (no, yes) = tree[root].children().unwrap();
    assert_eq!(tree.text(no), Some("nothing"));
    assert_eq!(tree.text(yes), Some("barks"));
    assert_eq!(tree[yes].parent_index(), Some(root));

    let dog = tree.find_by_name("dog").unwrap();
    assert_eq!(tree.get_definition(dog).unwrap(), "dog has fur, barks");
}

#[test]
fn test_parse_single_entity() {
    let tree = parse_str("(\"nothing\" nil nil)").unwrap();
    assert_eq!(tree.size(), 1);
    assert!(tree.is_leaf(tree.root_index().unwrap()));
}

#[test]
fn test_parse_whitespace_between_all_tokens() {
    let tree = parse_str(" \n\t( \"a\"\r\n(\"b\"nil nil)  (  \"c\" nil\tnil ) )  ").unwrap();
    assert_eq!(tree.size(), 3);
    assert!(tree.find_by_name("b").is_some());
    assert!(tree.find_by_name("c").is_some());
}

#[test]
fn test_parse_keeps_spaces_and_unicode_in_names() {
    let tree = parse_str("(\"lives in  water\" (\"Bär\" nil nil) (\"🐟 fish\" nil nil))").unwrap();
    let root = tree.root_index().unwrap();
    assert_eq!(tree.text(root), Some("lives in  water"));
    assert!(tree.find_by_name("Bär").is_some());
    assert!(tree.find_by_name("🐟 fish").is_some());
}

#[test]
fn test_parse_nil_root_is_empty_tree() {
    let tree = parse_str("nil").unwrap();
    assert!(tree.is_empty());
    assert!(tree.is_valid());
}

#[test]
fn test_parse_ignores_trailing_content() {
    let tree = parse_str("(\"cat\" nil nil) and then some").unwrap();
    assert_eq!(tree.size(), 1);
}

// --- SYNTAX ERRORS ---
#[test]
fn test_missing_closing_paren() {
    let err = parse_str("(\"cat\" nil nil").unwrap_err();
    assert_eq!(err.kind(), &ParsingErrorType::UnexpectedEof { expected: "')'" });
    assert_eq!(err.position(), 14);
    assert_eq!(err.line(), 1);
    assert_eq!(err.column(), 15);
}

#[test]
fn test_unexpected_symbol() {
    let err = parse_str("(\"cat\" nil nil]").unwrap_err();
    assert_eq!(
        err.kind(),
        &ParsingErrorType::UnexpectedSymbol {
            found: b']',
            expected: "')'"
        }
    );
    assert_eq!(err.position(), 14);
    assert_eq!(err.context(), "]");

    let message = err.to_string();
    assert!(message.contains("']'"));
    assert!(message.contains("93"));
    assert!(message.contains("')'"));
}

#[test]
fn test_missing_opening_quote() {
    let err = parse_str("(cat nil nil)").unwrap_err();
    assert!(matches!(
        err.kind(),
        ParsingErrorType::UnexpectedSymbol { found: b'c', .. }
    ));
    assert_eq!(err.position(), 1);
}

#[test]
fn test_unclosed_name() {
    let err = parse_str("(\"has fur\" (\"cat nil nil) nil)").unwrap_err();
    assert_eq!(err.kind(), &ParsingErrorType::UnclosedName);
    assert_eq!(err.position(), 12);
}

#[test]
fn test_single_child_is_rejected() {
    let input = "(\"has fur\"\n  nil\n  (\"cat\" nil nil))";
    let err = parse_str(input).unwrap_err();
    assert_eq!(err.kind(), &ParsingErrorType::SingleChild);
    assert_eq!(err.position(), 0);

    let err = parse_str("(\"a\" (\"b\" nil nil) nil)").unwrap_err();
    assert_eq!(err.kind(), &ParsingErrorType::SingleChild);
}

#[test]
fn test_error_line_and_column() {
    let err = parse_str("(\"has fur\"\n  (\"nothing\" nil nil)\n  (\"cat\" nil Nil))").unwrap_err();
    assert_eq!(err.line(), 3);
    assert_eq!(err.column(), 14);
    assert!(matches!(
        err.kind(),
        ParsingErrorType::UnexpectedSymbol { found: b'N', .. }
    ));
}

#[test]
fn test_empty_input() {
    let err = parse_str("   ").unwrap_err();
    assert!(matches!(err.kind(), ParsingErrorType::UnexpectedEof { .. }));
}

// --- WRITING ---
#[test]
fn test_write_compact() {
    let tree = parse_str(ANIMALS).unwrap();
    assert_eq!(
        to_fact_string(&tree, WriterStyle::Compact),
        r#"("has fur" ("nothing" nil nil) ("barks" ("cat" nil nil) ("dog" nil nil)))"#
    );
}

#[test]
fn test_write_indented_matches_input() {
    let tree = parse_str(ANIMALS).unwrap();
    assert_eq!(to_fact_string(&tree, WriterStyle::Indented), ANIMALS);
}

#[test]
fn test_write_empty_tree() {
    let tree = FactTree::empty();
    let mut out = Vec::new();
    write_fact_tree(&tree, &mut out, WriterStyle::Compact).unwrap();
    assert_eq!(out, b"nil\n");
}

#[test]
fn test_round_trip_after_learning() {
    let mut tree = parse_str(ANIMALS).unwrap();
    let nothing = tree.find_by_name("nothing").unwrap();
    tree.insert(nothing, "fish", "swims").unwrap();

    for style in [WriterStyle::Compact, WriterStyle::Indented] {
        let reparsed = parse_str(to_fact_string(&tree, style)).unwrap();
        assert_isomorphic(&tree, &reparsed);
        assert!(reparsed.is_valid());
    }
}

// --- TEXT OWNERSHIP ---
#[test]
fn test_parsed_texts_borrow_from_buffer() {
    let mut tree = parse_str(ANIMALS).unwrap();
    assert_eq!(tree.buffer_len(), ANIMALS.len());
    for index in tree.pre_order_iter() {
        assert_eq!(tree.ownership(index), Some(Ownership::Buffer));
    }

    // Splitting moves the borrowed text to the new "No" child and adds owned texts
    let cat = tree.find_by_name("cat").unwrap();
    let lion = tree.insert(cat, "lion", "roars").unwrap();
    let cat_moved = tree.find_by_name("cat").unwrap();

    assert_eq!(tree.ownership(cat), Some(Ownership::Owned));
    assert_eq!(tree.text(cat), Some("roars"));
    assert_eq!(tree.ownership(lion), Some(Ownership::Owned));
    assert_eq!(tree.ownership(cat_moved), Some(Ownership::Buffer));
    assert!(tree.is_valid());

    // After a round trip everything is borrowed again
    let reparsed = parse_str(to_fact_string(&tree, WriterStyle::Compact)).unwrap();
    assert!(
        reparsed
            .pre_order_iter()
            .all(|index| reparsed.ownership(index) == Some(Ownership::Buffer))
    );
}

// --- FILES ---
#[test]
fn test_save_and_load() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("animals.facts");

    let mut tree = FactTree::new();
    let root = tree.root_index().unwrap();
    let cat = tree.insert(root, "cat", "has fur").unwrap();
    tree.insert(cat, "dog", "barks").unwrap();
    tree.save(&path).unwrap();

    let written = fs::read_to_string(&path).unwrap();
    assert_eq!(written, format!("{ANIMALS}\n"));

    let mut loaded = FactTree::new();
    loaded.load(&path).unwrap();
    assert_isomorphic(&tree, &loaded);
    assert_eq!(loaded.buffer_len(), written.len());
    assert!(loaded.is_valid());
}

#[test]
fn test_failed_load_keeps_previous_tree() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("broken.facts");
    fs::write(&path, "(\"cat\" nil nil").unwrap();

    let mut tree = parse_str(ANIMALS).unwrap();
    let err = tree.load(&path).unwrap_err();
    assert!(matches!(err, FactTreeError::Syntax(_)));
    assert_eq!(tree.size(), 5);
    assert!(tree.find_by_name("dog").is_some());

    let err = tree.load(dir.path().join("missing.facts")).unwrap_err();
    assert!(matches!(err, FactTreeError::Io(_)));
    assert_eq!(tree.size(), 5);
}

#[test]
fn test_load_rejects_invalid_utf8() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("latin1.facts");
    fs::write(&path, b"(\"B\xe4r\" nil nil)").unwrap();

    match parse_file(&path) {
        Err(FactTreeError::Syntax(err)) => {
            assert_eq!(err.kind(), &ParsingErrorType::InvalidUtf8);
            assert_eq!(err.position(), 3);
        }
        other => panic!("expected invalid UTF-8 error, got {other:?}"),
    }
}

#[test]
fn test_dot_export_of_loaded_tree() {
    let tree = parse_str(ANIMALS).unwrap();
    let dot = to_dot(&tree);
    assert_eq!(dot.matches("label=\"Yes\"").count(), 2);
    assert_eq!(dot.matches("label=\"No\"").count(), 2);
    assert!(dot.contains("text: dog"));
}
