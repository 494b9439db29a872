use factree::{FactTree, FactTreeError, parse_str};

fn animals() -> FactTree {
    parse_str(
        r#"("has fur"
             ("swims" ("nothing" nil nil) ("fish" nil nil))
             ("barks" ("cat" nil nil) ("dog" nil nil)))"#,
    )
    .unwrap()
}

// --- DEFINITION ---
#[test]
fn test_definition_of_default_entity() {
    let tree = FactTree::new();
    let root = tree.root_index().unwrap();
    assert_eq!(tree.get_definition(root).unwrap(), "nothing");
}

#[test]
fn test_definition_example_scenario() {
    let mut tree = FactTree::new();
    let root = tree.root_index().unwrap();
    let cat = tree.insert(root, "cat", "has fur").unwrap();
    let nothing = tree.find_by_name("nothing").unwrap();

    assert_eq!(tree.get_definition(cat).unwrap(), "cat has fur");
    assert_eq!(tree.get_definition(nothing).unwrap(), "nothing not has fur");
}

#[test]
fn test_definition_lists_qualifiers_from_root() {
    let tree = animals();
    let fish = tree.find_by_name("fish").unwrap();
    let cat = tree.find_by_name("cat").unwrap();

    assert_eq!(tree.get_definition(fish).unwrap(), "fish not has fur, swims");
    assert_eq!(tree.get_definition(cat).unwrap(), "cat has fur, not barks");

    let definition = tree.definition(cat).unwrap();
    assert_eq!(definition.entity, "cat");
    let chain: Vec<(&str, bool)> = definition
        .qualifiers
        .iter()
        .map(|q| (q.text, q.holds))
        .collect();
    assert_eq!(chain, vec![("has fur", true), ("barks", false)]);
}

#[test]
fn test_definition_of_qualifier_fails() {
    let tree = animals();
    let root = tree.root_index().unwrap();
    assert!(matches!(tree.get_definition(root), Err(FactTreeError::NotALeaf(_))));
    assert!(matches!(tree.get_definition(100), Err(FactTreeError::InvalidHandle(100))));
}

// --- DIFFERENCE ---
#[test]
fn test_difference_with_shared_qualifiers() {
    let tree = animals();
    let cat = tree.find_by_name("cat").unwrap();
    let dog = tree.find_by_name("dog").unwrap();

    assert_eq!(
        tree.get_difference(cat, dog).unwrap(),
        "cat and dog both: has fur; but cat not barks; and dog barks"
    );
}

#[test]
fn test_difference_without_shared_qualifiers() {
    let tree = animals();
    let fish = tree.find_by_name("fish").unwrap();
    let dog = tree.find_by_name("dog").unwrap();

    assert_eq!(
        tree.get_difference(fish, dog).unwrap(),
        "fish not has fur, swims; but dog has fur, barks"
    );
}

#[test]
fn test_difference_is_symmetric() {
    let tree = animals();
    let leaves: Vec<_> = tree.leaves().collect();

    for &a in &leaves {
        for &b in &leaves {
            if a == b {
                continue;
            }
            let ab = tree.difference(a, b).unwrap();
            let ba = tree.difference(b, a).unwrap();
            assert_eq!(ab.shared, ba.shared);
            assert_eq!(ab.first_only, ba.second_only);
            assert_eq!(ab.second_only, ba.first_only);
            assert_eq!(ab.first, ba.second);
        }
    }
}

#[test]
fn test_difference_diverges_at_last_common_qualifier() {
    let tree = animals();
    let cat = tree.find_by_name("cat").unwrap();
    let dog = tree.find_by_name("dog").unwrap();

    let difference = tree.difference(cat, dog).unwrap();
    assert_eq!(difference.shared.len(), 1);
    let (a, b) = (difference.first_only[0], difference.second_only[0]);
    assert_eq!(a.index, b.index);
    assert_eq!(a.text, "barks");
    assert!(!a.holds);
    assert!(b.holds);
}

#[test]
fn test_difference_with_itself_fails() {
    let tree = animals();
    let cat = tree.find_by_name("cat").unwrap();
    assert!(matches!(
        tree.get_difference(cat, cat),
        Err(FactTreeError::SameNode(index)) if index == cat
    ));
}

#[test]
fn test_difference_with_qualifier_fails() {
    let tree = animals();
    let root = tree.root_index().unwrap();
    let cat = tree.find_by_name("cat").unwrap();
    assert!(matches!(tree.get_difference(cat, root), Err(FactTreeError::NotALeaf(_))));
    assert!(matches!(tree.get_difference(7, cat), Err(FactTreeError::InvalidHandle(7))));
}
