//! Property-style tests for the pure tree operations

use sitebuilder_editor::tree::{all_ids, count, duplicate, find, insert, move_node, remove, subtree_size, update};
use sitebuilder_editor::{
    ComponentNode, ComponentPatch, ComponentType, Direction, Forest, IdGenerator, Template,
};
use std::collections::HashSet;

/// A few differently shaped forests built through the engine itself
fn forests() -> Vec<Forest> {
    let mut ids = IdGenerator::from_seed("f");
    let mut out = vec![Vec::new()];

    let mut flat: Forest = Vec::new();
    for kind in [ComponentType::Text, ComponentType::Button, ComponentType::Image] {
        flat = insert(&flat, kind, None, &mut ids);
    }
    out.push(flat);

    let mut nested = Template::Pricing.instantiate(&mut ids);
    nested.extend(Template::Contact.instantiate(&mut ids));
    out.push(nested);

    let deep = vec![ComponentNode::new(ids.new_id(), ComponentType::Container).with_child(
        ComponentNode::new(ids.new_id(), ComponentType::Card).with_child(
            ComponentNode::new(ids.new_id(), ComponentType::Form)
                .with_child(ComponentNode::new(ids.new_id(), ComponentType::Input)),
        ),
    )];
    out.push(deep);

    out
}

/// Sibling list containing `id`
fn siblings<'a>(forest: &'a [ComponentNode], id: &str) -> Option<&'a [ComponentNode]> {
    if forest.iter().any(|n| n.id == id) {
        return Some(forest);
    }
    forest.iter().find_map(|n| siblings(&n.children, id))
}

fn strip_ids(node: &ComponentNode) -> ComponentNode {
    let mut node = node.clone();
    node.id = String::new();
    node.children = node.children.iter().map(strip_ids).collect();
    node
}

#[test]
fn test_missing_id_is_noop_everywhere() {
    let mut ids = IdGenerator::from_seed("x");

    for forest in forests() {
        assert_eq!(insert(&forest, ComponentType::Text, Some("nope"), &mut ids), forest);
        assert_eq!(update(&forest, "nope", &ComponentPatch::content("x")), forest);
        assert_eq!(remove(&forest, "nope"), forest);
        assert_eq!(move_node(&forest, "nope", Direction::Up), forest);
        assert_eq!(move_node(&forest, "nope", Direction::Down), forest);
    }
}

#[test]
fn test_remove_counts() {
    for forest in forests() {
        for id in all_ids(&forest) {
            let result = remove(&forest, &id);
            assert!(find(&result, &id).is_none());
            assert_eq!(count(&result), count(&forest) - subtree_size(&forest, &id));
        }
    }
}

#[test]
fn test_duplicate_counts_and_structure() {
    let mut ids = IdGenerator::from_seed("dup");

    for forest in forests() {
        for id in all_ids(&forest) {
            let result = duplicate(&forest, &id, &mut ids);
            let size = subtree_size(&forest, &id);
            assert_eq!(count(&result), count(&forest) + size);

            let clone = result.last().unwrap();
            let existing: HashSet<_> = all_ids(&forest).into_iter().collect();
            for clone_id in all_ids(std::slice::from_ref(clone)) {
                assert!(!existing.contains(&clone_id), "{} collides", clone_id);
            }

            assert_eq!(strip_ids(clone), strip_ids(find(&forest, &id).unwrap()));
        }
    }
}

#[test]
fn test_move_up_then_down_restores_order() {
    for forest in forests() {
        for id in all_ids(&forest) {
            let list = siblings(&forest, &id).unwrap();
            let first = list[0].id == id;

            let up = move_node(&forest, &id, Direction::Up);
            let back = move_node(&up, &id, Direction::Down);

            if first {
                assert_eq!(up, forest);
            } else {
                assert_eq!(back, forest);
            }
        }
    }
}

#[test]
fn test_move_never_changes_nesting() {
    for forest in forests() {
        for id in all_ids(&forest) {
            let before: Vec<_> = siblings(&forest, &id).unwrap().iter().map(|n| n.id.clone()).collect();
            for direction in [Direction::Up, Direction::Down] {
                let moved = move_node(&forest, &id, direction);
                let mut after: Vec<_> =
                    siblings(&moved, &id).unwrap().iter().map(|n| n.id.clone()).collect();
                let mut expected = before.clone();
                after.sort();
                expected.sort();
                assert_eq!(after, expected);
            }
        }
    }
}

#[test]
fn test_insert_into_text_never_adds_child() {
    let mut ids = IdGenerator::from_seed("i");
    let forest = insert(&Forest::new(), ComponentType::Text, None, &mut ids);
    let text_id = forest[0].id.clone();

    assert_eq!(insert(&forest, ComponentType::Text, Some(&text_id), &mut ids), forest);
}

#[test]
fn test_insert_into_every_container_type() {
    let mut ids = IdGenerator::from_seed("c");

    for kind in ComponentType::ALL {
        let forest = insert(&Forest::new(), kind, None, &mut ids);
        let parent = forest[0].id.clone();
        let result = insert(&forest, ComponentType::Button, Some(&parent), &mut ids);

        assert_eq!(result[0].children.len(), usize::from(kind.is_container()), "{}", kind);
    }
}
