//! Swap, merge and soft-reference resolution tests

use pretty_assertions::assert_eq;
use uconf::*;

/// Build a list of `values` integer children, returning the list and its
/// children. The list holds the only reference to each child.
fn int_list(tree: &mut Tree, values: &[i64]) -> (EntryId, Vec<EntryId>) {
    let list = tree.create_typed(EntryType::List).expect("list init");
    let children = values
        .iter()
        .map(|&n| {
            let child = tree.create();
            tree.set_integer(child, n);
            tree.link_last(list, child);
            tree.release(child);
            child
        })
        .collect();
    (list, children)
}

// ═══════════════════════════════════════════════════════════════════════
// Swap
// ═══════════════════════════════════════════════════════════════════════

#[test]
fn test_swap_list_with_string() -> anyhow::Result<()> {
    let mut tree = Tree::new();
    let (list, children) = int_list(&mut tree, &[1, 2]);
    tree.set_name(list, Some(bytestr!("numbers")));
    let text = tree.create();
    tree.set_string(text, tree.alloc_string(b"hello")?);
    tree.set_anchor(text, Some(bytestr!("greeting")));

    tree.swap(list, text);

    assert_eq!(tree.entry_type(list), EntryType::QuotedString);
    assert_eq!(tree.as_string(list).and_then(|s| s.to_str()), Some("hello"));
    assert_eq!(tree.anchor(list).and_then(|s| s.to_str()), Some("greeting"));
    assert_eq!(tree.name(list), None);

    assert_eq!(tree.children(text), children.as_slice());
    assert_eq!(tree.name(text).and_then(|s| s.to_str()), Some("numbers"));
    for child in children {
        assert_eq!(tree.parent(child), Some(text));
    }
    Ok(())
}

#[test]
fn test_swap_keeps_positions_and_counts() {
    let mut tree = Tree::new();
    let (left, left_children) = int_list(&mut tree, &[1]);
    let (right, right_children) = int_list(&mut tree, &[2]);
    let a = left_children[0];
    let b = right_children[0];
    tree.retain(a);

    tree.swap(a, b);

    assert_eq!(tree.parent(a), Some(left));
    assert_eq!(tree.parent(b), Some(right));
    assert_eq!(tree.as_integer(a), Some(2));
    assert_eq!(tree.as_integer(b), Some(1));
    assert_eq!(tree.ref_count(a), 2);
    assert_eq!(tree.ref_count(b), 1);
}

#[test]
#[should_panic(expected = "ancestor or descendant")]
fn test_swap_with_descendant_panics() {
    let mut tree = Tree::new();
    let (list, children) = int_list(&mut tree, &[1]);
    tree.swap(list, children[0]);
}

// ═══════════════════════════════════════════════════════════════════════
// Merge
// ═══════════════════════════════════════════════════════════════════════

#[test]
fn test_merge_into_integer() {
    let mut tree = Tree::new();
    let dest = tree.create();
    tree.set_integer(dest, 7);
    let (src, children) = int_list(&mut tree, &[1, 2, 3]);

    tree.merge(dest, src);

    assert_eq!(tree.entry_type(dest), EntryType::List);
    assert_eq!(tree.children(dest), children.as_slice());
    assert!(tree.is_list(src));
    assert_eq!(tree.child_count(src), 0);
    for child in children {
        assert_eq!(tree.parent(child), Some(dest));
        assert_eq!(tree.ref_count(child), 1);
    }
}

#[test]
fn test_merge_appends_after_existing_children() {
    let mut tree = Tree::new();
    let (dest, mut expected) = int_list(&mut tree, &[1, 2]);
    let (src, moved) = int_list(&mut tree, &[3, 4]);
    expected.extend(moved);

    tree.merge(dest, src);

    assert_eq!(tree.children(dest), expected.as_slice());
    let values: Vec<i64> = expected.iter().filter_map(|&c| tree.as_integer(c)).collect();
    assert_eq!(values, vec![1, 2, 3, 4]);
}

#[test]
fn test_merge_non_list_source_only_forces_list() {
    let mut tree = Tree::new();
    let dest = tree.create();
    let src = tree.create();
    tree.set_integer(src, 9);

    tree.merge(dest, src);

    assert!(tree.is_list(dest));
    assert_eq!(tree.child_count(dest), 0);
    assert_eq!(tree.as_integer(src), Some(9));
}

#[test]
fn test_merged_children_freed_with_new_parent() {
    let mut tree = Tree::new();
    let dest = tree.create();
    let (src, _) = int_list(&mut tree, &[1, 2, 3]);
    tree.merge(dest, src);

    tree.release(src);
    assert_eq!(tree.len(), 4);
    tree.release(dest);
    assert!(tree.is_empty());
}

// ═══════════════════════════════════════════════════════════════════════
// Follow
// ═══════════════════════════════════════════════════════════════════════

/// Link a chain of `len` soft references under a fresh root, ending at an
/// integer anchored as `end`. Returns the root, the head of the chain and
/// the final target.
fn sref_chain(tree: &mut Tree, len: usize) -> (EntryId, EntryId, EntryId) {
    let root = tree.create_typed(EntryType::List).expect("list init");
    let target = tree.create();
    tree.set_integer(target, 42);
    tree.set_anchor(target, Some(bytestr!("end")));
    tree.link_last(root, target);
    tree.release(target);

    let mut next = tree.alloc_string(b"end").expect("anchor alloc");
    let mut head = target;
    for n in 0..len {
        let link = tree.create();
        let anchor = tree
            .alloc_string(format!("link{n}").as_bytes())
            .expect("anchor alloc");
        tree.set_soft_reference(link, next);
        tree.set_anchor(link, Some(anchor.clone()));
        tree.link_last(root, link);
        tree.release(link);
        next = anchor;
        head = link;
    }
    (root, head, target)
}

#[test]
fn test_follow_missing_anchor() {
    let mut tree = Tree::new();
    let root = tree.create_typed(EntryType::List).unwrap();
    let dangling = tree.create();
    tree.set_soft_reference(dangling, bytestr!("nowhere"));
    tree.link_last(root, dangling);

    assert_eq!(tree.follow(dangling), None);
}

#[test]
fn test_follow_short_chain_resolves() {
    let mut tree = Tree::new();
    let (_, head, target) = sref_chain(&mut tree, 5);
    assert_eq!(tree.follow(head), Some(target));
    assert_eq!(tree.as_integer(target), Some(42));
}

#[test]
fn test_follow_chain_at_limit_resolves() {
    let mut tree = Tree::new();
    let (_, head, target) = sref_chain(&mut tree, DEFAULT_MAX_FOLLOW_DEPTH);
    assert_eq!(tree.follow(head), Some(target));
}

#[test]
fn test_follow_chain_past_limit_fails() {
    let mut tree = Tree::new();
    let (_, head, _) = sref_chain(&mut tree, DEFAULT_MAX_FOLLOW_DEPTH + 1);
    assert_eq!(tree.follow(head), None);
}

#[test]
fn test_follow_two_cycle_fails() {
    let mut tree = Tree::new();
    let root = tree.create_typed(EntryType::List).unwrap();
    let ping = tree.create();
    let pong = tree.create();
    tree.set_anchor(ping, Some(bytestr!("ping")));
    tree.set_anchor(pong, Some(bytestr!("pong")));
    tree.set_soft_reference(ping, bytestr!("pong"));
    tree.set_soft_reference(pong, bytestr!("ping"));
    tree.link_last(root, ping);
    tree.link_last(root, pong);

    assert_eq!(tree.follow(ping), None);
}

#[test]
fn test_follow_searches_whole_tree() {
    let mut tree = Tree::new();
    let root = tree.create_typed(EntryType::List).unwrap();
    let left = tree.create_typed(EntryType::List).unwrap();
    let right = tree.create_typed(EntryType::List).unwrap();
    tree.link_last(root, left);
    tree.link_last(root, right);

    let target = tree.create();
    tree.set_anchor(target, Some(bytestr!("shared")));
    tree.link_last(left, target);
    let sref = tree.create();
    tree.set_soft_reference(sref, bytestr!("shared"));
    tree.link_last(right, sref);

    assert_eq!(tree.follow(sref), Some(target));
}

#[test]
fn test_follow_duplicate_anchor_takes_first() {
    let mut tree = Tree::new();
    let root = tree.create_typed(EntryType::List).unwrap();
    let nested = tree.create_typed(EntryType::List).unwrap();
    let deep = tree.create();
    let shallow = tree.create();
    for id in [deep, shallow] {
        tree.set_anchor(id, Some(bytestr!("dup")));
    }
    tree.link_last(nested, deep);
    tree.link_last(root, nested);
    tree.link_last(root, shallow);

    let sref = tree.create();
    tree.set_soft_reference(sref, bytestr!("dup"));
    tree.link_last(root, sref);

    assert_eq!(tree.follow(sref), Some(deep));
}

#[test]
fn test_follow_hard_reference_is_not_dereferenced() {
    let mut tree = Tree::new();
    let target = tree.create();
    let holder = tree.create();
    tree.set_hard_reference(holder, Some(target));

    assert_eq!(tree.follow(holder), Some(holder));
    assert_eq!(tree.hard_target(holder), Some(target));
    assert_eq!(tree.ref_count(target), 2);
}
