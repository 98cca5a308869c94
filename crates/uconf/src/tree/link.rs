//! Structural edits: link, unlink, swap and merge

use std::mem;

use super::Tree;
use crate::entry::{ChildList, EntryId, Value};

impl Tree {
    /// Link `child` into the list `parent`, right after `after`, or at the
    /// front when `after` is `None`. The list takes a reference to `child`,
    /// so the caller may release its own afterwards.
    ///
    /// # Panics
    ///
    /// Panics if `parent` is not a list, `child` is already linked, `after`
    /// is not a child of `parent`, or `parent` lies inside `child`'s subtree.
    pub fn link(&mut self, parent: EntryId, after: Option<EntryId>, child: EntryId) {
        self.check_link(parent, child);

        let index = match after {
            Some(after) => {
                assert!(
                    self.parent(after) == Some(parent),
                    "{after:?} is not a child of {parent:?}"
                );
                match self.list_mut(parent).position(after) {
                    Some(position) => position + 1,
                    None => unreachable!("linked entry missing from its parent's list"),
                }
            }
            None => 0,
        };

        self.retain(child);
        self.node_mut(child).parent = Some(parent);
        self.list_mut(parent).insert(index, child);
    }

    /// Link `child` as the first child of `parent`.
    pub fn link_first(&mut self, parent: EntryId, child: EntryId) {
        self.link(parent, None, child);
    }

    /// Link `child` as the last child of `parent`. Constant time apart
    /// from the subtree check, which walks `parent`'s ancestors.
    ///
    /// # Panics
    ///
    /// Same conditions as [`link`](Tree::link).
    pub fn link_last(&mut self, parent: EntryId, child: EntryId) {
        self.check_link(parent, child);
        self.retain(child);
        self.node_mut(child).parent = Some(parent);
        self.list_mut(parent).push(child);
    }

    fn check_link(&self, parent: EntryId, child: EntryId) {
        assert!(self.is_list(parent), "cannot link into a non-list entry");
        assert!(
            self.parent(child).is_none(),
            "entry {child:?} is already linked"
        );
        assert!(
            !self.is_ancestor_or_self(child, parent),
            "cannot link an entry into its own subtree"
        );
    }

    /// Remove `id` from its parent's list and drop the parent's reference.
    ///
    /// Retain `id` first if you want it to outlive the unlink. Unlinking a
    /// detached entry does nothing.
    pub fn unlink(&mut self, id: EntryId) {
        let Some(parent) = self.parent(id) else {
            return;
        };
        let list = self.list_mut(parent);
        match list.position(id) {
            Some(position) => {
                list.remove(position);
            }
            None => unreachable!("linked entry missing from its parent's list"),
        }
        self.node_mut(id).parent = None;
        self.release(id);
    }

    /// Unlink every child of `parent`, front to back.
    ///
    /// # Panics
    ///
    /// Panics if `parent` is not a list.
    pub fn unlink_all(&mut self, parent: EntryId) {
        self.unlink_all_with(parent, |_, _| {});
    }

    /// Unlink every child of `parent`, front to back, calling `visit` on
    /// each child just before it is unlinked.
    ///
    /// The list is emptied up front, so `visit` already sees `parent`
    /// without children; the child itself is still intact.
    ///
    /// # Panics
    ///
    /// Panics if `parent` is not a list.
    pub fn unlink_all_with<F>(&mut self, parent: EntryId, mut visit: F)
    where
        F: FnMut(&Tree, EntryId),
    {
        assert!(self.is_list(parent), "cannot unlink children of a non-list entry");
        for child in self.list_mut(parent).take() {
            visit(self, child);
            self.node_mut(child).parent = None;
            self.release(child);
        }
    }

    /// Exchange the contents (type, value, name and anchor) of `a` and `b`.
    ///
    /// Reference counts and the positions of `a` and `b` in their own
    /// parents stay as they are; children follow their list to its new
    /// entry.
    ///
    /// # Panics
    ///
    /// Panics if one entry is an ancestor of the other.
    pub fn swap(&mut self, a: EntryId, b: EntryId) {
        if a == b {
            return;
        }
        assert!(
            !self.is_ancestor_or_self(a, b) && !self.is_ancestor_or_self(b, a),
            "cannot swap an entry with its own ancestor or descendant"
        );

        let node_a = self.node_mut(a);
        let mut anchor = node_a.anchor.take();
        let mut name = node_a.name.take();
        let mut value = mem::replace(&mut node_a.value, Value::Null);

        let node_b = self.node_mut(b);
        mem::swap(&mut node_b.anchor, &mut anchor);
        mem::swap(&mut node_b.name, &mut name);
        mem::swap(&mut node_b.value, &mut value);

        let node_a = self.node_mut(a);
        node_a.anchor = anchor;
        node_a.name = name;
        node_a.value = value;

        self.adopt_children(a);
        self.adopt_children(b);
    }

    /// Point the parent link of every child of `id` back at `id`.
    fn adopt_children(&mut self, id: EntryId) {
        for index in 0..self.child_count(id) {
            let child = self.children(id)[index];
            self.node_mut(child).parent = Some(id);
        }
    }

    /// Move every child of `src` to the end of `dest`, keeping their order.
    ///
    /// `dest` is forced to be a list first; a non-list `dest` loses its old
    /// value, a list keeps its children. If `src` is not a list nothing else
    /// happens; otherwise it is left as an empty list. Moved children keep
    /// their reference counts.
    ///
    /// # Panics
    ///
    /// Panics if `dest` lies inside `src`'s subtree.
    pub fn merge(&mut self, dest: EntryId, src: EntryId) {
        if dest != src && self.is_list(src) {
            assert!(
                !self.is_ancestor_or_self(src, dest),
                "cannot merge a list into its own subtree"
            );
        }
        if !self.is_list(dest) {
            self.replace_value(dest, Value::List(ChildList::new()));
        }
        if dest == src || !self.is_list(src) {
            return;
        }

        let moved = self.list_mut(src).take();
        for &child in &moved {
            self.node_mut(child).parent = Some(dest);
        }
        self.list_mut(dest).extend(moved);
    }
}

#[cfg(test)]
mod tests {
    use crate::{EntryType, Tree};

    #[test]
    fn test_link_after_middle() {
        let mut tree = Tree::new();
        let list = tree.create_typed(EntryType::List).unwrap();
        let a = tree.create();
        let b = tree.create();
        let c = tree.create();
        tree.link_last(list, a);
        tree.link_last(list, c);
        tree.link(list, Some(a), b);
        assert_eq!(tree.children(list), &[a, b, c]);
    }

    #[test]
    #[should_panic(expected = "already linked")]
    fn test_link_last_checks_preconditions() {
        let mut tree = Tree::new();
        let list = tree.create_typed(EntryType::List).unwrap();
        let child = tree.create();
        tree.link_last(list, child);
        tree.link_last(list, child);
    }

    #[test]
    #[should_panic(expected = "not a child of")]
    fn test_link_after_foreign_entry_panics() {
        let mut tree = Tree::new();
        let list = tree.create_typed(EntryType::List).unwrap();
        let stranger = tree.create();
        let child = tree.create();
        tree.link(list, Some(stranger), child);
    }

    #[test]
    #[should_panic(expected = "own subtree")]
    fn test_link_into_own_subtree_panics() {
        let mut tree = Tree::new();
        let outer = tree.create_typed(EntryType::List).unwrap();
        let inner = tree.create_typed(EntryType::List).unwrap();
        tree.link_last(outer, inner);
        tree.link_last(inner, outer);
    }

    #[test]
    fn test_unlink_detached_is_noop() {
        let mut tree = Tree::new();
        let id = tree.create();
        tree.unlink(id);
        assert_eq!(tree.ref_count(id), 1);
    }

    #[test]
    fn test_swap_with_self_is_noop() {
        let mut tree = Tree::new();
        let id = tree.create();
        tree.set_integer(id, 3);
        tree.swap(id, id);
        assert_eq!(tree.as_integer(id), Some(3));
    }

    #[test]
    fn test_merge_into_self_only_forces_list() {
        let mut tree = Tree::new();
        let list = tree.create_typed(EntryType::List).unwrap();
        let child = tree.create();
        tree.link_last(list, child);
        tree.merge(list, list);
        assert_eq!(tree.children(list), &[child]);
    }
}
