//! Soft-reference resolution

use bytestr::ByteString;

use super::Tree;
use crate::entry::{EntryId, Value};

impl Tree {
    /// Resolve `id` to the entry it stands for.
    ///
    /// Anything but a soft reference (hard references included) resolves to
    /// itself. A soft reference is looked up by anchor in the whole tree
    /// containing it (see [`find_anchor`](Tree::find_anchor)); if the match
    /// is again a soft reference, resolution continues from there.
    ///
    /// Returns `None` if an anchor is missing, or if more than
    /// [`max_follow_depth`](crate::TreeConfig::max_follow_depth) soft
    /// references would have to be followed, which also stops reference
    /// cycles. The cap counts hops: with the default of 10, a chain of ten
    /// soft references still resolves and a chain of eleven does not.
    pub fn follow(&self, id: EntryId) -> Option<EntryId> {
        self.follow_with_limit(id, self.config.max_follow_depth)
    }

    /// [`follow`](Tree::follow) with an explicit cap on soft-reference hops.
    pub fn follow_with_limit(&self, id: EntryId, max_depth: usize) -> Option<EntryId> {
        let mut current = id;
        let mut hops = 0;
        loop {
            let Value::SoftReference(target) = &self.node(current).value else {
                return Some(current);
            };
            if hops == max_depth {
                tracing::debug!(anchor = %target, max_depth, "soft reference chain too deep");
                return None;
            }
            let Some(found) = self.find_anchor(self.root_of(current), target) else {
                tracing::debug!(anchor = %target, "soft reference target not found");
                return None;
            };
            current = found;
            hops += 1;
        }
    }

    /// Find the first entry anchored as `anchor` in the subtree of `root`.
    ///
    /// The search is depth-first in pre-order: an entry is checked before
    /// its children, and earlier siblings before later ones, so the first
    /// of several entries sharing an anchor wins.
    pub fn find_anchor(&self, root: EntryId, anchor: &ByteString<'_>) -> Option<EntryId> {
        let mut stack = vec![root];
        while let Some(id) = stack.pop() {
            let node = self.node(id);
            if node.anchor.as_ref().is_some_and(|a| a == anchor) {
                return Some(id);
            }
            if let Value::List(children) = &node.value {
                stack.extend(children.iter().rev());
            }
        }
        None
    }
}
