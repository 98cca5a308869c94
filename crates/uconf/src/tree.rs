//! The entry arena: creation, reference counting, typing and inspection

mod link;
mod resolve;

use std::mem;

use bytestr::ByteString;

use crate::config::TreeConfig;
use crate::entry::{ChildList, EntryId, EntryType, Value};
use crate::error::{Result, TreeError};

/// A single entry in the arena.
#[derive(Debug)]
struct Node {
    ref_count: usize,
    parent: Option<EntryId>,
    anchor: Option<ByteString<'static>>,
    name: Option<ByteString<'static>>,
    value: Value,
}

impl Node {
    fn new() -> Self {
        Self {
            ref_count: 1,
            parent: None,
            anchor: None,
            name: None,
            value: Value::Null,
        }
    }
}

#[derive(Debug)]
struct Slot {
    generation: u64,
    node: Option<Node>,
}

/// An arena of reference-counted configuration entries.
///
/// Entries are addressed by [`EntryId`] handles. Every entry carries an
/// explicit reference count: [`create`](Tree::create) hands the caller one
/// reference, linking an entry into a list gives the list one more, and a
/// hard reference owns one of its target. An entry is freed as soon as its
/// count drops to zero; dropping the whole `Tree` frees everything.
///
/// # Example
///
/// ```
/// use uconf::{bytestr, Tree};
///
/// let mut tree = Tree::new();
/// let root = tree.create_typed(uconf::EntryType::List)?;
///
/// let port = tree.create();
/// tree.set_name(port, Some(bytestr!("port")));
/// tree.set_integer(port, 8080);
/// tree.link_last(root, port);
/// tree.release(port); // the list keeps it alive
///
/// assert_eq!(tree.children(root), &[port]);
/// assert_eq!(tree.as_integer(port), Some(8080));
///
/// tree.release(root);
/// assert!(tree.is_empty());
/// # Ok::<(), uconf::TreeError>(())
/// ```
#[derive(Debug, Default)]
pub struct Tree {
    slots: Vec<Slot>,
    free: Vec<usize>,
    live: usize,
    config: TreeConfig,
}

impl Tree {
    /// Create an empty tree with default settings.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an empty tree with custom settings.
    pub fn with_config(config: TreeConfig) -> Self {
        Self {
            config,
            ..Default::default()
        }
    }

    /// The tree's settings.
    pub fn config(&self) -> &TreeConfig {
        &self.config
    }

    // ═══════════════════════════════════════════════════════════════════
    // Slot Access
    // ═══════════════════════════════════════════════════════════════════

    fn node(&self, id: EntryId) -> &Node {
        match self.slots.get(id.index) {
            Some(Slot {
                generation,
                node: Some(node),
            }) if *generation == id.generation => node,
            _ => panic!("stale entry handle {id:?}"),
        }
    }

    fn node_mut(&mut self, id: EntryId) -> &mut Node {
        match self.slots.get_mut(id.index) {
            Some(Slot {
                generation,
                node: Some(node),
            }) if *generation == id.generation => node,
            _ => panic!("stale entry handle {id:?}"),
        }
    }

    fn list_mut(&mut self, id: EntryId) -> &mut ChildList {
        match &mut self.node_mut(id).value {
            Value::List(list) => list,
            other => panic!("expected a list entry, found {}", other.entry_type()),
        }
    }

    /// Check if `id` refers to a live entry.
    pub fn contains(&self, id: EntryId) -> bool {
        matches!(
            self.slots.get(id.index),
            Some(Slot { generation, node: Some(_) }) if *generation == id.generation
        )
    }

    /// Number of live entries.
    pub fn len(&self) -> usize {
        self.live
    }

    /// Check if the tree holds no live entries.
    pub fn is_empty(&self) -> bool {
        self.live == 0
    }

    // ═══════════════════════════════════════════════════════════════════
    // Lifecycle
    // ═══════════════════════════════════════════════════════════════════

    /// Create a detached null entry. The caller owns its single reference.
    pub fn create(&mut self) -> EntryId {
        self.live += 1;
        if let Some(index) = self.free.pop() {
            let slot = &mut self.slots[index];
            slot.node = Some(Node::new());
            return EntryId {
                index,
                generation: slot.generation,
            };
        }
        self.slots.push(Slot {
            generation: 0,
            node: Some(Node::new()),
        });
        EntryId {
            index: self.slots.len() - 1,
            generation: 0,
        }
    }

    /// Create a detached entry of type `ty`.
    ///
    /// # Errors
    ///
    /// Returns [`TreeError::Init`] if the value cannot be initialized; no
    /// entry is left behind in that case.
    pub fn create_typed(&mut self, ty: EntryType) -> Result<EntryId> {
        let id = self.create();
        if let Err(err) = self.set_type(id, ty) {
            self.release(id);
            return Err(err);
        }
        Ok(id)
    }

    /// Take one more reference to `id`.
    ///
    /// # Panics
    ///
    /// Panics if the reference count would overflow or `id` is stale.
    pub fn retain(&mut self, id: EntryId) -> EntryId {
        let node = self.node_mut(id);
        node.ref_count = node
            .ref_count
            .checked_add(1)
            .unwrap_or_else(|| panic!("reference count overflow on {id:?}"));
        id
    }

    /// Drop one reference to `id`, freeing it when none are left.
    ///
    /// Freeing a list releases the list's reference to every child, and
    /// freeing a hard reference releases its target, so whole subtrees go
    /// away at once unless someone else still holds parts of them.
    ///
    /// # Panics
    ///
    /// Panics if `id` is stale, or if the last reference is dropped while
    /// the entry is still linked (its parent's reference was released by
    /// somebody other than the parent).
    pub fn release(&mut self, id: EntryId) {
        let mut pending = vec![id];
        while let Some(id) = pending.pop() {
            let node = self.node_mut(id);
            node.ref_count -= 1;
            if node.ref_count > 0 {
                continue;
            }
            assert!(
                node.parent.is_none(),
                "entry {id:?} freed while still linked into its parent"
            );
            let value = mem::replace(&mut node.value, Value::Null);
            self.detach_value(value, &mut pending);
            self.free_slot(id);
        }
    }

    /// Unlink everything `value` owns, queueing the references it held.
    fn detach_value(&mut self, value: Value, pending: &mut Vec<EntryId>) {
        match value {
            Value::List(mut children) => {
                for child in children.take() {
                    self.node_mut(child).parent = None;
                    pending.push(child);
                }
            }
            Value::HardReference(Some(target)) => pending.push(target),
            _ => {}
        }
    }

    fn free_slot(&mut self, id: EntryId) {
        let slot = &mut self.slots[id.index];
        slot.node = None;
        slot.generation = slot.generation.wrapping_add(1);
        self.free.push(id.index);
        self.live -= 1;
        tracing::trace!(index = id.index, "entry freed");
    }

    /// Replace the value of `id`, releasing whatever the old value owned.
    fn replace_value(&mut self, id: EntryId, value: Value) {
        let old = mem::replace(&mut self.node_mut(id).value, value);
        let mut pending = Vec::new();
        self.detach_value(old, &mut pending);
        for held in pending {
            self.release(held);
        }
    }

    // ═══════════════════════════════════════════════════════════════════
    // Typing and Values
    // ═══════════════════════════════════════════════════════════════════

    /// Switch `id` to type `ty`, tearing down the old value first.
    ///
    /// Does nothing if the entry already has that type. The new value is
    /// the empty value of its type: no children, an empty string, zero, or
    /// an unset hard reference.
    ///
    /// # Errors
    ///
    /// Returns [`TreeError::Init`] if the new value cannot be allocated. The
    /// entry is left as a valid null entry in that case.
    pub fn set_type(&mut self, id: EntryId, ty: EntryType) -> Result<()> {
        if self.entry_type(id) == ty {
            return Ok(());
        }
        self.replace_value(id, Value::Null);
        match ty.init(self.config.string_growth) {
            Ok(value) => {
                self.node_mut(id).value = value;
                Ok(())
            }
            Err(source) => {
                tracing::debug!(entry_type = %ty, %source, "value init failed, entry left null");
                Err(TreeError::Init {
                    entry_type: ty,
                    source,
                })
            }
        }
    }

    /// Make `id` a quoted string holding `value`.
    pub fn set_string(&mut self, id: EntryId, value: ByteString<'static>) {
        self.replace_value(id, Value::QuotedString(value));
    }

    /// Make `id` an integer holding `value`.
    pub fn set_integer(&mut self, id: EntryId, value: i64) {
        self.replace_value(id, Value::Integer(value));
    }

    /// Make `id` a float holding `value`.
    pub fn set_float(&mut self, id: EntryId, value: f64) {
        self.replace_value(id, Value::Float(value));
    }

    /// Make `id` a soft reference to the entry anchored as `target`.
    pub fn set_soft_reference(&mut self, id: EntryId, target: ByteString<'static>) {
        self.replace_value(id, Value::SoftReference(target));
    }

    /// Make `id` a hard reference to `target`, retaining it.
    ///
    /// Any previous target is released.
    pub fn set_hard_reference(&mut self, id: EntryId, target: Option<EntryId>) {
        if let Some(target) = target {
            self.retain(target);
        }
        self.replace_value(id, Value::HardReference(target));
    }

    /// Copy `bytes` into a string sized by the tree's growth policy.
    ///
    /// # Errors
    ///
    /// Returns [`TreeError::Alloc`] if allocation fails.
    pub fn alloc_string(&self, bytes: &[u8]) -> Result<ByteString<'static>> {
        Ok(ByteString::from_bytes(bytes, self.config.string_growth)?)
    }

    // ═══════════════════════════════════════════════════════════════════
    // Labels
    // ═══════════════════════════════════════════════════════════════════

    /// Set or clear the name of `id`.
    pub fn set_name(&mut self, id: EntryId, name: Option<ByteString<'static>>) {
        self.node_mut(id).name = name;
    }

    /// Set or clear the anchor of `id`.
    pub fn set_anchor(&mut self, id: EntryId, anchor: Option<ByteString<'static>>) {
        self.node_mut(id).anchor = anchor;
    }

    /// The name of `id`, if any.
    pub fn name(&self, id: EntryId) -> Option<&ByteString<'static>> {
        self.node(id).name.as_ref()
    }

    /// The anchor of `id`, if any.
    pub fn anchor(&self, id: EntryId) -> Option<&ByteString<'static>> {
        self.node(id).anchor.as_ref()
    }

    // ═══════════════════════════════════════════════════════════════════
    // Inspection
    // ═══════════════════════════════════════════════════════════════════

    /// The type tag of `id`.
    pub fn entry_type(&self, id: EntryId) -> EntryType {
        self.node(id).value.entry_type()
    }

    /// The value of `id`.
    pub fn value(&self, id: EntryId) -> &Value {
        &self.node(id).value
    }

    /// Check if `id` is a list.
    pub fn is_list(&self, id: EntryId) -> bool {
        matches!(self.node(id).value, Value::List(_))
    }

    /// Current reference count of `id`.
    pub fn ref_count(&self, id: EntryId) -> usize {
        self.node(id).ref_count
    }

    /// The list `id` is linked into, if any.
    pub fn parent(&self, id: EntryId) -> Option<EntryId> {
        self.node(id).parent
    }

    /// The topmost ancestor of `id` (itself when detached).
    pub fn root_of(&self, mut id: EntryId) -> EntryId {
        while let Some(parent) = self.parent(id) {
            id = parent;
        }
        id
    }

    /// Check if `ancestor` is `id` or lies on its parent chain.
    pub fn is_ancestor_or_self(&self, ancestor: EntryId, id: EntryId) -> bool {
        let mut current = Some(id);
        while let Some(entry) = current {
            if entry == ancestor {
                return true;
            }
            current = self.parent(entry);
        }
        false
    }

    /// Children of `id` in order; empty for anything but a list.
    pub fn children(&self, id: EntryId) -> &[EntryId] {
        match &self.node(id).value {
            Value::List(list) => list.as_slice(),
            _ => &[],
        }
    }

    /// Number of children of `id`.
    pub fn child_count(&self, id: EntryId) -> usize {
        self.children(id).len()
    }

    /// First child of `id`.
    pub fn first_child(&self, id: EntryId) -> Option<EntryId> {
        self.children(id).first().copied()
    }

    /// Last child of `id`.
    pub fn last_child(&self, id: EntryId) -> Option<EntryId> {
        self.children(id).last().copied()
    }

    fn sibling_position(&self, id: EntryId) -> Option<(&[EntryId], usize)> {
        let siblings = self.children(self.parent(id)?);
        let position = siblings.iter().position(|&sibling| sibling == id)?;
        Some((siblings, position))
    }

    /// The sibling following `id` in its parent's list.
    pub fn next_sibling(&self, id: EntryId) -> Option<EntryId> {
        let (siblings, position) = self.sibling_position(id)?;
        siblings.get(position + 1).copied()
    }

    /// The sibling preceding `id` in its parent's list.
    pub fn prev_sibling(&self, id: EntryId) -> Option<EntryId> {
        let (siblings, position) = self.sibling_position(id)?;
        position.checked_sub(1).map(|prev| siblings[prev])
    }

    /// Integer value of `id`, if it is an integer.
    pub fn as_integer(&self, id: EntryId) -> Option<i64> {
        match self.node(id).value {
            Value::Integer(value) => Some(value),
            _ => None,
        }
    }

    /// Float value of `id`, if it is a float.
    pub fn as_float(&self, id: EntryId) -> Option<f64> {
        match self.node(id).value {
            Value::Float(value) => Some(value),
            _ => None,
        }
    }

    /// String value of `id`, if it is a quoted string.
    pub fn as_string(&self, id: EntryId) -> Option<&ByteString<'static>> {
        match &self.node(id).value {
            Value::QuotedString(value) => Some(value),
            _ => None,
        }
    }

    /// Target anchor of `id`, if it is a soft reference.
    pub fn soft_target(&self, id: EntryId) -> Option<&ByteString<'static>> {
        match &self.node(id).value {
            Value::SoftReference(target) => Some(target),
            _ => None,
        }
    }

    /// Target of `id`, if it is a hard reference that has been set.
    pub fn hard_target(&self, id: EntryId) -> Option<EntryId> {
        match self.node(id).value {
            Value::HardReference(target) => target,
            _ => None,
        }
    }
}
