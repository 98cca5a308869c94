//! Entry handles, type tags and values

use std::fmt;

use bytestr::{ByteString, Growth};

/// Handle to an entry stored in a [`Tree`](crate::Tree).
///
/// Handles are plain copyable indices; they do not hold a reference. Once
/// the entry is freed its handle goes stale and every tree operation given
/// that handle panics, even if the slot has been reused. Generations are
/// 64-bit, so a slot would have to be reused 2^64 times before an old
/// handle could alias a new entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct EntryId {
    pub(crate) index: usize,
    pub(crate) generation: u64,
}

/// The type tag of an entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum EntryType {
    /// No value
    Null,
    /// An ordered list of child entries
    List,
    /// A quoted string
    QuotedString,
    /// A signed 64-bit integer
    Integer,
    /// A floating point number
    Float,
    /// A reference to another entry by anchor, resolved on read
    SoftReference,
    /// A counted reference to another entry
    HardReference,
}

impl EntryType {
    /// Short name used in messages and dumps.
    pub fn name(self) -> &'static str {
        match self {
            EntryType::Null => "null",
            EntryType::List => "list",
            EntryType::QuotedString => "qstr",
            EntryType::Integer => "qint",
            EntryType::Float => "qfloat",
            EntryType::SoftReference => "sref",
            EntryType::HardReference => "ref",
        }
    }

    /// Build the initial value for this type.
    pub(crate) fn init(self, growth: Growth) -> bytestr::Result<Value> {
        Ok(match self {
            EntryType::Null => Value::Null,
            EntryType::List => Value::List(ChildList::new()),
            EntryType::QuotedString => Value::QuotedString(ByteString::new(0, growth)?),
            EntryType::Integer => Value::Integer(0),
            EntryType::Float => Value::Float(0.0),
            EntryType::SoftReference => Value::SoftReference(ByteString::new(0, growth)?),
            EntryType::HardReference => Value::HardReference(None),
        })
    }
}

impl fmt::Display for EntryType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// The value slot of an entry. Exactly one variant is active, matching the
/// entry's [`EntryType`].
#[derive(Debug, PartialEq)]
pub enum Value {
    /// No value
    Null,

    /// Children in order. The parent holds one reference to each.
    List(ChildList),

    /// Owned quoted string
    QuotedString(ByteString<'static>),

    /// Signed 64-bit integer
    Integer(i64),

    /// Floating point number
    Float(f64),

    /// Anchor name of the referenced entry
    SoftReference(ByteString<'static>),

    /// Referenced entry, if set. The holder owns one reference to it.
    HardReference(Option<EntryId>),
}

impl Value {
    /// The type tag of this value.
    pub fn entry_type(&self) -> EntryType {
        match self {
            Value::Null => EntryType::Null,
            Value::List(_) => EntryType::List,
            Value::QuotedString(_) => EntryType::QuotedString,
            Value::Integer(_) => EntryType::Integer,
            Value::Float(_) => EntryType::Float,
            Value::SoftReference(_) => EntryType::SoftReference,
            Value::HardReference(_) => EntryType::HardReference,
        }
    }
}

/// The ordered children of a list entry.
#[derive(Debug, Default, PartialEq, Eq)]
pub struct ChildList {
    items: Vec<EntryId>,
}

impl ChildList {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    /// Number of children
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Check if there are no children
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// First child
    pub fn first(&self) -> Option<EntryId> {
        self.items.first().copied()
    }

    /// Last child
    pub fn last(&self) -> Option<EntryId> {
        self.items.last().copied()
    }

    /// Children in order
    pub fn iter(&self) -> impl DoubleEndedIterator<Item = EntryId> + '_ {
        self.items.iter().copied()
    }

    /// Children as a slice
    pub fn as_slice(&self) -> &[EntryId] {
        &self.items
    }

    pub(crate) fn position(&self, id: EntryId) -> Option<usize> {
        self.items.iter().position(|&child| child == id)
    }

    pub(crate) fn insert(&mut self, index: usize, id: EntryId) {
        self.items.insert(index, id);
    }

    pub(crate) fn push(&mut self, id: EntryId) {
        self.items.push(id);
    }

    pub(crate) fn remove(&mut self, index: usize) -> EntryId {
        self.items.remove(index)
    }

    pub(crate) fn take(&mut self) -> Vec<EntryId> {
        std::mem::take(&mut self.items)
    }

    pub(crate) fn extend(&mut self, ids: Vec<EntryId>) {
        self.items.extend(ids);
    }
}
