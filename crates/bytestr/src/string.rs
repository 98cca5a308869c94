//! The byte string type and its growth primitive

use std::hash::{Hash, Hasher};

use crate::error::{AllocError, Result};
use crate::growth::Growth;

/// Backing storage for released and empty strings.
const TERMINATOR: &[u8] = &[0];

#[derive(Clone)]
enum Buffer<'a> {
    /// Memory owned by somebody else. Never written to.
    Borrowed(&'a [u8]),

    /// Our own allocation. Always exactly `capacity + 1` bytes long.
    Owned(Vec<u8>),
}

/// A byte string with explicit length, capacity and buffer ownership.
///
/// Invariants:
/// - `len <= capacity`
/// - the buffer has at least `len + 1` readable bytes and `buffer[len] == 0`
/// - an owned buffer has exactly `capacity + 1` bytes
/// - a borrowed buffer is never mutated; mutation switches to an owned copy
///
/// The lifetime `'a` is the lifetime of a borrowed buffer. Strings that must
/// outlive their source (for example everything stored in a configuration
/// tree) are `ByteString<'static>`.
#[derive(Clone)]
pub struct ByteString<'a> {
    len: usize,
    capacity: usize,
    buf: Buffer<'a>,
}

/// Allocate a zero-filled buffer for `capacity` bytes plus the terminator.
fn alloc_zeroed(capacity: usize) -> Result<Vec<u8>> {
    let requested = capacity.checked_add(1).ok_or(AllocError::new(usize::MAX))?;
    let mut buf = Vec::new();
    buf.try_reserve_exact(requested)
        .map_err(|_| AllocError::new(requested))?;
    buf.resize(requested, 0);
    Ok(buf)
}

// ═══════════════════════════════════════════════════════════════════════
// Construction
// ═══════════════════════════════════════════════════════════════════════

impl ByteString<'static> {
    /// Create an empty string. Does not allocate.
    pub const fn empty() -> Self {
        Self {
            len: 0,
            capacity: 0,
            buf: Buffer::Borrowed(TERMINATOR),
        }
    }

    /// Allocate an owned string of `len` zero bytes with room for
    /// `capacity` bytes.
    ///
    /// # Panics
    ///
    /// Panics if `len > capacity`.
    pub fn with_capacity(len: usize, capacity: usize) -> Result<Self> {
        assert!(
            len <= capacity,
            "byte string length {len} exceeds capacity {capacity}"
        );
        Ok(Self {
            len,
            capacity,
            buf: Buffer::Owned(alloc_zeroed(capacity)?),
        })
    }

    /// Allocate an owned string of `len` zero bytes, sized by `growth`.
    pub fn new(len: usize, growth: Growth) -> Result<Self> {
        Self::with_capacity(len, growth.capacity_for(len))
    }

    /// Copy `bytes` into a new owned string, sized by `growth`.
    pub fn from_bytes(bytes: &[u8], growth: Growth) -> Result<Self> {
        let mut s = Self::new(bytes.len(), growth)?;
        s.owned_content_mut().copy_from_slice(bytes);
        Ok(s)
    }
}

impl<'a> ByteString<'a> {
    /// Create a non-owning view of `buf[..len]`.
    ///
    /// Nothing is copied. `buf[len]` must already be the zero terminator,
    /// since a borrowed buffer is never written to.
    ///
    /// # Panics
    ///
    /// Panics if `buf` is shorter than `len + 1` bytes or `buf[len]` is not
    /// zero.
    pub const fn borrowed(buf: &'a [u8], len: usize) -> Self {
        assert!(len < buf.len(), "borrowed buffer has no room for a terminator");
        assert!(buf[len] == 0, "borrowed buffer is not zero-terminated");
        Self {
            len,
            capacity: len,
            buf: Buffer::Borrowed(buf),
        }
    }

    // ═══════════════════════════════════════════════════════════════════
    // Inspection
    // ═══════════════════════════════════════════════════════════════════

    /// Number of bytes in use, terminator excluded.
    pub fn len(&self) -> usize {
        self.len
    }

    /// Check if the string has no content.
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Number of bytes the string can hold without reallocating.
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Check if this string owns (and will free) its buffer.
    pub fn owns_buffer(&self) -> bool {
        matches!(self.buf, Buffer::Owned(_))
    }

    /// The content, terminator excluded.
    pub fn as_bytes(&self) -> &[u8] {
        &self.raw()[..self.len]
    }

    /// The content followed by its zero terminator.
    pub fn as_bytes_with_nul(&self) -> &[u8] {
        &self.raw()[..=self.len]
    }

    /// The content as UTF-8 text, if it is valid UTF-8.
    pub fn to_str(&self) -> Option<&str> {
        std::str::from_utf8(self.as_bytes()).ok()
    }

    fn raw(&self) -> &[u8] {
        match &self.buf {
            Buffer::Borrowed(buf) => buf,
            Buffer::Owned(buf) => buf,
        }
    }

    // ═══════════════════════════════════════════════════════════════════
    // Growth
    // ═══════════════════════════════════════════════════════════════════

    /// Set the length to `len`, growing the buffer if needed.
    ///
    /// If `len` exceeds the capacity, a new buffer is allocated per
    /// `growth` and the old content is carried over. A borrowed buffer is
    /// always replaced by an owned copy first. Bytes exposed by growing the
    /// length are zero.
    ///
    /// # Errors
    ///
    /// Returns [`AllocError`] if allocation fails; the string is left
    /// untouched in that case.
    pub fn fit(&mut self, len: usize, growth: Growth) -> Result<()> {
        self.fit_mut(len, growth).map(|_| ())
    }

    /// [`fit`](Self::fit), returning the resized content for writing.
    fn fit_mut(&mut self, len: usize, growth: Growth) -> Result<&mut [u8]> {
        if len > self.capacity || !self.owns_buffer() {
            let capacity = if len > self.capacity {
                growth.capacity_for(len)
            } else {
                self.capacity
            };
            let mut buf = alloc_zeroed(capacity)?;
            let keep = self.len.min(len);
            buf[..keep].copy_from_slice(&self.as_bytes()[..keep]);
            self.buf = Buffer::Owned(buf);
            self.capacity = capacity;
        } else if let Buffer::Owned(buf) = &mut self.buf {
            if len > self.len {
                buf[self.len..len].fill(0);
            }
            buf[len] = 0;
        }
        self.len = len;
        Ok(self.owned_content_mut())
    }

    /// Mutable access to the content of an owned string.
    fn owned_content_mut(&mut self) -> &mut [u8] {
        match &mut self.buf {
            Buffer::Owned(buf) => &mut buf[..self.len],
            Buffer::Borrowed(_) => unreachable!("borrowed byte strings are never written to"),
        }
    }

    /// Mutable access to the content.
    ///
    /// A borrowed string is copied into an owned buffer of the same
    /// capacity first.
    ///
    /// # Errors
    ///
    /// Returns [`AllocError`] if the copy cannot be allocated.
    pub fn make_mut(&mut self) -> Result<&mut [u8]> {
        self.fit_mut(self.len, Growth::Tight)
    }

    /// Append `other` to this string.
    ///
    /// # Errors
    ///
    /// Returns [`AllocError`] if growing fails; the string is unchanged.
    pub fn concat(&mut self, other: &ByteString<'_>, growth: Growth) -> Result<()> {
        self.concat_bytes(other.as_bytes(), growth)
    }

    /// Append raw `bytes` to this string.
    ///
    /// # Errors
    ///
    /// Returns [`AllocError`] if growing fails; the string is unchanged.
    pub fn concat_bytes(&mut self, bytes: &[u8], growth: Growth) -> Result<()> {
        let start = self.len;
        let len = start
            .checked_add(bytes.len())
            .ok_or(AllocError::new(usize::MAX))?;
        self.fit_mut(len, growth)?[start..].copy_from_slice(bytes);
        Ok(())
    }

    /// Replace the content with a copy of `other`.
    ///
    /// # Errors
    ///
    /// Returns [`AllocError`] if growing fails; the string is unchanged.
    pub fn copy_from(&mut self, other: &ByteString<'_>, growth: Growth) -> Result<()> {
        self.copy_from_bytes(other.as_bytes(), growth)
    }

    /// Replace the content with a copy of raw `bytes`.
    ///
    /// # Errors
    ///
    /// Returns [`AllocError`] if growing fails; the string is unchanged.
    pub fn copy_from_bytes(&mut self, bytes: &[u8], growth: Growth) -> Result<()> {
        self.fit_mut(bytes.len(), growth)?.copy_from_slice(bytes);
        Ok(())
    }

    /// Free an owned buffer and reset to the empty string.
    ///
    /// Borrowed buffers are left alone. Calling this more than once is
    /// harmless.
    pub fn release(&mut self) {
        self.buf = Buffer::Borrowed(TERMINATOR);
        self.len = 0;
        self.capacity = 0;
    }

    // ═══════════════════════════════════════════════════════════════════
    // Copies
    // ═══════════════════════════════════════════════════════════════════

    /// Copy the content into a new owned string, sized by `growth`.
    ///
    /// # Errors
    ///
    /// Returns [`AllocError`] if allocation fails.
    pub fn duplicate(&self, growth: Growth) -> Result<ByteString<'static>> {
        ByteString::from_bytes(self.as_bytes(), growth)
    }

    /// Detach from any borrowed buffer, keeping length and capacity.
    ///
    /// # Errors
    ///
    /// Returns [`AllocError`] if a borrowed string cannot be copied.
    pub fn into_owned(self) -> Result<ByteString<'static>> {
        match self.buf {
            Buffer::Owned(buf) => Ok(ByteString {
                len: self.len,
                capacity: self.capacity,
                buf: Buffer::Owned(buf),
            }),
            Buffer::Borrowed(buf) => {
                let mut owned = ByteString::with_capacity(self.len, self.capacity)?;
                owned.owned_content_mut().copy_from_slice(&buf[..self.len]);
                Ok(owned)
            }
        }
    }

    // ═══════════════════════════════════════════════════════════════════
    // Comparison
    // ═══════════════════════════════════════════════════════════════════

    /// Compare the content with raw `bytes`.
    pub fn eq_bytes(&self, bytes: &[u8]) -> bool {
        self.as_bytes() == bytes
    }

    /// Compare the first `n` bytes of both strings.
    ///
    /// If either string is shorter than `n`, the whole strings are compared
    /// instead.
    pub fn prefix_eq(&self, other: &ByteString<'_>, n: usize) -> bool {
        if self.len < n || other.len < n {
            return self == other;
        }
        self.as_bytes()[..n] == other.as_bytes()[..n]
    }
}

// ═══════════════════════════════════════════════════════════════════════
// Trait implementations
// ═══════════════════════════════════════════════════════════════════════

impl Default for ByteString<'_> {
    fn default() -> Self {
        Self {
            len: 0,
            capacity: 0,
            buf: Buffer::Borrowed(TERMINATOR),
        }
    }
}

impl From<Vec<u8>> for ByteString<'static> {
    /// Take over `bytes` as an owned buffer of tight capacity.
    fn from(mut bytes: Vec<u8>) -> Self {
        let len = bytes.len();
        bytes.push(0);
        Self {
            len,
            capacity: len,
            buf: Buffer::Owned(bytes),
        }
    }
}

impl From<String> for ByteString<'static> {
    fn from(s: String) -> Self {
        Self::from(s.into_bytes())
    }
}

impl AsRef<[u8]> for ByteString<'_> {
    fn as_ref(&self) -> &[u8] {
        self.as_bytes()
    }
}

impl<'b> PartialEq<ByteString<'b>> for ByteString<'_> {
    fn eq(&self, other: &ByteString<'b>) -> bool {
        self.as_bytes() == other.as_bytes()
    }
}

impl Eq for ByteString<'_> {}

impl PartialEq<[u8]> for ByteString<'_> {
    fn eq(&self, other: &[u8]) -> bool {
        self.as_bytes() == other
    }
}

impl PartialEq<&[u8]> for ByteString<'_> {
    fn eq(&self, other: &&[u8]) -> bool {
        self.as_bytes() == *other
    }
}

impl PartialEq<str> for ByteString<'_> {
    fn eq(&self, other: &str) -> bool {
        self.as_bytes() == other.as_bytes()
    }
}

impl PartialEq<&str> for ByteString<'_> {
    fn eq(&self, other: &&str) -> bool {
        self.as_bytes() == other.as_bytes()
    }
}

impl Hash for ByteString<'_> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.as_bytes().hash(state);
    }
}
