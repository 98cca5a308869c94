//! Display and Debug implementations for ByteString

use std::fmt;

use bstr::BStr;

use crate::ByteString;

impl fmt::Debug for ByteString<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ByteString")
            .field("bytes", &BStr::new(self.as_bytes()))
            .field("len", &self.len())
            .field("capacity", &self.capacity())
            .field("owned", &self.owns_buffer())
            .finish()
    }
}

/// Renders the content as text; invalid UTF-8 is replaced.
impl fmt::Display for ByteString<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(BStr::new(self.as_bytes()), f)
    }
}
