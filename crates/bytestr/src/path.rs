//! Path helpers

use crate::error::Result;
use crate::growth::Growth;
use crate::ByteString;

impl ByteString<'_> {
    /// The directory part of a `/`-separated path.
    ///
    /// Returns everything before the last `/`. A path without any `/` is
    /// returned whole, and a path whose only separator is the leading one
    /// yields the root `"/"`.
    ///
    /// ```
    /// use bytestr::{bytestr, Growth};
    ///
    /// assert_eq!(bytestr!("/a/b").dir(Growth::Tight)?, "/a");
    /// assert_eq!(bytestr!("/sys").dir(Growth::Tight)?, "/");
    /// assert_eq!(bytestr!("noslash").dir(Growth::Tight)?, "noslash");
    /// # Ok::<(), bytestr::AllocError>(())
    /// ```
    ///
    /// # Errors
    ///
    /// Returns [`AllocError`](crate::AllocError) if the result cannot be
    /// allocated.
    pub fn dir(&self, growth: Growth) -> Result<ByteString<'static>> {
        let bytes = self.as_bytes();
        let dir = match bytes.iter().rposition(|&b| b == b'/') {
            None => bytes,
            Some(0) => b"/".as_slice(),
            Some(last) => &bytes[..last],
        };
        ByteString::from_bytes(dir, growth)
    }
}
