//! # bytestr
//!
//! Length-prefixed byte strings with an explicit capacity, an explicit
//! ownership flag and a caller-chosen growth policy.
//!
//! A [`ByteString`] may contain zero bytes anywhere in its content. For
//! interop with NUL-terminated text APIs, the byte right after the content
//! is always zero and is never counted in [`ByteString::len`].
//!
//! ## Ownership
//!
//! - **Borrowed** strings are views into memory owned by somebody else
//!   (usually a string literal, see [`bytestr!`]). They are never written to;
//!   the first mutation copies the content into an owned buffer.
//! - **Owned** strings hold their own allocation and release it on
//!   [`ByteString::release`] or on drop.
//!
//! ## Growth
//!
//! Every call that may grow a buffer takes a [`Growth`] policy:
//! [`Growth::Amortized`] over-allocates to twice the required length,
//! [`Growth::Tight`] allocates exactly what is required. Shrinking never
//! reallocates.
//!
//! ```
//! use bytestr::{bytestr, ByteString, Growth};
//!
//! let greeting = bytestr!("Hello");
//! assert!(!greeting.owns_buffer());
//!
//! let mut owned = greeting.duplicate(Growth::Tight)?;
//! owned.concat(&bytestr!(" World!"), Growth::Amortized)?;
//!
//! assert_eq!(owned, "Hello World!");
//! assert_eq!(owned.capacity(), 24);
//! # Ok::<(), bytestr::AllocError>(())
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod error;
mod fmt;
mod growth;
mod path;
mod string;

pub use error::{AllocError, Result};
pub use growth::Growth;
pub use string::ByteString;

/// Builds a borrowed [`ByteString`] view of a string literal.
///
/// The literal is stored with an extra terminating zero byte, so the view
/// needs no allocation and satisfies the terminator invariant.
///
/// ```
/// use bytestr::bytestr;
///
/// let s = bytestr!("sys");
/// assert_eq!(s.len(), 3);
/// assert_eq!(s.as_bytes_with_nul(), b"sys\0");
/// ```
#[macro_export]
macro_rules! bytestr {
    ($lit:literal) => {
        $crate::ByteString::borrowed(concat!($lit, "\0").as_bytes(), $lit.len())
    };
}
