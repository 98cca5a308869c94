//! # uconf
//!
//! An in-memory model for hierarchical configuration documents.
//!
//! A configuration is a tree of typed, reference-counted entries living in a
//! [`Tree`] arena. Entries can be null, lists of child entries, quoted
//! strings, integers, floats, soft references (resolved by anchor name on
//! read) or hard references (a counted link to another entry). Every
//! string in the tree is a [`ByteString`].
//!
//! ## Ownership
//!
//! - [`Tree::create`] returns a detached entry holding one reference, owned
//!   by the caller.
//! - [`Tree::link`] makes a list co-owner of a child; [`Tree::unlink`] drops
//!   that share again.
//! - [`Tree::release`] drops a reference; the last one frees the entry and
//!   everything it exclusively owns.
//!
//! ## Example
//!
//! ```
//! use uconf::{bytestr, EntryType, Tree};
//!
//! let mut tree = Tree::new();
//! let root = tree.create_typed(EntryType::List)?;
//!
//! let db = tree.create_typed(EntryType::List)?;
//! tree.set_anchor(db, Some(bytestr!("db")));
//! tree.link_last(root, db);
//! tree.release(db);
//!
//! let alias = tree.create();
//! tree.set_soft_reference(alias, bytestr!("db"));
//! tree.link_last(root, alias);
//! tree.release(alias);
//!
//! assert_eq!(tree.follow(alias), Some(db));
//!
//! tree.release(root);
//! assert!(tree.is_empty());
//! # Ok::<(), uconf::TreeError>(())
//! ```
//!
//! The tree is single-threaded. Share it between threads only behind one
//! lock for the whole tree, since resolution and swapping cross entries.

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod config;
pub mod display;
pub mod entry;
pub mod error;
pub mod tree;

pub use bytestr::{bytestr, AllocError, ByteString, Growth};
pub use config::{TreeConfig, DEFAULT_MAX_FOLLOW_DEPTH};
pub use display::EntryDisplay;
pub use entry::{ChildList, EntryId, EntryType, Value};
pub use error::{Result, TreeError};
pub use tree::Tree;

/// uconf version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
