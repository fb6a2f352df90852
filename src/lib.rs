//! Cowstr: a copy-on-write, reference-counted mutable byte string.
//!
//! # Overview
//!
//! [`CowStr`] is a small string type that shares one underlying heap buffer
//! across copies until a mutation forces the mutator to obtain a private
//! copy. Cloning is O(1) - it binds a second handle to the same shared
//! buffer record and bumps its reference count. The first mutation through
//! a shared handle duplicates the record into a fresh private buffer before
//! writing, so no other handle ever observes the change.
//!
//! # Core Guarantees
//!
//! - **Share on copy**: `clone()` never copies bytes, only a pointer.
//! - **Privatize on mutation**: `push_back` duplicates the buffer first
//!   when (and only when) another handle still shares it.
//! - **Single release**: the buffer behind a record is returned to its
//!   allocator exactly once, when the last handle goes away.
//! - **Terminated view**: the buffer always carries one extra byte holding
//!   a `0` terminator past the logical contents.
//!
//! # Module Structure
//!
//! - [`alloc`]: The byte-buffer allocator boundary (allocate/resize/release)
//! - [`string`]: The shared buffer record and the [`CowStr`] handle
//! - [`error`]: Error types
//! - [`test_utils`]: Logging helpers shared by the test suites
//!
//! # Example
//!
//! ```
//! use cowstr::CowStr;
//!
//! let a = CowStr::from_text("ab");
//! let mut b = a.clone(); // shares the buffer, no byte copy
//! b.push_back(b'c');     // privatizes before writing
//!
//! assert_eq!(a.as_bytes(), b"ab");
//! assert_eq!(b.as_bytes(), b"abc");
//! ```
//!
//! # Design Notes
//!
//! This implementation uses safe Rust throughout: the reference count is
//! carried by `Rc` rather than a hand-rolled counter, so a decrement past
//! zero or a skipped release is unrepresentable. `Rc` also makes the type
//! deliberately single-threaded; sending a `CowStr` across threads is
//! rejected by the compiler rather than left as undefined behavior.

#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_panics_doc)]

pub mod alloc;
pub mod error;
pub mod string;
pub mod test_utils;

pub use alloc::{ByteAlloc, CountingAlloc, SystemAlloc};
pub use error::CowStrError;
pub use string::CowStr;
