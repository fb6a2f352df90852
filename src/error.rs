//! Error types for the cowstr crate.
//!
//! Error handling follows two rules:
//!
//! - Read-access errors are explicit, typed, and recoverable per call; a
//!   failed read has no side effect.
//! - Invariant violations (constructing a record from empty text, missing
//!   spare capacity at append time) are programming errors and assert
//!   rather than return. Decrementing an already-zero reference count is
//!   unrepresentable with `Rc` and needs no runtime check.

use thiserror::Error;

/// Errors returned by read operations on [`CowStr`](crate::CowStr).
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum CowStrError {
    /// Indexed read past the logical length, or any read on an empty
    /// string.
    #[error("index out of range: pos={pos}, len={len}")]
    OutOfRange {
        /// The requested position.
        pos: usize,
        /// The logical length at the time of the read.
        len: usize,
    },
}
