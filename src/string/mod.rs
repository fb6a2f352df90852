//! The copy-on-write string: shared buffer record and handle.
//!
//! # Overview
//!
//! This module provides:
//! - [`CowStr`]: the user-facing handle; either empty or bound to exactly
//!   one shared buffer record
//! - `StrBuf` (private): the heap-resident record owning the byte buffer,
//!   its logical length, and its capacity
//!
//! # Ownership
//!
//! Exactly one entity - the record - owns the byte buffer. Handles hold a
//! reference-counted pointer to the record, never to the buffer. The record
//! lives until the last handle bound to it is dropped or rebound, at which
//! point its buffer goes back through [`ByteAlloc::release`] exactly once.
//!
//! [`ByteAlloc::release`]: crate::alloc::ByteAlloc::release

mod handle;
mod record;

pub use handle::CowStr;

pub(crate) use record::StrBuf;
