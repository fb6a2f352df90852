//! The shared buffer record.

use crate::alloc::ByteAlloc;
use std::mem;
use std::rc::Rc;

/// Heap-resident record owning one terminated byte buffer.
///
/// A record is always reached through `Rc<StrBuf>`; the `Rc` strong count
/// is the record's reference count. Invariants, maintained by every
/// operation here:
///
/// - `cap >= len`
/// - `buf` holds at least `cap + 1` bytes
/// - `buf[len] == 0` after any mutating operation completes
///
/// Duplication (`Clone`) produces an independent record with a fresh
/// buffer. Spare capacity is deliberately not preserved across duplication:
/// the duplicate gets `cap == len`, and callers that keep appending pay one
/// growth step. Reallocation-count bounds in the test suite are written
/// against this policy.
pub(crate) struct StrBuf {
    alloc: Rc<dyn ByteAlloc>,
    buf: Box<[u8]>,
    len: usize,
    cap: usize,
}

impl StrBuf {
    /// Build a record holding a private copy of `text`.
    ///
    /// `text` must be non-empty: zero-length contents are represented by
    /// the absence of a record at the handle level, never by a zero-length
    /// record. Allocates exactly `text.len() + 1` bytes, so `cap == len`.
    pub(crate) fn from_bytes(text: &[u8], alloc: Rc<dyn ByteAlloc>) -> Self {
        assert!(!text.is_empty(), "record requires non-empty contents");
        let len = text.len();
        let mut buf = alloc.allocate(len);
        buf[..len].copy_from_slice(text);
        buf[len] = 0;
        StrBuf {
            alloc,
            buf,
            len,
            cap: len,
        }
    }

    /// Build an empty record with room for `cap` bytes.
    ///
    /// Used only to materialize a record when appending to an empty
    /// handle; ordinary construction goes through [`StrBuf::from_bytes`].
    pub(crate) fn with_capacity(cap: usize, alloc: Rc<dyn ByteAlloc>) -> Self {
        let mut buf = alloc.allocate(cap);
        buf[0] = 0;
        StrBuf {
            alloc,
            buf,
            len: 0,
            cap,
        }
    }

    /// Logical length, excluding the terminator.
    pub(crate) fn len(&self) -> usize {
        self.len
    }

    /// Bytes the buffer can hold before reallocating, excluding the
    /// terminator slot.
    pub(crate) fn cap(&self) -> usize {
        self.cap
    }

    /// The logical contents, without the terminator.
    pub(crate) fn as_bytes(&self) -> &[u8] {
        &self.buf[..self.len]
    }

    /// The logical contents plus the trailing terminator byte.
    pub(crate) fn terminated(&self) -> &[u8] {
        &self.buf[..=self.len]
    }

    /// The byte at `pos`. Callers bound-check first.
    pub(crate) fn byte_at(&self, pos: usize) -> u8 {
        self.buf[pos]
    }

    /// Grow the buffer so it can hold `wanted` bytes plus terminator.
    ///
    /// A no-op when `wanted <= cap`; never shrinks. Existing contents are
    /// preserved across the resize.
    pub(crate) fn ensure_capacity(&mut self, wanted: usize) {
        if wanted > self.cap {
            let old = mem::take(&mut self.buf);
            self.buf = self.alloc.resize(old, wanted);
            self.cap = wanted;
        }
    }

    /// Write `byte` at the end and advance the length.
    ///
    /// Requires spare capacity; the caller runs the growth policy first.
    pub(crate) fn append(&mut self, byte: u8) {
        assert!(self.cap > self.len, "append requires spare capacity");
        self.buf[self.len] = byte;
        self.buf[self.len + 1] = 0;
        self.len += 1;
    }
}

impl Clone for StrBuf {
    /// Duplicate-on-write: an independent record, same logical bytes,
    /// fresh buffer, `cap == len`.
    fn clone(&self) -> Self {
        let mut buf = self.alloc.allocate(self.len);
        buf[..self.len].copy_from_slice(&self.buf[..self.len]);
        buf[self.len] = 0;
        StrBuf {
            alloc: Rc::clone(&self.alloc),
            buf,
            len: self.len,
            cap: self.len,
        }
    }
}

impl Drop for StrBuf {
    fn drop(&mut self) {
        let buf = mem::take(&mut self.buf);
        self.alloc.release(buf);
    }
}

impl std::fmt::Debug for StrBuf {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StrBuf")
            .field("len", &self.len)
            .field("cap", &self.cap)
            .field("bytes", &self.as_bytes())
            .finish()
    }
}
