//! The byte-buffer allocator boundary.
//!
//! Every buffer behind a [`CowStr`](crate::CowStr) is obtained through the
//! three-operation [`ByteAlloc`] contract defined here. The
//! contract always reserves one byte beyond the requested count for a
//! terminator; the terminator is written by the buffer's owner, never by
//! the allocator.
//!
//! Two implementations are provided:
//!
//! - [`SystemAlloc`]: the default. Allocates through the global allocator
//!   and emits a TRACE-level `tracing` event per call, making allocation
//!   traffic observable without wiring a diagnostic channel into the core.
//! - [`CountingAlloc`]: wraps any allocator and counts calls. Tests use it
//!   to verify the release discipline (every allocate balanced by exactly
//!   one release) and the amortized growth bound.
//!
//! # Allocation Failure
//!
//! Allocation failure is fatal, uniformly across `allocate` and `resize`:
//! implementations return owned buffers, and a failed global allocation
//! aborts the process. No recoverable out-of-memory path exists at this
//! boundary.

use std::cell::Cell;

/// A source of terminated byte buffers.
///
/// `allocate(n)` and `resize(buf, n)` both yield a buffer of exactly
/// `n + 1` bytes: `n` data slots plus one terminator slot. `release`
/// consumes the buffer; move semantics make use-after-release
/// unrepresentable.
pub trait ByteAlloc {
    /// Allocate a buffer holding `n` data bytes plus one terminator byte.
    ///
    /// Contents are unspecified before the first write.
    fn allocate(&self, n: usize) -> Box<[u8]>;

    /// Resize `buf` to hold `n` data bytes plus one terminator byte.
    ///
    /// The first `min(buf.len(), n + 1)` bytes are preserved. The buffer
    /// may relocate.
    fn resize(&self, buf: Box<[u8]>, n: usize) -> Box<[u8]>;

    /// Return `buf` to the system.
    fn release(&self, buf: Box<[u8]>);
}

/// The default allocator: global-allocator buffers with call tracing.
///
/// Each call emits a TRACE-level event carrying the buffer size, so
/// allocation traffic can be inspected by installing any `tracing`
/// subscriber. Nothing in the core depends on a subscriber being present.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemAlloc;

impl ByteAlloc for SystemAlloc {
    fn allocate(&self, n: usize) -> Box<[u8]> {
        tracing::trace!(bytes = n + 1, "allocate");
        vec![0u8; n + 1].into_boxed_slice()
    }

    fn resize(&self, buf: Box<[u8]>, n: usize) -> Box<[u8]> {
        tracing::trace!(old_bytes = buf.len(), bytes = n + 1, "resize");
        let mut vec = buf.into_vec();
        vec.resize(n + 1, 0);
        vec.into_boxed_slice()
    }

    fn release(&self, buf: Box<[u8]>) {
        tracing::trace!(bytes = buf.len(), "release");
        drop(buf);
    }
}

/// An allocator wrapper that counts calls.
///
/// Counters use `Cell` rather than atomics: the crate is single-threaded
/// by construction (records are shared via `Rc`), so the wrapper can never
/// be reached from two threads.
///
/// # Examples
///
/// ```
/// use std::rc::Rc;
/// use cowstr::{CountingAlloc, CowStr};
///
/// let alloc = Rc::new(CountingAlloc::new());
/// {
///     let a = CowStr::from_text_in("ab", alloc.clone());
///     let _b = a.clone(); // shares, no allocation
/// }
/// assert_eq!(alloc.allocate_calls(), 1);
/// assert_eq!(alloc.release_calls(), 1);
/// ```
#[derive(Debug, Default)]
pub struct CountingAlloc<A: ByteAlloc = SystemAlloc> {
    inner: A,
    allocated: Cell<usize>,
    resized: Cell<usize>,
    released: Cell<usize>,
}

impl CountingAlloc<SystemAlloc> {
    /// Create a counting wrapper around [`SystemAlloc`].
    #[must_use]
    pub fn new() -> Self {
        Self::with_inner(SystemAlloc)
    }
}

impl<A: ByteAlloc> CountingAlloc<A> {
    /// Create a counting wrapper around an arbitrary allocator.
    #[must_use]
    pub fn with_inner(inner: A) -> Self {
        CountingAlloc {
            inner,
            allocated: Cell::new(0),
            resized: Cell::new(0),
            released: Cell::new(0),
        }
    }

    /// Number of `allocate` calls observed.
    #[must_use]
    pub fn allocate_calls(&self) -> usize {
        self.allocated.get()
    }

    /// Number of `resize` calls observed.
    #[must_use]
    pub fn resize_calls(&self) -> usize {
        self.resized.get()
    }

    /// Number of `release` calls observed.
    #[must_use]
    pub fn release_calls(&self) -> usize {
        self.released.get()
    }

    /// Buffers currently outstanding (allocated but not yet released).
    #[must_use]
    pub fn outstanding(&self) -> usize {
        self.allocated.get() - self.released.get()
    }
}

impl<A: ByteAlloc> ByteAlloc for CountingAlloc<A> {
    fn allocate(&self, n: usize) -> Box<[u8]> {
        self.allocated.set(self.allocated.get() + 1);
        self.inner.allocate(n)
    }

    fn resize(&self, buf: Box<[u8]>, n: usize) -> Box<[u8]> {
        self.resized.set(self.resized.get() + 1);
        self.inner.resize(buf, n)
    }

    fn release(&self, buf: Box<[u8]>) {
        self.released.set(self.released.get() + 1);
        self.inner.release(buf);
    }
}
