//! The user-facing copy-on-write string handle.

use super::record::StrBuf;
use crate::alloc::{ByteAlloc, SystemAlloc};
use crate::error::CowStrError;
use std::rc::Rc;

/// Capacity floor for the first growth step (and for records materialized
/// by an append to an empty handle).
const MIN_CAPACITY: usize = 16;

/// Growth policy for `push_back`: jump to the floor, then 3/2.
///
/// Strictly increases its input whenever the caller triggers it (growth is
/// only consulted when `cap <= len`, and `cap * 3 / 2 > cap` for
/// `cap >= MIN_CAPACITY`).
const fn grown(cap: usize) -> usize {
    if cap < MIN_CAPACITY {
        MIN_CAPACITY
    } else {
        cap * 3 / 2
    }
}

/// A copy-on-write, reference-counted byte string.
///
/// A `CowStr` is either *empty* (bound to no buffer at all) or bound to
/// exactly one shared buffer record. Cloning a bound handle binds the
/// clone to the same record - O(1), no byte copy. Mutating through a
/// handle whose record is shared duplicates the record first, so other
/// handles never observe the write.
///
/// # Examples
///
/// ```
/// use cowstr::CowStr;
///
/// let a = CowStr::from_text("ab");
/// let mut b = a.clone();
/// assert_eq!(a.ref_count(), 2); // one record, two handles
///
/// b.push_back(b'c'); // privatizes b's buffer
/// assert_eq!(a.as_bytes(), b"ab");
/// assert_eq!(b.as_bytes(), b"abc");
/// assert_eq!(a.ref_count(), 1);
/// ```
#[derive(Default)]
pub struct CowStr {
    /// `None` is the empty string; no record, no allocation.
    data: Option<Rc<StrBuf>>,
}

impl CowStr {
    /// Create an empty string. No allocation occurs.
    ///
    /// # Examples
    ///
    /// ```
    /// use cowstr::CowStr;
    ///
    /// let s = CowStr::new();
    /// assert!(s.is_empty());
    /// assert_eq!(s.c_str(), &[0]);
    /// ```
    #[must_use]
    pub const fn new() -> Self {
        CowStr { data: None }
    }

    /// Create a string holding a private copy of `text`.
    ///
    /// Zero-length text yields the empty string: no record is created, and
    /// the result is indistinguishable from [`CowStr::new`].
    #[must_use]
    pub fn from_text(text: &str) -> Self {
        Self::from_text_in(text, Rc::new(SystemAlloc))
    }

    /// Create a string holding a private copy of `text`, with every buffer
    /// operation routed through `alloc`.
    ///
    /// The allocator stays with the record for its whole life, including
    /// across copy-on-write duplication, so a tracking allocator observes
    /// every buffer this string and its descendants ever touch.
    ///
    /// # Examples
    ///
    /// ```
    /// use std::rc::Rc;
    /// use cowstr::{CountingAlloc, CowStr};
    ///
    /// let alloc = Rc::new(CountingAlloc::new());
    /// let s = CowStr::from_text_in("hi", alloc.clone());
    /// assert_eq!(s.as_bytes(), b"hi");
    /// assert_eq!(alloc.allocate_calls(), 1);
    /// ```
    #[must_use]
    pub fn from_text_in(text: &str, alloc: Rc<dyn ByteAlloc>) -> Self {
        if text.is_empty() {
            return Self::new();
        }
        CowStr {
            data: Some(Rc::new(StrBuf::from_bytes(text.as_bytes(), alloc))),
        }
    }

    /// Logical length in bytes, excluding the terminator.
    #[must_use]
    pub fn len(&self) -> usize {
        self.data.as_ref().map_or(0, |record| record.len())
    }

    /// Returns true for the empty string.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Number of handles currently bound to this string's record.
    ///
    /// Zero for the empty string. Useful for asserting sharing and
    /// privatization behavior in tests.
    #[must_use]
    pub fn ref_count(&self) -> usize {
        self.data.as_ref().map_or(0, Rc::strong_count)
    }

    /// The byte at position `pos`.
    ///
    /// Read-only: never triggers copy-on-write, and a failed read has no
    /// side effect.
    ///
    /// # Errors
    ///
    /// [`CowStrError::OutOfRange`] when `pos >= len()`, including any read
    /// on the empty string.
    ///
    /// # Examples
    ///
    /// ```
    /// use cowstr::{CowStr, CowStrError};
    ///
    /// let s = CowStr::from_text("ab");
    /// assert_eq!(s.at(1), Ok(b'b'));
    /// assert_eq!(s.at(2), Err(CowStrError::OutOfRange { pos: 2, len: 2 }));
    /// ```
    pub fn at(&self, pos: usize) -> Result<u8, CowStrError> {
        match &self.data {
            Some(record) if pos < record.len() => Ok(record.byte_at(pos)),
            _ => Err(CowStrError::OutOfRange {
                pos,
                len: self.len(),
            }),
        }
    }

    /// The logical contents, without the terminator.
    #[must_use]
    pub fn as_bytes(&self) -> &[u8] {
        self.data.as_ref().map_or(&[], |record| record.as_bytes())
    }

    /// A terminated view: the logical contents plus the trailing `0` byte.
    ///
    /// The empty string yields a static one-byte `[0]` buffer, never an
    /// empty slice. The view borrows the string, so it cannot outlive a
    /// mutation or drop.
    ///
    /// # Examples
    ///
    /// ```
    /// use cowstr::CowStr;
    ///
    /// assert_eq!(CowStr::new().c_str(), &[0]);
    /// assert_eq!(CowStr::from_text("hi").c_str(), b"hi\0");
    /// ```
    #[must_use]
    pub fn c_str(&self) -> &[u8] {
        const EMPTY: &[u8] = &[0];
        self.data.as_ref().map_or(EMPTY, |record| record.terminated())
    }

    /// Append one byte, privatizing the buffer first if it is shared.
    ///
    /// The copy-on-write sequence:
    ///
    /// 1. An empty handle materializes a fresh record with the growth-floor
    ///    capacity (appending to empty is valid, not an error).
    /// 2. If the record is shared, duplicate it into a brand-new private
    ///    record and rebind; the original stays alive for the other
    ///    handles. Already-exclusive records are reused as-is.
    /// 3. If there is no room for the byte plus terminator, grow: to 16
    ///    below 16, otherwise by 3/2 (integer division).
    /// 4. Write the byte, re-terminate, bump the length.
    ///
    /// Amortized O(1); O(n) only when privatizing or growing.
    ///
    /// # Examples
    ///
    /// ```
    /// use cowstr::CowStr;
    ///
    /// let mut s = CowStr::new();
    /// for &b in b"hello" {
    ///     s.push_back(b);
    /// }
    /// assert_eq!(s.as_bytes(), b"hello");
    /// ```
    pub fn push_back(&mut self, byte: u8) {
        let record = self.data.get_or_insert_with(|| {
            Rc::new(StrBuf::with_capacity(MIN_CAPACITY, Rc::new(SystemAlloc)))
        });

        // Privatize: clones the record when shared, reuses it when not.
        let record = Rc::make_mut(record);

        if record.cap() <= record.len() {
            record.ensure_capacity(grown(record.cap()));
        }
        record.append(byte);
    }
}

impl Clone for CowStr {
    /// Share the record and increment its count; no byte copy.
    fn clone(&self) -> Self {
        CowStr {
            data: self.data.clone(),
        }
    }
}

impl From<&str> for CowStr {
    fn from(text: &str) -> Self {
        Self::from_text(text)
    }
}

impl PartialEq for CowStr {
    fn eq(&self, other: &Self) -> bool {
        self.as_bytes() == other.as_bytes()
    }
}

impl Eq for CowStr {}

impl PartialEq<[u8]> for CowStr {
    fn eq(&self, other: &[u8]) -> bool {
        self.as_bytes() == other
    }
}

impl PartialEq<&[u8]> for CowStr {
    fn eq(&self, other: &&[u8]) -> bool {
        self.as_bytes() == *other
    }
}

impl std::hash::Hash for CowStr {
    fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
        self.as_bytes().hash(state);
    }
}

impl std::fmt::Debug for CowStr {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CowStr")
            .field("len", &self.len())
            .field("bytes", &self.as_bytes())
            .finish()
    }
}
