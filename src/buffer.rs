//! Growable byte buffers for sequence data.

use crate::error::{Error, Result};
use crate::util::round_up_pow2;

/// An owned, growable byte buffer with a logical length and a physical
/// capacity.
///
/// The backing storage is allocated zero-filled and a NUL terminator is
/// kept at `data[len]` whenever content is set, so the allocated region
/// always holds `len` content bytes followed by a zero byte. Capacity only
/// ever grows (to powers of two via [`round_up_pow2`](crate::round_up_pow2)),
/// never shrinks, which makes these buffers cheap to reuse across many
/// fills of varying length.
///
/// A buffer created with [`new`](SeqBuffer::new) is *unallocated*
/// (capacity 0). Most operations allocate on demand; the ones that must
/// not allocate ([`read_line_bounded`](crate::LineReader::read_line_bounded))
/// return [`Error::UnallocatedBuffer`] instead.
///
/// # Example
///
/// ```
/// use seqline::SeqBuffer;
///
/// let mut buf = SeqBuffer::new();
/// assert!(!buf.is_allocated());
///
/// buf.fill(b"ACGTACGT");
/// assert_eq!(buf.as_bytes(), b"ACGTACGT");
/// assert_eq!(buf.len(), 8);
/// assert!(buf.capacity() >= 9);
/// ```
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SeqBuffer {
    // Backing storage; its length is the buffer's capacity.
    data: Vec<u8>,
    // Logical content length, always < data.len() when allocated.
    len: usize,
}

impl SeqBuffer {
    /// Creates an unallocated buffer. The first fill (or the line reader)
    /// allocates it.
    #[inline]
    pub fn new() -> SeqBuffer {
        SeqBuffer {
            data: Vec::new(),
            len: 0,
        }
    }

    /// Creates a buffer with `capacity` bytes of zero-filled storage and
    /// length 0.
    #[inline]
    pub fn with_capacity(capacity: usize) -> SeqBuffer {
        SeqBuffer {
            data: vec![0; capacity],
            len: 0,
        }
    }

    /// Creates a buffer holding a copy of `bytes`.
    #[inline]
    pub fn from_bytes(bytes: &[u8]) -> SeqBuffer {
        let mut buf = SeqBuffer::new();
        buf.fill(bytes);
        buf
    }

    /// Returns whether the buffer owns any storage (capacity > 0).
    #[inline]
    pub fn is_allocated(&self) -> bool {
        !self.data.is_empty()
    }

    /// Physical capacity in bytes.
    #[inline]
    pub fn capacity(&self) -> usize {
        self.data.len()
    }

    /// Logical content length, excluding the terminator.
    #[inline]
    pub fn len(&self) -> usize {
        self.len
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// The buffer content as a byte slice (terminator excluded).
    #[inline]
    pub fn as_bytes(&self) -> &[u8] {
        &self.data[..self.len]
    }

    /// Replaces the content with a copy of `src`, growing the capacity in
    /// power-of-two steps until it holds `src` plus the terminator.
    pub fn fill(&mut self, src: &[u8]) {
        let needed = src.len() + 1;
        if self.data.len() < needed {
            let mut cap = self.data.len();
            while cap < needed {
                cap = round_up_pow2(cap + 1);
            }
            self.data.resize(cap, 0);
        }
        self.data[..src.len()].copy_from_slice(src);
        self.data[src.len()] = 0;
        self.len = src.len();
    }

    /// Resets the length to 0 and writes an empty terminator without
    /// releasing any capacity. On an unallocated buffer this is a no-op
    /// (there is nothing to terminate).
    #[inline]
    pub fn clear(&mut self) {
        if let Some(first) = self.data.first_mut() {
            *first = 0;
        }
        self.len = 0;
    }

    /// Replaces this buffer with a copy of `src`, copying the full backing
    /// storage (capacity-wide, terminator included) so that the destination
    /// can be used interchangeably with the source afterwards.
    ///
    /// An unallocated destination is initialized to `src`'s capacity; an
    /// allocated but smaller one is grown first. Fails only if `src` itself
    /// is unallocated.
    pub fn copy_from(&mut self, src: &SeqBuffer) -> Result<()> {
        if !src.is_allocated() {
            return Err(Error::UnallocatedBuffer);
        }
        if self.data.len() < src.data.len() {
            self.reserve_to(src.data.len());
        }
        self.data[..src.data.len()].copy_from_slice(&src.data);
        self.len = src.len;
        Ok(())
    }

    // Grows the storage to exactly `new_capacity` (zero-filled), preserving
    // content. Never shrinks.
    #[inline]
    pub(crate) fn reserve_to(&mut self, new_capacity: usize) {
        if new_capacity > self.data.len() {
            self.data.resize(new_capacity, 0);
        }
    }

    // Appends `bytes` after the current content and re-terminates. The
    // caller must have ensured capacity >= len + bytes.len() + 1.
    #[inline]
    pub(crate) fn push_bytes(&mut self, bytes: &[u8]) {
        debug_assert!(self.data.len() >= self.len + bytes.len() + 1);
        self.data[self.len..self.len + bytes.len()].copy_from_slice(bytes);
        self.len += bytes.len();
        self.data[self.len] = 0;
    }
}

// Equality compares logical content only, not capacity.
impl PartialEq for SeqBuffer {
    #[inline]
    fn eq(&self, other: &SeqBuffer) -> bool {
        self.as_bytes() == other.as_bytes()
    }
}

impl Eq for SeqBuffer {}

impl PartialEq<[u8]> for SeqBuffer {
    #[inline]
    fn eq(&self, other: &[u8]) -> bool {
        self.as_bytes() == other
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fill_round_trip_with_terminator() {
        let mut buf = SeqBuffer::new();
        buf.fill(b"ACGT");
        assert_eq!(buf.as_bytes(), b"ACGT");
        assert_eq!(buf.len(), 4);
        assert!(buf.capacity() >= 5);
        assert_eq!(buf.data[4], 0);
    }

    #[test]
    fn fill_grows_to_power_of_two() {
        let mut buf = SeqBuffer::with_capacity(4);
        buf.fill(&[b'A'; 100]);
        assert_eq!(buf.capacity(), 128);
        buf.fill(&[b'C'; 300]);
        assert_eq!(buf.capacity(), 512);
        assert_eq!(buf.as_bytes(), &[b'C'; 300][..]);
    }

    #[test]
    fn refill_with_shorter_content_keeps_capacity() {
        let mut buf = SeqBuffer::new();
        buf.fill(&[b'G'; 200]);
        let cap = buf.capacity();
        buf.fill(b"AC");
        assert_eq!(buf.as_bytes(), b"AC");
        assert_eq!(buf.capacity(), cap);
    }

    #[test]
    fn clear_keeps_capacity() {
        let mut buf = SeqBuffer::from_bytes(b"ACGT");
        let cap = buf.capacity();
        buf.clear();
        assert!(buf.is_empty());
        assert_eq!(buf.capacity(), cap);
        assert_eq!(buf.data[0], 0);

        // no-op on an unallocated buffer
        let mut empty = SeqBuffer::new();
        empty.clear();
        assert!(!empty.is_allocated());
    }

    #[test]
    fn copy_into_unallocated_initializes() {
        let src = SeqBuffer::from_bytes(b"ACGTACGT");
        let mut dest = SeqBuffer::new();
        dest.copy_from(&src).unwrap();
        assert_eq!(dest.as_bytes(), b"ACGTACGT");
        assert_eq!(dest.capacity(), src.capacity());
    }

    #[test]
    fn copy_grows_smaller_destination() {
        let src = SeqBuffer::from_bytes(&[b'T'; 100]);
        let mut dest = SeqBuffer::with_capacity(2);
        dest.copy_from(&src).unwrap();
        assert_eq!(dest.as_bytes(), src.as_bytes());
        assert!(dest.capacity() >= src.capacity());
    }

    #[test]
    fn copy_from_unallocated_source_fails() {
        let src = SeqBuffer::new();
        let mut dest = SeqBuffer::with_capacity(8);
        assert!(matches!(
            dest.copy_from(&src),
            Err(crate::Error::UnallocatedBuffer)
        ));
    }

    #[test]
    fn equality_ignores_capacity() {
        let a = SeqBuffer::from_bytes(b"ACGT");
        let mut b = SeqBuffer::with_capacity(1024);
        b.fill(b"ACGT");
        assert_eq!(a, b);
    }
}
