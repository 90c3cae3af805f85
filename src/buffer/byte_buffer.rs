//! The ByteBuffer value type - a copy-on-write window over shared storage.

use std::fmt;
use std::hash::{Hash, Hasher};
use std::ops::{Bound, Deref, Range, RangeBounds};
use std::sync::Arc;

use bytes::Bytes;

use crate::codec::{Endianness, FixedFloat, FixedInt};
use crate::error::BufError;
use crate::storage::{Growth, Storage};

/// Widest fixed-width value the typed read/write paths handle.
const MAX_WIDTH: usize = 8;

/// A growable, copy-on-write binary buffer.
///
/// `ByteBuffer` is a value type: cloning is O(1) and shares the underlying
/// storage, and the first mutation through either value copies the visible
/// bytes so the other value never observes the change. On top of raw byte
/// access it offers random-offset reads and writes of fixed-width integers,
/// IEEE-754 floats, and UTF-8 text, each under an explicit byte order.
///
/// Writes past the current end grow the storage with an amortized policy and
/// extend the visible length; any gap between the previous end and the write
/// offset reads as zero.
///
/// # Example
///
/// ```
/// use bytebuf::{ByteBuffer, Endianness};
///
/// let mut frame = ByteBuffer::new();
/// frame.write_int(0xCAFEu16, 0, Endianness::Big);
/// frame.write_str("payload", 2);
///
/// assert_eq!(frame.read_int::<u16>(0, Endianness::Big), 0xCAFE);
/// assert_eq!(frame.read_string(2, 7), "payload");
/// assert_eq!(frame.len(), 9);
/// ```
///
/// # Sharing
///
/// ```
/// use bytebuf::ByteBuffer;
///
/// let original = ByteBuffer::from_slice(&[1, 2, 3, 4]);
/// let mut copy = original.clone(); // O(1), shares storage
///
/// copy.write_slice(&[9], 0); // diverges here
///
/// assert_eq!(original.as_slice(), &[1, 2, 3, 4]);
/// assert_eq!(copy.as_slice(), &[9, 2, 3, 4]);
/// ```
#[derive(Clone)]
pub struct ByteBuffer {
    storage: Arc<Storage>,
    bounds: Range<usize>,
}

impl ByteBuffer {
    /// Creates an empty buffer with no capacity.
    pub fn new() -> Self {
        ByteBuffer {
            storage: Arc::new(Storage::with_capacity(0)),
            bounds: 0..0,
        }
    }

    /// Creates a buffer holding a copy of `bytes`, with capacity sized
    /// exactly to the contents.
    ///
    /// # Example
    ///
    /// ```
    /// use bytebuf::ByteBuffer;
    ///
    /// let buffer = ByteBuffer::from_slice(&[0, 1, 2, 3]);
    /// assert_eq!(buffer.len(), 4);
    /// assert_eq!(buffer.capacity(), 4);
    /// ```
    pub fn from_slice(bytes: &[u8]) -> Self {
        let mut storage = Storage::with_capacity(bytes.len());
        let count = storage.copy_from_slice(bytes, 0, Growth::Exact);
        ByteBuffer {
            storage: Arc::new(storage),
            bounds: 0..count,
        }
    }

    /// Creates a buffer holding the encoding of one integer.
    pub fn from_int<T: FixedInt>(value: T, endianness: Endianness) -> Self {
        Self::with_capacity_init(T::WIDTH, |dst| {
            value.put(dst, endianness);
            T::WIDTH
        })
    }

    /// Creates a buffer holding the encoding of one floating-point value.
    pub fn from_float<F: FixedFloat>(value: F, endianness: Endianness) -> Self {
        Self::with_capacity_init(F::WIDTH, |dst| {
            value.put(dst, endianness);
            F::WIDTH
        })
    }

    /// Creates a buffer by handing a zero-filled allocation of exactly
    /// `capacity` bytes to `init`, which returns how many leading bytes it
    /// meaningfully initialized. That count becomes the buffer's length.
    ///
    /// # Panics
    ///
    /// Panics if `init` reports more bytes than `capacity`.
    ///
    /// # Example
    ///
    /// ```
    /// use bytebuf::ByteBuffer;
    ///
    /// let buffer = ByteBuffer::with_capacity_init(8, |dst| {
    ///     dst[..4].copy_from_slice(&[0, 1, 2, 3]);
    ///     4
    /// });
    /// assert_eq!(buffer.len(), 4);
    /// assert_eq!(buffer.capacity(), 8);
    /// ```
    pub fn with_capacity_init<F>(capacity: usize, init: F) -> Self
    where
        F: FnOnce(&mut [u8]) -> usize,
    {
        let mut storage = Storage::with_capacity(capacity);
        let count = init(storage.as_mut_slice());
        assert!(
            count <= capacity,
            "initialized count {count} exceeds buffer capacity {capacity}"
        );

        ByteBuffer {
            storage: Arc::new(storage),
            bounds: 0..count,
        }
    }

    /// Number of visible bytes.
    pub fn len(&self) -> usize {
        self.bounds.len()
    }

    /// Returns true if the buffer holds no visible bytes.
    pub fn is_empty(&self) -> bool {
        self.bounds.is_empty()
    }

    /// Capacity of the whole underlying allocation - how much the buffer can
    /// hold before the next write reallocates.
    pub fn capacity(&self) -> usize {
        self.storage.capacity()
    }

    /// The visible bytes, read-only. Access cannot outlive the borrow.
    pub fn as_slice(&self) -> &[u8] {
        &self.storage.as_slice()[self.bounds.clone()]
    }

    /// The visible bytes, mutable for in-place edits. Diverges from shared
    /// storage first, so no other buffer observes the edits.
    pub fn as_mut_slice(&mut self) -> &mut [u8] {
        self.detach();
        let bounds = self.bounds.clone();
        &mut self.unique_storage().as_mut_slice()[bounds]
    }

    /// Materializes the visible bytes as an owned [`bytes::Bytes`].
    pub fn to_bytes(&self) -> Bytes {
        Bytes::copy_from_slice(self.as_slice())
    }

    /// Copies `count` visible bytes starting at `offset` into a new vector.
    ///
    /// # Panics
    ///
    /// Panics if the range does not lie within the buffer contents.
    pub fn read_bytes(&self, offset: usize, count: usize) -> Vec<u8> {
        self.check_range(offset, count);
        self.as_slice()[offset..offset + count].to_vec()
    }

    /// Checked variant of [`read_bytes`](Self::read_bytes).
    pub fn try_read_bytes(&self, offset: usize, count: usize) -> Result<Vec<u8>, BufError> {
        self.checked_range(offset, count)?;
        Ok(self.as_slice()[offset..offset + count].to_vec())
    }

    /// Zero-copy sub-view of the visible bytes. The slice shares storage
    /// with `self` and diverges on its first mutation like any other shared
    /// buffer.
    ///
    /// # Panics
    ///
    /// Panics if the range does not lie within the buffer contents.
    ///
    /// # Example
    ///
    /// ```
    /// use bytebuf::ByteBuffer;
    ///
    /// let buffer = ByteBuffer::from_slice(&[0, 1, 2, 3, 3, 2, 1, 0]);
    /// assert_eq!(buffer.slice(4..8), ByteBuffer::from_slice(&[3, 2, 1, 0]));
    /// ```
    pub fn slice(&self, range: impl RangeBounds<usize>) -> ByteBuffer {
        let start = match range.start_bound() {
            Bound::Included(&n) => n,
            Bound::Excluded(&n) => n.checked_add(1).expect("range start overflows usize"),
            Bound::Unbounded => 0,
        };
        let end = match range.end_bound() {
            Bound::Included(&n) => n.checked_add(1).expect("range end overflows usize"),
            Bound::Excluded(&n) => n,
            Bound::Unbounded => self.len(),
        };
        assert!(
            start <= end && end <= self.len(),
            "slice bounds out of range: start={start}, end={end}, len={}",
            self.len()
        );

        ByteBuffer {
            storage: Arc::clone(&self.storage),
            bounds: self.bounds.start + start..self.bounds.start + end,
        }
    }

    /// Writes a byte sequence at `offset`, growing storage and extending the
    /// visible length as needed. Sequences whose size hint undercounts the
    /// true length are still written in full. Bytes between the previous end
    /// and `offset` are zero-filled.
    ///
    /// Returns the number of bytes written.
    pub fn write_bytes<I>(&mut self, source: I, offset: usize) -> usize
    where
        I: IntoIterator<Item = u8>,
    {
        self.write_with(source, offset, Growth::Amortized)
    }

    /// Writes a fully known-length region at `offset`. Same bounds behavior
    /// as [`write_bytes`](Self::write_bytes); returns `source.len()`.
    ///
    /// # Example
    ///
    /// ```
    /// use bytebuf::ByteBuffer;
    ///
    /// let mut buffer = ByteBuffer::new();
    /// assert_eq!(buffer.write_slice(&[0, 1, 2, 3], 0), 4);
    /// assert_eq!(buffer.len(), 4);
    /// assert!(buffer.capacity() >= 4);
    /// ```
    pub fn write_slice(&mut self, source: &[u8], offset: usize) -> usize {
        self.detach();
        let previous_len = self.len();
        let at = self
            .bounds
            .start
            .checked_add(offset)
            .expect("byte offset overflows usize");
        let written = self
            .unique_storage()
            .copy_from_slice(source, at, Growth::Amortized);
        self.finish_write(offset, written, previous_len);
        written
    }

    /// Writes the encoding of an integer at `offset`, growing and extending
    /// like [`write_slice`](Self::write_slice). Returns the encoded width.
    ///
    /// # Example
    ///
    /// ```
    /// use bytebuf::{ByteBuffer, Endianness};
    ///
    /// let mut buffer = ByteBuffer::new();
    /// buffer.write_int(0x0001_0203u32, 0, Endianness::Big);
    /// assert_eq!(buffer.as_slice(), &[0, 1, 2, 3]);
    /// ```
    pub fn write_int<T: FixedInt>(&mut self, value: T, offset: usize, endianness: Endianness) -> usize {
        let mut raw = [0u8; MAX_WIDTH];
        value.put(&mut raw[..T::WIDTH], endianness);
        self.write_slice(&raw[..T::WIDTH], offset)
    }

    /// Writes the encoding of a floating-point value at `offset`. Returns
    /// the encoded width.
    pub fn write_float<F: FixedFloat>(&mut self, value: F, offset: usize, endianness: Endianness) -> usize {
        let mut raw = [0u8; MAX_WIDTH];
        value.put(&mut raw[..F::WIDTH], endianness);
        self.write_slice(&raw[..F::WIDTH], offset)
    }

    /// Writes the UTF-8 encoding of `string` at `offset`. Returns the number
    /// of bytes written.
    pub fn write_str(&mut self, string: &str, offset: usize) -> usize {
        self.write_slice(string.as_bytes(), offset)
    }

    /// Reads an integer stored at `offset` under the requested byte order.
    ///
    /// # Panics
    ///
    /// Panics if `offset + T::WIDTH` exceeds the buffer contents.
    ///
    /// # Example
    ///
    /// ```
    /// use bytebuf::{ByteBuffer, Endianness};
    ///
    /// let buffer = ByteBuffer::from_slice(&[0, 1, 2, 3]);
    /// assert_eq!(buffer.read_int::<u32>(0, Endianness::Big), 0x0001_0203);
    /// assert_eq!(buffer.read_int::<u32>(0, Endianness::Little), 0x0302_0100);
    /// ```
    pub fn read_int<T: FixedInt>(&self, offset: usize, endianness: Endianness) -> T {
        self.check_range(offset, T::WIDTH);
        T::get(&self.as_slice()[offset..offset + T::WIDTH], endianness)
    }

    /// Checked variant of [`read_int`](Self::read_int).
    pub fn try_read_int<T: FixedInt>(
        &self,
        offset: usize,
        endianness: Endianness,
    ) -> Result<T, BufError> {
        self.checked_range(offset, T::WIDTH)?;
        Ok(T::get(&self.as_slice()[offset..offset + T::WIDTH], endianness))
    }

    /// Reads a floating-point value stored at `offset` under the requested
    /// byte order.
    ///
    /// # Panics
    ///
    /// Panics if `offset + F::WIDTH` exceeds the buffer contents.
    pub fn read_float<F: FixedFloat>(&self, offset: usize, endianness: Endianness) -> F {
        self.check_range(offset, F::WIDTH);
        F::get(&self.as_slice()[offset..offset + F::WIDTH], endianness)
    }

    /// Checked variant of [`read_float`](Self::read_float).
    pub fn try_read_float<F: FixedFloat>(
        &self,
        offset: usize,
        endianness: Endianness,
    ) -> Result<F, BufError> {
        self.checked_range(offset, F::WIDTH)?;
        Ok(F::get(&self.as_slice()[offset..offset + F::WIDTH], endianness))
    }

    /// Decodes `count` bytes at `offset` as UTF-8 text, replacing invalid
    /// sequences with U+FFFD.
    ///
    /// # Panics
    ///
    /// Panics if the range does not lie within the buffer contents.
    pub fn read_string(&self, offset: usize, count: usize) -> String {
        self.check_range(offset, count);
        String::from_utf8_lossy(&self.as_slice()[offset..offset + count]).into_owned()
    }

    /// Ensures the underlying capacity is at least `minimum` without
    /// changing the visible length, applying the amortized growth policy.
    /// Diverges from shared storage first.
    ///
    /// # Example
    ///
    /// ```
    /// use bytebuf::ByteBuffer;
    ///
    /// let mut buffer = ByteBuffer::new();
    /// buffer.reserve_capacity(8);
    /// assert_eq!(buffer.len(), 0);
    /// assert_eq!(buffer.capacity(), 12);
    /// ```
    pub fn reserve_capacity(&mut self, minimum: usize) {
        self.detach();
        self.unique_storage().grow_to(minimum, Growth::Amortized);
    }

    fn write_with<I>(&mut self, source: I, offset: usize, growth: Growth) -> usize
    where
        I: IntoIterator<Item = u8>,
    {
        self.detach();
        let previous_len = self.len();
        let at = self
            .bounds
            .start
            .checked_add(offset)
            .expect("byte offset overflows usize");
        let written = self.unique_storage().copy_bytes(source, at, growth);
        self.finish_write(offset, written, previous_len);
        written
    }

    /// Zero-fills any gap the write skipped over and extends the visible
    /// window to cover the written range. The copy that preceded this call
    /// already grew the storage past `offset + written`.
    fn finish_write(&mut self, offset: usize, written: usize, previous_len: usize) {
        if offset > previous_len {
            let gap = self.bounds.start + previous_len..self.bounds.start + offset;
            self.unique_storage().as_mut_slice()[gap].fill(0);
        }

        let upper = (self.bounds.start + offset + written).max(self.bounds.end);
        self.bounds = self.bounds.start..upper;
    }

    /// Diverges from shared storage ahead of a mutation.
    ///
    /// After this call the storage handle is uniquely held. If it was shared,
    /// the visible window has been copied into a fresh allocation sized to
    /// the current length, with the bounds rebased to start at zero.
    fn detach(&mut self) {
        if Arc::get_mut(&mut self.storage).is_some() {
            return;
        }

        let mut storage = Storage::with_capacity(self.len());
        let count = storage.copy_from_slice(self.as_slice(), 0, Growth::Exact);
        self.storage = Arc::new(storage);
        self.bounds = 0..count;
    }

    fn unique_storage(&mut self) -> &mut Storage {
        Arc::get_mut(&mut self.storage).expect("storage is uniquely referenced after detach")
    }

    fn check_range(&self, offset: usize, count: usize) {
        let end = offset.checked_add(count).expect("byte range overflows usize");
        assert!(
            end <= self.len(),
            "byte range out of bounds: offset={offset}, count={count}, len={}",
            self.len()
        );
    }

    fn checked_range(&self, offset: usize, count: usize) -> Result<(), BufError> {
        match offset.checked_add(count) {
            Some(end) if end <= self.len() => Ok(()),
            _ => Err(BufError::OutOfBounds {
                offset,
                count,
                len: self.len(),
            }),
        }
    }
}

impl Default for ByteBuffer {
    fn default() -> Self {
        Self::new()
    }
}

impl Deref for ByteBuffer {
    type Target = [u8];

    fn deref(&self) -> &[u8] {
        self.as_slice()
    }
}

impl AsRef<[u8]> for ByteBuffer {
    fn as_ref(&self) -> &[u8] {
        self.as_slice()
    }
}

impl From<&[u8]> for ByteBuffer {
    fn from(bytes: &[u8]) -> Self {
        Self::from_slice(bytes)
    }
}

impl From<Vec<u8>> for ByteBuffer {
    fn from(bytes: Vec<u8>) -> Self {
        // adopt the allocation; capacity becomes the vector's length
        let bounds = 0..bytes.len();
        ByteBuffer {
            storage: Arc::new(Storage::from_vec(bytes)),
            bounds,
        }
    }
}

impl From<&str> for ByteBuffer {
    fn from(string: &str) -> Self {
        Self::from_slice(string.as_bytes())
    }
}

impl From<Bytes> for ByteBuffer {
    fn from(bytes: Bytes) -> Self {
        Self::from_slice(&bytes)
    }
}

impl From<ByteBuffer> for Bytes {
    fn from(buffer: ByteBuffer) -> Self {
        buffer.to_bytes()
    }
}

impl FromIterator<u8> for ByteBuffer {
    fn from_iter<I: IntoIterator<Item = u8>>(iter: I) -> Self {
        let mut buffer = ByteBuffer::new();
        buffer.write_with(iter, 0, Growth::Exact);
        buffer
    }
}

impl Extend<u8> for ByteBuffer {
    fn extend<I: IntoIterator<Item = u8>>(&mut self, iter: I) {
        let end = self.len();
        self.write_bytes(iter, end);
    }
}

impl PartialEq for ByteBuffer {
    fn eq(&self, other: &ByteBuffer) -> bool {
        // identical storage and window short-circuit
        if Arc::ptr_eq(&self.storage, &other.storage) && self.bounds == other.bounds {
            return true;
        }
        self.as_slice() == other.as_slice()
    }
}

impl Eq for ByteBuffer {}

impl PartialEq<[u8]> for ByteBuffer {
    fn eq(&self, other: &[u8]) -> bool {
        self.as_slice() == other
    }
}

impl PartialEq<ByteBuffer> for [u8] {
    fn eq(&self, other: &ByteBuffer) -> bool {
        self == other.as_slice()
    }
}

impl PartialEq<Vec<u8>> for ByteBuffer {
    fn eq(&self, other: &Vec<u8>) -> bool {
        self.as_slice() == other.as_slice()
    }
}

impl Hash for ByteBuffer {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.as_slice().hash(state);
    }
}

impl fmt::Debug for ByteBuffer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ByteBuffer")
            .field("len", &self.len())
            .field("capacity", &self.capacity())
            .field("data", &self.as_slice())
            .finish()
    }
}
