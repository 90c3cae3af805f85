//! The heap allocation behind one or more `ByteBuffer` values.

use std::collections::TryReserveError;

use super::growth::grown_capacity;

/// How an operation that needs more capacity sizes its reallocation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Growth {
    /// Over-allocate via the amortized growth policy.
    Amortized,
    /// Allocate exactly the requested minimum.
    Exact,
}

/// Sole owner of one contiguous, fully initialized heap allocation.
///
/// `Storage` tracks capacity only; the logical content window lives in the
/// buffer layer. Every byte in `0..capacity` is addressable, and zeroed until
/// something is copied over it. Dropping the storage releases the allocation
/// exactly once.
#[derive(Debug)]
pub(crate) struct Storage {
    bytes: Vec<u8>,
}

impl Storage {
    /// Allocates exactly `capacity` zero-filled bytes.
    ///
    /// Allocation failure is fatal.
    pub(crate) fn with_capacity(capacity: usize) -> Self {
        let mut storage = Storage { bytes: Vec::new() };
        storage.grow_to(capacity, Growth::Exact);
        storage
    }

    /// Adopts an existing allocation; capacity is the vector's length.
    pub(crate) fn from_vec(bytes: Vec<u8>) -> Self {
        Storage { bytes }
    }

    /// Allocated size in bytes.
    pub(crate) fn capacity(&self) -> usize {
        self.bytes.len()
    }

    /// The full allocated region, read-only.
    pub(crate) fn as_slice(&self) -> &[u8] {
        &self.bytes
    }

    /// The full allocated region, mutable.
    pub(crate) fn as_mut_slice(&mut self) -> &mut [u8] {
        &mut self.bytes
    }

    /// Ensures `capacity >= minimum`, reallocating if necessary. Existing
    /// bytes are preserved and new bytes are zeroed. Never shrinks.
    ///
    /// Reallocation is attempted at the amortized target first; if the
    /// allocator refuses and the exact minimum is smaller, it is retried at
    /// the minimum before the failure becomes fatal.
    pub(crate) fn grow_to(&mut self, minimum: usize, growth: Growth) {
        if minimum <= self.bytes.len() {
            return;
        }

        let target = match growth {
            Growth::Amortized => grown_capacity(minimum),
            Growth::Exact => minimum,
        };

        if self.reallocate(target).is_err()
            && (minimum >= target || self.reallocate(minimum).is_err())
        {
            panic!("insufficient memory to allocate {target} bytes of buffer storage");
        }
    }

    fn reallocate(&mut self, capacity: usize) -> Result<(), TryReserveError> {
        self.bytes.try_reserve_exact(capacity - self.bytes.len())?;
        self.bytes.resize(capacity, 0);
        Ok(())
    }

    /// Copies a byte sequence into the allocation starting at `offset`,
    /// growing first based on the sequence's length estimate. Sequences whose
    /// size hint undercounts the true length are handled by growing again
    /// mid-copy, so no byte is lost or truncated.
    ///
    /// Returns the number of bytes written.
    pub(crate) fn copy_bytes<I>(&mut self, source: I, offset: usize, growth: Growth) -> usize
    where
        I: IntoIterator<Item = u8>,
    {
        let source = source.into_iter();
        let (estimate, _) = source.size_hint();
        let minimum = offset
            .checked_add(estimate)
            .expect("byte range overflows usize");
        self.grow_to(minimum, growth);

        let mut written = 0;
        for byte in source {
            let at = offset + written;
            if at >= self.bytes.len() {
                // the estimate undercounted
                self.grow_to(at + 1, growth);
            }
            self.bytes[at] = byte;
            written += 1;
        }

        written
    }

    /// Copies a fully known-length region into the allocation at `offset`,
    /// growing first. Returns the region's length.
    pub(crate) fn copy_from_slice(&mut self, source: &[u8], offset: usize, growth: Growth) -> usize {
        let minimum = offset
            .checked_add(source.len())
            .expect("byte range overflows usize");
        self.grow_to(minimum, growth);

        self.bytes[offset..offset + source.len()].copy_from_slice(source);

        source.len()
    }
}
