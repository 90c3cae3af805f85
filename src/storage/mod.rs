//! Internal storage management for the buffer.
//!
//! One [`Storage`] owns one heap allocation. `ByteBuffer` values share a
//! storage by reference count and diverge on write; the sharing protocol
//! itself lives in the buffer layer. This module is an implementation detail
//! and not part of the public API.

mod growth;
mod raw;

pub(crate) use raw::{Growth, Storage};
