//! The [`ByteBuffer`] value type.
//!
//! Wraps a shared-ownership handle to internal storage plus the logical
//! content window, implementing copy-on-write and the typed, endianness-aware
//! read/write surface.

mod byte_buffer;

#[cfg(feature = "serde")]
mod serde;

pub use byte_buffer::ByteBuffer;
