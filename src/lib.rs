//! bytebuf
//!
//! A growable, copy-on-write binary buffer for Rust.
//!
//! [`ByteBuffer`] is a value-semantics container over a contiguous byte
//! region supporting random-offset reads and writes of raw bytes, fixed-width
//! integers, IEEE-754 floating-point values, and text, with explicit byte
//! order control. It is a primitive for binary protocol and codec work:
//! assemble and parse wire-format or file-format data without copying on
//! every hand-off.
//!
//! The crate intentionally:
//! - does NOT define a wire protocol
//! - does NOT interpret buffer contents
//! - does NOT manage concurrency beyond safe value-copy semantics
//!
//! It only does one thing: **own bytes, share them cheaply, copy on write**
//!
//! # Building and parsing
//!
//! ```
//! use bytebuf::{ByteBuffer, Endianness};
//!
//! let mut frame = ByteBuffer::new();
//! frame.write_int(0x0001_0203u32, 0, Endianness::Big);
//! frame.write_str("header", 4);
//!
//! assert_eq!(frame.as_slice()[..4], [0, 1, 2, 3]);
//! assert_eq!(frame.read_int::<u32>(0, Endianness::Little), 0x0302_0100);
//! assert_eq!(frame.read_string(4, 6), "header");
//! ```
//!
//! # Sharing without copying
//!
//! Cloning shares storage in O(1); the first mutation through either value
//! copies the visible bytes, so neither value ever observes the other's
//! writes:
//!
//! ```
//! use bytebuf::ByteBuffer;
//!
//! let original = ByteBuffer::from_slice(&[0, 1, 2, 3]);
//! let mut copy = original.clone();
//! let window = original.slice(1..3);
//!
//! copy.write_slice(&[0xFF], 0);
//!
//! assert_eq!(original.as_slice(), &[0, 1, 2, 3]);
//! assert_eq!(window.as_slice(), &[1, 2]);
//! assert_eq!(copy.as_slice(), &[0xFF, 1, 2, 3]);
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod buffer;
mod codec;
mod error;

mod storage; // internal (allocation ownership + growth policy)

//
// Public surface (intentionally tiny)
//

pub use buffer::ByteBuffer;
pub use codec::{Endianness, FixedFloat, FixedInt};
pub use error::BufError;
