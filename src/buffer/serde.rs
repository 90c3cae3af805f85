//! Serialize/Deserialize conformance for [`ByteBuffer`].
//!
//! A buffer crosses a structured format as its visible bytes and nothing
//! else, so the encoding matches that of a plain `Vec<u8>`.

use serde::de::Deserializer;
use serde::ser::Serializer;
use serde::{Deserialize, Serialize};

use super::ByteBuffer;

impl Serialize for ByteBuffer {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_seq(self.as_slice())
    }
}

impl<'de> Deserialize<'de> for ByteBuffer {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let bytes = Vec::<u8>::deserialize(deserializer)?;
        Ok(ByteBuffer::from(bytes))
    }
}
