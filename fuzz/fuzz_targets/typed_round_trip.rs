#![no_main]

use libfuzzer_sys::fuzz_target;
use bytebuf::{ByteBuffer, Endianness};

// Every typed value written at an arbitrary offset must read back bit-exact
// under the same byte order, and the two byte orders must be mirror images.

fuzz_target!(|input: &[u8]| {
    if input.len() < 17 {
        return;
    }

    let offset = input[0] as usize;
    let mut word = [0u8; 8];
    word.copy_from_slice(&input[1..9]);
    let int_value = u64::from_le_bytes(word);
    word.copy_from_slice(&input[9..17]);
    let float_value = f64::from_bits(u64::from_le_bytes(word));

    for endianness in [Endianness::Big, Endianness::Little] {
        let mut buffer = ByteBuffer::new();
        buffer.write_int(int_value, offset, endianness);
        assert_eq!(buffer.read_int::<u64>(offset, endianness), int_value);
        assert_eq!(buffer.len(), offset + 8);

        buffer.write_float(float_value, offset, endianness);
        let decoded = buffer.read_float::<f64>(offset, endianness);
        assert_eq!(
            decoded.to_bits(),
            float_value.to_bits(),
            "float decode must be bit-exact, NaN payloads included"
        );
    }

    let big = ByteBuffer::from_int(int_value, Endianness::Big);
    let little = ByteBuffer::from_int(int_value, Endianness::Little);
    let mut reversed = big.read_bytes(0, 8);
    reversed.reverse();
    assert_eq!(reversed, little.read_bytes(0, 8));
});
