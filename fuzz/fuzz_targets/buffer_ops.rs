#![no_main]

use libfuzzer_sys::fuzz_target;
use bytebuf::ByteBuffer;

// Differential test: drive a ByteBuffer and a plain Vec<u8> model through the
// same operation stream decoded from the fuzz input, and verify they never
// disagree. Clones taken along the way must keep their snapshot contents.

const MAX_LEN: usize = 1 << 16;

fn model_write(model: &mut Vec<u8>, data: &[u8], offset: usize) {
    if offset > model.len() {
        model.resize(offset, 0); // gap writes zero-fill
    }
    let end = offset + data.len();
    if end > model.len() {
        model.resize(end, 0);
    }
    model[offset..end].copy_from_slice(data);
}

fuzz_target!(|input: &[u8]| {
    let mut buffer = ByteBuffer::new();
    let mut model: Vec<u8> = Vec::new();
    let mut snapshots: Vec<(ByteBuffer, Vec<u8>)> = Vec::new();

    let mut bytes = input.iter().copied();
    while let (Some(op), Some(a), Some(b)) = (bytes.next(), bytes.next(), bytes.next()) {
        match op % 6 {
            0 => {
                // bounded write of a small run
                let offset = (a as usize * 256 + b as usize) % MAX_LEN;
                let data = [a, b, a ^ b];
                buffer.write_slice(&data, offset);
                model_write(&mut model, &data, offset);
            }
            1 => {
                // append at the end
                let data = vec![a; (b as usize % 64) + 1];
                let end = buffer.len();
                buffer.write_slice(&data, end);
                let model_end = model.len();
                model_write(&mut model, &data, model_end);
            }
            2 => {
                // snapshot via clone; must stay frozen from here on
                if snapshots.len() < 8 {
                    snapshots.push((buffer.clone(), model.clone()));
                }
            }
            3 => {
                // sub-view comparison
                if !buffer.is_empty() {
                    let start = a as usize % buffer.len();
                    let end = start + (b as usize % (buffer.len() - start + 1));
                    assert_eq!(buffer.slice(start..end).as_slice(), &model[start..end]);
                }
            }
            4 => {
                // reserve must not disturb contents
                buffer.reserve_capacity((a as usize * 16) % MAX_LEN);
            }
            _ => {
                // bounded read
                if !buffer.is_empty() {
                    let offset = a as usize % buffer.len();
                    let count = b as usize % (buffer.len() - offset + 1);
                    assert_eq!(buffer.read_bytes(offset, count), &model[offset..offset + count]);
                }
            }
        }

        assert_eq!(buffer.len(), model.len());
        assert!(buffer.len() <= buffer.capacity());
        assert_eq!(buffer.as_slice(), model.as_slice());
    }

    // no mutation may ever reach a snapshot
    for (snapshot, expected) in &snapshots {
        assert_eq!(snapshot.as_slice(), expected.as_slice());
    }
});
