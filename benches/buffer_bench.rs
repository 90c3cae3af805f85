//! Benchmarks for bytebuf.
//!
//! Run with:
//!     cargo bench

use criterion::{Criterion, Throughput, black_box, criterion_group, criterion_main};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use bytebuf::{ByteBuffer, Endianness};

fn bench_append(c: &mut Criterion) {
    let mut group = c.benchmark_group("append");

    for size in [4 * 1024, 64 * 1024, 1024 * 1024] {
        let chunk = vec![0xA5u8; 256];

        group.throughput(Throughput::Bytes(size as u64));
        group.bench_with_input(format!("{}kb", size / 1024), &size, |b, &size| {
            b.iter(|| {
                let mut buffer = ByteBuffer::new();
                while buffer.len() < size {
                    buffer.write_slice(black_box(&chunk), buffer.len());
                }
                black_box(buffer.len())
            });
        });
    }

    group.finish();
}

fn bench_reserved_append(c: &mut Criterion) {
    let mut group = c.benchmark_group("reserved_append");

    let size = 1024 * 1024;
    let chunk = vec![0xA5u8; 256];

    group.throughput(Throughput::Bytes(size as u64));
    group.bench_function("1024kb", |b| {
        b.iter(|| {
            let mut buffer = ByteBuffer::new();
            buffer.reserve_capacity(size);
            while buffer.len() < size {
                buffer.write_slice(black_box(&chunk), buffer.len());
            }
            black_box(buffer.len())
        });
    });

    group.finish();
}

fn bench_typed(c: &mut Criterion) {
    let mut group = c.benchmark_group("typed");

    let count = 8 * 1024;
    group.throughput(Throughput::Bytes((count * 8) as u64));

    group.bench_function("write_u64_big_endian", |b| {
        b.iter(|| {
            let mut buffer = ByteBuffer::new();
            for i in 0..count {
                buffer.write_int(i as u64, i * 8, Endianness::Big);
            }
            black_box(buffer.len())
        });
    });

    let mut buffer = ByteBuffer::new();
    for i in 0..count {
        buffer.write_int(i as u64, i * 8, Endianness::Big);
    }

    group.bench_function("read_u64_big_endian", |b| {
        b.iter(|| {
            let mut sum = 0u64;
            for i in 0..count {
                sum = sum.wrapping_add(buffer.read_int::<u64>(i * 8, Endianness::Big));
            }
            black_box(sum)
        });
    });

    group.bench_function("read_u64_random_offsets", |b| {
        let mut rng = StdRng::seed_from_u64(7);
        let offsets: Vec<usize> = (0..count).map(|_| rng.gen_range(0..count) * 8).collect();
        b.iter(|| {
            let mut sum = 0u64;
            for &offset in &offsets {
                sum = sum.wrapping_add(buffer.read_int::<u64>(offset, Endianness::Little));
            }
            black_box(sum)
        });
    });

    group.bench_function("write_f64", |b| {
        b.iter(|| {
            let mut buffer = ByteBuffer::new();
            for i in 0..count {
                buffer.write_float(i as f64 * 0.5, i * 8, Endianness::Little);
            }
            black_box(buffer.len())
        });
    });

    group.finish();
}

fn bench_cow(c: &mut Criterion) {
    let mut group = c.benchmark_group("cow");

    for size in [4 * 1024, 1024 * 1024] {
        let source = ByteBuffer::from_slice(&vec![0x5Au8; size]);

        group.bench_with_input(
            format!("clone_{}kb", size / 1024),
            &source,
            |b, source| {
                b.iter(|| black_box(source.clone()));
            },
        );

        group.throughput(Throughput::Bytes(size as u64));
        group.bench_with_input(
            format!("clone_then_write_{}kb", size / 1024),
            &source,
            |b, source| {
                b.iter(|| {
                    let mut copy = source.clone();
                    // first write pays for the divergence copy
                    copy.write_slice(black_box(&[1]), 0);
                    black_box(copy.len())
                });
            },
        );
    }

    group.finish();
}

criterion_group!(benches, bench_append, bench_reserved_append, bench_typed, bench_cow);
criterion_main!(benches);
