//! Benchmarks for Yaz0 decoding and stream extraction.
//!
//! Token streams are synthesized directly so no encoder is needed.

use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use unyaz::{
    MemorySink, ParallelExtractor, ScanConfig, SequentialExtractor, StreamExtractor, Yaz0Decoder,
};

/// Synthesize a valid token stream producing `size` bytes.
///
/// `literal_ratio` is the share (0-255) of tokens that are literals.
fn generate_payload(size: usize, literal_ratio: u8, seed: u64) -> Vec<u8> {
    let mut state = seed;
    let mut next = move || {
        // Simple xorshift PRNG
        state ^= state << 13;
        state ^= state >> 7;
        state ^= state << 17;
        state
    };

    let mut out = Vec::new();
    let mut produced = 0usize;
    let mut group = Vec::with_capacity(24);
    let mut control = 0u8;
    let mut bit = 0;

    while produced < size {
        let r = next();
        if produced == 0 || (r & 0xFF) as u8 <= literal_ratio {
            control |= 0x80 >> bit;
            group.push((r >> 8) as u8);
            produced += 1;
        } else {
            let distance = ((r >> 8) as usize % produced.min(4096)) + 1;
            let length = 3 + (r >> 24) as usize % 40;
            let d = distance - 1;
            if length <= 17 {
                group.push((((length - 2) as u8) << 4) | (d >> 8) as u8);
                group.push(d as u8);
            } else {
                group.push((d >> 8) as u8);
                group.push(d as u8);
                group.push((length - 18) as u8);
            }
            produced += length;
        }

        bit += 1;
        if bit == 8 || produced >= size {
            out.push(control);
            out.append(&mut group);
            control = 0;
            bit = 0;
        }
    }
    out
}

fn yaz0_stream(size: usize, payload: &[u8]) -> Vec<u8> {
    let mut out = b"Yaz0".to_vec();
    out.extend_from_slice(&(size as u32).to_be_bytes());
    out.extend_from_slice(&[0u8; 8]);
    out.extend_from_slice(payload);
    out
}

fn bench_decode(c: &mut Criterion) {
    let mut group = c.benchmark_group("decode");

    for size in [4 * 1024, 64 * 1024, 1024 * 1024].iter() {
        let payload = generate_payload(*size, 128, 0x5eed);

        group.throughput(Throughput::Bytes(*size as u64));
        group.bench_with_input(BenchmarkId::new("mixed", size), &payload, |b, payload| {
            let decoder = Yaz0Decoder::new();
            b.iter(|| decoder.decode(payload, *size).unwrap());
        });
    }

    group.finish();
}

fn bench_token_mix(c: &mut Criterion) {
    let mut group = c.benchmark_group("token_mix");
    let size = 256 * 1024;
    group.throughput(Throughput::Bytes(size as u64));

    for (name, ratio) in [("literal_heavy", 230u8), ("balanced", 128), ("run_heavy", 20)] {
        let payload = generate_payload(size, ratio, 42);
        group.bench_function(name, |b| {
            let decoder = Yaz0Decoder::new();
            b.iter(|| decoder.decode(&payload, size).unwrap());
        });
    }

    group.finish();
}

fn bench_extract(c: &mut Criterion) {
    let mut group = c.benchmark_group("extract");

    // 32 streams of 64KB each
    let stream_size = 64 * 1024;
    let mut blob = Vec::new();
    for i in 0..32 {
        blob.extend(yaz0_stream(stream_size, &generate_payload(stream_size, 128, i + 1)));
        blob.extend_from_slice(&[0u8; 64]);
    }
    group.throughput(Throughput::Bytes(32 * stream_size as u64));

    group.bench_function("sequential", |b| {
        b.iter(|| {
            let mut sink = MemorySink::new();
            SequentialExtractor::new(ScanConfig::default()).extract(&blob, &mut sink).unwrap()
        });
    });

    for threads in [2, 4, 8].iter() {
        group.bench_with_input(BenchmarkId::new("threads", threads), &blob, |b, blob| {
            let config = ScanConfig { num_threads: *threads, ..Default::default() };
            b.iter(|| {
                let mut sink = MemorySink::new();
                ParallelExtractor::new(config.clone()).extract(blob, &mut sink).unwrap()
            });
        });
    }

    group.finish();
}

criterion_group!(benches, bench_decode, bench_token_mix, bench_extract);
criterion_main!(benches);
