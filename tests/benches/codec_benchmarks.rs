//! # Quantum-Chain Codec Benchmarks
//!
//! | Group | Measures |
//! |-------|----------|
//! | block-codec | full block encode and decode by transaction count |
//! | transaction-stream | typed transaction list decode |
//! | extra-dispatch | height lookup plus extra decode per fork |

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use qc_chain_codec::{decode_transactions, encode_transactions, Block, Header};
use qc_tests::fixtures::{
    populated_extra, random_transaction, scheduled_codec, sealed_header, LONDON_AT, NIKARAGVA_AT,
};
use rand::rngs::StdRng;
use rand::SeedableRng;

// ============================================================================
// Block Codec
// ============================================================================

fn bench_block_codec(c: &mut Criterion) {
    let mut group = c.benchmark_group("block-codec");
    let codec = scheduled_codec();
    let mut rng = StdRng::seed_from_u64(1);
    let parent = Header::empty(NIKARAGVA_AT - 1).seal();

    for tx_count in [0usize, 10, 100, 1_000] {
        let header = sealed_header(&codec, NIKARAGVA_AT, &parent);
        let txs = (0..tx_count).map(|_| random_transaction(&mut rng)).collect();
        let block = Block::new(header, txs);
        let encoded = block.encode();

        group.throughput(Throughput::Bytes(encoded.len() as u64));
        group.bench_with_input(BenchmarkId::new("encode", tx_count), &block, |b, block| {
            b.iter(|| black_box(block.encode()))
        });
        group.bench_with_input(BenchmarkId::new("decode", tx_count), &encoded, |b, raw| {
            b.iter(|| black_box(Block::decode(raw).is_ok()))
        });
    }

    group.finish();
}

// ============================================================================
// Transaction Streams
// ============================================================================

fn bench_transaction_stream(c: &mut Criterion) {
    let mut group = c.benchmark_group("transaction-stream");
    let mut rng = StdRng::seed_from_u64(2);

    for size in [16usize, 256, 4_096] {
        let txs: Vec<_> = (0..size).map(|_| random_transaction(&mut rng)).collect();
        let encoded = encode_transactions(&txs);

        group.throughput(Throughput::Elements(size as u64));
        group.bench_with_input(BenchmarkId::new("decode", size), &encoded, |b, raw| {
            b.iter(|| black_box(decode_transactions(raw).map(|txs| txs.len())))
        });
    }

    group.finish();
}

// ============================================================================
// Extra Dispatch
// ============================================================================

fn bench_extra_dispatch(c: &mut Criterion) {
    let mut group = c.benchmark_group("extra-dispatch");
    let codec = scheduled_codec();

    for (label, block) in [("base", 1), ("london", LONDON_AT), ("nikaragva", NIKARAGVA_AT)] {
        let raw = codec.encode(&populated_extra(&codec, block));
        group.bench_with_input(BenchmarkId::new("decode", label), &raw, |b, raw| {
            b.iter(|| black_box(codec.decode(raw, block).is_ok()))
        });
    }

    group.bench_function("handler_lookup", |b| {
        b.iter(|| black_box(codec.handler_at(black_box(NIKARAGVA_AT + 1))))
    });

    group.finish();
}

criterion_group!(
    benches,
    bench_block_codec,
    bench_transaction_stream,
    bench_extra_dispatch
);
criterion_main!(benches);
