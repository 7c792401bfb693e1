// ABOUTME: Criterion benchmarks for text normalization and cache-first resolution
// ABOUTME: Measures normalize, cache hit/miss lookup and resolver latency on the built-in table
//
// Licensed under either of Apache License, Version 2.0 or MIT License at your option.
// Copyright ©2025 Async-IO.org

//! Criterion benchmarks for the resolution path.
//!
//! The estimator is the offline one, so miss timings measure only the
//! cache lookup plus error construction, never network latency.

#![allow(
    clippy::missing_docs_in_private_items,
    clippy::unwrap_used,
    missing_docs
)]

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use macro_ledger::nutrition::{normalize, OfflineEstimator, ResolutionCache, Resolver};
use tokio::runtime::Runtime;

/// Inputs of increasing messiness
const INPUTS: [(&str, &str); 4] = [
    ("canonical", "chicken breast"),
    ("mixed_case", "Chicken Breast"),
    ("padded", "   chicken \t  breast \n"),
    ("long_phrase", "Grilled Chicken Breast With A Side Of Steamed Broccoli And Rice"),
];

fn bench_normalize(c: &mut Criterion) {
    let mut group = c.benchmark_group("normalize");

    for (name, input) in INPUTS {
        group.bench_with_input(BenchmarkId::from_parameter(name), input, |b, input| {
            b.iter(|| normalize(black_box(input)));
        });
    }

    group.finish();
}

fn bench_cache_lookup(c: &mut Criterion) {
    let cache = ResolutionCache::builtin().unwrap();
    let mut group = c.benchmark_group("cache_lookup");

    group.bench_function("hit", |b| {
        b.iter(|| cache.lookup(black_box("ice cream")));
    });

    group.bench_function("miss", |b| {
        b.iter(|| cache.lookup(black_box("dragon fruit")));
    });

    group.bench_function("raw_hit", |b| {
        b.iter(|| cache.lookup_raw(black_box("  ICE   Cream ")));
    });

    group.finish();
}

fn bench_resolve(c: &mut Criterion) {
    let rt = Runtime::new().unwrap();
    let resolver = Resolver::new(ResolutionCache::builtin().unwrap(), OfflineEstimator);
    let mut group = c.benchmark_group("resolve");

    group.bench_function("cache_hit", |b| {
        b.iter(|| rt.block_on(async { resolver.resolve(black_box("Banana")).await.unwrap() }));
    });

    group.bench_function("offline_miss", |b| {
        b.iter(|| {
            rt.block_on(async {
                let _ = resolver.resolve(black_box("dragon fruit")).await;
            });
        });
    });

    group.finish();
}

criterion_group!(benches, bench_normalize, bench_cache_lookup, bench_resolve);
criterion_main!(benches);
