// Copyright (c) 2025 Felix Kahle.
//
// Permission is hereby granted, free of charge, to any person obtaining
// a copy of this software and associated documentation files (the
// "Software"), to deal in the Software without restriction, including
// without limitation the rights to use, copy, modify, merge, publish,
// distribute, sublicense, and/or sell copies of the Software, and to
// permit persons to whom the Software is furnished to do so, subject to
// the following conditions:
//
// The above copyright notice and this permission notice shall be
// included in all copies or substantial portions of the Software.
//
// THE SOFTWARE IS PROVIDED "AS IS", WITHOUT WARRANTY OF ANY KIND,
// EXPRESS OR IMPLIED, INCLUDING BUT NOT LIMITED TO THE WARRANTIES OF
// MERCHANTABILITY, FITNESS FOR A PARTICULAR PURPOSE AND
// NONINFRINGEMENT. IN NO EVENT SHALL THE AUTHORS OR COPYRIGHT HOLDERS BE
// LIABLE FOR ANY CLAIM, DAMAGES OR OTHER LIABILITY, WHETHER IN AN ACTION
// OF CONTRACT, TORT OR OTHERWISE, ARISING FROM, OUT OF OR IN CONNECTION
// WITH THE SOFTWARE OR THE USE OR OTHER DEALINGS IN THE SOFTWARE.

use criterion::{BenchmarkId, Criterion, Throughput, criterion_group, criterion_main};
use interlude_core::math::interval::ClosedInterval;
use interlude_core::matcher::{exemplar_accepts, exemplar_accepts_indices};
use interlude_core::nearest::{Tolerance, find_closest};
use interlude_core::predicate::RelationPredicate;
use interlude_core::relation::classify;
use rand::{Rng, SeedableRng, rngs::StdRng};
use std::hint::black_box;

const HOUR_MS: i64 = 3_600_000;

/// Random intervals, each starting within a day and lasting up to six hours.
fn random_intervals(n: usize, seed: u64) -> Vec<ClosedInterval<i64>> {
    let mut rng = StdRng::seed_from_u64(seed);
    (0..n)
        .map(|_| {
            let start = rng.gen_range(0..24 * HOUR_MS);
            let len = rng.gen_range(0..6 * HOUR_MS);
            ClosedInterval::new(start, start + len)
        })
        .collect()
}

/// A sorted, non-overlapping layout of three-hourly periods.
fn layout(n: usize) -> Vec<ClosedInterval<i64>> {
    (0..n as i64)
        .map(|i| ClosedInterval::new(i * 3 * HOUR_MS, i * 3 * HOUR_MS + 2 * HOUR_MS))
        .collect()
}

fn bench_classify(c: &mut Criterion) {
    let items = random_intervals(1024, 1);
    let exemplar = ClosedInterval::new(6 * HOUR_MS, 18 * HOUR_MS);

    let mut group = c.benchmark_group("classify");
    group.throughput(Throughput::Elements(items.len() as u64));
    group.bench_function("against_exemplar", |b| {
        b.iter(|| {
            for item in &items {
                black_box(classify(black_box(&exemplar), item));
            }
        })
    });
    group.finish();
}

fn bench_matcher(c: &mut Criterion) {
    let exemplar = ClosedInterval::new(6 * HOUR_MS, 18 * HOUR_MS);

    let mut group = c.benchmark_group("matcher");
    for &n in &[64usize, 1024, 16384] {
        let items = random_intervals(n, n as u64);
        group.throughput(Throughput::Elements(n as u64));

        group.bench_with_input(BenchmarkId::new("contains", n), &items, |b, items| {
            b.iter(|| {
                black_box(exemplar_accepts(
                    black_box(&exemplar),
                    items,
                    RelationPredicate::CONTAINS,
                ))
            })
        });

        group.bench_with_input(BenchmarkId::new("overlaps_indices", n), &items, |b, items| {
            b.iter(|| {
                black_box(exemplar_accepts_indices(
                    black_box(&exemplar),
                    items,
                    RelationPredicate::OVERLAPS,
                ))
            })
        });
    }
    group.finish();
}

fn bench_find_closest(c: &mut Criterion) {
    let tolerance = Tolerance::new(24.0, HOUR_MS as f64);

    let mut group = c.benchmark_group("find_closest");
    for &n in &[8usize, 56, 168] {
        let sequence = layout(n);
        let points: Vec<i64> = {
            let mut rng = StdRng::seed_from_u64(42);
            let end = n as i64 * 3 * HOUR_MS;
            (0..256).map(|_| rng.gen_range(-HOUR_MS..end + HOUR_MS)).collect()
        };
        group.throughput(Throughput::Elements(points.len() as u64));

        group.bench_with_input(BenchmarkId::from_parameter(n), &sequence, |b, sequence| {
            b.iter(|| {
                for &p in &points {
                    black_box(find_closest(sequence, black_box(p), &tolerance));
                }
            })
        });
    }
    group.finish();
}

criterion_group!(benches, bench_classify, bench_matcher, bench_find_closest);
criterion_main!(benches);
