//! Benchmark for the coalescing merge engine.
//!
//! Measures batch insertion over workloads that force heavy merging
//! (overlapping chains) and workloads that stay disjoint, plus the
//! cut-and-replace path used by subtraction.

use criterion::{BatchSize, BenchmarkId, Criterion, criterion_group, criterion_main};
use region_set::{Region, RegionSet};

/// Regions where each entry overlaps its neighbour, collapsing into
/// a single region.
fn overlapping_chain(len: usize) -> Vec<Region> {
    (0..len).map(|i| Region::new(i * 2, i * 2 + 3)).collect()
}

/// Regions separated by gaps; nothing merges.
fn disjoint_regions(len: usize) -> Vec<Region> {
    (0..len).map(|i| Region::new(i * 4, i * 4 + 2)).collect()
}

fn benchmark_add_all(c: &mut Criterion) {
    let mut group = c.benchmark_group("add_all");
    for len in [16, 64, 256] {
        group.bench_with_input(BenchmarkId::new("overlapping", len), &len, |b, &len| {
            let batch = overlapping_chain(len);
            b.iter_batched(
                RegionSet::new,
                |set| {
                    set.add_all(&batch);
                    set
                },
                BatchSize::SmallInput,
            );
        });
        group.bench_with_input(BenchmarkId::new("disjoint", len), &len, |b, &len| {
            let batch = disjoint_regions(len);
            b.iter_batched(
                RegionSet::new,
                |set| {
                    set.add_all(&batch);
                    set
                },
                BatchSize::SmallInput,
            );
        });
    }
    group.finish();
}

fn benchmark_subtract(c: &mut Criterion) {
    c.bench_function("subtract_spanning_many_regions", |b| {
        b.iter_batched(
            || RegionSet::from_regions(&disjoint_regions(128)),
            |set| {
                set.subtract(Region::new(100, 300));
                set
            },
            BatchSize::SmallInput,
        );
    });
}

criterion_group!(benches, benchmark_add_all, benchmark_subtract);
criterion_main!(benches);
