//! Paginator benchmarks: slice derivation and full load-more cycles.
//!
//! Run with: cargo bench --bench paginator_benchmark

#![allow(missing_docs)] // criterion macros generate undocumented items

use cdir::catalog::{filter_indices, CategoryTab};
use cdir::model::{Category, Listing, ListingId};
use cdir::paginator::{LoadPacing, ManualClock, PageSize, PaginationMode, Paginator};
use criterion::{black_box, criterion_group, criterion_main, BatchSize, BenchmarkId, Criterion};

const SIZES: [usize; 3] = [1_000, 10_000, 100_000];

fn make_listings(n: usize) -> Vec<Listing> {
    (0..n)
        .map(|i| {
            let mut listing = Listing::new(
                ListingId::new(format!("bench-{i:06}")).expect("valid id"),
                Category::ALL[i % Category::ALL.len()],
                format!("Listing {i}"),
            );
            listing.description = if i % 7 == 0 {
                "Fresh ramen and dumplings downtown".to_string()
            } else {
                "Part-time position, flexible hours".to_string()
            };
            listing
        })
        .collect()
}

fn benchmark_paged_slice(c: &mut Criterion) {
    let mut group = c.benchmark_group("paged_slice");
    for &n in &SIZES {
        let source: Vec<usize> = (0..n).collect();
        let mut p = Paginator::new(
            ManualClock::new(),
            PaginationMode::Paged,
            PageSize::DEFAULT,
            n,
        );
        p.go_to_page(p.total_pages() / 2);

        group.bench_with_input(BenchmarkId::from_parameter(n), &n, |b, _| {
            b.iter(|| {
                let visible = p.visible(black_box(&source));
                black_box((visible.len(), p.metrics()))
            });
        });
    }
    group.finish();
}

fn benchmark_load_to_end(c: &mut Criterion) {
    let mut group = c.benchmark_group("load_more_to_end");
    for &n in &SIZES {
        group.bench_with_input(BenchmarkId::from_parameter(n), &n, |b, &n| {
            b.iter_batched(
                || {
                    let clock = ManualClock::new();
                    let p = Paginator::new(
                        clock.clone(),
                        PaginationMode::Infinite,
                        PageSize::new(50).expect("non-zero"),
                        n,
                    )
                    .with_pacing(LoadPacing::from_millis(200, 500));
                    (p, clock)
                },
                |(mut p, clock)| {
                    while p.load_more().accepted() {
                        clock.advance_ms(500);
                        p.tick();
                    }
                    black_box(p.displayed_count())
                },
                BatchSize::SmallInput,
            );
        });
    }
    group.finish();
}

fn benchmark_filter_and_reset(c: &mut Criterion) {
    let mut group = c.benchmark_group("filter_and_reset");
    for &n in &SIZES {
        let listings = make_listings(n);
        group.bench_with_input(BenchmarkId::from_parameter(n), &n, |b, _| {
            let mut p = Paginator::new(
                ManualClock::new(),
                PaginationMode::Infinite,
                PageSize::DEFAULT,
                n,
            );
            b.iter(|| {
                let filtered = filter_indices(
                    black_box(&listings),
                    CategoryTab::Only(Category::Dining),
                    "ramen",
                );
                if !p.sync_len(filtered.len()) {
                    p.reset_pagination();
                }
                black_box(p.visible(&filtered).len())
            });
        });
    }
    group.finish();
}

criterion_group! {
    name = benches;
    config = Criterion::default()
        .measurement_time(std::time::Duration::from_secs(5));
    targets =
        benchmark_paged_slice,
        benchmark_load_to_end,
        benchmark_filter_and_reset
}

criterion_main!(benches);
