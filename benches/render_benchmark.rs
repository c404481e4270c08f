//! Frame rendering benchmarks against TestBackend.
//!
//! Run with: cargo bench --features bench-internals --bench render_benchmark

#![allow(missing_docs)] // criterion macros generate undocumented items

use cdir::catalog::AppState;
use cdir::config::ResolvedConfig;
use cdir::model::{Category, Listing, ListingId};
use cdir::paginator::{ManualClock, PageSize};
use cdir::view::TuiApp;
use criterion::{criterion_group, criterion_main, BatchSize, BenchmarkId, Criterion};
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ratatui::backend::TestBackend;
use ratatui::Terminal;

fn make_listings(n: usize) -> Vec<Listing> {
    (0..n)
        .map(|i| {
            let mut listing = Listing::new(
                ListingId::new(format!("bench-{i:05}")).expect("valid id"),
                Category::ALL[i % Category::ALL.len()],
                format!("Listing {i} with a fairly long descriptive title"),
            );
            listing.city = Some("Vancouver".to_string());
            listing.province = Some("BC".to_string());
            listing
        })
        .collect()
}

fn make_app(n: usize, infinite: bool) -> TuiApp<TestBackend, ManualClock> {
    let config = ResolvedConfig {
        page_size: PageSize::new(20).expect("non-zero"),
        infinite_scroll: infinite,
        ..ResolvedConfig::default()
    };
    let state = AppState::with_clock(ManualClock::new(), make_listings(n), &config);
    let terminal = Terminal::new(TestBackend::new(160, 60)).expect("test terminal");
    TuiApp::new_for_test(terminal, state)
}

fn benchmark_render_page(c: &mut Criterion) {
    let mut group = c.benchmark_group("render_page");
    for &n in &[100usize, 10_000] {
        group.bench_with_input(BenchmarkId::from_parameter(n), &n, |b, &n| {
            let mut app = make_app(n, false);
            b.iter(|| app.render_test().expect("render"));
        });
    }
    group.finish();
}

fn benchmark_page_through(c: &mut Criterion) {
    let next = KeyEvent::new(KeyCode::Char('n'), KeyModifiers::NONE);
    c.bench_function("page_through_50", |b| {
        b.iter_batched(
            || make_app(5_000, false),
            |mut app| {
                for _ in 0..50 {
                    app.handle_key_test(next);
                    app.render_test().expect("render");
                }
                app
            },
            BatchSize::LargeInput,
        );
    });
}

fn benchmark_render_with_detail(c: &mut Criterion) {
    let enter = KeyEvent::new(KeyCode::Enter, KeyModifiers::NONE);
    let mut app = make_app(1_000, true);
    app.handle_key_test(enter);
    c.bench_function("render_with_detail", |b| {
        b.iter(|| app.render_test().expect("render"));
    });
}

criterion_group! {
    name = benches;
    config = Criterion::default()
        .measurement_time(std::time::Duration::from_secs(5));
    targets =
        benchmark_render_page,
        benchmark_page_through,
        benchmark_render_with_detail
}

criterion_main!(benches);
