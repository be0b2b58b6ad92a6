//! Performance benchmarks for CounterEngine.
//!
//! The pulse path runs in interrupt context, so its cost per call matters
//! more than anything else in the crate.
//!
//! Run benchmarks with:
//! ```sh
//! cargo bench --bench counter_bench
//! ```

use criterion::{Criterion, Throughput, criterion_group, criterion_main};
use hallcount_core::CounterEngine;
use hallcount_core::constants::SIGNALS_PER_ROTATION;
use std::hint::black_box;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::thread;

/// Benchmark a single pulse without contention.
fn bench_on_pulse(c: &mut Criterion) {
    let mut group = c.benchmark_group("on_pulse");
    group.throughput(Throughput::Elements(1));

    let engine = CounterEngine::new();

    group.bench_function("on_pulse_uncontended", |b| {
        b.iter(|| black_box(&engine).on_pulse());
    });

    group.finish();
}

/// Benchmark a full rotation of pulses, including the roll-over.
fn bench_full_rotation(c: &mut Criterion) {
    let mut group = c.benchmark_group("full_rotation");
    group.throughput(Throughput::Elements(u64::from(SIGNALS_PER_ROTATION)));

    let engine = CounterEngine::new();

    group.bench_function("192_pulses", |b| {
        b.iter(|| {
            for _ in 0..SIGNALS_PER_ROTATION {
                black_box(&engine).on_pulse();
            }
        });
    });

    group.finish();
}

/// Benchmark distance reads and formatting.
fn bench_read_distance(c: &mut Criterion) {
    let mut group = c.benchmark_group("read_distance");
    group.throughput(Throughput::Elements(1));

    let engine = CounterEngine::new();
    for _ in 0..1000 {
        engine.on_pulse();
    }

    group.bench_function("read_distance", |b| {
        b.iter(|| black_box(engine.read_distance()));
    });

    group.bench_function("show_distance", |b| {
        b.iter(|| black_box(engine.show_distance()));
    });

    group.finish();
}

/// Benchmark pulses while another thread hammers the read path.
fn bench_on_pulse_with_reader(c: &mut Criterion) {
    let mut group = c.benchmark_group("on_pulse_contended");
    group.throughput(Throughput::Elements(1));

    let engine = Arc::new(CounterEngine::new());
    let done = Arc::new(AtomicBool::new(false));

    let reader = {
        let engine = Arc::clone(&engine);
        let done = Arc::clone(&done);
        thread::spawn(move || {
            while !done.load(Ordering::Relaxed) {
                black_box(engine.read_distance());
            }
        })
    };

    group.bench_function("on_pulse_with_reader", |b| {
        b.iter(|| engine.on_pulse());
    });

    done.store(true, Ordering::Relaxed);
    reader.join().expect("reader thread panicked");

    group.finish();
}

criterion_group!(
    benches,
    bench_on_pulse,
    bench_full_rotation,
    bench_read_distance,
    bench_on_pulse_with_reader
);
criterion_main!(benches);
