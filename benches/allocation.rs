use criterion::{black_box, criterion_group, criterion_main, Criterion};

use train_booking::models::Seat;
use train_booking::services::allocate;

fn coach(booked: impl Fn(i32) -> bool) -> Vec<Seat> {
    (1..=80).filter(|n| !booked(*n)).map(Seat::free).collect()
}

fn bench_allocation(c: &mut Criterion) {
    let empty = coach(|_| false);
    c.bench_function("allocate 7 on empty coach", |b| {
        b.iter(|| allocate(black_box(&empty), black_box(7)))
    });

    // every other seat taken: no consecutive runs anywhere
    let checkered = coach(|n| n % 2 == 0);
    c.bench_function("allocate 4 on checkered coach", |b| {
        b.iter(|| allocate(black_box(&checkered), black_box(4)))
    });

    // three free seats per row: forces the cross-row fallback
    let sparse = coach(|n| (n - 1) % 7 >= 3);
    c.bench_function("allocate 7 across rows", |b| {
        b.iter(|| allocate(black_box(&sparse), black_box(7)))
    });
}

criterion_group!(benches, bench_allocation);
criterion_main!(benches);
