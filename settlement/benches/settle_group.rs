//! Settlement throughput on large random groups
//!
//! Groups are generated from a fixed seed so every run measures the same input.

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use rust_decimal::Decimal;
use settlement::{Member, SettlementEngine};

/// Balanced group of `size` members with balances up to ±10,000.00
fn random_group(size: usize, seed: u64) -> Vec<Member> {
    let mut rng = StdRng::seed_from_u64(seed);
    let mut members: Vec<Member> = (0..size - 1)
        .map(|i| {
            let cents: i64 = rng.gen_range(-1_000_000..=1_000_000);
            Member::new(format!("member-{:05}", i), Decimal::new(cents, 2))
        })
        .collect();

    let closing: Decimal = -members.iter().map(|m| m.net).sum::<Decimal>();
    members.push(Member::new(format!("member-{:05}", size - 1), closing));
    members
}

fn bench_settle(c: &mut Criterion) {
    let engine = SettlementEngine::default();
    let mut group = c.benchmark_group("settle_group");

    for size in [1_000usize, 10_000] {
        let members = random_group(size, 42);
        group.bench_with_input(BenchmarkId::from_parameter(size), &members, |b, members| {
            b.iter(|| engine.settle(black_box(members)).map(|r| r.transactions.len()))
        });
    }

    group.finish();
}

criterion_group!(benches, bench_settle);
criterion_main!(benches);
