// ============================================================================
// Swap Engine Benchmarks
// ============================================================================
//
// Benchmark Categories:
// 1. Fixed Point - Raw scaled multiply/divide through the 256-bit path
// 2. Fee Curve - Forward fee application and its inverse search
// 3. Quotes - Oracle lookup plus fee math under the read lock
// 4. Settlement - Full swap through the in-memory ledger
// ============================================================================

use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion};
use oracle_swap::engine::FeeModel;
use oracle_swap::prelude::*;
use std::hint::black_box;
use std::sync::Arc;

fn wad(s: &str) -> Wad {
    s.parse().unwrap()
}

fn units(n: u128) -> Wad {
    Wad::from_integer(n).unwrap()
}

fn setup_engine() -> (ExchangeEngine, Arc<InMemoryTokenLedger>) {
    let oracle = StaticPriceOracle::new()
        .with_price(OracleRef::new("a-usd"), wad("12.5"))
        .with_price(OracleRef::new("b-usd"), wad("3.75"));
    let ledger = Arc::new(InMemoryTokenLedger::new());
    let engine = ExchangeEngineBuilder::new("owner", "vault")
        .with_base_fee(wad("0.003"))
        .with_token("A", "Sakura A", "sakA", "a-usd")
        .with_token("B", "Sakura B", "sakB", "b-usd")
        .build(ExchangeServices::new(Arc::new(oracle), ledger.clone()))
        .unwrap();

    let vault = engine.custody_account();
    for token in [TokenId::new("A"), TokenId::new("B")] {
        let lp = AccountId::new("lp");
        ledger.mint(&token, &lp, units(1_000_000_000)).unwrap();
        ledger.approve(&token, &lp, &vault, Wad::MAX);
        engine.deposit(&token, units(1_000_000_000), &lp).unwrap();
    }
    (engine, ledger)
}

// ============================================================================
// Fixed Point Benchmarks
// ============================================================================

fn benchmark_fixed_point(c: &mut Criterion) {
    let mut group = c.benchmark_group("fixed_point");
    let a = wad("123456.789012345678901234");
    let b = wad("0.000731");

    group.bench_function("scaled_mul", |bench| {
        bench.iter(|| black_box(a).scaled_mul(black_box(b)))
    });
    group.bench_function("scaled_div", |bench| {
        bench.iter(|| black_box(a).scaled_div(black_box(b)))
    });
    group.bench_function("scaled_div_up", |bench| {
        bench.iter(|| black_box(a).scaled_div_up(black_box(b)))
    });

    group.finish();
}

// ============================================================================
// Fee Curve Benchmarks
// ============================================================================

fn benchmark_fee_curve(c: &mut Criterion) {
    let mut group = c.benchmark_group("fee_curve");
    let fees = FeeModel::new(FeeConfig::default(), units(100)).unwrap();

    for gross in [1u128, 100, 10_000].iter() {
        let amount = units(*gross);
        group.bench_with_input(BenchmarkId::new("apply_fee", gross), &amount, |b, amount| {
            b.iter(|| black_box(fees.apply_fee(*amount)))
        });
        group.bench_with_input(BenchmarkId::new("gross_for_net", gross), &amount, |b, amount| {
            b.iter(|| black_box(fees.gross_for_net(*amount)))
        });
    }

    group.finish();
}

// ============================================================================
// Quote Benchmarks
// ============================================================================

fn benchmark_quotes(c: &mut Criterion) {
    let mut group = c.benchmark_group("quotes");
    let (engine, _) = setup_engine();
    let (a, b) = (TokenId::new("A"), TokenId::new("B"));

    group.bench_function("get_exchange_rate", |bench| {
        bench.iter(|| black_box(engine.get_exchange_rate(&a, &b)))
    });
    group.bench_function("get_amount_out", |bench| {
        bench.iter(|| black_box(engine.get_amount_out(&a, &b, units(10))))
    });
    group.bench_function("get_amount_in", |bench| {
        bench.iter(|| black_box(engine.get_amount_in(&a, &b, units(10))))
    });

    group.finish();
}

// ============================================================================
// Settlement Benchmarks
// ============================================================================

fn benchmark_settlement(c: &mut Criterion) {
    let mut group = c.benchmark_group("settlement");
    let (engine, ledger) = setup_engine();
    let (a, b) = (TokenId::new("A"), TokenId::new("B"));
    let vault = engine.custody_account();
    let trader = AccountId::new("trader");
    for token in [&a, &b] {
        ledger.mint(token, &trader, units(1_000_000_000)).unwrap();
        ledger.approve(token, &trader, &vault, Wad::MAX);
    }

    // Alternate direction so neither pool drains
    let mut forward = true;
    group.bench_function("swap_in_round_trip", |bench| {
        bench.iter(|| {
            let (token_in, token_out) = if forward { (&a, &b) } else { (&b, &a) };
            forward = !forward;
            black_box(engine.swap_in(token_in, token_out, units(1), &trader))
        })
    });

    group.bench_function("swap_exact_out", |bench| {
        bench.iter(|| black_box(engine.swap_exact_out(&a, &b, wad("0.5"), &trader)))
    });

    group.finish();
}

criterion_group!(
    benches,
    benchmark_fixed_point,
    benchmark_fee_curve,
    benchmark_quotes,
    benchmark_settlement
);
criterion_main!(benches);
