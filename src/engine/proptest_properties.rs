// ============================================================================
// Property Tests
// Fee curve and quote invariants over random prices, fees and amounts
// ============================================================================

use super::{ExchangeEngine, ExchangeEngineBuilder, ExchangeServices, FeeModel};
use crate::domain::{AccountId, FeeConfig, OracleRef, TokenId, DEFAULT_IMBALANCE_UNIT};
use crate::interfaces::{InMemoryTokenLedger, StaticPriceOracle, TokenLedger};
use crate::numeric::Wad;
use proptest::prelude::*;
use std::sync::Arc;

/// Prices between 0.0001 and 100_000
fn price() -> impl Strategy<Value = Wad> {
    (100_000_000_000_000u128..100_000 * Wad::SCALE).prop_map(Wad::from_raw)
}

/// Amounts between 0.000001 and 50
fn amount() -> impl Strategy<Value = Wad> {
    (1_000_000_000_000u128..50 * Wad::SCALE).prop_map(Wad::from_raw)
}

/// Rates up to 1%
fn rate() -> impl Strategy<Value = Wad> {
    (0u128..10_000_000_000_000_000).prop_map(Wad::from_raw)
}

fn engine(
    fees: FeeConfig,
    price_a: Wad,
    price_b: Wad,
) -> (ExchangeEngine, Arc<InMemoryTokenLedger>) {
    let oracle = StaticPriceOracle::new()
        .with_price(OracleRef::new("a"), price_a)
        .with_price(OracleRef::new("b"), price_b);
    let ledger = Arc::new(InMemoryTokenLedger::new());
    let engine = ExchangeEngineBuilder::new("admin", "vault")
        .with_fees(fees)
        .with_token("A", "Sakura A", "sakA", "a")
        .with_token("B", "Sakura B", "sakB", "b")
        .build(ExchangeServices::new(Arc::new(oracle), ledger.clone()))
        .unwrap();
    (engine, ledger)
}

proptest! {
    #[test]
    fn zero_fee_output_equals_gross(pa in price(), pb in price(), amount_in in amount()) {
        let (engine, _) = engine(FeeConfig::zero(), pa, pb);
        let (a, b) = (TokenId::new("A"), TokenId::new("B"));

        let rate = engine.get_exchange_rate(&a, &b).unwrap();
        let net = engine.get_amount_out(&a, &b, amount_in).unwrap();
        prop_assert_eq!(net, amount_in.scaled_mul(rate).unwrap());
    }

    #[test]
    fn net_output_follows_fee_formula(
        base in rate(),
        imbalance in rate(),
        gross in amount(),
    ) {
        let fees = FeeModel::new(FeeConfig::new(base, imbalance), DEFAULT_IMBALANCE_UNIT).unwrap();

        let size = gross.scaled_div(DEFAULT_IMBALANCE_UNIT).unwrap();
        let fraction = imbalance.scaled_mul(size).unwrap().checked_add(base).unwrap();
        let expected = gross.scaled_mul(Wad::ONE.checked_sub(fraction).unwrap()).unwrap();

        prop_assert_eq!(fees.apply_fee(gross).unwrap(), expected);
        prop_assert!(expected <= gross);
    }

    #[test]
    fn amount_in_reaches_requested_output(
        pa in price(),
        pb in price(),
        base in rate(),
        imbalance in rate(),
        desired in amount(),
    ) {
        let (engine, _) = engine(FeeConfig::new(base, imbalance), pa, pb);
        let (a, b) = (TokenId::new("A"), TokenId::new("B"));

        let amount_in = engine.get_amount_in(&a, &b, desired).unwrap();
        let net = engine.get_amount_out(&a, &b, amount_in).unwrap();
        prop_assert!(net >= desired);
    }

    #[test]
    fn reverse_rate_is_reciprocal_within_rounding(pa in price(), pb in price()) {
        let (engine, _) = engine(FeeConfig::zero(), pa, pb);
        let (a, b) = (TokenId::new("A"), TokenId::new("B"));

        let forward = engine.get_exchange_rate(&a, &b).unwrap();
        let reverse = engine.get_exchange_rate(&b, &a).unwrap();
        let reconstructed = pb.scaled_div(pa).unwrap();
        prop_assert_eq!(forward, reconstructed);
        prop_assert_eq!(reverse, pa.scaled_div(pb).unwrap());

        // Each floor division loses under one raw unit, which the product
        // scales by the other rate; the final multiply loses one more.
        let product = forward.scaled_mul(reverse).unwrap();
        prop_assert!(product <= Wad::ONE);
        let shortfall = Wad::ONE.raw_value() - product.raw_value();
        let bound = forward.integer_part() + reverse.integer_part() + 3;
        prop_assert!(shortfall <= bound, "shortfall {} exceeds {}", shortfall, bound);
    }

    #[test]
    fn deposit_credits_shares_one_to_one(first in amount(), second in amount()) {
        let (engine, ledger) = engine(FeeConfig::default(), Wad::ONE, Wad::ONE);
        let token = TokenId::new("A");
        let lp = AccountId::new("lp");
        let vault = AccountId::new("vault");
        ledger.mint(&token, &lp, first.checked_add(second).unwrap()).unwrap();
        ledger.approve(&token, &lp, &vault, Wad::MAX);

        engine.deposit(&token, first, &lp).unwrap();
        engine.deposit(&token, second, &lp).unwrap();

        let total = first.checked_add(second).unwrap();
        prop_assert_eq!(engine.share_balance(&token, &lp).unwrap(), total);
        prop_assert_eq!(engine.total_deposited(&token).unwrap(), total);
        prop_assert_eq!(ledger.balance_of(&token, &vault), total);
    }
}
