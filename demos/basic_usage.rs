// ============================================================================
// Basic Usage Example
// ============================================================================

use oracle_swap::prelude::*;
use std::sync::Arc;

fn units(n: u128) -> Wad {
    Wad::from_integer(n).unwrap()
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    #[cfg(feature = "logging")]
    tracing_subscriber::fmt()
        .with_max_level(tracing::Level::DEBUG)
        .init();

    println!("=== Oracle Swap Example ===\n");

    let sushi_feed = OracleRef::new("0xcc70f09a6cc17553b2e31954cd36e4a2d89501f7");
    let yfi_feed = OracleRef::new("0xa027702dbb89fbd58938e4324ac03b58d812b0e1");
    let oracle = Arc::new(
        StaticPriceOracle::new()
            .with_price(sushi_feed.clone(), "12.5".parse()?)
            .with_price(yfi_feed.clone(), "3.75".parse()?),
    );
    let ledger = Arc::new(InMemoryTokenLedger::new());
    let events = Arc::new(RecordingEventHandler::new());

    let engine = ExchangeEngineBuilder::new("owner", "vault")
        .build(
            ExchangeServices::new(oracle.clone(), ledger.clone())
                .with_event_handler(events.clone()),
        )?;
    let owner = AccountId::new("owner");
    let vault = engine.custody_account();

    let sushi = TokenId::new("0x6B3595068778DD592e39A122f4f5a5cF09C90fE2");
    let yfi = TokenId::new("0x0bc529c00C6401aEF6D220BE8C6Ea1667F6Ad93e");
    engine.add_supported_token(sushi.clone(), "Sakura Sushi", "sakSUSHI", sushi_feed)?;
    engine.add_supported_token(yfi.clone(), "Sakura YFI", "sakYFI", yfi_feed.clone())?;
    println!("Supported tokens: {:?}\n", engine.supported_tokens());

    // Seed both pools
    println!("Depositing liquidity...");
    for (token, holder) in [(&sushi, "sushi_owner"), (&yfi, "yfi_owner")] {
        let holder = AccountId::new(holder);
        ledger.mint(token, &holder, units(100))?;
        ledger.approve(token, &holder, &vault, Wad::MAX);
        engine.deposit(token, units(100), &holder)?;

        let pool = engine.share_pool(token)?;
        println!(
            "  {} holds {} {} ({} total)",
            holder,
            pool.balance_of(&holder),
            pool.symbol,
            pool.total_deposited()
        );
    }

    println!("\nSetting base fee to 0.3%...");
    engine.set_base_fee(&owner, "0.003".parse()?)?;
    println!("  base fee: {}", engine.base_fee());
    println!("  imbalance fee: {}", engine.imbalance_fee());

    // Quote before trading
    println!("\n=== Quotes ===");
    let quote = engine.quote_amount_out(&sushi, &yfi, units(10))?;
    println!("  rate:         {}", quote.exchange_rate);
    println!("  gross out:    {}", quote.gross_amount_out);
    println!("  fee fraction: {}", quote.fee_fraction);
    println!("  net out:      {}", quote.net_amount_out);

    let trader = AccountId::new("trader");
    ledger.mint(&sushi, &trader, units(20))?;
    ledger.approve(&sushi, &trader, &vault, Wad::MAX);

    println!("\n=== Swap Exact In ===");
    let received = engine.swap_in(&sushi, &yfi, units(10), &trader)?;
    println!("  paid 10 SUSHI, received {} YFI", received);

    println!("\n=== Swap Exact Out ===");
    let paid = engine.swap_exact_out(&sushi, &yfi, units(2), &trader)?;
    println!("  paid {} SUSHI, received 2 YFI", paid);

    println!("\n=== Oracle Outage ===");
    oracle.clear_price(&yfi_feed);
    match engine.swap_in(&sushi, &yfi, units(1), &trader) {
        Ok(_) => println!("  unexpected success"),
        Err(err) => println!("  rejected: {}", err),
    }

    println!("\n=== Final State ===");
    println!("  SUSHI pool: {}", engine.total_deposited(&sushi)?);
    println!("  YFI pool:   {}", engine.total_deposited(&yfi)?);
    println!("  trader SUSHI: {}", ledger.balance_of(&sushi, &trader));
    println!("  trader YFI:   {}", ledger.balance_of(&yfi, &trader));
    println!("  events recorded: {}", events.len());

    Ok(())
}
