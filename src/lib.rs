// ============================================================================
// Oracle Swap Library
// Oracle-priced token swaps settled against per-token share pools
// ============================================================================

//! # Oracle Swap
//!
//! A settlement engine that swaps tokens at oracle-derived exchange rates,
//! backed by per-token liquidity pools.
//!
//! ## Features
//!
//! - **Oracle pricing**: `rate = price(token_out) / price(token_in)`
//! - **Two-part fee curve**: a flat base rate plus an imbalance rate that
//!   grows with trade size
//! - **Share accounting**: deposits mint pool shares 1:1
//! - **18-decimal fixed point** with 256-bit intermediates
//! - **All-or-nothing operations**: a rejected call leaves no trace
//!
//! ## Example
//!
//! ```rust
//! use oracle_swap::prelude::*;
//! use std::sync::Arc;
//!
//! let oracle = StaticPriceOracle::new()
//!     .with_price(OracleRef::new("sushi-usd"), "4".parse().unwrap())
//!     .with_price(OracleRef::new("yfi-usd"), "1".parse().unwrap());
//! let ledger = Arc::new(InMemoryTokenLedger::new());
//!
//! let engine = ExchangeEngineBuilder::new("owner", "vault")
//!     .with_token("SUSHI", "Sakura Sushi", "sakSUSHI", "sushi-usd")
//!     .with_token("YFI", "Sakura YFI", "sakYFI", "yfi-usd")
//!     .build(ExchangeServices::new(Arc::new(oracle), ledger.clone()))
//!     .unwrap();
//!
//! let (sushi, yfi) = (TokenId::new("SUSHI"), TokenId::new("YFI"));
//! let vault = engine.custody_account();
//!
//! // Seed the YFI pool
//! let lp = AccountId::new("lp");
//! ledger.mint(&yfi, &lp, Wad::from_integer(100).unwrap()).unwrap();
//! ledger.approve(&yfi, &lp, &vault, Wad::MAX);
//! engine.deposit(&yfi, Wad::from_integer(100).unwrap(), &lp).unwrap();
//!
//! // Trader quotes and swaps
//! let trader = AccountId::new("trader");
//! ledger.mint(&sushi, &trader, Wad::from_integer(10).unwrap()).unwrap();
//! ledger.approve(&sushi, &trader, &vault, Wad::MAX);
//!
//! let quoted = engine.get_amount_out(&sushi, &yfi, Wad::from_integer(10).unwrap()).unwrap();
//! let received = engine.swap_in(&sushi, &yfi, Wad::from_integer(10).unwrap(), &trader).unwrap();
//! assert_eq!(quoted, received);
//! println!("Received {} YFI", received);
//! ```

pub mod domain;
pub mod engine;
pub mod interfaces;
pub mod numeric;

// Re-exports for convenience
pub mod prelude {
    pub use crate::domain::{
        AccountId, ExchangeConfig, ExchangeError, ExchangeResult, FeeConfig, FeeKind, OracleRef,
        SharePool, SupportedToken, SwapKind, SwapQuote, SwapReceipt, TokenId,
    };
    pub use crate::engine::{
        create_from_config, ExchangeEngine, ExchangeEngineBuilder, ExchangeServices,
    };
    pub use crate::interfaces::{
        EventHandler, ExchangeEvent, InMemoryTokenLedger, LoggingEventHandler, NoOpEventHandler,
        PriceOracle, RecordingEventHandler, StaticPriceOracle, TokenLedger,
    };
    pub use crate::numeric::Wad;
}
