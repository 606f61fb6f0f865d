// ============================================================================
// Domain Models Module
// Contains all core domain entities and value objects
// ============================================================================

pub mod config;
pub mod errors;
pub mod fee_config;
pub mod share_pool;
pub mod swap;
pub mod token;

pub use config::ExchangeConfig;
pub use errors::{ExchangeError, ExchangeResult, OracleError, TransferError};
pub use fee_config::{
    FeeConfig, FeeKind, DEFAULT_BASE_FEE_RATE, DEFAULT_IMBALANCE_FEE_RATE, DEFAULT_IMBALANCE_UNIT,
};
pub use share_pool::{ShareAccount, SharePool};
pub use swap::{SwapKind, SwapQuote, SwapReceipt};
pub use token::{AccountId, OracleRef, SupportedToken, TokenId};
