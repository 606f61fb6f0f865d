// ============================================================================
// Interfaces Module
// Contains all trait definitions and collaborator contracts
// ============================================================================

mod authorization;
mod event_handler;
mod price_oracle;
mod share_pool_factory;
mod token_ledger;

pub use authorization::{Authorizer, OwnerAuthorizer};
pub use event_handler::{
    EventHandler, ExchangeEvent, LoggingEventHandler, NoOpEventHandler, RecordingEventHandler,
};
pub use price_oracle::{PriceOracle, StaticPriceOracle};
pub use share_pool_factory::{DefaultSharePoolFactory, SharePoolFactory};
pub use token_ledger::{InMemoryTokenLedger, TokenLedger};
