// ============================================================================
// Engine Module
// Contains the core exchange business logic
// ============================================================================

mod exchange_engine;
mod fee_model;
mod registry;
mod vault;

#[cfg(test)]
mod proptest_properties;

pub mod factory;

pub use exchange_engine::ExchangeEngine;
pub use factory::{create_from_config, ExchangeEngineBuilder, ExchangeServices};
pub use fee_model::FeeModel;
pub use registry::TokenRegistry;
pub use vault::Vault;
