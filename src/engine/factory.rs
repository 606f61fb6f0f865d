// ============================================================================
// Exchange Factory
// Creates exchange engines with proper configuration
// ============================================================================

use crate::domain::{
    AccountId, ExchangeConfig, ExchangeResult, FeeConfig, OracleRef, SupportedToken, TokenId,
};
use crate::engine::{ExchangeEngine, FeeModel, Vault};
use crate::interfaces::{
    Authorizer, DefaultSharePoolFactory, EventHandler, NoOpEventHandler, OwnerAuthorizer,
    PriceOracle, SharePoolFactory, TokenLedger,
};
use crate::numeric::Wad;
use rust_decimal::Decimal;
use std::sync::Arc;

// ============================================================================
// External Collaborators
// ============================================================================

/// Capabilities the engine consumes from its host
#[derive(Clone)]
pub struct ExchangeServices {
    pub oracle: Arc<dyn PriceOracle>,
    pub ledger: Arc<dyn TokenLedger>,
    pub event_handler: Arc<dyn EventHandler>,
    pub pool_factory: Arc<dyn SharePoolFactory>,
    /// Overrides the default single-owner check against `ExchangeConfig::admin`
    pub authorizer: Option<Arc<dyn Authorizer>>,
}

impl ExchangeServices {
    /// Oracle and ledger with no-op events and default share pools
    pub fn new(oracle: Arc<dyn PriceOracle>, ledger: Arc<dyn TokenLedger>) -> Self {
        Self {
            oracle,
            ledger,
            event_handler: Arc::new(NoOpEventHandler),
            pool_factory: Arc::new(DefaultSharePoolFactory),
            authorizer: None,
        }
    }

    pub fn with_event_handler(mut self, event_handler: Arc<dyn EventHandler>) -> Self {
        self.event_handler = event_handler;
        self
    }

    pub fn with_pool_factory(mut self, pool_factory: Arc<dyn SharePoolFactory>) -> Self {
        self.pool_factory = pool_factory;
        self
    }

    pub fn with_authorizer(mut self, authorizer: Arc<dyn Authorizer>) -> Self {
        self.authorizer = Some(authorizer);
        self
    }
}

// ============================================================================
// Factory Functions
// ============================================================================

/// Creates an exchange engine from configuration
///
/// Validates the configuration, wires the collaborators and lists every
/// configured token in order.
///
/// # Example
/// ```
/// use oracle_swap::prelude::*;
/// use oracle_swap::engine::factory::{create_from_config, ExchangeServices};
/// use std::sync::Arc;
///
/// let config = ExchangeConfig::zero_fee(AccountId::new("owner"), AccountId::new("vault"));
/// let services = ExchangeServices::new(
///     Arc::new(StaticPriceOracle::new()),
///     Arc::new(InMemoryTokenLedger::new()),
/// );
/// let engine = create_from_config(config, services).unwrap();
/// assert!(engine.supported_tokens().is_empty());
/// ```
pub fn create_from_config(
    config: ExchangeConfig,
    services: ExchangeServices,
) -> ExchangeResult<ExchangeEngine> {
    config.validate()?;

    let fees = FeeModel::new(config.fees, config.imbalance_unit)?;
    let vault = Vault::new(config.custody_account.clone(), services.ledger);
    let authorizer: Arc<dyn Authorizer> = match services.authorizer {
        Some(authorizer) => authorizer,
        None => Arc::new(OwnerAuthorizer::new(config.admin.clone())),
    };

    let engine = ExchangeEngine::new(
        fees,
        vault,
        services.oracle,
        authorizer,
        services.event_handler,
    )
    .with_pool_factory(services.pool_factory);

    for token in config.tokens {
        engine.add_supported_token(token.id, token.display_name, token.symbol, token.oracle)?;
    }

    tracing::info!(
        "Exchange created with {} tokens, base fee {}, imbalance fee {}",
        engine.supported_tokens().len(),
        engine.base_fee(),
        engine.imbalance_fee()
    );
    Ok(engine)
}

// ============================================================================
// Builder Pattern for Advanced Configuration
// ============================================================================

/// Builder for creating exchange engines with fluent API
///
/// # Example
/// ```
/// use oracle_swap::prelude::*;
/// use oracle_swap::engine::factory::{ExchangeEngineBuilder, ExchangeServices};
/// use std::sync::Arc;
///
/// let oracle = StaticPriceOracle::new()
///     .with_price(OracleRef::new("sushi-usd"), "1.25".parse().unwrap());
/// let engine = ExchangeEngineBuilder::new("owner", "vault")
///     .with_base_fee("0.003".parse().unwrap())
///     .with_token("SUSHI", "Sakura Sushi", "sakSUSHI", "sushi-usd")
///     .build(ExchangeServices::new(
///         Arc::new(oracle),
///         Arc::new(InMemoryTokenLedger::new()),
///     ))
///     .unwrap();
///
/// assert_eq!(engine.supported_tokens(), vec![TokenId::new("SUSHI")]);
/// ```
pub struct ExchangeEngineBuilder {
    config: ExchangeConfig,
}

impl ExchangeEngineBuilder {
    /// Create a builder with default fees
    pub fn new(admin: impl Into<String>, custody_account: impl Into<String>) -> Self {
        Self {
            config: ExchangeConfig::new(
                AccountId::new(admin),
                AccountId::new(custody_account),
            ),
        }
    }

    // ========================================================================
    // Fee Configuration
    // ========================================================================

    pub fn with_fees(mut self, fees: FeeConfig) -> Self {
        self.config.fees = fees;
        self
    }

    pub fn with_base_fee(mut self, rate: Wad) -> Self {
        self.config.fees.base_fee_rate = rate;
        self
    }

    pub fn with_imbalance_fee(mut self, rate: Wad) -> Self {
        self.config.fees.imbalance_fee_rate = rate;
        self
    }

    /// Set both fee rates from decimals, e.g. `Decimal::new(3, 3)` for 0.3%
    pub fn with_decimal_fees(mut self, base: Decimal, imbalance: Decimal) -> ExchangeResult<Self> {
        self.config.fees = FeeConfig::new(Wad::from_decimal(base)?, Wad::from_decimal(imbalance)?);
        Ok(self)
    }

    pub fn without_fees(self) -> Self {
        self.with_fees(FeeConfig::zero())
    }

    pub fn with_imbalance_unit(mut self, unit: Wad) -> Self {
        self.config.imbalance_unit = unit;
        self
    }

    // ========================================================================
    // Token Listings
    // ========================================================================

    /// List a token at creation
    pub fn with_token(
        mut self,
        id: impl Into<String>,
        display_name: impl Into<String>,
        symbol: impl Into<String>,
        oracle: impl Into<String>,
    ) -> Self {
        self.config.tokens.push(SupportedToken::new(
            TokenId::new(id),
            display_name,
            symbol,
            OracleRef::new(oracle),
        ));
        self
    }

    // ========================================================================
    // Build
    // ========================================================================

    /// Build the exchange engine
    pub fn build(self, services: ExchangeServices) -> ExchangeResult<ExchangeEngine> {
        create_from_config(self.config, services)
    }

    /// Get the configuration without building (for inspection)
    pub fn get_config(&self) -> &ExchangeConfig {
        &self.config
    }
}
