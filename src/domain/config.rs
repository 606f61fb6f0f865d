// ============================================================================
// Exchange Configuration
// Declarative configuration for creating an exchange engine
// ============================================================================

use super::errors::{ExchangeError, ExchangeResult};
use super::fee_config::{FeeConfig, DEFAULT_IMBALANCE_UNIT};
use super::token::{AccountId, SupportedToken};
use crate::numeric::Wad;
use std::collections::HashSet;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Configuration for creating an exchange engine
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct ExchangeConfig {
    /// Account allowed to change fee rates
    pub admin: AccountId,

    /// Account holding the underlying tokens in the token ledger
    pub custody_account: AccountId,

    /// Initial fee rates
    pub fees: FeeConfig,

    /// Gross output size at which the imbalance fee equals its configured rate
    pub imbalance_unit: Wad,

    /// Tokens registered when the engine is created, in listing order
    pub tokens: Vec<SupportedToken>,
}

impl ExchangeConfig {
    /// Create a new configuration with default fees and no tokens
    pub fn new(admin: AccountId, custody_account: AccountId) -> Self {
        Self {
            admin,
            custody_account,
            fees: FeeConfig::default(),
            imbalance_unit: DEFAULT_IMBALANCE_UNIT,
            tokens: Vec::new(),
        }
    }

    /// Builder method: Replace both fee rates
    pub fn with_fees(mut self, fees: FeeConfig) -> Self {
        self.fees = fees;
        self
    }

    /// Builder method: Set the base fee rate
    pub fn with_base_fee(mut self, rate: Wad) -> Self {
        self.fees.base_fee_rate = rate;
        self
    }

    /// Builder method: Set the imbalance fee rate
    pub fn with_imbalance_fee(mut self, rate: Wad) -> Self {
        self.fees.imbalance_fee_rate = rate;
        self
    }

    /// Builder method: Set the imbalance reference unit
    pub fn with_imbalance_unit(mut self, unit: Wad) -> Self {
        self.imbalance_unit = unit;
        self
    }

    /// Builder method: List a token at creation
    pub fn with_token(mut self, token: SupportedToken) -> Self {
        self.tokens.push(token);
        self
    }

    /// Validate the configuration
    pub fn validate(&self) -> ExchangeResult<()> {
        if self.admin.as_str().is_empty() {
            return Err(ExchangeError::InvalidConfig(
                "Admin account cannot be empty".to_string(),
            ));
        }

        if self.custody_account.as_str().is_empty() {
            return Err(ExchangeError::InvalidConfig(
                "Custody account cannot be empty".to_string(),
            ));
        }

        if self.imbalance_unit.is_zero() {
            return Err(ExchangeError::InvalidConfig(
                "Imbalance unit must be positive".to_string(),
            ));
        }

        self.fees.validate()?;

        let mut seen = HashSet::new();
        for token in &self.tokens {
            if !seen.insert(&token.id) {
                return Err(ExchangeError::DuplicateToken(token.id.clone()));
            }
        }

        Ok(())
    }
}

// ============================================================================
// Preset Configurations (Factory Methods)
// ============================================================================

impl ExchangeConfig {
    /// Fee-free exchange: net output equals `amount_in * rate`
    pub fn zero_fee(admin: AccountId, custody_account: AccountId) -> Self {
        Self::new(admin, custody_account).with_fees(FeeConfig::zero())
    }

    /// Flat fee only, no size-dependent component
    pub fn flat_fee(admin: AccountId, custody_account: AccountId, base_fee_rate: Wad) -> Self {
        Self::new(admin, custody_account).with_fees(FeeConfig::new(base_fee_rate, Wad::ZERO))
    }
}
