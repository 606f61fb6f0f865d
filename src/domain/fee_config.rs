// ============================================================================
// Fee Configuration
// ============================================================================

use super::errors::{ExchangeError, ExchangeResult};
use crate::numeric::Wad;
use std::fmt;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Default base fee: 0.1% of gross output
pub const DEFAULT_BASE_FEE_RATE: Wad = Wad::from_raw(1_000_000_000_000_000);

/// Default imbalance fee: 0.05% of gross output per reference unit traded
pub const DEFAULT_IMBALANCE_FEE_RATE: Wad = Wad::from_raw(500_000_000_000_000);

/// Reference output size of the imbalance fee: 100 whole units
pub const DEFAULT_IMBALANCE_UNIT: Wad = Wad::from_raw(100 * Wad::SCALE);

/// Which component of the fee curve an update targets
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum FeeKind {
    /// Flat fraction charged on every swap
    Base,
    /// Fraction charged per reference unit of gross output
    Imbalance,
}

impl fmt::Display for FeeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FeeKind::Base => write!(f, "base"),
            FeeKind::Imbalance => write!(f, "imbalance"),
        }
    }
}

/// Snapshot of the two configurable fee rates.
///
/// The base rate must stay below 1. The imbalance rate is unbounded here;
/// the combined fraction is checked per swap because it grows with size.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct FeeConfig {
    pub base_fee_rate: Wad,
    pub imbalance_fee_rate: Wad,
}

impl FeeConfig {
    pub fn new(base_fee_rate: Wad, imbalance_fee_rate: Wad) -> Self {
        Self {
            base_fee_rate,
            imbalance_fee_rate,
        }
    }

    /// No fee at all: net output equals gross output.
    pub fn zero() -> Self {
        Self::new(Wad::ZERO, Wad::ZERO)
    }

    pub fn rate(&self, kind: FeeKind) -> Wad {
        match kind {
            FeeKind::Base => self.base_fee_rate,
            FeeKind::Imbalance => self.imbalance_fee_rate,
        }
    }

    pub fn validate(&self) -> ExchangeResult<()> {
        if self.base_fee_rate >= Wad::ONE {
            return Err(ExchangeError::InvalidFeeConfig {
                fee_fraction: self.base_fee_rate,
            });
        }
        Ok(())
    }
}

impl Default for FeeConfig {
    fn default() -> Self {
        Self::new(DEFAULT_BASE_FEE_RATE, DEFAULT_IMBALANCE_FEE_RATE)
    }
}
