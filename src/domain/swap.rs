// ============================================================================
// Swap Domain Model
// ============================================================================

use super::token::{AccountId, TokenId};
use crate::numeric::{NumericResult, Wad};
use chrono::{DateTime, Utc};
use uuid::Uuid;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Result of pricing a swap against the current oracle prices and fees.
/// Never persisted.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct SwapQuote {
    pub token_in: TokenId,
    pub token_out: TokenId,
    pub amount_in: Wad,
    /// `price(token_out) / price(token_in)` used for this quote
    pub exchange_rate: Wad,
    /// Output before fees: `amount_in * exchange_rate`
    pub gross_amount_out: Wad,
    /// Combined base + imbalance fee fraction
    pub fee_fraction: Wad,
    /// Output after fees
    pub net_amount_out: Wad,
}

impl SwapQuote {
    /// Amount withheld by the fee: `gross - net`.
    pub fn fee_amount(&self) -> NumericResult<Wad> {
        self.gross_amount_out.checked_sub(self.net_amount_out)
    }
}

/// Which side of the swap the trader fixed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum SwapKind {
    /// Trader fixed the input; output is whatever the quote yields
    ExactIn,
    /// Trader fixed the output; input was derived from the inverse quote
    ExactOut,
}

/// Record of a settled swap.
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct SwapReceipt {
    /// Unique swap identifier
    pub id: Uuid,

    pub trader: AccountId,

    pub kind: SwapKind,

    /// Quote the swap settled at
    pub quote: SwapQuote,

    /// Amount of `token_out` transferred to the trader. Equals the quote's
    /// net output for exact-in swaps and the requested output for exact-out.
    pub amount_paid_out: Wad,

    /// Settlement timestamp
    pub timestamp: DateTime<Utc>,
}

impl SwapReceipt {
    pub fn new(trader: AccountId, kind: SwapKind, quote: SwapQuote, amount_paid_out: Wad) -> Self {
        Self {
            id: Uuid::new_v4(),
            trader,
            kind,
            quote,
            amount_paid_out,
            timestamp: Utc::now(),
        }
    }

    pub fn amount_in(&self) -> Wad {
        self.quote.amount_in
    }
}
