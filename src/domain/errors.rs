// ============================================================================
// Exchange Errors
// Failure taxonomy for registry, vault, fee and swap operations
// ============================================================================

use super::token::{AccountId, TokenId};
use crate::numeric::{NumericError, Wad};
use std::fmt;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Failures reported by a [`TokenLedger`](crate::interfaces::TokenLedger).
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum TransferError {
    /// Sender does not hold enough of the token
    InsufficientBalance { available: Wad, requested: Wad },
    /// Spender was not granted enough allowance by the owner
    InsufficientAllowance { allowed: Wad, requested: Wad },
    /// Recipient balance would overflow
    Overflow,
}

impl fmt::Display for TransferError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TransferError::InsufficientBalance {
                available,
                requested,
            } => write!(
                f,
                "insufficient balance: available {}, requested {}",
                available, requested
            ),
            TransferError::InsufficientAllowance { allowed, requested } => write!(
                f,
                "insufficient allowance: allowed {}, requested {}",
                allowed, requested
            ),
            TransferError::Overflow => write!(f, "recipient balance overflow"),
        }
    }
}

impl std::error::Error for TransferError {}

/// Failures reported by a [`PriceOracle`](crate::interfaces::PriceOracle).
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum OracleError {
    /// No price is published for the feed
    FeedNotFound,
    /// Feed answered with an unusable price (zero)
    InvalidPrice,
}

impl fmt::Display for OracleError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OracleError::FeedNotFound => write!(f, "price feed not found"),
            OracleError::InvalidPrice => write!(f, "price feed returned an invalid price"),
        }
    }
}

impl std::error::Error for OracleError {}

/// Errors returned by exchange operations.
///
/// Every failing operation leaves registry, vault and fee state exactly as
/// it was before the call.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum ExchangeError {
    /// Token is not registered
    TokenNotSupported(TokenId),
    /// Token is already registered
    DuplicateToken(TokenId),
    /// Amount must be strictly positive
    InvalidAmount,
    /// Pool cannot pay out the requested amount
    InsufficientLiquidity {
        token: TokenId,
        available: Wad,
        requested: Wad,
    },
    /// Holder does not own enough shares to withdraw
    InsufficientShares {
        token: TokenId,
        available: Wad,
        requested: Wad,
    },
    /// Fee rate out of range, or effective fee fraction reached 100%
    InvalidFeeConfig { fee_fraction: Wad },
    /// Caller lacks the admin capability
    Unauthorized(AccountId),
    /// Configuration write would not change the stored value
    NoOpUpdate,
    /// Price feed for the token could not be read
    OracleUnavailable { token: TokenId, reason: OracleError },
    /// Both legs of the swap name the same token
    SameToken(TokenId),
    /// External token transfer was refused
    TransferFailed { token: TokenId, reason: TransferError },
    /// Engine configuration is invalid
    InvalidConfig(String),
    /// Fixed-point arithmetic failed
    Arithmetic(NumericError),
}

impl fmt::Display for ExchangeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ExchangeError::TokenNotSupported(token) => write!(f, "token not supported: {}", token),
            ExchangeError::DuplicateToken(token) => {
                write!(f, "token already supported: {}", token)
            },
            ExchangeError::InvalidAmount => write!(f, "amount must be positive"),
            ExchangeError::InsufficientLiquidity {
                token,
                available,
                requested,
            } => write!(
                f,
                "insufficient liquidity for {}: available {}, requested {}",
                token, available, requested
            ),
            ExchangeError::InsufficientShares {
                token,
                available,
                requested,
            } => write!(
                f,
                "insufficient shares of {}: available {}, requested {}",
                token, available, requested
            ),
            ExchangeError::InvalidFeeConfig { fee_fraction } => {
                write!(f, "invalid fee configuration: fee fraction {}", fee_fraction)
            },
            ExchangeError::Unauthorized(caller) => write!(f, "unauthorized caller: {}", caller),
            ExchangeError::NoOpUpdate => write!(f, "update does not change the stored value"),
            ExchangeError::OracleUnavailable { token, reason } => {
                write!(f, "oracle unavailable for {}: {}", token, reason)
            },
            ExchangeError::SameToken(token) => write!(f, "cannot swap {} for itself", token),
            ExchangeError::TransferFailed { token, reason } => {
                write!(f, "transfer of {} failed: {}", token, reason)
            },
            ExchangeError::InvalidConfig(reason) => write!(f, "invalid configuration: {}", reason),
            ExchangeError::Arithmetic(err) => write!(f, "{}", err),
        }
    }
}

impl std::error::Error for ExchangeError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ExchangeError::OracleUnavailable { reason, .. } => Some(reason),
            ExchangeError::TransferFailed { reason, .. } => Some(reason),
            ExchangeError::Arithmetic(err) => Some(err),
            _ => None,
        }
    }
}

impl From<NumericError> for ExchangeError {
    fn from(err: NumericError) -> Self {
        ExchangeError::Arithmetic(err)
    }
}

/// Result type alias for exchange operations
pub type ExchangeResult<T> = Result<T, ExchangeError>;
