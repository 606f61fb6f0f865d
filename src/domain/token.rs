// ============================================================================
// Token Domain Model
// ============================================================================

use std::fmt;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

// ============================================================================
// Value Objects
// ============================================================================

/// Identifier of an underlying fungible token (e.g. its contract address).
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct TokenId(String);

impl TokenId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for TokenId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for TokenId {
    fn from(id: &str) -> Self {
        Self::new(id)
    }
}

/// Identifier of a ledger account: a depositor, trader, admin or the
/// engine's own custody account.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct AccountId(String);

impl AccountId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for AccountId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for AccountId {
    fn from(id: &str) -> Self {
        Self::new(id)
    }
}

/// Reference to the price feed that quotes a token.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct OracleRef(String);

impl OracleRef {
    pub fn new(feed: impl Into<String>) -> Self {
        Self(feed.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for OracleRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for OracleRef {
    fn from(feed: &str) -> Self {
        Self::new(feed)
    }
}

// ============================================================================
// Supported Token
// ============================================================================

/// A token accepted by the exchange.
///
/// `display_name` and `symbol` name the token's share pool (for underlying
/// SUSHI: "Sakura Sushi" / "sakSUSHI"). Immutable once registered.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct SupportedToken {
    pub id: TokenId,
    pub display_name: String,
    pub symbol: String,
    pub oracle: OracleRef,
}

impl SupportedToken {
    pub fn new(
        id: TokenId,
        display_name: impl Into<String>,
        symbol: impl Into<String>,
        oracle: OracleRef,
    ) -> Self {
        Self {
            id,
            display_name: display_name.into(),
            symbol: symbol.into(),
            oracle,
        }
    }
}
