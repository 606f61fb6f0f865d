// ============================================================================
// Share Pool Domain Model
// Custody totals and 1:1 liquidity-share balances for one token
// ============================================================================

use super::errors::{ExchangeError, ExchangeResult};
use super::token::{AccountId, TokenId};
use crate::numeric::Wad;
use std::collections::HashMap;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// A holder's share balance for one token.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct ShareAccount {
    pub token: TokenId,
    pub holder: AccountId,
    pub balance: Wad,
}

/// Liquidity pool of a single supported token.
///
/// Shares are minted 1:1 against deposits, so `total_shares` always equals
/// `total_deposited`. Swap legs move both totals together without touching
/// any holder account; holder balances change only on deposit and withdraw.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct SharePool {
    /// Underlying token held in custody
    pub token: TokenId,
    /// Name of the share token (e.g. "Sakura Sushi")
    pub name: String,
    /// Symbol of the share token (e.g. "sakSUSHI")
    pub symbol: String,

    total_deposited: Wad,
    total_shares: Wad,
    accounts: HashMap<AccountId, Wad>,
}

impl SharePool {
    /// Create an empty pool.
    pub fn new(token: TokenId, name: impl Into<String>, symbol: impl Into<String>) -> Self {
        Self {
            token,
            name: name.into(),
            symbol: symbol.into(),
            total_deposited: Wad::ZERO,
            total_shares: Wad::ZERO,
            accounts: HashMap::new(),
        }
    }

    // ========================================================================
    // Queries
    // ========================================================================

    pub fn total_deposited(&self) -> Wad {
        self.total_deposited
    }

    pub fn total_shares(&self) -> Wad {
        self.total_shares
    }

    /// Share balance of `holder`; zero if the holder never deposited.
    pub fn balance_of(&self, holder: &AccountId) -> Wad {
        self.accounts.get(holder).copied().unwrap_or(Wad::ZERO)
    }

    /// Number of holders with an account in this pool.
    pub fn holder_count(&self) -> usize {
        self.accounts.len()
    }

    /// Snapshot of every share account, ordered by holder.
    pub fn accounts(&self) -> Vec<ShareAccount> {
        let mut accounts: Vec<ShareAccount> = self
            .accounts
            .iter()
            .map(|(holder, balance)| ShareAccount {
                token: self.token.clone(),
                holder: holder.clone(),
                balance: *balance,
            })
            .collect();
        accounts.sort_by(|a, b| a.holder.cmp(&b.holder));
        accounts
    }

    /// Fails with `InsufficientLiquidity` unless the pool can pay `amount`.
    pub fn ensure_liquidity(&self, amount: Wad) -> ExchangeResult<()> {
        if self.total_deposited < amount {
            return Err(ExchangeError::InsufficientLiquidity {
                token: self.token.clone(),
                available: self.total_deposited,
                requested: amount,
            });
        }
        Ok(())
    }

    // ========================================================================
    // Mutations (validate first, then write)
    // ========================================================================

    /// Increase both pool totals (swap input leg).
    pub fn add_liquidity(&mut self, amount: Wad) -> ExchangeResult<()> {
        let deposited = self.total_deposited.checked_add(amount)?;
        let shares = self.total_shares.checked_add(amount)?;
        self.total_deposited = deposited;
        self.total_shares = shares;
        Ok(())
    }

    /// Decrease both pool totals (swap output leg).
    pub fn remove_liquidity(&mut self, amount: Wad) -> ExchangeResult<()> {
        self.ensure_liquidity(amount)?;
        let shares = self.total_shares.checked_sub(amount)?;
        self.total_deposited = self.total_deposited.checked_sub(amount)?;
        self.total_shares = shares;
        Ok(())
    }

    /// Credit a deposit: pool totals and the holder's balance grow by `amount`.
    pub fn mint(&mut self, holder: &AccountId, amount: Wad) -> ExchangeResult<()> {
        let balance = self.balance_of(holder).checked_add(amount)?;
        self.add_liquidity(amount)?;
        self.accounts.insert(holder.clone(), balance);
        Ok(())
    }

    /// Burn `amount` shares of `holder` and release the same amount of liquidity.
    pub fn burn(&mut self, holder: &AccountId, amount: Wad) -> ExchangeResult<()> {
        let available = self.balance_of(holder);
        if available < amount {
            return Err(ExchangeError::InsufficientShares {
                token: self.token.clone(),
                available,
                requested: amount,
            });
        }
        self.remove_liquidity(amount)?;
        self.accounts.insert(holder.clone(), available.checked_sub(amount)?);
        Ok(())
    }
}
