// ============================================================================
// Token Ledger Interface
// Boundary contract for the fungible-token transfer mechanism
// ============================================================================

use crate::domain::{AccountId, TokenId, TransferError};
use crate::numeric::Wad;
use parking_lot::Mutex;
use std::collections::HashMap;

/// Fungible-token transfer capability used by the vault.
///
/// Mirrors the standard token surface: balances, direct transfers from the
/// caller, and allowance-checked transfers on an owner's behalf. Each call
/// either transfers the full amount or fails without effect.
pub trait TokenLedger: Send + Sync {
    /// Balance of `account` in `token`
    fn balance_of(&self, token: &TokenId, account: &AccountId) -> Wad;

    /// Move `amount` from `from` to `to` (sender-initiated)
    fn transfer(
        &self,
        token: &TokenId,
        from: &AccountId,
        to: &AccountId,
        amount: Wad,
    ) -> Result<(), TransferError>;

    /// Move `amount` from `owner` to `to`, consuming allowance granted to `spender`
    fn transfer_from(
        &self,
        token: &TokenId,
        spender: &AccountId,
        owner: &AccountId,
        to: &AccountId,
        amount: Wad,
    ) -> Result<(), TransferError>;
}

type BalanceKey = (TokenId, AccountId);
type AllowanceKey = (TokenId, AccountId, AccountId);

#[derive(Debug, Default)]
struct LedgerState {
    balances: HashMap<BalanceKey, Wad>,
    allowances: HashMap<AllowanceKey, Wad>,
}

impl LedgerState {
    fn balance(&self, token: &TokenId, account: &AccountId) -> Wad {
        self.balances
            .get(&(token.clone(), account.clone()))
            .copied()
            .unwrap_or(Wad::ZERO)
    }

    fn allowance(&self, token: &TokenId, owner: &AccountId, spender: &AccountId) -> Wad {
        self.allowances
            .get(&(token.clone(), owner.clone(), spender.clone()))
            .copied()
            .unwrap_or(Wad::ZERO)
    }

    fn move_balance(
        &mut self,
        token: &TokenId,
        from: &AccountId,
        to: &AccountId,
        amount: Wad,
    ) -> Result<(), TransferError> {
        let available = self.balance(token, from);
        let debited = available
            .checked_sub(amount)
            .map_err(|_| TransferError::InsufficientBalance {
                available,
                requested: amount,
            })?;

        if from == to {
            return Ok(());
        }

        let credited = self
            .balance(token, to)
            .checked_add(amount)
            .map_err(|_| TransferError::Overflow)?;

        self.balances.insert((token.clone(), from.clone()), debited);
        self.balances.insert((token.clone(), to.clone()), credited);
        Ok(())
    }
}

/// In-memory token ledger with balances and allowances
#[derive(Debug, Default)]
pub struct InMemoryTokenLedger {
    state: Mutex<LedgerState>,
}

impl InMemoryTokenLedger {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create `amount` of `token` out of thin air for `account`
    pub fn mint(&self, token: &TokenId, account: &AccountId, amount: Wad) -> Result<(), TransferError> {
        let mut state = self.state.lock();
        let balance = state
            .balance(token, account)
            .checked_add(amount)
            .map_err(|_| TransferError::Overflow)?;
        state.balances.insert((token.clone(), account.clone()), balance);
        Ok(())
    }

    /// Let `spender` move up to `amount` of the owner's `token`
    pub fn approve(&self, token: &TokenId, owner: &AccountId, spender: &AccountId, amount: Wad) {
        self.state
            .lock()
            .allowances
            .insert((token.clone(), owner.clone(), spender.clone()), amount);
    }

    /// Remaining allowance of `spender` over the owner's `token`
    pub fn allowance(&self, token: &TokenId, owner: &AccountId, spender: &AccountId) -> Wad {
        self.state.lock().allowance(token, owner, spender)
    }
}

impl TokenLedger for InMemoryTokenLedger {
    fn balance_of(&self, token: &TokenId, account: &AccountId) -> Wad {
        self.state.lock().balance(token, account)
    }

    fn transfer(
        &self,
        token: &TokenId,
        from: &AccountId,
        to: &AccountId,
        amount: Wad,
    ) -> Result<(), TransferError> {
        self.state.lock().move_balance(token, from, to, amount)
    }

    fn transfer_from(
        &self,
        token: &TokenId,
        spender: &AccountId,
        owner: &AccountId,
        to: &AccountId,
        amount: Wad,
    ) -> Result<(), TransferError> {
        let mut state = self.state.lock();

        let allowed = state.allowance(token, owner, spender);
        let remaining = allowed
            .checked_sub(amount)
            .map_err(|_| TransferError::InsufficientAllowance {
                allowed,
                requested: amount,
            })?;

        state.move_balance(token, owner, to, amount)?;
        state
            .allowances
            .insert((token.clone(), owner.clone(), spender.clone()), remaining);
        Ok(())
    }
}
