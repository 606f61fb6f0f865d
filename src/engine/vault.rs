// ============================================================================
// Vault
// Custody of underlying tokens and the per-token share ledger
// ============================================================================

use crate::domain::{AccountId, ExchangeError, ExchangeResult, SharePool, TokenId};
use crate::interfaces::TokenLedger;
use crate::numeric::Wad;
use std::collections::HashMap;
use std::sync::Arc;

/// Holds every share pool and moves underlying tokens through the external
/// token ledger.
///
/// Each operation validates against the pools first, then performs the
/// external transfer(s), and only then writes the pools. A refused transfer
/// therefore leaves the share ledger untouched.
pub struct Vault {
    /// Account holding custody balances in the token ledger
    custody: AccountId,

    ledger: Arc<dyn TokenLedger>,

    pools: HashMap<TokenId, SharePool>,
}

impl Vault {
    pub fn new(custody: AccountId, ledger: Arc<dyn TokenLedger>) -> Self {
        Self {
            custody,
            ledger,
            pools: HashMap::new(),
        }
    }

    pub fn custody_account(&self) -> &AccountId {
        &self.custody
    }

    pub fn ledger(&self) -> &Arc<dyn TokenLedger> {
        &self.ledger
    }

    /// Install the share pool of a newly registered token
    pub fn open_pool(&mut self, pool: SharePool) -> ExchangeResult<()> {
        if self.pools.contains_key(&pool.token) {
            return Err(ExchangeError::DuplicateToken(pool.token));
        }
        self.pools.insert(pool.token.clone(), pool);
        Ok(())
    }

    pub fn has_pool(&self, token: &TokenId) -> bool {
        self.pools.contains_key(token)
    }

    pub fn pool(&self, token: &TokenId) -> ExchangeResult<&SharePool> {
        self.pools
            .get(token)
            .ok_or_else(|| ExchangeError::TokenNotSupported(token.clone()))
    }

    fn pool_mut(&mut self, token: &TokenId) -> ExchangeResult<&mut SharePool> {
        self.pools
            .get_mut(token)
            .ok_or_else(|| ExchangeError::TokenNotSupported(token.clone()))
    }

    pub fn total_deposited(&self, token: &TokenId) -> ExchangeResult<Wad> {
        self.pool(token).map(SharePool::total_deposited)
    }

    pub fn share_balance(&self, token: &TokenId, holder: &AccountId) -> ExchangeResult<Wad> {
        self.pool(token).map(|pool| pool.balance_of(holder))
    }

    // ========================================================================
    // Liquidity Provision
    // ========================================================================

    /// Pull `amount` from the depositor into custody and mint shares 1:1.
    pub fn deposit(
        &mut self,
        token: &TokenId,
        amount: Wad,
        depositor: &AccountId,
    ) -> ExchangeResult<()> {
        let pool = self.pool(token)?;
        if amount.is_zero() {
            return Err(ExchangeError::InvalidAmount);
        }
        // Holder balances never exceed the pool total, so this bounds mint().
        pool.total_deposited().checked_add(amount)?;

        self.pull_from(token, depositor, amount)?;
        self.pool_mut(token)?.mint(depositor, amount)
    }

    /// Burn `amount` of the holder's shares and return the underlying.
    ///
    /// Served first-come against the pool's current total, which swaps move
    /// independently of share balances. A pool below its outstanding shares
    /// fails the late holders with `InsufficientLiquidity`; swap surplus above
    /// them has no shares and stays in custody.
    pub fn withdraw(
        &mut self,
        token: &TokenId,
        amount: Wad,
        holder: &AccountId,
    ) -> ExchangeResult<()> {
        let pool = self.pool(token)?;
        if amount.is_zero() {
            return Err(ExchangeError::InvalidAmount);
        }
        let shares = pool.balance_of(holder);
        if shares < amount {
            return Err(ExchangeError::InsufficientShares {
                token: token.clone(),
                available: shares,
                requested: amount,
            });
        }
        pool.ensure_liquidity(amount)?;

        self.send_to(token, holder, amount)?;
        self.pool_mut(token)?.burn(holder, amount)
    }

    // ========================================================================
    // Swap Legs
    // ========================================================================

    /// Credit-side leg: pull `amount` from `payer` and grow the pool.
    pub fn pull_in(&mut self, token: &TokenId, amount: Wad, payer: &AccountId) -> ExchangeResult<()> {
        self.pool(token)?.total_deposited().checked_add(amount)?;

        self.pull_from(token, payer, amount)?;
        self.pool_mut(token)?.add_liquidity(amount)
    }

    /// Debit-side leg: shrink the pool and send `amount` to `recipient`.
    pub fn pay_out(
        &mut self,
        token: &TokenId,
        amount: Wad,
        recipient: &AccountId,
    ) -> ExchangeResult<()> {
        self.pool(token)?.ensure_liquidity(amount)?;

        self.send_to(token, recipient, amount)?;
        self.pool_mut(token)?.remove_liquidity(amount)
    }

    /// Both legs of a swap as one unit: pull `amount_in` of `token_in`, pay
    /// `amount_out` of `token_out`.
    ///
    /// Liquidity is checked before anything moves. If the payout transfer is
    /// refused after the input was pulled, the input is refunded and no pool
    /// changes.
    pub fn settle_swap(
        &mut self,
        token_in: &TokenId,
        amount_in: Wad,
        token_out: &TokenId,
        amount_out: Wad,
        trader: &AccountId,
    ) -> ExchangeResult<()> {
        if token_in == token_out {
            return Err(ExchangeError::SameToken(token_in.clone()));
        }
        self.pool(token_in)?.total_deposited().checked_add(amount_in)?;
        self.pool(token_out)?.ensure_liquidity(amount_out)?;

        self.pull_from(token_in, trader, amount_in)?;

        if let Err(err) = self.send_to(token_out, trader, amount_out) {
            if let Err(refund) = self.send_to(token_in, trader, amount_in) {
                tracing::error!(
                    "Refund of {} {} to {} failed after payout error: {}",
                    amount_in,
                    token_in,
                    trader,
                    refund
                );
            } else {
                tracing::warn!(
                    "Payout of {} {} to {} refused, input refunded: {}",
                    amount_out,
                    token_out,
                    trader,
                    err
                );
            }
            return Err(err);
        }

        self.pool_mut(token_in)?.add_liquidity(amount_in)?;
        self.pool_mut(token_out)?.remove_liquidity(amount_out)
    }

    // ========================================================================
    // Private methods
    // ========================================================================

    fn pull_from(&self, token: &TokenId, owner: &AccountId, amount: Wad) -> ExchangeResult<()> {
        self.ledger
            .transfer_from(token, &self.custody, owner, &self.custody, amount)
            .map_err(|reason| ExchangeError::TransferFailed {
                token: token.clone(),
                reason,
            })
    }

    fn send_to(&self, token: &TokenId, recipient: &AccountId, amount: Wad) -> ExchangeResult<()> {
        self.ledger
            .transfer(token, &self.custody, recipient, amount)
            .map_err(|reason| ExchangeError::TransferFailed {
                token: token.clone(),
                reason,
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::TransferError;
    use crate::interfaces::InMemoryTokenLedger;

    fn units(n: u128) -> Wad {
        Wad::from_integer(n).unwrap()
    }

    struct Fixture {
        ledger: Arc<InMemoryTokenLedger>,
        vault: Vault,
        sushi: TokenId,
        yfi: TokenId,
        custody: AccountId,
    }

    fn fixture() -> Fixture {
        let ledger = Arc::new(InMemoryTokenLedger::new());
        let custody = AccountId::new("vault");
        let mut vault = Vault::new(custody.clone(), ledger.clone());
        let sushi = TokenId::new("SUSHI");
        let yfi = TokenId::new("YFI");
        vault
            .open_pool(SharePool::new(sushi.clone(), "Sakura Sushi", "sakSUSHI"))
            .unwrap();
        vault
            .open_pool(SharePool::new(yfi.clone(), "Sakura YFI", "sakYFI"))
            .unwrap();
        Fixture {
            ledger,
            vault,
            sushi,
            yfi,
            custody,
        }
    }

    fn fund(f: &Fixture, token: &TokenId, account: &AccountId, amount: Wad) {
        f.ledger.mint(token, account, amount).unwrap();
        f.ledger.approve(token, account, &f.custody, units(100_000_000));
    }

    #[test]
    fn test_open_pool_twice_fails() {
        let mut f = fixture();
        let err = f
            .vault
            .open_pool(SharePool::new(f.sushi.clone(), "x", "y"))
            .unwrap_err();
        assert_eq!(err, ExchangeError::DuplicateToken(f.sushi.clone()));
        assert_eq!(f.vault.pool(&f.sushi).unwrap().name, "Sakura Sushi");
    }

    #[test]
    fn test_deposit_moves_tokens_and_mints_shares() {
        let mut f = fixture();
        let owner = AccountId::new("sushi_owner");
        fund(&f, &f.sushi, &owner, units(1_000));

        f.vault.deposit(&f.sushi, units(100), &owner).unwrap();

        assert_eq!(f.ledger.balance_of(&f.sushi, &owner), units(900));
        assert_eq!(f.ledger.balance_of(&f.sushi, &f.custody), units(100));
        assert_eq!(f.vault.share_balance(&f.sushi, &owner).unwrap(), units(100));
        assert_eq!(f.vault.total_deposited(&f.sushi).unwrap(), units(100));
    }

    #[test]
    fn test_deposit_validation() {
        let mut f = fixture();
        let owner = AccountId::new("owner");
        fund(&f, &f.sushi, &owner, units(10));

        let unknown = TokenId::new("WETH");
        assert_eq!(
            f.vault.deposit(&unknown, units(1), &owner),
            Err(ExchangeError::TokenNotSupported(unknown))
        );
        assert_eq!(
            f.vault.deposit(&f.sushi, Wad::ZERO, &owner),
            Err(ExchangeError::InvalidAmount)
        );
    }

    #[test]
    fn test_refused_deposit_changes_nothing() {
        let mut f = fixture();
        let owner = AccountId::new("owner");
        f.ledger.mint(&f.sushi, &owner, units(10)).unwrap();
        // No approval granted

        let err = f.vault.deposit(&f.sushi, units(5), &owner).unwrap_err();
        assert!(matches!(
            err,
            ExchangeError::TransferFailed {
                reason: TransferError::InsufficientAllowance { .. },
                ..
            }
        ));
        assert_eq!(f.vault.total_deposited(&f.sushi).unwrap(), Wad::ZERO);
        assert_eq!(f.vault.share_balance(&f.sushi, &owner).unwrap(), Wad::ZERO);
        assert_eq!(f.ledger.balance_of(&f.sushi, &owner), units(10));
    }

    #[test]
    fn test_withdraw_burns_shares() {
        let mut f = fixture();
        let owner = AccountId::new("owner");
        fund(&f, &f.sushi, &owner, units(100));
        f.vault.deposit(&f.sushi, units(100), &owner).unwrap();

        f.vault.withdraw(&f.sushi, units(40), &owner).unwrap();

        assert_eq!(f.vault.share_balance(&f.sushi, &owner).unwrap(), units(60));
        assert_eq!(f.vault.total_deposited(&f.sushi).unwrap(), units(60));
        assert_eq!(f.ledger.balance_of(&f.sushi, &owner), units(40));

        let err = f.vault.withdraw(&f.sushi, units(61), &owner).unwrap_err();
        assert!(matches!(err, ExchangeError::InsufficientShares { .. }));
    }

    #[test]
    fn test_withdraw_after_payout_is_first_come() {
        let mut f = fixture();
        let (first, second) = (AccountId::new("first"), AccountId::new("second"));
        let trader = AccountId::new("trader");
        for holder in [&first, &second] {
            fund(&f, &f.yfi, holder, units(10));
            f.vault.deposit(&f.yfi, units(10), holder).unwrap();
        }
        f.vault.pay_out(&f.yfi, units(5), &trader).unwrap();

        f.vault.withdraw(&f.yfi, units(10), &first).unwrap();
        let err = f.vault.withdraw(&f.yfi, units(10), &second).unwrap_err();
        assert!(matches!(err, ExchangeError::InsufficientLiquidity { .. }));
        assert_eq!(f.vault.share_balance(&f.yfi, &second).unwrap(), units(10));
        f.vault.withdraw(&f.yfi, units(5), &second).unwrap();
    }

    #[test]
    fn test_pay_out_requires_liquidity() {
        let mut f = fixture();
        let owner = AccountId::new("owner");
        let trader = AccountId::new("trader");
        fund(&f, &f.yfi, &owner, units(10));
        f.vault.deposit(&f.yfi, units(10), &owner).unwrap();

        let err = f.vault.pay_out(&f.yfi, units(11), &trader).unwrap_err();
        assert!(matches!(err, ExchangeError::InsufficientLiquidity { .. }));

        f.vault.pay_out(&f.yfi, units(4), &trader).unwrap();
        assert_eq!(f.vault.total_deposited(&f.yfi).unwrap(), units(6));
        assert_eq!(f.ledger.balance_of(&f.yfi, &trader), units(4));
        // Share balances are not touched by swap legs
        assert_eq!(f.vault.share_balance(&f.yfi, &owner).unwrap(), units(10));
    }

    #[test]
    fn test_pull_in_grows_pool() {
        let mut f = fixture();
        let trader = AccountId::new("trader");
        fund(&f, &f.sushi, &trader, units(10));

        f.vault.pull_in(&f.sushi, units(3), &trader).unwrap();
        assert_eq!(f.vault.total_deposited(&f.sushi).unwrap(), units(3));
        assert_eq!(f.vault.pool(&f.sushi).unwrap().total_shares(), units(3));
        assert_eq!(f.ledger.balance_of(&f.sushi, &trader), units(7));
    }

    #[test]
    fn test_settle_swap_without_liquidity_rolls_back() {
        let mut f = fixture();
        let trader = AccountId::new("trader");
        fund(&f, &f.sushi, &trader, units(10));

        let err = f
            .vault
            .settle_swap(&f.sushi, units(10), &f.yfi, units(1), &trader)
            .unwrap_err();
        assert!(matches!(err, ExchangeError::InsufficientLiquidity { .. }));
        assert_eq!(f.ledger.balance_of(&f.sushi, &trader), units(10));
        assert_eq!(f.vault.total_deposited(&f.sushi).unwrap(), Wad::ZERO);
    }

    #[test]
    fn test_settle_swap_moves_both_legs() {
        let mut f = fixture();
        let lp = AccountId::new("lp");
        let trader = AccountId::new("trader");
        fund(&f, &f.yfi, &lp, units(100));
        fund(&f, &f.sushi, &trader, units(10));
        f.vault.deposit(&f.yfi, units(100), &lp).unwrap();

        f.vault
            .settle_swap(&f.sushi, units(10), &f.yfi, units(2), &trader)
            .unwrap();

        assert_eq!(f.vault.total_deposited(&f.sushi).unwrap(), units(10));
        assert_eq!(f.vault.total_deposited(&f.yfi).unwrap(), units(98));
        assert_eq!(f.ledger.balance_of(&f.sushi, &trader), Wad::ZERO);
        assert_eq!(f.ledger.balance_of(&f.yfi, &trader), units(2));
    }

    #[test]
    fn test_settle_swap_same_token() {
        let mut f = fixture();
        let trader = AccountId::new("trader");
        assert_eq!(
            f.vault
                .settle_swap(&f.sushi, units(1), &f.sushi, units(1), &trader),
            Err(ExchangeError::SameToken(f.sushi.clone()))
        );
    }
}
