// ============================================================================
// Exchange Engine
// Oracle-priced swaps settled against per-token share pools
// ============================================================================

use super::{FeeModel, TokenRegistry, Vault};
use crate::domain::{
    AccountId, ExchangeError, ExchangeResult, FeeConfig, FeeKind, OracleError, OracleRef,
    SharePool, SupportedToken, SwapKind, SwapQuote, SwapReceipt, TokenId,
};
use crate::interfaces::{
    Authorizer, DefaultSharePoolFactory, EventHandler, ExchangeEvent, PriceOracle,
    SharePoolFactory,
};
use crate::numeric::Wad;
use chrono::Utc;
use parking_lot::RwLock;
use std::sync::Arc;

/// Bound on the upward corrections applied to an inverse quote.
const MAX_INVERSE_STEPS: usize = 64;

/// Committed state shared by every operation
struct ExchangeState {
    registry: TokenRegistry,
    vault: Vault,
    fees: FeeModel,
}

/// Oracle-priced exchange over a set of supported tokens.
///
/// Every mutating call holds the state write lock from validation to
/// commit, so operations are serializable and all-or-nothing. Quotes take
/// the read lock and observe the latest committed state.
pub struct ExchangeEngine {
    state: RwLock<ExchangeState>,

    oracle: Arc<dyn PriceOracle>,

    authorizer: Arc<dyn Authorizer>,

    /// Creates the share pool of each newly listed token
    pool_factory: Arc<dyn SharePoolFactory>,

    event_handler: Arc<dyn EventHandler>,
}

impl ExchangeEngine {
    /// Create an engine with no listed tokens.
    pub fn new(
        fees: FeeModel,
        vault: Vault,
        oracle: Arc<dyn PriceOracle>,
        authorizer: Arc<dyn Authorizer>,
        event_handler: Arc<dyn EventHandler>,
    ) -> Self {
        Self {
            state: RwLock::new(ExchangeState {
                registry: TokenRegistry::new(),
                vault,
                fees,
            }),
            oracle,
            authorizer,
            pool_factory: Arc::new(DefaultSharePoolFactory),
            event_handler,
        }
    }

    /// Replace the share pool factory used by later listings
    pub fn with_pool_factory(mut self, pool_factory: Arc<dyn SharePoolFactory>) -> Self {
        self.pool_factory = pool_factory;
        self
    }

    // ========================================================================
    // Token Registry
    // ========================================================================

    /// List a token and open its empty share pool.
    ///
    /// # Errors
    /// `DuplicateToken` if `id` is already listed; nothing changes.
    pub fn add_supported_token(
        &self,
        id: TokenId,
        display_name: impl Into<String>,
        symbol: impl Into<String>,
        oracle: OracleRef,
    ) -> ExchangeResult<()> {
        let token = SupportedToken::new(id, display_name, symbol, oracle);
        let mut state = self.state.write();

        if state.registry.is_supported(&token.id) || state.vault.has_pool(&token.id) {
            tracing::warn!("Rejected listing of {}: already supported", token.id);
            return Err(ExchangeError::DuplicateToken(token.id));
        }
        let pool = self.pool_factory.create_pool(&token);
        if pool.token != token.id {
            return Err(ExchangeError::InvalidConfig(format!(
                "Share pool factory returned a pool for {} when listing {}",
                pool.token, token.id
            )));
        }

        let event = ExchangeEvent::TokenRegistered {
            token: token.id.clone(),
            share_name: pool.name.clone(),
            share_symbol: pool.symbol.clone(),
            timestamp: Utc::now(),
        };
        state.vault.open_pool(pool)?;
        let listed = state.registry.add(token)?;
        tracing::info!("Listed {} ({}) priced by {}", listed.id, listed.symbol, listed.oracle);
        drop(state);

        self.event_handler.on_event(event);
        Ok(())
    }

    /// Listed token ids in listing order
    pub fn supported_tokens(&self) -> Vec<TokenId> {
        self.state.read().registry.supported_tokens()
    }

    pub fn is_supported(&self, token: &TokenId) -> bool {
        self.state.read().registry.is_supported(token)
    }

    pub fn token(&self, token: &TokenId) -> Option<SupportedToken> {
        self.state.read().registry.get(token).cloned()
    }

    // ========================================================================
    // Liquidity
    // ========================================================================

    /// Deposit `amount` of `token` from `depositor`, minting shares 1:1.
    ///
    /// # Errors
    /// - `TokenNotSupported` for an unlisted token
    /// - `InvalidAmount` for a zero amount
    /// - `TransferFailed` if the ledger refuses the pull
    pub fn deposit(&self, token: &TokenId, amount: Wad, depositor: &AccountId) -> ExchangeResult<()> {
        let mut state = self.state.write();
        state.registry.require_supported(token)?;
        state.vault.deposit(token, amount, depositor)?;
        tracing::info!("{} deposited {} {}", depositor, amount, token);
        drop(state);

        self.event_handler.on_event(ExchangeEvent::Deposited {
            token: token.clone(),
            depositor: depositor.clone(),
            amount,
            timestamp: Utc::now(),
        });
        Ok(())
    }

    /// Burn `amount` of the holder's shares and return the underlying.
    ///
    /// Swaps move pool totals but not share balances, so withdrawals are
    /// first-come: once swaps have drained a pool below its outstanding
    /// shares, the last holders fail with `InsufficientLiquidity`. Input a
    /// pool gained from swaps is backed by no shares and cannot be withdrawn.
    pub fn withdraw(&self, token: &TokenId, amount: Wad, holder: &AccountId) -> ExchangeResult<()> {
        let mut state = self.state.write();
        state.registry.require_supported(token)?;
        state.vault.withdraw(token, amount, holder)?;
        tracing::info!("{} withdrew {} {}", holder, amount, token);
        drop(state);

        self.event_handler.on_event(ExchangeEvent::Withdrawn {
            token: token.clone(),
            holder: holder.clone(),
            amount,
            timestamp: Utc::now(),
        });
        Ok(())
    }

    /// Snapshot of a token's share pool
    pub fn share_pool(&self, token: &TokenId) -> ExchangeResult<SharePool> {
        self.state.read().vault.pool(token).cloned()
    }

    pub fn share_balance(&self, token: &TokenId, holder: &AccountId) -> ExchangeResult<Wad> {
        self.state.read().vault.share_balance(token, holder)
    }

    pub fn total_deposited(&self, token: &TokenId) -> ExchangeResult<Wad> {
        self.state.read().vault.total_deposited(token)
    }

    pub fn custody_account(&self) -> AccountId {
        self.state.read().vault.custody_account().clone()
    }

    // ========================================================================
    // Quotes
    // ========================================================================

    /// `price(token_out) / price(token_in)`, rounded down.
    pub fn get_exchange_rate(&self, token_in: &TokenId, token_out: &TokenId) -> ExchangeResult<Wad> {
        let state = self.state.read();
        self.exchange_rate(&state, token_in, token_out)
    }

    /// Full forward quote for selling `amount_in` of `token_in`.
    pub fn quote_amount_out(
        &self,
        token_in: &TokenId,
        token_out: &TokenId,
        amount_in: Wad,
    ) -> ExchangeResult<SwapQuote> {
        let state = self.state.read();
        let rate = self.exchange_rate(&state, token_in, token_out)?;
        quote_with_rate(&state.fees, token_in, token_out, rate, amount_in)
    }

    /// Net output of selling `amount_in` of `token_in`.
    pub fn get_amount_out(
        &self,
        token_in: &TokenId,
        token_out: &TokenId,
        amount_in: Wad,
    ) -> ExchangeResult<Wad> {
        self.quote_amount_out(token_in, token_out, amount_in)
            .map(|quote| quote.net_amount_out)
    }

    /// Forward quote for the smallest input whose net output reaches
    /// `desired_net_out`.
    pub fn quote_amount_in(
        &self,
        token_in: &TokenId,
        token_out: &TokenId,
        desired_net_out: Wad,
    ) -> ExchangeResult<SwapQuote> {
        let state = self.state.read();
        self.inverse_quote(&state, token_in, token_out, desired_net_out)
    }

    /// Input required for a net output of `desired_net_out`.
    pub fn get_amount_in(
        &self,
        token_in: &TokenId,
        token_out: &TokenId,
        desired_net_out: Wad,
    ) -> ExchangeResult<Wad> {
        self.quote_amount_in(token_in, token_out, desired_net_out)
            .map(|quote| quote.amount_in)
    }

    // ========================================================================
    // Swaps
    // ========================================================================

    /// Sell exactly `amount_in` of `token_in` for the quoted net output of
    /// `token_out`, which is returned.
    ///
    /// # Errors
    /// - `TokenNotSupported` if either token is unlisted
    /// - `InvalidAmount` for a zero input or a quote that pays nothing
    /// - `SameToken` when both legs name one token
    /// - `InsufficientLiquidity` if the output pool cannot cover the payout
    /// - `OracleUnavailable` when a price cannot be read
    ///
    /// On any error no balance changes.
    pub fn swap_in(
        &self,
        token_in: &TokenId,
        token_out: &TokenId,
        amount_in: Wad,
        trader: &AccountId,
    ) -> ExchangeResult<Wad> {
        let mut state = self.state.write();
        self.check_swap(&state, token_in, token_out, amount_in)?;

        let rate = self.exchange_rate(&state, token_in, token_out)?;
        let quote = quote_with_rate(&state.fees, token_in, token_out, rate, amount_in)?;
        if quote.net_amount_out.is_zero() {
            return Err(ExchangeError::InvalidAmount);
        }

        let paid_out = quote.net_amount_out;
        state
            .vault
            .settle_swap(token_in, amount_in, token_out, paid_out, trader)?;
        tracing::info!(
            "{} swapped {} {} for {} {}",
            trader,
            amount_in,
            token_in,
            paid_out,
            token_out
        );
        drop(state);

        self.emit_swap(trader, SwapKind::ExactIn, quote, paid_out);
        Ok(paid_out)
    }

    /// Same settlement as [`swap_in`](Self::swap_in). Callers use it with an
    /// `amount` obtained from [`get_amount_in`](Self::get_amount_in).
    pub fn swap_out(
        &self,
        token_in: &TokenId,
        token_out: &TokenId,
        amount: Wad,
        trader: &AccountId,
    ) -> ExchangeResult<Wad> {
        self.swap_in(token_in, token_out, amount, trader)
    }

    /// Buy exactly `amount_out` of `token_out`, paying the inverse-quoted
    /// input of `token_in`, which is returned.
    ///
    /// The trader receives `amount_out`; any rounding surplus of the quote
    /// stays in the output pool.
    pub fn swap_exact_out(
        &self,
        token_in: &TokenId,
        token_out: &TokenId,
        amount_out: Wad,
        trader: &AccountId,
    ) -> ExchangeResult<Wad> {
        let mut state = self.state.write();
        self.check_swap(&state, token_in, token_out, amount_out)?;

        let quote = self.inverse_quote(&state, token_in, token_out, amount_out)?;
        let amount_in = quote.amount_in;
        if amount_in.is_zero() {
            return Err(ExchangeError::InvalidAmount);
        }

        state
            .vault
            .settle_swap(token_in, amount_in, token_out, amount_out, trader)?;
        tracing::info!(
            "{} bought {} {} for {} {}",
            trader,
            amount_out,
            token_out,
            amount_in,
            token_in
        );
        drop(state);

        self.emit_swap(trader, SwapKind::ExactOut, quote, amount_out);
        Ok(amount_in)
    }

    // ========================================================================
    // Fee Administration
    // ========================================================================

    pub fn base_fee(&self) -> Wad {
        self.state.read().fees.base_fee()
    }

    pub fn imbalance_fee(&self) -> Wad {
        self.state.read().fees.imbalance_fee()
    }

    pub fn imbalance_unit(&self) -> Wad {
        self.state.read().fees.imbalance_unit()
    }

    pub fn fee_config(&self) -> FeeConfig {
        self.state.read().fees.config()
    }

    /// Admin-only update of the base fee rate.
    ///
    /// # Errors
    /// `Unauthorized`, `NoOpUpdate`, or `InvalidFeeConfig` for a rate of one
    /// or more. The stored rate is unchanged on error.
    pub fn set_base_fee(&self, caller: &AccountId, rate: Wad) -> ExchangeResult<()> {
        self.set_fee_rate(caller, FeeKind::Base, rate)
    }

    /// Admin-only update of the imbalance fee rate.
    pub fn set_imbalance_fee(&self, caller: &AccountId, rate: Wad) -> ExchangeResult<()> {
        self.set_fee_rate(caller, FeeKind::Imbalance, rate)
    }

    // ========================================================================
    // Private methods
    // ========================================================================

    fn set_fee_rate(&self, caller: &AccountId, kind: FeeKind, rate: Wad) -> ExchangeResult<()> {
        if !self.authorizer.is_admin(caller) {
            tracing::warn!("Rejected {} fee update from {}", kind, caller);
            return Err(ExchangeError::Unauthorized(caller.clone()));
        }

        let mut state = self.state.write();
        let previous = state.fees.set_rate(kind, rate)?;
        tracing::info!("{} fee rate changed from {} to {} by {}", kind, previous, rate, caller);
        drop(state);

        self.event_handler.on_event(ExchangeEvent::FeeRateUpdated {
            kind,
            previous,
            current: rate,
            updated_by: caller.clone(),
            timestamp: Utc::now(),
        });
        Ok(())
    }

    /// Registration, amount and same-token checks shared by every swap.
    fn check_swap(
        &self,
        state: &ExchangeState,
        token_in: &TokenId,
        token_out: &TokenId,
        amount: Wad,
    ) -> ExchangeResult<()> {
        state.registry.require_supported(token_in)?;
        state.registry.require_supported(token_out)?;
        if amount.is_zero() {
            return Err(ExchangeError::InvalidAmount);
        }
        if token_in == token_out {
            return Err(ExchangeError::SameToken(token_in.clone()));
        }
        Ok(())
    }

    fn exchange_rate(
        &self,
        state: &ExchangeState,
        token_in: &TokenId,
        token_out: &TokenId,
    ) -> ExchangeResult<Wad> {
        let listed_in = state.registry.require_supported(token_in)?;
        let listed_out = state.registry.require_supported(token_out)?;

        let price_in = self.price_of(listed_in)?;
        let price_out = self.price_of(listed_out)?;
        Ok(price_out.scaled_div(price_in)?)
    }

    fn price_of(&self, token: &SupportedToken) -> ExchangeResult<Wad> {
        let unavailable = |reason| ExchangeError::OracleUnavailable {
            token: token.id.clone(),
            reason,
        };
        let price = self.oracle.price_of(&token.oracle).map_err(unavailable)?;
        if price.is_zero() {
            return Err(unavailable(OracleError::InvalidPrice));
        }
        Ok(price)
    }

    /// Invert the fee curve and the rate, then confirm with a forward quote.
    ///
    /// Rounding can leave the first estimate a few units short; the input is
    /// raised by the rate-adjusted shortfall until the forward net output
    /// reaches the target.
    fn inverse_quote(
        &self,
        state: &ExchangeState,
        token_in: &TokenId,
        token_out: &TokenId,
        desired_net_out: Wad,
    ) -> ExchangeResult<SwapQuote> {
        let rate = self.exchange_rate(state, token_in, token_out)?;
        let gross = state.fees.gross_for_net(desired_net_out)?;
        let mut amount_in = gross.scaled_div_up(rate)?;

        for _ in 0..MAX_INVERSE_STEPS {
            let quote = quote_with_rate(&state.fees, token_in, token_out, rate, amount_in)?;
            if quote.net_amount_out >= desired_net_out {
                return Ok(quote);
            }
            let shortfall = desired_net_out.checked_sub(quote.net_amount_out)?;
            let step = shortfall.scaled_div_up(rate)?.max(Wad::from_raw(1));
            amount_in = amount_in.checked_add(step)?;
        }

        let fee_fraction = state.fees.total_fee_fraction(gross)?;
        Err(ExchangeError::InvalidFeeConfig { fee_fraction })
    }

    fn emit_swap(&self, trader: &AccountId, kind: SwapKind, quote: SwapQuote, paid_out: Wad) {
        let receipt = SwapReceipt::new(trader.clone(), kind, quote, paid_out);
        tracing::debug!("Swap {} settled", receipt.id);
        self.event_handler.on_event(ExchangeEvent::Swapped { receipt });
    }
}

/// Forward quote at a known rate: gross = amount_in * rate, then fees.
fn quote_with_rate(
    fees: &FeeModel,
    token_in: &TokenId,
    token_out: &TokenId,
    exchange_rate: Wad,
    amount_in: Wad,
) -> ExchangeResult<SwapQuote> {
    let gross_amount_out = amount_in.scaled_mul(exchange_rate)?;
    let (fee_fraction, net_amount_out) = fees.apply_fee_with_fraction(gross_amount_out)?;
    Ok(SwapQuote {
        token_in: token_in.clone(),
        token_out: token_out.clone(),
        amount_in,
        exchange_rate,
        gross_amount_out,
        fee_fraction,
        net_amount_out,
    })
}
