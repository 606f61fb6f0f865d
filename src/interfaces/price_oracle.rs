// ============================================================================
// Price Oracle Interface
// Boundary contract for external price feeds
// ============================================================================

use crate::domain::{OracleError, OracleRef};
use crate::numeric::Wad;
use parking_lot::RwLock;
use std::collections::HashMap;

/// Source of token prices in a common reference unit (1e18 fixed-point).
///
/// Implementations wrap whatever feed backs a token: an on-chain aggregator,
/// an HTTP price service, a replay file. The engine never caches answers;
/// every quote and swap reads fresh prices.
pub trait PriceOracle: Send + Sync {
    /// Current price published by `feed`
    fn price_of(&self, feed: &OracleRef) -> Result<Wad, OracleError>;
}

/// In-memory oracle with operator-set prices, for tests and simulations
#[derive(Debug, Default)]
pub struct StaticPriceOracle {
    prices: RwLock<HashMap<OracleRef, Wad>>,
}

impl StaticPriceOracle {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder method: Publish a price at construction
    pub fn with_price(self, feed: OracleRef, price: Wad) -> Self {
        self.set_price(feed, price);
        self
    }

    /// Publish (or replace) the price of a feed
    pub fn set_price(&self, feed: OracleRef, price: Wad) {
        self.prices.write().insert(feed, price);
    }

    /// Withdraw a feed's price so reads fail with `FeedNotFound`
    pub fn clear_price(&self, feed: &OracleRef) -> Option<Wad> {
        self.prices.write().remove(feed)
    }
}

impl PriceOracle for StaticPriceOracle {
    fn price_of(&self, feed: &OracleRef) -> Result<Wad, OracleError> {
        match self.prices.read().get(feed) {
            Some(price) if price.is_zero() => Err(OracleError::InvalidPrice),
            Some(price) => Ok(*price),
            None => Err(OracleError::FeedNotFound),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_static_prices() {
        let feed = OracleRef::new("sushi-eth");
        let oracle = StaticPriceOracle::new().with_price(feed.clone(), "0.0005".parse().unwrap());

        assert_eq!(oracle.price_of(&feed), Ok("0.0005".parse().unwrap()));

        oracle.set_price(feed.clone(), Wad::ONE);
        assert_eq!(oracle.price_of(&feed), Ok(Wad::ONE));
    }

    #[test]
    fn test_missing_and_zero_prices() {
        let feed = OracleRef::new("yfi-eth");
        let oracle = StaticPriceOracle::new();
        assert_eq!(oracle.price_of(&feed), Err(OracleError::FeedNotFound));

        oracle.set_price(feed.clone(), Wad::ZERO);
        assert_eq!(oracle.price_of(&feed), Err(OracleError::InvalidPrice));

        assert_eq!(oracle.clear_price(&feed), Some(Wad::ZERO));
        assert_eq!(oracle.price_of(&feed), Err(OracleError::FeedNotFound));
    }
}
