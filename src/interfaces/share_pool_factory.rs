// ============================================================================
// Share Pool Factory Interface
// Creates the share namespace of each newly registered token
// ============================================================================

use crate::domain::{SharePool, SupportedToken};

/// Produces a fresh, empty share pool for a token at registration time.
pub trait SharePoolFactory: Send + Sync {
    fn create_pool(&self, token: &SupportedToken) -> SharePool;
}

/// Names each pool after the token's registered display name and symbol
#[derive(Debug, Clone, Copy, Default)]
pub struct DefaultSharePoolFactory;

impl SharePoolFactory for DefaultSharePoolFactory {
    fn create_pool(&self, token: &SupportedToken) -> SharePool {
        SharePool::new(
            token.id.clone(),
            token.display_name.clone(),
            token.symbol.clone(),
        )
    }
}
