// ============================================================================
// Authorization Interface
// Gates admin-only entry points (fee configuration)
// ============================================================================

use crate::domain::AccountId;

/// Admin capability check.
pub trait Authorizer: Send + Sync {
    /// Whether `caller` may change exchange configuration
    fn is_admin(&self, caller: &AccountId) -> bool;
}

/// Single-owner authorization: the deploying account is the only admin
#[derive(Debug, Clone)]
pub struct OwnerAuthorizer {
    owner: AccountId,
}

impl OwnerAuthorizer {
    pub fn new(owner: AccountId) -> Self {
        Self { owner }
    }

    pub fn owner(&self) -> &AccountId {
        &self.owner
    }
}

impl Authorizer for OwnerAuthorizer {
    fn is_admin(&self, caller: &AccountId) -> bool {
        *caller == self.owner
    }
}
