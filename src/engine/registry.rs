// ============================================================================
// Token Registry
// Insertion-ordered set of supported tokens
// ============================================================================

use crate::domain::{ExchangeError, ExchangeResult, SupportedToken, TokenId};
use std::collections::HashMap;

/// Supported tokens in listing order, with O(1) lookup by id.
///
/// Tokens are never removed, so indices into `tokens` stay valid.
#[derive(Debug, Clone, Default)]
pub struct TokenRegistry {
    tokens: Vec<SupportedToken>,
    index: HashMap<TokenId, usize>,
}

impl TokenRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a token; fails with `DuplicateToken` if the id is listed.
    pub fn add(&mut self, token: SupportedToken) -> ExchangeResult<&SupportedToken> {
        if self.index.contains_key(&token.id) {
            return Err(ExchangeError::DuplicateToken(token.id));
        }

        let position = self.tokens.len();
        self.index.insert(token.id.clone(), position);
        self.tokens.push(token);
        Ok(&self.tokens[position])
    }

    /// Ids of all supported tokens in insertion order
    pub fn supported_tokens(&self) -> Vec<TokenId> {
        self.tokens.iter().map(|t| t.id.clone()).collect()
    }

    /// Look up a token, failing with `TokenNotSupported` if absent
    pub fn require_supported(&self, id: &TokenId) -> ExchangeResult<&SupportedToken> {
        self.get(id)
            .ok_or_else(|| ExchangeError::TokenNotSupported(id.clone()))
    }

    pub fn get(&self, id: &TokenId) -> Option<&SupportedToken> {
        self.index.get(id).map(|&i| &self.tokens[i])
    }

    pub fn is_supported(&self, id: &TokenId) -> bool {
        self.index.contains_key(id)
    }

    pub fn iter(&self) -> impl Iterator<Item = &SupportedToken> {
        self.tokens.iter()
    }

    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }
}
