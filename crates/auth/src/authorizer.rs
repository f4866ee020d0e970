//! Pluggable token authorization.

use std::collections::HashSet;

use crate::ApiToken;

/// Decides whether a presented token is allowed through the gate.
///
/// - No IO
/// - No panics
///
/// Implemented for the static allow-list below and for any `Fn(&str) -> bool`.
/// The HTTP layer holds an `Arc<dyn TokenAuthorizer>`, so a real credential
/// backend can be swapped in without touching the middleware.
pub trait TokenAuthorizer: Send + Sync {
    fn is_authorized(&self, token: &str) -> bool;
}

impl<F> TokenAuthorizer for F
where
    F: Fn(&str) -> bool + Send + Sync,
{
    fn is_authorized(&self, token: &str) -> bool {
        self(token)
    }
}

/// Fixed allow-list of tokens.
#[derive(Debug, Clone, Default)]
pub struct StaticTokenSet {
    tokens: HashSet<ApiToken>,
}

impl StaticTokenSet {
    pub fn new(tokens: impl IntoIterator<Item = ApiToken>) -> Self {
        Self {
            tokens: tokens.into_iter().collect(),
        }
    }

    /// Tokens accepted when no allow-list is configured. Development only.
    pub fn development() -> Self {
        Self::new([
            ApiToken::new("dev-token-123"),
            ApiToken::new("admin-token-456"),
            ApiToken::new("test-token-789"),
        ])
    }

    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }
}

impl TokenAuthorizer for StaticTokenSet {
    fn is_authorized(&self, token: &str) -> bool {
        self.tokens.contains(&ApiToken::new(token.to_string()))
    }
}
