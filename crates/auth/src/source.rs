//! Where a token came from, and the gate decision itself.

use thiserror::Error;

use crate::TokenAuthorizer;

/// Request locations a token may be read from, in precedence order.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum TokenSource {
    /// `Authorization: Bearer <token>`
    AuthorizationHeader,
    /// `X-API-Token: <token>`
    CustomHeader,
    /// `?token=<token>`
    QueryParameter,
}

impl TokenSource {
    pub fn as_str(&self) -> &'static str {
        match self {
            TokenSource::AuthorizationHeader => "authorization_header",
            TokenSource::CustomHeader => "custom_header",
            TokenSource::QueryParameter => "query_parameter",
        }
    }
}

/// Raw values pulled out of a request by the transport layer.
///
/// `authorization` is the full header value; the `Bearer ` scheme is
/// stripped here.
#[derive(Debug, Default, Clone, Copy)]
pub struct TokenCandidates<'a> {
    pub authorization: Option<&'a str>,
    pub custom_header: Option<&'a str>,
    pub query: Option<&'a str>,
}

#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum TokenRejection {
    #[error("Missing authentication token.")]
    Missing,

    #[error("Invalid authentication token.")]
    Invalid(TokenSource),
}

/// Pick the token to check. The first source that is present wins, even if a
/// later one holds a different value.
pub fn resolve_token<'a>(candidates: &TokenCandidates<'a>) -> Option<(TokenSource, &'a str)> {
    if let Some(token) = candidates.authorization.and_then(strip_bearer) {
        return Some((TokenSource::AuthorizationHeader, token));
    }
    if let Some(token) = candidates.custom_header.and_then(non_blank) {
        return Some((TokenSource::CustomHeader, token));
    }
    candidates
        .query
        .and_then(non_blank)
        .map(|token| (TokenSource::QueryParameter, token))
}

/// Run the gate: resolve a token and ask the authorizer about it.
pub fn authenticate(
    authorizer: &dyn TokenAuthorizer,
    candidates: &TokenCandidates<'_>,
) -> Result<TokenSource, TokenRejection> {
    let (source, token) = resolve_token(candidates).ok_or(TokenRejection::Missing)?;

    if authorizer.is_authorized(token) {
        Ok(source)
    } else {
        tracing::debug!(source = source.as_str(), "token not in allow-list");
        Err(TokenRejection::Invalid(source))
    }
}

fn strip_bearer(header: &str) -> Option<&str> {
    let header = header.trim();
    let (scheme, rest) = header.split_once(' ')?;
    if !scheme.eq_ignore_ascii_case("bearer") {
        return None;
    }
    non_blank(rest)
}

fn non_blank(value: &str) -> Option<&str> {
    let value = value.trim();
    (!value.is_empty()).then_some(value)
}
