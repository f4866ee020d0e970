use std::sync::Arc;

use axum::{
    extract::{Query, State},
    http::{header, HeaderMap, StatusCode, Uri},
    middleware::Next,
    response::{IntoResponse, Response},
    Json,
};

use usersvc_auth::{authenticate, TokenAuthorizer, TokenCandidates};

use crate::context::AuthContext;

/// Custom header accepted as an alternative to `Authorization: Bearer`.
pub const CUSTOM_TOKEN_HEADER: &str = "X-API-Token";

/// Paths (and everything below them) that skip the gate.
const PUBLIC_PATHS: &[&str] = &["/health", "/docs"];

#[derive(Clone)]
pub struct TokenGate {
    authorizer: Arc<dyn TokenAuthorizer>,
}

impl TokenGate {
    pub fn new(authorizer: Arc<dyn TokenAuthorizer>) -> Self {
        Self { authorizer }
    }

    pub fn is_public(path: &str) -> bool {
        PUBLIC_PATHS.iter().any(|p| {
            path == *p || path.strip_prefix(p).is_some_and(|rest| rest.starts_with('/'))
        })
    }
}

/// First `token` pair of the query string. Repeats after the first are
/// ignored; an undecodable query counts as no query token.
fn query_token(uri: &Uri) -> Option<String> {
    Query::<Vec<(String, String)>>::try_from_uri(uri)
        .ok()?
        .0
        .into_iter()
        .find_map(|(key, value)| (key == "token").then_some(value))
}

pub async fn token_gate_middleware(
    State(gate): State<TokenGate>,
    mut req: axum::http::Request<axum::body::Body>,
    next: Next,
) -> Response {
    if TokenGate::is_public(req.uri().path()) {
        return next.run(req).await;
    }

    let query = query_token(req.uri());
    let headers = req.headers();
    let candidates = TokenCandidates {
        authorization: header_str(headers, header::AUTHORIZATION.as_str()),
        custom_header: header_str(headers, CUSTOM_TOKEN_HEADER),
        query: query.as_deref(),
    };

    match authenticate(gate.authorizer.as_ref(), &candidates) {
        Ok(source) => {
            req.extensions_mut().insert(AuthContext::new(source));
            next.run(req).await
        }
        Err(rejection) => {
            tracing::warn!(
                method = %req.method(),
                path = %req.uri().path(),
                reason = %rejection,
                "request rejected by token gate"
            );
            unauthorized(rejection.to_string())
        }
    }
}

fn header_str<'a>(headers: &'a HeaderMap, name: &str) -> Option<&'a str> {
    headers.get(name).and_then(|v| v.to_str().ok())
}

fn unauthorized(message: String) -> Response {
    (
        StatusCode::UNAUTHORIZED,
        Json(serde_json::json!({
            "error": message,
            "statusCode": StatusCode::UNAUTHORIZED.as_u16(),
        })),
    )
        .into_response()
}
