use std::any::Any;
use std::panic::AssertUnwindSafe;

use axum::{
    body::Body,
    http::{header, Request, StatusCode},
    middleware::Next,
    response::{IntoResponse, Response},
    Json,
};
use futures_util::FutureExt;

use crate::app::errors::{json_error, Fault, FaultKind};

/// Upper bound on a non-JSON error body read back for rewriting.
const MAX_REWRITTEN_BODY: usize = 16 * 1024;

/// Outermost interceptor. Turns panics and fault-marked responses into
/// `{ "error": <category message> }` with the status from [`FaultKind`].
/// Error responses produced by the framework itself (plain text or empty
/// bodies) are rewritten into the JSON envelope as well. Never re-raises.
pub async fn exception_middleware(req: Request<Body>, next: Next) -> Response {
    let method = req.method().clone();
    let path = req.uri().path().to_owned();

    match AssertUnwindSafe(next.run(req)).catch_unwind().await {
        Ok(response) => {
            if let Some(fault) = response.extensions().get::<Fault>() {
                tracing::error!(%method, %path, kind = ?fault.kind, detail = %fault.detail, "request failed");
                return fault_response(fault.kind);
            }
            if is_bare_error(&response) {
                return rewrite_bare_error(response).await;
            }
            response
        }
        Err(panic) => {
            tracing::error!(%method, %path, detail = %panic_message(panic.as_ref()), "handler panicked");
            fault_response(FaultKind::Other)
        }
    }
}

pub fn fault_response(kind: FaultKind) -> Response {
    (
        kind.status(),
        Json(serde_json::json!({ "error": kind.message() })),
    )
        .into_response()
}

fn is_bare_error(response: &Response) -> bool {
    let status = response.status();
    if !status.is_client_error() && !status.is_server_error() {
        return false;
    }
    !response
        .headers()
        .get(header::CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .is_some_and(|ct| ct.starts_with("application/json"))
}

async fn rewrite_bare_error(response: Response) -> Response {
    let (parts, body) = response.into_parts();
    let text = axum::body::to_bytes(body, MAX_REWRITTEN_BODY)
        .await
        .map(|b| String::from_utf8_lossy(&b).trim().to_string())
        .unwrap_or_default();

    if parts.status.is_server_error() {
        tracing::error!(status = parts.status.as_u16(), detail = %text, "server error without body");
        return fault_response(FaultKind::Other);
    }

    let message = if text.is_empty() {
        parts.status.canonical_reason().unwrap_or("Request failed.").to_string()
    } else {
        text
    };
    let mut rewritten = json_error(parts.status, client_error_code(parts.status), message);
    if let Some(allow) = parts.headers.get(header::ALLOW) {
        rewritten.headers_mut().insert(header::ALLOW, allow.clone());
    }
    rewritten
}

fn client_error_code(status: StatusCode) -> &'static str {
    match status {
        StatusCode::NOT_FOUND => "not_found",
        StatusCode::METHOD_NOT_ALLOWED => "method_not_allowed",
        StatusCode::PAYLOAD_TOO_LARGE => "payload_too_large",
        StatusCode::UNSUPPORTED_MEDIA_TYPE => "unsupported_media_type",
        StatusCode::UNAUTHORIZED => "unauthorized",
        _ => "invalid_argument",
    }
}

fn panic_message(panic: &(dyn Any + Send)) -> &str {
    if let Some(s) = panic.downcast_ref::<&'static str>() {
        s
    } else if let Some(s) = panic.downcast_ref::<String>() {
        s.as_str()
    } else {
        "non-string panic payload"
    }
}
