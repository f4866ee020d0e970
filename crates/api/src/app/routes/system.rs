use axum::{
    extract::OriginalUri,
    http::{Method, StatusCode, Uri},
    response::{IntoResponse, Response},
    Json,
};

use crate::app::errors::{json_error, ApiError, Fault, FaultKind};

pub async fn health() -> impl IntoResponse {
    Json(serde_json::json!({ "status": "ok" }))
}

/// Route table for humans and tooling.
pub async fn docs() -> impl IntoResponse {
    Json(serde_json::json!({
        "service": "usersvc",
        "authentication": {
            "header": "Authorization: Bearer <token>",
            "customHeader": crate::middleware::token_gate::CUSTOM_TOKEN_HEADER,
            "queryParameter": "token",
        },
        "routes": [
            { "method": "GET", "path": "/users", "query": ["page", "pageSize", "nameFilter", "emailFilter", "sortBy", "sortOrder"] },
            { "method": "GET", "path": "/users/{id}" },
            { "method": "POST", "path": "/users", "body": { "name": "string", "email": "string" } },
            { "method": "PUT", "path": "/users/{id}", "body": { "name": "string", "email": "string" } },
            { "method": "DELETE", "path": "/users/{id}" },
            { "method": "GET", "path": "/health", "public": true },
            { "method": "GET", "path": "/docs", "public": true },
        ],
    }))
}

/// Unknown routes are a missing-key fault.
pub async fn fallback(method: Method, uri: Uri) -> ApiError {
    ApiError::Fault(Fault::new(
        FaultKind::MissingKey,
        format!("no route for {method} {}", uri.path()),
    ))
}

/// Known path, unsupported method.
pub async fn method_not_allowed(method: Method, OriginalUri(uri): OriginalUri) -> Response {
    json_error(
        StatusCode::METHOD_NOT_ALLOWED,
        "method_not_allowed",
        format!("Method {method} is not allowed on {}.", uri.path()),
    )
}
