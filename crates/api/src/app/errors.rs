//! Consistent error responses.
//!
//! Client-caused failures are rendered here, at the point they occur.
//! Unexpected failures become a [`Fault`] marker on an otherwise empty
//! response; the exception middleware turns that into the generic envelope.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde_json::json;

use usersvc_core::{DomainError, FieldViolation, UserId};

/// Categories of unexpected failure, each with a fixed status and message.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FaultKind {
    InvalidArgument,
    Unauthorized,
    MissingKey,
    NotImplemented,
    Other,
}

impl FaultKind {
    pub fn status(&self) -> StatusCode {
        match self {
            FaultKind::InvalidArgument => StatusCode::BAD_REQUEST,
            FaultKind::Unauthorized => StatusCode::UNAUTHORIZED,
            FaultKind::MissingKey => StatusCode::NOT_FOUND,
            FaultKind::NotImplemented => StatusCode::NOT_IMPLEMENTED,
            FaultKind::Other => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    pub fn message(&self) -> &'static str {
        match self {
            FaultKind::InvalidArgument => "Invalid argument provided.",
            FaultKind::Unauthorized => "Unauthorized access.",
            FaultKind::MissingKey => "The requested resource was not found.",
            FaultKind::NotImplemented => "This feature is not implemented.",
            FaultKind::Other => "An internal server error occurred.",
        }
    }
}

/// An unexpected failure. `detail` is for server logs only.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Fault {
    pub kind: FaultKind,
    pub detail: String,
}

impl Fault {
    pub fn new(kind: FaultKind, detail: impl Into<String>) -> Self {
        Self {
            kind,
            detail: detail.into(),
        }
    }
}

/// Error returned by handlers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ApiError {
    InvalidArgument(String),
    Validation(Vec<FieldViolation>),
    Conflict(String),
    /// `available` is `None` when id disclosure is turned off.
    NotFound {
        id: UserId,
        available: Option<Vec<UserId>>,
    },
    Unauthorized(String),
    Fault(Fault),
}

impl ApiError {
    pub fn from_domain(err: DomainError, disclose_ids: bool) -> Self {
        match err {
            DomainError::InvalidArgument(msg) => ApiError::InvalidArgument(msg),
            DomainError::ValidationFailed(v) => ApiError::Validation(v),
            DomainError::Conflict(msg) => ApiError::Conflict(msg),
            DomainError::NotFound { id, available } => ApiError::NotFound {
                id,
                available: disclose_ids.then_some(available),
            },
            DomainError::Unauthorized => ApiError::Unauthorized("Unauthorized.".to_string()),
            DomainError::Internal(detail) => ApiError::Fault(Fault::new(FaultKind::Other, detail)),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        match self {
            ApiError::InvalidArgument(msg) => json_error(StatusCode::BAD_REQUEST, "invalid_argument", msg),
            ApiError::Validation(violations) => (
                StatusCode::BAD_REQUEST,
                axum::Json(json!({
                    "error": "validation_failed",
                    "message": "One or more validation errors occurred.",
                    "errors": violations,
                })),
            )
                .into_response(),
            ApiError::Conflict(msg) => json_error(StatusCode::BAD_REQUEST, "conflict", msg),
            ApiError::NotFound { id, available } => {
                let mut body = json!({
                    "error": "not_found",
                    "message": format!("User with ID {id} not found."),
                });
                if let Some(available) = available {
                    body["availableIds"] = json!(available);
                }
                (StatusCode::NOT_FOUND, axum::Json(body)).into_response()
            }
            ApiError::Unauthorized(msg) => json_error(StatusCode::UNAUTHORIZED, "unauthorized", msg),
            ApiError::Fault(fault) => {
                let mut res = fault.kind.status().into_response();
                res.extensions_mut().insert(fault);
                res
            }
        }
    }
}

pub fn json_error(status: StatusCode, code: &'static str, message: impl Into<String>) -> Response {
    (
        status,
        axum::Json(json!({
            "error": code,
            "message": message.into(),
        })),
    )
        .into_response()
}
