use serde::Deserialize;

use usersvc_core::UserId;
use usersvc_users::{ListRequest, UserPayload};

use crate::app::errors::ApiError;

// -------------------------
// Request DTOs
// -------------------------

/// Query string of `GET /users`.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListUsersParams {
    pub page: Option<i64>,
    pub page_size: Option<i64>,
    pub name_filter: Option<String>,
    pub email_filter: Option<String>,
    pub sort_by: Option<String>,
    pub sort_order: Option<String>,
}

impl From<ListUsersParams> for ListRequest {
    fn from(p: ListUsersParams) -> Self {
        ListRequest {
            page: p.page,
            page_size: p.page_size,
            name_filter: p.name_filter,
            email_filter: p.email_filter,
            sort_by: p.sort_by,
            sort_order: p.sort_order,
        }
    }
}

// -------------------------
// Parsing helpers
// -------------------------

/// Parse the `{id}` path segment. Non-numeric and non-positive ids are both
/// client errors, distinct from not-found.
pub fn parse_user_id(raw: &str) -> Result<UserId, ApiError> {
    raw.parse::<UserId>()
        .map_err(|e| ApiError::from_domain(e, false))
}

/// Parse a create/update body. An empty body or `null` means "no payload".
pub fn parse_user_payload(body: &[u8]) -> Result<Option<UserPayload>, ApiError> {
    if body.iter().all(u8::is_ascii_whitespace) {
        return Ok(None);
    }
    serde_json::from_slice::<Option<UserPayload>>(body)
        .map_err(|e| ApiError::InvalidArgument(format!("Invalid JSON body: {e}")))
}
