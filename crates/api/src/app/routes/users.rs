use std::sync::Arc;

use axum::{
    body::Bytes,
    extract::{rejection::QueryRejection, Extension, Path, Query},
    http::{header, StatusCode},
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};

use usersvc_core::Entity;

use crate::app::dto::{self, ListUsersParams};
use crate::app::errors::ApiError;
use crate::app::services::AppServices;

pub fn router() -> Router {
    Router::new()
        .route("/", get(list_users).post(create_user))
        .route("/:id", get(get_user).put(update_user).delete(delete_user))
}

pub async fn list_users(
    Extension(services): Extension<Arc<AppServices>>,
    params: Result<Query<ListUsersParams>, QueryRejection>,
) -> Result<Response, ApiError> {
    let Query(params) = params
        .map_err(|e| ApiError::InvalidArgument(format!("Invalid query parameters: {}", e.body_text())))?;
    let page = services.list_users(params.into())?;
    Ok((StatusCode::OK, Json(page)).into_response())
}

pub async fn get_user(
    Extension(services): Extension<Arc<AppServices>>,
    Path(id): Path<String>,
) -> Result<Response, ApiError> {
    let id = dto::parse_user_id(&id)?;
    let user = services.get_user(id)?;
    Ok((StatusCode::OK, Json(user)).into_response())
}

pub async fn create_user(
    Extension(services): Extension<Arc<AppServices>>,
    body: Bytes,
) -> Result<Response, ApiError> {
    let payload = dto::parse_user_payload(&body)?;
    let user = services.create_user(payload.as_ref())?;
    let location = format!("/users/{}", user.id());
    Ok((StatusCode::CREATED, [(header::LOCATION, location)], Json(user)).into_response())
}

pub async fn update_user(
    Extension(services): Extension<Arc<AppServices>>,
    Path(id): Path<String>,
    body: Bytes,
) -> Result<Response, ApiError> {
    let id = dto::parse_user_id(&id)?;
    let payload = dto::parse_user_payload(&body)?;
    let user = services.update_user(id, payload.as_ref())?;
    Ok((StatusCode::OK, Json(user)).into_response())
}

pub async fn delete_user(
    Extension(services): Extension<Arc<AppServices>>,
    Path(id): Path<String>,
) -> Result<Response, ApiError> {
    let id = dto::parse_user_id(&id)?;
    services.delete_user(id)?;
    Ok(StatusCode::NO_CONTENT.into_response())
}
