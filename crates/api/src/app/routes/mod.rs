use axum::{routing::get, Router};

pub mod system;
pub mod users;

/// Router for all token-gated endpoints.
pub fn router() -> Router {
    Router::new().nest("/users", users::router())
}

/// Router for endpoints the token gate lets through unconditionally.
pub fn public_router() -> Router {
    Router::new()
        .route("/health", get(system::health))
        .route("/docs", get(system::docs))
}
