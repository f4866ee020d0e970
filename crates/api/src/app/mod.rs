//! HTTP API application wiring (Axum router + service wiring).
//!
//! - `services.rs`: store wiring and the operations handlers call
//! - `routes/`: HTTP routes + handlers
//! - `dto.rs`: request DTOs and body/path parsing
//! - `errors.rs`: consistent error responses

use std::sync::Arc;

use axum::{Extension, Router};
use tower::ServiceBuilder;

use usersvc_auth::TokenAuthorizer;

use crate::config::ApiConfig;
use crate::middleware::{self, TokenGate};

pub mod dto;
pub mod errors;
pub mod routes;
pub mod services;

/// Build the full HTTP router (public entrypoint used by `main.rs`).
pub fn build_app(config: &ApiConfig) -> Router {
    let services = Arc::new(services::AppServices::in_memory(
        config.disclose_ids_on_not_found,
    ));
    build_router(services, Arc::new(config.tokens.clone()))
}

/// Router over explicit services and authorizer.
pub fn build_router(
    services: Arc<services::AppServices>,
    authorizer: Arc<dyn TokenAuthorizer>,
) -> Router {
    let gate = TokenGate::new(authorizer);

    routes::router()
        .merge(routes::public_router())
        .fallback(routes::system::fallback)
        .method_not_allowed_fallback(routes::system::method_not_allowed)
        .layer(Extension(services))
        .layer(
            // First layer is outermost.
            ServiceBuilder::new()
                .layer(axum::middleware::from_fn(middleware::exception_middleware))
                .layer(axum::middleware::from_fn_with_state(
                    gate,
                    middleware::token_gate_middleware,
                ))
                .layer(axum::middleware::from_fn(
                    middleware::request_logging_middleware,
                )),
        )
}
