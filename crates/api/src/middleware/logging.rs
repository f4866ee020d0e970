use std::time::Instant;

use axum::{body::Body, http::Request, middleware::Next, response::Response};
use tracing::Instrument;
use uuid::Uuid;

use crate::context::AuthContext;

/// Logs every request that reaches the router: method, path, final status
/// and latency. Handler logs are emitted inside the request span. Request and
/// response pass through unchanged.
pub async fn request_logging_middleware(req: Request<Body>, next: Next) -> Response {
    let request_id = Uuid::now_v7();
    let method = req.method().clone();
    let path = req.uri().path().to_owned();
    let auth = req
        .extensions()
        .get::<AuthContext>()
        .map(|ctx| ctx.source().as_str())
        .unwrap_or("none");

    let span = tracing::info_span!("request", %request_id, %method, %path);

    async move {
        let started = Instant::now();
        tracing::info!(auth, "request started");

        let response = next.run(req).await;

        let status = response.status().as_u16();
        let elapsed_ms = started.elapsed().as_millis() as u64;
        if response.status().is_server_error() {
            tracing::error!(status, elapsed_ms, "request completed");
        } else if response.status().is_client_error() {
            tracing::warn!(status, elapsed_ms, "request completed");
        } else {
            tracing::info!(status, elapsed_ms, "request completed");
        }

        response
    }
    .instrument(span)
    .await
}
