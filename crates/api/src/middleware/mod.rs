//! Request/response interceptors wrapped around the router.
//!
//! Order, outermost first (see [`crate::app::build_router`]):
//! 1. [`exception`]: rewrites faults and panics into the generic envelope
//! 2. [`token_gate`]: rejects requests without an authorized token
//! 3. [`logging`]: logs method, path, status and latency

pub mod exception;
pub mod logging;
pub mod token_gate;

pub use exception::exception_middleware;
pub use logging::request_logging_middleware;
pub use token_gate::{token_gate_middleware, TokenGate};
