//! HTTP server layer
//!
//! Axum server with:
//! - Permissive CORS (any origin)
//! - Request tracing
//! - Graceful shutdown
//! - JSON error responses with stable error codes

pub mod server;
pub mod error;
pub mod extractors;
pub mod routes;

pub use server::{build_router, run_server, AppState, ServerConfig, ServerError};
pub use error::ApiError;
