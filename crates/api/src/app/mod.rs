//! HTTP API application wiring (Axum router + service wiring).
//!
//! - `services.rs`: engine construction over the in-memory store
//! - `routes/`: HTTP routes + handlers (one file per area)
//! - `dto.rs`: request DTOs and input parsing helpers
//! - `errors.rs`: consistent error responses

use std::sync::Arc;

use axum::{Extension, Router, routing::get};
use tower::ServiceBuilder;

pub mod dto;
pub mod errors;
pub mod routes;
pub mod services;

pub use services::LedgerEngine;

/// Build the full HTTP router around an existing engine.
pub fn build_app(engine: Arc<LedgerEngine>) -> Router {
    Router::new()
        .route("/health", get(routes::system::health))
        .merge(routes::router())
        .layer(ServiceBuilder::new().layer(Extension(engine)))
}

/// Router over a fresh, empty ledger (public entrypoint used by `main.rs`).
pub fn build_default_app() -> Router {
    build_app(services::build_services())
}
