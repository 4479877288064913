//! HTTP API application wiring (Axum router + service wiring).
//!
//! - `services.rs`: gateway wiring (metadata store, order host, translator)
//! - `routes/`: HTTP routes + handlers (one file per area)
//! - `dto.rs`: request/response DTOs and JSON mapping helpers
//! - `errors.rs`: consistent error responses

use std::sync::Arc;

use axum::{Extension, Router};

use crate::config::ApiConfig;

pub mod dto;
pub mod errors;
pub mod routes;
pub mod services;

/// Build the full HTTP router (public entrypoint used by `main.rs`).
pub fn build_app(config: &ApiConfig) -> anyhow::Result<Router> {
    let services = Arc::new(services::build_services(config)?);
    Ok(routes::router().layer(Extension(services)))
}
