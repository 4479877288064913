use axum::{routing::get, Router};

pub mod admin;
pub mod checkout;
pub mod common;
pub mod orders;
pub mod system;

/// Router for every endpoint (services are attached by `build_app`).
pub fn router() -> Router {
    Router::new()
        .route("/health", get(system::health))
        .route("/gateway", get(system::gateway_info))
        .nest("/checkout", checkout::router())
        .nest("/orders", orders::router())
        .nest("/admin", admin::router())
}
