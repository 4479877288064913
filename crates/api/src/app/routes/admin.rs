use std::sync::Arc;

use axum::{
    extract::{Extension, Path},
    http::StatusCode,
    response::{Html, IntoResponse},
    routing::get,
    Json, Router,
};

use crate::app::errors;
use crate::app::routes::common::parse_order_id;
use crate::app::services::AppServices;

pub fn router() -> Router {
    Router::new()
        .route("/orders/:id/ean", get(ean_details))
        .route("/orders/:id/ean/meta", get(ean_meta))
}

/// "EAN Details" block for the admin order page.
pub async fn ean_details(
    Extension(services): Extension<Arc<AppServices>>,
    Path(id): Path<String>,
) -> axum::response::Response {
    let order_id = match parse_order_id(&id) {
        Ok(v) => v,
        Err(resp) => return resp,
    };
    match services.gateway.admin_order_details(order_id) {
        Ok(Some(html)) => Html(html).into_response(),
        Ok(None) => errors::json_error(StatusCode::NOT_FOUND, "not_found", "no EAN details for order"),
        Err(e) => errors::gateway_error_to_response(e),
    }
}

/// Raw stored metadata as JSON.
pub async fn ean_meta(
    Extension(services): Extension<Arc<AppServices>>,
    Path(id): Path<String>,
) -> axum::response::Response {
    let order_id = match parse_order_id(&id) {
        Ok(v) => v,
        Err(resp) => return resp,
    };
    match services.gateway.payment_meta(order_id) {
        Ok(Some(meta)) => (StatusCode::OK, Json(meta)).into_response(),
        Ok(None) => errors::json_error(StatusCode::NOT_FOUND, "not_found", "no EAN details for order"),
        Err(e) => errors::domain_error_to_response(e),
    }
}
