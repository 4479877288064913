use std::sync::Arc;

use axum::{
    extract::{Extension, Path, Query},
    http::{header, StatusCode},
    response::IntoResponse,
    routing::get,
    Json, Router,
};

use crate::app::routes::common::parse_order_id;
use crate::app::services::AppServices;
use crate::app::{dto, errors};

pub fn router() -> Router {
    Router::new()
        .route("/:id", get(get_order))
        .route("/:id/ean/email", get(ean_email_section))
}

pub async fn get_order(
    Extension(services): Extension<Arc<AppServices>>,
    Path(id): Path<String>,
) -> axum::response::Response {
    let order_id = match parse_order_id(&id) {
        Ok(v) => v,
        Err(resp) => return resp,
    };
    match services.gateway.host().order(order_id) {
        Some(order) => (StatusCode::OK, Json(dto::order_to_json(order_id, order))).into_response(),
        None => errors::json_error(StatusCode::NOT_FOUND, "not_found", "order not found"),
    }
}

/// The "EAN Information" section of the buyer's confirmation email.
pub async fn ean_email_section(
    Extension(services): Extension<Arc<AppServices>>,
    Path(id): Path<String>,
    Query(query): Query<dto::EmailQuery>,
) -> axum::response::Response {
    let order_id = match parse_order_id(&id) {
        Ok(v) => v,
        Err(resp) => return resp,
    };

    let content_type = if query.plain_text {
        "text/plain; charset=utf-8"
    } else {
        "text/html; charset=utf-8"
    };

    match services.gateway.email_instructions(order_id, query.plain_text) {
        Ok(Some(body)) => ([(header::CONTENT_TYPE, content_type)], body).into_response(),
        Ok(None) => errors::json_error(
            StatusCode::NOT_FOUND,
            "not_found",
            "no EAN details for order",
        ),
        Err(e) => errors::gateway_error_to_response(e),
    }
}
