use axum::http::StatusCode;
use axum::response::IntoResponse;
use serde_json::json;

use eanpay_core::DomainError;
use eanpay_gateway::{GatewayError, Notices};

pub fn gateway_error_to_response(err: GatewayError) -> axum::response::Response {
    match err {
        GatewayError::Submission(e) => json_error(
            StatusCode::UNPROCESSABLE_ENTITY,
            e.code(),
            e.notice(),
        ),
        GatewayError::Disabled => json_error(
            StatusCode::SERVICE_UNAVAILABLE,
            "gateway_disabled",
            "EAN payment is disabled",
        ),
        GatewayError::Domain(e) => domain_error_to_response(e),
        GatewayError::Template(msg) => {
            tracing::warn!(error = %msg, "template rendering failed");
            json_error(StatusCode::INTERNAL_SERVER_ERROR, "template_error", msg)
        }
    }
}

pub fn domain_error_to_response(err: DomainError) -> axum::response::Response {
    match err {
        DomainError::Validation(msg) => json_error(StatusCode::BAD_REQUEST, "validation_error", msg),
        DomainError::InvalidId(msg) => json_error(StatusCode::BAD_REQUEST, "invalid_id", msg),
        DomainError::NotFound => json_error(StatusCode::NOT_FOUND, "not_found", "not found"),
        DomainError::Host(msg) => {
            tracing::warn!(error = %msg, "order host failure");
            json_error(StatusCode::BAD_GATEWAY, "host_error", msg)
        }
    }
}

/// 422 carrying the checkout notices the buyer should see.
pub fn notices_response(notices: &Notices) -> axum::response::Response {
    (
        StatusCode::UNPROCESSABLE_ENTITY,
        axum::Json(json!({
            "error": "validation_error",
            "notices": notices,
        })),
    )
        .into_response()
}

pub fn json_error(
    status: StatusCode,
    code: &'static str,
    message: impl Into<String>,
) -> axum::response::Response {
    (
        status,
        axum::Json(json!({
            "error": code,
            "message": message.into(),
        })),
    )
        .into_response()
}
