use axum::http::StatusCode;

use eanpay_core::OrderId;

use crate::app::errors;

/// Parse an order id path segment, mapping failure to a 400 response.
pub fn parse_order_id(raw: &str) -> Result<OrderId, axum::response::Response> {
    raw.parse()
        .map_err(|_| errors::json_error(StatusCode::BAD_REQUEST, "invalid_id", "invalid order id"))
}
