use std::sync::Arc;

use axum::{
    extract::{Extension, Path},
    http::StatusCode,
    response::{Html, IntoResponse},
    routing::{get, post},
    Form, Json, Router,
};

use eanpay_gateway::{GatewayError, Notices};

use crate::app::routes::common::parse_order_id;
use crate::app::services::AppServices;
use crate::app::{dto, errors};

pub fn router() -> Router {
    Router::new()
        .route("/payment-fields", get(payment_fields))
        .route("/orders/:id/ean-payment", post(submit_ean_payment))
}

pub async fn payment_fields(
    Extension(services): Extension<Arc<AppServices>>,
) -> axum::response::Response {
    match services.gateway.payment_fields() {
        Ok(html) => Html(html).into_response(),
        Err(e) => errors::gateway_error_to_response(e),
    }
}

/// Validate the EAN form and, if it passes, place the order on hold.
///
/// A request without a readable form body counts as a missing submission
/// and gets the same notice response as any other rule failure.
pub async fn submit_ean_payment(
    Extension(services): Extension<Arc<AppServices>>,
    Path(id): Path<String>,
    form: Option<Form<dto::EanPaymentForm>>,
) -> axum::response::Response {
    let order_id = match parse_order_id(&id) {
        Ok(v) => v,
        Err(resp) => return resp,
    };

    let gateway = &services.gateway;
    if !gateway.is_available() {
        return errors::gateway_error_to_response(GatewayError::Disabled);
    }

    let submission = form.and_then(|Form(form)| form.into_submission());

    let mut notices = Notices::new();
    if !gateway.validate_fields(submission.as_ref(), &mut notices) {
        return errors::notices_response(&notices);
    }

    match gateway.process_payment(order_id, submission.as_ref()) {
        Ok(outcome) => (StatusCode::OK, Json(outcome)).into_response(),
        Err(e) => errors::gateway_error_to_response(e),
    }
}
