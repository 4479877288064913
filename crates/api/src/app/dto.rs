use serde::Deserialize;

use eanpay_core::OrderId;
use eanpay_gateway::{EanSubmission, OrderRecord};

// -------------------------
// Request DTOs
// -------------------------

/// Checkout form body (`application/x-www-form-urlencoded`).
///
/// Field names follow the inputs rendered by the payment-fields template.
#[derive(Debug, Default, Deserialize)]
pub struct EanPaymentForm {
    #[serde(rename = "ean_payment[ean_num]")]
    pub ean_num: Option<String>,
    #[serde(rename = "ean_payment[ref_name]")]
    pub ref_name: Option<String>,
    #[serde(rename = "ean_payment[req_num]")]
    pub req_num: Option<String>,
}

impl EanPaymentForm {
    /// `None` when the form carried none of the EAN fields.
    pub fn into_submission(self) -> Option<EanSubmission> {
        let submission = EanSubmission {
            ean_num: self.ean_num,
            ref_name: self.ref_name,
            req_num: self.req_num,
        };
        (!submission.is_absent()).then_some(submission)
    }
}

#[derive(Debug, Default, Deserialize)]
pub struct EmailQuery {
    #[serde(default)]
    pub plain_text: bool,
}

// -------------------------
// Response mapping
// -------------------------

pub fn order_to_json(order_id: OrderId, order: OrderRecord) -> serde_json::Value {
    serde_json::json!({
        "id": order_id.to_string(),
        "status": order.status,
        "history": order.history,
        "stock_reductions": order.stock_reductions,
        "cart_emptied": order.cart_emptied,
    })
}
