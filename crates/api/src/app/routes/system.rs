use std::sync::Arc;

use axum::{extract::Extension, http::StatusCode, response::IntoResponse, Json};

use crate::app::services::AppServices;

pub async fn health() -> StatusCode {
    StatusCode::OK
}

/// Gateway description plus its admin settings form.
pub async fn gateway_info(Extension(services): Extension<Arc<AppServices>>) -> impl IntoResponse {
    let gw = &services.gateway;
    let settings = gw.settings();
    Json(serde_json::json!({
        "id": gw.id(),
        "method_title": gw.method_title(),
        "method_description": gw.method_description(),
        "title": settings.title,
        "description": settings.description,
        "enabled": settings.enabled,
        "has_fields": gw.has_fields(),
        "form_fields": gw.form_fields(),
    }))
}
