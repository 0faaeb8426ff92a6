//! Health and introspection endpoint.

use axum::Json;
use chrono::Utc;
use serde::Serialize;

use crate::http::server::AppState;

/// Static payload served for `GET /` with no target-deriving content.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HealthPayload {
    pub status: &'static str,
    pub message: &'static str,
    pub environment: &'static str,
    pub has_authorization: bool,
    pub timestamp: String,
    pub usage: &'static str,
}

/// Describe the relay without attempting any outbound call.
pub fn health_payload(state: &AppState) -> Json<HealthPayload> {
    Json(HealthPayload {
        status: "OK",
        message: "1inch API relay is running",
        environment: state.config.environment.as_str(),
        has_authorization: state.injected.is_some(),
        timestamp: Utc::now().to_rfc3339(),
        usage: "Append the 1inch API URL to the relay address, e.g., \
                /https://api.1inch.dev/fusion/orders/v1.0/1/order/active",
    })
}
