//! Outbound dispatch and upstream-result mapping.
//!
//! # Responsibilities
//! - Issue exactly one upstream call per inbound request
//! - Attach the injected header set; inbound headers are never forwarded
//! - Map the upstream status and body onto the relayed response

use axum::body::Bytes;
use axum::http::{HeaderMap, Method, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::Json;

use crate::relay::error::RelayError;

/// Status and raw body of one upstream exchange.
#[derive(Debug)]
pub struct UpstreamReply {
    pub status: StatusCode,
    pub body: Bytes,
}

/// Issues the single outbound call for a relayed request.
///
/// Holds the one process-wide HTTP client; there are no retries and no
/// timeouts beyond the transport defaults.
#[derive(Debug, Clone, Default)]
pub struct Forwarder {
    client: reqwest::Client,
}

impl Forwarder {
    pub fn new() -> Self {
        Self {
            client: reqwest::Client::new(),
        }
    }

    /// Dispatch one request to the validated target.
    ///
    /// `injected` is the complete outbound header set.
    pub async fn dispatch(
        &self,
        method: Method,
        target: &str,
        injected: &HeaderMap,
        body: Option<Bytes>,
    ) -> Result<UpstreamReply, RelayError> {
        let mut request = self.client.request(method, target).headers(injected.clone());
        if let Some(body) = body {
            request = request.body(body);
        }

        let response = request.send().await?;
        let status = response.status();
        let body = response.bytes().await?;

        Ok(UpstreamReply { status, body })
    }
}

/// Map an upstream reply onto the response relayed to the caller.
///
/// Success bodies are re-emitted as JSON with the relay's own 200; upstream
/// failure statuses pass through verbatim inside an error envelope.
pub fn map_reply(reply: UpstreamReply, target: &str) -> Result<Response, RelayError> {
    if reply.status.is_success() {
        let value: serde_json::Value =
            serde_json::from_slice(&reply.body).map_err(|source| RelayError::UpstreamFormat {
                source,
                url: target.to_string(),
            })?;
        Ok(Json(value).into_response())
    } else {
        Err(RelayError::UpstreamRejected {
            status: reply.status,
            body: String::from_utf8_lossy(&reply.body).into_owned(),
            url: target.to_string(),
        })
    }
}

/// Build the outbound body for a POST: the inbound JSON document, or its
/// nested `data` field when present. An empty inbound body forwards `{}`.
pub fn outbound_body(bytes: &Bytes) -> Result<Bytes, RelayError> {
    let value: serde_json::Value = if bytes.is_empty() {
        serde_json::Value::Object(serde_json::Map::new())
    } else {
        serde_json::from_slice(bytes).map_err(RelayError::InvalidBody)?
    };

    let payload = match &value {
        serde_json::Value::Object(map) if map.contains_key("data") => map["data"].clone(),
        _ => value,
    };

    let encoded = serde_json::to_vec(&payload).map_err(RelayError::InvalidBody)?;
    Ok(Bytes::from(encoded))
}
