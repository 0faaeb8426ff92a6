//! Error taxonomy and response envelopes.
//!
//! Every failure is converted to a JSON envelope at the handler boundary;
//! `error` is always present and always a string. Diagnostic detail is
//! emitted only in development mode.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;
use thiserror::Error;

/// Failure classes for one relayed request.
#[derive(Debug, Error)]
pub enum RelayError {
    /// No derivable target URL in path or query.
    #[error("include a target URL in the request path or the `url` query parameter")]
    MissingTarget,

    /// Derived target failed the allowed-prefix check.
    #[error("target URL must start with {prefix}")]
    InvalidTarget { prefix: String },

    /// Inbound method is not part of the relay surface.
    #[error("only GET and POST requests are supported")]
    UnsupportedMethod,

    /// Inbound body could not be read (too large or aborted).
    #[error("failed to read request body")]
    BodyRead,

    /// Inbound body was not a JSON document.
    #[error("request body must be a JSON document")]
    InvalidBody(#[source] serde_json::Error),

    /// The credential is absent from configuration.
    #[error("server configuration error: missing authorization credential")]
    MissingCredential,

    /// Upstream answered with a non-success status.
    #[error("upstream rejected the request with status {status}")]
    UpstreamRejected {
        status: StatusCode,
        body: String,
        url: String,
    },

    /// Upstream answered 2xx with a body that is not JSON.
    #[error("upstream returned a success status with a non-JSON body")]
    UpstreamFormat {
        #[source]
        source: serde_json::Error,
        url: String,
    },

    /// The outbound call failed at the transport layer.
    #[error("error occurred while fetching upstream data")]
    Transport(#[from] reqwest::Error),
}

/// JSON error envelope returned to callers.
#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub error: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<u16>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub detail: Option<String>,
}

impl RelayError {
    /// Status the relay answers with for this failure class.
    pub fn status(&self) -> StatusCode {
        match self {
            RelayError::MissingTarget
            | RelayError::InvalidTarget { .. }
            | RelayError::BodyRead
            | RelayError::InvalidBody(_) => StatusCode::BAD_REQUEST,
            RelayError::UnsupportedMethod => StatusCode::METHOD_NOT_ALLOWED,
            RelayError::UpstreamRejected { status, .. } => *status,
            RelayError::MissingCredential
            | RelayError::UpstreamFormat { .. }
            | RelayError::Transport(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Build the caller-facing envelope.
    ///
    /// `include_detail` gates the debug representation of the underlying
    /// failure; it must be false outside development mode. The credential is
    /// never part of any envelope.
    pub fn envelope(&self, include_detail: bool) -> ErrorBody {
        match self {
            RelayError::UpstreamRejected { status, body, url } => ErrorBody {
                error: body.clone(),
                status: Some(status.as_u16()),
                message: None,
                url: Some(url.clone()),
                detail: None,
            },
            RelayError::UpstreamFormat { source, url } => ErrorBody {
                error: self.to_string(),
                status: None,
                message: Some(source.to_string()),
                url: Some(url.clone()),
                detail: None,
            },
            RelayError::Transport(source) => ErrorBody {
                error: self.to_string(),
                status: None,
                message: Some(source.to_string()),
                url: None,
                detail: include_detail.then(|| format!("{:?}", source)),
            },
            RelayError::InvalidBody(source) => ErrorBody {
                error: self.to_string(),
                status: None,
                message: Some(source.to_string()),
                url: None,
                detail: None,
            },
            _ => ErrorBody {
                error: self.to_string(),
                status: None,
                message: None,
                url: None,
                detail: None,
            },
        }
    }

    /// Convert into the HTTP response written back to the caller.
    pub fn to_response(self, include_detail: bool) -> Response {
        let status = self.status();
        let body = self.envelope(include_detail);
        (status, Json(body)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn transport_error() -> reqwest::Error {
        reqwest::Client::new().get("not a url").build().unwrap_err()
    }

    #[test]
    fn test_upstream_rejection_carries_raw_text_and_status() {
        let error = RelayError::UpstreamRejected {
            status: StatusCode::NOT_FOUND,
            body: "not found".to_string(),
            url: "https://api.1inch.dev/missing".to_string(),
        };

        assert_eq!(error.status(), StatusCode::NOT_FOUND);
        let envelope = error.envelope(false);
        assert_eq!(envelope.error, "not found");
        assert_eq!(envelope.status, Some(404));
        assert_eq!(envelope.url.as_deref(), Some("https://api.1inch.dev/missing"));
    }

    #[test]
    fn test_client_errors_are_bad_request() {
        assert_eq!(RelayError::MissingTarget.status(), StatusCode::BAD_REQUEST);

        let error = RelayError::InvalidTarget {
            prefix: "https://api.1inch.dev".to_string(),
        };
        assert_eq!(error.status(), StatusCode::BAD_REQUEST);
        assert!(error.envelope(false).error.contains("https://api.1inch.dev"));
    }

    #[test]
    fn test_credential_error_never_echoes_a_value() {
        let envelope = RelayError::MissingCredential.envelope(true);
        assert_eq!(
            envelope.error,
            "server configuration error: missing authorization credential"
        );
        assert!(envelope.message.is_none());
        assert!(envelope.detail.is_none());
    }

    #[test]
    fn test_transport_detail_only_in_development() {
        let error = RelayError::Transport(transport_error());
        assert_eq!(error.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert!(error.envelope(true).detail.is_some());
        assert!(error.envelope(false).detail.is_none());
        assert!(error.envelope(false).message.is_some());
    }

    #[test]
    fn test_envelope_omits_absent_fields() {
        let json = serde_json::to_value(RelayError::MissingTarget.envelope(false)).unwrap();
        let object = json.as_object().unwrap();
        assert_eq!(object.len(), 1);
        assert!(object["error"].is_string());
    }
}
