//! The access-control gate.
//!
//! # Design Decisions
//! - The prefix check is a raw byte comparison: case-sensitive, no
//!   trailing-slash normalization, no relative-segment resolution. Parsing
//!   or normalizing here would change what the gate accepts.
//! - The credential is checked per request so a misconfigured deployment
//!   still serves the health endpoint and reports itself.

use axum::http::HeaderMap;

use crate::relay::error::RelayError;

/// Reject any derived target that does not start with the allowed prefix.
pub fn validate_target(target: &str, allowed_prefix: &str) -> Result<(), RelayError> {
    if target.starts_with(allowed_prefix) {
        Ok(())
    } else {
        Err(RelayError::InvalidTarget {
            prefix: allowed_prefix.to_string(),
        })
    }
}

/// Require the precomputed outbound header set, i.e. a configured credential.
pub fn require_credential(injected: Option<&HeaderMap>) -> Result<&HeaderMap, RelayError> {
    injected.ok_or(RelayError::MissingCredential)
}
