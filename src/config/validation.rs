//! Semantic configuration checks.
//!
//! Serde guarantees the config is well-formed; this module checks that the
//! values make sense before the server starts. A missing credential is
//! deliberately not an error here: the relay starts degraded, answers the
//! health endpoint, and rejects proxy attempts per request.

use std::net::SocketAddr;

use thiserror::Error;
use url::Url;

use crate::config::schema::RelayConfig;

#[derive(Debug, Error)]
pub enum ValidationError {
    #[error("listener.bind_address `{0}` is not a valid socket address")]
    BindAddress(String),

    #[error("upstream.base_url must not be empty")]
    EmptyBaseUrl,

    #[error("upstream.base_url `{0}` is not a valid URL")]
    BaseUrlParse(String),

    #[error("upstream.base_url `{0}` must use http or https")]
    BaseUrlScheme(String),
}

/// Validate semantic constraints on a parsed configuration.
pub fn validate_config(config: &RelayConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    if config.listener.bind_address.parse::<SocketAddr>().is_err() {
        errors.push(ValidationError::BindAddress(
            config.listener.bind_address.clone(),
        ));
    }

    let base = &config.upstream.base_url;
    if base.is_empty() {
        errors.push(ValidationError::EmptyBaseUrl);
    } else {
        // Parsed once here; the per-request gate stays a raw prefix check.
        match Url::parse(base) {
            Ok(url) if url.scheme() == "http" || url.scheme() == "https" => {}
            Ok(_) => errors.push(ValidationError::BaseUrlScheme(base.clone())),
            Err(_) => errors.push(ValidationError::BaseUrlParse(base.clone())),
        }
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}
