//! Configuration loading from disk and process environment.

use std::fs;
use std::path::Path;

use thiserror::Error;

use crate::config::schema::{Environment, RelayConfig};
use crate::config::validation::{validate_config, ValidationError};

/// Error type for configuration loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Parse error: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Validation failed: {}", format_errors(.0))]
    Validation(Vec<ValidationError>),
}

fn format_errors(errors: &[ValidationError]) -> String {
    errors
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(", ")
}

/// Load configuration from an optional TOML file, overlay environment
/// variables, and validate the result.
pub fn load_config(path: Option<&Path>) -> Result<RelayConfig, ConfigError> {
    let mut config = match path {
        Some(path) => toml::from_str(&fs::read_to_string(path)?)?,
        None => RelayConfig::default(),
    };

    apply_env_overrides(&mut config, |name| std::env::var(name).ok());

    validate_config(&config).map_err(ConfigError::Validation)?;

    Ok(config)
}

/// Overlay process-environment values onto a parsed config.
///
/// `AUTHORIZATION` carries the upstream credential, `PORT` rewrites the
/// listener port, `RELAY_ENV` selects the deployment mode. The lookup
/// function is injected so tests never touch real process environment.
pub fn apply_env_overrides<F>(config: &mut RelayConfig, get: F)
where
    F: Fn(&str) -> Option<String>,
{
    if let Some(token) = get("AUTHORIZATION").filter(|token| !token.is_empty()) {
        config.auth.token = Some(token);
    }

    if let Some(port) = get("PORT").and_then(|port| port.parse::<u16>().ok()) {
        let host = config
            .listener
            .bind_address
            .rsplit_once(':')
            .map(|(host, _)| host.to_string())
            .unwrap_or_else(|| "0.0.0.0".to_string());
        config.listener.bind_address = format!("{}:{}", host, port);
    }

    if let Some(mode) = get("RELAY_ENV") {
        config.environment = if mode == "production" {
            Environment::Production
        } else {
            Environment::Development
        };
    }
}
