//! Credential-injecting relay for the 1inch developer API.
//!
//! The relay accepts requests whose path (or `url` query parameter) names a
//! full 1inch API URL, checks that the target starts with the allowed
//! upstream prefix, attaches the server-side `Authorization` header, and
//! relays the upstream response back to the caller. Callers never hold the
//! credential; the prefix check is the sole access-control gate keeping the
//! relay from being used against arbitrary hosts.

pub mod config;
pub mod http;
pub mod relay;

pub use config::RelayConfig;
pub use http::HttpServer;
