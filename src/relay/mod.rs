//! The forwarding core.
//!
//! # Data Flow
//! ```text
//! inbound request URI
//!     → target.rs (derive the outbound URL)
//!     → policy.rs (prefix gate + credential presence)
//!     → forwarder.rs (single outbound call, injected headers only)
//!     → forwarder.rs (map the upstream result onto the relayed response)
//! ```
//!
//! # Design Decisions
//! - Derivation and result mapping are pure functions; only dispatch touches
//!   the network, so tests cover the decision surface without sockets
//! - One outbound call per inbound request: no retries, no added timeouts

pub mod error;
pub mod forwarder;
pub mod policy;
pub mod target;

pub use error::RelayError;
pub use forwarder::{Forwarder, UpstreamReply};
