//! HTTP serving surface.
//!
//! # Data Flow
//! ```text
//! TCP connection
//!     → server.rs (Axum setup, middleware, handler dispatch)
//!     → relay::target / relay::policy (derive & gate the outbound URL)
//!     → relay::forwarder (one outbound call, injected headers)
//!     → server.rs (map the result or error onto the caller's response)
//! ```

pub mod health;
pub mod request;
pub mod server;

pub use request::{UuidRequestId, X_REQUEST_ID};
pub use server::HttpServer;
