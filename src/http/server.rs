//! HTTP server setup and request handling.
//!
//! # Responsibilities
//! - Create the Axum router and wire up middleware (request ID, tracing, CORS)
//! - Distinguish the health endpoint from proxy traffic
//! - Run each request through derive → gate → forward → map
//! - Convert every failure into a JSON envelope; nothing escapes the handler

use std::sync::Arc;

use axum::{
    body::Body,
    extract::State,
    http::{header, HeaderMap, HeaderValue, Method, Request},
    response::{IntoResponse, Response},
    routing::any,
    Router,
};
use tokio::net::TcpListener;
use tower_http::{
    cors::CorsLayer,
    request_id::{PropagateRequestIdLayer, SetRequestIdLayer},
    trace::TraceLayer,
};

use crate::config::RelayConfig;
use crate::http::health;
use crate::http::request::{UuidRequestId, X_REQUEST_ID};
use crate::relay::error::RelayError;
use crate::relay::forwarder::{map_reply, outbound_body, Forwarder};
use crate::relay::{policy, target};

/// Application state injected into handlers.
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<RelayConfig>,
    pub forwarder: Forwarder,
    /// Outbound header set, computed once at startup. `None` means the
    /// credential is not configured and proxying is rejected per request.
    pub injected: Option<Arc<HeaderMap>>,
}

/// HTTP server for the relay.
pub struct HttpServer {
    router: Router,
}

impl HttpServer {
    /// Create a new HTTP server with the given configuration.
    pub fn new(config: RelayConfig) -> Self {
        let injected = injected_headers(&config).map(Arc::new);

        let state = AppState {
            config: Arc::new(config),
            forwarder: Forwarder::new(),
            injected,
        };

        let router = Self::build_router(state);
        Self { router }
    }

    /// Build the Axum router with all middleware layers.
    fn build_router(state: AppState) -> Router {
        Router::new()
            .route("/", any(root_handler))
            .route("/{*path}", any(proxy_handler))
            .with_state(state)
            .layer(CorsLayer::permissive())
            .layer(PropagateRequestIdLayer::x_request_id())
            .layer(TraceLayer::new_for_http())
            .layer(SetRequestIdLayer::x_request_id(UuidRequestId))
    }

    /// Run the server, accepting connections on the given listener.
    pub async fn run(self, listener: TcpListener) -> Result<(), std::io::Error> {
        let addr = listener.local_addr()?;
        tracing::info!(
            address = %addr,
            "HTTP server starting"
        );

        axum::serve(listener, self.router)
            .with_graceful_shutdown(shutdown_signal())
            .await?;

        tracing::info!("HTTP server stopped");
        Ok(())
    }

    /// Access the underlying router (used by in-process tests).
    pub fn into_router(self) -> Router {
        self.router
    }
}

/// Build the fixed outbound header set from configuration.
///
/// Returns `None` when the credential is absent or not a legal header value;
/// the relay then runs degraded and rejects proxy attempts per request.
fn injected_headers(config: &RelayConfig) -> Option<HeaderMap> {
    let token = config.auth.token.as_deref().filter(|token| !token.is_empty())?;

    let authorization = match HeaderValue::from_str(token) {
        Ok(value) => value,
        Err(_) => {
            tracing::error!("configured credential is not a valid header value");
            return None;
        }
    };

    let mut headers = HeaderMap::new();
    headers.insert(header::AUTHORIZATION, authorization);
    headers.insert(
        header::CONTENT_TYPE,
        HeaderValue::from_static("application/json"),
    );
    Some(headers)
}

/// Handler for the root path: health check unless the query names a target.
async fn root_handler(State(state): State<AppState>, request: Request<Body>) -> Response {
    if request.method() == Method::GET && target::url_param(request.uri()).is_none() {
        return health::health_payload(&state).into_response();
    }
    relay_request(state, request).await
}

/// Handler for every non-root path: always proxy traffic.
async fn proxy_handler(State(state): State<AppState>, request: Request<Body>) -> Response {
    relay_request(state, request).await
}

/// Run one request through the relay pipeline, converting failures into
/// JSON envelopes at this boundary.
async fn relay_request(state: AppState, request: Request<Body>) -> Response {
    let include_detail = state.config.environment.is_development();
    let request_id = request
        .headers()
        .get(X_REQUEST_ID)
        .and_then(|v| v.to_str().ok())
        .unwrap_or("unknown")
        .to_string();

    match relay(&state, request, &request_id).await {
        Ok(response) => response,
        Err(error) => {
            tracing::warn!(
                request_id = %request_id,
                status = %error.status(),
                error = %error,
                "Relay request failed"
            );
            error.to_response(include_detail)
        }
    }
}

async fn relay(
    state: &AppState,
    request: Request<Body>,
    request_id: &str,
) -> Result<Response, RelayError> {
    let (parts, body) = request.into_parts();

    if parts.method != Method::GET && parts.method != Method::POST {
        return Err(RelayError::UnsupportedMethod);
    }

    let target = target::derive_target(&parts.uri).ok_or(RelayError::MissingTarget)?;
    policy::validate_target(&target, &state.config.upstream.base_url)?;
    let injected = policy::require_credential(state.injected.as_deref())?;

    let body = if parts.method == Method::POST {
        let bytes = axum::body::to_bytes(body, state.config.listener.max_body_bytes)
            .await
            .map_err(|_| RelayError::BodyRead)?;
        Some(outbound_body(&bytes)?)
    } else {
        None
    };

    tracing::debug!(
        request_id = %request_id,
        method = %parts.method,
        target = %target,
        "Forwarding request"
    );

    let reply = state
        .forwarder
        .dispatch(parts.method.clone(), &target, injected, body)
        .await?;

    tracing::debug!(
        request_id = %request_id,
        status = %reply.status,
        "Upstream replied"
    );

    map_reply(reply, &target)
}

/// Wait for shutdown signal (Ctrl+C).
async fn shutdown_signal() {
    tokio::signal::ctrl_c()
        .await
        .expect("Failed to install Ctrl+C handler");
    tracing::info!("Shutdown signal received");
}
