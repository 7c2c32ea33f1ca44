//! # itemstore-rest - HTTP API for the item store
//!
//! This crate exposes an [`ItemStore`] over HTTP. The same router-agnostic
//! handlers sit behind two interchangeable routers:
//!
//! - **mux** - an axum router with the tower-http middleware stack (tracing,
//!   timeouts, optional CORS)
//! - **minimal** - a matchit radix tree served directly on hyper connections
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use itemstore_persistence::backends::memory::MemoryBackend;
//! use itemstore_rest::{ServerConfig, create_app_with_config};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = ServerConfig::default();
//!     let app = create_app_with_config(MemoryBackend::new(), config.clone());
//!
//!     let listener = tokio::net::TcpListener::bind(config.socket_addr()).await?;
//!     axum::serve(listener, app).await?;
//!     Ok(())
//! }
//! ```
//!
//! ## API Endpoints
//!
//! | Method | Path | Success | Failure |
//! |--------|------|---------|---------|
//! | GET | `/items` | 200 + array | 500 |
//! | POST | `/items` | 201 + item | 400, 500 |
//! | GET | `/items/{id}` | 200 + item, `Etag` | 400, 404, 500 |
//! | PUT | `/items/{id}` | 200 + item, `Etag` | 400, 404, 412, 428, 500 |
//! | DELETE | `/items/{id}` | 204 | 400, 404, 500 |
//!
//! Requests carrying an `unauthorized` header are refused with 401 on every
//! path. Unknown method/path combinations answer 405.
//!
//! ## Conditional Updates
//!
//! `GET /items/{id}` returns the item's `updatedOn` rendering as `Etag`.
//! `PUT /items/{id}` must send that value back as `If-Match`; a stale token is
//! refused with 412 and a missing one with 428.
//!
//! ## Error Handling
//!
//! Errors are returned as `{"error": <message>, "path": <request path>}`.
//! See [`error`] for the status mapping.
//!
//! ## Configuration
//!
//! | Variable | Default | Description |
//! |----------|---------|-------------|
//! | `ITEMSTORE_PORT` | 8080 | Server port |
//! | `ITEMSTORE_HOST` | 127.0.0.1 | Host to bind |
//! | `ITEMSTORE_LOG_LEVEL` | info | Log level (error, warn, info, debug, trace) |
//! | `ITEMSTORE_MAX_BODY_SIZE` | 1048576 | Max request body size (bytes) |
//! | `ITEMSTORE_REQUEST_TIMEOUT` | 30 | Request timeout (seconds) |
//! | `ITEMSTORE_ENABLE_CORS` | false | Enable CORS |
//! | `ITEMSTORE_CORS_ORIGINS` | * | Allowed CORS origins |
//! | `ITEMSTORE_ROUTER` | mux | Router implementation (mux, minimal) |
//! | `ITEMSTORE_STORAGE` | sqlite | Storage backend (sqlite, mongodb, memory) |
//!
//! ## Architecture
//!
//! - [`error`] - Error types and the error-to-status mapping
//! - [`auth`] - Authorization policy
//! - [`config`] - Server configuration
//! - [`state`] - Application state (storage, configuration, policy)
//! - [`handlers`] - Router-agnostic item handlers
//! - [`middleware`] - Axum middleware and header extraction
//! - [`responses`] - Response building
//! - [`routing`] - The two routers

#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]

pub mod auth;
pub mod config;
pub mod error;
pub mod handlers;
pub mod middleware;
pub mod responses;
pub mod routing;
pub mod state;

// Re-export commonly used types
pub use auth::{AllowAll, AuthorizationPolicy, PolicyFn, UnauthorizedHeaderPolicy};
pub use config::{RouterFlavor, ServerConfig, StorageBackendMode};
pub use error::{ErrorResponse, RestError, RestResult, status_for};
pub use handlers::{ItemHandlers, RequestContext};
pub use responses::ApiResponse;
pub use routing::{MinimalRouter, shutdown_signal};
pub use state::AppState;

use std::sync::Arc;

use axum::Router;
use http::{HeaderName, header};
use itemstore_persistence::core::ItemStore;
use tower::ServiceBuilder;
use tower_http::{
    cors::{Any, CorsLayer},
    timeout::TimeoutLayer,
    trace::TraceLayer,
};
use tracing::info;

/// Creates the axum application with default configuration.
///
/// For more control, use [`create_app_with_config`] or [`create_app_with_state`].
pub fn create_app<S>(storage: S) -> Router
where
    S: ItemStore + 'static,
{
    create_app_with_config(storage, ServerConfig::default())
}

/// Creates the axum application with custom configuration.
///
/// # Example
///
/// ```
/// use itemstore_persistence::backends::memory::MemoryBackend;
/// use itemstore_rest::{ServerConfig, create_app_with_config};
///
/// let config = ServerConfig {
///     port: 3000,
///     enable_cors: true,
///     ..ServerConfig::for_testing()
/// };
/// let app = create_app_with_config(MemoryBackend::new(), config);
/// ```
pub fn create_app_with_config<S>(storage: S, config: ServerConfig) -> Router
where
    S: ItemStore + 'static,
{
    create_app_with_state(AppState::new(Arc::new(storage), config))
}

/// Creates the axum application from a prepared state.
///
/// Use this to install a custom [`AuthorizationPolicy`] or to share the store
/// with the caller.
pub fn create_app_with_state<S>(state: AppState<S>) -> Router
where
    S: ItemStore + 'static,
{
    info!(
        "Creating REST API server with backend: {}",
        state.storage().backend_name()
    );

    let config = state.config().clone();
    let router = routing::mux::create_routes(state);

    // Build middleware stack
    let service_builder = ServiceBuilder::new()
        .layer(TraceLayer::new_for_http())
        .layer(TimeoutLayer::with_status_code(
            http::StatusCode::REQUEST_TIMEOUT,
            std::time::Duration::from_secs(config.request_timeout),
        ));

    // Add CORS if enabled
    let router = if config.enable_cors {
        router.layer(build_cors_layer(&config))
    } else {
        router
    };

    router.layer(service_builder)
}

/// Creates the minimal router from a prepared state.
pub fn create_minimal_router<S>(state: AppState<S>) -> RestResult<MinimalRouter<S>>
where
    S: ItemStore + 'static,
{
    info!(
        "Creating minimal router with backend: {}",
        state.storage().backend_name()
    );
    MinimalRouter::new(state)
}

/// Builds the CORS layer based on configuration.
///
/// Clients must be able to send `If-Match` and read `Etag`.
fn build_cors_layer(config: &ServerConfig) -> CorsLayer {
    let mut cors = CorsLayer::new()
        .allow_methods(Any)
        .allow_headers([header::CONTENT_TYPE, header::IF_MATCH, HeaderName::from_static("unauthorized")])
        .expose_headers([header::ETAG]);

    if config.cors_origins == "*" {
        cors = cors.allow_origin(Any);
    } else {
        let origins: Vec<_> = config
            .cors_origins
            .split(',')
            .filter_map(|s| s.trim().parse().ok())
            .collect();
        cors = cors.allow_origin(origins);
    }

    cors
}

/// Initializes the tracing subscriber for logging.
///
/// This should be called once at application startup. `RUST_LOG` overrides
/// the default filter.
///
/// # Arguments
///
/// * `level` - The log level (error, warn, info, debug, trace)
pub fn init_logging(level: &str) {
    use tracing_subscriber::{EnvFilter, fmt, prelude::*};

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        EnvFilter::new(format!(
            "itemstore={level},itemstore_rest={level},itemstore_persistence={level},tower_http=debug"
        ))
    });

    tracing_subscriber::registry()
        .with(fmt::layer())
        .with(filter)
        .init();
}
