//! Route configuration for the item API.
//!
//! Two interchangeable routers expose the same REST surface over the same
//! [`ItemHandlers`](crate::handlers::ItemHandlers):
//!
//! - [`mux`] - an axum [`Router`](axum::Router), wrapped in the tower-http
//!   middleware stack by [`create_app`](crate::create_app)
//! - [`minimal`] - a matchit radix tree served directly on hyper connections
//!
//! | Method | Path | Handler |
//! |--------|------|---------|
//! | GET | `/items`, `/items/` | list |
//! | POST | `/items`, `/items/` | create |
//! | GET | `/items/{id}` | get |
//! | PUT | `/items/{id}` | update |
//! | DELETE | `/items/{id}` | delete |
//!
//! Anything else answers `405 Method Not Allowed`.

pub mod minimal;
pub mod mux;

pub use minimal::MinimalRouter;
pub use mux::create_routes;

use tracing::{error, info};

/// Path of the item collection.
pub const ITEMS_PATH: &str = "/items";

/// The collection path with a trailing slash, routed like [`ITEMS_PATH`].
pub const ITEMS_SLASH_PATH: &str = "/items/";

/// Path pattern of a single item.
pub const ITEM_PATH: &str = "/items/{id}";

/// Resolves on the first shutdown signal the process receives.
///
/// Listens for Ctrl-C everywhere and for SIGTERM on Unix. A signal handler
/// that cannot be installed is logged and never fires.
pub async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            error!(error = %e, "Failed to install Ctrl-C handler");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let sigterm = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                error!(error = %e, "Failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let sigterm = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {}
        () = sigterm => {}
    }

    info!("Shutdown signal received");
}
