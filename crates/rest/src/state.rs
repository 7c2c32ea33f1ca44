//! Application state for the item API.
//!
//! Holds the shared resources every request needs: the item store, the
//! configuration, the authorization policy and the handlers built on top of
//! the store.

use std::sync::Arc;

use itemstore_persistence::core::ItemStore;

use crate::auth::{AuthorizationPolicy, SharedPolicy, UnauthorizedHeaderPolicy};
use crate::config::ServerConfig;
use crate::handlers::ItemHandlers;

/// Shared application state for the REST API.
///
/// # Type Parameters
///
/// * `S` - The storage backend type (must implement [`ItemStore`])
///
/// # Example
///
/// ```
/// use itemstore_persistence::backends::memory::MemoryBackend;
/// use itemstore_persistence::core::ItemStore;
/// use itemstore_rest::{AppState, ServerConfig};
/// use std::sync::Arc;
///
/// let state = AppState::new(Arc::new(MemoryBackend::new()), ServerConfig::for_testing());
/// assert_eq!(state.storage().backend_name(), "memory");
/// ```
pub struct AppState<S> {
    /// The storage backend.
    storage: Arc<S>,

    /// Server configuration.
    config: Arc<ServerConfig>,

    /// Authorization gate.
    policy: SharedPolicy,

    /// Router-agnostic handlers over the storage backend.
    handlers: ItemHandlers<S>,
}

// Manually implement Clone since S is wrapped in Arc and doesn't need to be Clone
impl<S> Clone for AppState<S> {
    fn clone(&self) -> Self {
        Self {
            storage: Arc::clone(&self.storage),
            config: Arc::clone(&self.config),
            policy: Arc::clone(&self.policy),
            handlers: self.handlers.clone(),
        }
    }
}

impl<S: ItemStore> AppState<S> {
    /// Creates a new AppState with the default authorization policy.
    pub fn new(storage: Arc<S>, config: ServerConfig) -> Self {
        Self {
            handlers: ItemHandlers::new(Arc::clone(&storage)),
            storage,
            config: Arc::new(config),
            policy: Arc::new(UnauthorizedHeaderPolicy),
        }
    }

    /// Replaces the authorization policy.
    pub fn with_policy(mut self, policy: impl AuthorizationPolicy) -> Self {
        self.policy = Arc::new(policy);
        self
    }

    /// Returns a reference to the storage backend.
    pub fn storage(&self) -> &S {
        &self.storage
    }

    /// Returns a clone of the storage Arc.
    pub fn storage_arc(&self) -> Arc<S> {
        Arc::clone(&self.storage)
    }

    /// Returns a reference to the server configuration.
    pub fn config(&self) -> &ServerConfig {
        &self.config
    }

    /// Returns the authorization policy.
    pub fn policy(&self) -> &dyn AuthorizationPolicy {
        self.policy.as_ref()
    }

    /// Returns the item handlers.
    pub fn handlers(&self) -> &ItemHandlers<S> {
        &self.handlers
    }
}
