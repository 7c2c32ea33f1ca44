//! Server configuration for the item store API.
//!
//! This module provides configuration types for the server, supporting
//! command line flags, environment variable overrides and programmatic
//! construction.
//!
//! # Environment Variables
//!
//! | Variable | Default | Description |
//! |----------|---------|-------------|
//! | `ITEMSTORE_PORT` | 8080 | Server port |
//! | `ITEMSTORE_HOST` | 127.0.0.1 | Host to bind |
//! | `ITEMSTORE_LOG_LEVEL` | info | Log level |
//! | `ITEMSTORE_MAX_BODY_SIZE` | 1048576 | Max request body (bytes) |
//! | `ITEMSTORE_REQUEST_TIMEOUT` | 30 | Request timeout (seconds) |
//! | `ITEMSTORE_ENABLE_CORS` | false | Enable CORS |
//! | `ITEMSTORE_CORS_ORIGINS` | * | Allowed origins |
//! | `ITEMSTORE_ROUTER` | mux | Router flavor (`mux` or `minimal`) |
//! | `ITEMSTORE_STORAGE` | sqlite | Storage backend (`sqlite`, `mongodb`, `memory`) |
//! | `ITEMSTORE_DATABASE_URL` | items.db | SQLite database path |
//! | `ITEMSTORE_MONGODB_URI` | mongodb://localhost:27017 | MongoDB connection string |
//! | `ITEMSTORE_MONGODB_DATABASE` | itemDB | MongoDB database |
//! | `ITEMSTORE_MONGODB_COLLECTION` | items | MongoDB collection |
//!
//! # Example
//!
//! ```rust
//! use itemstore_rest::{RouterFlavor, ServerConfig};
//!
//! // Create from environment
//! let config = ServerConfig::from_env();
//!
//! // Or create programmatically
//! let config = ServerConfig {
//!     port: 3000,
//!     host: "0.0.0.0".to_string(),
//!     router: RouterFlavor::Minimal,
//!     ..Default::default()
//! };
//! assert_eq!(config.socket_addr(), "0.0.0.0:3000");
//! ```

use std::fmt;

use clap::{Parser, ValueEnum};

/// Which routing front end serves the API.
///
/// Both flavors expose the same routes with the same observable behavior.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum RouterFlavor {
    /// Axum router with path templates and method routing.
    #[default]
    Mux,
    /// Route table on bare hyper connections.
    Minimal,
}

impl fmt::Display for RouterFlavor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RouterFlavor::Mux => write!(f, "mux"),
            RouterFlavor::Minimal => write!(f, "minimal"),
        }
    }
}

/// Which storage backend holds the items.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum StorageBackendMode {
    /// SQLite database file.
    #[default]
    Sqlite,
    /// MongoDB collection.
    Mongodb,
    /// Process memory. Nothing survives a restart.
    Memory,
}

impl fmt::Display for StorageBackendMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StorageBackendMode::Sqlite => write!(f, "sqlite"),
            StorageBackendMode::Mongodb => write!(f, "mongodb"),
            StorageBackendMode::Memory => write!(f, "memory"),
        }
    }
}

/// Server configuration for the item store API.
///
/// This struct can be constructed from environment variables using [`ServerConfig::from_env`],
/// from command line arguments using [`ServerConfig::parse`], or programmatically.
#[derive(Debug, Clone, Parser)]
#[command(name = "itemstore")]
#[command(about = "Item store HTTP server")]
pub struct ServerConfig {
    /// Port to listen on.
    #[arg(short, long, env = "ITEMSTORE_PORT", default_value = "8080")]
    pub port: u16,

    /// Host address to bind to.
    #[arg(long, env = "ITEMSTORE_HOST", default_value = "127.0.0.1")]
    pub host: String,

    /// Log level (error, warn, info, debug, trace).
    #[arg(long, env = "ITEMSTORE_LOG_LEVEL", default_value = "info")]
    pub log_level: String,

    /// Maximum request body size in bytes.
    #[arg(long, env = "ITEMSTORE_MAX_BODY_SIZE", default_value = "1048576")]
    pub max_body_size: usize,

    /// Request timeout in seconds.
    #[arg(long, env = "ITEMSTORE_REQUEST_TIMEOUT", default_value = "30")]
    pub request_timeout: u64,

    /// Enable CORS.
    #[arg(long, env = "ITEMSTORE_ENABLE_CORS", default_value = "false")]
    pub enable_cors: bool,

    /// Allowed CORS origins (comma-separated, or * for all).
    #[arg(long, env = "ITEMSTORE_CORS_ORIGINS", default_value = "*")]
    pub cors_origins: String,

    /// Router flavor.
    #[arg(long, env = "ITEMSTORE_ROUTER", value_enum, default_value_t = RouterFlavor::Mux)]
    pub router: RouterFlavor,

    /// Storage backend.
    #[arg(long, env = "ITEMSTORE_STORAGE", value_enum, default_value_t = StorageBackendMode::Sqlite)]
    pub storage: StorageBackendMode,

    /// SQLite database path (`:memory:` for a throwaway database).
    #[arg(long, env = "ITEMSTORE_DATABASE_URL", default_value = "items.db")]
    pub database_url: String,

    /// MongoDB connection string.
    #[arg(
        long,
        env = "ITEMSTORE_MONGODB_URI",
        default_value = "mongodb://localhost:27017"
    )]
    pub mongodb_uri: String,

    /// MongoDB database name.
    #[arg(long, env = "ITEMSTORE_MONGODB_DATABASE", default_value = "itemDB")]
    pub mongodb_database: String,

    /// MongoDB collection name.
    #[arg(long, env = "ITEMSTORE_MONGODB_COLLECTION", default_value = "items")]
    pub mongodb_collection: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            port: 8080,
            host: "127.0.0.1".to_string(),
            log_level: "info".to_string(),
            max_body_size: 1024 * 1024, // 1MB
            request_timeout: 30,
            enable_cors: false,
            cors_origins: "*".to_string(),
            router: RouterFlavor::Mux,
            storage: StorageBackendMode::Sqlite,
            database_url: "items.db".to_string(),
            mongodb_uri: "mongodb://localhost:27017".to_string(),
            mongodb_database: "itemDB".to_string(),
            mongodb_collection: "items".to_string(),
        }
    }
}

impl ServerConfig {
    /// Creates a new ServerConfig from environment variables.
    ///
    /// This is a convenience method that parses environment variables without
    /// requiring command line arguments.
    pub fn from_env() -> Self {
        // Try to parse from environment, falling back to defaults
        Self::try_parse_from(["itemstore"]).unwrap_or_default()
    }

    /// Returns the socket address to bind to.
    pub fn socket_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    /// Validates the configuration and returns errors if any.
    pub fn validate(&self) -> Result<(), Vec<String>> {
        let mut errors = Vec::new();

        if self.port == 0 {
            errors.push("Port cannot be 0".to_string());
        }

        if self.max_body_size == 0 {
            errors.push("Max body size cannot be 0".to_string());
        }

        if self.request_timeout == 0 {
            errors.push("Request timeout cannot be 0".to_string());
        }

        if self.storage == StorageBackendMode::Sqlite && self.database_url.trim().is_empty() {
            errors.push("Database URL cannot be empty for the sqlite backend".to_string());
        }

        if self.storage == StorageBackendMode::Mongodb {
            if !self.mongodb_uri.starts_with("mongodb://")
                && !self.mongodb_uri.starts_with("mongodb+srv://")
            {
                errors.push("MongoDB URI must start with mongodb:// or mongodb+srv://".to_string());
            }
            if self.mongodb_database.trim().is_empty() {
                errors.push("MongoDB database cannot be empty".to_string());
            }
            if self.mongodb_collection.trim().is_empty() {
                errors.push("MongoDB collection cannot be empty".to_string());
            }
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }

    /// Creates a configuration suitable for testing.
    ///
    /// This uses ephemeral port 0 and an in-memory SQLite database.
    pub fn for_testing() -> Self {
        Self {
            port: 0, // Let OS assign port
            log_level: "debug".to_string(),
            request_timeout: 5, // Shorter timeout for tests
            storage: StorageBackendMode::Memory,
            database_url: ":memory:".to_string(),
            ..Self::default()
        }
    }
}
