//! Item store server
//!
//! Serves the item API over SQLite, MongoDB or process memory, through either
//! the axum router or the minimal router.

use std::sync::Arc;

use clap::Parser;
use itemstore_persistence::backends::memory::MemoryBackend;
use itemstore_persistence::core::ItemStore;
use itemstore_rest::{
    AppState, RouterFlavor, ServerConfig, StorageBackendMode, create_app_with_state,
    create_minimal_router, init_logging, shutdown_signal,
};
use tracing::info;

#[cfg(feature = "sqlite")]
use itemstore_persistence::backends::sqlite::{SqliteBackend, SqliteBackendConfig};

#[cfg(feature = "mongodb")]
use itemstore_persistence::backends::mongodb::{MongoBackend, MongoConfig};

/// Creates and initializes a SQLite backend from the server configuration.
#[cfg(feature = "sqlite")]
fn create_sqlite_backend(config: &ServerConfig) -> anyhow::Result<SqliteBackend> {
    let db_path = config.database_url.as_str();
    info!(database = %db_path, "Initializing SQLite backend");

    let backend = SqliteBackend::with_config(db_path, SqliteBackendConfig::default())?;
    backend.init_schema()?;

    Ok(backend)
}

/// Binds the listener and serves `backend` through the configured router
/// until a shutdown signal arrives.
async fn serve<S>(backend: S, config: ServerConfig) -> anyhow::Result<()>
where
    S: ItemStore + 'static,
{
    let addr = config.socket_addr();
    let router = config.router;
    let state = AppState::new(Arc::new(backend), config);

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    info!(address = %addr, router = %router, "Server listening");

    match router {
        RouterFlavor::Mux => {
            let app = create_app_with_state(state);
            axum::serve(listener, app)
                .with_graceful_shutdown(shutdown_signal())
                .await?;
        }
        RouterFlavor::Minimal => {
            let router = create_minimal_router(state)?;
            router.serve(listener, shutdown_signal()).await?;
        }
    }

    info!("Server stopped");
    Ok(())
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = ServerConfig::parse();
    init_logging(&config.log_level);

    if let Err(errors) = config.validate() {
        for error in &errors {
            eprintln!("Configuration error: {}", error);
        }
        std::process::exit(1);
    }

    info!(
        port = config.port,
        host = %config.host,
        router = %config.router,
        storage_backend = %config.storage,
        "Starting item store server"
    );

    match config.storage {
        StorageBackendMode::Sqlite => start_sqlite(config).await?,
        StorageBackendMode::Mongodb => start_mongodb(config).await?,
        StorageBackendMode::Memory => {
            info!("Using in-memory storage; data is lost on exit");
            serve(MemoryBackend::new(), config).await?
        }
    }

    Ok(())
}

/// Starts the server with the SQLite backend.
#[cfg(feature = "sqlite")]
async fn start_sqlite(config: ServerConfig) -> anyhow::Result<()> {
    let backend = create_sqlite_backend(&config)?;
    serve(backend, config).await
}

/// Fallback when sqlite feature is not enabled.
#[cfg(not(feature = "sqlite"))]
async fn start_sqlite(_config: ServerConfig) -> anyhow::Result<()> {
    anyhow::bail!(
        "The sqlite backend requires the 'sqlite' feature. \
         Build with: cargo build -p itemstore --features sqlite"
    )
}

/// Starts the server with the MongoDB backend.
#[cfg(feature = "mongodb")]
async fn start_mongodb(config: ServerConfig) -> anyhow::Result<()> {
    let mongo_config = MongoConfig {
        uri: config.mongodb_uri.clone(),
        database: config.mongodb_database.clone(),
        collection: config.mongodb_collection.clone(),
    };
    info!(
        database = %mongo_config.database,
        collection = %mongo_config.collection,
        "Initializing MongoDB backend"
    );

    let backend = MongoBackend::connect(mongo_config).await?;
    serve(backend, config).await
}

/// Fallback when mongodb feature is not enabled.
#[cfg(not(feature = "mongodb"))]
async fn start_mongodb(_config: ServerConfig) -> anyhow::Result<()> {
    anyhow::bail!(
        "The mongodb backend requires the 'mongodb' feature. \
         Build with: cargo build -p itemstore --features mongodb"
    )
}
