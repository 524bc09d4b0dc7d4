//! # Nimbus Users Server
//!
//! Main entry point for the Nimbus Users application: a user-registration
//! REST service with a transparent cache-aside proxy in front of the SQLite
//! store.

use nimbus_config::ConfigLoader;
use nimbus_core::{NimbusError, NimbusResult};
use nimbus_rest::{create_router, AppState};
use nimbus_service::{UserService, UserServiceImpl};
use nimbus_store::{create_pool, CachedUserStore, SqliteUserStore};
use std::sync::Arc;
use tokio::signal;
use tracing::{error, info};

mod startup;

#[tokio::main]
async fn main() {
    // Initialize logging
    init_logging();

    info!("Starting Nimbus Users Server...");
    info!("Version: {}", env!("CARGO_PKG_VERSION"));

    if let Err(e) = run().await {
        error!("Application error: {}", e);
        std::process::exit(1);
    }
}

async fn run() -> NimbusResult<()> {
    // Load configuration
    let config_loader = ConfigLoader::from_default_location()?;
    let config = config_loader.get().await;

    info!("Environment: {}", config.app.environment);

    // Create database pool and apply migrations
    let db_pool = create_pool(&config.database).await?;
    db_pool.run_migrations().await?;

    // Assemble the store stack: the SQLite store wrapped by the cache-aside
    // proxy. The service only ever sees the store contract.
    let sqlite_store = Arc::new(SqliteUserStore::new(db_pool));
    let cached_store = Arc::new(CachedUserStore::new(sqlite_store));
    let user_service: Arc<dyn UserService> = Arc::new(UserServiceImpl::new(cached_store));

    // Create application state and router
    let app_state = AppState::new(user_service);
    let router = create_router(app_state, &config.server);

    startup::print_banner();
    startup::print_startup_info(config.server.rest_port);

    // Start REST server
    let rest_addr = config.server.rest_addr();
    info!("Starting REST server on http://{}", rest_addr);

    let listener = tokio::net::TcpListener::bind(&rest_addr)
        .await
        .map_err(|e| NimbusError::Internal(format!("Failed to bind REST: {}", e)))?;

    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(|e| NimbusError::Internal(format!("REST server error: {}", e)))?;

    info!("Server shutdown complete");
    Ok(())
}

fn init_logging() {
    use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info,nimbus=debug,tower_http=debug"));

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_target(true))
        .init();
}

async fn shutdown_signal() {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            info!("Received Ctrl+C, initiating graceful shutdown...");
        }
        _ = terminate => {
            info!("Received terminate signal, initiating graceful shutdown...");
        }
    }
}
