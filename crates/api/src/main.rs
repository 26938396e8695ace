use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use anyhow::Context;
use wiki_core::service::DocumentService;
use wiki_core::store::{DocumentStore, MemoryDocumentStore};

use wiki_api::config::ServerConfig;
use wiki_api::router::build_app_router;
use wiki_api::state::AppState;
use wiki_api::telemetry;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    // --- Configuration ---
    let config = ServerConfig::from_env().context("Invalid server configuration")?;

    // --- Tracing ---
    telemetry::init_tracing(config.log_format);
    tracing::info!(host = %config.host, port = %config.port, "Loaded server configuration");

    // --- Storage ---
    let (store, pool): (Arc<dyn DocumentStore>, Option<wiki_db::DbPool>) =
        match config.database_url.as_deref() {
            Some(database_url) => {
                let pool = wiki_db::create_pool(database_url, config.db_max_connections)
                    .await
                    .context("Failed to connect to database")?;
                tracing::info!("Database connection pool created");

                wiki_db::health_check(&pool)
                    .await
                    .context("Database health check failed")?;
                tracing::info!("Database health check passed");

                wiki_db::run_migrations(&pool)
                    .await
                    .context("Failed to run database migrations")?;
                tracing::info!("Database migrations applied");

                let store: Arc<dyn DocumentStore> =
                    Arc::new(wiki_db::PgDocumentStore::new(pool.clone()));
                (store, Some(pool))
            }
            None => {
                tracing::warn!("DATABASE_URL not set, documents are kept in memory only");
                let store: Arc<dyn DocumentStore> = Arc::new(MemoryDocumentStore::new());
                (store, None)
            }
        };

    // --- App state ---
    let state = AppState {
        documents: DocumentService::new(store),
    };

    // --- Router ---
    let app = build_app_router(state, &config);

    // --- Start server ---
    let host = config
        .host
        .parse()
        .with_context(|| format!("Invalid HOST address '{}'", config.host))?;
    let addr = SocketAddr::new(host, config.port);
    tracing::info!(%addr, "Starting server");

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("Failed to bind to {addr}"))?;

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("Server error")?;

    // --- Post-shutdown cleanup ---
    tracing::info!("Server stopped accepting connections, cleaning up");

    if let Some(pool) = pool {
        let drain = Duration::from_secs(config.shutdown_timeout_secs);
        if tokio::time::timeout(drain, pool.close()).await.is_err() {
            tracing::warn!(
                timeout_secs = config.shutdown_timeout_secs,
                "Database pool did not close in time"
            );
        } else {
            tracing::info!("Database pool closed");
        }
    }

    tracing::info!("Graceful shutdown complete");
    Ok(())
}

/// Wait for a termination signal to initiate graceful shutdown.
///
/// Handles both SIGINT (Ctrl-C) and SIGTERM (on Unix). If a handler cannot be
/// installed the corresponding branch never fires.
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!(error = %e, "Failed to install Ctrl-C handler");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                tracing::error!(error = %e, "Failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {
            tracing::info!("Received SIGINT (Ctrl-C), starting graceful shutdown");
        }
        () = terminate => {
            tracing::info!("Received SIGTERM, starting graceful shutdown");
        }
    }
}
