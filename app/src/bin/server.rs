//! hxtodo HTTP server.

use hxtodo::{AppState, Config, StoreBackend, build_router};
use hxtodo_core::{MemoryRecordStore, RecordStore, TodoRepository, UuidV7Generator};
use hxtodo_postgres::PostgresRecordStore;
use std::sync::Arc;
use std::time::Duration;
use tokio::signal;
use tokio::sync::Notify;
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // A missing .env file is fine.
    let _ = dotenvy::dotenv();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,hxtodo=debug,sqlx=warn".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting hxtodo server");

    let config = Config::from_env()?;
    info!(
        store = config.store.name(),
        assets_dir = %config.server.assets_dir.display(),
        "Configuration loaded"
    );

    let store = open_store(&config.store).await?;
    let repo = TodoRepository::new(store, Arc::new(UuidV7Generator::new()));
    let app = build_router(AppState::new(repo), &config.server.assets_dir);

    let addr = config.server.bind_address();
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    info!(address = %addr, "Server listening");

    let shutdown = Arc::new(Notify::new());
    let server_shutdown = Arc::clone(&shutdown);
    let mut server = tokio::spawn(async move {
        axum::serve(listener, app)
            .with_graceful_shutdown(async move { server_shutdown.notified().await })
            .await
    });

    tokio::select! {
        joined = &mut server => {
            joined??;
            info!("Server stopped");
            return Ok(());
        },
        () = shutdown_signal() => {},
    }

    // notify_one keeps a permit if the server is not waiting yet.
    shutdown.notify_one();
    let grace = Duration::from_secs(config.server.shutdown_timeout);
    match tokio::time::timeout(grace, server).await {
        Ok(joined) => joined??,
        Err(_) => warn!(
            timeout_secs = config.server.shutdown_timeout,
            "Open connections did not finish in time, exiting"
        ),
    }

    info!("Server stopped");
    Ok(())
}

/// Build the record store selected by configuration.
async fn open_store(
    backend: &StoreBackend,
) -> Result<Arc<dyn RecordStore>, Box<dyn std::error::Error>> {
    match backend {
        StoreBackend::Memory => {
            warn!("Using in-memory store; todos are lost on restart");
            Ok(Arc::new(MemoryRecordStore::new()))
        },
        StoreBackend::Postgres(db) => {
            info!("Connecting to PostgreSQL...");
            let store =
                PostgresRecordStore::connect(&db.url, db.max_connections, db.connect_timeout)
                    .await?;
            store.migrate().await?;
            info!("PostgreSQL record store ready");
            Ok(Arc::new(store))
        },
    }
}

/// Wait for Ctrl+C, or SIGTERM on Unix.
///
/// If a handler cannot be installed that source is ignored rather than
/// triggering shutdown.
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(error) = signal::ctrl_c().await {
            warn!(error = %error, "Failed to install Ctrl+C handler");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
            },
            Err(error) => {
                warn!(error = %error, "Failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            },
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {
            info!("Received Ctrl+C signal, shutting down gracefully...");
        },
        () = terminate => {
            info!("Received SIGTERM signal, shutting down gracefully...");
        },
    }
}
