use std::sync::Arc;
use std::time::Duration;

use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::EnvFilter;

use eyetask_api::config::{DatabaseConfig, ServerConfig};
use eyetask_api::router::build_app_router;
use eyetask_api::state::AppState;
use eyetask_db::{DbPool, PgImportStore};

const DEFAULT_LOG_FILTER: &str = "eyetask_api=debug,eyetask_pipeline=debug,tower_http=debug";

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();
    init_tracing();

    let config = ServerConfig::from_env();
    let pool = connect_database(&DatabaseConfig::from_env()).await;

    let state = AppState {
        store: Arc::new(PgImportStore::new(pool.clone())),
        config: Arc::new(config.clone()),
    };
    let app = build_app_router(state, &config);

    let addr = config.bind_addr();
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .unwrap_or_else(|e| panic!("Failed to bind {addr}: {e}"));
    tracing::info!(%addr, max_body_bytes = config.max_body_bytes, "Bulk import API listening");

    let (stop_tx, stop_rx) = tokio::sync::oneshot::channel::<()>();
    let server = tokio::spawn(async move {
        axum::serve(listener, app)
            .with_graceful_shutdown(async move {
                let _ = stop_rx.await;
            })
            .await
    });

    shutdown_signal().await;
    tracing::info!(
        timeout_secs = config.shutdown_timeout_secs,
        "Draining in-flight requests"
    );
    let _ = stop_tx.send(());

    // A running import finishes unless the drain window closes first.
    let drain = Duration::from_secs(config.shutdown_timeout_secs);
    match tokio::time::timeout(drain, server).await {
        Ok(Ok(Ok(()))) => tracing::info!("Server stopped accepting connections"),
        Ok(Ok(Err(e))) => tracing::error!(error = %e, "Server error"),
        Ok(Err(e)) => tracing::error!(error = %e, "Server task failed"),
        Err(_) => tracing::warn!("Shutdown timeout elapsed with requests still in flight"),
    }

    pool.close().await;
    tracing::info!("Shutdown complete");
}

/// Install the global subscriber. `LOG_FORMAT=json` switches to one JSON
/// object per line for log shippers.
fn init_tracing() {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER));
    let json = std::env::var("LOG_FORMAT").is_ok_and(|v| v.eq_ignore_ascii_case("json"));

    let registry = tracing_subscriber::registry().with(filter);
    if json {
        registry.with(tracing_subscriber::fmt::layer().json()).init();
    } else {
        registry.with(tracing_subscriber::fmt::layer()).init();
    }
}

/// Connect, verify and migrate. Any failure aborts startup.
async fn connect_database(db: &DatabaseConfig) -> DbPool {
    let pool = eyetask_db::create_pool(&db.url, db.max_connections)
        .await
        .expect("Failed to connect to database");

    eyetask_db::health_check(&pool)
        .await
        .expect("Database health check failed");

    eyetask_db::run_migrations(&pool)
        .await
        .expect("Failed to run database migrations");

    tracing::info!(
        max_connections = db.max_connections,
        "Database ready, migrations applied"
    );
    pool
}

/// Resolve on SIGINT or, on Unix, SIGTERM.
async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl-C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("Failed to install SIGTERM handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    let signal = tokio::select! {
        () = ctrl_c => "SIGINT",
        () = terminate => "SIGTERM",
    };
    tracing::info!(signal, "Shutdown signal received");
}
