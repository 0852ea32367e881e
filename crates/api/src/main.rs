use std::net::SocketAddr;
use std::sync::Arc;

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use siteops_api::config::ServerConfig;
use siteops_api::router::build_app_router;
use siteops_api::state::AppState;
use siteops_store::backend::JsonFileBackend;
use siteops_store::directory::EmptyDirectory;

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();

    // --- Tracing ---
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "siteops_api=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // --- Configuration ---
    let config = ServerConfig::from_env();
    tracing::info!(host = %config.host, port = %config.port, "Loaded server configuration");

    // --- Persistence backend ---
    let data_file =
        std::env::var("DATA_FILE").unwrap_or_else(|_| "siteops-data.json".to_string());
    let backend = Arc::new(JsonFileBackend::open(&data_file));
    tracing::info!(%data_file, "Opened persistence backend");

    // --- Site directory ---
    // The site registry is an external collaborator; without one wired up,
    // directory lookups degrade to empty names and domains.
    let directory = Arc::new(EmptyDirectory);

    // --- App state ---
    let state = AppState::new(config.clone(), backend, directory);

    // Settings are lazily defaulted; touching them at startup generates
    // the connector token on first boot instead of on first request.
    let settings = state.settings.get();
    tracing::info!(
        monitoring_mode = settings.monitoring.mode.as_str(),
        "Settings loaded"
    );

    // --- Router ---
    let app = build_app_router(state, &config);

    // --- Start server ---
    let addr = SocketAddr::new(
        config.host.parse().expect("Invalid HOST address"),
        config.port,
    );
    tracing::info!(%addr, "Starting server");

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .expect("Failed to bind to address");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .expect("Server error");

    tracing::info!("Graceful shutdown complete");
}

/// Wait for a termination signal to initiate graceful shutdown.
///
/// Handles both SIGINT (Ctrl-C) and SIGTERM (on Unix) so the server
/// shuts down cleanly whether stopped interactively or by a process
/// manager (e.g. systemd, Docker, Kubernetes).
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

    tokio::select! {
        () = ctrl_c => {
            tracing::info!("Received SIGINT (Ctrl-C), starting graceful shutdown");
        }
        () = terminate => {
            tracing::info!("Received SIGTERM, starting graceful shutdown");
        }
    }
}
