//! Pinboard Server
//!
//! A self-hosted manager for craft project "pins": JSON-backed records with
//! tags, materials, an optional source PDF, and a thumbnail extracted from
//! that PDF by the companion `pinboard-extract` job.

use std::net::{IpAddr, SocketAddr};

use axum::{extract::State, routing::get, Json, Router};
use serde::Serialize;
use tokio::signal;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use pinboard_server::config::Config;
use pinboard_server::routes;
use pinboard_server::state::AppState;

#[derive(Serialize)]
struct HealthResponse {
    status: &'static str,
    version: &'static str,
}

async fn health_check(State(_state): State<AppState>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy",
        version: env!("CARGO_PKG_VERSION"),
    })
}

#[tokio::main]
async fn main() {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "pinboard_server=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Load configuration
    dotenvy::dotenv().ok();

    let config = Config::from_env();

    tracing::info!("Starting Pinboard Server v{}", env!("CARGO_PKG_VERSION"));
    tracing::info!("Site root: {}", config.paths.root.display());
    tracing::info!("Pin collection: {}", config.paths.pins_file().display());

    let host: IpAddr = config
        .server
        .host
        .parse()
        .unwrap_or_else(|_| IpAddr::from([0, 0, 0, 0]));
    let addr = SocketAddr::new(host, config.server.port);

    // Create application state
    let app_state = AppState::new(config);

    // Build CORS layer
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    // Build router
    let app = Router::new()
        .route("/health", get(health_check))
        .merge(routes::pages::router())
        .merge(routes::pins::router())
        .merge(routes::calculator::router())
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(app_state);

    // Start server with graceful shutdown
    tracing::info!("Pinboard Server listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await.unwrap();

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .unwrap();

    tracing::info!("Server shutdown complete");
}

/// Graceful shutdown signal handler
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
            tracing::info!("Received Ctrl+C, starting graceful shutdown...");
        },
        _ = terminate => {
            tracing::info!("Received SIGTERM, starting graceful shutdown...");
        },
    }
}
