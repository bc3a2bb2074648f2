//! HTTP server setup and routing
//!
//! Sets up the Axum HTTP server with the admin routes, admin-token auth
//! layer, and CORS/trace middleware.

use crate::config::Config;
use crate::error::{Error, Result};
use axum::{
    routing::{get, post},
    Router,
};
use sqlx::{Pool, Sqlite};
use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing::info;

/// Shared application context passed to all handlers
///
/// **Note:** AppContext implements Clone, which gives us `FromRef<AppContext>`
/// for free via Axum's blanket implementation.
#[derive(Clone)]
pub struct AppContext {
    pub db_pool: Pool<Sqlite>,
    /// Directory holding generated thumbnails and original backups
    pub images_dir: PathBuf,
    /// Admin API token. Empty string means authentication disabled.
    pub admin_token: Arc<String>,
}

/// Build the admin router with all routes and middleware
pub fn build_router(ctx: AppContext) -> Router {
    let admin_token = ctx.admin_token.clone();

    Router::new()
        // Health endpoint (unauthenticated)
        .route("/health", get(super::podcasts::health))
        // Podcast admin
        .route("/admin/podcasts", get(super::podcasts::index))
        .route("/admin/podcasts/:id", get(super::podcasts::edit))
        .route("/admin/podcasts/:id", post(super::podcasts::save))
        .route("/admin/podcasts/:id/thumb", post(super::thumbs::save_thumb))
        // Storage engine configuration
        .route("/admin/storage/:id", get(super::storage::display))
        .route("/admin/storage/:id", post(super::storage::save))
        // Attach application context
        .with_state(ctx)
        // Admin token check for everything under /admin
        .layer(super::auth::AuthLayer { admin_token })
        // Enable CORS for local admin UI access
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
}

/// Run the HTTP API server
pub async fn run(config: Config, db_pool: Pool<Sqlite>, admin_token: String) -> Result<()> {
    let ctx = AppContext {
        db_pool,
        images_dir: config.images_dir(),
        admin_token: Arc::new(admin_token),
    };

    let app = build_router(ctx);

    let addr = SocketAddr::from(([0, 0, 0, 0], config.port));
    info!("Starting HTTP server on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .map_err(|e| Error::Http(format!("Failed to bind to {}: {}", addr, e)))?;

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(|e| Error::Http(format!("Server error: {}", e)))?;

    Ok(())
}

/// Graceful shutdown signal handler
async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("Failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            info!("Received Ctrl+C, shutting down");
        },
        _ = terminate => {
            info!("Received terminate signal, shutting down");
        },
    }
}
