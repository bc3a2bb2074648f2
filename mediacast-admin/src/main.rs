//! Mediacast admin service - main entry point
//!
//! HTTP admin surface for the mediacast CMS: podcast CRUD, thumbnail
//! upload/resize, and storage backend configuration.

use anyhow::{Context, Result};
use clap::Parser;
use mediacast_admin::api;
use mediacast_admin::config::Config;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Command-line arguments for mediacast-admin
#[derive(Parser, Debug)]
#[command(name = "mediacast-admin")]
#[command(about = "Admin service for the mediacast CMS")]
#[command(version)]
struct Args {
    /// Port to listen on
    #[arg(short, long, default_value = "5760", env = "MEDIACAST_ADMIN_PORT")]
    port: u16,

    /// Data folder holding the database and generated images
    #[arg(short, long, env = "MEDIACAST_DATA_DIR")]
    data_dir: Option<String>,
}

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "mediacast_admin=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Parse command-line arguments
    let args = Args::parse();

    let data_dir = mediacast_common::config::resolve_data_dir(
        args.data_dir.as_deref(),
        "MEDIACAST_DATA_DIR",
    )
    .context("Failed to resolve data folder")?;

    let config = Config::new(args.port, data_dir);

    info!("Starting mediacast admin service on port {}", config.port);
    info!("Data folder: {}", config.data_dir.display());

    // Open database, creating schema on first run
    let db_pool = mediacast_common::db::init_database(&config.db_path)
        .await
        .context("Failed to initialize database")?;
    mediacast_common::db::run_migrations(&db_pool)
        .await
        .context("Failed to run database migrations")?;

    // Make sure the thumbnail target directory exists before the first upload
    std::fs::create_dir_all(config.images_dir().join("podcasts"))
        .context("Failed to create images folder")?;

    // Empty token means authentication disabled
    let admin_token = mediacast_common::db::settings::get_admin_token(&db_pool)
        .await
        .context("Failed to load admin token")?;
    if admin_token.is_empty() {
        info!("Admin authentication disabled (no admin_token setting)");
    }

    api::server::run(config, db_pool, admin_token)
        .await
        .context("Server error")?;

    info!("Server shutdown complete");
    Ok(())
}
