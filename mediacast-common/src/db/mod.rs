//! Database access layer
//!
//! SQLite via sqlx. Schema creation lives in `init`, versioned upgrades in
//! `migrations`, row types in `models`, and the key/value settings store in
//! `settings`.

pub mod init;
pub mod migrations;
pub mod models;
pub mod settings;

pub use init::init_database;
pub use migrations::run_migrations;
