//! Settings database access
//!
//! Read/write settings from the settings table (key-value store).
//! All settings are global/system-wide (not user-specific).

use crate::{Error, Result};
use sqlx::{Pool, Sqlite};
use std::str::FromStr;

/// Get the admin API token.
///
/// An empty token means authentication is disabled (development setups).
pub async fn get_admin_token(db: &Pool<Sqlite>) -> Result<String> {
    Ok(get_setting::<String>(db, "admin_token")
        .await?
        .unwrap_or_default())
}

/// Set the admin API token
pub async fn set_admin_token(db: &Pool<Sqlite>, token: String) -> Result<()> {
    set_setting(db, "admin_token", token).await
}

/// Default admin index page size when no setting is stored
const DEFAULT_PODCASTS_PER_PAGE: i64 = 10;

/// Podcasts shown per page on the admin index.
///
/// Reads only; an unset key falls back to the default without writing it,
/// so listing pages never mutates the settings table.
pub async fn get_podcasts_per_page(db: &Pool<Sqlite>) -> Result<i64> {
    Ok(get_setting::<i64>(db, "podcasts_per_page")
        .await?
        .map(|n| n.clamp(1, 100))
        .unwrap_or(DEFAULT_PODCASTS_PER_PAGE))
}

/// Generic setting getter
///
/// Returns None if key doesn't exist in database.
/// Parses value from string using FromStr trait.
pub async fn get_setting<T: FromStr>(db: &Pool<Sqlite>, key: &str) -> Result<Option<T>> {
    let value: Option<String> = sqlx::query_scalar("SELECT value FROM settings WHERE key = ?")
        .bind(key)
        .fetch_optional(db)
        .await?;

    match value {
        Some(s) => match s.parse::<T>() {
            Ok(parsed) => Ok(Some(parsed)),
            Err(_) => Err(Error::Config(format!(
                "Failed to parse setting '{}' value: {}",
                key, s
            ))),
        },
        None => Ok(None),
    }
}

/// Generic setting setter
///
/// Inserts or updates setting in database.
pub async fn set_setting<T: ToString>(db: &Pool<Sqlite>, key: &str, value: T) -> Result<()> {
    let value_str = value.to_string();

    sqlx::query(
        r#"
        INSERT INTO settings (key, value)
        VALUES (?, ?)
        ON CONFLICT(key) DO UPDATE SET value = excluded.value
        "#,
    )
    .bind(key)
    .bind(value_str)
    .execute(db)
    .await?;

    Ok(())
}
