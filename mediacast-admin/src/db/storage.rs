//! Storage engine table access
//!
//! A storage engine row carries an unstructured JSON `data` column of
//! key/value settings. The settings' meaning belongs to the engine
//! implementation; this module only loads and persists them.

use crate::error::{Error, Result};
use mediacast_common::db::models::StorageEngineRow;
use serde_json::{Map, Value};
use sqlx::{Pool, Sqlite};

/// A storage engine with its settings parsed out of the JSON column
#[derive(Debug, Clone)]
pub struct StorageEngine {
    pub id: i64,
    pub display_name: String,
    pub engine_type: String,
    pub enabled: bool,
    pub data: Map<String, Value>,
}

impl StorageEngine {
    pub fn from_row(row: StorageEngineRow) -> Result<Self> {
        let data = match serde_json::from_str::<Value>(&row.data) {
            Ok(Value::Object(map)) => map,
            Ok(_) => {
                return Err(Error::Internal(format!(
                    "Storage engine {} data is not a JSON object",
                    row.id
                )))
            }
            Err(e) => {
                return Err(Error::Internal(format!(
                    "Storage engine {} data is not valid JSON: {}",
                    row.id, e
                )))
            }
        };

        Ok(Self {
            id: row.id,
            display_name: row.display_name,
            engine_type: row.engine_type,
            enabled: row.enabled,
            data,
        })
    }

    /// Read a string-valued setting
    pub fn data_str(&self, key: &str) -> Option<&str> {
        self.data.get(key).and_then(|v| v.as_str())
    }

    /// Read an integer-valued setting
    pub fn data_int(&self, key: &str) -> Option<i64> {
        self.data.get(key).and_then(|v| v.as_i64())
    }

    /// Write a setting; `None` stores an explicit null (the key stays
    /// visible with no value, matching how absent optional settings are
    /// represented)
    pub fn set_data(&mut self, key: &str, value: Option<Value>) {
        self.data
            .insert(key.to_string(), value.unwrap_or(Value::Null));
    }
}

/// Fetch a storage engine by id
pub async fn fetch(db: &Pool<Sqlite>, id: i64) -> Result<StorageEngine> {
    let row = sqlx::query_as::<_, StorageEngineRow>(
        "SELECT id, display_name, engine_type, enabled, data FROM storage_engines WHERE id = ?",
    )
    .bind(id)
    .fetch_optional(db)
    .await?
    .ok_or_else(|| Error::NotFound(format!("Storage engine {}", id)))?;

    StorageEngine::from_row(row)
}

/// Persist a storage engine's settings back to its JSON column
pub async fn save_data(db: &Pool<Sqlite>, engine: &StorageEngine) -> Result<()> {
    let data = serde_json::to_string(&Value::Object(engine.data.clone()))
        .map_err(|e| Error::Internal(format!("Failed to serialize engine data: {}", e)))?;

    let result = sqlx::query(
        "UPDATE storage_engines SET data = ?, modified_on = CURRENT_TIMESTAMP WHERE id = ?",
    )
    .bind(data)
    .bind(engine.id)
    .execute(db)
    .await?;

    if result.rows_affected() == 0 {
        return Err(Error::NotFound(format!("Storage engine {}", engine.id)));
    }
    Ok(())
}

/// Register a new storage engine with empty settings
pub async fn insert(
    db: &Pool<Sqlite>,
    display_name: &str,
    engine_type: &str,
) -> Result<StorageEngine> {
    let id: i64 = sqlx::query_scalar(
        "INSERT INTO storage_engines (display_name, engine_type) VALUES (?, ?) RETURNING id",
    )
    .bind(display_name)
    .bind(engine_type)
    .fetch_one(db)
    .await?;

    fetch(db, id).await
}

#[cfg(test)]
mod tests {
    use super::*;
    use sqlx::sqlite::SqlitePoolOptions;

    async fn setup_test_db() -> Pool<Sqlite> {
        let pool = SqlitePoolOptions::new()
            .connect("sqlite::memory:")
            .await
            .unwrap();
        mediacast_common::db::init::create_tables(&pool).await.unwrap();
        pool
    }

    #[tokio::test]
    async fn insert_fetch_save_round_trip() {
        let db = setup_test_db().await;

        let mut engine = insert(&db, "Remote FTP", "ftp").await.unwrap();
        assert_eq!(engine.engine_type, "ftp");
        assert!(engine.enabled);
        assert!(engine.data.is_empty());

        engine.set_data("ftp_server", Some("ftp.example.com".into()));
        engine.set_data("rtmp_server_uri", None);
        save_data(&db, &engine).await.unwrap();

        let reloaded = fetch(&db, engine.id).await.unwrap();
        assert_eq!(reloaded.data_str("ftp_server"), Some("ftp.example.com"));
        assert_eq!(reloaded.data_str("rtmp_server_uri"), None);
        assert!(reloaded.data.contains_key("rtmp_server_uri"));
    }

    #[tokio::test]
    async fn fetch_missing_is_not_found() {
        let db = setup_test_db().await;
        assert!(matches!(
            fetch(&db, 12).await.unwrap_err(),
            Error::NotFound(_)
        ));
    }

    #[tokio::test]
    async fn malformed_data_is_internal_error() {
        let db = setup_test_db().await;
        let engine = insert(&db, "Broken", "ftp").await.unwrap();

        sqlx::query("UPDATE storage_engines SET data = 'not json' WHERE id = ?")
            .bind(engine.id)
            .execute(&db)
            .await
            .unwrap();

        assert!(matches!(
            fetch(&db, engine.id).await.unwrap_err(),
            Error::Internal(_)
        ));
    }
}
