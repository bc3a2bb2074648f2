//! Storage engine configuration handlers
//!
//! Exposes the per-engine configuration form: GET seeds the form from the
//! engine's stored settings, POST validates a submission and writes it
//! back. Forms are dispatched on the engine's `engine_type`; only the FTP
//! backend has a form here.

use crate::api::server::AppContext;
use crate::db::storage::{self, StorageEngine};
use crate::error::Error;
use crate::forms::storage::ftp::{FtpFormValues, FtpStorageForm};
use crate::forms::storage::StorageForm;
use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use serde::Serialize;
use tracing::{error, info};

#[derive(Debug, Serialize)]
pub struct EngineInfo {
    pub id: i64,
    pub display_name: String,
    pub engine_type: String,
    pub enabled: bool,
}

impl EngineInfo {
    fn from_engine(engine: &StorageEngine) -> Self {
        Self {
            id: engine.id,
            display_name: engine.display_name.clone(),
            engine_type: engine.engine_type.clone(),
            enabled: engine.enabled,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct DisplayResponse {
    pub engine: EngineInfo,
    pub form_values: FtpFormValues,
}

#[derive(Debug, Serialize)]
pub struct SaveResponse {
    pub success: bool,
}

type HandlerError = (StatusCode, Json<serde_json::Value>);

fn engine_error(e: &Error) -> HandlerError {
    let status = match e {
        Error::NotFound(_) => StatusCode::NOT_FOUND,
        Error::BadRequest(_) => StatusCode::BAD_REQUEST,
        _ => StatusCode::INTERNAL_SERVER_ERROR,
    };
    (
        status,
        Json(serde_json::json!({ "success": false, "status": format!("error: {}", e) })),
    )
}

async fn fetch_ftp_engine(ctx: &AppContext, id: i64) -> Result<StorageEngine, HandlerError> {
    let engine = storage::fetch(&ctx.db_pool, id).await.map_err(|e| {
        error!("Failed to fetch storage engine {}: {}", id, e);
        engine_error(&e)
    })?;

    let form = FtpStorageForm;
    if engine.engine_type != form.engine_type() {
        return Err(engine_error(&Error::BadRequest(format!(
            "Storage engine {} has type '{}', which this form does not handle",
            id, engine.engine_type
        ))));
    }
    Ok(engine)
}

/// GET /admin/storage/:id - Display the engine's configuration form
pub async fn display(
    State(ctx): State<AppContext>,
    Path(id): Path<i64>,
) -> Result<Json<DisplayResponse>, HandlerError> {
    let engine = fetch_ftp_engine(&ctx, id).await?;
    let form_values = FtpStorageForm.display(&engine);

    Ok(Json(DisplayResponse {
        engine: EngineInfo::from_engine(&engine),
        form_values,
    }))
}

/// POST /admin/storage/:id - Validate and save engine configuration
pub async fn save(
    State(ctx): State<AppContext>,
    Path(id): Path<i64>,
    Json(values): Json<FtpFormValues>,
) -> Result<Json<SaveResponse>, HandlerError> {
    let mut engine = fetch_ftp_engine(&ctx, id).await?;

    if let Err(errors) = FtpStorageForm.save_engine_params(&mut engine, values) {
        return Err((
            StatusCode::UNPROCESSABLE_ENTITY,
            Json(serde_json::json!({ "success": false, "errors": errors })),
        ));
    }

    storage::save_data(&ctx.db_pool, &engine).await.map_err(|e| {
        error!("Failed to save storage engine {}: {}", id, e);
        engine_error(&e)
    })?;

    info!("Updated storage engine {} settings", id);
    Ok(Json(SaveResponse { success: true }))
}
