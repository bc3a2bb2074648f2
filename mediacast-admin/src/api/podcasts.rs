//! Podcast admin request handlers
//!
//! Implements the admin endpoints for listing, editing, saving, and
//! deleting podcasts.

use crate::api::server::AppContext;
use crate::db::podcasts::{self, PodcastFields};
use crate::error::Error;
use crate::forms::podcast::{PodcastDetails, PodcastFormValues};
use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use mediacast_common::db::models::{explicit_from_label, Podcast};
use mediacast_common::{slug, text};
use serde::{Deserialize, Serialize};
use tracing::{error, info};

// ============================================================================
// Request/Response Types
// ============================================================================

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    status: String,
    module: String,
    version: String,
}

#[derive(Debug, Serialize)]
pub struct StatusResponse {
    pub status: String,
}

#[derive(Debug, Deserialize)]
pub struct IndexQuery {
    /// 1-based page number
    #[serde(default = "default_page")]
    pub page: i64,
}

fn default_page() -> i64 {
    1
}

#[derive(Debug, Serialize)]
pub struct IndexResponse {
    pub podcasts: Vec<Podcast>,
    pub page: i64,
    pub pages: i64,
    pub total: i64,
}

#[derive(Debug, Serialize)]
pub struct EditResponse {
    /// None when editing a podcast that hasn't been created yet
    pub id: Option<i64>,
    pub form_values: PodcastFormValues,
}

#[derive(Debug, Serialize)]
pub struct SaveResponse {
    pub success: bool,
    pub id: Option<i64>,
    pub slug: Option<String>,
    pub deleted: bool,
}

#[derive(Debug, Serialize)]
pub struct ValidationErrorResponse {
    pub success: bool,
    pub errors: crate::forms::FormErrors,
}

type HandlerError = (StatusCode, Json<StatusResponse>);

fn handler_error(e: &Error) -> HandlerError {
    let status = match e {
        Error::NotFound(_) => StatusCode::NOT_FOUND,
        Error::BadRequest(_) => StatusCode::BAD_REQUEST,
        _ => StatusCode::INTERNAL_SERVER_ERROR,
    };
    (
        status,
        Json(StatusResponse {
            status: format!("error: {}", e),
        }),
    )
}

/// Parse an `:id` path segment that is either an integer or the literal
/// `"new"` (None).
pub fn parse_podcast_id(raw: &str) -> Result<Option<i64>, HandlerError> {
    if raw == "new" {
        return Ok(None);
    }
    raw.parse::<i64>().map(Some).map_err(|_| {
        handler_error(&Error::BadRequest(format!(
            "Podcast id must be an integer or 'new', got '{}'",
            raw
        )))
    })
}

// ============================================================================
// Health Endpoint
// ============================================================================

/// GET /health - Health check endpoint
pub async fn health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy".to_string(),
        module: "mediacast-admin".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}

// ============================================================================
// Podcast Endpoints
// ============================================================================

/// GET /admin/podcasts - List podcasts with pagination
///
/// Ordered by title, `podcasts_per_page` rows per page.
pub async fn index(
    State(ctx): State<AppContext>,
    Query(query): Query<IndexQuery>,
) -> Result<Json<IndexResponse>, HandlerError> {
    let per_page = mediacast_common::db::settings::get_podcasts_per_page(&ctx.db_pool)
        .await
        .map_err(|e| {
            error!("Failed to load podcasts_per_page setting: {}", e);
            handler_error(&e.into())
        })?;

    let page = query.page.max(1);
    match podcasts::list(&ctx.db_pool, page, per_page).await {
        Ok((rows, total)) => {
            let pages = if total == 0 {
                1
            } else {
                (total + per_page - 1) / per_page
            };
            Ok(Json(IndexResponse {
                podcasts: rows,
                page,
                pages,
                total,
            }))
        }
        Err(e) => {
            error!("Failed to list podcasts: {}", e);
            Err(handler_error(&e))
        }
    }
}

/// GET /admin/podcasts/:id - Edit context for a podcast
///
/// `:id` may be `"new"`, which returns default form values without
/// creating a row.
pub async fn edit(
    State(ctx): State<AppContext>,
    Path(id): Path<String>,
) -> Result<Json<EditResponse>, HandlerError> {
    let id = parse_podcast_id(&id)?;

    let Some(id) = id else {
        return Ok(Json(EditResponse {
            id: None,
            form_values: PodcastFormValues::default(),
        }));
    };

    match podcasts::fetch(&ctx.db_pool, id).await {
        Ok(podcast) => Ok(Json(EditResponse {
            id: Some(podcast.id),
            form_values: form_values_for(&podcast),
        })),
        Err(e) => {
            error!("Failed to fetch podcast {}: {}", id, e);
            Err(handler_error(&e))
        }
    }
}

/// POST /admin/podcasts/:id - Save changes or create a new podcast
///
/// With `delete: true` the podcast is removed instead.
pub async fn save(
    State(ctx): State<AppContext>,
    Path(id): Path<String>,
    Json(form): Json<PodcastFormValues>,
) -> Result<Json<SaveResponse>, (StatusCode, Json<serde_json::Value>)> {
    let id = parse_podcast_id(&id).map_err(|(status, Json(body))| {
        (status, Json(serde_json::json!({ "success": false, "status": body.status })))
    })?;

    if form.delete {
        let Some(id) = id else {
            return Err(bad_request("Cannot delete a podcast that doesn't exist yet"));
        };
        return match podcasts::delete(&ctx.db_pool, id).await {
            Ok(()) => {
                info!("Deleted podcast {}", id);
                Ok(Json(SaveResponse {
                    success: true,
                    id: None,
                    slug: None,
                    deleted: true,
                }))
            }
            Err(e) => {
                error!("Failed to delete podcast {}: {}", id, e);
                Err(save_error(&e))
            }
        };
    }

    if let Err(errors) = form.validate() {
        return Err((
            StatusCode::UNPROCESSABLE_ENTITY,
            Json(serde_json::json!({ "success": false, "errors": errors })),
        ));
    }

    let fields = match build_fields(&ctx, id, &form).await {
        Ok(fields) => fields,
        Err(e) => {
            error!("Failed to prepare podcast fields: {}", e);
            return Err(save_error(&e));
        }
    };

    let result = match id {
        None => podcasts::insert(&ctx.db_pool, &fields)
            .await
            .map(|podcast| (podcast.id, podcast.slug)),
        Some(id) => podcasts::update(&ctx.db_pool, id, &fields)
            .await
            .map(|_| (id, fields.slug.clone())),
    };

    match result {
        Ok((id, slug)) => {
            info!("Saved podcast {} ({})", id, slug);
            Ok(Json(SaveResponse {
                success: true,
                id: Some(id),
                slug: Some(slug),
                deleted: false,
            }))
        }
        Err(e) => {
            error!("Failed to save podcast: {}", e);
            Err(save_error(&e))
        }
    }
}

fn bad_request(message: &str) -> (StatusCode, Json<serde_json::Value>) {
    (
        StatusCode::BAD_REQUEST,
        Json(serde_json::json!({ "success": false, "status": format!("error: {}", message) })),
    )
}

fn save_error(e: &Error) -> (StatusCode, Json<serde_json::Value>) {
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

async fn build_fields(
    ctx: &AppContext,
    id: Option<i64>,
    form: &PodcastFormValues,
) -> crate::error::Result<PodcastFields> {
    let slug = slug::get_available_slug(&ctx.db_pool, &form.slug, id).await?;

    Ok(PodcastFields {
        slug,
        title: form.title.trim().to_string(),
        subtitle: crate::forms::normalize(form.subtitle.clone()),
        author_name: crate::forms::normalize(form.author_name.clone()),
        author_email: crate::forms::normalize(form.author_email.clone()),
        description: form
            .description
            .as_deref()
            .and_then(text::clean_description),
        category: crate::forms::normalize(form.details.category.clone()),
        copyright: crate::forms::normalize(form.details.copyright.clone()),
        itunes_url: crate::forms::normalize(form.details.itunes_url.clone()),
        feedburner_url: crate::forms::normalize(form.details.feedburner_url.clone()),
        explicit: explicit_from_label(&form.details.explicit),
    })
}

/// Build edit-form values from a stored podcast row
pub fn form_values_for(podcast: &Podcast) -> PodcastFormValues {
    PodcastFormValues {
        slug: podcast.slug.clone(),
        title: podcast.title.clone(),
        subtitle: podcast.subtitle.clone(),
        author_name: podcast.author_name.clone(),
        author_email: podcast.author_email.clone(),
        description: podcast.description.clone(),
        details: PodcastDetails {
            explicit: podcast.explicit_label().to_string(),
            category: podcast.category.clone(),
            copyright: podcast.copyright.clone(),
            itunes_url: podcast.itunes_url.clone(),
            feedburner_url: podcast.feedburner_url.clone(),
        },
        delete: false,
    }
}
