//! Thumbnail upload handler
//!
//! Accepts a multipart upload, renders the configured thumbnail sizes, and
//! backs up the original bytes. The response body is always the
//! `{success, message, id}` JSON document.
//!
//! **Content-Type note:** the declared type is `application/json` only when
//! the request's Accept header admits it; otherwise `text/plain` is used.
//! The legacy Flash uploader cannot override its default Accept header
//! (on Windows that is `text/*`), and a 406 would break it, so the body
//! ships under the declared type the client will take.

use crate::api::server::AppContext;
use crate::db::podcasts;
use crate::error::Error;
use crate::thumbs;
use axum::{
    extract::{Multipart, Path, State},
    http::{header, HeaderMap, StatusCode},
    response::{IntoResponse, Response},
};
use tracing::{error, info, warn};

/// Multipart field carrying the uploaded image
const THUMB_FIELD: &str = "thumb";

/// POST /admin/podcasts/:id/thumb - Save an uploaded thumbnail
///
/// `:id` may be `"new"`, in which case a podcast stub is created so the
/// thumbnails have an id to land under; the stub's id comes back in the
/// response.
pub async fn save_thumb(
    State(ctx): State<AppContext>,
    Path(id): Path<String>,
    headers: HeaderMap,
    mut multipart: Multipart,
) -> Response {
    let accept = headers
        .get(header::ACCEPT)
        .and_then(|v| v.to_str().ok())
        .map(str::to_string);

    let id = match super::podcasts::parse_podcast_id(&id) {
        Ok(id) => id,
        Err(_) => {
            return envelope(
                StatusCode::BAD_REQUEST,
                accept.as_deref(),
                false,
                Some("Podcast id must be an integer or 'new'".to_string()),
                None,
            );
        }
    };

    // Pull the upload out of the multipart body
    let upload = match read_upload(&mut multipart).await {
        Ok(Some(upload)) => upload,
        Ok(None) => {
            return envelope(
                StatusCode::BAD_REQUEST,
                accept.as_deref(),
                false,
                Some("No file was uploaded".to_string()),
                None,
            );
        }
        Err(message) => {
            warn!("Malformed thumbnail upload: {}", message);
            return envelope(
                StatusCode::BAD_REQUEST,
                accept.as_deref(),
                false,
                Some(message),
                None,
            );
        }
    };

    // Resolve the podcast: existing row, or a freshly created stub
    let podcast = match id {
        Some(id) => podcasts::fetch(&ctx.db_pool, id).await,
        None => podcasts::create_stub(&ctx.db_pool).await,
    };
    let podcast = match podcast {
        Ok(podcast) => podcast,
        Err(e @ Error::NotFound(_)) => {
            return envelope(
                StatusCode::NOT_FOUND,
                accept.as_deref(),
                false,
                Some(e.to_string()),
                None,
            );
        }
        Err(e) => {
            error!("Failed to resolve podcast for thumbnail: {}", e);
            return envelope(
                StatusCode::INTERNAL_SERVER_ERROR,
                accept.as_deref(),
                false,
                Some(e.to_string()),
                None,
            );
        }
    };

    // Decode, then write every configured size plus the original backup
    let result = image::load_from_memory(&upload.bytes)
        .map_err(|e| Error::ImageDecode(e.to_string()))
        .and_then(|img| thumbs::save_thumbs(&ctx.images_dir, podcast.id, &img))
        .and_then(|_| {
            thumbs::backup_original(
                &ctx.images_dir,
                podcast.id,
                &upload.filename,
                &upload.bytes,
            )
            .map(|_| ())
        });

    match result {
        Ok(()) => {
            info!("Saved thumbnails for podcast {}", podcast.id);
            envelope(
                StatusCode::OK,
                accept.as_deref(),
                true,
                None,
                Some(podcast.id),
            )
        }
        Err(Error::ImageDecode(e)) => {
            warn!("Thumbnail decode failed for podcast {}: {}", podcast.id, e);
            envelope(
                StatusCode::OK,
                accept.as_deref(),
                false,
                Some("Unsupported image type".to_string()),
                Some(podcast.id),
            )
        }
        Err(e) => {
            error!("Thumbnail save failed for podcast {}: {}", podcast.id, e);
            envelope(
                StatusCode::OK,
                accept.as_deref(),
                false,
                Some(e.to_string()),
                Some(podcast.id),
            )
        }
    }
}

struct Upload {
    filename: String,
    bytes: Vec<u8>,
}

async fn read_upload(multipart: &mut Multipart) -> Result<Option<Upload>, String> {
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| format!("Invalid multipart body: {}", e))?
    {
        if field.name() != Some(THUMB_FIELD) {
            continue;
        }
        let filename = field.file_name().unwrap_or("upload").to_string();
        let bytes = field
            .bytes()
            .await
            .map_err(|e| format!("Failed to read upload: {}", e))?;
        return Ok(Some(Upload {
            filename,
            bytes: bytes.to_vec(),
        }));
    }
    Ok(None)
}

/// Build the `{success, message, id}` response under the best content type
/// the client will accept.
fn envelope(
    status: StatusCode,
    accept: Option<&str>,
    success: bool,
    message: Option<String>,
    id: Option<i64>,
) -> Response {
    let body = serde_json::json!({
        "success": success,
        "message": message,
        "id": id,
    });

    (
        status,
        [(header::CONTENT_TYPE, best_json_content_type(accept))],
        body.to_string(),
    )
        .into_response()
}

/// Pick `application/json` when the Accept header admits it, `text/plain`
/// otherwise.
pub fn best_json_content_type(accept: Option<&str>) -> &'static str {
    let Some(accept) = accept else {
        // No Accept header means anything goes
        return "application/json";
    };

    let accepts_json = accept.split(',').any(|item| {
        let media = item.split(';').next().unwrap_or("").trim();
        matches!(media, "application/json" | "application/*" | "*/*")
    });

    if accepts_json {
        "application/json"
    } else {
        "text/plain"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn json_accepted_by_default() {
        assert_eq!(best_json_content_type(None), "application/json");
        assert_eq!(best_json_content_type(Some("*/*")), "application/json");
        assert_eq!(
            best_json_content_type(Some("application/json")),
            "application/json"
        );
        assert_eq!(
            best_json_content_type(Some("text/html,application/json;q=0.9")),
            "application/json"
        );
    }

    #[test]
    fn flash_uploader_accept_gets_text_plain() {
        // Flash's FileReference.upload() on Windows sends Accept: text/*
        assert_eq!(best_json_content_type(Some("text/*")), "text/plain");
        assert_eq!(best_json_content_type(Some("text/html")), "text/plain");
    }
}
