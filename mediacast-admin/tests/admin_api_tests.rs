//! Integration tests for the admin HTTP API
//!
//! Drives the full router (auth layer included) against an in-memory
//! database and a temp images folder.

use axum::body::Body;
use axum::http::{header, Request, StatusCode};
use axum::Router;
use http_body_util::BodyExt;
use mediacast_admin::api::server::{build_router, AppContext};
use sqlx::sqlite::SqlitePoolOptions;
use sqlx::{Pool, Sqlite};
use std::sync::Arc;
use tempfile::TempDir;
use tower::ServiceExt;

struct TestApp {
    router: Router,
    db: Pool<Sqlite>,
    images: TempDir,
}

async fn test_app_with_token(token: &str) -> TestApp {
    let db = SqlitePoolOptions::new()
        .connect("sqlite::memory:")
        .await
        .unwrap();
    mediacast_common::db::init::create_tables(&db).await.unwrap();
    mediacast_common::db::run_migrations(&db).await.unwrap();

    let images = TempDir::new().unwrap();
    let ctx = AppContext {
        db_pool: db.clone(),
        images_dir: images.path().to_path_buf(),
        admin_token: Arc::new(token.to_string()),
    };

    TestApp {
        router: build_router(ctx),
        db,
        images,
    }
}

async fn test_app() -> TestApp {
    test_app_with_token("").await
}

fn json_request(method: &str, uri: &str, body: &serde_json::Value) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

async fn response_json(response: axum::response::Response) -> serde_json::Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

fn sample_form(slug: &str, title: &str) -> serde_json::Value {
    serde_json::json!({
        "slug": slug,
        "title": title,
        "subtitle": "Weekly things",
        "author_name": "Alex",
        "author_email": "alex@example.com",
        "description": "A show about things.",
        "details": {
            "explicit": "clean",
            "category": "Technology",
            "itunes_url": "https://podcasts.example.com/show"
        }
    })
}

async fn create_podcast(app: &TestApp, slug: &str, title: &str) -> i64 {
    let response = app
        .router
        .clone()
        .oneshot(json_request(
            "POST",
            "/admin/podcasts/new",
            &sample_form(slug, title),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let body = response_json(response).await;
    assert_eq!(body["success"], true);
    body["id"].as_i64().unwrap()
}

// ============================================================================
// Podcast CRUD
// ============================================================================

#[tokio::test]
async fn create_podcast_persists_fields() {
    let app = test_app().await;
    let id = create_podcast(&app, "my-show", "My Show").await;

    let response = app
        .router
        .clone()
        .oneshot(
            Request::builder()
                .uri(format!("/admin/podcasts/{}", id))
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body = response_json(response).await;
    assert_eq!(body["id"], id);
    let values = &body["form_values"];
    assert_eq!(values["slug"], "my-show");
    assert_eq!(values["title"], "My Show");
    assert_eq!(values["author_email"], "alex@example.com");
    assert_eq!(values["details"]["explicit"], "clean");
    assert_eq!(values["details"]["category"], "Technology");
}

#[tokio::test]
async fn edit_new_returns_default_values() {
    let app = test_app().await;

    let response = app
        .router
        .clone()
        .oneshot(
            Request::builder()
                .uri("/admin/podcasts/new")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body = response_json(response).await;
    assert!(body["id"].is_null());
    assert_eq!(body["form_values"]["details"]["explicit"], "no");

    // No row was created
    let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM podcasts")
        .fetch_one(&app.db)
        .await
        .unwrap();
    assert_eq!(count, 0);
}

#[tokio::test]
async fn edit_unknown_podcast_is_404() {
    let app = test_app().await;

    let response = app
        .router
        .clone()
        .oneshot(
            Request::builder()
                .uri("/admin/podcasts/999")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn slug_collision_gets_numeric_suffix() {
    let app = test_app().await;
    create_podcast(&app, "my-show", "My Show").await;

    let response = app
        .router
        .clone()
        .oneshot(json_request(
            "POST",
            "/admin/podcasts/new",
            &sample_form("my-show", "Other Show"),
        ))
        .await
        .unwrap();
    let body = response_json(response).await;
    assert_eq!(body["slug"], "my-show-2");
}

#[tokio::test]
async fn missing_title_returns_validation_errors() {
    let app = test_app().await;

    let mut form = sample_form("my-show", "My Show");
    form["title"] = serde_json::json!("");

    let response = app
        .router
        .clone()
        .oneshot(json_request("POST", "/admin/podcasts/new", &form))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);

    let body = response_json(response).await;
    assert_eq!(body["success"], false);
    assert!(body["errors"]["title"].is_string());
}

#[tokio::test]
async fn delete_flag_removes_podcast() {
    let app = test_app().await;
    let id = create_podcast(&app, "gone-soon", "Gone Soon").await;

    let response = app
        .router
        .clone()
        .oneshot(json_request(
            "POST",
            &format!("/admin/podcasts/{}", id),
            &serde_json::json!({ "delete": true }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let body = response_json(response).await;
    assert_eq!(body["deleted"], true);

    let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM podcasts")
        .fetch_one(&app.db)
        .await
        .unwrap();
    assert_eq!(count, 0);
}

#[tokio::test]
async fn index_paginates_ordered_by_title() {
    let app = test_app().await;
    for (slug, title) in [("c", "Charlie"), ("a", "Alpha"), ("b", "Bravo")] {
        create_podcast(&app, slug, title).await;
    }
    mediacast_common::db::settings::set_setting(&app.db, "podcasts_per_page", 2)
        .await
        .unwrap();

    let response = app
        .router
        .clone()
        .oneshot(
            Request::builder()
                .uri("/admin/podcasts?page=1")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    let body = response_json(response).await;
    assert_eq!(body["total"], 3);
    assert_eq!(body["pages"], 2);
    assert_eq!(body["podcasts"][0]["title"], "Alpha");
    assert_eq!(body["podcasts"][1]["title"], "Bravo");

    let response = app
        .router
        .clone()
        .oneshot(
            Request::builder()
                .uri("/admin/podcasts?page=2")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    let body = response_json(response).await;
    assert_eq!(body["podcasts"][0]["title"], "Charlie");
}

// ============================================================================
// Thumbnail upload
// ============================================================================

const BOUNDARY: &str = "----mediacast-test-boundary";

fn multipart_request(uri: &str, accept: &str, filename: &str, file_bytes: &[u8]) -> Request<Body> {
    let mut body = Vec::new();
    body.extend_from_slice(format!("--{}\r\n", BOUNDARY).as_bytes());
    body.extend_from_slice(
        format!(
            "Content-Disposition: form-data; name=\"thumb\"; filename=\"{}\"\r\n",
            filename
        )
        .as_bytes(),
    );
    body.extend_from_slice(b"Content-Type: application/octet-stream\r\n\r\n");
    body.extend_from_slice(file_bytes);
    body.extend_from_slice(format!("\r\n--{}--\r\n", BOUNDARY).as_bytes());

    Request::builder()
        .method("POST")
        .uri(uri)
        .header(
            header::CONTENT_TYPE,
            format!("multipart/form-data; boundary={}", BOUNDARY),
        )
        .header(header::ACCEPT, accept)
        .body(Body::from(body))
        .unwrap()
}

fn png_bytes() -> Vec<u8> {
    use image::{ImageBuffer, Rgb};
    let img: ImageBuffer<Rgb<u8>, Vec<u8>> = ImageBuffer::from_pixel(64, 48, Rgb([200, 40, 40]));
    let mut data = Vec::new();
    let mut cursor = std::io::Cursor::new(&mut data);
    img.write_to(&mut cursor, image::ImageFormat::Png).unwrap();
    data
}

#[tokio::test]
async fn unsupported_upload_reports_specific_message() {
    let app = test_app().await;
    let id = create_podcast(&app, "arty", "Arty").await;

    let response = app
        .router
        .clone()
        .oneshot(multipart_request(
            &format!("/admin/podcasts/{}/thumb", id),
            "text/*",
            "notes.txt",
            b"this is not an image",
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    // Flash uploader compatibility: non-JSON Accept gets text/plain
    let content_type = response
        .headers()
        .get(header::CONTENT_TYPE)
        .unwrap()
        .to_str()
        .unwrap()
        .to_string();
    assert_eq!(content_type, "text/plain");

    let body = response_json(response).await;
    assert_eq!(body["success"], false);
    assert_eq!(body["message"], "Unsupported image type");
    assert_eq!(body["id"], id);
}

#[tokio::test]
async fn valid_upload_writes_all_sizes_and_backup() {
    let app = test_app().await;
    let id = create_podcast(&app, "arty", "Arty").await;

    let response = app
        .router
        .clone()
        .oneshot(multipart_request(
            &format!("/admin/podcasts/{}/thumb", id),
            "application/json",
            "cover.png",
            &png_bytes(),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        response
            .headers()
            .get(header::CONTENT_TYPE)
            .unwrap()
            .to_str()
            .unwrap(),
        "application/json"
    );

    let body = response_json(response).await;
    assert_eq!(body["success"], true);
    assert!(body["message"].is_null());

    let podcasts_dir = app.images.path().join("podcasts");
    for key in ["s", "m", "l"] {
        assert!(podcasts_dir.join(format!("{}{}.jpg", id, key)).exists());
    }
    assert!(podcasts_dir.join(format!("{}orig.png", id)).exists());
}

#[tokio::test]
async fn upload_for_new_podcast_creates_stub() {
    let app = test_app().await;

    let response = app
        .router
        .clone()
        .oneshot(multipart_request(
            "/admin/podcasts/new/thumb",
            "application/json",
            "cover.png",
            &png_bytes(),
        ))
        .await
        .unwrap();
    let body = response_json(response).await;
    assert_eq!(body["success"], true);
    let id = body["id"].as_i64().unwrap();

    let (slug, title): (String, String) =
        sqlx::query_as("SELECT slug, title FROM podcasts WHERE id = ?")
            .bind(id)
            .fetch_one(&app.db)
            .await
            .unwrap();
    assert_eq!(slug, "new-podcast");
    assert_eq!(title, "New Podcast");
}

#[tokio::test]
async fn upload_for_unknown_podcast_is_404() {
    let app = test_app().await;

    let response = app
        .router
        .clone()
        .oneshot(multipart_request(
            "/admin/podcasts/999/thumb",
            "application/json",
            "cover.png",
            &png_bytes(),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    let body = response_json(response).await;
    assert_eq!(body["success"], false);
}

// ============================================================================
// Authentication
// ============================================================================

#[tokio::test]
async fn admin_routes_require_token_when_configured() {
    let app = test_app_with_token("sekrit").await;

    // Health stays open
    let response = app
        .router
        .clone()
        .oneshot(Request::builder().uri("/health").body(Body::empty()).unwrap())
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    // Admin without token: rejected
    let response = app
        .router
        .clone()
        .oneshot(
            Request::builder()
                .uri("/admin/podcasts")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

    // Wrong token: rejected
    let response = app
        .router
        .clone()
        .oneshot(
            Request::builder()
                .uri("/admin/podcasts")
                .header("X-Admin-Token", "wrong")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

    // Correct token: accepted
    let response = app
        .router
        .clone()
        .oneshot(
            Request::builder()
                .uri("/admin/podcasts")
                .header("X-Admin-Token", "sekrit")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
}

// ============================================================================
// Storage engine configuration
// ============================================================================

#[tokio::test]
async fn storage_form_round_trip() {
    let app = test_app().await;
    let engine = mediacast_admin::db::storage::insert(&app.db, "Remote FTP", "ftp")
        .await
        .unwrap();

    let values = serde_json::json!({
        "specifics": { "path": "media/podcasts" },
        "ftp": {
            "server": "ftp.example.com",
            "user": "uploader",
            "password": "hunter2",
            "upload_dir": "incoming",
            "upload_integrity_retries": "5",
            "http_download_uri": "https://cdn.example.com/files",
            "rtmp_download_uri": "rtmp://stream.example.com/vod"
        }
    });

    let response = app
        .router
        .clone()
        .oneshot(json_request(
            "POST",
            &format!("/admin/storage/{}", engine.id),
            &values,
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(response_json(response).await["success"], true);

    let response = app
        .router
        .clone()
        .oneshot(
            Request::builder()
                .uri(format!("/admin/storage/{}", engine.id))
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    let body = response_json(response).await;
    assert_eq!(body["engine"]["engine_type"], "ftp");
    assert_eq!(body["form_values"]["ftp"]["server"], "ftp.example.com");
    assert_eq!(body["form_values"]["ftp"]["upload_integrity_retries"], "5");
    assert_eq!(body["form_values"]["specifics"]["path"], "media/podcasts");
    assert_eq!(
        body["form_values"]["specifics"]["rtmp_server_uri"],
        "rtmp://stream.example.com/vod"
    );
}

#[tokio::test]
async fn storage_form_rejects_bad_retry_count() {
    let app = test_app().await;
    let engine = mediacast_admin::db::storage::insert(&app.db, "Remote FTP", "ftp")
        .await
        .unwrap();

    let values = serde_json::json!({
        "ftp": { "upload_integrity_retries": "lots" }
    });

    let response = app
        .router
        .clone()
        .oneshot(json_request(
            "POST",
            &format!("/admin/storage/{}", engine.id),
            &values,
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);

    let body = response_json(response).await;
    assert!(body["errors"]["ftp.upload_integrity_retries"].is_string());
}

#[tokio::test]
async fn storage_form_unknown_engine_is_404() {
    let app = test_app().await;

    let response = app
        .router
        .clone()
        .oneshot(
            Request::builder()
                .uri("/admin/storage/42")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn storage_form_rejects_unhandled_engine_type() {
    let app = test_app().await;
    let engine = mediacast_admin::db::storage::insert(&app.db, "Local disk", "local")
        .await
        .unwrap();

    let response = app
        .router
        .clone()
        .oneshot(
            Request::builder()
                .uri(format!("/admin/storage/{}", engine.id))
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}
