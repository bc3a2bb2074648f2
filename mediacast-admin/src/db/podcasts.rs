//! Podcast table access
//!
//! Row fetch/insert/update/delete plus the paginated listing used by the
//! admin index. Slug uniqueness is handled by the caller through
//! `mediacast_common::slug::get_available_slug` before writes land here.

use crate::error::{Error, Result};
use mediacast_common::db::models::Podcast;
use sqlx::{Pool, Sqlite};

const PODCAST_COLUMNS: &str = "id, slug, title, subtitle, author_name, author_email, \
     description, category, copyright, itunes_url, feedburner_url, explicit, media_count";

/// Editable podcast fields, as persisted by `save`
#[derive(Debug, Clone, Default)]
pub struct PodcastFields {
    pub slug: String,
    pub title: String,
    pub subtitle: Option<String>,
    pub author_name: Option<String>,
    pub author_email: Option<String>,
    pub description: Option<String>,
    pub category: Option<String>,
    pub copyright: Option<String>,
    pub itunes_url: Option<String>,
    pub feedburner_url: Option<String>,
    pub explicit: Option<bool>,
}

/// Fetch a podcast row by id
pub async fn fetch(db: &Pool<Sqlite>, id: i64) -> Result<Podcast> {
    let query = format!("SELECT {} FROM podcasts WHERE id = ?", PODCAST_COLUMNS);
    sqlx::query_as::<_, Podcast>(&query)
        .bind(id)
        .fetch_optional(db)
        .await?
        .ok_or_else(|| Error::NotFound(format!("Podcast {}", id)))
}

/// List podcasts ordered by title, paginated.
///
/// Pages are 1-based. Returns the rows for the requested page and the
/// total row count.
pub async fn list(db: &Pool<Sqlite>, page: i64, per_page: i64) -> Result<(Vec<Podcast>, i64)> {
    let page = page.max(1);
    let total: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM podcasts")
        .fetch_one(db)
        .await?;

    let query = format!(
        "SELECT {} FROM podcasts ORDER BY title LIMIT ? OFFSET ?",
        PODCAST_COLUMNS
    );
    let rows = sqlx::query_as::<_, Podcast>(&query)
        .bind(per_page)
        .bind((page - 1) * per_page)
        .fetch_all(db)
        .await?;

    Ok((rows, total))
}

/// Insert a new podcast and return the populated row
pub async fn insert(db: &Pool<Sqlite>, fields: &PodcastFields) -> Result<Podcast> {
    let id: i64 = sqlx::query_scalar(
        r#"
        INSERT INTO podcasts
            (slug, title, subtitle, author_name, author_email, description,
             category, copyright, itunes_url, feedburner_url, explicit)
        VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)
        RETURNING id
        "#,
    )
    .bind(&fields.slug)
    .bind(&fields.title)
    .bind(&fields.subtitle)
    .bind(&fields.author_name)
    .bind(&fields.author_email)
    .bind(&fields.description)
    .bind(&fields.category)
    .bind(&fields.copyright)
    .bind(&fields.itunes_url)
    .bind(&fields.feedburner_url)
    .bind(fields.explicit)
    .fetch_one(db)
    .await?;

    fetch(db, id).await
}

/// Update an existing podcast's editable fields
pub async fn update(db: &Pool<Sqlite>, id: i64, fields: &PodcastFields) -> Result<()> {
    let result = sqlx::query(
        r#"
        UPDATE podcasts SET
            slug = ?, title = ?, subtitle = ?, author_name = ?, author_email = ?,
            description = ?, category = ?, copyright = ?, itunes_url = ?,
            feedburner_url = ?, explicit = ?, modified_on = CURRENT_TIMESTAMP
        WHERE id = ?
        "#,
    )
    .bind(&fields.slug)
    .bind(&fields.title)
    .bind(&fields.subtitle)
    .bind(&fields.author_name)
    .bind(&fields.author_email)
    .bind(&fields.description)
    .bind(&fields.category)
    .bind(&fields.copyright)
    .bind(&fields.itunes_url)
    .bind(&fields.feedburner_url)
    .bind(fields.explicit)
    .bind(id)
    .execute(db)
    .await?;

    if result.rows_affected() == 0 {
        return Err(Error::NotFound(format!("Podcast {}", id)));
    }
    Ok(())
}

/// Delete a podcast row
pub async fn delete(db: &Pool<Sqlite>, id: i64) -> Result<()> {
    let result = sqlx::query("DELETE FROM podcasts WHERE id = ?")
        .bind(id)
        .execute(db)
        .await?;

    if result.rows_affected() == 0 {
        return Err(Error::NotFound(format!("Podcast {}", id)));
    }
    Ok(())
}

/// Create a placeholder podcast so an upload has an id to land under.
///
/// Used when artwork arrives for a podcast that hasn't been saved yet.
pub async fn create_stub(db: &Pool<Sqlite>) -> Result<Podcast> {
    let slug = mediacast_common::slug::get_available_slug(db, "new-podcast", None).await?;
    let fields = PodcastFields {
        slug,
        title: "New Podcast".to_string(),
        ..Default::default()
    };
    insert(db, &fields).await
}
