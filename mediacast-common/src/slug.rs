//! Slug generation and uniqueness helpers
//!
//! Slugs identify podcasts in URLs. Uniqueness is enforced here rather
//! than by surfacing database constraint errors to the user: a taken slug
//! gets a numeric suffix appended until a free one is found.

use crate::Result;
use sqlx::SqlitePool;

/// Maximum stored slug length
pub const SLUG_LENGTH: usize = 50;

/// Turn an arbitrary string into a URL-safe slug.
///
/// Lowercases, maps runs of non-alphanumeric characters to single hyphens,
/// and truncates to [`SLUG_LENGTH`].
pub fn slugify(value: &str) -> String {
    let mut slug = String::with_capacity(value.len());
    let mut last_was_hyphen = true; // suppress leading hyphens

    for c in value.chars() {
        if c.is_ascii_alphanumeric() {
            slug.push(c.to_ascii_lowercase());
            last_was_hyphen = false;
        } else if !last_was_hyphen {
            slug.push('-');
            last_was_hyphen = true;
        }
    }

    while slug.ends_with('-') {
        slug.pop();
    }

    slug.truncate(SLUG_LENGTH);
    while slug.ends_with('-') {
        slug.pop();
    }
    slug
}

/// Check whether a string is already a valid slug
pub fn is_valid_slug(value: &str) -> bool {
    !value.is_empty()
        && value.len() <= SLUG_LENGTH
        && value
            .chars()
            .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '-')
        && !value.starts_with('-')
        && !value.ends_with('-')
}

/// Find an available slug for a podcast, based on the desired slug.
///
/// The desired value is slugified first. If the result is taken by a row
/// other than `ignore_id`, `-2`, `-3`, ... is appended until a free slug
/// is found.
pub async fn get_available_slug(
    db: &SqlitePool,
    desired: &str,
    ignore_id: Option<i64>,
) -> Result<String> {
    let base = {
        let s = slugify(desired);
        if s.is_empty() {
            "untitled".to_string()
        } else {
            s
        }
    };

    let mut candidate = base.clone();
    let mut n = 2;
    loop {
        let taken: Option<i64> =
            sqlx::query_scalar("SELECT id FROM podcasts WHERE slug = ? LIMIT 1")
                .bind(&candidate)
                .fetch_optional(db)
                .await?;

        match taken {
            None => return Ok(candidate),
            Some(id) if Some(id) == ignore_id => return Ok(candidate),
            Some(_) => {
                let suffix = format!("-{}", n);
                let mut stem = base.clone();
                stem.truncate(SLUG_LENGTH - suffix.len());
                while stem.ends_with('-') {
                    stem.pop();
                }
                candidate = format!("{}{}", stem, suffix);
                n += 1;
            }
        }
    }
}
