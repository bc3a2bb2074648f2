//! Database models

use serde::{Deserialize, Serialize};

/// Podcast show metadata.
///
/// `explicit` is a tri-state: `Some(true)` explicit, `Some(false)` clean,
/// `None` unrated. The admin form exchanges it as "yes"/"clean"/"no".
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct Podcast {
    pub id: i64,
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
    pub media_count: i64,
}

impl Podcast {
    /// Form-facing label for the explicit flag
    pub fn explicit_label(&self) -> &'static str {
        match self.explicit {
            Some(true) => "yes",
            Some(false) => "clean",
            None => "no",
        }
    }
}

/// Parse a form-facing explicit label back to the stored tri-state
pub fn explicit_from_label(label: &str) -> Option<bool> {
    match label {
        "yes" => Some(true),
        "clean" => Some(false),
        _ => None,
    }
}

/// A configured storage backend.
///
/// `data` holds the engine's unstructured key/value settings; its contents
/// are owned by the engine implementation, not this row type.
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct StorageEngineRow {
    pub id: i64,
    pub display_name: String,
    pub engine_type: String,
    pub enabled: bool,
    pub data: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Setting {
    pub key: String,
    pub value: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn explicit_label_round_trip() {
        for label in ["yes", "clean", "no"] {
            let parsed = explicit_from_label(label);
            let p = Podcast {
                id: 1,
                slug: "s".into(),
                title: "t".into(),
                subtitle: None,
                author_name: None,
                author_email: None,
                description: None,
                category: None,
                copyright: None,
                itunes_url: None,
                feedburner_url: None,
                explicit: parsed,
                media_count: 0,
            };
            assert_eq!(p.explicit_label(), label);
        }
    }

    #[test]
    fn unknown_label_means_unrated() {
        assert_eq!(explicit_from_label("maybe"), None);
        assert_eq!(explicit_from_label(""), None);
    }
}
