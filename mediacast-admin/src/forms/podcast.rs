//! Podcast edit form
//!
//! Mirrors the admin edit page layout: flat show fields plus a nested
//! `details` group for the iTunes-oriented extras.

use super::{normalize, FormErrors};
use mediacast_common::slug::is_valid_slug;
use serde::{Deserialize, Serialize};

/// Submitted podcast form values
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PodcastFormValues {
    #[serde(default)]
    pub slug: String,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub subtitle: Option<String>,
    #[serde(default)]
    pub author_name: Option<String>,
    #[serde(default)]
    pub author_email: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub details: PodcastDetails,
    /// When set, the save action deletes the podcast instead
    #[serde(default, skip_serializing)]
    pub delete: bool,
}

/// Nested `details` form group
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PodcastDetails {
    /// "yes" = explicit, "clean" = clean, "no" = unrated
    #[serde(default = "default_explicit")]
    pub explicit: String,
    #[serde(default)]
    pub category: Option<String>,
    #[serde(default)]
    pub copyright: Option<String>,
    #[serde(default)]
    pub itunes_url: Option<String>,
    #[serde(default)]
    pub feedburner_url: Option<String>,
}

fn default_explicit() -> String {
    "no".to_string()
}

impl Default for PodcastDetails {
    fn default() -> Self {
        Self {
            explicit: default_explicit(),
            category: None,
            copyright: None,
            itunes_url: None,
            feedburner_url: None,
        }
    }
}

impl PodcastFormValues {
    /// Validate submitted values, collecting field errors
    pub fn validate(&self) -> Result<(), FormErrors> {
        let mut errors = FormErrors::new();

        if self.title.trim().is_empty() {
            errors.add("title", "Title is required");
        }
        if self.slug.trim().is_empty() {
            errors.add("slug", "Slug is required");
        } else if !is_valid_slug(self.slug.trim()) {
            errors.add(
                "slug",
                "Use lowercase letters, numbers, and hyphens only",
            );
        }

        if let Some(email) = normalize(self.author_email.clone()) {
            if !looks_like_email(&email) {
                errors.add("author_email", "Enter a valid email address");
            }
        }

        if let Some(url) = normalize(self.details.itunes_url.clone()) {
            if !is_http_url(&url) {
                errors.add("details.itunes_url", "Enter a valid http(s) URL");
            }
        }
        if let Some(url) = normalize(self.details.feedburner_url.clone()) {
            if !is_http_url(&url) {
                errors.add("details.feedburner_url", "Enter a valid http(s) URL");
            }
        }

        if !matches!(self.details.explicit.as_str(), "yes" | "clean" | "no") {
            errors.add("details.explicit", "Must be one of: yes, clean, no");
        }

        errors.into_result()
    }
}

fn looks_like_email(value: &str) -> bool {
    match value.split_once('@') {
        Some((local, domain)) => {
            !local.is_empty() && !domain.is_empty() && domain.contains('.') && !value.contains(' ')
        }
        None => false,
    }
}

fn is_http_url(value: &str) -> bool {
    value.starts_with("http://") || value.starts_with("https://")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn valid_form() -> PodcastFormValues {
        PodcastFormValues {
            slug: "my-show".to_string(),
            title: "My Show".to_string(),
            subtitle: None,
            author_name: Some("Alex".to_string()),
            author_email: Some("alex@example.com".to_string()),
            description: None,
            details: PodcastDetails {
                explicit: "clean".to_string(),
                category: Some("Technology".to_string()),
                copyright: None,
                itunes_url: Some("https://podcasts.example.com/show".to_string()),
                feedburner_url: None,
            },
            delete: false,
        }
    }

    #[test]
    fn valid_form_passes() {
        assert!(valid_form().validate().is_ok());
    }

    #[test]
    fn title_and_slug_required() {
        let mut form = valid_form();
        form.title = "  ".to_string();
        form.slug = String::new();
        let errors = form.validate().unwrap_err();
        assert!(errors.0.contains_key("title"));
        assert!(errors.0.contains_key("slug"));
    }

    #[test]
    fn malformed_slug_rejected() {
        for bad in ["Has Spaces", "UPPER", "trailing-", "a&b"] {
            let mut form = valid_form();
            form.slug = bad.to_string();
            let errors = form.validate().unwrap_err();
            assert!(errors.0.contains_key("slug"), "accepted '{}'", bad);
        }

        let mut form = valid_form();
        form.slug = "ok-slug-2".to_string();
        assert!(form.validate().is_ok());
    }

    #[test]
    fn bad_email_rejected() {
        let mut form = valid_form();
        form.author_email = Some("not-an-email".to_string());
        let errors = form.validate().unwrap_err();
        assert!(errors.0.contains_key("author_email"));
    }

    #[test]
    fn empty_email_allowed() {
        let mut form = valid_form();
        form.author_email = Some("".to_string());
        assert!(form.validate().is_ok());
    }

    #[test]
    fn bad_urls_rejected() {
        let mut form = valid_form();
        form.details.itunes_url = Some("ftp://wrong.example.com".to_string());
        let errors = form.validate().unwrap_err();
        assert!(errors.0.contains_key("details.itunes_url"));
    }

    #[test]
    fn unknown_explicit_label_rejected() {
        let mut form = valid_form();
        form.details.explicit = "maybe".to_string();
        let errors = form.validate().unwrap_err();
        assert!(errors.0.contains_key("details.explicit"));
    }

    #[test]
    fn defaults_deserialize() {
        let form: PodcastFormValues =
            serde_json::from_str(r#"{"slug": "s", "title": "T"}"#).unwrap();
        assert_eq!(form.details.explicit, "no");
        assert!(!form.delete);
    }
}
