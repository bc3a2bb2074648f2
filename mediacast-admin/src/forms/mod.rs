//! Form validation for admin-submitted data
//!
//! Validation collects field-level problems into a [`FormErrors`] map that
//! handlers return as HTTP 422, replacing template-redirect error handling
//! with a JSON contract.

pub mod podcast;
pub mod storage;

use serde::Serialize;
use std::collections::BTreeMap;

/// Field-keyed validation errors.
///
/// Nested form groups use dotted keys, e.g. `details.explicit` or
/// `ftp.upload_integrity_retries`.
#[derive(Debug, Default, Serialize)]
pub struct FormErrors(pub BTreeMap<String, String>);

impl FormErrors {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, field: &str, message: impl Into<String>) {
        self.0.insert(field.to_string(), message.into());
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Ok(()) when no errors were collected, Err(self) otherwise
    pub fn into_result(self) -> Result<(), FormErrors> {
        if self.is_empty() {
            Ok(())
        } else {
            Err(self)
        }
    }
}

/// Normalize an optional text field: trims, and maps empty to None
pub fn normalize(value: Option<String>) -> Option<String> {
    value.and_then(|s| {
        let trimmed = s.trim().to_string();
        if trimmed.is_empty() {
            None
        } else {
            Some(trimmed)
        }
    })
}
