//! Helpers shared by the resource handlers.

use catalog_http::error::AppError;
use serde_json::{json, Value};

/// Parse a path segment made only of ASCII digits; anything else names no
/// record.
pub fn parse_id(raw: &str, resource: &str) -> Result<u64, AppError> {
    let not_found = || AppError::not_found(format!("{} '{}' not found", resource, raw));
    if raw.is_empty() || !raw.bytes().all(|b| b.is_ascii_digit()) {
        return Err(not_found());
    }
    raw.parse::<u64>().map_err(|_| not_found())
}

/// Field-level problems collected while validating a request body.
#[derive(Debug, Default)]
pub struct Violations {
    details: Vec<Value>,
}

impl Violations {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, field: &str, error: &str) {
        self.details.push(json!({ "field": field, "error": error }));
    }

    /// Require a non-blank string; records the violation and yields `None`
    /// otherwise.
    pub fn required(&mut self, field: &str, value: Option<String>) -> Option<String> {
        match value {
            None => {
                self.push(field, "required");
                None
            }
            Some(value) if value.trim().is_empty() => {
                self.push(field, "must not be empty");
                None
            }
            Some(value) => Some(value),
        }
    }

    /// Accept an absent value but reject a blank one.
    pub fn optional(&mut self, field: &str, value: Option<&str>) {
        if matches!(value, Some(v) if v.trim().is_empty()) {
            self.push(field, "must not be empty");
        }
    }

    pub fn is_empty(&self) -> bool {
        self.details.is_empty()
    }

    pub fn into_result(self, message: &str) -> Result<(), AppError> {
        if self.is_empty() {
            Ok(())
        } else {
            Err(AppError::validation(self.details, message))
        }
    }
}
