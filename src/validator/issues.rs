use super::core::ParamError;
use serde::Serialize;
use tracing::warn;

/// Wire-level record of one field's failure: external field name, stable
/// error kind, and a human-readable message.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FieldIssue {
    pub field: String,
    pub kind: String,
    pub message: String,
}

impl FieldIssue {
    #[must_use]
    pub fn new(field: impl Into<String>, error: &ParamError) -> Self {
        FieldIssue {
            field: field.into(),
            kind: error.kind().to_string(),
            message: error.to_string(),
        }
    }
}

/// The aggregated failure report for one request.
///
/// Holds every field that failed, not just the first; the hosting server is
/// expected to translate this into an HTTP 422-style response with
/// [`Rejection::to_body`] as the JSON payload.
#[derive(Debug, Clone, PartialEq, Serialize, thiserror::Error)]
#[error("request validation failed: {} issue(s)", issues.len())]
pub struct Rejection {
    pub issues: Vec<FieldIssue>,
}

impl Rejection {
    #[must_use]
    pub fn new(issues: Vec<FieldIssue>) -> Self {
        Rejection { issues }
    }

    /// JSON body enumerating `{field, kind, message}` for every failure.
    #[must_use]
    pub fn to_body(&self) -> serde_json::Value {
        serde_json::json!({ "errors": self.issues })
    }

    /// The HTTP status the hosting server should answer with.
    #[must_use]
    pub fn status(&self) -> u16 {
        422
    }

    /// Log every issue at warn level, one event per field.
    pub fn log(&self) {
        for issue in &self.issues {
            warn!(
                field = %issue.field,
                kind = %issue.kind,
                message = %issue.message,
                "request parameter rejected"
            );
        }
    }
}
