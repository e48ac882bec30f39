//! Structured validation failures.
//!
//! A failed parse reports every offending field at once so the front end can
//! mark all of them in a single round trip.

use serde::Serialize;

use super::EmailError;

/// Why a single field was rejected.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ValidationErrorKind {
    /// A required field was absent (or `null`).
    Missing,
    /// The field had the wrong JSON type.
    WrongType {
        /// Human-readable name of the expected type.
        expected: &'static str,
    },
    /// A required string was empty or whitespace only.
    Empty,
    /// The email address is malformed.
    InvalidEmail {
        /// Underlying reason.
        reason: String,
    },
    /// The value did not match the required pattern.
    PatternMismatch {
        /// The pattern the value must match.
        pattern: &'static str,
    },
    /// The value is not one of the allowed values.
    NotAllowed {
        /// Accepted values.
        allowed: Vec<&'static str>,
    },
    /// The value could not be read as a timestamp.
    InvalidTimestamp,
}

impl From<EmailError> for ValidationErrorKind {
    fn from(err: EmailError) -> Self {
        Self::InvalidEmail {
            reason: err.to_string(),
        }
    }
}

/// A rejected field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, thiserror::Error)]
#[error("{field}: {message}")]
pub struct ValidationError {
    /// Wire name of the field (e.g. `firstName`).
    pub field: String,
    /// Machine-readable reason.
    #[serde(flatten)]
    pub kind: ValidationErrorKind,
    /// Human-readable reason.
    pub message: String,
}

impl ValidationError {
    /// Create a validation error for `field`.
    #[must_use]
    pub fn new(field: impl Into<String>, kind: ValidationErrorKind) -> Self {
        let message = describe(&kind);
        Self {
            field: field.into(),
            kind,
            message,
        }
    }
}

fn describe(kind: &ValidationErrorKind) -> String {
    match kind {
        ValidationErrorKind::Missing => "field required".to_owned(),
        ValidationErrorKind::WrongType { expected } => format!("expected {expected}"),
        ValidationErrorKind::Empty => "must not be empty".to_owned(),
        ValidationErrorKind::InvalidEmail { reason } => {
            format!("not a valid email address: {reason}")
        }
        ValidationErrorKind::PatternMismatch { pattern } => {
            format!("must match pattern {pattern}")
        }
        ValidationErrorKind::NotAllowed { allowed } => {
            format!("must be one of: {}", allowed.join(", "))
        }
        ValidationErrorKind::InvalidTimestamp => {
            "expected an ISO 8601 date/time or a Unix timestamp".to_owned()
        }
    }
}

/// All field errors from one parse attempt. Never empty.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, thiserror::Error)]
#[serde(transparent)]
#[error("{} invalid field(s): {}", .0.len(), field_list(.0))]
pub struct ValidationErrors(Vec<ValidationError>);

fn field_list(errors: &[ValidationError]) -> String {
    errors
        .iter()
        .map(|e| e.field.as_str())
        .collect::<Vec<_>>()
        .join(", ")
}

impl ValidationErrors {
    /// Wrap a list of errors, returning `None` if there are none.
    #[must_use]
    pub fn from_vec(errors: Vec<ValidationError>) -> Option<Self> {
        if errors.is_empty() {
            None
        } else {
            Some(Self(errors))
        }
    }

    /// A single-error collection.
    #[must_use]
    pub fn single(error: ValidationError) -> Self {
        Self(vec![error])
    }

    /// The individual field errors.
    #[must_use]
    pub fn errors(&self) -> &[ValidationError] {
        &self.0
    }

    /// Returns the error for `field`, if that field failed.
    #[must_use]
    pub fn field(&self, field: &str) -> Option<&ValidationError> {
        self.0.iter().find(|e| e.field == field)
    }

    /// Whether `field` is among the failed fields.
    #[must_use]
    pub fn has_field(&self, field: &str) -> bool {
        self.field(field).is_some()
    }
}
