//! Lead records.
//!
//! Parsing untrusted input and building the stored record are two steps:
//!
//! 1. [`LeadSubmission::from_fields`] validates a raw field mapping and
//!    reports every invalid field.
//! 2. [`LeadSubmission::accept`] enforces consent and adds the
//!    server-assigned `status` and `createdAt`.

use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use super::{Collection, Record};
use crate::types::phone::PHONE_PATTERN;
use crate::types::{
    Email, Interest, LeadStatus, Phone, ValidationError, ValidationErrorKind, ValidationErrors,
};

/// Message returned to the visitor when the privacy checkbox was not ticked.
pub const CONSENT_REQUIRED_MESSAGE: &str = "Bitte stimmen Sie der Datenverarbeitung zu.";

/// The visitor did not consent to data processing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[error("{CONSENT_REQUIRED_MESSAGE}")]
pub struct ConsentError;

/// A validated contact form submission.
///
/// Contains only client-supplied fields; see [`Lead`] for the stored shape.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LeadSubmission {
    pub first_name: String,
    pub last_name: String,
    pub company: String,
    pub email: Email,
    pub phone: Phone,
    pub interest: Interest,
    pub start_date: Option<DateTime<Utc>>,
    pub end_date: Option<DateTime<Utc>>,
    pub consent: bool,
}

/// A stored lead.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Lead {
    pub first_name: String,
    pub last_name: String,
    pub company: String,
    pub email: Email,
    pub phone: Phone,
    pub interest: Interest,
    pub start_date: Option<DateTime<Utc>>,
    pub end_date: Option<DateTime<Utc>>,
    pub consent: bool,
    #[serde(default)]
    pub status: LeadStatus,
    pub created_at: DateTime<Utc>,
}

impl Record for Lead {
    const COLLECTION: Collection = Collection::Lead;
}

impl LeadSubmission {
    /// Validate a JSON request body.
    ///
    /// # Errors
    ///
    /// Returns a single `body` error if the value is not an object, otherwise
    /// whatever [`Self::from_fields`] reports.
    pub fn from_value(value: &Value) -> Result<Self, ValidationErrors> {
        match value {
            Value::Object(fields) => Self::from_fields(fields),
            _ => Err(ValidationErrors::single(ValidationError::new(
                "body",
                ValidationErrorKind::WrongType { expected: "object" },
            ))),
        }
    }

    /// Validate a raw field mapping.
    ///
    /// Unknown fields are ignored, including client attempts to set
    /// `status` or `createdAt`.
    ///
    /// # Errors
    ///
    /// Returns every field that is missing, has the wrong type, or violates
    /// its constraint.
    pub fn from_fields(fields: &Map<String, Value>) -> Result<Self, ValidationErrors> {
        let mut errors = Vec::new();

        let first_name = non_empty_string(fields, "firstName", &mut errors);
        let last_name = non_empty_string(fields, "lastName", &mut errors);
        let company = non_empty_string(fields, "company", &mut errors);

        let email = required_string(fields, "email", &mut errors).and_then(|raw| {
            Email::parse(raw.trim())
                .map_err(|e| errors.push(ValidationError::new("email", e.into())))
                .ok()
        });

        let phone = required_string(fields, "phone", &mut errors).and_then(|raw| {
            Phone::parse(raw)
                .map_err(|_| {
                    errors.push(ValidationError::new(
                        "phone",
                        ValidationErrorKind::PatternMismatch {
                            pattern: PHONE_PATTERN,
                        },
                    ));
                })
                .ok()
        });

        let interest = required_string(fields, "interest", &mut errors).and_then(|raw| {
            raw.parse::<Interest>()
                .map_err(|_| {
                    errors.push(ValidationError::new(
                        "interest",
                        ValidationErrorKind::NotAllowed {
                            allowed: Interest::allowed_values(),
                        },
                    ));
                })
                .ok()
        });

        let start_date = optional_timestamp(fields, "startDate", &mut errors);
        let end_date = optional_timestamp(fields, "endDate", &mut errors);

        let consent = match fields.get("consent") {
            None | Some(Value::Null) => {
                errors.push(ValidationError::new("consent", ValidationErrorKind::Missing));
                None
            }
            Some(Value::Bool(b)) => Some(*b),
            Some(_) => {
                errors.push(ValidationError::new(
                    "consent",
                    ValidationErrorKind::WrongType {
                        expected: "boolean",
                    },
                ));
                None
            }
        };

        if let Some(errors) = ValidationErrors::from_vec(errors) {
            return Err(errors);
        }

        // Every field is Some when no error was recorded.
        match (
            first_name, last_name, company, email, phone, interest, start_date, end_date, consent,
        ) {
            (
                Some(first_name),
                Some(last_name),
                Some(company),
                Some(email),
                Some(phone),
                Some(interest),
                Some(start_date),
                Some(end_date),
                Some(consent),
            ) => Ok(Self {
                first_name,
                last_name,
                company,
                email,
                phone,
                interest,
                start_date,
                end_date,
                consent,
            }),
            _ => Err(ValidationErrors::single(ValidationError::new(
                "body",
                ValidationErrorKind::Missing,
            ))),
        }
    }

    /// Turn the submission into a storable lead received at `received_at`.
    ///
    /// # Errors
    ///
    /// Returns [`ConsentError`] if the visitor did not consent.
    pub fn accept(self, received_at: DateTime<Utc>) -> Result<Lead, ConsentError> {
        if !self.consent {
            return Err(ConsentError);
        }

        Ok(Lead {
            first_name: self.first_name,
            last_name: self.last_name,
            company: self.company,
            email: self.email,
            phone: self.phone,
            interest: self.interest,
            start_date: self.start_date,
            end_date: self.end_date,
            consent: self.consent,
            status: LeadStatus::New,
            created_at: received_at,
        })
    }
}

// =============================================================================
// Field Helpers
// =============================================================================

fn required_string<'a>(
    fields: &'a Map<String, Value>,
    name: &str,
    errors: &mut Vec<ValidationError>,
) -> Option<&'a str> {
    match fields.get(name) {
        None | Some(Value::Null) => {
            errors.push(ValidationError::new(name, ValidationErrorKind::Missing));
            None
        }
        Some(Value::String(s)) => Some(s.as_str()),
        Some(_) => {
            errors.push(ValidationError::new(
                name,
                ValidationErrorKind::WrongType { expected: "string" },
            ));
            None
        }
    }
}

/// Kept exactly as sent; only `""` is rejected.
fn non_empty_string(
    fields: &Map<String, Value>,
    name: &str,
    errors: &mut Vec<ValidationError>,
) -> Option<String> {
    let value = required_string(fields, name, errors)?;
    if value.is_empty() {
        errors.push(ValidationError::new(name, ValidationErrorKind::Empty));
        return None;
    }
    Some(value.to_owned())
}

/// Returns `Some(None)` for an absent or null field, `None` on error.
fn optional_timestamp(
    fields: &Map<String, Value>,
    name: &str,
    errors: &mut Vec<ValidationError>,
) -> Option<Option<DateTime<Utc>>> {
    let parsed = match fields.get(name) {
        None | Some(Value::Null) => return Some(None),
        Some(Value::String(s)) => parse_timestamp(s),
        Some(Value::Number(n)) => n
            .as_i64()
            .and_then(|secs| DateTime::from_timestamp(secs, 0)),
        Some(_) => {
            errors.push(ValidationError::new(
                name,
                ValidationErrorKind::WrongType {
                    expected: "date/time string or integer",
                },
            ));
            return None;
        }
    };

    match parsed {
        Some(ts) => Some(Some(ts)),
        None => {
            errors.push(ValidationError::new(
                name,
                ValidationErrorKind::InvalidTimestamp,
            ));
            None
        }
    }
}

/// Parse an ISO 8601 timestamp. Values without an offset are taken as UTC.
fn parse_timestamp(s: &str) -> Option<DateTime<Utc>> {
    let s = s.trim();

    if let Ok(ts) = DateTime::parse_from_rfc3339(s) {
        return Some(ts.with_timezone(&Utc));
    }

    for format in ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f", "%Y-%m-%dT%H:%M"] {
        if let Ok(naive) = NaiveDateTime::parse_from_str(s, format) {
            return Some(naive.and_utc());
        }
    }

    NaiveDate::parse_from_str(s, "%Y-%m-%d")
        .ok()
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .map(|naive| naive.and_utc())
}
