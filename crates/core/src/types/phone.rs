//! Phone number type.

use core::fmt;
use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

/// Pattern a phone number must match: optional `+`, a leading digit 1-9,
/// then 7 to 14 further digits.
pub const PHONE_PATTERN: &str = r"^\+?[1-9]\d{7,14}$";

static PHONE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(PHONE_PATTERN).expect("Invalid regex"));

/// Errors that can occur when parsing a [`Phone`].
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum PhoneError {
    /// The input does not match [`PHONE_PATTERN`].
    #[error("phone number must match {PHONE_PATTERN}")]
    PatternMismatch,
}

/// A phone number in E.164-like form, e.g. `+49123456789`.
///
/// No normalisation is applied: spaces, dashes and parentheses are rejected
/// rather than stripped.
///
/// ```
/// use voiceforge_core::Phone;
///
/// assert!(Phone::parse("+49123456789").is_ok());
/// assert!(Phone::parse("12345678").is_ok());
/// assert!(Phone::parse("0123456").is_err());
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(transparent)]
pub struct Phone(String);

impl Phone {
    /// Parse a `Phone` from a string.
    ///
    /// # Errors
    ///
    /// Returns [`PhoneError::PatternMismatch`] if the input does not match [`PHONE_PATTERN`].
    pub fn parse(s: &str) -> Result<Self, PhoneError> {
        if PHONE_RE.is_match(s) {
            Ok(Self(s.to_owned()))
        } else {
            Err(PhoneError::PatternMismatch)
        }
    }

    /// Returns the phone number as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Phone {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl std::str::FromStr for Phone {
    type Err = PhoneError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}
