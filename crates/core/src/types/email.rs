//! Contact email address.

use core::fmt;

use serde::{Deserialize, Serialize};

/// Reasons an address is rejected by [`Email::parse`].
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum EmailError {
    #[error("email address is empty")]
    Empty,
    #[error("email address exceeds {max} characters")]
    TooLong { max: usize },
    #[error("email address contains whitespace")]
    Whitespace,
    /// Zero or several `@` separators.
    #[error("email address needs exactly one '@'")]
    MissingAtSymbol,
    #[error("nothing before the '@'")]
    EmptyLocalPart,
    #[error("nothing after the '@'")]
    EmptyDomain,
    /// Domain without a dot, or with an empty label.
    #[error("'{0}' is not a valid mail domain")]
    InvalidDomain(String),
}

/// A syntactically valid email address as entered on the contact form.
///
/// Only the shape is checked: one `@`, a non-empty mailbox, and a dotted
/// domain without empty labels. Deliverability is not.
///
/// ```
/// use voiceforge_core::Email;
///
/// let email = Email::parse("info@praxis-mueller.de").unwrap();
/// assert_eq!(email.domain(), "praxis-mueller.de");
///
/// assert!(Email::parse("info@praxis-mueller").is_err());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Email {
    address: String,
    at: usize,
}

impl Email {
    /// RFC 5321 path limit.
    pub const MAX_LENGTH: usize = 254;

    /// Validate `input` as an email address.
    ///
    /// # Errors
    ///
    /// Returns the first [`EmailError`] the input runs into.
    pub fn parse(input: &str) -> Result<Self, EmailError> {
        match input.len() {
            0 => return Err(EmailError::Empty),
            len if len > Self::MAX_LENGTH => {
                return Err(EmailError::TooLong {
                    max: Self::MAX_LENGTH,
                });
            }
            _ => {}
        }
        if input.contains(char::is_whitespace) {
            return Err(EmailError::Whitespace);
        }

        let mut separators = input.match_indices('@').map(|(i, _)| i);
        let (Some(at), None) = (separators.next(), separators.next()) else {
            return Err(EmailError::MissingAtSymbol);
        };

        let (mailbox, rest) = input.split_at(at);
        let domain = rest.strip_prefix('@').unwrap_or_default();
        if mailbox.is_empty() {
            return Err(EmailError::EmptyLocalPart);
        }
        if domain.is_empty() {
            return Err(EmailError::EmptyDomain);
        }
        let labels: Vec<&str> = domain.split('.').collect();
        if labels.len() < 2 || labels.iter().any(|label| label.is_empty()) {
            return Err(EmailError::InvalidDomain(domain.to_owned()));
        }

        Ok(Self {
            address: input.to_owned(),
            at,
        })
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.address
    }

    /// Everything after the `@`.
    #[must_use]
    pub fn domain(&self) -> &str {
        self.address.get(self.at + 1..).unwrap_or_default()
    }
}

impl TryFrom<String> for Email {
    type Error = EmailError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl From<Email> for String {
    fn from(email: Email) -> Self {
        email.address
    }
}

impl fmt::Display for Email {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.address)
    }
}

impl std::str::FromStr for Email {
    type Err = EmailError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}
