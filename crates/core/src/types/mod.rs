//! Value types for VoiceForge records.
//!
//! These wrappers enforce field-level constraints at construction time so a
//! value that exists is a value that is valid.

pub mod email;
pub mod phone;
pub mod status;
pub mod validation;

pub use email::{Email, EmailError};
pub use phone::{Phone, PhoneError};
pub use status::*;
pub use validation::{ValidationError, ValidationErrorKind, ValidationErrors};
