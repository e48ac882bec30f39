//! VoiceForge Core - Record schemas and validation.
//!
//! This crate defines the shape of every record the backend stores:
//! - `Lead` - contact form submissions from prospective customers
//! - `Faq`, `Section`, `TrustBadge` - read-only CMS content for the marketing site
//!
//! # Architecture
//!
//! The core crate contains only types and validation - no I/O, no database
//! access, no HTTP. Untrusted input is parsed into [`LeadSubmission`]; the
//! persisted shape is [`Lead`], which adds the server-assigned fields.
//!
//! # Modules
//!
//! - [`types`] - Validated value types (email, phone), enums, and validation errors
//! - [`records`] - Collection records and the raw-input parser for leads

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod records;
pub mod types;

pub use records::*;
pub use types::*;
