//! VoiceForge API library.
//!
//! Lead capture and read-only CMS content for the VoiceForge marketing site,
//! exposed as a library so the router can be tested and reused by the CLI.
//!
//! # Modules
//!
//! - [`config`] - environment configuration
//! - [`storage`] - document store gateway and backends
//! - [`seed`] - default CMS content
//! - [`routes`] - HTTP handlers and the application router
//! - [`middleware`] - request ID and CORS

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod config;
pub mod error;
pub mod middleware;
pub mod routes;
pub mod seed;
pub mod state;
pub mod storage;

pub use config::ApiConfig;
pub use routes::app;
pub use state::AppState;
pub use storage::Storage;
