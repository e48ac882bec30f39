//! Storage diagnostics endpoint.
//!
//! Purely observational. Every failure is folded into a status string in the
//! body; the endpoint always answers 200.

use axum::{Json, extract::State};
use serde::Serialize;
use tracing::instrument;

use crate::state::AppState;

const BACKEND_RUNNING: &str = "✅ Running";
const DATABASE_CONNECTED: &str = "✅ Connected & Working";
const DATABASE_NOT_INITIALIZED: &str = "⚠️ Available but not initialized";
const URL_SET: &str = "✅ Set";
const URL_NOT_SET: &str = "❌ Not Set";

/// Maximum number of collection names reported.
const MAX_COLLECTIONS: usize = 10;
/// Maximum number of characters of an error message reported.
const MAX_ERROR_CHARS: usize = 80;

/// Diagnostics body returned by `GET /test`.
#[derive(Debug, Serialize)]
pub struct Diagnostics {
    pub backend: &'static str,
    pub database: String,
    pub database_url: &'static str,
    pub database_name: Option<String>,
    pub connection_status: &'static str,
    pub collections: Vec<String>,
}

/// Report storage connectivity.
///
/// GET /test
#[instrument(skip(state))]
pub async fn test_database(State(state): State<AppState>) -> Json<Diagnostics> {
    let storage = state.storage();
    let database_url = if state.config().storage.is_configured() {
        URL_SET
    } else {
        URL_NOT_SET
    };

    let mut report = Diagnostics {
        backend: BACKEND_RUNNING,
        database: DATABASE_NOT_INITIALIZED.to_owned(),
        database_url,
        database_name: None,
        connection_status: "Not Connected",
        collections: Vec::new(),
    };

    if !storage.is_available() {
        return Json(report);
    }

    report.database = DATABASE_CONNECTED.to_owned();
    report.database_name = storage.name().map(str::to_owned);
    report.connection_status = "Connected";

    match storage.collection_names().await {
        Ok(mut names) => {
            names.truncate(MAX_COLLECTIONS);
            report.collections = names;
        }
        Err(e) => {
            tracing::warn!(error = %e, "Listing collections failed");
            let message: String = e.to_string().chars().take(MAX_ERROR_CHARS).collect();
            report.database = format!("⚠️ Connected but Error: {message}");
        }
    }

    Json(report)
}
