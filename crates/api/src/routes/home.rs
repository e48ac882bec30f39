//! Root route handler.

use axum::Json;
use serde::Serialize;

/// Banner returned by `GET /`.
#[derive(Debug, Serialize)]
pub struct HomeResponse {
    pub message: &'static str,
}

/// Report that the backend is up.
///
/// GET /
pub async fn home() -> Json<HomeResponse> {
    Json(HomeResponse {
        message: "VoiceForge Backend bereit",
    })
}
