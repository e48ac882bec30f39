//! Liveness and readiness probes.

use axum::{extract::State, http::StatusCode};

use crate::state::AppState;

/// Liveness health check endpoint.
///
/// Returns "ok" if the server is running. Does not check dependencies.
pub async fn health() -> &'static str {
    "ok"
}

/// Readiness health check endpoint.
///
/// Returns 503 Service Unavailable unless storage is attached and answers a
/// collection listing.
pub async fn readiness(State(state): State<AppState>) -> StatusCode {
    match state.storage().collection_names().await {
        Ok(_) => StatusCode::OK,
        Err(e) => {
            tracing::warn!(error = %e, "Readiness check failed");
            StatusCode::SERVICE_UNAVAILABLE
        }
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use axum::http::StatusCode;
    use serde_json::Value;

    use super::super::testing::{self, FailingStore};
    use crate::storage::Storage;

    #[tokio::test]
    async fn test_liveness() {
        let app = testing::with_storage(Storage::unavailable());
        let (status, body) = testing::get(app, "/health").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, Value::String("ok".to_owned()));
    }

    #[tokio::test]
    async fn test_ready_with_storage() {
        let (app, _) = testing::memory();
        let (status, _) = testing::get(app, "/health/ready").await;
        assert_eq!(status, StatusCode::OK);
    }

    #[tokio::test]
    async fn test_not_ready_without_storage() {
        let app = testing::with_storage(Storage::unavailable());
        let (status, _) = testing::get(app, "/health/ready").await;
        assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);

        let app = testing::with_storage(Storage::new(Arc::new(FailingStore)));
        let (status, _) = testing::get(app, "/health/ready").await;
        assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
    }
}
