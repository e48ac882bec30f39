//! Lead capture route handler.
//!
//! Validates the contact/demo form, requires explicit consent, and stores the
//! lead with status `new` and a server-side timestamp.

use axum::{
    Json,
    extract::{State, rejection::JsonRejection},
};
use chrono::Utc;
use serde::Serialize;
use serde_json::Value;
use tracing::instrument;

use voiceforge_core::LeadSubmission;

use crate::error::{ApiError, Result};
use crate::state::AppState;

/// Response for a stored lead.
#[derive(Debug, Serialize)]
pub struct LeadResponse {
    pub ok: bool,
    pub id: String,
}

/// Submit a lead.
///
/// POST /api/lead
///
/// Validation failures are reported field by field (422). A well-formed
/// submission without consent is rejected (400) and nothing is stored.
#[instrument(skip(state, body))]
pub async fn create_lead(
    State(state): State<AppState>,
    body: std::result::Result<Json<Value>, JsonRejection>,
) -> Result<Json<LeadResponse>> {
    let Json(body) = body.map_err(|rejection| ApiError::MalformedBody(rejection.body_text()))?;

    let submission = LeadSubmission::from_value(&body)?;
    let lead = submission.accept(Utc::now())?;

    let id = state.storage().insert(&lead).await?;
    tracing::info!(
        lead_id = %id,
        interest = %lead.interest,
        email_domain = %lead.email.domain(),
        "Lead stored"
    );

    Ok(Json(LeadResponse { ok: true, id }))
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::sync::Arc;

    use axum::{
        body::Body,
        http::{Request, StatusCode, header},
    };
    use chrono::{DateTime, Utc};
    use serde_json::{Value, json};

    use voiceforge_core::CONSENT_REQUIRED_MESSAGE;

    use super::super::testing::{self, FailingStore};
    use crate::storage::{DocumentStore, Storage};

    fn valid_payload() -> Value {
        json!({
            "firstName": "Anna",
            "lastName": "Schmidt",
            "company": "Praxis Schmidt",
            "email": "anna@praxis-schmidt.de",
            "phone": "+49301234567",
            "interest": "Termin-Lead",
            "startDate": "2025-03-01T09:00:00Z",
            "consent": true
        })
    }

    fn post(body: impl Into<Body>) -> Request<Body> {
        Request::post("/api/lead")
            .header(header::CONTENT_TYPE, "application/json")
            .body(body.into())
            .unwrap()
    }

    fn post_json(payload: &Value) -> Request<Body> {
        post(payload.to_string())
    }

    #[tokio::test]
    async fn test_valid_lead_is_stored_as_new() {
        let (app, store) = testing::memory();
        let before = Utc::now();

        let (status, body) = testing::send(app, post_json(&valid_payload())).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["ok"], true);

        let id = body["id"].as_str().unwrap();
        assert!(!id.is_empty());

        let stored = store.find_by_id("lead", id).await.unwrap();
        assert_eq!(stored["status"], "new");
        assert_eq!(stored["firstName"], "Anna");
        assert_eq!(stored["interest"], "Termin-Lead");
        assert_eq!(stored["endDate"], Value::Null);

        let created_at: DateTime<Utc> = stored["createdAt"].as_str().unwrap().parse().unwrap();
        assert!(created_at >= before);
    }

    #[tokio::test]
    async fn test_client_status_and_created_at_ignored() {
        let (app, store) = testing::memory();
        let mut payload = valid_payload();
        payload["status"] = json!("won");
        payload["createdAt"] = json!("2000-01-01T00:00:00Z");

        let (status, body) = testing::send(app, post_json(&payload)).await;
        assert_eq!(status, StatusCode::OK);

        let stored = store
            .find_by_id("lead", body["id"].as_str().unwrap())
            .await
            .unwrap();
        assert_eq!(stored["status"], "new");
        assert_ne!(stored["createdAt"], "2000-01-01T00:00:00Z");
    }

    #[tokio::test]
    async fn test_missing_consent_rejected_and_not_stored() {
        let (app, store) = testing::memory();
        let mut payload = valid_payload();
        payload["consent"] = json!(false);

        let (status, body) = testing::send(app, post_json(&payload)).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body, json!({ "detail": CONSENT_REQUIRED_MESSAGE }));
        assert_eq!(store.count_documents("lead").await.unwrap(), 0);
    }

    #[tokio::test]
    async fn test_unknown_interest_names_field() {
        let (app, store) = testing::memory();
        let mut payload = valid_payload();
        payload["interest"] = json!("Sales");

        let (status, body) = testing::send(app, post_json(&payload)).await;
        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);

        let fields: Vec<&str> = body["detail"]
            .as_array()
            .unwrap()
            .iter()
            .map(|e| e["field"].as_str().unwrap())
            .collect();
        assert_eq!(fields, ["interest"]);
        assert_eq!(store.count_documents("lead").await.unwrap(), 0);
    }

    #[tokio::test]
    async fn test_reports_every_invalid_field() {
        let (app, _) = testing::memory();
        let payload = json!({
            "firstName": "",
            "company": "Praxis",
            "email": "no-at-sign",
            "phone": "0123456",
            "interest": "Reminder",
            "consent": true
        });

        let (status, body) = testing::send(app, post_json(&payload)).await;
        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);

        let detail = body["detail"].as_array().unwrap();
        for field in ["firstName", "lastName", "email", "phone"] {
            assert!(
                detail.iter().any(|e| e["field"] == field),
                "missing error for {field}: {detail:?}"
            );
        }
    }

    #[tokio::test]
    async fn test_malformed_json_is_400() {
        let (app, _) = testing::memory();
        let (status, body) = testing::send(app, post("{\"firstName\": ")).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert!(body["detail"].as_str().unwrap().starts_with("Malformed request body"));
    }

    #[tokio::test]
    async fn test_non_object_body_is_422() {
        let (app, _) = testing::memory();
        let (status, body) = testing::send(app, post_json(&json!([1, 2]))).await;
        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
        assert_eq!(body["detail"][0]["field"], "body");
    }

    #[tokio::test]
    async fn test_without_storage_is_500() {
        let app = testing::with_storage(Storage::unavailable());
        let (status, body) = testing::send(app, post_json(&valid_payload())).await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body["detail"], "storage is not available");
    }

    #[tokio::test]
    async fn test_storage_failure_is_500() {
        let app = testing::with_storage(Storage::new(Arc::new(FailingStore)));
        let (status, body) = testing::send(app, post_json(&valid_payload())).await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body["detail"], "write refused");
    }
}
