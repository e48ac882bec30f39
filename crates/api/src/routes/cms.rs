//! Read-only CMS content endpoints.
//!
//! Each endpoint lists a whole collection sorted ascending by `order`.
//! Documents are returned as stored, so fields added by hand come back
//! untouched. Without storage they return an empty list.

use axum::{Json, extract::State};
use serde::Serialize;
use tracing::instrument;

use voiceforge_core::{CmsRecord, Faq, Section, TrustBadge};

use crate::error::Result;
use crate::state::AppState;
use crate::storage::Document;

/// Field CMS collections are sorted by.
const ORDER_FIELD: &str = "order";

/// Wrapper for CMS list responses.
#[derive(Debug, Serialize)]
pub struct ItemsResponse {
    pub items: Vec<Document>,
}

async fn list<T: CmsRecord>(state: &AppState) -> Result<Json<ItemsResponse>> {
    let items = state
        .storage()
        .find_documents(T::COLLECTION, Some(ORDER_FIELD))
        .await?;
    tracing::debug!(collection = %T::COLLECTION, count = items.len(), "Listed CMS items");
    Ok(Json(ItemsResponse { items }))
}

/// GET /api/faqs
#[instrument(skip(state))]
pub async fn faqs(State(state): State<AppState>) -> Result<Json<ItemsResponse>> {
    list::<Faq>(&state).await
}

/// GET /api/sections
#[instrument(skip(state))]
pub async fn sections(State(state): State<AppState>) -> Result<Json<ItemsResponse>> {
    list::<Section>(&state).await
}

/// GET /api/trust-badges
#[instrument(skip(state))]
pub async fn trust_badges(State(state): State<AppState>) -> Result<Json<ItemsResponse>> {
    list::<TrustBadge>(&state).await
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::sync::Arc;

    use axum::http::StatusCode;
    use serde_json::json;

    use super::super::testing::{self, FailingStore};
    use crate::seed::seed_defaults;
    use crate::storage::{DocumentStore, Storage};

    #[tokio::test]
    async fn test_empty_without_storage() {
        for uri in ["/api/faqs", "/api/sections", "/api/trust-badges"] {
            let app = testing::with_storage(Storage::unavailable());
            let (status, body) = testing::get(app, uri).await;
            assert_eq!(status, StatusCode::OK, "{uri}");
            assert_eq!(body, json!({ "items": [] }), "{uri}");
        }
    }

    #[tokio::test]
    async fn test_seeded_faqs_sorted_by_order() {
        let (app, store) = testing::memory();
        seed_defaults(&Storage::new(store)).await.unwrap();

        let (status, body) = testing::get(app, "/api/faqs").await;
        assert_eq!(status, StatusCode::OK);

        let items = body["items"].as_array().unwrap();
        assert_eq!(items.len(), 10);
        assert_eq!(items[0]["slug"], "ai-transparenz");
        assert_eq!(items[0]["question"], "Spreche ich mit einer KI?");
        assert!(items[0].get("answerMd").is_some());
        let orders: Vec<i64> = items.iter().map(|i| i["order"].as_i64().unwrap()).collect();
        assert!(orders.windows(2).all(|w| w[0] <= w[1]));
    }

    #[tokio::test]
    async fn test_sections_and_badges_shape() {
        let (app, store) = testing::memory();
        seed_defaults(&Storage::new(store)).await.unwrap();

        let (_, body) = testing::get(app.clone(), "/api/sections").await;
        assert_eq!(
            body["items"][0],
            json!({
                "slug": "hero",
                "title": "KI Voice Agents für Ihr Unternehmen",
                "contentMd": "",
                "order": 1,
                "visible": true
            })
        );

        let (_, body) = testing::get(app, "/api/trust-badges").await;
        assert_eq!(body["items"].as_array().unwrap().len(), 3);
        assert_eq!(body["items"][2]["slug"], "made-de");
        assert_eq!(body["items"][2]["description"], "Entwickelt & betrieben in DE");
    }

    #[tokio::test]
    async fn test_out_of_order_inserts_are_sorted() {
        let (app, store) = testing::memory();
        for (slug, order) in [("c", 3), ("a", 1), ("b", 2)] {
            let doc = json!({ "slug": slug, "title": slug, "order": order });
            store
                .insert_one("trustbadge", doc.as_object().unwrap().clone())
                .await
                .unwrap();
        }

        let (_, body) = testing::get(app, "/api/trust-badges").await;
        let slugs: Vec<&str> = body["items"]
            .as_array()
            .unwrap()
            .iter()
            .map(|i| i["slug"].as_str().unwrap())
            .collect();
        assert_eq!(slugs, ["a", "b", "c"]);
    }

    #[tokio::test]
    async fn test_hand_edited_documents_returned_unchanged() {
        let (app, store) = testing::memory();
        let edited = [
            json!({ "slug": "a", "title": "A", "order": 1, "icon": "shield" }),
            json!({ "slug": "b", "title": "B", "order": 2.5 }),
        ];
        for doc in &edited {
            store
                .insert_one("trustbadge", doc.as_object().unwrap().clone())
                .await
                .unwrap();
        }

        let (status, body) = testing::get(app, "/api/trust-badges").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, json!({ "items": edited }));
        assert!(body["items"][1].get("description").is_none());
    }

    #[tokio::test]
    async fn test_storage_failure_is_500() {
        let app = testing::with_storage(Storage::new(Arc::new(FailingStore)));
        let (status, body) = testing::get(app, "/api/sections").await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body, json!({ "detail": "read refused" }));
    }
}
