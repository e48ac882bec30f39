//! In-process document store.
//!
//! Keeps every collection in a `Vec` behind a single `RwLock`. Data is lost
//! when the process exits.

use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::RwLock;
use uuid::Uuid;

use super::{Document, DocumentStore, StorageError, compare_field};

#[derive(Debug, Clone)]
struct StoredDocument {
    id: Uuid,
    body: Document,
}

/// Document store backed by in-memory maps.
#[derive(Debug)]
pub struct MemoryDocumentStore {
    name: String,
    collections: RwLock<HashMap<String, Vec<StoredDocument>>>,
}

impl MemoryDocumentStore {
    /// Create an empty store reporting `name` as its database name.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            collections: RwLock::new(HashMap::new()),
        }
    }

    /// Look up a document by the identifier returned from an insert.
    #[cfg(any(test, feature = "test-support"))]
    pub async fn find_by_id(&self, collection: &str, id: &str) -> Option<Document> {
        let id = Uuid::parse_str(id).ok()?;
        let collections = self.collections.read().await;
        collections
            .get(collection)?
            .iter()
            .find(|doc| doc.id == id)
            .map(|doc| doc.body.clone())
    }
}

impl Default for MemoryDocumentStore {
    fn default() -> Self {
        Self::new("memory")
    }
}

#[async_trait]
impl DocumentStore for MemoryDocumentStore {
    fn name(&self) -> &str {
        &self.name
    }

    async fn insert_one(
        &self,
        collection: &str,
        document: Document,
    ) -> Result<String, StorageError> {
        let id = Uuid::new_v4();
        self.collections
            .write()
            .await
            .entry(collection.to_owned())
            .or_default()
            .push(StoredDocument { id, body: document });
        Ok(id.to_string())
    }

    async fn insert_many(
        &self,
        collection: &str,
        documents: Vec<Document>,
    ) -> Result<Vec<String>, StorageError> {
        let mut collections = self.collections.write().await;
        let stored = collections.entry(collection.to_owned()).or_default();

        let ids = documents
            .into_iter()
            .map(|body| {
                let id = Uuid::new_v4();
                stored.push(StoredDocument { id, body });
                id.to_string()
            })
            .collect();
        Ok(ids)
    }

    async fn find_all(
        &self,
        collection: &str,
        sort_by: Option<&str>,
    ) -> Result<Vec<Document>, StorageError> {
        let collections = self.collections.read().await;
        let mut documents: Vec<Document> = collections
            .get(collection)
            .map(|docs| docs.iter().map(|doc| doc.body.clone()).collect())
            .unwrap_or_default();
        drop(collections);

        if let Some(field) = sort_by {
            // Stable sort keeps insertion order for ties
            documents.sort_by(|a, b| compare_field(a.get(field), b.get(field)));
        }
        Ok(documents)
    }

    async fn count_documents(&self, collection: &str) -> Result<u64, StorageError> {
        let collections = self.collections.read().await;
        let count = collections.get(collection).map_or(0, Vec::len);
        Ok(u64::try_from(count).unwrap_or(u64::MAX))
    }

    async fn list_collection_names(&self) -> Result<Vec<String>, StorageError> {
        let collections = self.collections.read().await;
        let mut names: Vec<String> = collections
            .iter()
            .filter(|(_, docs)| !docs.is_empty())
            .map(|(name, _)| name.clone())
            .collect();
        names.sort();
        Ok(names)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use serde_json::{Value, json};

    use super::*;

    fn doc(value: Value) -> Document {
        match value {
            Value::Object(map) => map,
            _ => panic!("test documents must be objects"),
        }
    }

    #[tokio::test]
    async fn test_insert_returns_unique_ids() {
        let store = MemoryDocumentStore::default();
        let a = store.insert_one("lead", doc(json!({"n": 1}))).await.unwrap();
        let b = store.insert_one("lead", doc(json!({"n": 2}))).await.unwrap();
        assert_ne!(a, b);
        assert!(!a.is_empty());
        assert_eq!(store.find_by_id("lead", &b).await.unwrap()["n"], 2);
    }

    #[tokio::test]
    async fn test_find_all_returns_body_without_id() {
        let store = MemoryDocumentStore::default();
        store
            .insert_one("faq", doc(json!({"slug": "a", "order": 1})))
            .await
            .unwrap();
        let docs = store.find_all("faq", None).await.unwrap();
        assert_eq!(docs, vec![doc(json!({"slug": "a", "order": 1}))]);
    }

    #[tokio::test]
    async fn test_sort_is_stable_and_missing_first() {
        let store = MemoryDocumentStore::default();
        store
            .insert_many(
                "section",
                vec![
                    doc(json!({"slug": "b", "order": 2})),
                    doc(json!({"slug": "a1", "order": 1})),
                    doc(json!({"slug": "none"})),
                    doc(json!({"slug": "a2", "order": 1})),
                ],
            )
            .await
            .unwrap();

        let slugs: Vec<String> = store
            .find_all("section", Some("order"))
            .await
            .unwrap()
            .into_iter()
            .map(|d| d["slug"].as_str().unwrap().to_owned())
            .collect();
        assert_eq!(slugs, ["none", "a1", "a2", "b"]);
    }

    #[tokio::test]
    async fn test_unknown_collection_is_empty() {
        let store = MemoryDocumentStore::default();
        assert!(store.find_all("faq", Some("order")).await.unwrap().is_empty());
        assert_eq!(store.count_documents("faq").await.unwrap(), 0);
    }

    #[tokio::test]
    async fn test_list_collection_names_sorted() {
        let store = MemoryDocumentStore::new("voiceforge");
        store.insert_one("trustbadge", Document::new()).await.unwrap();
        store.insert_one("faq", Document::new()).await.unwrap();
        store.insert_many("section", Vec::new()).await.unwrap();

        assert_eq!(
            store.list_collection_names().await.unwrap(),
            ["faq", "trustbadge"]
        );
        assert_eq!(store.name(), "voiceforge");
    }
}
