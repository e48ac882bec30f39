//! Storage gateway for the document store.
//!
//! # Collections
//!
//! - `lead` - Contact form submissions (insert only)
//! - `faq` - FAQ entries (seeded, read only)
//! - `section` - Landing page sections (seeded, read only)
//! - `trustbadge` - Trust badges (seeded, read only)
//!
//! # Backends
//!
//! - [`PgDocumentStore`] - `PostgreSQL` `JSONB` documents (production)
//! - [`MemoryDocumentStore`] - in-process maps (tests, local development)
//!
//! # Availability
//!
//! [`Storage`] wraps an optional backend. Without one, reads return empty
//! results and writes fail with [`StorageError::Unavailable`].

pub mod memory;
pub mod postgres;

use std::cmp::Ordering;
use std::sync::Arc;

use async_trait::async_trait;
use serde_json::{Map, Value};
use thiserror::Error;
use tracing::instrument;

use voiceforge_core::{Collection, Record};

use crate::config::StorageConfig;

pub use memory::MemoryDocumentStore;
pub use postgres::PgDocumentStore;

/// A schemaless document: a mapping of field names to JSON values.
pub type Document = Map<String, Value>;

/// Errors that can occur during storage operations.
#[derive(Debug, Error)]
pub enum StorageError {
    /// No document store is configured or it could not be reached at startup.
    #[error("storage is not available")]
    Unavailable,

    /// Database error from sqlx.
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),

    /// Applying the document table migrations failed.
    #[error("migration error: {0}")]
    Migration(#[from] sqlx::migrate::MigrateError),

    /// A record could not be converted to or from a document.
    #[error("invalid document in collection {collection}: {source}")]
    InvalidDocument {
        collection: &'static str,
        #[source]
        source: serde_json::Error,
    },

    /// Any other backend failure.
    #[error("{0}")]
    Backend(String),
}

/// A backend that stores documents grouped into named collections.
///
/// Implementations must be safe to share across concurrent requests; any
/// required synchronisation is the backend's own concern.
#[async_trait]
pub trait DocumentStore: Send + Sync {
    /// Name of the database this store is attached to.
    fn name(&self) -> &str;

    /// Insert one document and return its generated identifier.
    async fn insert_one(&self, collection: &str, document: Document)
    -> Result<String, StorageError>;

    /// Insert several documents, returning their identifiers in input order.
    async fn insert_many(
        &self,
        collection: &str,
        documents: Vec<Document>,
    ) -> Result<Vec<String>, StorageError> {
        let mut ids = Vec::with_capacity(documents.len());
        for document in documents {
            ids.push(self.insert_one(collection, document).await?);
        }
        Ok(ids)
    }

    /// Read every document in a collection.
    ///
    /// With `sort_by`, documents are ordered ascending by that field (see
    /// [`compare_field`]); ties and unsorted reads keep insertion order.
    /// Returned documents never contain the store's identifier.
    async fn find_all(
        &self,
        collection: &str,
        sort_by: Option<&str>,
    ) -> Result<Vec<Document>, StorageError>;

    /// Count the documents in a collection.
    async fn count_documents(&self, collection: &str) -> Result<u64, StorageError>;

    /// Names of all non-empty collections, sorted.
    async fn list_collection_names(&self) -> Result<Vec<String>, StorageError>;
}

/// Handle to the document store shared by every request.
///
/// Cheap to clone. Constructed once at startup and passed to handlers
/// through [`crate::state::AppState`].
#[derive(Clone, Default)]
pub struct Storage {
    store: Option<Arc<dyn DocumentStore>>,
}

impl std::fmt::Debug for Storage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Storage")
            .field("available", &self.is_available())
            .field("name", &self.name())
            .finish()
    }
}

impl Storage {
    /// Wrap a connected backend.
    #[must_use]
    pub fn new(store: Arc<dyn DocumentStore>) -> Self {
        Self { store: Some(store) }
    }

    /// A handle with no backend.
    #[must_use]
    pub const fn unavailable() -> Self {
        Self { store: None }
    }

    /// Connect to the configured document store.
    ///
    /// Never fails: a missing connection string or a failed connection
    /// yields an unavailable handle, which callers check via
    /// [`Self::is_available`].
    pub async fn connect(config: &StorageConfig) -> Self {
        let Some(database_url) = config.database_url.as_ref() else {
            tracing::warn!("No database URL configured; running without storage");
            return Self::unavailable();
        };

        match PgDocumentStore::connect(database_url, config.database_name.as_deref()).await {
            Ok(store) => {
                tracing::info!(database = %store.name(), "Document store connected");
                Self::new(Arc::new(store))
            }
            Err(e) => {
                tracing::error!(error = %e, "Failed to connect to document store; running without storage");
                Self::unavailable()
            }
        }
    }

    /// Whether a backend is attached.
    #[must_use]
    pub const fn is_available(&self) -> bool {
        self.store.is_some()
    }

    /// Name of the attached database, if any.
    #[must_use]
    pub fn name(&self) -> Option<&str> {
        self.store.as_deref().map(|store| store.name())
    }

    fn store(&self) -> Result<&dyn DocumentStore, StorageError> {
        self.store.as_deref().ok_or(StorageError::Unavailable)
    }

    /// Insert a record into its collection and return the generated identifier.
    ///
    /// # Errors
    ///
    /// Returns `StorageError::Unavailable` without a backend, or the backend's error.
    #[instrument(skip(self, record), fields(collection = %T::COLLECTION))]
    pub async fn insert<T: Record>(&self, record: &T) -> Result<String, StorageError> {
        let store = self.store()?;
        let document = to_document(record)?;
        store.insert_one(T::COLLECTION.as_str(), document).await
    }

    /// Insert several records into their collection.
    ///
    /// # Errors
    ///
    /// Returns `StorageError::Unavailable` without a backend, or the backend's error.
    #[instrument(skip(self, records), fields(collection = %T::COLLECTION, count = records.len()))]
    pub async fn insert_many<T: Record>(&self, records: &[T]) -> Result<Vec<String>, StorageError> {
        let store = self.store()?;
        let documents = records
            .iter()
            .map(to_document)
            .collect::<Result<Vec<_>, _>>()?;
        store
            .insert_many(T::COLLECTION.as_str(), documents)
            .await
    }

    /// Read every document in a collection as stored, optionally sorted
    /// ascending by a field.
    ///
    /// Returns an empty list without a backend.
    ///
    /// # Errors
    ///
    /// Returns the backend's error.
    #[instrument(skip(self), fields(collection = %collection))]
    pub async fn find_documents(
        &self,
        collection: Collection,
        sort_by: Option<&str>,
    ) -> Result<Vec<Document>, StorageError> {
        match self.store.as_deref() {
            Some(store) => store.find_all(collection.as_str(), sort_by).await,
            None => Ok(Vec::new()),
        }
    }

    /// Read every record in a collection, optionally sorted ascending by a field.
    ///
    /// Returns an empty list without a backend.
    ///
    /// # Errors
    ///
    /// Returns the backend's error, or `StorageError::InvalidDocument` if a
    /// stored document does not match the record shape.
    pub async fn find_all<T: Record>(&self, sort_by: Option<&str>) -> Result<Vec<T>, StorageError> {
        self.find_documents(T::COLLECTION, sort_by)
            .await?
            .into_iter()
            .map(|document| {
                serde_json::from_value(Value::Object(document)).map_err(|source| {
                    StorageError::InvalidDocument {
                        collection: T::COLLECTION.as_str(),
                        source,
                    }
                })
            })
            .collect()
    }

    /// Count the records in a collection. Zero without a backend.
    ///
    /// # Errors
    ///
    /// Returns the backend's error.
    pub async fn count<T: Record>(&self) -> Result<u64, StorageError> {
        match self.store.as_deref() {
            Some(store) => store.count_documents(T::COLLECTION.as_str()).await,
            None => Ok(0),
        }
    }

    /// Names of the collections in the store.
    ///
    /// # Errors
    ///
    /// Returns `StorageError::Unavailable` without a backend, or the backend's error.
    pub async fn collection_names(&self) -> Result<Vec<String>, StorageError> {
        self.store()?.list_collection_names().await
    }
}

fn to_document<T: Record>(record: &T) -> Result<Document, StorageError> {
    let invalid = |source| StorageError::InvalidDocument {
        collection: T::COLLECTION.as_str(),
        source,
    };

    match serde_json::to_value(record).map_err(invalid)? {
        Value::Object(document) => Ok(document),
        other => Err(invalid(serde::de::Error::custom(format!(
            "expected an object, got {other}"
        )))),
    }
}

/// Ascending order of a sort field across two documents.
///
/// Missing and `null` fields sort first. Same-typed numbers, strings and
/// booleans compare naturally; arrays and objects compare equal. Values of
/// different types are ranked null < number < string < object < array < bool.
///
/// Only the same-typed cases match `PgDocumentStore`, where `jsonb` ranks
/// mixed types differently.
#[must_use]
pub fn compare_field(a: Option<&Value>, b: Option<&Value>) -> Ordering {
    fn rank(value: Option<&Value>) -> u8 {
        match value {
            None | Some(Value::Null) => 0,
            Some(Value::Number(_)) => 1,
            Some(Value::String(_)) => 2,
            Some(Value::Object(_)) => 3,
            Some(Value::Array(_)) => 4,
            Some(Value::Bool(_)) => 5,
        }
    }

    match (a, b) {
        (Some(Value::Number(x)), Some(Value::Number(y))) => match (x.as_i64(), y.as_i64()) {
            (Some(x), Some(y)) => x.cmp(&y),
            _ => x
                .as_f64()
                .partial_cmp(&y.as_f64())
                .unwrap_or(Ordering::Equal),
        },
        (Some(Value::String(x)), Some(Value::String(y))) => x.cmp(y),
        (Some(Value::Bool(x)), Some(Value::Bool(y))) => x.cmp(y),
        _ => rank(a).cmp(&rank(b)),
    }
}
