//! Integration tests for the VoiceForge backend.
//!
//! # Running Tests
//!
//! ```bash
//! # In-process server with the memory store
//! cargo test -p voiceforge-integration-tests
//!
//! # Including the PostgreSQL store tests
//! VOICEFORGE_TEST_DATABASE_URL=postgres://localhost/voiceforge_test \
//!     cargo test -p voiceforge-integration-tests -- --include-ignored
//! ```
//!
//! Each test spawns the real router on `127.0.0.1:0` and drives it over HTTP
//! with `reqwest`.

use std::net::SocketAddr;
use std::sync::Arc;

use async_trait::async_trait;
use reqwest::Client;
use tokio::task::JoinHandle;

use voiceforge_api::config::ApiConfig;
use voiceforge_api::storage::{
    Document, DocumentStore, MemoryDocumentStore, Storage, StorageError,
};
use voiceforge_api::{AppState, app};

/// A running API server and a client pointed at it.
pub struct TestContext {
    pub client: Client,
    pub addr: SocketAddr,
    server: JoinHandle<()>,
}

impl TestContext {
    /// Serve the API with the given storage and configuration.
    pub async fn start(config: ApiConfig, storage: Storage) -> Self {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("Failed to bind test listener");
        let addr = listener.local_addr().expect("Listener has no address");

        let router = app(AppState::new(config, storage));
        let server = tokio::spawn(async move {
            axum::serve(listener, router)
                .await
                .expect("Test server error");
        });

        Self {
            client: Client::new(),
            addr,
            server,
        }
    }

    /// Serve the API backed by a fresh memory store.
    pub async fn with_memory_store() -> (Self, Arc<MemoryDocumentStore>) {
        let store = Arc::new(MemoryDocumentStore::new("voiceforge_test"));
        let ctx = Self::start(ApiConfig::default(), Storage::new(store.clone())).await;
        (ctx, store)
    }

    /// Serve the API without any storage.
    pub async fn without_storage() -> Self {
        Self::start(ApiConfig::default(), Storage::unavailable()).await
    }

    /// Serve the API backed by a store that fails every operation.
    pub async fn with_failing_store() -> Self {
        Self::start(ApiConfig::default(), Storage::new(Arc::new(FailingStore))).await
    }

    /// Absolute URL for `path`.
    #[must_use]
    pub fn url(&self, path: &str) -> String {
        format!("http://{}{path}", self.addr)
    }
}

impl Drop for TestContext {
    fn drop(&mut self) {
        self.server.abort();
    }
}

/// A store whose every operation fails with a backend error.
pub struct FailingStore;

#[async_trait]
impl DocumentStore for FailingStore {
    fn name(&self) -> &str {
        "unreachable"
    }

    async fn insert_one(&self, _: &str, _: Document) -> Result<String, StorageError> {
        Err(StorageError::Backend("connection refused".to_owned()))
    }

    async fn find_all(&self, _: &str, _: Option<&str>) -> Result<Vec<Document>, StorageError> {
        Err(StorageError::Backend("connection refused".to_owned()))
    }

    async fn count_documents(&self, _: &str) -> Result<u64, StorageError> {
        Err(StorageError::Backend("connection refused".to_owned()))
    }

    async fn list_collection_names(&self) -> Result<Vec<String>, StorageError> {
        Err(StorageError::Backend("connection refused".to_owned()))
    }
}
