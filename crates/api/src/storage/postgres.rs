//! `PostgreSQL` document store.
//!
//! # Table: `documents`
//!
//! | Column | Type | Notes |
//! |---|---|---|
//! | `seq` | `BIGSERIAL` | insertion order, tie-breaker for sorts |
//! | `id` | `UUID` | identifier returned to callers |
//! | `collection` | `TEXT` | collection name |
//! | `body` | `JSONB` | the document, without its identifier |
//! | `created_at` | `TIMESTAMPTZ` | insertion time |
//!
//! # Migrations
//!
//! Migrations are stored in `crates/api/migrations/` and embedded in the
//! binary. They run on every connect (they are idempotent) and can be run
//! explicitly via:
//! ```bash
//! cargo run -p voiceforge-cli -- migrate
//! ```

use std::str::FromStr;
use std::time::Duration;

use async_trait::async_trait;
use secrecy::{ExposeSecret, SecretString};
use sqlx::PgPool;
use sqlx::migrate::Migrator;
use sqlx::postgres::{PgConnectOptions, PgPoolOptions};
use sqlx::types::Json;
use tracing::instrument;
use uuid::Uuid;

use super::{Document, DocumentStore, StorageError};

/// Embedded migrations for the documents table.
pub static MIGRATOR: Migrator = sqlx::migrate!("./migrations");

/// Database name reported when neither the config nor the URL names one.
const DEFAULT_DATABASE_NAME: &str = "postgres";

/// Document store backed by a `JSONB` table.
#[derive(Debug, Clone)]
pub struct PgDocumentStore {
    pool: PgPool,
    name: String,
}

impl PgDocumentStore {
    /// Connect, apply migrations, and return the store.
    ///
    /// # Arguments
    ///
    /// * `database_url` - `PostgreSQL` connection string (wrapped in `SecretString`)
    /// * `database_name` - Database to select, overriding the one in the URL
    ///
    /// # Errors
    ///
    /// Returns `StorageError::Database` if the URL is invalid or the connection
    /// cannot be established, `StorageError::Migration` if migrations fail.
    pub async fn connect(
        database_url: &SecretString,
        database_name: Option<&str>,
    ) -> Result<Self, StorageError> {
        let url = database_url.expose_secret();
        let mut options = PgConnectOptions::from_str(url)?;
        if let Some(name) = database_name {
            options = options.database(name);
        }

        let name = database_name
            .map(str::to_owned)
            .or_else(|| database_from_url(url))
            .unwrap_or_else(|| DEFAULT_DATABASE_NAME.to_owned());

        let pool = PgPoolOptions::new()
            .max_connections(10)
            .min_connections(1)
            .acquire_timeout(Duration::from_secs(10))
            .connect_with(options)
            .await?;

        let store = Self::from_pool(pool, name);
        store.migrate().await?;
        Ok(store)
    }

    const fn from_pool(pool: PgPool, name: String) -> Self {
        Self { pool, name }
    }

    /// Apply pending migrations.
    ///
    /// # Errors
    ///
    /// Returns `StorageError::Migration` if a migration fails.
    pub async fn migrate(&self) -> Result<(), StorageError> {
        MIGRATOR.run(&self.pool).await?;
        Ok(())
    }
}

#[async_trait]
impl DocumentStore for PgDocumentStore {
    fn name(&self) -> &str {
        &self.name
    }

    #[instrument(skip(self, document))]
    async fn insert_one(
        &self,
        collection: &str,
        document: Document,
    ) -> Result<String, StorageError> {
        let id = Uuid::new_v4();

        sqlx::query(
            r"
            INSERT INTO documents (id, collection, body)
            VALUES ($1, $2, $3)
            ",
        )
        .bind(id)
        .bind(collection)
        .bind(Json(document))
        .execute(&self.pool)
        .await?;

        Ok(id.to_string())
    }

    #[instrument(skip(self, documents), fields(count = documents.len()))]
    async fn insert_many(
        &self,
        collection: &str,
        documents: Vec<Document>,
    ) -> Result<Vec<String>, StorageError> {
        let mut tx = self.pool.begin().await?;
        let mut ids = Vec::with_capacity(documents.len());

        for document in documents {
            let id = Uuid::new_v4();
            sqlx::query(
                r"
                INSERT INTO documents (id, collection, body)
                VALUES ($1, $2, $3)
                ",
            )
            .bind(id)
            .bind(collection)
            .bind(Json(document))
            .execute(&mut *tx)
            .await?;
            ids.push(id.to_string());
        }

        tx.commit().await?;
        Ok(ids)
    }

    #[instrument(skip(self))]
    async fn find_all(
        &self,
        collection: &str,
        sort_by: Option<&str>,
    ) -> Result<Vec<Document>, StorageError> {
        // `->` keeps the JSON type, so numbers compare numerically
        let rows: Vec<Json<Document>> = match sort_by {
            Some(field) => {
                sqlx::query_scalar(
                    r"
                    SELECT body FROM documents
                    WHERE collection = $1
                    ORDER BY body -> $2 ASC NULLS FIRST, seq ASC
                    ",
                )
                .bind(collection)
                .bind(field)
                .fetch_all(&self.pool)
                .await?
            }
            None => {
                sqlx::query_scalar(
                    r"
                    SELECT body FROM documents
                    WHERE collection = $1
                    ORDER BY seq ASC
                    ",
                )
                .bind(collection)
                .fetch_all(&self.pool)
                .await?
            }
        };

        Ok(rows.into_iter().map(|Json(document)| document).collect())
    }

    async fn count_documents(&self, collection: &str) -> Result<u64, StorageError> {
        let count: i64 =
            sqlx::query_scalar("SELECT COUNT(*) FROM documents WHERE collection = $1")
                .bind(collection)
                .fetch_one(&self.pool)
                .await?;

        Ok(u64::try_from(count).unwrap_or(0))
    }

    async fn list_collection_names(&self) -> Result<Vec<String>, StorageError> {
        let names: Vec<String> = sqlx::query_scalar(
            r"
            SELECT DISTINCT collection FROM documents
            ORDER BY collection
            ",
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(names)
    }
}

/// Extract the database name from the path of a connection URL.
fn database_from_url(url: &str) -> Option<String> {
    let parsed = url::Url::parse(url).ok()?;
    let name = parsed.path().trim_start_matches('/');
    (!name.is_empty()).then(|| name.to_owned())
}
