//! CLI subcommands.

pub mod migrate;
pub mod seed;

use voiceforge_api::config::{ApiConfig, DATABASE_URL_VAR};
use voiceforge_api::storage::PgDocumentStore;

/// Errors shared by commands that need a database.
#[derive(Debug, thiserror::Error)]
pub enum CommandError {
    #[error("Missing environment variable: {0} (or DATABASE_URL)")]
    MissingEnvVar(&'static str),

    #[error(transparent)]
    Config(#[from] voiceforge_api::config::ConfigError),

    #[error(transparent)]
    Storage(#[from] voiceforge_api::storage::StorageError),
}

/// Load configuration and connect to the configured store.
///
/// Connecting applies pending migrations.
pub async fn connect() -> Result<PgDocumentStore, CommandError> {
    let config = ApiConfig::from_env()?;
    let database_url = config
        .storage
        .database_url
        .as_ref()
        .ok_or(CommandError::MissingEnvVar(DATABASE_URL_VAR))?;

    tracing::info!("Connecting to document store...");
    let store =
        PgDocumentStore::connect(database_url, config.storage.database_name.as_deref()).await?;
    Ok(store)
}
