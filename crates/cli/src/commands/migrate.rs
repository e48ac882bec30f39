//! Document store migration command.
//!
//! Migrations live in `crates/api/migrations/` and are embedded in the API
//! crate. The API also applies them on every startup; this command exists for
//! deploy pipelines that migrate before rolling out.

use voiceforge_api::storage::DocumentStore;
use voiceforge_api::storage::postgres::MIGRATOR;

use super::{CommandError, connect};

/// Connect to the configured database, which applies pending migrations.
///
/// # Errors
///
/// Returns an error if no database URL is configured, or connecting or
/// migrating fails.
pub async fn run() -> Result<(), CommandError> {
    let store = connect().await?;

    tracing::info!(
        database = %store.name(),
        migrations = MIGRATOR.iter().count(),
        "Migrations complete"
    );
    Ok(())
}
