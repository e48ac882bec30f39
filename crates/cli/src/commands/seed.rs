//! Seed empty CMS collections with the default German content.
//!
//! Collections that already hold documents are left untouched.

use std::sync::Arc;

use voiceforge_api::{Storage, seed::seed_defaults};

use super::{CommandError, connect};

/// Run the CMS seeder against the configured database.
///
/// # Errors
///
/// Returns an error if no database URL is configured, the connection fails,
/// or an insert fails.
pub async fn run() -> Result<(), CommandError> {
    let storage = Storage::new(Arc::new(connect().await?));

    let report = seed_defaults(&storage).await?;
    if report.inserted() == 0 {
        tracing::info!("All CMS collections already populated, nothing to do");
    } else {
        tracing::info!(
            sections = report.sections,
            trust_badges = report.trust_badges,
            faqs = report.faqs,
            "CMS seed complete"
        );
    }
    Ok(())
}
