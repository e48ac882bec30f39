//! Default CMS content for empty collections.
//!
//! Runs once at startup (and on demand via `voiceforge-cli seed`). Each CMS
//! collection is filled only if it is empty, so re-running never duplicates
//! or overwrites content. This is bootstrap data, not a migration system.

pub mod defaults;

use tracing::{info, instrument};

use voiceforge_core::{CmsRecord, Faq, Section, TrustBadge};

use crate::storage::{Storage, StorageError};

/// Result of a seeding run.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct SeedReport {
    /// Sections inserted.
    pub sections: usize,
    /// Trust badges inserted.
    pub trust_badges: usize,
    /// FAQs inserted.
    pub faqs: usize,
    /// False if storage was unavailable and nothing was checked.
    pub ran: bool,
}

impl SeedReport {
    /// Total number of records inserted.
    #[must_use]
    pub const fn inserted(&self) -> usize {
        self.sections + self.trust_badges + self.faqs
    }
}

/// Seed every empty CMS collection with its defaults.
///
/// Skips entirely (returning an empty report) when storage is unavailable.
///
/// # Errors
///
/// Returns an error if counting or inserting fails. Collections seeded before
/// the failure stay seeded.
#[instrument(skip(storage))]
pub async fn seed_defaults(storage: &Storage) -> Result<SeedReport, StorageError> {
    if !storage.is_available() {
        info!("Storage unavailable, skipping CMS seed");
        return Ok(SeedReport::default());
    }

    Ok(SeedReport {
        sections: seed_if_empty(storage, defaults::sections()).await?,
        trust_badges: seed_if_empty(storage, defaults::trust_badges()).await?,
        faqs: seed_if_empty(storage, defaults::faqs()).await?,
        ran: true,
    })
}

async fn seed_if_empty<T: CmsRecord>(storage: &Storage, records: Vec<T>) -> Result<usize, StorageError> {
    let existing = storage.count::<T>().await?;
    if existing > 0 {
        info!(collection = %T::COLLECTION, existing, "Collection already populated");
        return Ok(0);
    }

    let ids = storage.insert_many(&records).await?;
    info!(collection = %T::COLLECTION, inserted = ids.len(), "Seeded collection");
    Ok(ids.len())
}
