//! Records and the collections they live in.
//!
//! Each record type maps to exactly one named collection in the document
//! store. There are no references between collections.

pub mod cms;
pub mod lead;

use serde::Serialize;
use serde::de::DeserializeOwned;

pub use cms::{CmsRecord, Faq, Section, TrustBadge};
pub use lead::{CONSENT_REQUIRED_MESSAGE, ConsentError, Lead, LeadSubmission};

/// A named collection in the document store.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Collection {
    Lead,
    Faq,
    Section,
    TrustBadge,
}

impl Collection {
    /// Every collection.
    pub const ALL: [Self; 4] = [Self::Lead, Self::Faq, Self::Section, Self::TrustBadge];

    /// The collection name used in the store (lowercased record name).
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Lead => "lead",
            Self::Faq => "faq",
            Self::Section => "section",
            Self::TrustBadge => "trustbadge",
        }
    }
}

impl std::fmt::Display for Collection {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A record type stored in a fixed collection.
pub trait Record: Serialize + DeserializeOwned + Send + Sync + 'static {
    /// The collection records of this type are stored in.
    const COLLECTION: Collection;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_collection_names() {
        assert_eq!(Collection::Lead.as_str(), "lead");
        assert_eq!(Collection::Faq.as_str(), "faq");
        assert_eq!(Collection::Section.as_str(), "section");
        assert_eq!(Collection::TrustBadge.to_string(), "trustbadge");
    }

    #[test]
    fn test_collection_names_are_distinct_lowercase() {
        let names: std::collections::HashSet<_> =
            Collection::ALL.iter().map(|c| c.as_str()).collect();
        assert_eq!(names.len(), Collection::ALL.len());
        assert!(names.iter().all(|n| n.chars().all(|c| c.is_ascii_lowercase())));
    }

    #[test]
    fn test_records_bound_to_collections() {
        assert_eq!(Lead::COLLECTION, Collection::Lead);
        assert_eq!(Faq::COLLECTION, Collection::Faq);
        assert_eq!(Section::COLLECTION, Collection::Section);
        assert_eq!(TrustBadge::COLLECTION, Collection::TrustBadge);
    }
}
