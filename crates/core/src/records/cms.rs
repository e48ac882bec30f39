//! CMS content records.
//!
//! These are the shapes the seeder writes. Decoding a stored document fills
//! missing fields with the same defaults.

use serde::{Deserialize, Serialize};

use super::{Collection, Record};

/// Shared accessors for ordered CMS content.
pub trait CmsRecord: Record {
    /// Position in display order (ascending).
    fn order(&self) -> i64;
}

/// A frequently asked question.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Faq {
    pub slug: String,
    pub question: String,
    /// Answer as Markdown.
    pub answer_md: String,
    #[serde(default)]
    pub order: i64,
}

/// A section of the landing page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Section {
    pub slug: String,
    pub title: String,
    /// Body as Markdown.
    #[serde(default)]
    pub content_md: String,
    #[serde(default)]
    pub order: i64,
    #[serde(default = "default_visible")]
    pub visible: bool,
}

const fn default_visible() -> bool {
    true
}

/// A trust badge (certification, compliance claim).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TrustBadge {
    pub slug: String,
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub order: i64,
}

impl Record for Faq {
    const COLLECTION: Collection = Collection::Faq;
}

impl Record for Section {
    const COLLECTION: Collection = Collection::Section;
}

impl Record for TrustBadge {
    const COLLECTION: Collection = Collection::TrustBadge;
}

impl CmsRecord for Faq {
    fn order(&self) -> i64 {
        self.order
    }
}

impl CmsRecord for Section {
    fn order(&self) -> i64 {
        self.order
    }
}

impl CmsRecord for TrustBadge {
    fn order(&self) -> i64 {
        self.order
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn test_section_defaults() {
        let section: Section =
            serde_json::from_value(json!({"slug": "hero", "title": "Hero"})).unwrap();
        assert_eq!(section.content_md, "");
        assert_eq!(section.order, 0);
        assert!(section.visible);
    }

    #[test]
    fn test_faq_requires_answer() {
        let result: Result<Faq, _> =
            serde_json::from_value(json!({"slug": "preise", "question": "Wie sind die Preise?"}));
        assert!(result.is_err());
    }

    #[test]
    fn test_trust_badge_camel_case_wire_format() {
        let badge = TrustBadge {
            slug: "gdpr".to_owned(),
            title: "DSGVO-konform".to_owned(),
            description: None,
            order: 1,
        };
        let json = serde_json::to_value(&badge).unwrap();
        assert_eq!(
            json,
            json!({"slug": "gdpr", "title": "DSGVO-konform", "description": null, "order": 1})
        );
    }

    #[test]
    fn test_faq_answer_md_field_name() {
        let faq = Faq {
            slug: "setup".to_owned(),
            question: "Wie lange dauert das Setup?".to_owned(),
            answer_md: "1-2 Wochen".to_owned(),
            order: 6,
        };
        let json = serde_json::to_value(&faq).unwrap();
        assert_eq!(json["answerMd"], "1-2 Wochen");
        assert_eq!(CmsRecord::order(&faq), 6);
    }
}
