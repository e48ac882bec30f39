//! Default CMS content for a fresh store.

use voiceforge_core::{Faq, Section, TrustBadge};

fn section(slug: &str, title: &str, order: i64) -> Section {
    Section {
        slug: slug.to_owned(),
        title: title.to_owned(),
        content_md: String::new(),
        order,
        visible: true,
    }
}

fn badge(slug: &str, title: &str, description: &str, order: i64) -> TrustBadge {
    TrustBadge {
        slug: slug.to_owned(),
        title: title.to_owned(),
        description: Some(description.to_owned()),
        order,
    }
}

fn faq(slug: &str, question: &str, answer_md: &str, order: i64) -> Faq {
    Faq {
        slug: slug.to_owned(),
        question: question.to_owned(),
        answer_md: answer_md.to_owned(),
        order,
    }
}

/// Landing page sections, in page order.
#[must_use]
pub fn sections() -> Vec<Section> {
    vec![
        section("hero", "KI Voice Agents für Ihr Unternehmen", 1),
        section("challenges", "Ihre Herausforderungen", 2),
        section("solutions", "Unsere Lösungen", 3),
        section("demo", "Live-Demo buchen", 4),
        section("trust", "Vertrauen & Sicherheit", 5),
        section("faq", "Häufige Fragen", 6),
    ]
}

/// Trust badges shown below the hero.
#[must_use]
pub fn trust_badges() -> Vec<TrustBadge> {
    vec![
        badge("gdpr", "DSGVO-konform", "Datenverarbeitung in der EU", 1),
        badge("iso", "ISO-zertifiziert", "Sichere Prozesse & Audits", 2),
        badge("made-de", "Made in Germany", "Entwickelt & betrieben in DE", 3),
    ]
}

/// Frequently asked questions.
#[must_use]
pub fn faqs() -> Vec<Faq> {
    vec![
        faq(
            "ai-transparenz",
            "Spreche ich mit einer KI?",
            "Ja. Sie sprechen mit einem KI-Assistenten. Eine Weiterleitung zu Mitarbeitenden ist jederzeit möglich.",
            1,
        ),
        faq(
            "verfugbarkeit",
            "Ist der Service 24/7 erreichbar?",
            "Ja, Ihre Anrufer werden rund um die Uhr betreut – auch an Wochenenden und Feiertagen.",
            2,
        ),
        faq(
            "integration",
            "Wie integriert sich VoiceForge?",
            "Wir verbinden uns mit Kalendern, Ticket-Tools und CRM-Systemen per API.",
            3,
        ),
        faq(
            "datenschutz",
            "Wie wird Datenschutz gewährleistet?",
            "DSGVO-konform mit EU-Hosting, AVV auf Anfrage.",
            4,
        ),
        faq(
            "preise",
            "Wie sind die Preise?",
            "Transparente Pakete je nach Volumen. Sie erhalten ein Angebot nach der Demo.",
            5,
        ),
        faq(
            "setup",
            "Wie lange dauert das Setup?",
            "In der Regel 1–2 Wochen bis zum Go-Live.",
            6,
        ),
        faq(
            "notfall",
            "Werden Notfälle erkannt?",
            "Ja, Notfall-Stichworte werden priorisiert und entsprechend eskaliert.",
            7,
        ),
        faq(
            "kanale",
            "Unterstützte Kanäle?",
            "Telefon, Chat, E-Mail und WhatsApp – Omnichannel.",
            8,
        ),
        faq(
            "support",
            "Was ist mit L1/L2-Support?",
            "L1-Triage mit Wissensdatenbank und strukturierter Eskalation an L2.",
            9,
        ),
        faq(
            "pilot",
            "Gibt es einen Pilot?",
            "Ja. Nach der Demo erhalten Sie einen ersten Prototypen.",
            10,
        ),
    ]
}
