//! Normalized news item record
//!
//! Common output shape of both wire parsers. The serialized field names are
//! the contract with the downstream ingest pipeline and must not change.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Content type of a parsed item. This parsing core only produces text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ContentType {
    /// Plain text story
    Text,
}

/// A subject/category term from a controlled vocabulary
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Subject {
    /// Controlled-vocabulary code
    pub qcode: String,
    /// Human-readable term name; may be empty for unknown codes
    pub name: String,
    /// Vocabulary the qcode belongs to (e.g. "services-products", "sources").
    /// IPTC subject codes carry no scheme.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub scheme: Option<String>,
    /// Parent term within the scheme, when the vocabulary is hierarchical
    #[serde(skip_serializing_if = "Option::is_none")]
    pub parent: Option<String>,
}

impl Subject {
    /// Subject term without a scheme (IPTC subject codes).
    pub fn new(qcode: &str, name: &str) -> Self {
        Subject {
            qcode: qcode.to_string(),
            name: name.to_string(),
            scheme: None,
            parent: None,
        }
    }

    /// Subject term within a named scheme.
    pub fn with_scheme(qcode: &str, name: &str, scheme: &str) -> Self {
        Subject {
            scheme: Some(scheme.to_string()),
            ..Subject::new(qcode, name)
        }
    }
}

/// A genre entry from NewsML descriptive metadata
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Genre {
    /// Genre formal name
    pub name: String,
}

/// Dateline: where/when the story was filed
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Dateline {
    /// Display text, e.g. "May 19, 2024" or a city
    pub text: String,
    /// Structured location when one could be derived
    #[serde(skip_serializing_if = "Option::is_none")]
    pub located: Option<String>,
}

/// Normalized content record produced by every wire parser.
///
/// Created fresh per parse call; the parsers hold no state across calls.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewsItem {
    /// Unique id: generated for bulletins, extracted for NewsML
    pub guid: String,
    /// Revision identifier; bulletins have none
    #[serde(skip_serializing_if = "Option::is_none")]
    pub version: Option<String>,
    /// Always text for this core
    #[serde(rename = "type")]
    pub item_type: ContentType,
    /// Required, may be empty
    pub headline: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub byline: Option<String>,
    /// Always serialized; bulletins force it to null
    pub slugline: Option<String>,
    /// HTML fragment
    pub body: String,
    /// Editorial note, not for publication
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ednote: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dateline: Option<Dateline>,
    /// Mapped from a dialect-specific single-character code
    pub priority: u8,
    /// Ordered; unique by qcode within a scheme where the parser dedups
    pub subject: Vec<Subject>,
    /// Ordered; NewsML fills from numbered slots, bulletins always empty
    pub keywords: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub word_count: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub language: Option<String>,
    /// NewsML only
    #[serde(skip_serializing_if = "Option::is_none")]
    pub urgency: Option<u8>,
    pub firstcreated: DateTime<Utc>,
    pub versioncreated: DateTime<Utc>,
    /// NewsML only, lower-cased
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pubstatus: Option<String>,
    /// NewsML only
    pub genre: Vec<Genre>,
    /// Provider name, decoded with best-effort fallback for non-UTF8 bytes
    #[serde(skip_serializing_if = "Option::is_none")]
    pub original_source: Option<String>,
    /// Transmission sequence id
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ingest_provider_sequence: Option<String>,
    /// Bulletin-only header annotations
    #[serde(skip_serializing_if = "Option::is_none")]
    pub anpa_take_key: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub anpa_header: Option<String>,
    /// ATS bulletins split an abstract off the body
    #[serde(rename = "abstract", skip_serializing_if = "Option::is_none")]
    pub abstract_: Option<String>,
    /// NewsML usage rights, set only when absent
    #[serde(skip_serializing_if = "Option::is_none")]
    pub usageterms: Option<String>,
}

impl NewsItem {
    /// Fresh text item with both timestamps stamped now and everything
    /// else empty or absent.
    pub fn text(guid: String) -> Self {
        let now = Utc::now();
        NewsItem {
            guid,
            version: None,
            item_type: ContentType::Text,
            headline: String::new(),
            byline: None,
            slugline: None,
            body: String::new(),
            ednote: None,
            dateline: None,
            priority: crate::codes::PRIORITY_DEFAULT,
            subject: Vec::new(),
            keywords: Vec::new(),
            word_count: None,
            language: None,
            urgency: None,
            firstcreated: now,
            versioncreated: now,
            pubstatus: None,
            genre: Vec::new(),
            original_source: None,
            ingest_provider_sequence: None,
            anpa_take_key: None,
            anpa_header: None,
            abstract_: None,
            usageterms: None,
        }
    }

    /// Append a subject entry unless one with the same scheme and qcode is
    /// already present. First occurrence wins.
    pub fn push_subject(&mut self, subject: Subject) {
        let dup = self
            .subject
            .iter()
            .any(|s| s.scheme == subject.scheme && s.qcode == subject.qcode);
        if !dup {
            self.subject.push(subject);
        }
    }
}
