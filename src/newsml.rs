//! CTK NewsML 1.0.4 extractor
//!
//! Walks an already-parsed document tree and fills the normalized item.
//! Extraction is tolerant of absent nodes (the field is omitted or
//! defaulted), with one exception: a document without its NewsIdentifier
//! cannot be ingested and fails the whole parse.

use chrono::{DateTime, NaiveDateTime, Utc};
use tracing::debug;

use crate::codes;
use crate::error::Cause;
use crate::item::{Dateline, Genre, NewsItem, Subject};
use crate::xmltree::Element;
use crate::{Result, WireError};

/// Root tag of a CTK NewsML document.
const ROOT_TAG: &str = "NewsML";

/// Numbered keyword property slots, read in slot order.
const KEYWORD_SLOTS: u32 = 10;

/// Wrapper tag literals stripped from the serialized body content.
/// A literal string replace, not structural re-serialization.
const BODY_WRAPPERS: [&str; 6] = [
    "<DataContent xmlns:xsi=\"http://www.w3.org/2001/XMLSchema-instance\">",
    "<DataContent>",
    "</DataContent>",
    "<body xmlns=\"http://newsml.ctk.cz/ns/ctkxhtml.xsd\">",
    "<body>",
    "</body>",
];

/// Whether the tree is a CTK NewsML document.
pub fn can_parse(root: &Element) -> bool {
    root.tag == ROOT_TAG
}

/// Extract a normalized item from a CTK NewsML tree.
///
/// Any failure anywhere in extraction is wrapped into a single
/// [`WireError::ParseFailure`] carrying the provider identity.
pub fn parse(root: &Element, provider: &str) -> Result<NewsItem> {
    extract(root).map_err(|cause| WireError::parse_failure(provider, cause))
}

/// Convenience entry point for raw document bytes: well-formedness errors
/// also count as parse failures.
pub fn parse_bytes(data: &[u8], provider: &str) -> Result<NewsItem> {
    let text = String::from_utf8_lossy(data);
    let root =
        Element::parse(&text).map_err(|e| WireError::parse_failure(provider, e.to_string()))?;
    parse(&root, provider)
}

fn extract(root: &Element) -> std::result::Result<NewsItem, Cause> {
    let mut item = NewsItem::text(String::new());

    if let Some(source) = root.find("NewsItem/NewsComponent/AdministrativeMetadata/Source") {
        let party = source.find("Party").ok_or("Source element without Party")?;
        item.original_source = Some(party.attr("FormalName").unwrap_or("").to_string());
    }

    if let Some(seq) = root.find("NewsEnvelope/TransmissionId") {
        item.ingest_provider_sequence = seq.text().map(str::to_string);
    }

    item.priority = codes::map_priority(
        root.find("NewsEnvelope/Priority").and_then(Element::text),
    );

    extract_identifier(&mut item, root)?;
    extract_management(&mut item, root)?;
    extract_newslines(&mut item, root);

    let languages = root.findall("NewsItem/NewsComponent/DescriptiveMetadata/Language");
    item.language = Some(
        languages
            .first()
            .and_then(|el| el.attr("FormalName"))
            .unwrap_or("")
            .to_string(),
    );

    item.keywords = extract_keywords(root);
    item.subject = extract_subjects(root);
    item.body = extract_body(root);

    let characteristics = root.findall("NewsItem/NewsComponent/ContentItem/Characteristics/Property");
    item.word_count = property_values(&characteristics, "Words")
        .first()
        .and_then(|value| value.parse().ok());

    if item.usageterms.is_none() {
        item.usageterms = root
            .find("NewsItem/NewsComponent/RightsMetadata/UsageRights/UsageType")
            .and_then(Element::text)
            .map(str::to_string);
    }

    item.genre = root
        .findall("NewsItem/NewsComponent/DescriptiveMetadata/Genre")
        .iter()
        .map(|el| Genre {
            name: el.attr("FormalName").unwrap_or("").to_string(),
        })
        .collect();

    Ok(item)
}

/// Public identifier and revision are the one mandatory block.
fn extract_identifier(item: &mut NewsItem, root: &Element) -> std::result::Result<(), Cause> {
    let ident = root
        .find("NewsItem/Identification/NewsIdentifier")
        .ok_or("missing NewsIdentifier")?;
    item.guid = ident
        .find("PublicIdentifier")
        .and_then(Element::text)
        .ok_or("NewsIdentifier without PublicIdentifier")?
        .to_string();
    item.version = Some(
        ident
            .find("RevisionId")
            .and_then(Element::text)
            .ok_or("NewsIdentifier without RevisionId")?
            .to_string(),
    );
    Ok(())
}

fn extract_management(item: &mut NewsItem, root: &Element) -> std::result::Result<(), Cause> {
    let Some(mgmt) = root.find("NewsItem/NewsManagement") else {
        // no management block: both dates stay stamped at parse time
        return Ok(());
    };

    item.urgency = mgmt
        .find("Urgency")
        .and_then(|el| el.attr("FormalName"))
        .and_then(|value| value.parse().ok());

    if let Some(value) = mgmt.find("ThisRevisionCreated").and_then(Element::text) {
        item.versioncreated = parse_datetime(value)?;
    }
    if let Some(value) = mgmt.find("FirstCreated").and_then(Element::text) {
        item.firstcreated = parse_datetime(value)?;
    }

    item.pubstatus = mgmt
        .find("Status")
        .and_then(|el| el.attr("FormalName"))
        .map(str::to_lowercase);

    Ok(())
}

fn extract_newslines(item: &mut NewsItem, root: &Element) {
    let newslines = root.find("NewsItem/NewsComponent/NewsLines");
    let line = |tag: &str| {
        newslines
            .and_then(|nl| nl.find(tag))
            .and_then(Element::text)
            .unwrap_or("")
            .to_string()
    };

    let dateline = line("DateLine");
    let text = if dateline.is_empty() {
        item.versioncreated.format("%B %d, %Y").to_string()
    } else {
        dateline
    };
    item.dateline = Some(Dateline {
        text,
        located: None,
    });

    item.headline = line("HeadLine");
    item.slugline = Some(line("SlugLine"));
    item.byline = Some(line("ByLine"));
}

/// Values of Property elements whose FormalName matches, in document order.
fn property_values(properties: &[&Element], formal_name: &str) -> Vec<String> {
    properties
        .iter()
        .filter(|el| el.attr("FormalName") == Some(formal_name))
        .filter_map(|el| el.attr("Value"))
        .map(str::to_string)
        .collect()
}

/// Ten numbered keyword slots, concatenated in slot order. Slot order wins
/// over document order; within a slot, document order is kept.
fn extract_keywords(root: &Element) -> Vec<String> {
    let properties = root.findall("NewsItem/NewsComponent/DescriptiveMetadata/Property");
    let mut keywords = Vec::new();
    for slot in 1..=KEYWORD_SLOTS {
        keywords.extend(property_values(&properties, &format!("Keyword{slot}")));
    }
    keywords
}

/// Union of the three IPTC subject-code categories, mapped through the
/// static code table and de-duplicated by qcode, first occurrence wins.
fn extract_subjects(root: &Element) -> Vec<Subject> {
    let mut elements = root.findall("NewsItem/NewsComponent/DescriptiveMetadata/SubjectCode/SubjectDetail");
    elements.extend(root.findall("NewsItem/NewsComponent/DescriptiveMetadata/SubjectCode/SubjectMatter"));
    elements.extend(root.findall("NewsItem/NewsComponent/DescriptiveMetadata/SubjectCode/Subject"));

    let mut subjects: Vec<Subject> = Vec::new();
    for el in elements {
        let Some(qcode) = el.attr("FormalName").filter(|name| !name.is_empty()) else {
            continue;
        };
        if subjects.iter().any(|s| s.qcode == qcode) {
            continue;
        }
        subjects.push(Subject::new(qcode, codes::subject_name(qcode)));
    }
    subjects
}

/// Serialize the content node to markup, then strip the known wrapper tag
/// literals. An absent content node leaves the body empty.
fn extract_body(root: &Element) -> String {
    let Some(content) = root.find("NewsItem/NewsComponent/ContentItem/DataContent") else {
        return String::new();
    };
    let mut body = content.to_markup();
    for wrapper in BODY_WRAPPERS {
        body = body.replace(wrapper, "");
    }
    body
}

/// Decode a management timestamp: the offset-suffixed format first, then the
/// "Z"-suffixed UTC form; both are read as naive and coerced to UTC.
fn parse_datetime(value: &str) -> std::result::Result<DateTime<Utc>, Cause> {
    if let Ok(naive) = NaiveDateTime::parse_from_str(value, "%Y%m%dT%H%M%S+0200") {
        return Ok(naive.and_utc());
    }
    debug!(value, "timestamp not offset-suffixed, trying UTC form");
    NaiveDateTime::parse_from_str(value, "%Y%m%dT%H%M%SZ")
        .map(|naive| naive.and_utc())
        .map_err(|e| format!("invalid timestamp {value:?}: {e}").into())
}
