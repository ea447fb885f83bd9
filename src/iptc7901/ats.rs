//! ATS dialect: control-byte header, body recovered by divider search
//!
//! The first line is only control bytes; the real header sits on the second
//! line behind a DEL+SOH prefix. The rest of the stream is joined back
//! together and cut apart by "=" dividers rather than walked line by line.

use std::sync::LazyLock;

use regex::Regex;
use tracing::debug;

use crate::codes;
use crate::error::Cause;
use crate::item::{NewsItem, Subject};

use super::{decode_latin1, generate_guid, parse_word_count};

/// Header on the second line, behind the DEL+SOH prefix.
static HEADER: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)^\x7F\x01([a-zA-Z]*)([0-9]*) (.) ([A-Z]{1,3}) ([0-9]*) ([a-zA-Z0-9 ]*)")
        .expect("ats header pattern")
});

/// Headline: everything up to the last "=" on the first line carrying one.
static HEADLINE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r".*=").expect("headline pattern"));

/// Header/body divider: "=" followed by a run of 2+ whitespace.
static BODY: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?s)=\s{2,}(.*)").expect("body pattern"));

/// Abstract/body split: a run of 3+ whitespace, applied once.
static ABSTRACT_SPLIT: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\s{3,}").expect("abstract split pattern"));

/// Location hint: first whitespace-delimited token of the abstract.
static CITY: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^(\S*)").expect("city pattern"));

pub(super) fn parse_content(lines: &[&[u8]]) -> Result<(NewsItem, Option<String>), Cause> {
    let mut item = NewsItem::text(generate_guid());
    item.language = Some("fr".to_string());

    let header_line = lines.get(1).ok_or("missing ats header line")?;
    let header = decode_latin1(header_line);
    if let Some(caps) = HEADER.captures(&header) {
        let qcode = caps[4].to_uppercase();
        item.original_source = Some(caps[1].to_string());
        item.ingest_provider_sequence = Some(caps[2].to_string());
        item.priority = codes::map_priority(Some(&caps[3]));

        let product = codes::ats_product(&qcode);
        let mut product_subject = Subject::with_scheme(product, product, "services-products");
        product_subject.parent = Some("NEWS".to_string());
        item.push_subject(product_subject);
        item.push_subject(Subject::with_scheme("ATS", "ATS", "sources"));
        item.push_subject(Subject::with_scheme("default", "default", "distribution"));

        item.word_count = Some(parse_word_count(&caps[5])?);
    }

    let content = decode_latin1(&lines[1..].join(&b'\n'));

    item.headline = HEADLINE
        .find(&content)
        .map(|m| m.as_str().trim().to_string())
        .unwrap_or_default();

    let mut city = None;
    if let Some(caps) = BODY.captures(&content) {
        let remainder = caps.get(1).map(|m| m.as_str()).unwrap_or("");
        let parts: Vec<&str> = ABSTRACT_SPLIT.splitn(remainder, 2).collect();
        if parts.len() == 2 {
            item.abstract_ = Some(parts[0].to_string());
            item.body = parts[1].to_string();
            if let Some(found) = CITY.find(parts[0]) {
                city = Some(found.as_str().trim().to_string());
            }
        } else {
            // no clean abstract split: the whole remainder is body
            debug!("ats bulletin without abstract divider");
            item.body = remainder.to_string();
        }
    }

    Ok((item, city))
}
