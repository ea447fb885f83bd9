//! IPTC 7901 wire bulletin parser
//!
//! Line-oriented plain-text dispatches in two header dialects: DPA (pattern
//! header on the first line) and ATS (leading DEL control bytes). Dialect
//! detection is a pure probe on the first line; the detected dialect is a
//! value threaded through the parse call, never shared state, so concurrent
//! parses cannot observe each other.

mod ats;
mod dpa;

use std::sync::LazyLock;

use regex::bytes::Regex as BytesRegex;
use tracing::debug;

use crate::error::Cause;
use crate::item::{Dateline, NewsItem};
use crate::{Result, WireError};

/// The two supported header/body conventions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Dialect {
    /// Pattern header: `<source><seq> <priority> <category> <words> <slug>`
    Dpa,
    /// Header line prefixed with one or two DEL (0x7F) control bytes
    Ats,
}

/// DPA wire header on the first line, case-insensitive.
static DPA_FIRST_LINE: LazyLock<BytesRegex> = LazyLock::new(|| {
    BytesRegex::new(r"(?i-u)^([a-zA-Z]*)([0-9]*) (.) ([A-Z]{1,3}) ([0-9]*) ([a-zA-Z0-9 ]*)")
        .expect("dpa header pattern")
});

/// Markers that open the editorial-note region of a DPA body.
const NOTE_MARKERS: [&str; 2] = [
    "The following information is not for publication",
    "The following information is not intended for publication",
];

/// Detect which bulletin dialect a byte stream is in, from its first line.
///
/// DPA is tried first, then ATS. `None` means the stream is not a bulletin;
/// format probing treats that as a negative result, not an error.
pub fn detect(data: &[u8]) -> Option<Dialect> {
    let first = split_lines(data).into_iter().next()?;
    if DPA_FIRST_LINE.is_match(first) {
        return Some(Dialect::Dpa);
    }
    if first.starts_with(&[0x7F]) {
        return Some(Dialect::Ats);
    }
    None
}

/// Whether the byte stream looks like a bulletin in either dialect.
pub fn can_parse(data: &[u8]) -> bool {
    detect(data).is_some()
}

/// Parse a bulletin byte stream into a normalized item.
///
/// Returns [`WireError::FormatMismatch`] when neither dialect header matches,
/// and [`WireError::ParseFailure`] carrying the provider identity when field
/// extraction fails. No partial record is produced on failure.
pub fn parse(data: &[u8], provider: &str) -> Result<NewsItem> {
    let dialect = detect(data).ok_or(WireError::FormatMismatch)?;
    debug!(?dialect, "parsing bulletin");
    let lines = split_lines(data);

    let (item, city) = match dialect {
        Dialect::Dpa => dpa::parse_content(&lines).map(|item| (item, None)),
        Dialect::Ats => ats::parse_content(&lines),
    }
    .map_err(|cause| WireError::parse_failure(provider, cause))?;

    Ok(post_process(item, city))
}

/// Shared post-processing for both dialects: slugline and keywords are
/// forced empty for this format, the dateline is derived, reserved XML
/// characters are substituted and the body is paragraph-wrapped.
fn post_process(mut item: NewsItem, city: Option<String>) -> NewsItem {
    item.slugline = None;
    item.keywords.clear();
    derive_dateline(&mut item, city);

    item.headline = escape_reserved(&item.headline);
    if let Some(abstract_) = item.abstract_.take() {
        item.abstract_ = Some(escape_reserved(&abstract_));
    }

    // escape before wrapping so the paragraph tags survive
    let body = escape_reserved(&item.body);
    item.body = format!(
        "<p>{}</p>",
        body.replace("\r\n", " ").replace('\n', "</p><p>")
    );
    item
}

/// Fill the dateline from the located-city hint when one was extracted.
///
/// Stand-in for the host's dateline service, which resolves the city against
/// a place register; here the hint itself is both text and location.
fn derive_dateline(item: &mut NewsItem, city: Option<String>) {
    let Some(city) = city.filter(|c| !c.is_empty()) else {
        return;
    };
    if item.dateline.is_none() {
        item.dateline = Some(Dateline {
            text: city.clone(),
            located: Some(city),
        });
    }
}

/// Substitute characters that would break downstream XML handling.
/// The reference computed these replacements but discarded the results;
/// here they are applied for real.
fn escape_reserved(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '\u{0007}' | '\u{0003}' | '\u{0004}' | '\u{001f}' => out.push(' '),
            _ => out.push(ch),
        }
    }
    out
}

/// Split a byte stream into lines, keeping the terminator on each line,
/// the way the wire format counts lines.
fn split_lines(data: &[u8]) -> Vec<&[u8]> {
    let mut lines = Vec::new();
    let mut start = 0;
    for (idx, byte) in data.iter().enumerate() {
        if *byte == b'\n' {
            lines.push(&data[start..=idx]);
            start = idx + 1;
        }
    }
    if start < data.len() {
        lines.push(&data[start..]);
    }
    lines
}

/// Decode a permissive 8-bit line: every byte maps to the code point of the
/// same value, so decoding never fails.
fn decode_latin1(bytes: &[u8]) -> String {
    bytes.iter().map(|&b| b as char).collect()
}

/// Bulletins carry no identifier on the wire, so each parse generates one.
fn generate_guid() -> String {
    format!(
        "tag:wirefeed:{}:{}",
        chrono::Utc::now().format("%Y"),
        uuid::Uuid::new_v4()
    )
}

/// Word-count capture from the wire header; an unparsable count fails the
/// whole parse, matching the all-or-nothing extraction policy.
fn parse_word_count(digits: &str) -> std::result::Result<u32, Cause> {
    digits
        .parse::<u32>()
        .map_err(|e| format!("invalid word count {digits:?}: {e}").into())
}
