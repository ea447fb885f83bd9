//! DPA dialect: pattern header plus a four-region line walk
//!
//! After the header line, the bulletin runs through slugline, header, body
//! and editorial-note regions. The walk is an explicit state machine over an
//! owned accumulator; transitions are one-directional and, past the first two
//! lines, driven purely by line content.

use std::sync::LazyLock;

use regex::Regex;

use crate::codes;
use crate::error::Cause;
use crate::item::{NewsItem, Subject};

use super::{NOTE_MARKERS, decode_latin1, generate_guid, parse_word_count};

/// `<source><sequence> <priority> <category> <words> <rest>`, case-insensitive.
static HEADER: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)^([a-zA-Z]*)([0-9]*) (.) ([A-Z]{1,3}) ([0-9]*) ([a-zA-Z0-9 ]*)")
        .expect("dpa header pattern")
});

/// A header line ending with this marker closes the header region.
const END_MARKER: &str = " =\n";

pub(super) fn parse_content(lines: &[&[u8]]) -> Result<NewsItem, Cause> {
    let first = lines.first().ok_or("empty bulletin")?;
    let mut item = NewsItem::text(generate_guid());

    let header = decode_latin1(first);
    if let Some(caps) = HEADER.captures(&header) {
        let qcode = caps[4].to_uppercase();
        item.original_source = Some(caps[1].to_string());
        item.ingest_provider_sequence = Some(caps[2].to_string());
        item.priority = codes::map_priority(Some(&caps[3]));

        let product = codes::dpa_product(&qcode);
        let mut product_subject = Subject::with_scheme(product, product, "services-products");
        product_subject.parent = Some("NEWS".to_string());
        item.push_subject(product_subject);
        item.push_subject(Subject::with_scheme("DPA", "DPA", "sources"));
        item.push_subject(Subject::with_scheme("default", "default", "distribution"));

        item.word_count = Some(parse_word_count(&caps[5])?);
    }

    let mut walk = Walk::new(item);
    for line in &lines[1..] {
        walk = walk.step(decode_latin1(line));
    }
    Ok(walk.finish())
}

/// Region of the bulletin the walk is currently in. Transitions only move
/// forward.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Region {
    /// First two lines after the wire header
    Slugline,
    /// Take-key, annotations, headline and byline lines
    Header,
    /// Story text
    Body,
    /// "Not for publication" editorial note
    Note,
}

/// Line walk accumulator; owns the item and is moved through each step.
struct Walk {
    item: NewsItem,
    region: Region,
    line_no: usize,
}

impl Walk {
    fn new(item: NewsItem) -> Self {
        Walk {
            item,
            region: Region::Slugline,
            line_no: 0,
        }
    }

    /// Consume one decoded line (terminator included) and advance.
    fn step(mut self, line: String) -> Self {
        self.line_no += 1;
        match self.region {
            Region::Slugline => {
                let chunk = line.trim_end_matches(['/', '\r', '\n']);
                match &mut self.item.slugline {
                    Some(slug) => slug.push_str(chunk),
                    None => self.item.slugline = Some(chunk.to_string()),
                }
                if self.line_no >= 2 {
                    self.region = Region::Header;
                }
            }
            Region::Header => self.header_line(line),
            Region::Body => {
                if NOTE_MARKERS.iter().any(|marker| line.contains(marker)) {
                    // the marker line itself belongs to neither body nor note
                    self.item.ednote = Some(String::new());
                    self.region = Region::Note;
                } else {
                    self.item.body.push_str(&line);
                }
            }
            Region::Note => {
                if let Some(note) = &mut self.item.ednote {
                    note.push_str(&line);
                }
            }
        }
        self
    }

    fn header_line(&mut self, line: String) {
        // take-key lines are entirely uppercase
        if is_upper(&line) {
            let chunk = line.trim_end_matches('\n');
            match &mut self.item.anpa_take_key {
                Some(key) => {
                    key.push(' ');
                    key.push_str(chunk);
                }
                None => self.item.anpa_take_key = Some(chunk.to_string()),
            }
            return;
        }

        // parenthesized annotations
        if line.starts_with('(') || line.ends_with(')') {
            match &mut self.item.anpa_header {
                Some(header) => {
                    header.push(' ');
                    header.push_str(&line);
                }
                None => self.item.anpa_header = Some(line),
            }
            return;
        }

        if line.ends_with(END_MARKER) {
            let stripped = line.trim_end_matches([' ', '=', '\n']);
            if let Some(rest) = line.strip_prefix("By ") {
                self.item.byline = Some(rest.trim_end_matches([' ', '=', '\n']).to_string());
            } else {
                self.item.headline.push_str(stripped);
            }
            self.region = Region::Body;
        } else {
            self.item.headline.push_str(&line);
        }
    }

    fn finish(self) -> NewsItem {
        self.item
    }
}

/// Python-style `str.isupper`: at least one cased character and no lowercase
/// ones. Digits, whitespace and punctuation are uncased.
fn is_upper(line: &str) -> bool {
    let mut has_cased = false;
    for ch in line.chars() {
        if ch.is_lowercase() {
            return false;
        }
        if ch.is_uppercase() {
            has_cased = true;
        }
    }
    has_cased
}
