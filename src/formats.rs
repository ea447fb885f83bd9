//! Wire format dispatch
//!
//! A closed set of supported formats behind one capability surface:
//! probe with `can_parse`, extract with `parse`. The host's ingest registry
//! holds these variants and feeds each incoming file to the first one that
//! claims it.

use tracing::debug;

use crate::item::NewsItem;
use crate::xmltree::Element;
use crate::{Result, WireError, iptc7901, newsml};

/// Supported wire formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WireFormat {
    /// IPTC 7901 plain-text bulletins, DPA and ATS dialects
    Iptc7901,
    /// CTK NewsML 1.0.4 XML documents
    NewsMlCtk,
}

impl WireFormat {
    /// All formats, in probe order.
    pub const ALL: [WireFormat; 2] = [WireFormat::Iptc7901, WireFormat::NewsMlCtk];

    /// Whether this format claims the byte stream. A negative answer is a
    /// probe result, never an error.
    pub fn can_parse(&self, data: &[u8]) -> bool {
        match self {
            WireFormat::Iptc7901 => iptc7901::can_parse(data),
            WireFormat::NewsMlCtk => {
                let text = String::from_utf8_lossy(data);
                Element::parse(&text)
                    .map(|root| newsml::can_parse(&root))
                    .unwrap_or(false)
            }
        }
    }

    /// Parse the byte stream with this format.
    pub fn parse(&self, data: &[u8], provider: &str) -> Result<NewsItem> {
        match self {
            WireFormat::Iptc7901 => iptc7901::parse(data, provider),
            WireFormat::NewsMlCtk => newsml::parse_bytes(data, provider),
        }
    }

    /// Probe all formats in order and return the first that claims the
    /// stream, or [`WireError::FormatMismatch`] via `None`.
    pub fn detect(data: &[u8]) -> Option<WireFormat> {
        let format = WireFormat::ALL.into_iter().find(|f| f.can_parse(data));
        debug!(?format, "wire format probe");
        format
    }

    /// Detect and parse in one call.
    pub fn parse_any(data: &[u8], provider: &str) -> Result<NewsItem> {
        WireFormat::detect(data)
            .ok_or(WireError::FormatMismatch)?
            .parse(data, provider)
    }
}
