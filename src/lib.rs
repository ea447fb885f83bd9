#![doc = include_str!("../README.md")]

/// Static lookup tables: priority codes, product maps, IPTC subject codes
pub mod codes;
mod error;
mod formats;
/// IPTC 7901 bulletin parser (DPA/ATS dialects)
pub mod iptc7901;
/// Normalized news item record
pub mod item;
/// CTK NewsML 1.0.4 extractor
pub mod newsml;
/// Minimal XML element tree used by the NewsML extractor
pub mod xmltree;

pub use error::{Cause, Result, WireError};
pub use formats::WireFormat;
pub use item::{ContentType, Dateline, Genre, NewsItem, Subject};
pub use xmltree::{Element, Node};
