//! Static lookup tables shared by the wire parsers
//!
//! Priority codes, per-dialect category-to-product maps and the IPTC
//! subject-code vocabulary. These are configuration data fixed by the ingest
//! pipeline; the dialect product maps must be reproduced verbatim.

/// Priority assigned when the wire code is missing or unrecognized.
pub const PRIORITY_DEFAULT: u8 = 5;

/// Map a single-character wire priority code to a numeric priority level.
///
/// Digits '1' through '6' map to that level; anything else (missing value,
/// non-digit, out-of-range digit) maps to the default "normal" priority 5.
pub fn map_priority(code: Option<&str>) -> u8 {
    match code.map(str::trim) {
        Some(value) if value.len() == 1 => match value.as_bytes()[0] {
            b'1'..=b'6' => value.as_bytes()[0] - b'0',
            _ => PRIORITY_DEFAULT,
        },
        _ => PRIORITY_DEFAULT,
    }
}

/// Product bucket used when a category code has no dialect mapping.
pub const PRODUCT_DEFAULT: &str = "NEWS/GENERAL";

/// DPA category code to product mapping.
const PRODUCTS_DPA: &[(&str, &str)] = &[
    ("F", "NEWS/ECONOMY"),
    ("WI", "NEWS/ECONOMY"),
    ("I", "NEWS/POLITICS"),
    ("PL", "NEWS/POLITICS"),
    ("KU", "NEWS/CULTURE"),
    ("S", "NEWS/SPORTS"),
    ("SP", "NEWS/SPORTS"),
];

/// ATS category code to product mapping.
const PRODUCTS_ATS: &[(&str, &str)] = &[("CL", "NEWS/CULTURE"), ("EC", "NEWS/ECONOMY")];

fn lookup(table: &'static [(&'static str, &'static str)], code: &str) -> Option<&'static str> {
    table
        .iter()
        .find(|(qcode, _)| *qcode == code)
        .map(|(_, name)| *name)
}

/// Map a DPA category code to its product, falling back to NEWS/GENERAL.
pub fn dpa_product(code: &str) -> &'static str {
    lookup(PRODUCTS_DPA, code).unwrap_or(PRODUCT_DEFAULT)
}

/// Map an ATS category code to its product, falling back to NEWS/GENERAL.
pub fn ats_product(code: &str) -> &'static str {
    lookup(PRODUCTS_ATS, code).unwrap_or(PRODUCT_DEFAULT)
}

/// IPTC subject-code vocabulary, sorted by qcode for binary search.
///
/// Top-level subjects plus the sub-codes seen in CTK feeds. Unknown codes map
/// to an empty name, which is what the ingest pipeline expects for terms it
/// will resolve later.
const IPTC_SUBJECT_CODES: &[(&str, &str)] = &[
    ("01000000", "arts, culture and entertainment"),
    ("01001000", "archaeology"),
    ("01002000", "architecture"),
    ("01005000", "cinema"),
    ("01006000", "dance"),
    ("01007000", "fashion"),
    ("01010000", "literature"),
    ("01011000", "music"),
    ("01013000", "photography"),
    ("01016000", "television"),
    ("01017000", "theatre"),
    ("01026000", "mass media"),
    ("02000000", "crime, law and justice"),
    ("02001000", "crime"),
    ("02002000", "judiciary"),
    ("02003000", "police"),
    ("02006000", "laws"),
    ("02008000", "trials"),
    ("03000000", "disaster and accident"),
    ("03002000", "fire"),
    ("03006000", "accident and emergency incident"),
    ("04000000", "economy, business and finance"),
    ("04006000", "financial and business service"),
    ("04008000", "macro economics"),
    ("04016000", "market and exchange"),
    ("05000000", "education"),
    ("06000000", "environmental issue"),
    ("07000000", "health"),
    ("07001000", "disease"),
    ("08000000", "human interest"),
    ("09000000", "labour"),
    ("09003000", "unemployment"),
    ("10000000", "lifestyle and leisure"),
    ("11000000", "politics"),
    ("11001000", "defence"),
    ("11002000", "diplomacy"),
    ("11003000", "election"),
    ("11006000", "government"),
    ("11010000", "parliament"),
    ("12000000", "religion and belief"),
    ("13000000", "science and technology"),
    ("14000000", "social issue"),
    ("15000000", "sport"),
    ("15031000", "football"),
    ("15039000", "ice hockey"),
    ("15073000", "tennis"),
    ("16000000", "unrest, conflicts and war"),
    ("16003000", "civil unrest"),
    ("16009000", "war"),
    ("17000000", "weather"),
];

/// Look up the human name for an IPTC subject qcode; empty for unknown codes.
pub fn subject_name(qcode: &str) -> &'static str {
    IPTC_SUBJECT_CODES
        .binary_search_by_key(&qcode, |(code, _)| *code)
        .map(|idx| IPTC_SUBJECT_CODES[idx].1)
        .unwrap_or("")
}
