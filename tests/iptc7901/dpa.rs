//! DPA dialect extraction

use wirefeed_rs::iptc7901;
use wirefeed_rs::{ContentType, WireError};

const CANONICAL: &[u8] = b"JOHN99 1 KU 042 text here =\n\
Sport/Football/\n\
Results/\n\
RESULTS OVERVIEW\n\
(to sports desks)\n\
Big win for the locals =\n\
First paragraph.\n\
Second paragraph.\n\
The following information is not for publication\n\
Please call the sports desk.\n";

#[test]
fn canonical_header_fields() {
    let item = iptc7901::parse(CANONICAL, "dpa").unwrap();

    assert_eq!(item.item_type, ContentType::Text);
    assert_eq!(item.original_source.as_deref(), Some("JOHN"));
    assert_eq!(item.ingest_provider_sequence.as_deref(), Some("99"));
    assert_eq!(item.priority, 1);
    assert_eq!(item.word_count, Some(42));
    assert!(item.guid.starts_with("tag:wirefeed:"));
    assert_eq!(item.version, None);
}

#[test]
fn canonical_subjects_mapped_and_unique() {
    let item = iptc7901::parse(CANONICAL, "dpa").unwrap();

    assert_eq!(item.subject.len(), 3);
    assert_eq!(item.subject[0].qcode, "NEWS/CULTURE");
    assert_eq!(item.subject[0].name, "NEWS/CULTURE");
    assert_eq!(item.subject[0].scheme.as_deref(), Some("services-products"));
    assert_eq!(item.subject[0].parent.as_deref(), Some("NEWS"));
    assert_eq!(item.subject[1].qcode, "DPA");
    assert_eq!(item.subject[1].scheme.as_deref(), Some("sources"));
    assert_eq!(item.subject[2].qcode, "default");
    assert_eq!(item.subject[2].scheme.as_deref(), Some("distribution"));

    // no two services-products entries share a qcode
    let products: Vec<_> = item
        .subject
        .iter()
        .filter(|s| s.scheme.as_deref() == Some("services-products"))
        .collect();
    for (i, a) in products.iter().enumerate() {
        for b in &products[i + 1..] {
            assert_ne!(a.qcode, b.qcode);
        }
    }
}

#[test]
fn canonical_regions() {
    let item = iptc7901::parse(CANONICAL, "dpa").unwrap();

    // slugline and keywords are always empty for this format
    assert_eq!(item.slugline, None);
    assert!(item.keywords.is_empty());

    assert_eq!(item.anpa_take_key.as_deref(), Some("RESULTS OVERVIEW"));
    assert_eq!(item.anpa_header.as_deref(), Some("(to sports desks)\n"));
    assert_eq!(item.headline, "Big win for the locals");
    assert_eq!(
        item.body,
        "<p>First paragraph.</p><p>Second paragraph.</p><p></p>"
    );
    assert_eq!(item.ednote.as_deref(), Some("Please call the sports desk.\n"));
}

#[test]
fn body_is_paragraph_wrapped() {
    let item = iptc7901::parse(CANONICAL, "dpa").unwrap();
    assert!(item.body.starts_with("<p>"));
    assert!(item.body.ends_with("</p>"));
    // the region markers never leak into the body
    assert!(!item.body.contains("not for publication"));
    assert!(!item.body.contains(" =\n"));
}

#[test]
fn crlf_becomes_space_lf_becomes_paragraph_break() {
    let data = b"JOHN99 1 KU 042 x =\nslug/\nslug/\nHead =\nOne\r\ntwo.\nThree.\n";
    let item = iptc7901::parse(data, "dpa").unwrap();
    assert_eq!(item.body, "<p>One two.</p><p>Three.</p><p></p>");
}

#[test]
fn unrecognized_priority_char_maps_to_default() {
    let data = b"JOHN99 u KU 042 x =\nslug/\nslug/\nHead =\nBody.\n";
    let item = iptc7901::parse(data, "dpa").unwrap();
    assert_eq!(item.priority, 5);
}

#[test]
fn unknown_category_falls_back_to_general() {
    let data = b"JOHN99 1 XX 042 x =\nslug/\nslug/\nHead =\nBody.\n";
    let item = iptc7901::parse(data, "dpa").unwrap();
    assert_eq!(item.subject[0].qcode, "NEWS/GENERAL");
}

#[test]
fn economy_and_politics_codes() {
    for (code, product) in [
        ("F", "NEWS/ECONOMY"),
        ("WI", "NEWS/ECONOMY"),
        ("I", "NEWS/POLITICS"),
        ("PL", "NEWS/POLITICS"),
        ("S", "NEWS/SPORTS"),
        ("SP", "NEWS/SPORTS"),
    ] {
        let data = format!("JOHN99 1 {code} 042 x =\nslug/\nslug/\nHead =\nBody.\n");
        let item = iptc7901::parse(data.as_bytes(), "dpa").unwrap();
        assert_eq!(item.subject[0].qcode, product, "code {code}");
    }
}

#[test]
fn byline_closing_the_header() {
    let data = b"JOHN99 1 KU 042 x =\nslug/\nslug/\nBy Jane Reporter =\nBody.\n";
    let item = iptc7901::parse(data, "dpa").unwrap();
    assert_eq!(item.byline.as_deref(), Some("Jane Reporter"));
    assert_eq!(item.headline, "");
}

#[test]
fn reserved_characters_are_substituted() {
    let data = b"JOHN99 1 KU 042 x =\nslug/\nslug/\nQ&A: cats < dogs =\nFish & chips.\n";
    let item = iptc7901::parse(data, "dpa").unwrap();
    assert_eq!(item.headline, "Q&amp;A: cats &lt; dogs");
    assert_eq!(item.body, "<p>Fish &amp; chips.</p><p></p>");
}

#[test]
fn empty_word_count_fails_the_whole_parse() {
    // header pattern matches with an empty word-count group
    let data = b"JOHN99 1 KU  x =\nslug/\nslug/\nHead =\nBody.\n";
    let err = iptc7901::parse(data, "dpa-provider").unwrap_err();
    match err {
        WireError::ParseFailure { provider, .. } => assert_eq!(provider, "dpa-provider"),
        other => panic!("expected ParseFailure, got {other:?}"),
    }
}

#[test]
fn bulletin_timestamps_are_stamped_at_parse_time() {
    let before = chrono::Utc::now();
    let item = iptc7901::parse(CANONICAL, "dpa").unwrap();
    let after = chrono::Utc::now();
    assert!(item.versioncreated >= before && item.versioncreated <= after);
    assert!(item.firstcreated >= before && item.firstcreated <= after);
}
