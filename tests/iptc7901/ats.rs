//! ATS dialect extraction

use wirefeed_rs::iptc7901;

const CANONICAL: &[u8] = b"\x7f\x7f\n\
\x7f\x01ats0042 2 CL 120 festival\n\
Le festival ouvre ses portes =  \
Lausanne, le festival a ouvert dimanche.   Le programme complet sera publie lundi.\n";

#[test]
fn header_fields_from_second_line() {
    let item = iptc7901::parse(CANONICAL, "ats").unwrap();

    assert_eq!(item.original_source.as_deref(), Some("ats"));
    assert_eq!(item.ingest_provider_sequence.as_deref(), Some("0042"));
    assert_eq!(item.priority, 2);
    assert_eq!(item.word_count, Some(120));
    assert_eq!(item.language.as_deref(), Some("fr"));
}

#[test]
fn category_mapping() {
    let item = iptc7901::parse(CANONICAL, "ats").unwrap();
    assert_eq!(item.subject[0].qcode, "NEWS/CULTURE");
    assert_eq!(item.subject[0].scheme.as_deref(), Some("services-products"));
    assert_eq!(item.subject[1].qcode, "ATS");
    assert_eq!(item.subject[2].qcode, "default");
}

#[test]
fn headline_abstract_body_split() {
    let item = iptc7901::parse(CANONICAL, "ats").unwrap();

    assert_eq!(item.headline, "Le festival ouvre ses portes =");
    assert_eq!(
        item.abstract_.as_deref(),
        Some("Lausanne, le festival a ouvert dimanche.")
    );
    assert_eq!(
        item.body,
        "<p>Le programme complet sera publie lundi.</p><p></p>"
    );
}

#[test]
fn city_hint_fills_the_dateline() {
    let item = iptc7901::parse(CANONICAL, "ats").unwrap();
    let dateline = item.dateline.expect("dateline derived from city hint");
    assert_eq!(dateline.text, "Lausanne,");
    assert_eq!(dateline.located.as_deref(), Some("Lausanne,"));
}

#[test]
fn no_clean_split_takes_whole_remainder_as_body() {
    let data = b"\x7f\n\x7f\x01ats9 3 EC 050 x\nTitre =  Tout le reste est corps.";
    let item = iptc7901::parse(data, "ats").unwrap();

    assert_eq!(item.abstract_, None);
    assert_eq!(item.dateline, None);
    assert_eq!(item.body, "<p>Tout le reste est corps.</p>");
}

#[test]
fn slugline_and_keywords_forced_empty() {
    let item = iptc7901::parse(CANONICAL, "ats").unwrap();
    assert_eq!(item.slugline, None);
    assert!(item.keywords.is_empty());
}

#[test]
fn non_utf8_source_bytes_decode_permissively() {
    let data = b"\x7f\n\x7f\x01ats9 3 EC 050 x\nTitre =  Gen\xe8ve   Le corps.\n";
    let item = iptc7901::parse(data, "ats").unwrap();
    assert_eq!(item.abstract_.as_deref(), Some("Gen\u{e8}ve"));
    assert_eq!(item.dateline.unwrap().text, "Gen\u{e8}ve");
}
