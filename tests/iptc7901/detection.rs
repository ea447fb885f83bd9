//! Dialect detection and format probing

use wirefeed_rs::iptc7901::{self, Dialect};
use wirefeed_rs::{WireError, WireFormat};

#[test]
fn dpa_header_pattern_wins_first() {
    let data = b"bdt0123 3 KU 391 dpa slug\nKULTUR/\nMUSIK/\nHeadline =\nBody.\n";
    assert_eq!(iptc7901::detect(data), Some(Dialect::Dpa));
    assert!(iptc7901::can_parse(data));
}

#[test]
fn ats_control_bytes_single_or_double() {
    assert_eq!(iptc7901::detect(b"\x7f\x7f\nrest\n"), Some(Dialect::Ats));
    assert_eq!(iptc7901::detect(b"\x7f\nrest\n"), Some(Dialect::Ats));
}

#[test]
fn unmatched_stream_is_a_negative_probe_not_an_exception() {
    let data = b"This is just some text file.\nNothing wire about it.\n";
    assert_eq!(iptc7901::detect(data), None);
    assert!(!iptc7901::can_parse(data));

    let err = iptc7901::parse(data, "test").unwrap_err();
    assert!(matches!(err, WireError::FormatMismatch));
}

#[test]
fn empty_input_is_a_negative_probe() {
    assert_eq!(iptc7901::detect(b""), None);
    assert!(!iptc7901::can_parse(b""));
}

#[test]
fn format_dispatch_routes_bulletins_and_newsml() {
    assert_eq!(
        WireFormat::detect(b"dpa1 1 KU 042 x\n"),
        Some(WireFormat::Iptc7901)
    );
    assert_eq!(
        WireFormat::detect(b"<NewsML><NewsItem/></NewsML>"),
        Some(WireFormat::NewsMlCtk)
    );
    assert_eq!(WireFormat::detect(b"plain text"), None);
}

#[test]
fn concurrent_parses_do_not_share_dialect_state() {
    let dpa: &[u8] = b"dpa77 1 SP 010 x\nSPORT/\nFUSSBALL/\nHeadline =\nBody.\n";
    let ats: &[u8] = b"\x7f\x7f\n\x7f\x01ats9 2 EC 020 x\nTitre =  Geneve   Corps.\n";

    let handles: Vec<_> = (0..8)
        .map(|i| {
            std::thread::spawn(move || {
                if i % 2 == 0 {
                    iptc7901::parse(dpa, "dpa").unwrap()
                } else {
                    iptc7901::parse(ats, "ats").unwrap()
                }
            })
        })
        .collect();

    for (i, handle) in handles.into_iter().enumerate() {
        let item = handle.join().unwrap();
        if i % 2 == 0 {
            assert_eq!(item.original_source.as_deref(), Some("dpa"));
            assert_eq!(item.language, None);
        } else {
            assert_eq!(item.original_source.as_deref(), Some("ats"));
            assert_eq!(item.language.as_deref(), Some("fr"));
        }
    }
}
