//! Tests against the sample UK area-code table in `fixtures/`

use dialplan_core::ColumnConfig;
use dialplan_engine::{generate, AreaResolver};
use dialplan_table::load_area_codes;
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::path::PathBuf;

fn fixture() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("../../fixtures/area_codes.csv")
}

#[test]
fn fixture_codes_nest() {
    let index = load_area_codes(&fixture(), &ColumnConfig::default()).unwrap();

    assert_eq!(index.len(), 27);
    let kendal: Vec<&str> = index.get("1539").unwrap().extensions().iter().map(String::as_str).collect();
    assert_eq!(kendal, vec!["15394", "15395", "15396"]);
    assert_eq!((index.prefix_window().min(), index.prefix_window().max()), (2, 5));
}

#[test]
fn fixture_resolution() {
    let index = load_area_codes(&fixture(), &ColumnConfig::default()).unwrap();
    let resolver = AreaResolver::new(&index);

    assert_eq!(resolver.resolve("015394 12345"), "Unknown");
    assert_eq!(resolver.resolve("15394 12345"), "Hawkshead");
    assert_eq!(resolver.resolve("1539 712345"), "Kendal");
    assert_eq!(resolver.resolve("1697 712345"), "Brampton");
    assert_eq!(resolver.resolve("1697 212345"), "Brampton");
    assert_eq!(resolver.resolve("(020) 7946 0000"), "Unknown");
    assert_eq!(resolver.resolve("20 7946 0000"), "London");
}

#[test]
fn fixture_round_trip() {
    let index = load_area_codes(&fixture(), &ColumnConfig::default()).unwrap();
    let resolver = AreaResolver::new(&index);

    for record in generate(&index, 10_000, 10, StdRng::seed_from_u64(2024)).unwrap() {
        let record = record.unwrap();
        assert_eq!(record.phone_number.len(), 10);
        assert_eq!(
            resolver.resolve_code(&record.phone_number).map(|code| code.code()),
            Some(record.area_code.as_str())
        );
    }
}
