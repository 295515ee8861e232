//! Service identifier tests

use rundeploy::deploy::names::{generate_service_id, normalize, NameSource, RandomNames};

struct Underscored;

impl NameSource for Underscored {
    fn raw_name(&self) -> String {
        "focused_mcclintock".to_string()
    }
}

#[test]
fn test_normalize_replaces_every_underscore() {
    assert_eq!(normalize("a_b_c"), "a-b-c");
    assert_eq!(normalize("_lead_trail_"), "-lead-trail-");
    assert_eq!(normalize("plain"), "plain");
}

#[test]
fn test_generate_from_underscored_source() {
    assert_eq!(generate_service_id(&Underscored), "focused-mcclintock");
}

#[test]
fn test_random_ids_are_two_words() {
    for _ in 0..200 {
        let id = generate_service_id(&RandomNames);
        assert!(!id.contains('_'));
        assert_eq!(id.split('-').count(), 2, "{id}");
        assert!(id.chars().next().unwrap().is_ascii_lowercase());
    }
}
