//! Property tests for the settings file reader.

use proptest::prelude::*;
use serde_json::json;

use marginalia::{Comment, DocumentStore, KeyPath, YamlDocument};

fn key_segment() -> impl Strategy<Value = String> {
    proptest::string::string_regex("[A-Za-z][A-Za-z0-9_]{0,10}").unwrap()
}

fn scalar() -> impl Strategy<Value = serde_json::Value> {
    prop_oneof![
        any::<bool>().prop_map(|b| json!(b)),
        any::<i32>().prop_map(|n| json!(n)),
        proptest::string::string_regex("[ -~]{0,20}")
            .unwrap()
            .prop_map(|s| json!(s)),
    ]
}

proptest! {
    #![proptest_config(ProptestConfig {
        cases: 96,
        .. ProptestConfig::default()
    })]

    /// PROPERTY: the reader never panics on arbitrary input.
    #[test]
    fn property_parse_never_panics(text in "(?s).{0,256}") {
        let _ = YamlDocument::from_text("config.yml", &text);
    }

    /// PROPERTY: values set programmatically survive render and re-parse.
    #[test]
    fn property_set_values_survive_round_trip(
        entries in proptest::collection::vec(
            (key_segment(), key_segment(), scalar()),
            1..=6,
        ),
        comment in proptest::option::of("[A-Za-z][A-Za-z ]{0,20}"),
    ) {
        let mut doc = YamlDocument::from_text("config.yml", "").unwrap();
        for (section, leaf, value) in &entries {
            let key = KeyPath::from_segments([section, leaf]).unwrap();
            doc.set(&key, value.clone()).unwrap();
            if let Some(text) = &comment {
                doc.set_comment(&key, Comment::new([text.trim_end()])).unwrap();
            }
        }

        let text = doc.to_text().unwrap();
        let reparsed = YamlDocument::from_text("config.yml", &text).unwrap();

        prop_assert_eq!(reparsed.to_value(), doc.to_value());
        prop_assert_eq!(reparsed.to_text().unwrap(), text);
    }
}
