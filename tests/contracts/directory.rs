//! DirectoryStore contracts
//!
//! One document per file with the document type's extension (matched
//! case-insensitively), logical names unique, and the creation flag reports
//! whether `open` made the directory.

use std::fs;

use marginalia::{DataRoot, DirectoryStore, DocumentStore, KeyPath, YamlDocument};
use serde::Deserialize;
use serde_json::json;
use tempfile::tempdir;

#[test]
fn contract_only_json_files_become_documents() {
    let dir = tempdir().unwrap();
    fs::write(dir.path().join("alpha.json"), "{}").unwrap();
    fs::write(dir.path().join("beta.JSON"), "{}").unwrap();
    fs::write(dir.path().join("notes.txt"), "").unwrap();

    let store: DirectoryStore = DirectoryStore::open_at(dir.path()).unwrap();

    assert_eq!(store.names().collect::<Vec<_>>(), ["alpha", "beta"]);
    assert!(!store.had_to_create_directory());
}

#[test]
fn contract_nonexistent_directory_is_created() {
    let dir = tempdir().unwrap();
    let root = DataRoot::new(dir.path());

    let store: DirectoryStore = DirectoryStore::open(&root, "kits/daily").unwrap();

    assert!(store.had_to_create_directory());
    assert!(store.is_empty());
    assert_eq!(store.directory(), dir.path().join("kits/daily"));
}

#[test]
fn contract_existing_empty_directory() {
    let dir = tempdir().unwrap();

    let store: DirectoryStore = DirectoryStore::open_at(dir.path()).unwrap();

    assert_eq!(store.len(), 0);
    assert!(!store.had_to_create_directory());
}

#[test]
fn contract_names_without_extension_are_ignored() {
    let dir = tempdir().unwrap();
    fs::write(dir.path().join("README"), "").unwrap();
    fs::write(dir.path().join(".json"), "{}").unwrap();
    fs::write(dir.path().join("kit.json"), "{}").unwrap();

    let store: DirectoryStore = DirectoryStore::open_at(dir.path()).unwrap();

    assert_eq!(store.names().collect::<Vec<_>>(), ["kit"]);
}

#[test]
fn contract_multi_dot_names_stay_distinct() {
    let dir = tempdir().unwrap();
    fs::write(dir.path().join("kit.daily.json"), r#"{"id": 1}"#).unwrap();
    fs::write(dir.path().join("kit.weekly.json"), r#"{"id": 2}"#).unwrap();

    let mut store: DirectoryStore = DirectoryStore::open_at(dir.path()).unwrap();

    assert_eq!(
        store.names().collect::<Vec<_>>(),
        ["kit.daily", "kit.weekly"]
    );
    let id = KeyPath::parse("id").unwrap();
    assert_eq!(store.document("kit.daily").unwrap().get(&id), Some(json!(1)));
    assert_eq!(store.document("kit.weekly").unwrap().get(&id), Some(json!(2)));
}

#[test]
fn contract_documents_round_trip_through_disk() {
    #[derive(Debug, PartialEq, Deserialize)]
    struct Kit {
        items: Vec<String>,
    }

    let dir = tempdir().unwrap();
    {
        let mut store: DirectoryStore = DirectoryStore::open_at(dir.path()).unwrap();
        let doc = store.create("starter").unwrap();
        doc.set(&KeyPath::parse("items").unwrap(), json!(["sword", "bread"]))
            .unwrap();
        doc.save().unwrap();
    }

    let mut reopened: DirectoryStore = DirectoryStore::open_at(dir.path()).unwrap();
    let kits: Vec<(String, Kit)> = reopened.load_all();

    assert_eq!(
        kits,
        [(
            "starter".to_string(),
            Kit {
                items: vec!["sword".into(), "bread".into()]
            }
        )]
    );
}

#[test]
fn contract_one_bad_document_does_not_hide_the_rest() {
    #[derive(Debug, PartialEq, Deserialize)]
    struct Kit {
        items: Vec<String>,
    }

    let dir = tempdir().unwrap();
    fs::write(dir.path().join("broken.json"), "[1, 2").unwrap();
    fs::write(dir.path().join("starter.json"), r#"{"items": ["sword"]}"#).unwrap();

    let mut store: DirectoryStore = DirectoryStore::open_at(dir.path()).unwrap();
    let kits: Vec<(String, Kit)> = store.load_all();

    assert_eq!(store.len(), 2);
    assert_eq!(
        kits,
        [(
            "starter".to_string(),
            Kit {
                items: vec!["sword".into()]
            }
        )]
    );
}

#[test]
fn contract_yaml_directory_claims_yml_files() {
    let dir = tempdir().unwrap();
    fs::write(dir.path().join("daily.yml"), "Items:\n  - bread\n").unwrap();
    fs::write(dir.path().join("weekly.YML"), "Items: []\n").unwrap();
    fs::write(dir.path().join("monthly.json"), "{}").unwrap();

    let mut store = DirectoryStore::<YamlDocument>::open_at(dir.path()).unwrap();

    assert_eq!(store.names().collect::<Vec<_>>(), ["daily", "weekly"]);
    let items = KeyPath::parse("Items").unwrap();
    assert_eq!(
        store.document("daily").unwrap().get(&items),
        Some(json!(["bread"]))
    );
}
