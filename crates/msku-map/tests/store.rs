use msku_map::{MappingRepository, MappingStore, parse_variant_list, sample_mappings};
use msku_model::{MappingMethod, UNCATEGORIZED_EMPTY, UNCATEGORIZED_UNKNOWN};

#[test]
fn explicit_mapping_beats_classifier() {
    let mut store = MappingStore::from_mapping(sample_mappings());
    let resolution = store.resolve_with_method(Some("WH001"));
    assert_eq!(resolution.msku, "WIRELESS_HEADPHONES");
    assert_eq!(resolution.method, MappingMethod::Explicit);
}

#[test]
fn sentinel_values() {
    let mut store = MappingStore::new();
    assert_eq!(store.resolve(None), UNCATEGORIZED_UNKNOWN);
    assert_eq!(store.resolve(Some(" \t")), UNCATEGORIZED_EMPTY);
}

#[test]
fn merge_then_resolve_covers_every_identifier() {
    let mut store = MappingStore::new();
    let ids = ["WH001", "9999999999999999", "Golden_Apple_001", "CSTE-TOTE"];
    let groups = store.classifier().group_by_category(ids);
    store.merge_categories(&groups);

    for id in ids {
        assert!(store.lookup_explicit(id).is_some(), "{id} should be mapped");
    }
    assert_eq!(store.resolve(Some("CSTE-TOTE")), "CSTE_BRAND_PRODUCTS");
    assert!(store.auto_generated().is_empty());
}

#[test]
fn merge_twice_leaves_mapping_unchanged() {
    let mut store = MappingStore::from_mapping(sample_mappings());
    let groups = store
        .classifier()
        .group_by_category(["1234", "5678", "WH002"]);
    store.merge_categories(&groups);
    let once = store.snapshot();
    assert_eq!(store.merge_categories(&groups), 0);
    assert_eq!(store.snapshot(), once);
}

#[test]
fn variant_text_replaces_mapping() {
    let mut store = MappingStore::from_mapping(sample_mappings());
    let variants = parse_variant_list("GLD-1, GLD-2\nGLD-3,,");
    store
        .set_mapping("GOLDEN_APPLE", variants)
        .expect("replace variants");
    assert_eq!(
        store
            .mapping()
            .get("GOLDEN_APPLE")
            .map(|variants| variants.iter().map(String::as_str).collect::<Vec<_>>()),
        Some(vec!["GLD-1", "GLD-2", "GLD-3"])
    );
    assert_eq!(store.lookup_explicit("GLD"), None);
}

#[test]
fn report_tracks_auto_generated_categories() {
    let mut store = MappingStore::from_mapping(sample_mappings());
    store.resolve(Some("1234"));
    store.resolve(Some("5678"));
    let report = store.summary();
    assert_eq!(report.total_categories, 11);
    assert_eq!(report.auto_generated_categories, 2);
    assert_eq!(report.predefined_categories, 9);
}

#[test]
fn repository_round_trip() {
    let dir = tempfile::tempdir().expect("tempdir");
    let repo = MappingRepository::new(dir.path().join("seed").join("mappings.json"));
    assert!(!repo.exists());
    assert!(repo.load().expect("load missing seed").is_empty());

    let mapping = sample_mappings();
    repo.save(&mapping).expect("save seed");
    assert!(repo.exists());
    assert_eq!(repo.load().expect("load seed"), mapping);
}

#[test]
fn repository_rejects_malformed_seed() {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = dir.path().join("mappings.json");
    std::fs::write(&path, r#"{"WIRELESS_HEADPHONES": "WH001"}"#).expect("write seed");
    let err = MappingRepository::new(&path).load().expect_err("malformed seed");
    assert!(err.to_string().contains("Failed to parse mappings"));
}

#[test]
fn reloaded_seed_treats_merged_categories_as_curated() {
    let dir = tempfile::tempdir().expect("tempdir");
    let repo = MappingRepository::new(dir.path().join("mappings.json"));

    let mut store = MappingStore::new();
    let groups = store.classifier().group_by_category(["1234"]);
    store.merge_categories(&groups);
    assert_eq!(
        store.resolve_with_method(Some("1234")).method,
        MappingMethod::IntelligentAuto
    );
    repo.save(store.mapping()).expect("save seed");

    let mut reloaded = MappingStore::from_mapping(repo.load().expect("load seed"));
    assert!(!reloaded.is_classifier_derived("HSN_CODE_1234"));
    let resolution = reloaded.resolve_with_method(Some("1234"));
    assert_eq!(resolution.msku, "HSN_CODE_1234");
    assert_eq!(resolution.method, MappingMethod::Explicit);
}
