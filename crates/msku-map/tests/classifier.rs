use msku_map::{Classifier, ClassifierRules, classify};
use proptest::prelude::*;

#[test]
fn rule_order_examples() {
    assert_eq!(classify("DRAGON123"), "DRAGON_BRAND_PRODUCTS");
    assert_eq!(classify("12345678"), "NUMERIC_PRODUCT_TYPE_12");
    assert_eq!(classify("1234"), "HSN_CODE_1234");
    assert_eq!(
        classify("123e4567-e89b-12d3-a456-426614174000"),
        "UUID_SHIPMENT_IDS"
    );
}

#[test]
fn default_classifier_matches_free_function() {
    let classifier = Classifier::new(ClassifierRules::default());
    for id in ["WH001", "Golden_Apple_001", "rudrav-kurta", "MT12"] {
        assert_eq!(classifier.classify(id), classify(id));
    }
}

#[test]
fn rules_file_round_trip() {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = dir.path().join("rules.toml");
    std::fs::write(
        &path,
        "brands = [\"zenith\"]\nelectronics_prefixes = [\"ZX\"]\n",
    )
    .expect("write rules");

    let rules = ClassifierRules::load(&path).expect("load rules");
    let classifier = Classifier::new(rules);
    assert_eq!(classifier.classify("zenith-watch"), "ZENITH_BRAND_PRODUCTS");
    assert_eq!(classifier.classify("ZXABCDEFG"), "ELECTRONICS_TYPE_ZX");
    // Keyword groups were not overridden.
    assert_eq!(classifier.classify("canvas print"), "HANDICRAFT_PRODUCTS");
}

#[test]
fn missing_rules_file_is_an_error() {
    let dir = tempfile::tempdir().expect("tempdir");
    assert!(ClassifierRules::load(&dir.path().join("absent.toml")).is_err());
}

proptest! {
    #[test]
    fn classification_is_deterministic(id in "\\PC*") {
        prop_assert_eq!(classify(&id), classify(&id));
    }

    #[test]
    fn classification_is_never_empty(id in "\\PC*") {
        prop_assert!(!classify(&id).is_empty());
    }

    #[test]
    fn surrounding_whitespace_does_not_matter(id in "[A-Za-z0-9_-]{0,40}") {
        let padded = format!("  {id}\t");
        prop_assert_eq!(classify(&padded), classify(&id));
    }

    #[test]
    fn long_digit_strings_are_order_ids(id in "[0-9]{15,30}") {
        prop_assert_eq!(classify(&id), format!("NUMERIC_ORDER_TYPE_{}", &id[..3]));
    }
}
