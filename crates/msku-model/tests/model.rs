//! Tests for msku-model types.

use chrono::NaiveDate;
use msku_model::{AnnotatedRecord, MappingMethod, MasterMapping, ProcessingSummary, VariantSet};

#[test]
fn annotated_record_mapped_flag() {
    let processed_at = NaiveDate::from_ymd_opt(2024, 5, 1)
        .and_then(|d| d.and_hms_opt(12, 0, 0))
        .expect("valid timestamp");
    let mapped = AnnotatedRecord {
        row: 0,
        identifier: Some("WH001".to_string()),
        msku: "WIRELESS_HEADPHONES".to_string(),
        processed_at,
        method: MappingMethod::Explicit,
    };
    let empty = AnnotatedRecord {
        row: 1,
        identifier: Some("  ".to_string()),
        msku: "UNCATEGORIZED_EMPTY".to_string(),
        processed_at,
        method: MappingMethod::IntelligentAuto,
    };
    assert!(mapped.is_mapped());
    assert!(!empty.is_mapped());

    let json = serde_json::to_string(&mapped).expect("serialize record");
    assert!(json.contains("\"method\":\"explicit\""));
}

#[test]
fn summary_serializes() {
    let summary = ProcessingSummary::from_mskus(["A_BRAND_PRODUCTS", "UNCATEGORIZED_UNKNOWN"]);
    let json = serde_json::to_string(&summary).expect("serialize summary");
    let round: ProcessingSummary = serde_json::from_str(&json).expect("deserialize summary");
    assert_eq!(round.success_rate, 50.0);
    assert_eq!(round.categories.len(), 2);
}

#[test]
fn seed_mapping_parses_from_json() {
    let json = r#"{
        "WIRELESS_HEADPHONES": ["WH001", "HEADPHONE_BT", "WH_BLUETOOTH"],
        "COFFEE_MUG": ["CM002", "MUG_CERAMIC", "COFFEE_CUP"]
    }"#;
    let mapping: MasterMapping = serde_json::from_str(json).expect("parse seed");
    assert_eq!(mapping.len(), 2);
    assert_eq!(mapping.find_canonical("MUG_CERAMIC"), Some("COFFEE_MUG"));
    assert_eq!(mapping.get("WIRELESS_HEADPHONES").map(VariantSet::len), Some(3));
}

#[test]
fn malformed_seed_is_rejected() {
    let result: Result<MasterMapping, _> = serde_json::from_str(r#"{"A": "not-a-list"}"#);
    assert!(result.is_err());
}
